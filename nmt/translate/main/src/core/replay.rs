//! Scripted inference port.
//!
//! Replays a fixed table of logits instead of running a network: step `i`
//! answers decoder sequences of length `i + 1` and the last step repeats for
//! anything longer. Used by the CLI and tests as a deterministic stand-in for
//! a real encoder/decoder.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use nmt_tokenizer::TokenId;
use serde::Deserialize;

use crate::api::error::{TranslateError, TranslateResult};
use crate::api::types::EncoderState;
use crate::spi::contract::InferencePort;

fn default_floor() -> f32 {
    -10.0
}

/// JSON form: `{"width": 8, "floor": -10.0, "steps": [{"5": 4.0}, {"3": 6.0}]}`
#[derive(Debug, Deserialize)]
struct ReplayScript {
    width: usize,
    #[serde(default = "default_floor")]
    floor: f32,
    steps: Vec<HashMap<TokenId, f32>>,
}

/// Deterministic `InferencePort` driven by per-step logits rows.
#[derive(Debug, Clone)]
pub struct ReplayModel {
    rows: Vec<Vec<f32>>,
}

impl ReplayModel {
    /// Build from dense logits rows; every row must have the same non-zero width.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> TranslateResult<Self> {
        let width = match rows.first() {
            Some(row) => row.len(),
            None => return Err(TranslateError::Config("replay script has no steps".into())),
        };
        if width == 0 {
            return Err(TranslateError::Config("replay rows must not be empty".into()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(TranslateError::Config(format!(
                "replay step {} has {} logits, expected {}",
                i,
                row.len(),
                width
            )));
        }
        Ok(Self { rows })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> TranslateResult<Self> {
        let p = path.as_ref();
        let file = File::open(p)?;
        let script: ReplayScript = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| TranslateError::Config(format!("{}: {}", p.display(), e)))?;
        Self::from_script(script)
    }

    pub fn from_json_str(json: &str) -> TranslateResult<Self> {
        let script: ReplayScript =
            serde_json::from_str(json).map_err(|e| TranslateError::Config(e.to_string()))?;
        Self::from_script(script)
    }

    fn from_script(script: ReplayScript) -> TranslateResult<Self> {
        let mut rows = Vec::with_capacity(script.steps.len());
        for (i, step) in script.steps.iter().enumerate() {
            let mut row = vec![script.floor; script.width];
            for (&id, &logit) in step {
                let slot = row.get_mut(id as usize).ok_or_else(|| {
                    TranslateError::Config(format!(
                        "replay step {} sets id {} outside width {}",
                        i, id, script.width
                    ))
                })?;
                *slot = logit;
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Logits row width.
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    pub fn steps(&self) -> usize {
        self.rows.len()
    }
}

impl InferencePort for ReplayModel {
    fn encode(&self, input_ids: &[TokenId]) -> TranslateResult<EncoderState> {
        let hidden = input_ids.iter().map(|&id| id as f32).collect();
        Ok(EncoderState::new(hidden, input_ids.len()))
    }

    fn decode_step(&self, decoder_ids: &[TokenId], _encoder: &EncoderState) -> TranslateResult<Vec<f32>> {
        if decoder_ids.is_empty() {
            return Err(TranslateError::Inference("decode_step called with no decoder tokens".into()));
        }
        let step = (decoder_ids.len() - 1).min(self.rows.len() - 1);
        Ok(self.rows[step].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_expands_to_dense_rows() {
        let model = ReplayModel::from_json_str(
            r#"{"width": 4, "floor": -1.0, "steps": [{"2": 5.0}, {"3": 7.0, "0": 1.0}]}"#,
        )
        .unwrap();
        assert_eq!(model.width(), 4);
        assert_eq!(model.steps(), 2);

        let enc = model.encode(&[9, 9]).unwrap();
        assert_eq!(enc.attention_mask, vec![1, 1]);
        assert_eq!(model.decode_step(&[1], &enc).unwrap(), vec![-1.0, -1.0, 5.0, -1.0]);
        assert_eq!(model.decode_step(&[1, 2], &enc).unwrap(), vec![1.0, -1.0, -1.0, 7.0]);
        // Past the script, the last row repeats
        assert_eq!(model.decode_step(&[1, 2, 3, 3], &enc).unwrap(), vec![1.0, -1.0, -1.0, 7.0]);
    }

    #[test]
    fn test_default_floor() {
        let model = ReplayModel::from_json_str(r#"{"width": 2, "steps": [{}]}"#).unwrap();
        let enc = model.encode(&[]).unwrap();
        assert_eq!(model.decode_step(&[0], &enc).unwrap(), vec![-10.0, -10.0]);
    }

    #[test]
    fn test_invalid_scripts() {
        assert!(matches!(
            ReplayModel::from_json_str(r#"{"width": 2, "steps": []}"#),
            Err(TranslateError::Config(_))
        ));
        assert!(matches!(
            ReplayModel::from_json_str(r#"{"width": 2, "steps": [{"5": 1.0}]}"#),
            Err(TranslateError::Config(_))
        ));
        assert!(matches!(
            ReplayModel::from_json_str(r#"{"width": 0, "steps": [{}]}"#),
            Err(TranslateError::Config(_))
        ));
        assert!(matches!(
            ReplayModel::from_rows(vec![vec![0.0; 3], vec![0.0; 2]]),
            Err(TranslateError::Config(_))
        ));
    }

    #[test]
    fn test_empty_decoder_input_is_inference_error() {
        let model = ReplayModel::from_rows(vec![vec![0.0; 3]]).unwrap();
        let enc = model.encode(&[1]).unwrap();
        assert!(matches!(model.decode_step(&[], &enc), Err(TranslateError::Inference(_))));
    }
}
