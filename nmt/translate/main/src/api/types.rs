//! Public configuration and result types for translation

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use nmt_tokenizer::TokenId;
use serde::Deserialize;

use crate::api::error::{TranslateError, TranslateResult};

/// Beam search parameters.
///
/// All values are caller supplied; the core has no defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeamConfig {
    /// Token that starts every hypothesis (opus-mt uses `<pad>`)
    pub pad_token_id: TokenId,
    /// Token that marks a hypothesis as complete
    pub eos_token_id: TokenId,
    /// Maximum number of decoding steps
    pub max_length: usize,
    /// Maximum number of live hypotheses per step
    pub beam_width: usize,
}

impl BeamConfig {
    pub fn new(pad_token_id: TokenId, eos_token_id: TokenId, max_length: usize, beam_width: usize) -> Self {
        Self {
            pad_token_id,
            eos_token_id,
            max_length,
            beam_width,
        }
    }

    /// Reject parameters that can never produce a search.
    pub fn validate(&self) -> TranslateResult<()> {
        if self.max_length == 0 {
            return Err(TranslateError::InvalidArgument("max_length must be >= 1".into()));
        }
        if self.beam_width == 0 {
            return Err(TranslateError::InvalidArgument("beam_width must be >= 1".into()));
        }
        Ok(())
    }
}

/// Generation settings found in a HuggingFace/Marian `config.json`.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerationDefaults {
    pub pad_token_id: Option<TokenId>,
    pub eos_token_id: Option<TokenId>,
    pub decoder_start_token_id: Option<TokenId>,
    pub max_length: Option<usize>,
    pub num_beams: Option<usize>,
}

impl GenerationDefaults {
    /// Load from a model `config.json`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> TranslateResult<Self> {
        let p = path.as_ref();
        let file = File::open(p)?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| TranslateError::Config(format!("{}: {}", p.display(), e)))
    }

    pub fn from_json_str(json: &str) -> TranslateResult<Self> {
        serde_json::from_str(json).map_err(|e| TranslateError::Config(e.to_string()))
    }

    /// The decoder start token: `decoder_start_token_id`, falling back to `pad_token_id`.
    pub fn start_token_id(&self) -> Option<TokenId> {
        self.decoder_start_token_id.or(self.pad_token_id)
    }
}

/// Encoder output shared by every decoding step of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderState {
    /// Flattened `[input_len, hidden_size]` encoder output
    pub hidden_states: Vec<f32>,
    /// One entry per source token, all ones
    pub attention_mask: Vec<u32>,
}

impl EncoderState {
    pub fn new(hidden_states: Vec<f32>, input_len: usize) -> Self {
        Self {
            hidden_states,
            attention_mask: vec![1; input_len],
        }
    }
}

/// The hypothesis chosen at the end of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Winning token ids, starting with the pad/start token
    pub tokens: Vec<TokenId>,
    /// Cumulative log-probability
    pub score: f32,
    /// Whether the winner reached the end-of-sequence token
    pub finished: bool,
    /// Decoding steps executed
    pub steps: usize,
}

impl SearchOutcome {
    pub(crate) fn empty(steps: usize) -> Self {
        Self {
            tokens: Vec::new(),
            score: 0.0,
            finished: false,
            steps,
        }
    }
}

/// Snapshot emitted after every decoding step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub step: usize,
    /// Live hypotheses carried into the next step
    pub frontier_len: usize,
    /// Hypotheses completed so far
    pub completed_len: usize,
    /// Score of the best live hypothesis, if any
    pub best_score: Option<f32>,
}
