#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use nmt_tokenizer::{SubwordTokenizer, TokenId, Vocabulary};
use nmt_translate::{EncoderState, InferencePort, TranslateError, TranslateResult};

pub const UNK: TokenId = 0;
pub const PAD: TokenId = 1;
pub const BOS: TokenId = 2;
pub const EOS: TokenId = 3;
pub const PRIVET: TokenId = 4;
pub const MIR: TokenId = 5;
pub const BANG: TokenId = 6;
pub const WIDTH: usize = 9;

/// Small contiguous vocabulary: English source pieces, Russian target pieces.
pub fn vocab() -> Arc<Vocabulary> {
    let json = r#"{
        "<unk>": 0, "<pad>": 1, "<s>": 2, "</s>": 3,
        "▁Привет": 4, "▁мир": 5, "!": 6,
        "▁Hello": 7, "▁World": 8
    }"#;
    Arc::new(Vocabulary::from_json_str(json).expect("test vocab should load"))
}

pub fn tokenizer() -> SubwordTokenizer {
    SubwordTokenizer::new(vocab())
}

/// One-hot style logits: `favorite` gets `high`, everything else 0.0.
pub fn peaked(favorite: TokenId, high: f32) -> Vec<f32> {
    let mut logits = vec![0.0; WIDTH];
    logits[favorite as usize] = high;
    logits
}

/// Port whose logits are a pure function of the decoder prefix.
/// Counts every call so tests can assert that no inference happened.
pub struct FnPort<F> {
    logits: F,
    pub encode_calls: AtomicUsize,
    pub decode_calls: AtomicUsize,
}

impl<F> FnPort<F>
where
    F: Fn(&[TokenId]) -> Vec<f32> + Send + Sync,
{
    pub fn new(logits: F) -> Self {
        Self {
            logits,
            encode_calls: AtomicUsize::new(0),
            decode_calls: AtomicUsize::new(0),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.encode_calls.load(Ordering::SeqCst) + self.decode_calls.load(Ordering::SeqCst)
    }
}

impl<F> InferencePort for FnPort<F>
where
    F: Fn(&[TokenId]) -> Vec<f32> + Send + Sync,
{
    fn encode(&self, input_ids: &[TokenId]) -> TranslateResult<EncoderState> {
        self.encode_calls.fetch_add(1, Ordering::SeqCst);
        Ok(EncoderState::new(vec![0.0; input_ids.len() * 4], input_ids.len()))
    }

    fn decode_step(&self, decoder_ids: &[TokenId], _encoder: &EncoderState) -> TranslateResult<Vec<f32>> {
        self.decode_calls.fetch_add(1, Ordering::SeqCst);
        Ok((self.logits)(decoder_ids))
    }
}

/// Emits "Привет мир!" and then EOS, strongly peaked at every step.
pub fn privet_mir_port() -> FnPort<impl Fn(&[TokenId]) -> Vec<f32> + Send + Sync> {
    FnPort::new(|ids: &[TokenId]| match ids.len() {
        1 => peaked(PRIVET, 10.0),
        2 => peaked(MIR, 10.0),
        3 => peaked(BANG, 10.0),
        _ => peaked(EOS, 10.0),
    })
}

/// Fails the first `failures` decode calls with a malformed logits row.
pub struct FlakyPort {
    failures: usize,
    calls: AtomicUsize,
}

impl FlakyPort {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }
}

impl InferencePort for FlakyPort {
    fn encode(&self, input_ids: &[TokenId]) -> TranslateResult<EncoderState> {
        Ok(EncoderState::new(Vec::new(), input_ids.len()))
    }

    fn decode_step(&self, decoder_ids: &[TokenId], _encoder: &EncoderState) -> TranslateResult<Vec<f32>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
            return Ok(vec![0.0; WIDTH - 1]);
        }
        Ok(if decoder_ids.len() == 1 { peaked(PRIVET, 10.0) } else { peaked(EOS, 10.0) })
    }
}

/// Port whose encoder always fails.
pub struct BrokenEncoder;

impl InferencePort for BrokenEncoder {
    fn encode(&self, _input_ids: &[TokenId]) -> TranslateResult<EncoderState> {
        Err(TranslateError::Inference("encoder session unavailable".into()))
    }

    fn decode_step(&self, _decoder_ids: &[TokenId], _encoder: &EncoderState) -> TranslateResult<Vec<f32>> {
        Err(TranslateError::Inference("decoder session unavailable".into()))
    }
}
