use nmt_tokenizer::TokenId;

use crate::api::error::TranslateResult;
use crate::api::types::EncoderState;

/// Encoder/decoder model boundary.
///
/// Both calls are blocking. `decode_step` may be called concurrently for
/// sibling hypotheses of the same step, so implementations must be `Sync`.
pub trait InferencePort: Send + Sync {
    /// Run the encoder over the source token ids.
    fn encode(&self, input_ids: &[TokenId]) -> TranslateResult<EncoderState>;

    /// Logits over the vocabulary for the token following `decoder_ids`.
    fn decode_step(&self, decoder_ids: &[TokenId], encoder: &EncoderState) -> TranslateResult<Vec<f32>>;
}
