use crate::api::error::TokenizerResult;
use crate::api::types::TokenId;

/// Common tokenizer interface.
///
/// Implementations must be shareable across threads: one tokenizer serves
/// every concurrent translation request.
pub trait Tokenizer: Send + Sync {
    /// Encode text to token IDs.
    fn encode(&self, text: &str) -> TokenizerResult<Vec<TokenId>>;
    /// Decode token IDs to text.
    fn decode(&self, tokens: &[TokenId]) -> TokenizerResult<String>;
    /// Width of a logits row able to address every token id.
    fn vocab_size(&self) -> usize;
    /// Look up a special token by name, returning its ID if present.
    fn token_to_id(&self, token: &str) -> Option<TokenId>;
}
