//! Error types for vocabulary loading and tokenization

use thiserror::Error;

/// Result type for tokenizer operations
pub type TokenizerResult<T> = Result<T, TokenizerError>;

/// Errors that can occur while loading a vocabulary or tokenizing
#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("Vocabulary load error: {0}")]
    VocabLoad(String),

    #[error("Vocabulary is missing reserved token {0}")]
    MissingReservedToken(String),
}
