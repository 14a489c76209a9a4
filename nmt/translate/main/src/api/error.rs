//! Error types for translation

use nmt_tokenizer::TokenizerError;
use thiserror::Error;

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Errors that can occur while translating.
///
/// Every variant aborts only the current call; a `Translator` stays usable.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Translation deadline exceeded after {steps} decoding steps")]
    DeadlineExceeded { steps: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
