//! Facade re-exports for nmt-tokenizer

pub use crate::api::error::*;
pub use crate::api::types::*;
pub use crate::core::normalize::normalize;
pub use crate::core::subword::SubwordTokenizer;
pub use crate::core::vocab::Vocabulary;
pub use crate::spi::contract::Tokenizer;
