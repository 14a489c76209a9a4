//! # NMT Tokenizer
//!
//! Vocabulary and greedy longest-match subword tokenizer for opus-mt style
//! translation models.
//!
//! This crate provides:
//! - `Vocabulary`: immutable bijection between subword strings and ids,
//!   loaded from a `vocab.json` token→id object
//! - `SubwordTokenizer`: whitespace normalization, greedy subword encode and
//!   word-boundary aware decode
//! - `Tokenizer` trait shared with the decoding crate
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nmt_tokenizer::{SubwordTokenizer, Tokenizer, Vocabulary};
//!
//! let vocab = Arc::new(Vocabulary::from_file("models/opus-mt-en-ru/vocab.json")?);
//! let tokenizer = SubwordTokenizer::new(vocab);
//! let ids = tokenizer.encode("Hello World!")?;
//! println!("{}", tokenizer.decode(&ids)?);
//! ```

pub mod api;
pub(crate) mod core;
pub mod spi;
mod saf;

pub use saf::*;
