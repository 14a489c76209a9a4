//! # NMT Translate
//!
//! Beam search decoding around an opaque encoder/decoder model.
//!
//! This crate provides:
//! - `InferencePort` trait: the model boundary (`encode` once, `decode_step`
//!   per hypothesis and step)
//! - `BeamSearch`: bounded-width beam search over log-probabilities
//! - `Translator`: text in, text out: tokenizer + port + beam search
//! - `ReplayModel`: deterministic port driven by a JSON script of logits
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nmt_tokenizer::{SubwordTokenizer, Vocabulary};
//! use nmt_translate::{BeamConfig, ReplayModel, Translator};
//!
//! let vocab = Arc::new(Vocabulary::from_file("vocab.json")?);
//! let tokenizer = SubwordTokenizer::new(vocab);
//! let model = ReplayModel::from_file("script.json")?;
//! let translator = Translator::new(&model, &tokenizer, BeamConfig::new(62517, 0, 20, 3));
//! println!("{}", translator.translate("Hello World")?);
//! ```

pub mod api;
pub(crate) mod core;
pub mod spi;
mod saf;

pub use saf::*;
