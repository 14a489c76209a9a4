//! Facade re-exports for nmt-translate

pub use crate::api::error::*;
pub use crate::api::types::*;
pub use crate::core::beam::BeamSearch;
pub use crate::core::frontier::Frontier;
pub use crate::core::hypothesis::Hypothesis;
pub use crate::core::replay::ReplayModel;
pub use crate::core::sampling::{log_prob, softmax, top_k, LOG_EPSILON};
pub use crate::core::translator::Translator;
pub use crate::spi::contract::InferencePort;
