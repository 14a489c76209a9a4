mod inference;

pub use inference::InferencePort;
