pub mod normalize;
pub mod subword;
pub mod vocab;
