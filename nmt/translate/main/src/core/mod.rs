pub mod beam;
pub mod frontier;
pub mod hypothesis;
pub mod replay;
pub mod sampling;
pub mod translator;
