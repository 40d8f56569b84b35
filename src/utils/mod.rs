//! Small helpers shared across layers.

pub mod mask;

pub use mask::mask_identifier;
