//! Padded grid geometry, field storage and border rules

pub mod boundary;
pub mod dimensions;
pub mod field_store;

// Re-export main types
pub use boundary::{Bound, BoundaryPolicy};
pub use dimensions::GridDimensions;
pub use field_store::{CellSample, ColorChannel, ColorMode, FieldStore};
