//! CLI command implementations.

pub mod detune;
pub mod presets;
pub mod render;
