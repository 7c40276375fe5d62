//! Application layer: scaling, line generation, templates, and output files.

pub mod catalog;
pub mod generate;
pub mod presets;
pub mod scale;
pub mod template;
pub mod write;
