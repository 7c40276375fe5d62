//! Core domain types shared by the generator and its configuration.

pub mod errors;
pub mod model;
