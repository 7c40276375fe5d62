pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

use std::path::Path;

use anyhow::Result;

use crate::app::catalog::Catalog;

pub fn init() {
    infra::logging::init("info");
}

/// Write one built-in preset into the current directory.
///
/// Only compiled-in ranges and templates are used; configuration files and
/// environment overrides are not consulted.
pub fn run_builtin(name: &str) -> Result<()> {
    let catalog = Catalog::builtin()?;
    catalog.generate(name, Path::new("."))?;
    Ok(())
}
