//! Command line interface for the `scangen` binary.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde::Serialize;

use crate::app::catalog::Catalog;
use crate::infra::config::Config;
use crate::infra::logging;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate analysis call lists for swept simulation parameters",
    long_about = None
)]
pub struct Cli {
    /// Extra config file layered over user and workspace config
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Log every rendered value
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known presets
    List {
        #[arg(long)]
        json: bool,
    },
    /// Write the named presets
    Generate {
        #[arg(required = true, value_name = "PRESET")]
        presets: Vec<String>,
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Print lines instead of writing files
        #[arg(long, conflicts_with = "out_dir")]
        stdout: bool,
    },
    /// Write every preset
    All {
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Serialize)]
struct PresetListing<'a> {
    name: &'a str,
    output: &'a Path,
    template: &'a str,
    lines: usize,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let Commands::Completions { shell } = self.command {
            clap_complete::generate(shell, &mut Cli::command(), "scangen", &mut io::stdout());
            return Ok(());
        }

        let config = Config::load(self.config.as_deref())?;
        let level = if self.verbose {
            "debug".to_owned()
        } else {
            config.logging.level()
        };
        logging::init(&level);

        let catalog = Catalog::from_config(&config)?;
        let default_dir = config.output.directory();

        match self.command {
            Commands::List { json } => list(&catalog, json),
            Commands::Generate {
                presets,
                out_dir,
                stdout,
            } => {
                if stdout {
                    print_presets(&catalog, &presets)
                } else {
                    let dir = out_dir.unwrap_or(default_dir);
                    write_presets(&catalog, &presets, &dir)
                }
            }
            Commands::All { out_dir } => {
                let names: Vec<String> = catalog
                    .presets()
                    .iter()
                    .map(|preset| preset.name.clone())
                    .collect();
                let dir = out_dir.unwrap_or(default_dir);
                write_presets(&catalog, &names, &dir)
            }
            Commands::Completions { .. } => Ok(()),
        }
    }
}

fn list(catalog: &Catalog, json: bool) -> Result<()> {
    let listings: Vec<PresetListing<'_>> = catalog
        .presets()
        .iter()
        .map(|preset| PresetListing {
            name: &preset.name,
            output: &preset.output,
            template: &preset.template,
            lines: preset.line_count(),
        })
        .collect();

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &listings)
            .context("failed to serialize preset listing")?;
        writeln!(stdout)?;
        return Ok(());
    }

    for listing in &listings {
        writeln!(
            stdout,
            "{:<22} {:>5}  {:<22} {}",
            listing.name,
            listing.lines,
            listing.template,
            listing.output.display()
        )?;
    }
    Ok(())
}

fn print_presets(catalog: &Catalog, names: &[String]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for name in names {
        catalog.render(name, &mut stdout)?;
    }
    Ok(())
}

fn write_presets(catalog: &Catalog, names: &[String], dir: &Path) -> Result<()> {
    // Resolve every name before touching the filesystem.
    for name in names {
        catalog.preset(name)?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    for name in names {
        let summary = catalog.generate(name, dir)?;
        println!("{} ({} lines)", summary.path.display(), summary.lines);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_requires_a_preset() {
        assert!(Cli::try_parse_from(["scangen", "generate"]).is_err());
        assert!(Cli::try_parse_from(["scangen", "generate", "energy-scan"]).is_ok());
    }

    #[test]
    fn stdout_conflicts_with_out_dir() {
        let parsed =
            Cli::try_parse_from(["scangen", "generate", "x", "--stdout", "--out-dir", "out"]);
        assert!(parsed.is_err());
    }
}
