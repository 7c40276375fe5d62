use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
    },
    /// Regenerate every preset into a directory and report line counts
    Regenerate {
        /// Relative paths are resolved against the workspace root
        #[arg(long, default_value = "target/generated")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest { profile, release } => run_nextest(profile, release)?,
        Commands::Regenerate { out_dir } => regenerate(&out_dir)?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn regenerate(out_dir: &Path) -> Result<()> {
    let metadata = MetadataCommand::new()
        .no_deps()
        .exec()
        .context("failed to read workspace metadata")?;
    let root = metadata.workspace_root.as_std_path();
    let out_dir = root.join(out_dir);

    let status = Command::new("cargo")
        .current_dir(root)
        .args(["run", "--quiet", "-p", "scangen", "--bin", "scangen", "--", "all"])
        .arg("--out-dir")
        .arg(&out_dir)
        .status()?;
    if !status.success() {
        anyhow::bail!("scangen all failed");
    }

    for entry in WalkDir::new(&out_dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.path().extension().is_some_and(|ext| ext == "txt") {
            let contents = fs::read_to_string(entry.path())
                .with_context(|| format!("failed to read {}", entry.path().display()))?;
            println!("{:>6}  {}", contents.lines().count(), entry.path().display());
        }
    }
    Ok(())
}
