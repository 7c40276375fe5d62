use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = scangen::cli::Cli::parse();
    cli.run()
}
