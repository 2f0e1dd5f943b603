//! apigen CLI.
//!
//! `apigen <INPUT> <OUTPUT>` reads an annotated Rust source file and writes
//! the generated dispatch module.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use apigen_compiler::{Generator, GeneratorConfig};

mod ui;

#[derive(Parser, Debug)]
#[command(name = "apigen")]
#[command(about = "Generates validating HTTP handlers from annotated Rust methods")]
struct Cli {
    /// Annotated Rust source file
    input: PathBuf,

    /// Generated module to write
    output: PathBuf,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let generator = Generator::new(GeneratorConfig::new(&cli.input, &cli.output));
    let result = generator.generate()?;

    eprintln!("{}", ui::summary(&cli.output.display().to_string(), &result));
    Ok(())
}
