//! CLI entry point for the wave function collapse tile generator

use clap::Parser;
use tilecollapse::io::cli::{Cli, GenerationRunner};

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();
    let runner = GenerationRunner::new(cli);
    runner.run()
}
