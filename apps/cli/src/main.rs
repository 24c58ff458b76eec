//! studypack CLI — static study-site content compiler.
//!
//! Converts per-institution lesson, quiz, and flashcard source trees into a
//! lazily-loadable navigation index (`database.json`) plus per-topic content
//! shards for static hosting.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
