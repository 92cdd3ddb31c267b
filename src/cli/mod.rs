pub mod completions;
pub mod inspect;
pub mod split;

use clap::{Parser, Subcommand};

/// sheetsplit - Split grid sprite sheets into individual sprites
#[derive(Parser, Debug)]
#[command(name = "sheetsplit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split sprite sheets into one PNG per sprite
    Split(split::SplitArgs),

    /// Classify sprite sheets without writing anything
    Inspect(inspect::InspectArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
