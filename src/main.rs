use clap::Parser;
use miette::Result;
use sheetsplit::cli::{Cli, Commands};
use sheetsplit::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split(args) => {
            let stats = sheetsplit::cli::split::run(args)?;
            if !stats.is_clean() {
                std::process::exit(1);
            }
        }
        Commands::Inspect(args) => sheetsplit::cli::inspect::run(args, &Printer::new())?,
        Commands::Completions(args) => sheetsplit::cli::completions::run(args)?,
    }

    Ok(())
}
