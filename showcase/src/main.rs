use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use showcase::{greeting, sample_table};

#[derive(Parser)]
#[command(name = "showcase", version, about = "Sample CLI: styled greeting and a table")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Greet NAME.
    Create { name: String },
    /// Print a sample table.
    ShowTable,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let styled = std::io::stdout().is_terminal();
    if !styled {
        colored::control::set_override(false);
    }
    match cli.command {
        Command::Create { name } => println!("{}", greeting(&name)),
        Command::ShowTable => print!("{}", sample_table().render(styled)),
    }
    Ok(())
}
