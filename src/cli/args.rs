use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "ThermoExplorer",
    about = "Standard reaction thermodynamics and reaction features",
    version
)]
pub struct Cli {
    /// without a command the interactive menu opens
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the reaction dataset and export the CSV files
    Dataset {
        /// One equation per line; the configured or built-in list if omitted
        #[arg(value_name = "REACTIONS_FILE")]
        reactions_file: Option<PathBuf>,
    },
}
