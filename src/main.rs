use ThermoExplorer::cli::args::{Cli, Command};
use ThermoExplorer::cli::cli_main::{run_dataset_batch, run_interactive_menu};
use ThermoExplorer::settings::{CONFIG_FILE, ExplorerConfig};
use clap::Parser;
use log::{LevelFilter, error};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;

const LOG_FILE: &str = "thermo_explorer.log";

fn init_logging() {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    match File::create(LOG_FILE) {
        Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file)),
        Err(e) => eprintln!("log file {} not created: {}", LOG_FILE, e),
    }
    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("logger already set: {}", e);
    }
}

/// `ThermoExplorer` opens the menu,
/// `ThermoExplorer dataset [REACTIONS_FILE]` builds and exports the dataset
pub fn main() {
    let cli = Cli::parse();
    init_logging();
    let config = ExplorerConfig::load_or_default(CONFIG_FILE);
    match cli.command {
        Some(Command::Dataset { reactions_file }) => {
            if let Err(e) = run_dataset_batch(&config, reactions_file.as_deref()) {
                error!("{}", e);
                std::process::exit(1);
            }
        }
        None => run_interactive_menu(config),
    }
}
