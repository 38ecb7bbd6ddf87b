use crate::Dataset::dataset_builder::{Dataset, DatasetBuilder};
use crate::Dataset::export::{export_all, pretty_print};
use crate::ML::model_card::{ModelCard, card_path_for};
use crate::ML::predictor::{LinearModel, predict_delta_g, predict_spontaneous};
use crate::Reactions::equation_parser::parse;
use crate::Reactions::featurizer::vectorize;
use crate::Thermodynamics::DBhandlers::NIST_parser::NistParser;
use crate::Thermodynamics::DBhandlers::fallback_data::FallbackTable;
use crate::Thermodynamics::DBhandlers::lookup_api::{LookupBackend, OfflineLookup};
use crate::Thermodynamics::DBhandlers::species_cache::{CacheError, SpeciesCache};
use crate::Thermodynamics::reaction_thermo::compute;
use crate::Thermodynamics::species_resolver::SpeciesResolver;
use crate::Utils::load_from_file::reactions_or_default;
use crate::settings::ExplorerConfig;
use log::{error, warn};
use prettytable::{Cell, Row, Table};
use std::collections::HashMap;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub fn run_interactive_menu(config: ExplorerConfig) {
    loop {
        show_main_menu(&config);
        let Some(choice) = get_user_input() else {
            println!("Goodbye!");
            break;
        };

        match choice.trim() {
            "1" => reaction_thermo_dialog(&config),
            "2" => dataset_dialog(&config),
            "3" => featurize_dialog(),
            "4" => predict_dialog(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text
Yellow (\x1b[33m) - Menu options
Cyan (\x1b[36m) - prompts
Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu(config: &ExplorerConfig) {
    println!(
        "\x1b[34m\n ThermoExplorer: standard reaction thermodynamics and reaction features\n \
         T = {} K, cache: {}, NIST lookup: {}\x1b[0m",
        config.temperature_k,
        config.cache_path,
        if config.offline { "off" } else { "on" }
    );
    println!("\x1b[33m1. Reaction thermodynamics (dH, dS, dG)\x1b[0m");
    println!("\x1b[33m2. Build dataset\x1b[0m");
    println!("\x1b[33m3. Featurize reactions\x1b[0m");
    println!("\x1b[33m4. Predict with a linear model\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    io::stdout().flush().ok();
}

/// one line of input; None at end of input or on a read error
fn read_input<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input),
        Err(e) => {
            error!("Failed to read input: {}", e);
            None
        }
    }
}

fn get_user_input() -> Option<String> {
    read_input(&mut io::stdin().lock())
}

/// NIST lookup unless offline or the HTTP client cannot be built
pub fn make_lookup(config: &ExplorerConfig) -> LookupBackend {
    if config.offline {
        return LookupBackend::from(OfflineLookup);
    }
    match NistParser::new() {
        Ok(parser) => LookupBackend::from(parser.with_phase(config.phase)),
        Err(e) => {
            warn!("NIST lookup disabled: {}", e);
            LookupBackend::from(OfflineLookup)
        }
    }
}

pub fn make_resolver(config: &ExplorerConfig) -> Result<SpeciesResolver<LookupBackend>, CacheError> {
    Ok(SpeciesResolver::new(
        make_lookup(config),
        SpeciesCache::load(&config.cache_path)?,
        FallbackTable::standard(),
    ))
}

fn read_temperature(default: f64) -> Option<f64> {
    prompt(&format!("Temperature, K [{}]: ", default));
    let input = get_user_input()?;
    let input = input.trim();
    if input.is_empty() {
        return Some(default);
    }
    match input.parse::<f64>() {
        Ok(t) => Some(t),
        Err(_) => {
            println!("Not a number: {}", input);
            None
        }
    }
}

fn reaction_thermo_dialog(config: &ExplorerConfig) {
    prompt("Enter reaction (e.g. 2H2 + O2 -> 2H2O): ");
    let Some(equation) = get_user_input() else {
        return;
    };
    let equation = equation.trim();
    let reaction = match parse(equation) {
        Ok(reaction) => reaction,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };
    let Some(temperature_k) = read_temperature(config.temperature_k) else {
        return;
    };
    let mut resolver = match make_resolver(config) {
        Ok(resolver) => resolver,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    let mut table = Table::new();
    table.set_titles(Row::new(vec![
        Cell::new("Species"),
        Cell::new("dHf, kJ/mol"),
        Cell::new("S, J/(mol*K)"),
        Cell::new("source"),
    ]));
    let mut properties = HashMap::new();
    for formula in reaction.species() {
        let resolution = resolver.resolve(&formula);
        let record = resolution.record;
        table.add_row(Row::new(vec![
            Cell::new(&formula),
            Cell::new(&format_optional(record.delta_hf_kj_per_mol, 1.0)),
            Cell::new(&format_optional(record.s_kj_per_mol_k, 1000.0)),
            Cell::new(&resolution.source.to_string()),
        ]));
        properties.insert(formula, record);
    }
    table.printstd();
    if let Err(e) = resolver.persist_cache() {
        error!("could not save species cache: {}", e);
    }

    match compute(&reaction, &properties, temperature_k) {
        Ok(result) => result.pretty_print(equation),
        Err(e) => println!("{}", e),
    }
}

fn format_optional(value: Option<f64>, scale: f64) -> String {
    value
        .map(|v| format!("{:.3}", v * scale))
        .unwrap_or_else(|| "-".to_string())
}

/// builds, prints and exports a dataset with the configured sources
pub fn run_dataset_batch(
    config: &ExplorerConfig,
    reactions_file: Option<&Path>,
) -> Result<Dataset, Box<dyn Error>> {
    let file = reactions_file
        .map(|path| path.to_string_lossy().into_owned())
        .or_else(|| config.reactions_file.clone());
    let reactions = reactions_or_default(file.as_deref())?;
    let mut builder = DatasetBuilder::new(
        make_lookup(config),
        SpeciesCache::load(&config.cache_path)?,
        FallbackTable::standard(),
        config.min_interval(),
    );
    let dataset = builder.build(&reactions, config.temperature_k)?;
    pretty_print(&dataset);
    for path in export_all(&dataset, Path::new(&config.output_dir))? {
        println!("saved {}", path.display());
    }
    Ok(dataset)
}

fn dataset_dialog(config: &ExplorerConfig) {
    prompt("Reactions file (empty for the configured/default list): ");
    let Some(input) = get_user_input() else {
        return;
    };
    let file = Some(input.trim())
        .filter(|f| !f.is_empty())
        .map(Path::new);
    if let Err(e) = run_dataset_batch(config, file) {
        println!("Dataset build failed: {}", e);
    }
}

fn featurize_dialog() {
    prompt("Enter reactions separated by ';': ");
    let Some(input) = get_user_input() else {
        return;
    };
    let reactions: Vec<&str> = input
        .split(';')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect();
    let features = match vectorize(&reactions) {
        Ok(features) => features,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };
    // one row per feature, one column per reaction
    let mut table = Table::new();
    let mut titles = vec![Cell::new("feature")];
    titles.extend((1..=reactions.len()).map(|i| Cell::new(&format!("#{}", i))));
    table.set_titles(Row::new(titles));
    for (j, name) in features.feature_names.iter().enumerate() {
        let mut row = vec![Cell::new(name)];
        row.extend((0..features.nrows()).map(|i| Cell::new(&features.matrix[(i, j)].to_string())));
        table.add_row(Row::new(row));
    }
    for (i, reaction) in reactions.iter().enumerate() {
        println!("#{}: {}", i + 1, reaction);
    }
    table.printstd();
}

fn predict_dialog() {
    prompt("Linear model file (JSON): ");
    let Some(input) = get_user_input() else {
        return;
    };
    let model_path = PathBuf::from(input.trim());
    let model = match LinearModel::load(&model_path) {
        Ok(model) => model,
        Err(e) => {
            println!("Cannot load model {}: {}", model_path.display(), e);
            return;
        }
    };
    let card_path = card_path_for(&model_path);
    if card_path.exists() {
        match ModelCard::load(&card_path) {
            Ok(card) if card.describes(&model) => println!(
                "model card: target {}, {} samples, test MAE {:.3}",
                card.target, card.n_samples, card.test_mae
            ),
            Ok(_) => warn!("model card {} lists other features", card_path.display()),
            Err(e) => warn!("{}", e),
        }
    }

    prompt("Enter reaction: ");
    let Some(reaction) = get_user_input() else {
        return;
    };
    let reaction = reaction.trim();
    if model.target == "label" {
        match predict_spontaneous(&model, reaction) {
            Ok(true) => println!("predicted: spontaneous"),
            Ok(false) => println!("predicted: not spontaneous"),
            Err(e) => println!("{}", e),
        }
    } else {
        match predict_delta_g(&model, reaction) {
            Ok(dg) => println!("predicted {}: {:.3}", model.target, dg),
            Err(e) => println!("{}", e),
        }
    }
}
