//! Tables of a built dataset: console output and the three CSV files
//! `reaction_thermo.csv`, `delta_g.csv` and `spont.csv`.
//! dS is written in kJ/(mol*K), like everywhere else in the crate.
use crate::Dataset::dataset_builder::{Dataset, DatasetError};
use log::info;
use prettytable::{Cell, Row, Table};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const REACTION_THERMO_CSV: &str = "reaction_thermo.csv";
pub const DELTA_G_CSV: &str = "delta_g.csv";
pub const SPONT_CSV: &str = "spont.csv";

fn text_row(cells: &[&str]) -> Row {
    Row::new(cells.iter().map(|c| Cell::new(c)).collect())
}

/// reaction, delta_h, delta_s, delta_g, temperature_K
pub fn thermo_table(dataset: &Dataset) -> Table {
    let mut table = Table::new();
    table.add_row(text_row(&[
        "reaction",
        "delta_h",
        "delta_s",
        "delta_g",
        "temperature_K",
    ]));
    for (reaction, result) in dataset.completed() {
        table.add_row(Row::new(vec![
            Cell::new(reaction),
            Cell::new(&result.delta_h.to_string()),
            Cell::new(&result.delta_s.to_string()),
            Cell::new(&result.delta_g.to_string()),
            Cell::new(&result.temperature_k.to_string()),
        ]));
    }
    table
}

/// reaction, delta_g
pub fn delta_g_table(dataset: &Dataset) -> Table {
    let mut table = Table::new();
    table.add_row(text_row(&["reaction", "delta_g"]));
    for (reaction, result) in dataset.completed() {
        table.add_row(Row::new(vec![
            Cell::new(reaction),
            Cell::new(&result.delta_g.to_string()),
        ]));
    }
    table
}

/// reaction, label
pub fn spont_table(dataset: &Dataset) -> Table {
    let mut table = Table::new();
    table.add_row(text_row(&["reaction", "label"]));
    for (reaction, label) in dataset.labels() {
        table.add_row(Row::new(vec![
            Cell::new(reaction),
            Cell::new(&label.to_string()),
        ]));
    }
    table
}

pub fn write_csv(table: &Table, path: &Path) -> Result<(), DatasetError> {
    let file = File::create(path)?;
    let mut writer = table
        .to_csv(file)
        .map_err(|e| DatasetError::Export(format!("{}: {}", path.display(), e)))?;
    writer.flush()?;
    Ok(())
}

/// writes the three CSV files into `dir` (created if needed); returns their paths
pub fn export_all(dataset: &Dataset, dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    fs::create_dir_all(dir)?;
    let outputs = [
        (REACTION_THERMO_CSV, thermo_table(dataset)),
        (DELTA_G_CSV, delta_g_table(dataset)),
        (SPONT_CSV, spont_table(dataset)),
    ];
    let mut written = Vec::with_capacity(outputs.len());
    for (name, table) in outputs {
        let path = dir.join(name);
        write_csv(&table, &path)?;
        info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// completed reactions and skipped ones, as console tables
pub fn pretty_print(dataset: &Dataset) {
    let mut table = Table::new();
    table.set_titles(text_row(&[
        "Reaction",
        "dH, kJ/mol",
        "dS, J/(mol*K)",
        "dG, kJ/mol",
        "spontaneous",
    ]));
    for (reaction, result) in dataset.completed() {
        table.add_row(Row::new(vec![
            Cell::new(reaction),
            Cell::new(&format!("{:.2}", result.delta_h)),
            Cell::new(&format!("{:.2}", result.delta_s_j_per_mol_k())),
            Cell::new(&format!("{:.2}", result.delta_g)),
            Cell::new(&result.label().to_string()),
        ]));
    }
    println!("T = {} K", dataset.temperature_k);
    table.printstd();

    let skipped = dataset.skipped();
    if !skipped.is_empty() {
        let mut table = Table::new();
        table.set_titles(text_row(&["Skipped reaction", "Reason"]));
        for (reaction, reason) in skipped {
            table.add_row(Row::new(vec![
                Cell::new(reaction),
                Cell::new(&reason.to_string()),
            ]));
        }
        table.printstd();
    }
}
