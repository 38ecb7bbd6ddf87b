use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// reactions used when no reactions file is given
pub const DEFAULT_REACTIONS: [&str; 6] = [
    "2H2 + O2 -> 2H2O",
    "C + O2 -> CO2",
    "N2 + 3H2 -> 2NH3",
    "CH4 + 2O2 -> CO2 + 2H2O",
    "2CO + O2 -> 2CO2",
    "CaCO3 -> CaO + CO2",
];

pub fn default_reactions() -> Vec<String> {
    DEFAULT_REACTIONS.iter().map(|r| r.to_string()).collect()
}

/// Reads reaction equations from a text file, one per line.
/// Blank lines and lines starting with '#' are skipped; nothing is validated here,
/// malformed equations are reported later by the parser.
pub fn load_reactions(file_name: &str) -> Result<Vec<String>, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => return Err(format!("Failed to open file '{}': {}", file_name, e)),
    };

    let reader = BufReader::new(file);
    let mut reactions = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {} of '{}': {}", i + 1, file_name, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        reactions.push(trimmed.to_string());
    }

    if reactions.is_empty() {
        warn!("No reactions found in file '{}'", file_name);
        return Err(format!("No reactions found in file '{}'", file_name));
    }
    info!("Loaded {} reactions from file '{}'", reactions.len(), file_name);
    Ok(reactions)
}

/// reactions from the file if given, otherwise the default list
pub fn reactions_or_default(file_name: Option<&str>) -> Result<Vec<String>, String> {
    match file_name {
        Some(name) => load_reactions(name),
        None => Ok(default_reactions()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_reactions_skips_comments_and_blanks() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# combustion").unwrap();
        writeln!(file, "CH4 + 2O2 -> CO2 + 2H2O").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   2CO + O2 -> 2CO2   ").unwrap();
        writeln!(file, "not an equation").unwrap();
        let path = file.path().to_str().unwrap();

        let reactions = load_reactions(path).unwrap();
        assert_eq!(
            reactions,
            vec!["CH4 + 2O2 -> CO2 + 2H2O", "2CO + O2 -> 2CO2", "not an equation"]
        );
    }

    #[test]
    fn test_load_reactions_errors() {
        assert!(load_reactions("no_such_reactions_file.txt").is_err());
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# only a comment").unwrap();
        assert!(load_reactions(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_default_reactions() {
        let reactions = reactions_or_default(None).unwrap();
        assert_eq!(reactions.len(), DEFAULT_REACTIONS.len());
        assert_eq!(reactions[0], "2H2 + O2 -> 2H2O");
    }
}
