//! Symbol universes ranked into top movers.
//!
//! The default lists are embedded at compile time from
//! `seed_data/universes.yml`; a file with the same shape can replace them.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::QuoteError;
use crate::symbol::is_canonical;

/// Error types for universe loading.
#[derive(Error, Debug)]
pub enum UniverseError {
    #[error("Failed to parse universe YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Failed to read universe file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Symbol '{symbol}' in universe '{universe}' is not canonical")]
    InvalidSymbol { universe: String, symbol: String },
    #[error("Duplicate symbol '{symbol}' in universe '{universe}'")]
    Duplicate { universe: String, symbol: String },
}

impl From<UniverseError> for QuoteError {
    fn from(e: UniverseError) -> Self {
        QuoteError::Config(e.to_string())
    }
}

/// The two ranked universes.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Universes {
    pub stocks: Vec<String>,
    /// REIT-like income trusts.
    pub income_trusts: Vec<String>,
}

fn validate(universe: &str, symbols: &[String]) -> Result<(), UniverseError> {
    let mut seen = HashSet::new();
    for symbol in symbols {
        if !is_canonical(symbol) {
            return Err(UniverseError::InvalidSymbol {
                universe: universe.to_string(),
                symbol: symbol.clone(),
            });
        }
        if !seen.insert(symbol.as_str()) {
            return Err(UniverseError::Duplicate {
                universe: universe.to_string(),
                symbol: symbol.clone(),
            });
        }
    }
    Ok(())
}

/// Parse and validate universes from YAML content.
pub fn parse_universes(yaml_content: &str) -> Result<Universes, UniverseError> {
    let universes: Universes = serde_yml::from_str(yaml_content)?;
    validate("stocks", &universes.stocks)?;
    validate("income_trusts", &universes.income_trusts)?;
    Ok(universes)
}

/// Load the universes embedded at compile time.
pub fn load_default_universes() -> Result<Universes, UniverseError> {
    let yaml_content = include_str!("../../seed_data/universes.yml");
    parse_universes(yaml_content)
}

/// Load universes from a YAML file on disk.
pub fn load_universes_file(path: &Path) -> Result<Universes, UniverseError> {
    let yaml_content = std::fs::read_to_string(path)?;
    parse_universes(&yaml_content)
}
