//! # NIST Chemistry WebBook Parser Module
//!
//! ## Aim
//! Looks up standard formation enthalpy and standard entropy of a species on the NIST
//! Chemistry WebBook (https://webbook.nist.gov) by walking its HTML pages.
//!
//! ## Main Data Structures and Logic
//! - `NistParser<C>`: parser generic over the HTTP client (mock clients in tests)
//! - `HttpClient` trait: "GET url, give me the body"
//! - `Phase` enum: which phase rows (gas, liquid, solid) are read
//! - `NistParser` implements `SpeciesLookupSource`, so the resolver never sees HTML
//!
//! ## Page walk
//! formula search page -> first search hit (if the search page is a list) ->
//! "... phase thermochemistry data" page -> rows `ΔfH°<phase>` and `S°<phase>`.
//! The value cell is read up to the `±`; the unit cell decides whether entropy is
//! divided by 1000 (J/mol*K -> kJ/mol*K).
//!
//! ## Usage
//! ```rust, ignore
//! let mut parser = NistParser::new()?.with_phase(Phase::Gas);
//! let record = parser.lookup("CH4")?;
//! ```
use crate::Thermodynamics::DBhandlers::lookup_api::{
    LookupError, SpeciesLookupSource, SpeciesRecord,
};
use crate::Thermodynamics::units::{EntropyUnit, J_PER_KJ};
use log::{debug, info, warn};
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const NIST_BASE: &str = "https://webbook.nist.gov/cgi/cbook.cgi";
/// request timeout of the real client, seconds
pub const NIST_TIMEOUT_SECS: u64 = 20;

static FORMULA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z][a-z]?\d*|[()\d])+$").expect("valid formula regex")
});

/// HTTP client trait for dependency injection
pub trait HttpClient {
    fn get_text(&self, url: &str) -> Result<String, NistError>;
}

// Implementation for the real reqwest client
impl HttpClient for Client {
    fn get_text(&self, url: &str) -> Result<String, NistError> {
        let response = self.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

/// error types of the NIST walk
#[derive(Debug, Error)]
pub enum NistError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Substance not found")]
    SubstanceNotFound,
    #[error("Invalid data format: {0}")]
    InvalidDataFormat(String),
}

/// Phase enum: solid, liquid, gas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Gas,
    Solid,
    Liquid,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Gas => "gas",
            Phase::Solid => "solid",
            Phase::Liquid => "liquid",
        }
    }
    fn link_text(&self) -> &'static str {
        match self {
            Phase::Gas => "Gas phase thermochemistry data",
            Phase::Solid | Phase::Liquid => "Condensed phase thermochemistry data",
        }
    }
}

fn selector(css: &str) -> Result<Selector, NistError> {
    Selector::parse(css).map_err(|e| NistError::InvalidDataFormat(format!("selector {}: {}", css, e)))
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// number before the `±`, if any
fn leading_value(text: &str) -> Option<f64> {
    text.split('±')
        .next()
        .and_then(|v| v.split_whitespace().next())
        .and_then(|v| v.replace('\u{2212}', "-").parse::<f64>().ok())
}

pub struct NistParser<C: HttpClient> {
    client: C,
    phase: Phase,
}

impl NistParser<Client> {
    /// parser over a blocking reqwest client with a 20 s timeout
    pub fn new() -> Result<Self, NistError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(NIST_TIMEOUT_SECS))
            .user_agent(concat!("ThermoExplorer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }
}

impl<C: HttpClient> NistParser<C> {
    pub fn with_client(client: C) -> Self {
        Self {
            client,
            phase: Phase::Gas,
        }
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    ///////////////////////////////////TRAVELLING THE WEBSITE///////////////////////////////////////////
    /// ΔfH° (kJ/mol) and S° (kJ/mol*K) of the substance; fields the page lacks stay None
    pub fn get_data(&self, substance: &str) -> Result<SpeciesRecord, NistError> {
        let url = self.construct_url(substance)?;
        debug!("NIST search URL: {}", url);
        let html = self.fetch_page(&url)?;
        if !self.check_substance_exists(&html)? {
            return Err(NistError::SubstanceNotFound);
        }

        let url_of_substance = self.get_url_of_substance(&html, &url)?;
        let html_of_substance = if url_of_substance == url {
            html
        } else {
            debug!("NIST substance URL for {}: {}", substance, url_of_substance);
            self.fetch_page(&url_of_substance)?
        };

        let final_url = self.get_final_url(&html_of_substance, &url_of_substance)?;
        let html_of_phase = if final_url == url_of_substance {
            html_of_substance
        } else {
            debug!("NIST {} phase URL: {}", self.phase.as_str(), final_url);
            self.fetch_page(&final_url)?
        };

        let record = self.extract_thermodynamic_data(&html_of_phase)?;
        info!(
            "NIST data for {}: dHf = {:?} kJ/mol, S = {:?} kJ/mol*K",
            substance, record.delta_hf_kj_per_mol, record.s_kj_per_mol_k
        );
        Ok(record)
    }

    pub fn construct_url(&self, substance: &str) -> Result<Url, NistError> {
        let substance = substance.replace(' ', "");

        if substance.contains('-') && substance.chars().any(|c| c.is_ascii_digit()) {
            // CAS registry number
            Ok(Url::parse(&format!("{}?ID={}&Units=SI", NIST_BASE, substance))?)
        } else if FORMULA_RE.is_match(&substance) {
            Ok(Url::parse(&format!(
                "{}?Formula={}&NoIon=on&Units=SI",
                NIST_BASE, substance
            ))?)
        } else {
            // Otherwise, assume it's a name
            Ok(Url::parse(&format!("{}?Name={}&Units=SI", NIST_BASE, substance))?)
        }
    }

    fn fetch_page(&self, url: &Url) -> Result<String, NistError> {
        self.client.get_text(url.as_str())
    }

    fn check_substance_exists(&self, html: &str) -> Result<bool, NistError> {
        let document = Html::parse_document(html);
        let h1 = selector("h1")?;
        Ok(!document
            .select(&h1)
            .any(|element| element.text().collect::<String>().contains("Not Found")))
    }

    fn get_url_of_substance(&self, html: &str, original_url: &Url) -> Result<Url, NistError> {
        let document = Html::parse_document(html);
        // search results page: take the first hit
        let hits = selector("ol li a")?;
        if let Some(href) = document
            .select(&hits)
            .next()
            .and_then(|first| first.value().attr("href"))
        {
            return Ok(original_url.join(href)?);
        }
        // a unique hit lands directly on the substance page
        Ok(original_url.clone())
    }

    fn get_final_url(&self, html: &str, url_of_substance: &Url) -> Result<Url, NistError> {
        let document = Html::parse_document(html);
        let anchors = selector("a")?;
        let link_text = self.phase.link_text();
        for element in document.select(&anchors) {
            if element.text().collect::<String>().contains(link_text) {
                if let Some(href) = element.value().attr("href") {
                    return Ok(url_of_substance.join(href)?);
                }
            }
        }
        warn!(
            "no '{}' link on {}, reading the page itself",
            link_text, url_of_substance
        );
        Ok(url_of_substance.clone())
    }

    ////////////////////////////////PARSING DATA//////////////////////////////////////////////////////////////
    fn extract_thermodynamic_data(&self, html: &str) -> Result<SpeciesRecord, NistError> {
        let document = Html::parse_document(html);
        let rows = selector("tr")?;
        let td = selector("td")?;
        let phase = self.phase.as_str();
        let mut record = SpeciesRecord::unresolved();

        for row in document.select(&rows) {
            let cells: Vec<String> = row.select(&td).map(|c| cell_text(&c)).collect();
            if cells.len() < 2 {
                continue;
            }
            let quantity = &cells[0];
            let Some(value) = leading_value(&cells[1]) else {
                continue;
            };
            let unit = cells.get(2).map(String::as_str).unwrap_or("");

            if record.delta_hf_kj_per_mol.is_none()
                && quantity.contains("H°")
                && quantity.contains('f')
                && quantity.contains(phase)
            {
                let value = if unit.trim_start().starts_with("J/") {
                    value / J_PER_KJ
                } else {
                    value
                };
                record.delta_hf_kj_per_mol = Some(value);
            } else if record.s_kj_per_mol_k.is_none()
                && quantity.starts_with("S°")
                && quantity.contains(phase)
            {
                // the SI pages report J/mol*K
                let unit = EntropyUnit::from_label(unit).unwrap_or(EntropyUnit::J);
                record.s_kj_per_mol_k = Some(unit.to_kj(value));
            }
        }
        Ok(record)
    }
}

impl<C: HttpClient> SpeciesLookupSource for NistParser<C> {
    fn lookup(&mut self, formula: &str) -> Result<SpeciesRecord, LookupError> {
        match self.get_data(formula) {
            Ok(record) => Ok(record),
            Err(NistError::SubstanceNotFound) => {
                info!("NIST has no entry for {}", formula);
                Ok(SpeciesRecord::unresolved())
            }
            Err(e) => {
                warn!("NIST lookup of {} failed: {}", formula, e);
                Err(LookupError::Unavailable(e.to_string()))
            }
        }
    }
}
