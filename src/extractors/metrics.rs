// src/extractors/metrics.rs

// --- Imports ---
use crate::extractors::PageSource;
use crate::extractors::window::{context_anchor, numeric_anchor};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// --- Trigger / Anchor Phrases ---
// A trigger decides whether a page is inspected for a metric; the anchor is
// where the value window starts. They differ on purpose for most metrics.
const SCOPE_1_TRIGGER: &str = "Scope 1";
const SCOPE_1_ANCHOR: &str = "Scope 1 GHG emissions";
const SCOPE_2_TRIGGER: &str = "Scope 2";
const SCOPE_2_ANCHOR: &str = "Scope 2 GHG emissions";
const HAZARDOUS_WASTE_TRIGGER: &str = "Hazardous waste";
const HAZARDOUS_WASTE_ANCHOR: &str = "Hazardous waste produced";
const WATER_ANCHOR: &str = "water consumption";
const DECARBONIZATION_TRIGGERS: [&str; 2] = ["decarbonization", "carbon offset"];
const DECARBONIZATION_ANCHOR: &str = "decarbonization plan";
const BIODIVERSITY_TRIGGER: &str = "biodiversity";

// --- Data Structures ---

/// The fixed set of primary energy sources looked for in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySource {
    Coal,
    Gas,
    Diesel,
    #[serde(rename = "heating oil")]
    HeatingOil,
    Electricity,
}

impl EnergySource {
    pub const ALL: [EnergySource; 5] = [
        EnergySource::Coal,
        EnergySource::Gas,
        EnergySource::Diesel,
        EnergySource::HeatingOil,
        EnergySource::Electricity,
    ];

    /// The literal phrase searched for in page text, which doubles as its anchor.
    pub fn name(self) -> &'static str {
        match self {
            EnergySource::Coal => "coal",
            EnergySource::Gas => "gas",
            EnergySource::Diesel => "diesel",
            EnergySource::HeatingOil => "heating oil",
            EnergySource::Electricity => "electricity",
        }
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metrics pulled from one report. `None` means the anchor was never found;
/// `Some("")` means it was found but the window held nothing usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionRecord {
    pub scope1_emissions: Option<String>,
    pub scope2_emissions: Option<String>,
    pub hazardous_waste: Option<String>,
    pub primary_energy_sources: BTreeMap<EnergySource, Option<String>>,
    pub water_consumption: Option<String>,
    pub decarbonization_plan: Option<String>,
    /// Full text of the last page mentioning biodiversity, not a window.
    pub biodiversity_impact: Option<String>,
}

impl Default for ExtractionRecord {
    fn default() -> Self {
        Self {
            scope1_emissions: None,
            scope2_emissions: None,
            hazardous_waste: None,
            primary_energy_sources: EnergySource::ALL.iter().map(|s| (*s, None)).collect(),
            water_consumption: None,
            decarbonization_plan: None,
            biodiversity_impact: None,
        }
    }
}

impl ExtractionRecord {
    /// Energy sources that were found at least once, in fixed key order.
    pub fn found_energy_sources(&self) -> impl Iterator<Item = (EnergySource, &str)> {
        self.primary_energy_sources
            .iter()
            .filter_map(|(source, value)| value.as_deref().map(|v| (*source, v)))
    }
}

// --- Main Extractor Structure ---
pub struct MetricsExtractor;

impl MetricsExtractor {
    pub fn new() -> Self { Self {} }

    /// Scans every page in order and builds one record. Later matches
    /// overwrite earlier ones, including with `None` when a trigger phrase is
    /// present but its anchor is not.
    pub fn extract<S: PageSource + ?Sized>(&self, source: &S) -> ExtractionRecord {
        let mut record = ExtractionRecord::default();
        let mut page_count = 0usize;

        for (index, text) in source.page_texts().enumerate() {
            tracing::trace!("Scanning page {} ({} chars)", index + 1, text.len());
            self.scan_page(&mut record, &text);
            page_count += 1;
        }

        tracing::info!(
            "Scanned {} pages: scope1={:?} scope2={:?}, {} energy sources found",
            page_count,
            record.scope1_emissions,
            record.scope2_emissions,
            record.found_energy_sources().count()
        );
        record
    }

    fn scan_page(&self, record: &mut ExtractionRecord, text: &str) {
        if text.contains(SCOPE_1_TRIGGER) {
            record.scope1_emissions = numeric_anchor(text, SCOPE_1_ANCHOR);
        }
        if text.contains(SCOPE_2_TRIGGER) {
            record.scope2_emissions = numeric_anchor(text, SCOPE_2_ANCHOR);
        }

        if text.contains(HAZARDOUS_WASTE_TRIGGER) {
            record.hazardous_waste = context_anchor(text, HAZARDOUS_WASTE_ANCHOR);
        }

        for source in EnergySource::ALL {
            if text.contains(source.name()) {
                record
                    .primary_energy_sources
                    .insert(source, context_anchor(text, source.name()));
            }
        }

        if text.contains(WATER_ANCHOR) {
            record.water_consumption = context_anchor(text, WATER_ANCHOR);
        }

        if DECARBONIZATION_TRIGGERS.iter().any(|t| text.contains(t)) {
            record.decarbonization_plan = context_anchor(text, DECARBONIZATION_ANCHOR);
        }

        if text.contains(BIODIVERSITY_TRIGGER) {
            record.biodiversity_impact = Some(text.to_string());
        }
    }
}

impl Default for MetricsExtractor {
    fn default() -> Self {
        Self::new()
    }
}
