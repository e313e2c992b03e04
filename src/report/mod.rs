// src/report/mod.rs
pub mod png;
pub mod text;

use crate::extractors::ExtractionRecord;
use crate::utils::error::ReportError;
use std::path::PathBuf;

pub use png::PngPieRenderer;

pub const GHG_CHART_TITLE: &str = "Scope 1 and Scope 2 GHG Emissions";
pub const ENERGY_CHART_TITLE: &str = "Primary Energy Source Consumption (GWh)";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
}

/// A titled set of labelled values, drawn as shares of their total.
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionChart {
    pub title: String,
    pub slices: Vec<ChartSlice>,
}

impl ProportionChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Each label with its share of the total in percent. Empty when the total is zero.
    pub fn percentages(&self) -> Vec<(&str, f64)> {
        let total = self.total();
        if total <= 0.0 {
            return Vec::new();
        }
        self.slices
            .iter()
            .map(|s| (s.label.as_str(), s.value / total * 100.0))
            .collect()
    }

    /// Legend lines in the `%1.1f%%` style, e.g. `Scope 1: 68.5%`.
    pub fn legend_lines(&self) -> Vec<String> {
        self.percentages()
            .into_iter()
            .map(|(label, pct)| format!("{}: {:.1}%", label, pct))
            .collect()
    }
}

/// Draws a proportion chart and reports where it ended up.
pub trait ChartRenderer {
    fn render(&mut self, chart: &ProportionChart) -> Result<PathBuf, ReportError>;
}

/// Turns an extracted fragment into a chart value. Absent, empty,
/// unparseable, negative or non-finite fragments all become 0.
pub fn coerce_metric(value: Option<&str>) -> f64 {
    let Some(raw) = value else {
        return 0.0;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            tracing::debug!("Treating unparseable metric {:?} as 0", raw);
            0.0
        }
    }
}

pub fn ghg_chart(record: &ExtractionRecord) -> ProportionChart {
    ProportionChart {
        title: GHG_CHART_TITLE.to_string(),
        slices: vec![
            ChartSlice {
                label: "Scope 1".to_string(),
                value: coerce_metric(record.scope1_emissions.as_deref()),
            },
            ChartSlice {
                label: "Scope 2".to_string(),
                value: coerce_metric(record.scope2_emissions.as_deref()),
            },
        ],
    }
}

/// One slice per energy source that was found; sources never found are left out.
pub fn energy_chart(record: &ExtractionRecord) -> ProportionChart {
    ProportionChart {
        title: ENERGY_CHART_TITLE.to_string(),
        slices: record
            .found_energy_sources()
            .map(|(source, value)| ChartSlice {
                label: source.to_string(),
                value: coerce_metric(Some(value)),
            })
            .collect(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::extractors::EnergySource;

    /// Keeps every chart it is asked to draw.
    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub charts: Vec<ProportionChart>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&mut self, chart: &ProportionChart) -> Result<PathBuf, ReportError> {
            self.charts.push(chart.clone());
            Ok(PathBuf::from(format!("chart-{}", self.charts.len())))
        }
    }

    #[test]
    fn test_coerce_metric_fallbacks() {
        assert_eq!(coerce_metric(None), 0.0);
        assert_eq!(coerce_metric(Some("")), 0.0);
        assert_eq!(coerce_metric(Some(" 12 GWh")), 0.0);
        assert_eq!(coerce_metric(Some("12.52024")), 12.52024);
        assert_eq!(coerce_metric(Some(" 56.7 ")), 56.7);
        assert_eq!(coerce_metric(Some("-3")), 0.0);
        assert_eq!(coerce_metric(Some("NaN")), 0.0);
        assert_eq!(coerce_metric(Some("inf")), 0.0);
    }

    #[test]
    fn test_ghg_chart_coerces_absent_to_zero() {
        let record = ExtractionRecord {
            scope1_emissions: Some("123.4".to_string()),
            scope2_emissions: None,
            ..ExtractionRecord::default()
        };
        let chart = ghg_chart(&record);
        assert_eq!(chart.title, GHG_CHART_TITLE);
        assert_eq!(chart.slices.len(), 2);
        assert_eq!(chart.slices[0].value, 123.4);
        assert_eq!(chart.slices[1].value, 0.0);
        assert_eq!(chart.legend_lines(), vec!["Scope 1: 100.0%", "Scope 2: 0.0%"]);
    }

    #[test]
    fn test_energy_chart_skips_sources_never_found() {
        let mut record = ExtractionRecord::default();
        record.primary_energy_sources.insert(EnergySource::Gas, Some("30".to_string()));
        record.primary_energy_sources.insert(EnergySource::Electricity, Some("90".to_string()));
        record.primary_energy_sources.insert(EnergySource::Diesel, Some(" generators".to_string()));

        let chart = energy_chart(&record);
        let labels: Vec<_> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["gas", "diesel", "electricity"]);
        assert_eq!(chart.slices[1].value, 0.0);
        assert_eq!(chart.legend_lines(), vec!["gas: 25.0%", "diesel: 0.0%", "electricity: 75.0%"]);
    }

    #[test]
    fn test_zero_total_has_no_percentages() {
        let chart = energy_chart(&ExtractionRecord::default());
        assert!(chart.slices.is_empty());
        assert!(chart.percentages().is_empty());
    }
}
