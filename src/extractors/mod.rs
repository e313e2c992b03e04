// src/extractors/mod.rs
pub mod metrics;
pub mod pdf;
pub mod window;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use metrics::{EnergySource, ExtractionRecord, MetricsExtractor};
pub use pdf::{PageSource, PdfDocument};
