// src/acquire/config.rs
use std::path::PathBuf;

pub const DEFAULT_TARGET_URL: &str = "https://sustainability.google/reports/";
/// First report link in the reports list.
pub const DEFAULT_ELEMENT_LOCATOR: &str = "body > div > div > div:nth-of-type(1) > div > div:nth-of-type(2) > ul:nth-of-type(1) > li:nth-of-type(1) > div:nth-of-type(2) > a";
pub const DEFAULT_DOWNLOAD_DIR: &str = "./downloads";
pub const DEFAULT_EXPECTED_FILENAME: &str = "google-2024-environmental-report.pdf";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where to find the report and where to put it.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquireConfig {
    pub target_url: String,
    /// CSS selector of the link element pointing at the PDF.
    pub element_locator: String,
    pub download_dir: PathBuf,
    pub expected_filename: String,
    pub timeout_secs: u64,
}

impl AcquireConfig {
    /// The deterministic location the report is saved to.
    pub fn expected_path(&self) -> PathBuf {
        self.download_dir.join(&self.expected_filename)
    }
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            element_locator: DEFAULT_ELEMENT_LOCATOR.to_string(),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            expected_filename: DEFAULT_EXPECTED_FILENAME.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
