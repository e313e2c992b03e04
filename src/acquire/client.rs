// src/acquire/client.rs
use crate::acquire::config::AcquireConfig;
use crate::utils::error::AcquireError;
use reqwest::{header, Url};
use scraper::{Html, Selector};
use std::path::PathBuf;
use std::time::Duration;

const USER_AGENT: &str = concat!("esg_extractor/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client with the configured timeout.
fn build_client(config: &AcquireConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
}

fn parse_locator(locator: &str) -> Result<Selector, AcquireError> {
    Selector::parse(locator).map_err(|e| {
        tracing::error!("Could not parse element locator '{}': {}", locator, e);
        AcquireError::InvalidSelector(locator.to_string())
    })
}

/// Finds the first element matching `selector` in `html` and resolves its
/// `href` against `base_url`.
pub fn resolve_download_link(
    html: &str,
    selector: &Selector,
    locator: &str,
    base_url: &Url,
) -> Result<Url, AcquireError> {
    let document = Html::parse_document(html);

    let element = document
        .select(selector)
        .next()
        .ok_or_else(|| AcquireError::LinkNotFound(locator.to_string()))?;
    tracing::debug!("Matched <{}> for locator '{}'", element.value().name(), locator);

    let href = element
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or_else(|| AcquireError::MissingHref(locator.to_string()))?;

    base_url
        .join(href)
        .map_err(|e| AcquireError::InvalidUrl(format!("{}: {}", href, e)))
}

async fn get_checked(
    client: &reqwest::Client,
    url: &Url,
    accept: &str,
) -> Result<reqwest::Response, AcquireError> {
    let response = client
        .get(url.clone())
        .header(header::ACCEPT, accept)
        .send()
        .await?; // Propagates reqwest::Error as AcquireError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        return Err(AcquireError::Http { status, url: url.to_string() });
    }
    Ok(response)
}

/// Downloads the report linked from the configured page into
/// `config.expected_path()`.
///
/// Callers treat failures as best effort: they log the error and then check
/// whether the expected file exists.
pub async fn fetch_report(config: &AcquireConfig) -> Result<PathBuf, AcquireError> {
    let selector = parse_locator(&config.element_locator)?;
    let page_url = Url::parse(&config.target_url)
        .map_err(|e| AcquireError::InvalidUrl(format!("{}: {}", config.target_url, e)))?;

    tokio::fs::create_dir_all(&config.download_dir).await?;

    let client = build_client(config)?;

    tracing::info!("Fetching reports page: {}", page_url);
    let page = get_checked(&client, &page_url, "text/html,*/*")
        .await?
        .text()
        .await?;
    tracing::debug!("Reports page is {} bytes", page.len());

    let pdf_url = resolve_download_link(&page, &selector, &config.element_locator, &page_url)?;
    tracing::info!("Downloading report from: {}", pdf_url);

    let response = get_checked(&client, &pdf_url, "application/pdf,*/*").await?;

    if let Some(content_type) = response.headers().get(header::CONTENT_TYPE) {
        let content_type = content_type.to_str().unwrap_or_default();
        if !content_type.contains("pdf") {
            tracing::warn!("Report URL returned Content-Type '{}', expected a PDF", content_type);
        }
    }

    let bytes = response.bytes().await?;
    let path = config.expected_path();
    tokio::fs::write(&path, &bytes).await?;
    tracing::info!("Saved {} bytes to {}", bytes.len(), path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORTS_PAGE: &str = r#"
        <!DOCTYPE html>
        <html><body>
        <div><div>
          <div><div>
            <div><h1>Reports</h1></div>
            <div>
              <ul>
                <li><div>2024</div><div><a href="/static/google-2024-environmental-report.pdf">Download</a></div></li>
                <li><div>2023</div><div><a href="/static/google-2023-environmental-report.pdf">Download</a></div></li>
              </ul>
              <ul><li><div>Other</div><div><a href="/other.pdf">Other</a></div></li></ul>
            </div>
          </div></div>
        </div></div>
        </body></html>
    "#;

    fn base() -> Url {
        Url::parse("https://sustainability.google/reports/").unwrap()
    }

    #[test]
    fn test_default_locator_finds_first_report_link() {
        let config = AcquireConfig::default();
        let selector = parse_locator(&config.element_locator).unwrap();
        let url = resolve_download_link(REPORTS_PAGE, &selector, &config.element_locator, &base()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sustainability.google/static/google-2024-environmental-report.pdf"
        );
    }

    #[test]
    fn test_relative_href_resolves_against_page() {
        let html = r#"<html><body><a id="dl" href="files/report.pdf">x</a></body></html>"#;
        let selector = parse_locator("a#dl").unwrap();
        let url = resolve_download_link(html, &selector, "a#dl", &base()).unwrap();
        assert_eq!(url.as_str(), "https://sustainability.google/reports/files/report.pdf");
    }

    #[test]
    fn test_missing_element_and_missing_href() {
        let selector = parse_locator("a.report").unwrap();
        let result = resolve_download_link("<html><body></body></html>", &selector, "a.report", &base());
        assert!(matches!(result, Err(AcquireError::LinkNotFound(_))));

        let html = r#"<html><body><a class="report">no link</a></body></html>"#;
        let result = resolve_download_link(html, &selector, "a.report", &base());
        assert!(matches!(result, Err(AcquireError::MissingHref(_))));
    }

    #[test]
    fn test_invalid_locator_fails_before_any_io() {
        let dir = tempfile::tempdir().unwrap();
        let config = AcquireConfig {
            element_locator: "a[[".to_string(),
            download_dir: dir.path().join("downloads"),
            ..AcquireConfig::default()
        };

        let result = tokio_test::block_on(fetch_report(&config));
        assert!(matches!(result, Err(AcquireError::InvalidSelector(_))));
        assert!(!config.download_dir.exists());
    }

    #[test]
    fn test_invalid_target_url() {
        let dir = tempfile::tempdir().unwrap();
        let config = AcquireConfig {
            target_url: "not a url".to_string(),
            download_dir: dir.path().join("downloads"),
            ..AcquireConfig::default()
        };

        let result = tokio_test::block_on(fetch_report(&config));
        assert!(matches!(result, Err(AcquireError::InvalidUrl(_))));
        assert!(!config.expected_path().exists());
    }
}
