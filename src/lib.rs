//! Compliance scanner for charity websites.
//!
//! Fetches a home page, finds policy pages, runs keyword heuristics and scores
//! the findings into a [`ComplianceReport`].

// Re-export modules
pub mod config;
pub mod error;
pub mod fetchers;
pub mod filter;
pub mod parsers;
pub mod report;
pub mod results;
pub mod scanner;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScanConfig;
pub use error::{EnhanceError, FetchError, ScanError};
pub use fetchers::{HttpFetcher, PageFetcher};
pub use report::{ComplianceCheck, ComplianceReport, ComplianceStatus, ReportEnhancer};
pub use results::{PaymentType, PecrCheck, ScrapedData};
pub use scanner::{Scanner, scrape_website};

/// Scan a site with the default configuration plus environment overrides
pub async fn scan(url: &str) -> Result<ComplianceReport, ScanError> {
    let config = ScanConfig::default().with_env_overrides();
    Scanner::new(&config)?.scan(url).await
}
