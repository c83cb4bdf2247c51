//! Sequential scan pipeline: normalize, fetch, classify, analyze, report.

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::fetchers::{HttpFetcher, PageFetcher};
use crate::filter::find_policy_pages;
use crate::parsers::{HomePageFindings, analyze_privacy_policy, extract_links};
use crate::report::{AnthropicEnhancer, ComplianceReport, ReportEnhancer, enhance_or_fallback, generate_report};
use crate::results::ScrapedData;
use crate::utils::normalize_url;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Normalize user input and make sure it is an absolute URL before any fetch
pub fn prepare_url(input: &str) -> Result<String, ScanError> {
    if input.trim().is_empty() {
        return Err(ScanError::invalid_url(input, "no URL provided"));
    }

    let normalized = normalize_url(input);
    match Url::parse(&normalized) {
        Ok(parsed) if parsed.host_str().is_some() => Ok(normalized),
        Ok(_) => Err(ScanError::invalid_url(input, "URL has no host")),
        Err(e) => Err(ScanError::invalid_url(input, e.to_string())),
    }
}

async fn fetch_page(fetcher: &dyn PageFetcher, url: &str) -> Result<String, ScanError> {
    fetcher.fetch(url).await.map_err(|source| ScanError::Fetch {
        url: url.to_string(),
        source,
    })
}

/// Scrape a site into a [`ScrapedData`] record.
///
/// Any failed fetch aborts the scan, including the privacy page fetch.
pub async fn scrape_website(fetcher: &dyn PageFetcher, input: &str) -> Result<ScrapedData, ScanError> {
    let scanned_url = prepare_url(input)?;
    let mut data = ScrapedData::new(scanned_url);

    let home_html = fetch_page(fetcher, &data.scanned_url).await?;

    let links = extract_links(&home_html, &data.scanned_url);
    data.found_pages = find_policy_pages(&links);
    ::log::info!(
        "Found {} links on {} (privacy: {}, cookie: {}, safeguarding: {})",
        links.len(),
        data.scanned_url,
        data.found_pages.privacy.is_some(),
        data.found_pages.cookie.is_some(),
        data.found_pages.safeguarding.is_some()
    );

    let findings = HomePageFindings::analyze(&home_html);
    data.found_copyright = findings.copyright;
    data.payment_type = findings.payment_type;
    data.found_gift_aid = findings.gift_aid;
    data.pecr_check = findings.pecr;

    if let Some(privacy_url) = &data.found_pages.privacy {
        let privacy_html = fetch_page(fetcher, privacy_url).await?;
        data.privacy_policy_checks = analyze_privacy_policy(&privacy_html);
        ::log::debug!("Privacy policy checks: {:?}", data.privacy_policy_checks);
    }

    Ok(data)
}

/// Entry point for compliance scans
pub struct Scanner {
    fetcher: Arc<dyn PageFetcher>,
    enhancer: Option<Arc<dyn ReportEnhancer>>,
    /// Set by `without_enhancer`; skips enhancement without a warning
    enhancement_disabled: bool,
    scan_timeout: Option<Duration>,
}

impl Scanner {
    /// Create a scanner using HTTP fetching and, when an API key is
    /// configured, the Anthropic enhancer
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let fetcher = HttpFetcher::from_config(config)?;
        let enhancer = AnthropicEnhancer::from_config(&config.enhancer)
            .map(|e| Arc::new(e) as Arc<dyn ReportEnhancer>);

        Ok(Self {
            fetcher: Arc::new(fetcher),
            enhancer,
            enhancement_disabled: false,
            scan_timeout: config.scan_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Create a scanner around any fetcher, without enhancement
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            enhancer: None,
            enhancement_disabled: false,
            scan_timeout: None,
        }
    }

    /// Replace the report enhancer
    pub fn with_enhancer(mut self, enhancer: Arc<dyn ReportEnhancer>) -> Self {
        self.enhancer = Some(enhancer);
        self.enhancement_disabled = false;
        self
    }

    /// Disable report enhancement
    pub fn without_enhancer(mut self) -> Self {
        self.enhancer = None;
        self.enhancement_disabled = true;
        self
    }

    /// Set the total time budget for one scan
    pub fn with_scan_timeout(mut self, timeout_seconds: u64) -> Self {
        self.scan_timeout = Some(Duration::from_secs(timeout_seconds));
        self
    }

    pub fn has_enhancer(&self) -> bool {
        self.enhancer.is_some()
    }

    /// Scan `input` and produce a (possibly enhanced) compliance report
    pub async fn scan(&self, input: &str) -> Result<ComplianceReport, ScanError> {
        ::log::info!("Starting scan for: {}", input);

        let result = match self.scan_timeout {
            Some(limit) => tokio::time::timeout(limit, self.run(input))
                .await
                .unwrap_or_else(|_| {
                    Err(ScanError::Timeout {
                        url: input.to_string(),
                        seconds: limit.as_secs(),
                    })
                }),
            None => self.run(input).await,
        };

        if let Err(e) = &result {
            ::log::error!("Scan error for {}: {}", input, e);
        }
        result
    }

    /// Scrape only, without scoring
    pub async fn scrape(&self, input: &str) -> Result<ScrapedData, ScanError> {
        scrape_website(self.fetcher.as_ref(), input).await
    }

    async fn run(&self, input: &str) -> Result<ComplianceReport, ScanError> {
        let data = self.scrape(input).await?;
        ::log::debug!("Scraping complete: {:?}", data);

        let preliminary = generate_report(&data);
        if self.enhancement_disabled {
            ::log::info!("AI enhancement disabled for this scan");
            return Ok(preliminary);
        }
        Ok(enhance_or_fallback(self.enhancer.as_deref(), &data, preliminary).await)
    }
}
