//! Optional language-model rephrasing of a finished report.
//!
//! Enhancement is cosmetic. Whatever goes wrong here, the caller gets the
//! preliminary report back.

use super::{CheckCategory, ComplianceReport, ComplianceStatus};
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;
use crate::results::ScrapedData;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Opening braces tried when looking for an embedded JSON object
const MAX_OBJECT_CANDIDATES: usize = 16;

/// Produces a replacement report of the same shape as the preliminary one
#[async_trait]
pub trait ReportEnhancer: Send + Sync {
    /// Short identifier used in log lines
    fn name(&self) -> &str;

    async fn enhance(
        &self,
        data: &ScrapedData,
        report: &ComplianceReport,
    ) -> Result<ComplianceReport, EnhanceError>;
}

/// Run the enhancer if there is one, falling back to `preliminary` on any failure.
///
/// An enhanced report is only accepted when it passes [`validate_enhanced`].
pub async fn enhance_or_fallback(
    enhancer: Option<&dyn ReportEnhancer>,
    data: &ScrapedData,
    preliminary: ComplianceReport,
) -> ComplianceReport {
    let Some(enhancer) = enhancer else {
        ::log::warn!("No report enhancer configured. Skipping AI enhancement.");
        return preliminary;
    };

    let result = match enhancer.enhance(data, &preliminary).await {
        Ok(enhanced) => validate_enhanced(&preliminary, &enhanced).map(|_| enhanced),
        Err(e) => Err(e),
    };

    match result {
        Ok(enhanced) => {
            ::log::info!("Report for {} enhanced by {}", data.scanned_url, enhancer.name());
            enhanced
        }
        Err(e) => {
            ::log::error!("AI enhancement error ({}): {}", enhancer.name(), e);
            preliminary
        }
    }
}

/// Check that an enhanced report only rewords the preliminary one.
///
/// Score, status, scan date, check ids and check statuses must be unchanged,
/// and the summary lists must keep their lengths. Titles, summaries,
/// recommendations and the summary wording may differ.
pub fn validate_enhanced(
    preliminary: &ComplianceReport,
    enhanced: &ComplianceReport,
) -> Result<(), EnhanceError> {
    if enhanced.scanned_url != preliminary.scanned_url {
        return Err(EnhanceError::Rejected(format!(
            "scanned URL changed from {} to {}",
            preliminary.scanned_url, enhanced.scanned_url
        )));
    }

    if enhanced.scan_date != preliminary.scan_date {
        return Err(EnhanceError::Rejected(format!(
            "scan date changed from {} to {}",
            preliminary.scan_date, enhanced.scan_date
        )));
    }

    if enhanced.overall_score != preliminary.overall_score {
        return Err(EnhanceError::Rejected(format!(
            "score changed from {} to {}",
            preliminary.overall_score, enhanced.overall_score
        )));
    }

    if enhanced.overall_status != preliminary.overall_status {
        return Err(EnhanceError::Rejected(format!(
            "status changed from {} to {}",
            preliminary.overall_status, enhanced.overall_status
        )));
    }

    for category in CheckCategory::ALL {
        let before = check_outcomes(preliminary, category);
        let after = check_outcomes(enhanced, category);
        if before != after {
            return Err(EnhanceError::Rejected(format!(
                "{} checks changed from {:?} to {:?}",
                category.label(),
                before,
                after
            )));
        }
    }

    let lists = [
        ("good points", &preliminary.summary.good_points, &enhanced.summary.good_points),
        ("warnings", &preliminary.summary.warnings, &enhanced.summary.warnings),
        ("threats", &preliminary.summary.threats, &enhanced.summary.threats),
    ];
    for (label, before, after) in lists {
        if before.len() != after.len() {
            return Err(EnhanceError::Rejected(format!(
                "{} count changed from {} to {}",
                label,
                before.len(),
                after.len()
            )));
        }
    }

    Ok(())
}

fn check_outcomes(report: &ComplianceReport, category: CheckCategory) -> Vec<(&str, ComplianceStatus)> {
    report
        .checks
        .category(category)
        .iter()
        .map(|c| (c.id.as_str(), c.status))
        .collect()
}

/// Enhancer backed by the Anthropic Messages API
pub struct AnthropicEnhancer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicEnhancer {
    /// Enhancer with the default endpoint, token limit and timeout
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let config = EnhancerConfig {
            model: model.into(),
            ..EnhancerConfig::default()
        };
        Self::build(api_key.into(), &config)
    }

    /// Build from configuration; `None` when no API key is configured
    pub fn from_config(config: &EnhancerConfig) -> Option<Self> {
        let api_key = config.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        Some(Self::build(api_key.to_string(), config))
    }

    fn build(api_key: String, config: &EnhancerConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                ::log::error!("Failed to build HTTP client with custom timeout, using default client: {}", e);
                Client::new()
            });

        Self {
            client,
            api_key,
            base_url: String::new(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
        .with_base_url(config.base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    fn to_request(&self, prompt: String) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![RequestMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        }
    }
}

/// Prompt asking for a report of identical structure with richer wording
pub fn build_prompt(data: &ScrapedData, report: &ComplianceReport) -> Result<String, EnhanceError> {
    let data_json = serde_json::to_string_pretty(data)?;
    let report_json = serde_json::to_string_pretty(report)?;

    Ok(format!(
        "You are a charity compliance expert. Analyze this website scan data and provide enhanced insights for the compliance report.

Scraped Data:
{data_json}

Preliminary Report:
{report_json}

Please review the preliminary report and suggest:
1. Any additional insights or context for the findings
2. More specific recommendations based on the data
3. Any patterns or issues that might have been missed

Respond in JSON format with the same structure as the preliminary report, but with enhanced summaries and recommendations."
    ))
}

#[async_trait]
impl ReportEnhancer for AnthropicEnhancer {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn enhance(
        &self,
        data: &ScrapedData,
        report: &ComplianceReport,
    ) -> Result<ComplianceReport, EnhanceError> {
        let request = self.to_request(build_prompt(data, report)?);
        ::log::debug!("Requesting report enhancement from {} ({})", self.messages_url(), self.model);

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnhanceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let body: MessagesResponse = serde_json::from_str(&body)?;
        parse_json(&body.text())
    }
}

/// Parse a JSON value out of model output.
///
/// Tries the whole text, then a fenced code block, then the first JSON
/// object found in the text.
pub fn parse_json<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, EnhanceError> {
    let trimmed = content.trim();
    if let Ok(parsed) = serde_json::from_str::<T>(trimmed) {
        return Ok(parsed);
    }

    if let Some(block) = extract_fenced_block(trimmed)
        && let Ok(parsed) = serde_json::from_str::<T>(block)
    {
        return Ok(parsed);
    }

    if let Some(object) = extract_first_json_object(trimmed)
        && let Ok(parsed) = serde_json::from_str::<T>(object)
    {
        return Ok(parsed);
    }

    Err(EnhanceError::InvalidResponse(
        "no report-shaped JSON in model response".to_string(),
    ))
}

fn extract_fenced_block(content: &str) -> Option<&str> {
    let start = content.find("```")?;
    let after_fence = &content[start + 3..];
    // Skip the language tag line
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn extract_first_json_object(content: &str) -> Option<&str> {
    content
        .char_indices()
        .filter(|&(_, ch)| ch == '{')
        .take(MAX_OBJECT_CANDIDATES)
        .find_map(|(idx, _)| {
            let candidate = &content[idx..];
            let mut stream =
                serde_json::Deserializer::from_str(candidate).into_iter::<serde_json::Value>();
            match stream.next() {
                Some(Ok(_)) => Some(&candidate[..stream.byte_offset()]),
                _ => None,
            }
        })
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<RequestMessage>,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    /// Concatenated text blocks
    fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ResponseBlock::Text { text } => Some(text.as_str()),
                ResponseBlock::Other => None,
            })
            .collect()
    }
}
