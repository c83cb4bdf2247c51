use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Environment variable that supplies the enhancer API key
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Configuration for a compliance scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// User-Agent sent with every page request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for a single page fetch, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of redirects followed per fetch
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Time budget for the whole scan (fetches and report), in seconds
    #[serde(default)]
    pub scan_timeout_secs: Option<u64>,

    /// Report enhancement settings
    #[serde(default)]
    pub enhancer: EnhancerConfig,
}

/// Configuration for the language-model report enhancer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancerConfig {
    /// API key; enhancement is skipped when absent
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the enhancement request, in seconds
    #[serde(default = "default_enhancer_timeout_secs")]
    pub timeout_secs: u64,
}

/// Default value for user_agent
fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; ComplianceChecker/1.0)".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    10
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_enhancer_timeout_secs() -> u64 {
    120
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            max_redirects: default_max_redirects(),
            scan_timeout_secs: None,
            enhancer: EnhancerConfig::default(),
        }
    }
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            base_url: default_base_url(),
            timeout_secs: default_enhancer_timeout_secs(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Take the enhancer API key from the environment when it is set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            self.apply_api_key(api_key);
        }
        self
    }

    fn apply_api_key(&mut self, api_key: String) {
        if !api_key.trim().is_empty() {
            self.enhancer.api_key = Some(api_key);
        }
    }
}
