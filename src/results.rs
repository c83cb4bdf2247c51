use serde::{Deserialize, Serialize};

/// How the site appears to take card payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentType {
    /// A hosted processor (Stripe, PayPal, ...) is referenced
    ThirdParty,
    /// Card fields appear directly in the page markup
    SelfHosted,
    None,
}

/// Marketing consent pattern of the newsletter signup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PecrCheck {
    OptIn,
    OptOut,
    /// No signup form was detected
    Unknown,
}

/// Policy pages discovered from the home page links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundPages {
    pub privacy: Option<String>,
    pub cookie: Option<String>,
    pub safeguarding: Option<String>,
}

/// Findings from the privacy policy page itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyPolicyChecks {
    #[serde(rename = "mentionsDSAR")]
    pub mentions_dsar: bool,
    #[serde(rename = "mentionsDataProcessors")]
    pub mentions_data_processors: bool,
}

/// Everything a scan found about a site; the only input to report generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedData {
    /// Canonical absolute URL that was scanned
    pub scanned_url: String,

    #[serde(rename = "usesSSL")]
    pub uses_ssl: bool,

    pub found_pages: FoundPages,

    pub found_copyright: bool,

    pub payment_type: PaymentType,

    pub pecr_check: PecrCheck,

    pub found_gift_aid: bool,

    /// Only computed when a privacy page was found, otherwise all false
    pub privacy_policy_checks: PrivacyPolicyChecks,
}

impl ScrapedData {
    /// A record with nothing found yet for the given URL
    pub fn new(scanned_url: String) -> Self {
        let uses_ssl = scanned_url.starts_with("https://");
        Self {
            scanned_url,
            uses_ssl,
            found_pages: FoundPages::default(),
            found_copyright: false,
            payment_type: PaymentType::None,
            pecr_check: PecrCheck::Unknown,
            found_gift_aid: false,
            privacy_policy_checks: PrivacyPolicyChecks::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_defaults() {
        let data = ScrapedData::new("http://example.org".to_string());
        assert!(!data.uses_ssl);
        assert_eq!(data.found_pages, FoundPages::default());
        assert_eq!(data.payment_type, PaymentType::None);
        assert_eq!(data.pecr_check, PecrCheck::Unknown);
        assert!(!data.privacy_policy_checks.mentions_dsar);

        assert!(ScrapedData::new("https://example.org".to_string()).uses_ssl);
    }

    #[test]
    fn test_wire_field_names() {
        let mut data = ScrapedData::new("https://x.org".to_string());
        data.found_pages.privacy = Some("https://x.org/privacy".to_string());
        data.payment_type = PaymentType::ThirdParty;
        data.pecr_check = PecrCheck::OptOut;

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            json!({
                "scannedUrl": "https://x.org",
                "usesSSL": true,
                "foundPages": {
                    "privacy": "https://x.org/privacy",
                    "cookie": null,
                    "safeguarding": null
                },
                "foundCopyright": false,
                "paymentType": "third-party",
                "pecrCheck": "opt-out",
                "foundGiftAid": false,
                "privacyPolicyChecks": {
                    "mentionsDSAR": false,
                    "mentionsDataProcessors": false
                }
            })
        );
    }
}
