//! Compliance report model and the stages that produce it.

pub mod engine;
pub mod enhancer;
pub mod render;

pub use engine::{generate_report, overall_status};
pub use enhancer::{AnthropicEnhancer, ReportEnhancer, enhance_or_fallback};

use serde::{Deserialize, Serialize};

/// Outcome of a single check, also used for the overall band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    Warning,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
    Info,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::Warning => "Warning",
            ComplianceStatus::NonCompliant => "Non-Compliant",
            ComplianceStatus::Info => "Info",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub id: String,
    pub title: String,
    pub status: ComplianceStatus,
    /// One sentence describing the finding
    pub summary: String,
    /// Actionable advice
    pub recommendation: String,
}

/// Headline strings grouped by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub good_points: Vec<String>,
    pub warnings: Vec<String>,
    pub threats: Vec<String>,
}

/// Where a check is filed in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCategory {
    WebsitePolicies,
    Security,
    MemberData,
    Marketing,
    Payments,
}

impl CheckCategory {
    pub const ALL: [CheckCategory; 5] = [
        CheckCategory::WebsitePolicies,
        CheckCategory::Security,
        CheckCategory::MemberData,
        CheckCategory::Marketing,
        CheckCategory::Payments,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CheckCategory::WebsitePolicies => "Website Policies",
            CheckCategory::Security => "Security",
            CheckCategory::MemberData => "Member Data",
            CheckCategory::Marketing => "Marketing",
            CheckCategory::Payments => "Payments",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportChecks {
    pub website_policies: Vec<ComplianceCheck>,
    pub security: Vec<ComplianceCheck>,
    pub member_data: Vec<ComplianceCheck>,
    pub marketing: Vec<ComplianceCheck>,
    pub payments: Vec<ComplianceCheck>,
}

impl ReportChecks {
    pub fn category(&self, category: CheckCategory) -> &[ComplianceCheck] {
        match category {
            CheckCategory::WebsitePolicies => &self.website_policies,
            CheckCategory::Security => &self.security,
            CheckCategory::MemberData => &self.member_data,
            CheckCategory::Marketing => &self.marketing,
            CheckCategory::Payments => &self.payments,
        }
    }

    pub fn category_mut(&mut self, category: CheckCategory) -> &mut Vec<ComplianceCheck> {
        match category {
            CheckCategory::WebsitePolicies => &mut self.website_policies,
            CheckCategory::Security => &mut self.security,
            CheckCategory::MemberData => &mut self.member_data,
            CheckCategory::Marketing => &mut self.marketing,
            CheckCategory::Payments => &mut self.payments,
        }
    }

    /// Iterate over every check with its category, in report order
    pub fn iter(&self) -> impl Iterator<Item = (CheckCategory, &ComplianceCheck)> {
        CheckCategory::ALL
            .into_iter()
            .flat_map(move |category| self.category(category).iter().map(move |c| (category, c)))
    }

    /// Find a check by id in any category
    pub fn find(&self, id: &str) -> Option<&ComplianceCheck> {
        self.iter().map(|(_, check)| check).find(|check| check.id == id)
    }
}

/// Scored compliance report. This is the JSON contract consumers depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub scanned_url: String,
    /// ISO-8601 timestamp of report generation
    pub scan_date: String,
    pub overall_status: ComplianceStatus,
    /// 0-100
    pub overall_score: u32,
    pub summary: ReportSummary,
    pub checks: ReportChecks,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(id: &str, status: ComplianceStatus) -> ComplianceCheck {
        ComplianceCheck {
            id: id.to_string(),
            title: id.to_uppercase(),
            status,
            summary: "s".to_string(),
            recommendation: "r".to_string(),
        }
    }

    #[test]
    fn test_status_wire_names() {
        let statuses = [
            ComplianceStatus::Compliant,
            ComplianceStatus::Warning,
            ComplianceStatus::NonCompliant,
            ComplianceStatus::Info,
        ];
        for status in statuses {
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                json!(status.as_str())
            );
        }
        assert_eq!(
            serde_json::from_str::<ComplianceStatus>("\"Non-Compliant\"").unwrap(),
            ComplianceStatus::NonCompliant
        );
    }

    #[test]
    fn test_report_json_shape() {
        let mut checks = ReportChecks::default();
        checks.security.push(check("ssl", ComplianceStatus::Compliant));
        let report = ComplianceReport {
            scanned_url: "https://x.org".to_string(),
            scan_date: "2025-01-01T00:00:00.000Z".to_string(),
            overall_status: ComplianceStatus::NonCompliant,
            overall_score: 20,
            summary: ReportSummary {
                good_points: vec!["Website is secure (HTTPS).".to_string()],
                ..ReportSummary::default()
            },
            checks,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["scannedUrl"], "https://x.org");
        assert_eq!(value["overallStatus"], "Non-Compliant");
        assert_eq!(value["overallScore"], 20);
        assert_eq!(value["summary"]["goodPoints"][0], "Website is secure (HTTPS).");
        assert_eq!(value["summary"]["threats"], json!([]));
        assert_eq!(value["checks"]["security"][0]["id"], "ssl");
        for key in ["websitePolicies", "memberData", "marketing", "payments"] {
            assert_eq!(value["checks"][key], json!([]), "{}", key);
        }

        let back: ComplianceReport = serde_json::from_value(value).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_checks_iteration_order() {
        let mut checks = ReportChecks::default();
        checks.payments.push(check("pci_dss", ComplianceStatus::Info));
        checks.security.push(check("ssl", ComplianceStatus::Compliant));
        checks
            .website_policies
            .push(check("privacy_policy", ComplianceStatus::Warning));

        let ids: Vec<&str> = checks.iter().map(|(_, c)| c.id.as_str()).collect();
        assert_eq!(ids, vec!["privacy_policy", "ssl", "pci_dss"]);
        assert_eq!(
            checks.find("pci_dss").map(|c| c.status),
            Some(ComplianceStatus::Info)
        );
        assert!(checks.find("missing").is_none());
    }
}
