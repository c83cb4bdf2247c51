//! Deterministic scoring of scraped findings into a compliance report.

use super::{CheckCategory, ComplianceCheck, ComplianceReport, ComplianceStatus, ReportChecks, ReportSummary};
use crate::results::{PaymentType, PecrCheck, ScrapedData};
use chrono::{DateTime, SecondsFormat, Utc};

/// Best achievable score; no finding awards the remaining 5 points
pub const MAX_SCORE: u32 = 95;

/// How a check feeds the summary lists and the score
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Good { points: u32, note: &'static str },
    Warning(&'static str),
    Threat(&'static str),
    /// Reported as a check only
    Neutral,
}

/// One evaluated check before it is filed into the report
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub category: CheckCategory,
    pub check: ComplianceCheck,
    pub finding: Finding,
}

impl Evaluation {
    fn new(
        category: CheckCategory,
        id: &str,
        title: &str,
        status: ComplianceStatus,
        summary: impl Into<String>,
        recommendation: &str,
        finding: Finding,
    ) -> Self {
        Self {
            category,
            check: ComplianceCheck {
                id: id.to_string(),
                title: title.to_string(),
                status,
                summary: summary.into(),
                recommendation: recommendation.to_string(),
            },
            finding,
        }
    }
}

/// Map a score to the overall band. `Info` is never produced here.
pub fn overall_status(score: u32) -> ComplianceStatus {
    if score > 85 {
        ComplianceStatus::Compliant
    } else if score > 60 {
        ComplianceStatus::Warning
    } else {
        ComplianceStatus::NonCompliant
    }
}

/// Clamp a running total into 0..=100
pub fn clamp_score(total: i64) -> u32 {
    total.clamp(0, 100) as u32
}

/// Build the report for `data`, stamped with the current time
pub fn generate_report(data: &ScrapedData) -> ComplianceReport {
    generate_report_at(data, Utc::now())
}

/// Build the report for `data` with an explicit scan timestamp
pub fn generate_report_at(data: &ScrapedData, scan_date: DateTime<Utc>) -> ComplianceReport {
    let mut total: i64 = 0;
    let mut checks = ReportChecks::default();
    let mut summary = ReportSummary::default();

    for evaluation in evaluate_all(data) {
        match evaluation.finding {
            Finding::Good { points, note } => {
                total += i64::from(points);
                summary.good_points.push(note.to_string());
            }
            Finding::Warning(note) => summary.warnings.push(note.to_string()),
            Finding::Threat(note) => summary.threats.push(note.to_string()),
            Finding::Neutral => {}
        }
        checks.category_mut(evaluation.category).push(evaluation.check);
    }

    let overall_score = clamp_score(total);
    ::log::info!(
        "Report for {}: score {} ({})",
        data.scanned_url,
        overall_score,
        overall_status(overall_score)
    );

    ComplianceReport {
        scanned_url: data.scanned_url.clone(),
        scan_date: scan_date.to_rfc3339_opts(SecondsFormat::Millis, true),
        overall_status: overall_status(overall_score),
        overall_score,
        summary,
        checks,
    }
}

/// Every check in report order. DSAR and data processor checks are only
/// present when a privacy page was found.
pub fn evaluate_all(data: &ScrapedData) -> Vec<Evaluation> {
    let mut evaluations = vec![
        evaluate_ssl(data),
        evaluate_privacy_policy(data),
        evaluate_cookie_policy(data),
        evaluate_safeguarding_policy(data),
    ];

    if data.found_pages.privacy.is_some() {
        evaluations.push(evaluate_dsar(data));
        evaluations.push(evaluate_data_processors(data));
    }

    evaluations.push(evaluate_pecr(data));
    evaluations.push(evaluate_pci_dss(data));
    evaluations.push(evaluate_gift_aid(data));
    evaluations.push(evaluate_copyright(data));
    evaluations
}

fn evaluate_ssl(data: &ScrapedData) -> Evaluation {
    const TITLE: &str = "SSL Certificate (HTTPS)";
    if data.uses_ssl {
        Evaluation::new(
            CheckCategory::Security,
            "ssl",
            TITLE,
            ComplianceStatus::Compliant,
            "Site is served over HTTPS with a valid certificate.",
            "No action needed. Keep your certificate renewed.",
            Finding::Good { points: 20, note: "Website is secure (HTTPS)." },
        )
    } else {
        Evaluation::new(
            CheckCategory::Security,
            "ssl",
            TITLE,
            ComplianceStatus::NonCompliant,
            "Site is not served over HTTPS.",
            "This is a high risk. All sites must use HTTPS. Install a free Let's Encrypt certificate.",
            Finding::Threat("Site is not secure (no HTTPS)."),
        )
    }
}

fn evaluate_privacy_policy(data: &ScrapedData) -> Evaluation {
    const TITLE: &str = "Privacy Policy";
    match &data.found_pages.privacy {
        Some(url) => Evaluation::new(
            CheckCategory::WebsitePolicies,
            "privacy_policy",
            TITLE,
            ComplianceStatus::Compliant,
            format!("A Privacy Policy page was found at {}.", url),
            "Good. Ensure it is linked in your website footer.",
            Finding::Good { points: 15, note: "Has a Privacy Policy." },
        ),
        None => Evaluation::new(
            CheckCategory::WebsitePolicies,
            "privacy_policy",
            TITLE,
            ComplianceStatus::NonCompliant,
            "A \"Privacy Policy\" page could not be found.",
            "This is a major GDPR risk. You must create and display a Privacy Policy immediately.",
            Finding::Threat("No Privacy Policy page found."),
        ),
    }
}

fn evaluate_cookie_policy(data: &ScrapedData) -> Evaluation {
    const TITLE: &str = "Cookie Policy";
    match &data.found_pages.cookie {
        Some(url) => Evaluation::new(
            CheckCategory::WebsitePolicies,
            "cookie_policy",
            TITLE,
            ComplianceStatus::Compliant,
            format!("A Cookie Policy page was found at {}.", url),
            "Good. Ensure it is clear and up-to-date.",
            Finding::Good { points: 5, note: "Has a Cookie Policy." },
        ),
        None => Evaluation::new(
            CheckCategory::WebsitePolicies,
            "cookie_policy",
            TITLE,
            ComplianceStatus::Warning,
            "A dedicated \"Cookie Policy\" page could not be found.",
            "This is recommended. You can also include cookie information in your Privacy Policy.",
            Finding::Warning("No dedicated Cookie Policy page."),
        ),
    }
}

fn evaluate_safeguarding_policy(data: &ScrapedData) -> Evaluation {
    const TITLE: &str = "Safeguarding Policy";
    match &data.found_pages.safeguarding {
        Some(url) => Evaluation::new(
            CheckCategory::WebsitePolicies,
            "safeguarding_policy",
            TITLE,
            ComplianceStatus::Compliant,
            format!("A Safeguarding Policy page was found at {}.", url),
            "Good. Ensure it is easily accessible and up-to-date.",
            Finding::Good { points: 10, note: "Has a Safeguarding Policy." },
        ),
        None => Evaluation::new(
            CheckCategory::WebsitePolicies,
            "safeguarding_policy",
            TITLE,
            ComplianceStatus::Warning,
            "A \"Safeguarding Policy\" page could not be found.",
            "If your charity works with children or vulnerable adults, this is essential.",
            Finding::Warning("No Safeguarding Policy page found."),
        ),
    }
}

fn evaluate_dsar(data: &ScrapedData) -> Evaluation {
    const TITLE: &str = "DSAR Process (in Privacy Policy)";
    if data.privacy_policy_checks.mentions_dsar {
        Evaluation::new(
            CheckCategory::WebsitePolicies,
            "dsar",
            TITLE,
            ComplianceStatus::Compliant,
            "Your Privacy Policy mentions DSARs or Subject Access Requests.",
            "Good. Ensure the process is clear and easy to follow.",
            Finding::Good { points: 10, note: "Privacy Policy mentions DSARs." },
        )
    } else {
        Evaluation::new(
            CheckCategory::WebsitePolicies,
            "dsar",
            TITLE,
            ComplianceStatus::Warning,
            "Your Privacy Policy does not seem to mention \"DSAR\" or \"Subject Access Request\".",
            "You must update your policy to explain how a user can request a copy of their data.",
            Finding::Warning("Privacy Policy missing DSAR info."),
        )
    }
}

fn evaluate_data_processors(data: &ScrapedData) -> Evaluation {
    const TITLE: &str = "Data Processors Disclosure";
    if data.privacy_policy_checks.mentions_data_processors {
        Evaluation::new(
            CheckCategory::WebsitePolicies,
            "data_processors",
            TITLE,
            ComplianceStatus::Compliant,
            "Your Privacy Policy mentions data processors or third-party services.",
            "Good. Ensure the list is complete and current.",
            Finding::Good { points: 5, note: "Privacy Policy mentions data processors." },
        )
    } else {
        Evaluation::new(
            CheckCategory::WebsitePolicies,
            "data_processors",
            TITLE,
            ComplianceStatus::Warning,
            "Your Privacy Policy does not clearly mention data processors or third-party services.",
            "GDPR requires you to disclose any third parties that process user data.",
            Finding::Warning("Privacy Policy missing data processor info."),
        )
    }
}

fn evaluate_pecr(data: &ScrapedData) -> Evaluation {
    const TITLE: &str = "Email Marketing (PECR)";
    match data.pecr_check {
        PecrCheck::OptIn => Evaluation::new(
            CheckCategory::Marketing,
            "pecr_opt_in",
            TITLE,
            ComplianceStatus::Compliant,
            "Newsletter signup form appears to be \"opt-in\".",
            "This is correct. Do not use pre-ticked boxes.",
            Finding::Good { points: 10, note: "PECR-compliant email marketing." },
        ),
        PecrCheck::OptOut => Evaluation::new(
            CheckCategory::Marketing,
            "pecr_opt_in",
            TITLE,
            ComplianceStatus::NonCompliant,
            "Newsletter signup form appears to be \"opt-out\" (pre-ticked).",
            "This is not compliant with PECR/GDPR. All marketing consent must be explicit and opt-in (unchecked).",
            Finding::Threat("Email marketing form is not opt-in."),
        ),
        PecrCheck::Unknown => Evaluation::new(
            CheckCategory::Marketing,
            "pecr_opt_in",
            TITLE,
            ComplianceStatus::Info,
            "Could not determine email marketing consent type.",
            "Ensure any email signup forms use an unchecked, opt-in box.",
            Finding::Neutral,
        ),
    }
}

fn evaluate_pci_dss(data: &ScrapedData) -> Evaluation {
    const TITLE: &str = "e-Payments (PCI DSS)";
    match data.payment_type {
        PaymentType::ThirdParty => Evaluation::new(
            CheckCategory::Payments,
            "pci_dss",
            TITLE,
            ComplianceStatus::Compliant,
            "Site uses a third-party payment processor (e.g., Stripe, PayPal).",
            "This is the best practice as it offloads PCI DSS compliance to the payment provider.",
            Finding::Good { points: 10, note: "Uses secure 3rd-party payments." },
        ),
        PaymentType::SelfHosted => Evaluation::new(
            CheckCategory::Payments,
            "pci_dss",
            TITLE,
            ComplianceStatus::NonCompliant,
            "Site appears to process payments directly (self-hosted).",
            "This is extremely high-risk. You must comply with PCI DSS Level 1 standards or switch to a third-party processor immediately.",
            Finding::Threat("Self-hosted payment processing detected."),
        ),
        PaymentType::None => Evaluation::new(
            CheckCategory::Payments,
            "pci_dss",
            TITLE,
            ComplianceStatus::Info,
            "No payment processing detected.",
            "If you accept donations online, ensure you use a secure third-party processor.",
            Finding::Neutral,
        ),
    }
}

// Gift Aid is informational either way, but a mention still earns points.
fn evaluate_gift_aid(data: &ScrapedData) -> Evaluation {
    const TITLE: &str = "Gift Aid";
    if data.found_gift_aid {
        Evaluation::new(
            CheckCategory::Payments,
            "gift_aid",
            TITLE,
            ComplianceStatus::Info,
            "Website mentions Gift Aid.",
            "Good. Ensure your Gift Aid process complies with HMRC requirements and GDPR.",
            Finding::Good { points: 5, note: "Promotes Gift Aid." },
        )
    } else {
        Evaluation::new(
            CheckCategory::Payments,
            "gift_aid",
            TITLE,
            ComplianceStatus::Info,
            "No mention of Gift Aid found.",
            "Consider promoting Gift Aid to increase donation value by 25%.",
            Finding::Neutral,
        )
    }
}

fn evaluate_copyright(data: &ScrapedData) -> Evaluation {
    const TITLE: &str = "Copyright Notice";
    if data.found_copyright {
        Evaluation::new(
            CheckCategory::MemberData,
            "copyright",
            TITLE,
            ComplianceStatus::Compliant,
            "Website includes a copyright notice.",
            "Good. Ensure the year is current.",
            Finding::Good { points: 5, note: "Has a copyright notice." },
        )
    } else {
        Evaluation::new(
            CheckCategory::MemberData,
            "copyright",
            TITLE,
            ComplianceStatus::Warning,
            "No copyright notice found.",
            "Consider adding a copyright notice in your footer (e.g., \"© 2025 Your Charity\").",
            Finding::Warning("No copyright notice."),
        )
    }
}
