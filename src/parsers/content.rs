use crate::results::{PaymentType, PecrCheck, PrivacyPolicyChecks};
use regex::Regex;
use std::sync::LazyLock;

static COPYRIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&copy;|©|\(c\)|copyright").unwrap());
static GIFT_AID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)gift\s*aid").unwrap());
static NEWSLETTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)newsletter|subscribe|mailing.*list|email.*updates").unwrap()
});
static PRECHECKED_NEWSLETTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<input[^>]*type=["']checkbox["'][^>]*checked[^>]*newsletter"#).unwrap()
});

/// Hosted payment processors; any hit means card data never touches the site
pub const THIRD_PARTY_PROCESSORS: [&str; 8] = [
    "stripe",
    "paypal",
    "square",
    "braintree",
    "worldpay",
    "sagepay",
    "checkout.com",
    "gocardless",
];

/// Card form field names that suggest payments are taken directly
pub const CARD_FIELD_MARKERS: [&str; 6] = [
    "card-number",
    "cardnumber",
    "credit-card",
    "creditcard",
    "cvv",
    "cvc",
];

pub const DSAR_PHRASES: [&str; 6] = [
    "dsar",
    "data subject access request",
    "subject access request",
    "access your data",
    "request a copy of your data",
    "request your personal data",
];

pub const DATA_PROCESSOR_PHRASES: [&str; 5] = [
    "data processor",
    "third party processor",
    "third-party processor",
    "service provider",
    "data processing",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Check if the page carries a copyright notice
pub fn check_copyright(html: &str) -> bool {
    COPYRIGHT_RE.is_match(html)
}

/// Classify payment handling; third-party processors take priority over card fields
pub fn detect_payment_type(html: &str) -> PaymentType {
    let lower = html.to_lowercase();

    if contains_any(&lower, &THIRD_PARTY_PROCESSORS) {
        PaymentType::ThirdParty
    } else if contains_any(&lower, &CARD_FIELD_MARKERS) {
        PaymentType::SelfHosted
    } else {
        PaymentType::None
    }
}

/// Check if the page mentions Gift Aid
pub fn check_gift_aid(html: &str) -> bool {
    GIFT_AID_RE.is_match(html)
}

/// Guess the marketing consent model of the newsletter signup.
///
/// A pre-ticked checkbox whose tag mentions "newsletter" is opt-out. Any other
/// page that talks about newsletters or subscribing is assumed to be opt-in.
pub fn check_pecr(html: &str) -> PecrCheck {
    if !NEWSLETTER_RE.is_match(html) {
        return PecrCheck::Unknown;
    }

    if PRECHECKED_NEWSLETTER_RE.is_match(html) {
        PecrCheck::OptOut
    } else {
        PecrCheck::OptIn
    }
}

/// Look for DSAR and data processor disclosures in a privacy policy page
pub fn analyze_privacy_policy(html: &str) -> PrivacyPolicyChecks {
    let lower = html.to_lowercase();

    PrivacyPolicyChecks {
        mentions_dsar: contains_any(&lower, &DSAR_PHRASES),
        mentions_data_processors: contains_any(&lower, &DATA_PROCESSOR_PHRASES),
    }
}
