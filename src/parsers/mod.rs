//! Surface-level parsers over raw HTML.
//!
//! Everything here is pattern matching on markup, not a DOM parse. Unusual
//! markup can be missed or mis-captured.

pub mod content;
pub mod links;

#[cfg(test)]
mod tests;

pub use content::{
    analyze_privacy_policy, check_copyright, check_gift_aid, check_pecr, detect_payment_type,
};
pub use links::extract_links;

/// Findings from the home page detectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomePageFindings {
    pub copyright: bool,
    pub payment_type: crate::results::PaymentType,
    pub gift_aid: bool,
    pub pecr: crate::results::PecrCheck,
}

impl HomePageFindings {
    /// Run every home page detector over the same HTML
    pub fn analyze(html: &str) -> Self {
        let findings = Self {
            copyright: check_copyright(html),
            payment_type: detect_payment_type(html),
            gift_aid: check_gift_aid(html),
            pecr: check_pecr(html),
        };
        ::log::debug!("Home page findings: {:?}", findings);
        findings
    }
}
