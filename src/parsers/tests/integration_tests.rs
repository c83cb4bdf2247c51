use crate::filter::find_policy_pages;
use crate::parsers::{HomePageFindings, extract_links};
use crate::results::{PaymentType, PecrCheck};

const HOME_PAGE: &str = r##"
<html>
<head><title>Helping Hands</title></head>
<body>
  <nav>
    <a href="#main">Skip to content</a>
    <a href="/about">About</a>
    <a href="/privacy-policy">Privacy</a>
    <a href="/legal/cookies">Cookies</a>
    <a href="mailto:hello@x.org">Email us</a>
  </nav>
  <form>
    <input type="checkbox" name="newsletter"> Send me the newsletter
  </form>
  <p>Donate securely via PayPal. Remember to add Gift Aid!</p>
  <footer>&copy; 2025 Helping Hands</footer>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_page_pipeline() {
        let links = extract_links(HOME_PAGE, "https://x.org");
        assert_eq!(
            links,
            vec![
                "https://x.org/about",
                "https://x.org/privacy-policy",
                "https://x.org/legal/cookies",
            ]
        );

        let pages = find_policy_pages(&links);
        assert_eq!(pages.privacy.as_deref(), Some("https://x.org/privacy-policy"));
        assert_eq!(pages.cookie.as_deref(), Some("https://x.org/legal/cookies"));
        assert_eq!(pages.safeguarding, None);

        let findings = HomePageFindings::analyze(HOME_PAGE);
        assert!(findings.copyright);
        assert!(findings.gift_aid);
        assert_eq!(findings.payment_type, PaymentType::ThirdParty);
        assert_eq!(findings.pecr, PecrCheck::OptIn);
    }

    #[test]
    fn test_empty_page() {
        assert!(extract_links("", "https://x.org").is_empty());

        let findings = HomePageFindings::analyze("");
        assert!(!findings.copyright);
        assert!(!findings.gift_aid);
        assert_eq!(findings.payment_type, PaymentType::None);
        assert_eq!(findings.pecr, PecrCheck::Unknown);
    }
}
