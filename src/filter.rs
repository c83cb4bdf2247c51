use crate::results::FoundPages;

/// Kind of policy page a link can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Privacy,
    Cookie,
    Safeguarding,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::Privacy,
        PolicyKind::Cookie,
        PolicyKind::Safeguarding,
    ];

    /// Substrings that mark a lowercased link as this kind of page
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            PolicyKind::Privacy => &["privacy", "privacypolicy", "privacy-policy"],
            PolicyKind::Cookie => &["cookie", "cookies"],
            PolicyKind::Safeguarding => &["safeguarding", "child-protection", "childprotection"],
        }
    }

    /// Check whether a link looks like this kind of policy page
    pub fn matches(&self, link: &str) -> bool {
        let lower = link.to_lowercase();
        self.keywords().iter().any(|keyword| lower.contains(keyword))
    }
}

/// Pick the first privacy, cookie and safeguarding links in document order.
///
/// Each kind is matched independently, so one link can fill several slots.
/// A slot is never overwritten once filled.
pub fn find_policy_pages<S: AsRef<str>>(links: &[S]) -> FoundPages {
    let mut pages = FoundPages::default();

    for link in links {
        let link = link.as_ref();
        for kind in PolicyKind::ALL {
            let slot = match kind {
                PolicyKind::Privacy => &mut pages.privacy,
                PolicyKind::Cookie => &mut pages.cookie,
                PolicyKind::Safeguarding => &mut pages.safeguarding,
            };
            if slot.is_none() && kind.matches(link) {
                ::log::debug!("Found {:?} page: {}", kind, link);
                *slot = Some(link.to_string());
            }
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_resolved_links() {
        let links = [
            "https://x.org/about",
            "https://x.org/privacy-policy",
            "https://x.org/legal/cookies",
        ];
        let pages = find_policy_pages(&links);
        assert_eq!(pages.privacy.as_deref(), Some("https://x.org/privacy-policy"));
        assert_eq!(pages.cookie.as_deref(), Some("https://x.org/legal/cookies"));
        assert_eq!(pages.safeguarding, None);
    }

    #[test]
    fn test_first_match_wins() {
        let links = [
            "https://x.org/privacy",
            "https://x.org/Privacy-Notice",
            "https://x.org/safeguarding",
            "https://x.org/child-protection",
        ];
        let pages = find_policy_pages(&links);
        assert_eq!(pages.privacy.as_deref(), Some("https://x.org/privacy"));
        assert_eq!(pages.safeguarding.as_deref(), Some("https://x.org/safeguarding"));
    }

    #[test]
    fn test_one_link_can_fill_several_kinds() {
        let links = ["https://x.org/privacy-and-cookies"];
        let pages = find_policy_pages(&links);
        assert_eq!(pages.privacy.as_deref(), Some("https://x.org/privacy-and-cookies"));
        assert_eq!(pages.cookie.as_deref(), Some("https://x.org/privacy-and-cookies"));
        assert_eq!(pages.safeguarding, None);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert!(PolicyKind::Safeguarding.matches("https://x.org/ChildProtection"));
        assert!(PolicyKind::Cookie.matches("https://x.org/COOKIE-NOTICE"));
        assert!(!PolicyKind::Privacy.matches("https://x.org/terms"));
    }

    #[test]
    fn test_no_links() {
        let links: Vec<String> = Vec::new();
        assert_eq!(find_policy_pages(&links), FoundPages::default());
    }
}
