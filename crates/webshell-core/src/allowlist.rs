//! Allow-list validation for navigation targets.
//!
//! Matching is a literal, case-sensitive prefix comparison against each
//! trusted origin. URLs are not parsed or normalised, so a prefix such as
//! `https://example.org` also admits `https://example.org.evil.test`.
//! Configure prefixes with a trailing `/` where that matters.

use std::fmt;

use webshell_types::config::ShellConfig;

/// Ordered, immutable set of trusted URL prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedOrigins {
    prefixes: Vec<String>,
}

impl TrustedOrigins {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.trusted_origins.iter().cloned())
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        is_allowed(url, self)
    }

    /// Wrap `url` as a navigation target if it passes the allow-list.
    pub fn admit(&self, url: &str) -> Option<AdmittedUrl> {
        self.is_allowed(url).then(|| AdmittedUrl(url.to_string()))
    }
}

/// `true` iff `url` starts with one of the trusted non-empty prefixes.
///
/// Empty URLs and URLs containing whitespace or control characters are
/// never allowed. An empty prefix is skipped rather than treated as a
/// prefix of every URL; config validation already refuses one, and a
/// hand-built [`TrustedOrigins`] containing `""` must not admit everything.
pub fn is_allowed(url: &str, origins: &TrustedOrigins) -> bool {
    if is_malformed(url) {
        return false;
    }
    origins
        .prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && url.starts_with(prefix.as_str()))
}

fn is_malformed(url: &str) -> bool {
    url.is_empty() || url.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// A URL that may become the navigation target.
///
/// Only obtainable through [`TrustedOrigins::admit`] or, for the one
/// compiled-in default, [`AdmittedUrl::default_target`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedUrl(String);

impl AdmittedUrl {
    /// The configured default target, trusted by construction.
    pub fn default_target(config: &ShellConfig) -> Self {
        Self(config.default_target.clone())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AdmittedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origins() -> TrustedOrigins {
        TrustedOrigins::new(["https://example.org", "https://www.example.org"])
    }

    #[test]
    fn trusted_path_allowed() {
        assert!(origins().is_allowed("https://example.org/menu"));
        assert!(origins().is_allowed("https://www.example.org/promo"));
    }

    #[test]
    fn exact_prefix_allowed() {
        assert!(origins().is_allowed("https://example.org"));
    }

    #[test]
    fn other_host_rejected() {
        assert!(!origins().is_allowed("https://evil.example.org"));
        assert!(!origins().is_allowed("https://attacker.test/phish"));
    }

    #[test]
    fn scheme_mismatch_rejected() {
        assert!(!origins().is_allowed("http://example.org"));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!origins().is_allowed("HTTPS://EXAMPLE.ORG/menu"));
        assert!(!origins().is_allowed("https://Example.org/"));
    }

    #[test]
    fn empty_url_rejected() {
        assert!(!origins().is_allowed(""));
    }

    #[test]
    fn malformed_url_rejected() {
        assert!(!origins().is_allowed("https://example.org/a b"));
        assert!(!origins().is_allowed("https://example.org/\n"));
        assert!(!origins().is_allowed("https://example.org\u{0}"));
    }

    #[test]
    fn same_prefix_other_host_passes_literally() {
        // Literal prefix semantics: no host parsing.
        assert!(origins().is_allowed("https://example.org.evil.test/"));
        let strict = TrustedOrigins::new(["https://example.org/"]);
        assert!(!strict.is_allowed("https://example.org.evil.test/"));
    }

    #[test]
    fn empty_prefix_never_matches() {
        let loose = TrustedOrigins::new([""]);
        assert!(!loose.is_allowed("https://anything.test/"));
    }

    #[test]
    fn empty_origin_set_allows_nothing() {
        let none = TrustedOrigins::new(Vec::<String>::new());
        assert!(!none.is_allowed("https://example.org/"));
    }

    #[test]
    fn admit_wraps_allowed_only() {
        let o = origins();
        assert_eq!(
            o.admit("https://example.org/menu").map(AdmittedUrl::into_string),
            Some("https://example.org/menu".to_string())
        );
        assert!(o.admit("http://example.org").is_none());
    }

    #[test]
    fn default_target_from_config() {
        let cfg = ShellConfig::default();
        let target = AdmittedUrl::default_target(&cfg);
        assert_eq!(target.as_str(), "https://example.org/");
        assert_eq!(target.to_string(), "https://example.org/");
    }

    #[test]
    fn origins_preserve_order() {
        let o = TrustedOrigins::from_config(&ShellConfig::default());
        assert_eq!(o.prefixes()[0], "https://example.org");
        assert_eq!(o.prefixes()[1], "https://www.example.org");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_prefix() -> impl Strategy<Value = String> {
            "[a-z:/.]{1,12}"
        }

        proptest! {
            #[test]
            fn allowed_iff_literal_prefix(
                url in "[a-z:/.]{0,24}",
                prefixes in proptest::collection::vec(arb_prefix(), 0..5),
            ) {
                let origins = TrustedOrigins::new(prefixes.clone());
                let expected = !url.is_empty()
                    && prefixes.iter().any(|p| url.starts_with(p.as_str()));
                prop_assert_eq!(is_allowed(&url, &origins), expected);
            }

            #[test]
            fn prefix_plus_suffix_always_allowed(
                prefix in arb_prefix(),
                suffix in "[a-z/?=&]{0,16}",
            ) {
                let origins = TrustedOrigins::new([prefix.clone()]);
                let url = format!("{prefix}{suffix}");
                prop_assert!(is_allowed(&url, &origins));
            }

            #[test]
            fn admit_agrees_with_is_allowed(
                url in "[a-z:/.]{0,24}",
                prefix in arb_prefix(),
            ) {
                let origins = TrustedOrigins::new([prefix]);
                prop_assert_eq!(origins.admit(&url).is_some(), origins.is_allowed(&url));
            }
        }
    }
}
