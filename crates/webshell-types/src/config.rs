//! Compiled-in shell configuration.
//!
//! The shell has no runtime configuration surface. Hosts either use
//! [`ShellConfig::default`] or embed a TOML document at build time with
//! `include_str!` and parse it through [`ShellConfig::from_toml_str`].

use serde::Deserialize;

use crate::error::{Result, ShellError};
use crate::notice::Notice;

/// Target shown when no admitted deep link says otherwise.
pub const DEFAULT_TARGET: &str = "https://example.org/";

/// Origin prefixes trusted out of the box.
pub const DEFAULT_TRUSTED_ORIGINS: &[&str] = &["https://example.org", "https://www.example.org"];

/// Top-level shell configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Target the browser opens at. Trusted without allow-list checks.
    pub default_target: String,
    /// Ordered list of URL prefixes inbound links must start with.
    pub trusted_origins: Vec<String>,
    /// Ask for tracking permission before the browser is first shown.
    pub consent_gate: bool,
    /// Notice raised when an inbound link is rejected.
    pub rejection_notice: Notice,
    /// Generic message on the load-failure screen.
    pub load_error_message: String,
    /// Label of the retry control on the load-failure screen.
    pub retry_label: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            default_target: DEFAULT_TARGET.to_string(),
            trusted_origins: DEFAULT_TRUSTED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            consent_gate: true,
            rejection_notice: Notice::rejected_link(),
            load_error_message: "Sorry, the site is currently unavailable.".to_string(),
            retry_label: "Retry".to_string(),
        }
    }
}

impl ShellConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        log::debug!(
            "Parsed shell config: {} trusted origin(s), consent gate {}",
            config.trusted_origins.len(),
            if config.consent_gate { "on" } else { "off" },
        );
        Ok(config)
    }

    /// Reject configurations the shell cannot run with.
    ///
    /// An empty origin prefix would admit every URL, so it is refused
    /// rather than silently accepted.
    pub fn validate(&self) -> Result<()> {
        if self.default_target.trim().is_empty() {
            return Err(ShellError::Config("default_target is empty".into()));
        }
        if self.trusted_origins.is_empty() {
            return Err(ShellError::Config("trusted_origins is empty".into()));
        }
        if let Some(idx) = self.trusted_origins.iter().position(|o| o.is_empty()) {
            return Err(ShellError::Config(format!(
                "trusted_origins[{idx}] is an empty prefix"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let cfg = ShellConfig::default();
        assert_eq!(cfg.default_target, "https://example.org/");
        assert_eq!(
            cfg.trusted_origins,
            vec!["https://example.org", "https://www.example.org"]
        );
        assert!(cfg.consent_gate);
        assert_eq!(cfg.rejection_notice, Notice::rejected_link());
        assert_eq!(cfg.retry_label, "Retry");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = ShellConfig::from_toml_str("consent_gate = false\n").unwrap();
        assert!(!cfg.consent_gate);
        assert_eq!(cfg.default_target, DEFAULT_TARGET);
        assert_eq!(cfg.trusted_origins.len(), 2);
    }

    #[test]
    fn full_toml_document() {
        let src = r#"
            default_target = "https://shop.test/"
            trusted_origins = ["https://shop.test", "https://m.shop.test"]
            consent_gate = true
            load_error_message = "Down for maintenance."
            retry_label = "Again"

            [rejection_notice]
            title = "Blocked"
            message = "Link not permitted."
        "#;
        let cfg = ShellConfig::from_toml_str(src).unwrap();
        assert_eq!(cfg.default_target, "https://shop.test/");
        assert_eq!(cfg.trusted_origins[1], "https://m.shop.test");
        assert_eq!(cfg.rejection_notice.title, "Blocked");
        assert_eq!(cfg.load_error_message, "Down for maintenance.");
        assert_eq!(cfg.retry_label, "Again");
    }

    #[test]
    fn empty_origin_list_rejected() {
        let err = ShellConfig::from_toml_str("trusted_origins = []").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }

    #[test]
    fn empty_origin_prefix_rejected() {
        let err =
            ShellConfig::from_toml_str(r#"trusted_origins = ["https://a.test", ""]"#).unwrap_err();
        assert_eq!(
            format!("{err}"),
            "config error: trusted_origins[1] is an empty prefix"
        );
    }

    #[test]
    fn blank_default_target_rejected() {
        let err = ShellConfig::from_toml_str(r#"default_target = "  ""#).unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ShellConfig::from_toml_str("consent_gate = = true").unwrap_err();
        assert!(matches!(err, ShellError::TomlParse(_)));
    }
}
