//! Error types for webshell.

/// Errors produced by the webshell crates.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("config error: {0}")]
    Config(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("invalid load-state transition: {event} while {from}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let e = ShellError::Config("no trusted origins".into());
        assert_eq!(format!("{e}"), "config error: no trusted origins");
    }

    #[test]
    fn platform_error_display() {
        let e = ShellError::Platform("permission service gone".into());
        assert_eq!(format!("{e}"), "platform error: permission service gone");
    }

    #[test]
    fn browser_error_display() {
        let e = ShellError::Browser("surface creation failed".into());
        assert_eq!(format!("{e}"), "browser error: surface creation failed");
    }

    #[test]
    fn invalid_transition_display() {
        let e = ShellError::InvalidTransition {
            from: "pending",
            event: "retry",
        };
        assert_eq!(
            format!("{e}"),
            "invalid load-state transition: retry while pending"
        );
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("trusted_origins = [[[").unwrap_err();
        let e: ShellError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<()> = Err(ShellError::Browser("oops".into()));
        assert!(r.is_err());
    }
}
