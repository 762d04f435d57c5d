//! User-dismissable notices raised by the shell.

use serde::Deserialize;

/// A modal, dismissable message shown to the user.
///
/// The shell only decides *when* a notice appears; how it is drawn and
/// dismissed belongs to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Notice raised when an inbound link fails the allow-list.
    pub fn rejected_link() -> Self {
        Self::new("Invalid URL", "This URL is not allowed.")
    }
}

impl Default for Notice {
    fn default() -> Self {
        Self::rejected_link()
    }
}
