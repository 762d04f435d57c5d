//! webshell core.
//!
//! The decision logic of a single-site mobile web shell: which URLs the
//! embedded browser may load, how inbound deep links are admitted, how back
//! requests are routed into the browser's own history, and how load
//! failures are surfaced and retried. Rendering is left to the host; it
//! reads a [`ShellView`] and feeds events back in.

// Re-exports from webshell-types (foundation types).
pub use webshell_types::config;
pub use webshell_types::error;
pub use webshell_types::event;
pub use webshell_types::notice;

pub use webshell_platform as platform;

pub mod allowlist;
pub mod consent;
pub mod deeplink;
pub mod load_state;
pub mod nav;
pub mod scroll;
pub mod shell;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use allowlist::{AdmittedUrl, TrustedOrigins, is_allowed};
pub use consent::{ConsentGate, ConsentOutcome};
pub use deeplink::{DeepLinkResolver, LinkDecision, LinkInbox};
pub use load_state::{LoadEvent, LoadState, LoadStateMachine};
pub use nav::{BrowserRef, NavigationController};
pub use scroll::{ScrollSample, ScrollTracker};
pub use shell::{Screen, Shell, ShellView};
