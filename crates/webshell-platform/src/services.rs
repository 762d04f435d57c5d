//! Platform service traits.
//!
//! Each trait is one external collaborator of the shell. Asynchronous
//! collaborators (permission prompt, launch-URL lookup) are started once and
//! then polled, so the single event loop never blocks on them.

use webshell_types::error::Result;
use webshell_types::notice::Notice;

use crate::subscription::Subscription;

/// Callback for a hardware back press. Returns `true` when handled.
pub type BackListener = dyn FnMut() -> bool;

/// Callback for a URL delivered to the running process.
pub type UrlListener = dyn FnMut(&str);

// ---------------------------------------------------------------------------
// Browser surface
// ---------------------------------------------------------------------------

/// Imperative handle to a mounted embedded browser.
///
/// Load failures and scroll offsets travel the other way, as
/// [`webshell_types::event::BrowserEvent`]s fed to the shell by the host.
pub trait BrowserSurface {
    /// Navigate the surface to `url`.
    fn load(&mut self, url: &str) -> Result<()>;

    /// Step back in the surface's own history. No-op without history.
    fn go_back(&mut self);
}

/// Creates browser surfaces.
pub trait BrowserService {
    /// Mount a new surface showing `url`.
    fn create_browser(&mut self, url: &str) -> Result<Box<dyn BrowserSurface>>;
}

// ---------------------------------------------------------------------------
// Inbound links
// ---------------------------------------------------------------------------

/// State of the one-time "URL that launched the process" lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialUrl {
    /// Lookup still outstanding; poll again later.
    Waiting,
    /// The process was not launched through a link.
    Absent,
    /// The launch URL, unvalidated.
    Present(String),
}

/// Source of external links.
pub trait LinkService {
    /// Start the launch-URL lookup.
    fn request_initial_url(&mut self) -> Result<()>;

    /// Poll the launch-URL lookup.
    fn poll_initial_url(&mut self) -> Result<InitialUrl>;

    /// Listen for URLs opened while the process runs.
    fn on_url(&mut self, listener: Box<UrlListener>) -> Subscription;
}

// ---------------------------------------------------------------------------
// Tracking permission
// ---------------------------------------------------------------------------

/// User decision on the tracking-permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsentOutcome {
    Granted,
    Denied,
    Undetermined,
}

impl ConsentOutcome {
    /// Opaque value handed on to page scripts.
    pub fn tracking_value(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied | Self::Undetermined => "deny",
        }
    }
}

impl std::fmt::Display for ConsentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// State of an outstanding permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionPoll {
    /// The user has not answered yet.
    Waiting,
    /// The prompt closed with this outcome.
    Resolved(ConsentOutcome),
}

/// One-shot tracking-permission prompt.
pub trait PermissionService {
    /// Show the prompt.
    fn request_tracking(&mut self) -> Result<()>;

    /// Poll the prompt started by [`request_tracking`](Self::request_tracking).
    fn poll_tracking(&mut self) -> Result<PermissionPoll>;
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

/// Shows dismissable notices to the user.
pub trait NoticeService {
    fn show_notice(&mut self, notice: &Notice) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Hardware back button
// ---------------------------------------------------------------------------

/// Back button living outside the browser's own UI.
pub trait BackButtonService {
    /// Whether the device has a hardware/software back button at all.
    fn has_hardware_back(&self) -> bool;

    /// Listen for back presses. The platform performs its default action
    /// (typically leaving the app) when no listener reports it handled.
    fn on_back_press(&mut self, listener: Box<BackListener>) -> Subscription;
}

// ---------------------------------------------------------------------------
// Unified platform trait
// ---------------------------------------------------------------------------

/// Aggregate trait providing every collaborator the shell needs.
pub trait Platform:
    BrowserService + LinkService + PermissionService + NoticeService + BackButtonService
{
}
