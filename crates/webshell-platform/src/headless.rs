//! Headless desktop platform.
//!
//! Stands in for a mobile OS: browser surfaces only keep a history list,
//! notices are collected instead of drawn, and the permission prompt and
//! launch-URL lookup answer with scripted values after a configurable
//! number of polls. The desktop driver and the test suites both run on it.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use webshell_types::error::{Result, ShellError};
use webshell_types::notice::Notice;

use crate::services::{
    BackButtonService, BackListener, BrowserService, BrowserSurface, ConsentOutcome, InitialUrl,
    LinkService, NoticeService, PermissionPoll, PermissionService, Platform, UrlListener,
};
use crate::subscription::{Listeners, Subscription};

/// Record of everything done to headless browser surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserJournal {
    /// Initial URL of every surface ever created, in order.
    pub created: Vec<String>,
    /// URLs passed to [`BrowserSurface::load`] on live surfaces.
    pub loads: Vec<String>,
    /// Number of [`BrowserSurface::go_back`] calls.
    pub back_calls: usize,
    /// Surfaces currently alive.
    pub live: usize,
    /// URL shown by the most recently touched live surface.
    pub current: Option<String>,
}

/// A browser surface that only tracks its history.
pub struct HeadlessBrowser {
    history: Vec<String>,
    journal: Rc<RefCell<BrowserJournal>>,
    load_fails: Rc<Cell<bool>>,
}

impl HeadlessBrowser {
    fn new(url: &str, journal: Rc<RefCell<BrowserJournal>>, load_fails: Rc<Cell<bool>>) -> Self {
        {
            let mut j = journal.borrow_mut();
            j.created.push(url.to_string());
            j.live += 1;
            j.current = Some(url.to_string());
        }
        Self {
            history: vec![url.to_string()],
            journal,
            load_fails,
        }
    }
}

impl BrowserSurface for HeadlessBrowser {
    fn load(&mut self, url: &str) -> Result<()> {
        if self.load_fails.get() {
            return Err(ShellError::Browser(format!("cannot load {url}")));
        }
        self.history.push(url.to_string());
        let mut j = self.journal.borrow_mut();
        j.loads.push(url.to_string());
        j.current = Some(url.to_string());
        Ok(())
    }

    fn go_back(&mut self) {
        let mut j = self.journal.borrow_mut();
        j.back_calls += 1;
        if self.history.len() > 1 {
            self.history.pop();
            j.current = self.history.last().cloned();
        }
    }
}

impl Drop for HeadlessBrowser {
    fn drop(&mut self) {
        let mut j = self.journal.borrow_mut();
        j.live = j.live.saturating_sub(1);
        if j.live == 0 {
            j.current = None;
        }
    }
}

/// Scripted platform for desktop runs and tests.
pub struct HeadlessPlatform {
    hardware_back: bool,
    latency: u32,
    initial_url: Option<String>,
    initial_url_requested: bool,
    initial_url_wait: u32,
    launch_lookup_fails: bool,
    launch_poll_fails: bool,
    consent: ConsentOutcome,
    consent_fails: bool,
    permission_requests: u32,
    permission_wait: u32,
    browser_creation_fails: bool,
    browser_load_fails: Rc<Cell<bool>>,
    back_listeners: Listeners<BackListener>,
    url_listeners: Listeners<UrlListener>,
    notices: Vec<Notice>,
    journal: Rc<RefCell<BrowserJournal>>,
}

impl HeadlessPlatform {
    /// A device with a hardware back button that was not launched through
    /// a link and whose user grants tracking immediately.
    pub fn new() -> Self {
        Self {
            hardware_back: true,
            latency: 0,
            initial_url: None,
            initial_url_requested: false,
            initial_url_wait: 0,
            launch_lookup_fails: false,
            launch_poll_fails: false,
            consent: ConsentOutcome::Granted,
            consent_fails: false,
            permission_requests: 0,
            permission_wait: 0,
            browser_creation_fails: false,
            browser_load_fails: Rc::new(Cell::new(false)),
            back_listeners: Listeners::new(),
            url_listeners: Listeners::new(),
            notices: Vec::new(),
            journal: Rc::new(RefCell::new(BrowserJournal::default())),
        }
    }

    pub fn with_hardware_back(mut self, present: bool) -> Self {
        self.hardware_back = present;
        self
    }

    /// Pretend the process was launched through `url`.
    pub fn with_initial_url(mut self, url: impl Into<String>) -> Self {
        self.initial_url = Some(url.into());
        self
    }

    /// Make the launch-URL request itself fail.
    pub fn with_failing_launch_lookup(mut self) -> Self {
        self.launch_lookup_fails = true;
        self
    }

    /// Accept the launch-URL request but fail once it would resolve.
    pub fn with_failing_launch_poll(mut self) -> Self {
        self.launch_poll_fails = true;
        self
    }

    /// Outcome the permission prompt resolves with.
    pub fn with_consent(mut self, outcome: ConsentOutcome) -> Self {
        self.consent = outcome;
        self
    }

    /// Make the permission prompt fail to open.
    pub fn with_failing_permission(mut self) -> Self {
        self.consent_fails = true;
        self
    }

    /// Number of `Waiting` polls before async lookups resolve.
    pub fn with_latency(mut self, polls: u32) -> Self {
        self.latency = polls;
        self
    }

    pub fn set_browser_creation_fails(&mut self, fails: bool) {
        self.browser_creation_fails = fails;
    }

    /// Make `load` fail on every surface, live or future.
    pub fn set_load_fails(&mut self, fails: bool) {
        self.browser_load_fails.set(fails);
    }

    // -- Host side ----------------------------------------------------------

    /// Simulate a back-button press. Returns `false` when nobody handled
    /// it, i.e. the platform would run its default action.
    pub fn press_back(&self) -> bool {
        let handled = self
            .back_listeners
            .dispatch_until(|listener| listener().then_some(()))
            .is_some();
        log::debug!("Back press handled: {handled}");
        handled
    }

    /// Simulate a link opened while the process runs.
    pub fn open_url(&self, url: &str) {
        log::debug!("Delivering inbound link to {} listener(s)", self.url_listeners.len());
        self.url_listeners.dispatch_all(|listener| listener(url));
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn journal(&self) -> Ref<'_, BrowserJournal> {
        self.journal.borrow()
    }

    pub fn permission_requests(&self) -> u32 {
        self.permission_requests
    }

    pub fn back_listener_count(&self) -> usize {
        self.back_listeners.len()
    }

    pub fn url_listener_count(&self) -> usize {
        self.url_listeners.len()
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserService for HeadlessPlatform {
    fn create_browser(&mut self, url: &str) -> Result<Box<dyn BrowserSurface>> {
        if self.browser_creation_fails {
            return Err(ShellError::Browser(format!("cannot create surface for {url}")));
        }
        Ok(Box::new(HeadlessBrowser::new(
            url,
            Rc::clone(&self.journal),
            Rc::clone(&self.browser_load_fails),
        )))
    }
}

impl LinkService for HeadlessPlatform {
    fn request_initial_url(&mut self) -> Result<()> {
        if self.launch_lookup_fails {
            return Err(ShellError::Platform("launch URL lookup unavailable".into()));
        }
        self.initial_url_requested = true;
        self.initial_url_wait = self.latency;
        Ok(())
    }

    fn poll_initial_url(&mut self) -> Result<InitialUrl> {
        if !self.initial_url_requested {
            return Err(ShellError::Platform("initial URL was never requested".into()));
        }
        if self.initial_url_wait > 0 {
            self.initial_url_wait -= 1;
            return Ok(InitialUrl::Waiting);
        }
        if self.launch_poll_fails {
            return Err(ShellError::Platform("launch URL lookup failed".into()));
        }
        Ok(match &self.initial_url {
            Some(url) => InitialUrl::Present(url.clone()),
            None => InitialUrl::Absent,
        })
    }

    fn on_url(&mut self, listener: Box<UrlListener>) -> Subscription {
        self.url_listeners.subscribe(listener)
    }
}

impl PermissionService for HeadlessPlatform {
    fn request_tracking(&mut self) -> Result<()> {
        if self.consent_fails {
            return Err(ShellError::Platform("tracking prompt unavailable".into()));
        }
        self.permission_requests += 1;
        self.permission_wait = self.latency;
        Ok(())
    }

    fn poll_tracking(&mut self) -> Result<PermissionPoll> {
        if self.permission_requests == 0 {
            return Err(ShellError::Platform("no permission request outstanding".into()));
        }
        if self.permission_wait > 0 {
            self.permission_wait -= 1;
            return Ok(PermissionPoll::Waiting);
        }
        Ok(PermissionPoll::Resolved(self.consent))
    }
}

impl NoticeService for HeadlessPlatform {
    fn show_notice(&mut self, notice: &Notice) -> Result<()> {
        log::info!("[notice] {}: {}", notice.title, notice.message);
        self.notices.push(notice.clone());
        Ok(())
    }
}

impl BackButtonService for HeadlessPlatform {
    fn has_hardware_back(&self) -> bool {
        self.hardware_back
    }

    fn on_back_press(&mut self, listener: Box<BackListener>) -> Subscription {
        self.back_listeners.subscribe(listener)
    }
}

impl Platform for HeadlessPlatform {}
