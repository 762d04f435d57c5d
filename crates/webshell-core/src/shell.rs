//! The shell component.
//!
//! [`Shell`] owns every piece of navigation state and is the only thing a
//! host talks to. Mounting subscribes to platform signals, asks for
//! tracking consent, and starts the launch-URL lookup. The host then calls
//! [`Shell::pump`] from its event loop, forwards browser events and user
//! gestures, and renders whatever [`Shell::view`] describes. Dropping or
//! [unmounting](Shell::unmount) the shell releases every subscription.

use webshell_platform::services::{BrowserService, ConsentOutcome, InitialUrl, Platform};
use webshell_platform::subscription::Subscription;
use webshell_types::config::ShellConfig;
use webshell_types::error::Result;
use webshell_types::event::BrowserEvent;

use crate::allowlist::{AdmittedUrl, TrustedOrigins};
use crate::consent::ConsentGate;
use crate::deeplink::DeepLinkResolver;
use crate::load_state::{LoadState, LoadStateMachine};
use crate::nav::NavigationController;
use crate::scroll::{ScrollSample, ScrollTracker};

/// Main area of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Consent or the launch-URL lookup is still pending.
    Placeholder,
    /// The embedded browser at `url`.
    Browser { url: String },
    /// The load failed; show `message` and a `retry_label` control.
    LoadError { message: String, retry_label: String },
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    pub screen: Screen,
    /// `None` where a hardware back button exists. Otherwise whether the
    /// floating back affordance is currently visible.
    pub back_affordance: Option<bool>,
}

pub struct Shell {
    nav: NavigationController,
    links: DeepLinkResolver,
    load: LoadStateMachine,
    scroll: ScrollTracker,
    consent: Option<ConsentGate>,
    launch_url_pending: bool,
    hardware_back: bool,
    load_error_message: String,
    retry_label: String,
    subscriptions: Vec<Subscription>,
}

impl Shell {
    /// Mount the shell on `platform`.
    pub fn mount<P: Platform + ?Sized>(config: &ShellConfig, platform: &mut P) -> Result<Self> {
        config.validate()?;

        let links = DeepLinkResolver::new(
            TrustedOrigins::from_config(config),
            config.rejection_notice.clone(),
        );
        let nav = NavigationController::new(AdmittedUrl::default_target(config));

        let mut subscriptions = Vec::with_capacity(2);
        subscriptions.push(links.listen(platform));
        let hardware_back = platform.has_hardware_back();
        if hardware_back {
            subscriptions.push(nav.subscribe_hardware_back(platform));
        }

        let launch_url_pending = match platform.request_initial_url() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Launch URL lookup failed, using default target: {e}");
                false
            },
        };

        let mut consent = config.consent_gate.then(ConsentGate::new);
        if let Some(gate) = consent.as_mut() {
            gate.start(platform);
        }

        let mut shell = Self {
            nav,
            links,
            load: LoadStateMachine::new(consent.is_some()),
            scroll: ScrollTracker::new(),
            consent,
            launch_url_pending,
            hardware_back,
            load_error_message: config.load_error_message.clone(),
            retry_label: config.retry_label.clone(),
            subscriptions,
        };
        log::info!(
            "Shell mounted (target {}, {} back, consent gate {})",
            shell.nav.target(),
            if hardware_back { "hardware" } else { "overlay" },
            if shell.consent.is_some() { "on" } else { "off" },
        );
        shell.pump(platform);
        Ok(shell)
    }

    /// Advance outstanding work: consent prompt, launch-URL lookup, queued
    /// inbound links, and browser mount state. Call once per loop turn.
    pub fn pump<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        self.poll_consent(platform);
        self.poll_launch_url(platform);
        self.drain_links(platform);
        self.sync_browser(platform);
    }

    fn poll_consent<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        if self.load.state() != LoadState::Pending {
            return;
        }
        let Some(gate) = self.consent.as_mut() else {
            return;
        };
        if gate.poll(platform).is_some() {
            if let Err(e) = self.load.resolve_gate() {
                log::warn!("{e}");
            }
        }
    }

    fn poll_launch_url<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        if !self.launch_url_pending {
            return;
        }
        let initial = match platform.poll_initial_url() {
            Ok(InitialUrl::Waiting) => return,
            Ok(InitialUrl::Absent) => None,
            Ok(InitialUrl::Present(url)) => Some(url),
            Err(e) => {
                log::warn!("Launch URL lookup failed, using default target: {e}");
                None
            },
        };
        self.launch_url_pending = false;
        self.links.apply_initial(initial.as_deref(), &mut self.nav);
    }

    /// Runtime links wait in the inbox until the launch URL is applied, so
    /// a late launch URL never overrides a newer link.
    fn drain_links<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        if self.launch_url_pending {
            return;
        }
        while !self.links.inbox().is_empty() {
            if let Err(e) = self.links.drain_pending(&mut self.nav, platform) {
                log::warn!("Browser failed to open inbound link: {e}");
                self.fail_load();
            }
        }
    }

    /// Mount or unmount the browser to match the load state. Nothing is
    /// mounted before the initial target is known.
    fn sync_browser<B: BrowserService + ?Sized>(&mut self, browsers: &mut B) {
        let wants_browser = self.load.state().shows_browser() && !self.launch_url_pending;
        if wants_browser && !self.nav.is_mounted() {
            self.scroll.reset();
            if let Err(e) = self.nav.mount_browser(browsers) {
                log::warn!("Could not create browser surface: {e}");
                self.fail_load();
            }
        } else if !wants_browser && self.nav.unmount_browser() {
            self.scroll.reset();
        }
    }

    fn fail_load(&mut self) {
        match self.load.fail() {
            Ok(_) => {
                self.nav.unmount_browser();
                self.scroll.reset();
            },
            Err(e) => log::debug!("Load failure ignored: {e}"),
        }
    }

    // -- Host input -----------------------------------------------------------

    /// Feed a signal from the embedded browser. Ignored while no browser is
    /// mounted.
    pub fn handle_browser_event(&mut self, event: BrowserEvent) {
        if !self.nav.is_mounted() {
            log::debug!("Dropping {event:?}: no browser mounted");
            return;
        }
        match event {
            BrowserEvent::LoadError => {
                log::warn!("Browser failed to load {}", self.nav.target());
                self.fail_load();
            },
            BrowserEvent::Scroll { offset_y } => {
                let sample = self.scroll.observe(offset_y);
                log::debug!(
                    "Scroll to {:.1} ({})",
                    sample.offset_y,
                    if sample.descending { "down" } else { "up/still" }
                );
            },
        }
    }

    /// User pressed retry on the error screen. Re-renders the browser at
    /// the unchanged target.
    pub fn retry<B: BrowserService + ?Sized>(&mut self, browsers: &mut B) -> Result<()> {
        self.load.retry()?;
        self.sync_browser(browsers);
        Ok(())
    }

    /// Back request. `true` if handled by the browser's history.
    pub fn request_back(&self) -> bool {
        self.nav.request_back()
    }

    /// The floating back affordance was tapped.
    pub fn tap_back_affordance(&self) {
        self.nav.tap_back_affordance();
    }

    /// Tear down: release subscriptions and drop the browser surface.
    pub fn unmount(mut self) {
        self.subscriptions.clear();
        self.nav.unmount_browser();
        log::info!("Shell unmounted");
    }

    // -- Queries --------------------------------------------------------------

    pub fn view(&self) -> ShellView {
        let screen = match self.load.state() {
            LoadState::Pending => Screen::Placeholder,
            LoadState::Ready if self.launch_url_pending => Screen::Placeholder,
            LoadState::Ready => Screen::Browser {
                url: self.nav.target().as_str().to_string(),
            },
            LoadState::Errored => Screen::LoadError {
                message: self.load_error_message.clone(),
                retry_label: self.retry_label.clone(),
            },
        };
        ShellView {
            screen,
            back_affordance: (!self.hardware_back).then(|| self.scroll.affordance_visible()),
        }
    }

    pub fn target(&self) -> &AdmittedUrl {
        self.nav.target()
    }

    pub fn load_state(&self) -> LoadState {
        self.load.state()
    }

    pub fn is_browser_mounted(&self) -> bool {
        self.nav.is_mounted()
    }

    pub fn scroll_sample(&self) -> ScrollSample {
        self.scroll.sample()
    }

    /// Recorded consent outcome, once the gate has resolved.
    pub fn consent_outcome(&self) -> Option<ConsentOutcome> {
        self.consent.as_ref().and_then(ConsentGate::outcome)
    }

    /// Value handed on to page scripts for tracking decisions.
    pub fn tracking_value(&self) -> Option<&'static str> {
        self.consent_outcome().map(ConsentOutcome::tracking_value)
    }

    pub fn has_hardware_back(&self) -> bool {
        self.hardware_back
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}
