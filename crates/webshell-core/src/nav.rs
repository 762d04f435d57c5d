//! Navigation controller: active target, mounted browser, back routing.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use webshell_platform::services::{BackButtonService, BackListener, BrowserService, BrowserSurface};
use webshell_platform::subscription::Subscription;
use webshell_types::error::Result;

use crate::allowlist::AdmittedUrl;

/// Shared slot for the mounted browser surface.
///
/// Empty until the browser is first shown and again after it is torn
/// down. Every operation on an empty slot is a defined no-op.
#[derive(Clone, Default)]
pub struct BrowserRef {
    slot: Rc<RefCell<Option<Box<dyn BrowserSurface>>>>,
}

impl BrowserRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Step the mounted browser back. Returns `false` if nothing is mounted.
    pub fn go_back(&self) -> bool {
        match self.slot.borrow_mut().as_mut() {
            Some(browser) => {
                browser.go_back();
                true
            },
            None => false,
        }
    }

    /// Navigate the mounted browser. Returns `Ok(false)` if nothing is
    /// mounted.
    pub fn load(&self, url: &str) -> Result<bool> {
        match self.slot.borrow_mut().as_mut() {
            Some(browser) => browser.load(url).map(|()| true),
            None => Ok(false),
        }
    }

    fn mount(&self, browser: Box<dyn BrowserSurface>) {
        *self.slot.borrow_mut() = Some(browser);
    }

    fn unmount(&self) -> bool {
        self.slot.borrow_mut().take().is_some()
    }
}

impl fmt::Debug for BrowserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserRef")
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

/// Owns the navigation target and the handle to the embedded browser.
#[derive(Debug)]
pub struct NavigationController {
    target: AdmittedUrl,
    browser: BrowserRef,
}

impl NavigationController {
    pub fn new(default_target: AdmittedUrl) -> Self {
        Self {
            target: default_target,
            browser: BrowserRef::new(),
        }
    }

    /// What the browser should be showing.
    pub fn target(&self) -> &AdmittedUrl {
        &self.target
    }

    /// Replace the target without touching a mounted browser. The next
    /// mount opens it.
    pub fn set_target(&mut self, target: AdmittedUrl) {
        self.target = target;
    }

    /// Replace the target and, if a browser is mounted, navigate it.
    pub fn navigate(&mut self, target: AdmittedUrl) -> Result<()> {
        self.target = target;
        self.browser.load(self.target.as_str())?;
        Ok(())
    }

    /// Mount a fresh browser surface at the current target.
    pub fn mount_browser<B: BrowserService + ?Sized>(&mut self, browsers: &mut B) -> Result<()> {
        let surface = browsers.create_browser(self.target.as_str())?;
        self.browser.mount(surface);
        log::debug!("Browser mounted at {}", self.target);
        Ok(())
    }

    /// Drop the mounted surface. Returns `true` if one was mounted.
    pub fn unmount_browser(&mut self) -> bool {
        let was_mounted = self.browser.unmount();
        if was_mounted {
            log::debug!("Browser unmounted");
        }
        was_mounted
    }

    pub fn is_mounted(&self) -> bool {
        self.browser.is_mounted()
    }

    /// Route a back request into the browser's history.
    ///
    /// `true` means handled: the platform must not also run its default
    /// back action. `false` (nothing mounted) lets the default proceed.
    pub fn request_back(&self) -> bool {
        self.browser.go_back()
    }

    /// Back request from the on-screen affordance. There is no platform
    /// default behind it, so the handled flag is not consulted.
    pub fn tap_back_affordance(&self) {
        let _ = self.request_back();
    }

    /// Listener routing hardware back presses into [`request_back`](Self::request_back).
    pub fn back_listener(&self) -> Box<BackListener> {
        let browser = self.browser.clone();
        Box::new(move || browser.go_back())
    }

    /// Wire the hardware back button for as long as the guard lives.
    pub fn subscribe_hardware_back<B: BackButtonService + ?Sized>(
        &self,
        buttons: &mut B,
    ) -> Subscription {
        buttons.on_back_press(self.back_listener())
    }
}
