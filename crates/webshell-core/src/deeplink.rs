//! Deep-link admission.
//!
//! Links reach the shell two ways: once at launch (the URL that started
//! the process, if any) and at any time while running. Both go through the
//! allow-list before anything navigates. A rejected launch URL is dropped
//! silently; a rejected runtime link raises the configured notice.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use webshell_platform::services::{LinkService, NoticeService, UrlListener};
use webshell_platform::subscription::Subscription;
use webshell_types::config::ShellConfig;
use webshell_types::error::Result;
use webshell_types::notice::Notice;

use crate::allowlist::{AdmittedUrl, TrustedOrigins};
use crate::nav::NavigationController;

/// Outcome of checking a runtime link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDecision {
    Navigate(AdmittedUrl),
    Reject(Notice),
}

/// Queue between the platform's link listener and the resolver.
///
/// The listener only enqueues. Validation happens when the queue is
/// drained, before any navigation.
#[derive(Debug, Clone, Default)]
pub struct LinkInbox {
    queue: Rc<RefCell<VecDeque<String>>>,
}

impl LinkInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, url: &str) {
        self.queue.borrow_mut().push_back(url.to_string());
    }

    pub fn pop(&self) -> Option<String> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// A platform listener feeding this inbox.
    pub fn listener(&self) -> Box<UrlListener> {
        let inbox = self.clone();
        Box::new(move |url: &str| inbox.push(url))
    }
}

/// Validates inbound links and applies the admitted ones.
pub struct DeepLinkResolver {
    origins: TrustedOrigins,
    rejection: Notice,
    inbox: LinkInbox,
}

impl DeepLinkResolver {
    pub fn new(origins: TrustedOrigins, rejection: Notice) -> Self {
        Self {
            origins,
            rejection,
            inbox: LinkInbox::new(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(
            TrustedOrigins::from_config(config),
            config.rejection_notice.clone(),
        )
    }

    pub fn inbox(&self) -> &LinkInbox {
        &self.inbox
    }

    // -- Decisions ------------------------------------------------------------

    /// Launch URL check. Absent and rejected URLs both yield `None`.
    pub fn resolve_initial(&self, initial: Option<&str>) -> Option<AdmittedUrl> {
        let url = initial?;
        let admitted = self.origins.admit(url);
        if admitted.is_none() {
            log::warn!("Ignoring launch URL outside trusted origins: {url}");
        }
        admitted
    }

    /// Runtime link check.
    pub fn resolve_runtime(&self, url: &str) -> LinkDecision {
        match self.origins.admit(url) {
            Some(admitted) => LinkDecision::Navigate(admitted),
            None => LinkDecision::Reject(self.rejection.clone()),
        }
    }

    // -- Application ----------------------------------------------------------

    /// Apply the launch URL before the browser is first mounted. Returns
    /// `true` if the target changed.
    pub fn apply_initial(&self, initial: Option<&str>, nav: &mut NavigationController) -> bool {
        match self.resolve_initial(initial) {
            Some(target) => {
                log::info!("Opening launch URL {target}");
                nav.set_target(target);
                true
            },
            None => false,
        }
    }

    /// Apply one runtime link: navigate when admitted, otherwise show the
    /// rejection notice and leave the target untouched.
    pub fn apply_runtime<N: NoticeService + ?Sized>(
        &self,
        url: &str,
        nav: &mut NavigationController,
        notices: &mut N,
    ) -> Result<LinkDecision> {
        let decision = self.resolve_runtime(url);
        match &decision {
            LinkDecision::Navigate(target) => {
                log::info!("Opening inbound link {target}");
                nav.navigate(target.clone())?;
            },
            LinkDecision::Reject(notice) => {
                log::warn!("Rejected inbound link {url}");
                if let Err(e) = notices.show_notice(notice) {
                    log::warn!("Could not show rejection notice: {e}");
                }
            },
        }
        Ok(decision)
    }

    /// Subscribe the inbox to the platform's runtime link stream.
    pub fn listen<L: LinkService + ?Sized>(&self, links: &mut L) -> Subscription {
        links.on_url(self.inbox.listener())
    }

    /// Apply every queued runtime link in arrival order.
    ///
    /// Stops at the first navigation error; links still queued stay queued.
    pub fn drain_pending<N: NoticeService + ?Sized>(
        &self,
        nav: &mut NavigationController,
        notices: &mut N,
    ) -> Result<usize> {
        let mut applied = 0;
        while let Some(url) = self.inbox.pop() {
            self.apply_runtime(&url, nav, notices)?;
            applied += 1;
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webshell_platform::HeadlessPlatform;

    fn resolver() -> DeepLinkResolver {
        DeepLinkResolver::from_config(&ShellConfig::default())
    }

    fn nav() -> NavigationController {
        NavigationController::new(AdmittedUrl::default_target(&ShellConfig::default()))
    }

    #[test]
    fn initial_trusted_url_becomes_target() {
        let mut nav = nav();
        let changed = resolver().apply_initial(Some("https://www.example.org/promo"), &mut nav);
        assert!(changed);
        assert_eq!(nav.target().as_str(), "https://www.example.org/promo");
    }

    #[test]
    fn initial_untrusted_url_keeps_default() {
        let mut nav = nav();
        let changed = resolver().apply_initial(Some("https://attacker.test/phish"), &mut nav);
        assert!(!changed);
        assert_eq!(nav.target().as_str(), "https://example.org/");
    }

    #[test]
    fn absent_initial_url_keeps_default() {
        let mut nav = nav();
        assert!(!resolver().apply_initial(None, &mut nav));
        assert_eq!(nav.target().as_str(), "https://example.org/");
    }

    #[test]
    fn runtime_rejection_shows_notice_and_keeps_target() {
        let mut nav = nav();
        let mut platform = HeadlessPlatform::new();
        let decision = resolver()
            .apply_runtime("http://example.org/menu", &mut nav, &mut platform)
            .unwrap();
        assert_eq!(decision, LinkDecision::Reject(Notice::rejected_link()));
        assert_eq!(platform.notices(), &[Notice::rejected_link()]);
        assert_eq!(nav.target().as_str(), "https://example.org/");
    }

    #[test]
    fn runtime_admission_navigates_without_notice() {
        let mut nav = nav();
        let mut platform = HeadlessPlatform::new();
        let decision = resolver()
            .apply_runtime("https://example.org/menu", &mut nav, &mut platform)
            .unwrap();
        assert!(matches!(decision, LinkDecision::Navigate(_)));
        assert!(platform.notices().is_empty());
        assert_eq!(nav.target().as_str(), "https://example.org/menu");
    }

    #[test]
    fn rejected_link_never_reaches_mounted_browser() {
        let mut nav = nav();
        let mut platform = HeadlessPlatform::new();
        nav.mount_browser(&mut platform).unwrap();
        resolver()
            .apply_runtime("https://attacker.test/", &mut nav, &mut platform)
            .unwrap();
        assert!(platform.journal().loads.is_empty());
    }

    #[test]
    fn listened_links_are_queued_then_drained_in_order() {
        let mut nav = nav();
        let mut platform = HeadlessPlatform::new();
        let resolver = resolver();
        let _sub = resolver.listen(&mut platform);

        platform.open_url("https://example.org/a");
        platform.open_url("https://attacker.test/");
        platform.open_url("https://www.example.org/b");
        assert_eq!(resolver.inbox().len(), 3);
        // Nothing navigates before the queue is drained.
        assert_eq!(nav.target().as_str(), "https://example.org/");

        let applied = resolver.drain_pending(&mut nav, &mut platform).unwrap();
        assert_eq!(applied, 3);
        assert!(resolver.inbox().is_empty());
        assert_eq!(nav.target().as_str(), "https://www.example.org/b");
        assert_eq!(platform.notices().len(), 1);
    }

    #[test]
    fn released_listener_stops_queueing() {
        let mut platform = HeadlessPlatform::new();
        let resolver = resolver();
        let sub = resolver.listen(&mut platform);
        drop(sub);
        platform.open_url("https://example.org/a");
        assert!(resolver.inbox().is_empty());
        assert_eq!(platform.url_listener_count(), 0);
    }
}
