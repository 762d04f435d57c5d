//! Platform collaborator abstractions for webshell.
//!
//! The shell never talks to a real web view, link dispatcher or permission
//! prompt directly. It goes through the service traits in [`services`],
//! subscribes to platform signals through [`subscription::Listeners`], and
//! ships with a [`HeadlessPlatform`] for desktop runs and tests.

pub mod headless;
pub mod services;
pub mod subscription;

pub use headless::{BrowserJournal, HeadlessBrowser, HeadlessPlatform};
pub use services::{
    BackButtonService, BackListener, BrowserService, BrowserSurface, ConsentOutcome, InitialUrl,
    LinkService, NoticeService, PermissionPoll, PermissionService, Platform, UrlListener,
};
pub use subscription::{Listeners, Subscription};
