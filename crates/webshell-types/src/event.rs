//! Events crossing the boundary between the host and the shell.
//!
//! The embedded browser only ever reports two signals upward: a load
//! failure and a vertical scroll offset. Everything else the host feeds
//! the shell is a user gesture or an external link.

/// A signal emitted by the embedded browser surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrowserEvent {
    /// The surface failed to load its current target.
    LoadError,
    /// The page was scrolled to a new vertical offset (pixels from top).
    Scroll { offset_y: f64 },
}

/// A host-level event, as read by a desktop driver.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The hardware/software back button outside the browser was pressed.
    BackPressed,
    /// The on-screen back affordance was tapped.
    BackAffordanceTapped,
    /// An external link was opened while the process is running.
    LinkOpened(String),
    /// The embedded browser reported something.
    Browser(BrowserEvent),
    /// The user pressed the retry control on the error screen.
    Retry,
    /// The shell component is being torn down.
    Unmount,
    /// The host wants to exit.
    Quit,
}

impl HostEvent {
    /// Parse a single driver command line.
    ///
    /// Recognised commands: `back`, `tap-back`, `link <url>`,
    /// `scroll <offset>`, `load-error`, `retry`, `unmount`, `quit`.
    /// Returns `None` for blank or unrecognised lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };
        match (cmd, arg) {
            ("back", "") => Some(Self::BackPressed),
            ("tap-back", "") => Some(Self::BackAffordanceTapped),
            ("link", url) if !url.is_empty() => Some(Self::LinkOpened(url.to_string())),
            ("scroll", offset) => offset
                .parse::<f64>()
                .ok()
                .filter(|y| y.is_finite())
                .map(|offset_y| Self::Browser(BrowserEvent::Scroll { offset_y })),
            ("load-error", "") => Some(Self::Browser(BrowserEvent::LoadError)),
            ("retry", "") => Some(Self::Retry),
            ("unmount", "") => Some(Self::Unmount),
            ("quit", "") => Some(Self::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(HostEvent::parse("back"), Some(HostEvent::BackPressed));
        assert_eq!(
            HostEvent::parse("tap-back"),
            Some(HostEvent::BackAffordanceTapped)
        );
        assert_eq!(HostEvent::parse("retry"), Some(HostEvent::Retry));
        assert_eq!(HostEvent::parse("unmount"), Some(HostEvent::Unmount));
        assert_eq!(HostEvent::parse("  quit  "), Some(HostEvent::Quit));
        assert_eq!(
            HostEvent::parse("load-error"),
            Some(HostEvent::Browser(BrowserEvent::LoadError))
        );
    }

    #[test]
    fn parse_link_keeps_url_verbatim() {
        assert_eq!(
            HostEvent::parse("link https://www.example.org/promo?x=1"),
            Some(HostEvent::LinkOpened(
                "https://www.example.org/promo?x=1".to_string()
            ))
        );
        assert_eq!(HostEvent::parse("link"), None);
    }

    #[test]
    fn parse_scroll_offset() {
        assert_eq!(
            HostEvent::parse("scroll 120.5"),
            Some(HostEvent::Browser(BrowserEvent::Scroll { offset_y: 120.5 }))
        );
        assert_eq!(HostEvent::parse("scroll abc"), None);
        assert_eq!(HostEvent::parse("scroll NaN"), None);
        assert_eq!(HostEvent::parse("scroll"), None);
    }

    #[test]
    fn parse_rejects_unknown_and_extra_args() {
        assert_eq!(HostEvent::parse(""), None);
        assert_eq!(HostEvent::parse("forward"), None);
        assert_eq!(HostEvent::parse("back now"), None);
    }
}
