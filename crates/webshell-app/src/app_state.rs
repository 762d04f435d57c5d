use webshell_core::Shell;
use webshell_core::ShellView;
use webshell_core::platform::HeadlessPlatform;

/// All mutable state of the desktop driver.
pub struct AppState {
    pub platform: HeadlessPlatform,
    /// `None` once the shell has been unmounted.
    pub shell: Option<Shell>,
    /// Last view written to the log, to report only changes.
    pub last_view: Option<ShellView>,
    pub event_counter: u64,
}

impl AppState {
    pub fn new(platform: HeadlessPlatform, shell: Shell) -> Self {
        Self {
            platform,
            shell: Some(shell),
            last_view: None,
            event_counter: 0,
        }
    }
}
