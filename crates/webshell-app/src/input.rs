use webshell_core::event::HostEvent;

use crate::app_state::AppState;

/// Result of handling a single host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Route one host event into the shell.
pub fn handle_event(event: &HostEvent, state: &mut AppState) -> InputResult {
    state.event_counter += 1;
    match event {
        HostEvent::Quit => return InputResult::Quit,
        HostEvent::BackPressed => {
            // The shell's listener answers through the platform; nobody
            // handling it means the platform default, which leaves the app.
            if !state.platform.press_back() {
                log::info!("Back press not handled, leaving app");
                return InputResult::Quit;
            }
        },
        HostEvent::LinkOpened(url) => state.platform.open_url(url),
        HostEvent::BackAffordanceTapped => match &state.shell {
            Some(shell) if !shell.has_hardware_back() => shell.tap_back_affordance(),
            Some(_) => log::debug!("No back affordance on a device with a back button"),
            None => log::debug!("Back affordance tapped with no shell mounted"),
        },
        HostEvent::Browser(browser_event) => {
            if let Some(shell) = state.shell.as_mut() {
                shell.handle_browser_event(*browser_event);
            }
        },
        HostEvent::Retry => {
            if let Some(shell) = state.shell.as_mut() {
                if let Err(e) = shell.retry(&mut state.platform) {
                    log::warn!("Retry ignored: {e}");
                }
            }
        },
        HostEvent::Unmount => {
            if let Some(shell) = state.shell.take() {
                shell.unmount();
            }
        },
    }

    if let Some(shell) = state.shell.as_mut() {
        shell.pump(&mut state.platform);
    }
    InputResult::Continue
}
