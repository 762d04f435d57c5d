//! webshell desktop entry point.
//!
//! Mounts the shell on the headless platform and replays host events read
//! from stdin, one command per line: `back`, `tap-back`, `link <url>`,
//! `scroll <offset>`, `load-error`, `retry`, `unmount`, `quit`.
//! The first argument, if given, is treated as the URL that launched the
//! process. Set `WEBSHELL_OVERLAY_BACK=1` to simulate a device without a
//! hardware back button.

mod app_state;
mod input;
mod render;

use std::io::BufRead;

use anyhow::{Context, Result};

use app_state::AppState;
use webshell_core::Shell;
use webshell_core::config::ShellConfig;
use webshell_core::event::HostEvent;
use webshell_core::platform::HeadlessPlatform;

const SHELL_CONFIG: &str = include_str!("../shell.toml");

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config =
        ShellConfig::from_toml_str(SHELL_CONFIG).context("built-in shell.toml is invalid")?;
    log::info!(
        "Starting webshell ({} trusted origin(s), default {})",
        config.trusted_origins.len(),
        config.default_target,
    );

    let overlay_back = std::env::var("WEBSHELL_OVERLAY_BACK").is_ok_and(|v| v == "1");
    let mut platform = HeadlessPlatform::new().with_hardware_back(!overlay_back);
    if let Some(launch_url) = std::env::args().nth(1) {
        log::info!("Launched through {launch_url}");
        platform = platform.with_initial_url(launch_url);
    }

    let shell = Shell::mount(&config, &mut platform)?;
    let mut state = AppState::new(platform, shell);
    render::update_view(&mut state);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading host events from stdin")?;
        let Some(event) = HostEvent::parse(&line) else {
            if !line.trim().is_empty() {
                log::warn!("Unrecognised command: {}", line.trim());
            }
            continue;
        };
        if input::handle_event(&event, &mut state) == input::InputResult::Quit {
            break;
        }
        render::update_view(&mut state);
    }

    if let Some(shell) = state.shell.take() {
        shell.unmount();
    }
    log::info!("webshell shut down cleanly");
    Ok(())
}
