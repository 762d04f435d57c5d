use webshell_core::{Screen, ShellView};

use crate::app_state::AppState;

/// Log the shell's view when it changed since the last call.
pub fn update_view(state: &mut AppState) {
    let Some(shell) = state.shell.as_ref() else {
        return;
    };
    let view = shell.view();
    if state.last_view.as_ref() == Some(&view) {
        return;
    }
    log::info!("[view #{}] {}", state.event_counter, describe(&view));
    state.last_view = Some(view);
}

fn describe(view: &ShellView) -> String {
    let screen = match &view.screen {
        Screen::Placeholder => "placeholder".to_string(),
        Screen::Browser { url } => format!("browser at {url}"),
        Screen::LoadError {
            message,
            retry_label,
        } => format!("error \"{message}\" [{retry_label}]"),
    };
    match view.back_affordance {
        Some(true) => format!("{screen}, back affordance shown"),
        Some(false) => format!("{screen}, back affordance hidden"),
        None => screen,
    }
}
