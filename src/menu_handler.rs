use tauri::AppHandle;

use crate::{append_desktop_log, append_shutdown_log, menu_actions, window_actions};

pub fn handle_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match menu_actions::action_from_menu_id(menu_id) {
        Some(menu_actions::AppMenuAction::NewWindow) => {
            window_actions::open_main_window(app_handle, append_desktop_log);
        }
        Some(menu_actions::AppMenuAction::ReloadWindow) => {
            window_actions::reload_main_window(app_handle, append_desktop_log)
        }
        Some(menu_actions::AppMenuAction::ToggleDevtools) => {
            window_actions::toggle_main_window_devtools(app_handle, append_desktop_log)
        }
        Some(menu_actions::AppMenuAction::Quit) => {
            // Routed through RunEvent::ExitRequested so an in-flight save is respected.
            append_shutdown_log("menu quit requested");
            app_handle.exit(0);
        }
        None => {}
    }
}
