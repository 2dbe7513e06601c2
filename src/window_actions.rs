use tauri::{AppHandle, WebviewWindow};

use crate::{dev_tools, file_open, window_manager, MAIN_WINDOW_TYPE};

pub fn open_main_window<F>(app_handle: &AppHandle, log: F) -> Option<WebviewWindow>
where
    F: Fn(&str),
{
    match window_manager::build_window_of_type(
        app_handle,
        MAIN_WINDOW_TYPE,
        Some(Box::new(file_open::on_main_window_ready)),
    ) {
        Ok(window) => Some(window),
        Err(error) => {
            log(&format!("open_main_window failed: {error}"));
            None
        }
    }
}

pub fn ensure_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    if window_manager::get_count_of_type(app_handle, MAIN_WINDOW_TYPE) == 0 {
        open_main_window(app_handle, log);
    }
}

pub fn focus_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let window = match window_manager::get_main_window(app_handle) {
        Ok(window) => window,
        Err(error) => {
            log(&format!("focus_main_window skipped: {error}"));
            return;
        }
    };

    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}

pub fn reload_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let window = match window_manager::get_main_window(app_handle) {
        Ok(window) => window,
        Err(error) => {
            log(&format!("reload_main_window skipped: {error}"));
            return;
        }
    };

    if let Err(error) = window.eval("window.location.reload()") {
        log(&format!("failed to reload main window: {error}"));
    }
}

pub fn toggle_main_window_devtools<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    match window_manager::get_main_window(app_handle) {
        Ok(window) => dev_tools::toggle_dev_tools(&window, log),
        Err(error) => log(&format!("toggle_main_window_devtools skipped: {error}")),
    }
}
