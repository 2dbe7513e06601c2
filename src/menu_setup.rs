use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem, Submenu},
    AppHandle, Wry,
};

use crate::{menu_actions, APP_DISPLAY_NAME};

fn build_file_menu(app_handle: &AppHandle) -> tauri::Result<Submenu<Wry>> {
    let new_window_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_NEW_WINDOW,
        "New Window",
        true,
        Some("CmdOrCtrl+N"),
    )?;
    let quit_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_QUIT,
        format!("Quit {APP_DISPLAY_NAME}"),
        true,
        Some("CmdOrCtrl+Q"),
    )?;
    let separator = PredefinedMenuItem::separator(app_handle)?;

    Submenu::with_items(
        app_handle,
        "File",
        true,
        &[&new_window_item, &separator, &quit_item],
    )
}

fn build_edit_menu(app_handle: &AppHandle) -> tauri::Result<Submenu<Wry>> {
    Submenu::with_items(
        app_handle,
        "Edit",
        true,
        &[
            &PredefinedMenuItem::undo(app_handle, None)?,
            &PredefinedMenuItem::redo(app_handle, None)?,
            &PredefinedMenuItem::separator(app_handle)?,
            &PredefinedMenuItem::cut(app_handle, None)?,
            &PredefinedMenuItem::copy(app_handle, None)?,
            &PredefinedMenuItem::paste(app_handle, None)?,
            &PredefinedMenuItem::select_all(app_handle, None)?,
        ],
    )
}

fn build_view_menu(app_handle: &AppHandle) -> tauri::Result<Submenu<Wry>> {
    let reload_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_RELOAD_WINDOW,
        "Reload",
        true,
        Some("CmdOrCtrl+R"),
    )?;
    let devtools_item = MenuItem::with_id(
        app_handle,
        menu_actions::MENU_TOGGLE_DEVTOOLS,
        "Toggle Developer Tools",
        cfg!(debug_assertions),
        Some("Alt+CmdOrCtrl+I"),
    )?;

    Submenu::with_items(app_handle, "View", true, &[&reload_item, &devtools_item])
}

#[cfg(target_os = "macos")]
fn build_app_submenu(app_handle: &AppHandle) -> tauri::Result<Submenu<Wry>> {
    Submenu::with_items(
        app_handle,
        APP_DISPLAY_NAME,
        true,
        &[
            &PredefinedMenuItem::about(app_handle, None, None)?,
            &PredefinedMenuItem::separator(app_handle)?,
            &PredefinedMenuItem::hide(app_handle, None)?,
            &PredefinedMenuItem::hide_others(app_handle, None)?,
            &PredefinedMenuItem::show_all(app_handle, None)?,
        ],
    )
}

pub fn build_app_menu(app_handle: &AppHandle) -> tauri::Result<Menu<Wry>> {
    let file_menu = build_file_menu(app_handle)?;
    let edit_menu = build_edit_menu(app_handle)?;
    let view_menu = build_view_menu(app_handle)?;

    #[cfg(target_os = "macos")]
    {
        let app_menu = build_app_submenu(app_handle)?;
        return Menu::with_items(
            app_handle,
            &[&app_menu, &file_menu, &edit_menu, &view_menu],
        );
    }

    #[cfg(not(target_os = "macos"))]
    Menu::with_items(app_handle, &[&file_menu, &edit_menu, &view_menu])
}
