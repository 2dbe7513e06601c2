use std::env;

use tauri::{webview::PageLoadEvent, AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    app_config, append_desktop_log, append_startup_log, append_shutdown_log, file_open,
    ipc_events, logging, menu_handler, menu_setup, persisted_state, quit_flow, window_actions,
    window_manager, AppStateStore, LaunchState, QuitState, WindowRegistry,
};

fn handle_second_instance(app_handle: &AppHandle, args: Vec<String>, cwd: String) {
    append_desktop_log("second instance launched; forwarding to the running app");
    window_actions::ensure_main_window(app_handle, append_desktop_log);
    if let Some(path) = file_open::resolve_second_instance_file(&args, &cwd) {
        file_open::offer_file(app_handle, path);
    }
    window_actions::focus_main_window(app_handle, append_desktop_log);
}

fn show_startup_error(app_handle: &AppHandle, message: &str) {
    log::error!("Buttercup startup failed: {message}");
    app_handle.exit(1);
}

pub(crate) fn run() {
    crate::crash_report::install_panic_hook();

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, args, cwd| {
            handle_second_instance(app, args, cwd)
        }))
        .plugin(logging::build_log_plugin())
        .plugin(tauri_plugin_process::init())
        .manage(QuitState::new(app_config::resolve_quit_timeout()))
        .manage(LaunchState::default())
        .manage(WindowRegistry::default())
        .menu(menu_setup::build_app_menu)
        .on_menu_event(|app_handle, event| {
            menu_handler::handle_menu_event(app_handle, event.id().as_ref())
        })
        .invoke_handler(tauri::generate_handler![
            crate::bridge_commands::desktop_bridge_is_desktop_runtime,
            crate::bridge_commands::desktop_state_get,
            crate::bridge_commands::desktop_state_set,
            crate::bridge_commands::desktop_state_merge,
            crate::bridge_commands::desktop_quit_status,
        ])
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                quit_flow::handle_main_window_destroyed(window.app_handle(), window.label());
            }
        })
        .on_page_load(|webview, payload| {
            if let PageLoadEvent::Finished = payload.event() {
                window_manager::notify_window_ready(webview.app_handle(), webview.label());
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            append_startup_log("Buttercup starting up...");

            let app_data_dir = match app_handle.path().app_data_dir() {
                Ok(dir) => Some(dir),
                Err(error) => {
                    log::error!("failed to resolve app data directory: {error}");
                    None
                }
            };
            let storage =
                persisted_state::JsonStorage::new(app_config::resolve_state_dir(app_data_dir.as_deref()));
            match storage.dir() {
                Some(dir) => append_startup_log(&format!("state directory: {}", dir.display())),
                None => append_startup_log("state directory unavailable; state will not persist"),
            }
            let restored_state = persisted_state::restore_app_state(&storage);
            app.manage(AppStateStore::new(storage, restored_state));

            ipc_events::register_save_listeners(&app_handle);

            if cfg!(target_os = "windows") {
                if let Some(path) = file_open::initial_file_from_args(env::args()) {
                    file_open::offer_file(&app_handle, path);
                }
            }

            if window_actions::open_main_window(&app_handle, append_startup_log).is_none() {
                show_startup_error(&app_handle, "Main window could not be created.");
            }
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                quit_flow::handle_exit_requested(app_handle, code, &api);
            }
            RunEvent::Exit => {
                if let Some(store) = app_handle.try_state::<AppStateStore>() {
                    store.flush_pending();
                }
                append_shutdown_log("desktop process exiting");
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                window_actions::ensure_main_window(app_handle, append_desktop_log);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Opened { urls } => {
                for path in file_open::paths_from_opened_urls(&urls) {
                    file_open::offer_file(app_handle, path);
                }
            }
            _ => {}
        });
}
