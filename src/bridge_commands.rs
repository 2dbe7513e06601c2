use serde_json::Value;
use tauri::{AppHandle, Manager};

use crate::{app_state_store, AppStateStore, DesktopBridgeResult, QuitState, QuitStatus};

#[tauri::command]
pub(crate) fn desktop_bridge_is_desktop_runtime() -> bool {
    true
}

#[tauri::command]
pub(crate) fn desktop_state_get(app_handle: AppHandle) -> Value {
    app_handle.state::<AppStateStore>().snapshot()
}

#[tauri::command]
pub(crate) fn desktop_state_set(app_handle: AppHandle, state: Value) -> DesktopBridgeResult {
    let store = app_handle.state::<AppStateStore>();
    match store.replace(state) {
        Ok(()) => {
            app_state_store::notify_state_changed(&app_handle);
            DesktopBridgeResult::success()
        }
        Err(error) => DesktopBridgeResult::failure(error),
    }
}

#[tauri::command]
pub(crate) fn desktop_state_merge(app_handle: AppHandle, patch: Value) -> DesktopBridgeResult {
    let store = app_handle.state::<AppStateStore>();
    match store.merge(patch) {
        Ok(changed) => {
            if changed {
                app_state_store::notify_state_changed(&app_handle);
            }
            DesktopBridgeResult::success()
        }
        Err(error) => DesktopBridgeResult::failure(error),
    }
}

#[tauri::command]
pub(crate) fn desktop_quit_status(app_handle: AppHandle) -> QuitStatus {
    let state = app_handle.state::<QuitState>();
    state.with_coordinator(|coordinator| QuitStatus {
        saving: coordinator.is_saving(),
        quit_pending: coordinator.is_quit_pending(),
    })
}
