use tauri::{AppHandle, Listener};

use crate::{quit_flow, SAVE_FINISHED_EVENT, SAVE_STARTED_EVENT};

pub(crate) fn register_save_listeners(app_handle: &AppHandle) {
    let started_handle = app_handle.clone();
    app_handle.listen_any(SAVE_STARTED_EVENT, move |_| {
        quit_flow::handle_save_started(&started_handle)
    });

    let finished_handle = app_handle.clone();
    app_handle.listen_any(SAVE_FINISHED_EVENT, move |_| {
        quit_flow::handle_save_finished(&finished_handle)
    });
}
