use std::{thread, time::Duration};

use tauri::{AppHandle, Emitter, ExitRequestApi, Manager};

use crate::{
    append_desktop_log, append_shutdown_log,
    quit_coordinator::{ExitDecision, PendingQuit, QuitCoordinator, QuitPhase, SaveFinishedOutcome},
    window_manager, QuitState, MAIN_WINDOW_TYPE, WILL_QUIT_EVENT,
};

/// `code == None` is the shell's automatic exit after the last window closed.
/// macOS apps keep running without windows until the user quits.
pub(crate) fn stays_alive_without_windows(
    code: Option<i32>,
    phase: QuitPhase,
    is_macos: bool,
) -> bool {
    code.is_none() && is_macos && phase != QuitPhase::Exiting
}

pub(crate) fn handle_save_started(app_handle: &AppHandle) {
    let state = app_handle.state::<QuitState>();
    let phase = state.with_coordinator(|coordinator| {
        coordinator.save_started();
        coordinator.phase()
    });
    append_desktop_log(&format!("workspace save started (phase: {phase:?})"));
}

pub(crate) fn handle_save_finished(app_handle: &AppHandle) {
    let state = app_handle.state::<QuitState>();
    match state.with_coordinator(QuitCoordinator::save_finished) {
        SaveFinishedOutcome::ReturnedToIdle => append_desktop_log("workspace save finished"),
        SaveFinishedOutcome::Ignored => {
            log::debug!("workspace save finished without a matching start; ignored")
        }
        SaveFinishedOutcome::CompleteQuit(pending) => {
            append_shutdown_log("workspace save finished, completing deferred quit");
            app_handle.exit(pending.exit_code);
        }
    }
}

fn send_will_quit(app_handle: &AppHandle) {
    let window = match window_manager::get_main_window(app_handle) {
        Ok(window) => window,
        Err(error) => {
            append_shutdown_log(&format!("{WILL_QUIT_EVENT} not delivered: {error}"));
            return;
        }
    };

    if let Err(error) = app_handle.emit_to(window.label(), WILL_QUIT_EVENT, ()) {
        log::error!(
            "failed to send {WILL_QUIT_EVENT} to window {}: {error}",
            window.label()
        );
    }
}

pub(crate) fn handle_exit_requested(app_handle: &AppHandle, code: Option<i32>, api: &ExitRequestApi) {
    let state = app_handle.state::<QuitState>();
    let phase = state.with_coordinator(|coordinator| coordinator.phase());
    if stays_alive_without_windows(code, phase, cfg!(target_os = "macos")) {
        api.prevent_exit();
        append_desktop_log("all windows closed; keeping the app running");
        return;
    }

    let exit_code = code.unwrap_or(0);
    let decision = state.with_coordinator(|coordinator| {
        coordinator.exit_requested(exit_code, || send_will_quit(app_handle))
    });

    match decision {
        ExitDecision::Proceed => {
            append_shutdown_log(&format!("exit requested (code {exit_code}); shutting down"));
        }
        ExitDecision::Defer(pending) => {
            api.prevent_exit();
            append_shutdown_log("exit requested while a workspace save is in progress; deferring");
            arm_quit_deadline(app_handle, pending, state.quit_timeout);
        }
        ExitDecision::AlreadyDeferred(_) => {
            api.prevent_exit();
            append_shutdown_log("exit requested again; still waiting for the workspace save");
        }
    }
}

fn arm_quit_deadline(app_handle: &AppHandle, pending: PendingQuit, timeout: Option<Duration>) {
    let Some(timeout) = timeout else {
        append_shutdown_log("no quit deadline configured; waiting for the save to finish");
        return;
    };

    let app_handle = app_handle.clone();
    let spawned = thread::Builder::new()
        .name("quit-deadline".to_string())
        .spawn(move || {
            thread::sleep(timeout);
            let state = app_handle.state::<QuitState>();
            let expired =
                state.with_coordinator(|coordinator| coordinator.quit_deadline_elapsed(pending.id));
            if let Some(pending) = expired {
                log::warn!(
                    "workspace save did not finish within {}ms; forcing exit",
                    timeout.as_millis()
                );
                app_handle.exit(pending.exit_code);
            }
        });

    if let Err(error) = spawned {
        log::error!("failed to arm quit deadline: {error}");
    }
}

pub(crate) fn handle_main_window_destroyed(app_handle: &AppHandle, label: &str) {
    if window_manager::window_type_of(label) != Some(MAIN_WINDOW_TYPE) {
        return;
    }
    window_manager::forget_window(app_handle, label);
    if window_manager::get_count_of_type_excluding(app_handle, MAIN_WINDOW_TYPE, label) > 0 {
        return;
    }

    let state = app_handle.state::<QuitState>();
    let was_saving = state.with_coordinator(|coordinator| coordinator.is_saving());
    if let Some(pending) = state.with_coordinator(QuitCoordinator::save_host_lost) {
        append_shutdown_log("last main window closed during a deferred quit; exiting");
        app_handle.exit(pending.exit_code);
    } else if was_saving {
        log::warn!("last main window closed while a workspace save was in progress");
    }
}
