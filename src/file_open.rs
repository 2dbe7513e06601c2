use std::path::{Path, PathBuf};

use tauri::{AppHandle, Emitter, Manager};
use url::Url;

use crate::{
    append_desktop_log, window_manager, LaunchState, LoadArchiveFilePayload,
    LOAD_ARCHIVE_FILE_EVENT,
};

/// Holds a file the process was asked to open until the first main window is
/// ready to receive it. A later request replaces an earlier one.
#[derive(Debug, Default)]
pub(crate) struct PendingLaunchFile {
    ui_ready: bool,
    pending: Option<PathBuf>,
}

impl PendingLaunchFile {
    /// Returns the path back when it can be delivered right away.
    pub(crate) fn offer(&mut self, path: PathBuf) -> Option<PathBuf> {
        if self.ui_ready {
            return Some(path);
        }
        self.pending = Some(path);
        None
    }

    pub(crate) fn take_on_ready(&mut self) -> Option<PathBuf> {
        self.ui_ready = true;
        self.pending.take()
    }
}

fn file_argument(args: &[String]) -> Option<&str> {
    args.get(1)
        .map(|arg| arg.trim())
        .filter(|arg| !arg.is_empty() && !arg.starts_with('-'))
}

pub(crate) fn initial_file_from_args<I>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    file_argument(&args).map(PathBuf::from)
}

pub(crate) fn resolve_second_instance_file(args: &[String], cwd: &str) -> Option<PathBuf> {
    let path = PathBuf::from(file_argument(args)?);
    if path.is_absolute() || cwd.trim().is_empty() {
        return Some(path);
    }
    Some(Path::new(cwd).join(path))
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub(crate) fn paths_from_opened_urls(urls: &[Url]) -> Vec<PathBuf> {
    urls.iter()
        .filter(|url| url.scheme() == "file")
        .filter_map(|url| url.to_file_path().ok())
        .collect()
}

pub(crate) fn load_file(app_handle: &AppHandle, path: &Path, window_label: Option<&str>) {
    let target = match window_label {
        Some(label) => app_handle
            .get_webview_window(label)
            .ok_or_else(|| format!("window {label} not found")),
        None => window_manager::get_main_window(app_handle),
    };
    let window = match target {
        Ok(window) => window,
        Err(error) => {
            log::warn!("cannot load file {}: {error}", path.display());
            return;
        }
    };

    let payload = LoadArchiveFilePayload {
        path: path.to_string_lossy().to_string(),
    };
    if let Err(error) = app_handle.emit_to(window.label(), LOAD_ARCHIVE_FILE_EVENT, payload) {
        log::error!(
            "failed to send {} to window {}: {error}",
            LOAD_ARCHIVE_FILE_EVENT,
            window.label()
        );
        return;
    }
    append_desktop_log(&format!(
        "requested window {} to open {}",
        window.label(),
        path.display()
    ));

    if let Err(error) = window.set_focus() {
        log::debug!("failed to focus window {}: {error}", window.label());
    }
}

pub(crate) fn offer_file(app_handle: &AppHandle, path: PathBuf) {
    let Some(state) = app_handle.try_state::<LaunchState>() else {
        log::warn!("launch state is unavailable; dropping {}", path.display());
        return;
    };

    match state.with_pending_file(|pending| pending.offer(path.clone())) {
        Some(path) => load_file(app_handle, &path, None),
        None => append_desktop_log(&format!(
            "buffered {} until the main window is ready",
            path.display()
        )),
    }
}

pub(crate) fn on_main_window_ready(app_handle: &AppHandle, window_label: &str) {
    let Some(state) = app_handle.try_state::<LaunchState>() else {
        return;
    };

    if let Some(path) = state.with_pending_file(PendingLaunchFile::take_on_ready) {
        load_file(app_handle, &path, Some(window_label));
    }
}
