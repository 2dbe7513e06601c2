use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::{
    app_types::lock_or_recover, append_desktop_log, dev_tools, APP_DISPLAY_NAME,
    MAIN_WINDOW_ENTRY, MAIN_WINDOW_TYPE,
};

pub(crate) type WindowReadyCallback = Box<dyn FnOnce(&AppHandle, &str) + Send>;

#[derive(Default)]
pub(crate) struct WindowRegistry {
    next_index: AtomicU64,
    ready_callbacks: Mutex<HashMap<String, WindowReadyCallback>>,
}

impl WindowRegistry {
    fn next_label(&self, window_type: &str) -> String {
        let index = self.next_index.fetch_add(1, Ordering::Relaxed) + 1;
        window_label_for(window_type, index)
    }

    fn insert_callback(&self, label: &str, callback: WindowReadyCallback) {
        lock_or_recover(&self.ready_callbacks).insert(label.to_string(), callback);
    }

    fn take_callback(&self, label: &str) -> Option<WindowReadyCallback> {
        lock_or_recover(&self.ready_callbacks).remove(label)
    }
}

pub(crate) fn window_label_for(window_type: &str, index: u64) -> String {
    format!("{window_type}-{index}")
}

pub(crate) fn window_type_of(label: &str) -> Option<&str> {
    let (window_type, index) = label.rsplit_once('-')?;
    if window_type.is_empty() || index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(window_type)
}

fn window_index_of(label: &str) -> u64 {
    label
        .rsplit_once('-')
        .and_then(|(_, index)| index.parse().ok())
        .unwrap_or(u64::MAX)
}

pub(crate) fn count_labels_of_type<'a, I>(labels: I, window_type: &str) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .filter(|label| window_type_of(label) == Some(window_type))
        .count()
}

/// Focused window first, otherwise the oldest one.
pub(crate) fn pick_main_label<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let candidates: Vec<(&str, bool)> = candidates
        .into_iter()
        .filter(|(label, _)| window_type_of(label) == Some(MAIN_WINDOW_TYPE))
        .collect();

    if let Some((label, _)) = candidates.iter().find(|(_, focused)| *focused) {
        return Some(*label);
    }
    candidates
        .iter()
        .min_by_key(|(label, _)| window_index_of(label))
        .map(|(label, _)| *label)
}

pub(crate) fn build_window_of_type(
    app_handle: &AppHandle,
    window_type: &str,
    on_ready: Option<WindowReadyCallback>,
) -> Result<WebviewWindow, String> {
    let registry = app_handle.state::<WindowRegistry>();
    let label = registry.next_label(window_type);
    if let Some(callback) = on_ready {
        registry.insert_callback(&label, callback);
    }

    let built = WebviewWindowBuilder::new(
        app_handle,
        label.clone(),
        WebviewUrl::App(MAIN_WINDOW_ENTRY.into()),
    )
    .title(APP_DISPLAY_NAME)
    .inner_size(1000.0, 700.0)
    .min_inner_size(680.0, 500.0)
    .build();

    match built {
        Ok(window) => {
            append_desktop_log(&format!("created window {label}"));
            dev_tools::install_dev_tools(&window, append_desktop_log);
            Ok(window)
        }
        Err(error) => {
            registry.take_callback(&label);
            Err(format!("Failed to create {window_type} window: {error}"))
        }
    }
}

pub(crate) fn get_count_of_type(app_handle: &AppHandle, window_type: &str) -> usize {
    let windows = app_handle.webview_windows();
    count_labels_of_type(windows.keys().map(String::as_str), window_type)
}

pub(crate) fn get_count_of_type_excluding(
    app_handle: &AppHandle,
    window_type: &str,
    excluded_label: &str,
) -> usize {
    let windows = app_handle.webview_windows();
    count_labels_of_type(
        windows
            .keys()
            .map(String::as_str)
            .filter(|label| *label != excluded_label),
        window_type,
    )
}

pub(crate) fn get_main_window(app_handle: &AppHandle) -> Result<WebviewWindow, String> {
    let windows = app_handle.webview_windows();
    let label = pick_main_label(windows.iter().map(|(label, window)| {
        (label.as_str(), window.is_focused().unwrap_or(false))
    }))
    .ok_or_else(|| "No main window is open.".to_string())?;

    windows
        .get(label)
        .cloned()
        .ok_or_else(|| format!("Main window {label} disappeared."))
}

/// Runs the window's on-ready callback after its first finished page load.
pub(crate) fn notify_window_ready(app_handle: &AppHandle, label: &str) {
    let Some(registry) = app_handle.try_state::<WindowRegistry>() else {
        return;
    };
    if let Some(callback) = registry.take_callback(label) {
        callback(app_handle, label);
    }
}

pub(crate) fn forget_window(app_handle: &AppHandle, label: &str) {
    if let Some(registry) = app_handle.try_state::<WindowRegistry>() {
        registry.take_callback(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_type_of_parses_typed_labels() {
        assert_eq!(window_type_of("main-1"), Some("main"));
        assert_eq!(window_type_of("file-host-12"), Some("file-host"));
        assert_eq!(window_type_of("main"), None);
        assert_eq!(window_type_of("main-"), None);
        assert_eq!(window_type_of("main-x1"), None);
    }

    #[test]
    fn window_label_for_round_trips_window_type() {
        let label = window_label_for(MAIN_WINDOW_TYPE, 7);
        assert_eq!(label, "main-7");
        assert_eq!(window_type_of(&label), Some(MAIN_WINDOW_TYPE));
    }

    #[test]
    fn count_labels_of_type_ignores_other_types() {
        let labels = ["main-1", "main-3", "about-2", "splash"];
        assert_eq!(count_labels_of_type(labels, "main"), 2);
        assert_eq!(count_labels_of_type(labels, "about"), 1);
        assert_eq!(count_labels_of_type(labels, "settings"), 0);
    }

    #[test]
    fn pick_main_label_prefers_focused_then_oldest() {
        assert_eq!(
            pick_main_label([("main-10", false), ("main-2", false), ("about-1", true)]),
            Some("main-2")
        );
        assert_eq!(
            pick_main_label([("main-1", false), ("main-4", true)]),
            Some("main-4")
        );
        assert_eq!(pick_main_label([("about-1", true)]), None);
    }
}
