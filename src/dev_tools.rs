use tauri::WebviewWindow;

/// Opens the inspector for new windows in debug builds. Never fails: the
/// inspector is optional tooling.
pub(crate) fn install_dev_tools<F>(window: &WebviewWindow, log: F)
where
    F: Fn(&str),
{
    #[cfg(debug_assertions)]
    {
        if crate::app_config::devtools_enabled() {
            window.open_devtools();
            log(&format!("opened devtools for window {}", window.label()));
        }
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = (window, log);
    }
}

pub(crate) fn toggle_dev_tools<F>(window: &WebviewWindow, log: F)
where
    F: Fn(&str),
{
    #[cfg(debug_assertions)]
    {
        if window.is_devtools_open() {
            window.close_devtools();
        } else {
            window.open_devtools();
        }
        let _ = log;
    }

    #[cfg(not(debug_assertions))]
    {
        log(&format!(
            "devtools are unavailable in release builds (window {})",
            window.label()
        ));
    }
}
