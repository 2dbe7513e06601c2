use std::panic;

/// Records panics in the desktop log before the default hook runs. Only
/// installed for release builds; debug builds keep the plain panic output.
pub(crate) fn install_panic_hook() {
    if cfg!(debug_assertions) {
        return;
    }

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        log::error!(target: "crash", "desktop process panicked at {location}: {info}");
        default_hook(info);
    }));
}
