use tauri::{plugin::TauriPlugin, Wry};
use tauri_plugin_log::{Target, TargetKind};

use crate::{app_config, DESKTOP_LOG_FILE};

const DESKTOP_TARGET: &str = "desktop";
const STARTUP_TARGET: &str = "startup";
const SHUTDOWN_TARGET: &str = "shutdown";

pub(crate) fn build_log_plugin() -> TauriPlugin<Wry> {
    let mut builder = tauri_plugin_log::Builder::new()
        .clear_targets()
        .target(Target::new(TargetKind::Stdout))
        .target(Target::new(TargetKind::LogDir {
            file_name: Some(DESKTOP_LOG_FILE.to_string()),
        }))
        .level(app_config::resolve_log_level())
        .level_for("tao", log::LevelFilter::Warn)
        .level_for("wry", log::LevelFilter::Warn)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        });

    if cfg!(debug_assertions) {
        builder = builder.target(Target::new(TargetKind::Webview));
    }

    builder.build()
}

pub(crate) fn append_desktop_log(message: &str) {
    log::info!(target: DESKTOP_TARGET, "{message}");
}

pub(crate) fn append_startup_log(message: &str) {
    log::info!(target: STARTUP_TARGET, "{message}");
}

pub(crate) fn append_shutdown_log(message: &str) {
    log::info!(target: SHUTDOWN_TARGET, "{message}");
}
