use std::time::Duration;

pub(crate) const APP_DISPLAY_NAME: &str = "Buttercup";
pub(crate) const MAIN_WINDOW_TYPE: &str = "main";
pub(crate) const MAIN_WINDOW_ENTRY: &str = "index.html";

pub(crate) const SAVE_STARTED_EVENT: &str = "workspace-save-started";
pub(crate) const SAVE_FINISHED_EVENT: &str = "workspace-save-finished";
pub(crate) const WILL_QUIT_EVENT: &str = "will-quit";
pub(crate) const LOAD_ARCHIVE_FILE_EVENT: &str = "load-archive-file";

pub(crate) const PERSISTED_STATE_KEY: &str = "state";
pub(crate) const PERSISTED_STATE_BACKUP_KEY: &str = "state.backup";
pub(crate) const STORAGE_DIR_NAME: &str = "storage";
pub(crate) const STATE_PERSIST_INTERVAL: Duration = Duration::from_millis(100);

pub(crate) const DEFAULT_QUIT_TIMEOUT_MS: u64 = 30_000;
pub(crate) const QUIT_TIMEOUT_ENV: &str = "BUTTERCUP_QUIT_TIMEOUT_MS";
pub(crate) const STATE_DIR_ENV: &str = "BUTTERCUP_STATE_DIR";
pub(crate) const LOG_LEVEL_ENV: &str = "BUTTERCUP_LOG_LEVEL";
pub(crate) const DEVTOOLS_ENV: &str = "BUTTERCUP_DEVTOOLS";

pub(crate) const DESKTOP_LOG_FILE: &str = "desktop";
