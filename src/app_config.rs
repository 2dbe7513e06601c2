use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use log::LevelFilter;

use crate::{
    DEFAULT_QUIT_TIMEOUT_MS, DEVTOOLS_ENV, LOG_LEVEL_ENV, QUIT_TIMEOUT_ENV, STATE_DIR_ENV,
    STORAGE_DIR_NAME,
};

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `None` means a deferred quit waits for the save indefinitely.
pub(crate) fn parse_quit_timeout(raw: Option<&str>) -> Option<Duration> {
    let timeout_ms = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_QUIT_TIMEOUT_MS);
    if timeout_ms == 0 {
        return None;
    }
    Some(Duration::from_millis(timeout_ms))
}

pub(crate) fn resolve_quit_timeout() -> Option<Duration> {
    parse_quit_timeout(env_value(QUIT_TIMEOUT_ENV).as_deref())
}

pub(crate) fn parse_log_level(raw: Option<&str>, debug_build: bool) -> LevelFilter {
    let fallback = if debug_build {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    raw.and_then(|value| value.trim().parse::<LevelFilter>().ok())
        .unwrap_or(fallback)
}

pub(crate) fn resolve_log_level() -> LevelFilter {
    parse_log_level(
        env_value(LOG_LEVEL_ENV).as_deref(),
        cfg!(debug_assertions),
    )
}

pub(crate) fn select_state_dir(
    override_dir: Option<&str>,
    app_data_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(dir) = override_dir.map(str::trim).filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    app_data_dir.map(|dir| dir.join(STORAGE_DIR_NAME))
}

pub(crate) fn resolve_state_dir(app_data_dir: Option<&Path>) -> Option<PathBuf> {
    select_state_dir(env_value(STATE_DIR_ENV).as_deref(), app_data_dir)
}

#[cfg_attr(not(debug_assertions), allow(dead_code))]
pub(crate) fn parse_devtools_enabled(raw: Option<&str>) -> bool {
    !matches!(
        raw.map(|value| value.trim().to_ascii_lowercase()).as_deref(),
        Some("0" | "false" | "off")
    )
}

#[cfg_attr(not(debug_assertions), allow(dead_code))]
pub(crate) fn devtools_enabled() -> bool {
    parse_devtools_enabled(env_value(DEVTOOLS_ENV).as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_timeout_defaults_and_disables() {
        assert_eq!(
            parse_quit_timeout(None),
            Some(Duration::from_millis(DEFAULT_QUIT_TIMEOUT_MS))
        );
        assert_eq!(
            parse_quit_timeout(Some(" 1500 ")),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(parse_quit_timeout(Some("0")), None);
        assert_eq!(
            parse_quit_timeout(Some("soon")),
            Some(Duration::from_millis(DEFAULT_QUIT_TIMEOUT_MS))
        );
    }

    #[test]
    fn parse_log_level_accepts_names_and_falls_back_per_build() {
        assert_eq!(parse_log_level(Some("warn"), true), LevelFilter::Warn);
        assert_eq!(parse_log_level(Some("TRACE"), false), LevelFilter::Trace);
        assert_eq!(parse_log_level(Some("loud"), false), LevelFilter::Info);
        assert_eq!(parse_log_level(None, true), LevelFilter::Debug);
    }

    #[test]
    fn select_state_dir_prefers_override() {
        let app_data = PathBuf::from("/data/buttercup");
        assert_eq!(
            select_state_dir(Some("/tmp/state"), Some(&app_data)),
            Some(PathBuf::from("/tmp/state"))
        );
        assert_eq!(
            select_state_dir(Some("  "), Some(&app_data)),
            Some(app_data.join(STORAGE_DIR_NAME))
        );
        assert_eq!(select_state_dir(None, None), None);
    }

    #[test]
    fn parse_devtools_enabled_only_rejects_explicit_off_values() {
        assert!(parse_devtools_enabled(None));
        assert!(parse_devtools_enabled(Some("1")));
        assert!(!parse_devtools_enabled(Some("0")));
        assert!(!parse_devtools_enabled(Some("Off")));
    }
}
