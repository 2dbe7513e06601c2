use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use crate::{file_open::PendingLaunchFile, quit_coordinator::QuitCoordinator};

pub(crate) fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
pub(crate) struct QuitState {
    coordinator: Mutex<QuitCoordinator>,
    pub(crate) quit_timeout: Option<Duration>,
}

impl QuitState {
    pub(crate) fn new(quit_timeout: Option<Duration>) -> Self {
        Self {
            coordinator: Mutex::new(QuitCoordinator::default()),
            quit_timeout,
        }
    }

    pub(crate) fn with_coordinator<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut QuitCoordinator) -> T,
    {
        f(&mut lock_or_recover(&self.coordinator))
    }
}

#[derive(Debug, Default)]
pub(crate) struct LaunchState {
    pending_file: Mutex<PendingLaunchFile>,
}

impl LaunchState {
    pub(crate) fn with_pending_file<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut PendingLaunchFile) -> T,
    {
        f(&mut lock_or_recover(&self.pending_file))
    }
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct DesktopBridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl DesktopBridgeResult {
    pub(crate) fn success() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failure(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuitStatus {
    pub(crate) saving: bool,
    pub(crate) quit_pending: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct LoadArchiveFilePayload {
    pub(crate) path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_status_serializes_camel_case() {
        let status = QuitStatus {
            saving: true,
            quit_pending: false,
        };
        assert_eq!(
            serde_json::to_value(status).expect("serialize"),
            serde_json::json!({ "saving": true, "quitPending": false })
        );
    }

    #[test]
    fn quit_state_shares_one_coordinator() {
        let state = QuitState::new(None);
        state.with_coordinator(|coordinator| coordinator.save_started());
        assert!(state.with_coordinator(|coordinator| coordinator.is_saving()));
    }
}
