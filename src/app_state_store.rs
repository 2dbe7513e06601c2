use std::{
    sync::Mutex,
    thread,
    time::{Duration, Instant},
};

use serde_json::{Map, Value};
use tauri::{AppHandle, Manager};

use crate::{
    app_types::lock_or_recover, persisted_state::JsonStorage, PERSISTED_STATE_KEY,
    STATE_PERSIST_INTERVAL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ThrottleAction {
    WriteNow,
    ScheduleTrailing(Duration),
    AlreadyScheduled,
}

/// Leading write, then at most one trailing write per interval.
#[derive(Debug)]
pub(crate) struct WriteThrottle {
    interval: Duration,
    last_write: Option<Instant>,
    trailing_scheduled: bool,
}

impl WriteThrottle {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_write: None,
            trailing_scheduled: false,
        }
    }

    pub(crate) fn request(&mut self, now: Instant) -> ThrottleAction {
        if self.trailing_scheduled {
            return ThrottleAction::AlreadyScheduled;
        }

        match self.last_write {
            Some(last_write) if now.saturating_duration_since(last_write) < self.interval => {
                self.trailing_scheduled = true;
                let elapsed = now.saturating_duration_since(last_write);
                ThrottleAction::ScheduleTrailing(self.interval.saturating_sub(elapsed))
            }
            _ => {
                self.last_write = Some(now);
                ThrottleAction::WriteNow
            }
        }
    }

    /// Returns whether a trailing write was still owed.
    pub(crate) fn take_trailing(&mut self, now: Instant) -> bool {
        if !self.trailing_scheduled {
            return false;
        }
        self.trailing_scheduled = false;
        self.last_write = Some(now);
        true
    }
}

pub(crate) fn merge_state_patch(
    state: &mut Map<String, Value>,
    patch: Map<String, Value>,
) -> usize {
    let mut changed = 0;
    for (key, value) in patch {
        if value.is_null() {
            if state.remove(&key).is_some() {
                changed += 1;
            }
            continue;
        }
        if state.get(&key) != Some(&value) {
            state.insert(key, value);
            changed += 1;
        }
    }
    changed
}

#[derive(Debug)]
pub(crate) struct AppStateStore {
    storage: JsonStorage,
    state: Mutex<Map<String, Value>>,
    throttle: Mutex<WriteThrottle>,
}

impl AppStateStore {
    pub(crate) fn new(storage: JsonStorage, initial_state: Value) -> Self {
        let state = match initial_state {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            storage,
            state: Mutex::new(state),
            throttle: Mutex::new(WriteThrottle::new(STATE_PERSIST_INTERVAL)),
        }
    }

    pub(crate) fn snapshot(&self) -> Value {
        Value::Object(lock_or_recover(&self.state).clone())
    }

    pub(crate) fn replace(&self, value: Value) -> Result<(), String> {
        let Value::Object(map) = value else {
            return Err("Desktop state must be a JSON object.".to_string());
        };
        *lock_or_recover(&self.state) = map;
        Ok(())
    }

    /// Returns whether anything changed.
    pub(crate) fn merge(&self, patch: Value) -> Result<bool, String> {
        let Value::Object(patch) = patch else {
            return Err("Desktop state patch must be a JSON object.".to_string());
        };
        let changed = merge_state_patch(&mut lock_or_recover(&self.state), patch);
        Ok(changed > 0)
    }

    fn request_write(&self, now: Instant) -> ThrottleAction {
        lock_or_recover(&self.throttle).request(now)
    }

    fn write_snapshot(&self) {
        let snapshot = self.snapshot();
        if let Err(error) = self.storage.set(PERSISTED_STATE_KEY, &snapshot) {
            log::error!("failed to persist desktop state: {error}");
        }
    }

    /// Writes a trailing state that has not reached disk yet.
    pub(crate) fn flush_pending(&self) {
        if lock_or_recover(&self.throttle).take_trailing(Instant::now()) {
            self.write_snapshot();
        }
    }
}

pub(crate) fn notify_state_changed(app_handle: &AppHandle) {
    let Some(store) = app_handle.try_state::<AppStateStore>() else {
        log::warn!("state change ignored: state store is not initialized");
        return;
    };

    match store.request_write(Instant::now()) {
        ThrottleAction::WriteNow => store.write_snapshot(),
        ThrottleAction::ScheduleTrailing(delay) => {
            let app_handle = app_handle.clone();
            thread::spawn(move || {
                thread::sleep(delay);
                if let Some(store) = app_handle.try_state::<AppStateStore>() {
                    store.flush_pending();
                }
            });
        }
        ThrottleAction::AlreadyScheduled => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn throttle_writes_leading_edge_then_one_trailing_write() {
        let start = Instant::now();
        let mut throttle = WriteThrottle::new(Duration::from_millis(100));

        assert_eq!(throttle.request(start), ThrottleAction::WriteNow);
        assert_eq!(
            throttle.request(start + Duration::from_millis(30)),
            ThrottleAction::ScheduleTrailing(Duration::from_millis(70))
        );
        assert_eq!(
            throttle.request(start + Duration::from_millis(60)),
            ThrottleAction::AlreadyScheduled
        );

        assert!(throttle.take_trailing(start + Duration::from_millis(100)));
        assert!(!throttle.take_trailing(start + Duration::from_millis(101)));
    }

    #[test]
    fn throttle_writes_immediately_once_interval_has_passed() {
        let start = Instant::now();
        let mut throttle = WriteThrottle::new(Duration::from_millis(100));

        assert_eq!(throttle.request(start), ThrottleAction::WriteNow);
        assert_eq!(
            throttle.request(start + Duration::from_millis(250)),
            ThrottleAction::WriteNow
        );
    }

    #[test]
    fn throttle_measures_next_window_from_trailing_write() {
        let start = Instant::now();
        let mut throttle = WriteThrottle::new(Duration::from_millis(100));
        throttle.request(start);
        throttle.request(start + Duration::from_millis(10));
        throttle.take_trailing(start + Duration::from_millis(100));

        assert_eq!(
            throttle.request(start + Duration::from_millis(150)),
            ThrottleAction::ScheduleTrailing(Duration::from_millis(50))
        );
    }

    #[test]
    fn merge_state_patch_sets_and_removes_top_level_keys() {
        let mut state = json!({ "archives": [], "ui": { "theme": "dark" } })
            .as_object()
            .cloned()
            .expect("object");
        let patch = json!({ "ui": null, "archives": [], "locale": "en" })
            .as_object()
            .cloned()
            .expect("object");

        assert_eq!(merge_state_patch(&mut state, patch), 2);
        assert_eq!(
            Value::Object(state),
            json!({ "archives": [], "locale": "en" })
        );
    }

    #[test]
    fn store_rejects_non_object_values() {
        let store = AppStateStore::new(JsonStorage::new(None), json!({}));
        assert!(store.replace(json!([1])).is_err());
        assert!(store.merge(json!("text")).is_err());
        assert_eq!(store.snapshot(), json!({}));
    }

    #[test]
    fn store_merge_reports_whether_state_changed() {
        let store = AppStateStore::new(JsonStorage::new(None), json!({ "a": 1 }));
        assert_eq!(store.merge(json!({ "a": 1 })), Ok(false));
        assert_eq!(store.merge(json!({ "b": 2 })), Ok(true));
        assert_eq!(store.snapshot(), json!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn flush_pending_writes_the_latest_trailing_state() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = JsonStorage::new(Some(dir.path().to_path_buf()));
        let store = AppStateStore::new(storage.clone(), json!({}));

        assert_eq!(store.request_write(Instant::now()), ThrottleAction::WriteNow);
        store.write_snapshot();
        store.replace(json!({ "archives": ["a1"] })).expect("replace");
        assert!(matches!(
            store.request_write(Instant::now()),
            ThrottleAction::ScheduleTrailing(_)
        ));

        store.flush_pending();

        assert_eq!(
            storage.get(PERSISTED_STATE_KEY).expect("read"),
            json!({ "archives": ["a1"] })
        );
    }
}
