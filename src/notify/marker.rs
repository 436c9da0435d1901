use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

/// Smallest step `bump` advances by when the wall clock has not moved past
/// the current value.
const MIN_STEP: f64 = 1e-6;

/// Value read before anything was ever marked.
pub const NEVER_UPDATED: f64 = 0.0;

struct MarkerState {
    value: f64,
    file: Option<PathBuf>,
}

/// Shared "last mutation" timestamp (Unix seconds). Cloning hands out another
/// handle to the same cell; the value never moves backward.
#[derive(Clone)]
pub struct UpdateMarker {
    inner: Arc<Mutex<MarkerState>>,
}

impl Default for UpdateMarker {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateMarker {
    pub fn new() -> Self {
        Self::with_initial(NEVER_UPDATED)
    }

    pub fn with_initial(value: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MarkerState { value, file: None })),
        }
    }

    /// Mirrors the marker to `path` so observers in other processes sharing
    /// the file see the same value. A missing or garbled file reads as 0.
    pub fn file_backed(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let value = read_marker_file(&path);
        Self {
            inner: Arc::new(Mutex::new(MarkerState {
                value,
                file: Some(path),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MarkerState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn read(&self) -> f64 {
        let mut state = self.lock();
        if let Some(path) = &state.file {
            let on_disk = read_marker_file(path);
            if on_disk > state.value {
                state.value = on_disk;
            }
        }
        state.value
    }

    /// Moves the marker to `timestamp` unless that would move it backward.
    /// Returns whether the value changed.
    pub fn mark_updated(&self, timestamp: f64) -> bool {
        if !timestamp.is_finite() {
            return false;
        }
        let mut state = self.lock();
        if timestamp < state.value {
            return false;
        }
        let changed = timestamp > state.value;
        state.value = timestamp;
        if changed {
            persist(&state);
        }
        changed
    }

    /// Advances the marker to now, or just past its current value if the
    /// clock lags, and returns the new value. Always strictly increases.
    pub fn bump(&self) -> f64 {
        let mut state = self.lock();
        if let Some(path) = &state.file {
            state.value = state.value.max(read_marker_file(path));
        }
        let next = unix_now().max(state.value + MIN_STEP);
        state.value = next;
        persist(&state);
        next
    }
}

pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(NEVER_UPDATED)
}

fn read_marker_file(path: &Path) -> f64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(NEVER_UPDATED)
}

fn persist(state: &MarkerState) {
    let Some(path) = &state.file else {
        return;
    };

    // rename so readers never observe a half-written value
    let tmp = path.with_extension("tmp");
    let result = fs::write(&tmp, state.value.to_string()).and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = result {
        warn!(error = %e, path = %path.display(), "Failed to persist update marker");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sentinel() {
        assert_eq!(UpdateMarker::new().read(), NEVER_UPDATED);
    }

    #[test]
    fn marker_is_max_of_all_writes() {
        let marker = UpdateMarker::with_initial(5.0);
        for ts in [3.0, 10.0, 7.5, 10.0, 12.25, 1.0] {
            marker.mark_updated(ts);
        }
        assert_eq!(marker.read(), 12.25);

        let low = UpdateMarker::with_initial(50.0);
        low.mark_updated(10.0);
        low.mark_updated(20.0);
        assert_eq!(low.read(), 50.0);
    }

    #[test]
    fn out_of_order_write_is_a_noop() {
        let marker = UpdateMarker::new();
        assert!(marker.mark_updated(100.0));
        assert!(!marker.mark_updated(99.0));
        assert!(!marker.mark_updated(100.0));
        assert!(!marker.mark_updated(f64::NAN));
        assert_eq!(marker.read(), 100.0);
    }

    #[test]
    fn bump_strictly_increases_even_ahead_of_the_clock() {
        let far_future = unix_now() + 10_000.0;
        let marker = UpdateMarker::with_initial(far_future);
        let first = marker.bump();
        let second = marker.bump();
        assert!(first > far_future);
        assert!(second > first);
    }

    #[test]
    fn clones_share_one_cell() {
        let writer = UpdateMarker::new();
        let reader = writer.clone();
        let value = writer.bump();
        assert_eq!(reader.read(), value);
    }

    #[test]
    fn file_backed_markers_see_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_update.txt");

        let writer = UpdateMarker::file_backed(&path);
        let reader = UpdateMarker::file_backed(&path);
        assert_eq!(reader.read(), NEVER_UPDATED);

        let value = writer.bump();
        assert_eq!(reader.read(), value);

        // a reader that fell behind on disk keeps its higher value
        writer.mark_updated(value + 1.0);
        fs::write(&path, "1.0").unwrap();
        assert_eq!(writer.read(), value + 1.0);
    }

    #[test]
    fn garbled_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_update.txt");
        fs::write(&path, "not a timestamp").unwrap();
        assert_eq!(UpdateMarker::file_backed(&path).read(), NEVER_UPDATED);
    }
}
