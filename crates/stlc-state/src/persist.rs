//! Persistence contract and the shared store handle
//!
//! The whole project state is serialized to one durable slot (a JSON file
//! under a fixed key) every five seconds while the handle is alive, and read
//! back best-effort at construction: an absent, corrupt or unparseable
//! snapshot is logged and swallowed, never surfaced.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;

use crate::error::StateError;
use crate::notify::{NotificationKind, NOTIFICATION_TTL};
use crate::state::{AppState, Snapshot};
use crate::store::{Intent, ProjectStore};

/// Fixed key of the durable snapshot slot
pub const SNAPSHOT_KEY: &str = "stlc-ai-project.json";

/// Autosave cadence
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5);

/// The durable key-value slot holding the serialized project
#[derive(Debug, Clone)]
pub struct SnapshotSlot {
    path: PathBuf,
}

impl SnapshotSlot {
    /// Slot under the fixed key inside `dir`
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SNAPSHOT_KEY),
        }
    }

    /// Backing file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the slot. `Ok(None)` when the slot is empty.
    pub fn load(&self) -> Result<Option<Snapshot>, StateError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Serialize the state into the slot.
    pub fn save(&self, state: &AppState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(state)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// One-shot user-triggered project export
#[derive(Debug, Clone)]
pub struct ProjectExport {
    /// `stlc-project-{ISO-date}.json`
    pub filename: String,
    /// Pretty-printed full state
    pub json: String,
}

/// Cloneable handle over a shared [`ProjectStore`]
///
/// All mutations stay synchronous and atomic: the lock is held only for the
/// duration of a single dispatch, so the autosave loop can never observe a
/// half-applied intent.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    inner: Arc<Mutex<ProjectStore>>,
    slot: Option<SnapshotSlot>,
}

impl StoreHandle {
    /// Handle over defaults, without a durable slot (tests, exports)
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ProjectStore::new())),
            slot: None,
        }
    }

    /// Handle backed by the durable slot in `dir`, rehydrated best-effort.
    #[must_use]
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let slot = SnapshotSlot::new(dir);
        let mut store = ProjectStore::new();
        match slot.load() {
            Ok(Some(snapshot)) => {
                store.dispatch(Intent::LoadState(snapshot));
                tracing::debug!(path = %slot.path().display(), "rehydrated project snapshot");
            }
            Ok(None) => {}
            Err(e) => {
                // Best-effort policy: defaults win, nothing surfaces.
                tracing::warn!(error = %e, "failed to load project snapshot, using defaults");
            }
        }
        Self {
            inner: Arc::new(Mutex::new(store)),
            slot: Some(slot),
        }
    }

    /// Dispatch an intent against the shared store.
    pub fn dispatch(&self, intent: Intent) {
        self.inner.lock().dispatch(intent);
    }

    /// Run a closure over the store under the lock.
    pub fn with_store<R>(&self, f: impl FnOnce(&ProjectStore) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Add a notification and schedule its auto-expiry removal.
    ///
    /// The removal goes through the ordinary `RemoveNotification` intent
    /// after [`NOTIFICATION_TTL`]; explicit dismissal in the meantime makes
    /// the timer's removal a no-op. Requires a tokio runtime; without one
    /// the entry stays until a [`ProjectStore::sweep_expired`] pass.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> String {
        let id = self.inner.lock().add_notification(kind, message);
        if let Ok(rt) = tokio::runtime::Handle::try_current() {
            let handle = self.clone();
            let expired_id = id.clone();
            rt.spawn(async move {
                tokio::time::sleep(NOTIFICATION_TTL).await;
                handle.dispatch(Intent::RemoveNotification { id: expired_id });
            });
        }
        id
    }

    /// Write the current state to the durable slot once.
    pub fn save_now(&self) -> Result<(), StateError> {
        let Some(slot) = &self.slot else {
            return Ok(());
        };
        let state = self.with_store(|s| s.state().clone());
        slot.save(&state)
    }

    /// Spawn the periodic autosave loop. Write failures are logged and
    /// swallowed. The loop runs until the returned task is aborted.
    pub fn spawn_autosave(&self) -> tokio::task::JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(AUTOSAVE_INTERVAL);
            // first tick fires immediately; skip it so saves land on cadence
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = handle.save_now() {
                    tracing::warn!(error = %e, "autosave failed");
                }
            }
        })
    }

    /// One-shot full-state export, independent of the autosave loop and
    /// without touching the stored snapshot.
    pub fn export_project(&self) -> Result<ProjectExport, StateError> {
        let state = self.with_store(|s| s.state().clone());
        let json = serde_json::to_string_pretty(&state)?;
        let date = Utc::now().format("%Y-%m-%d");
        Ok(ProjectExport {
            filename: format!("stlc-project-{date}.json"),
            json,
        })
    }
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new()
    }
}
