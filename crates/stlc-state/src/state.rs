//! Root application state and the snapshot format
//!
//! The snapshot mirrors the state shape with every top-level field optional,
//! so rehydration of a partial or older snapshot never fails; missing keys
//! fall back to defaults. Notification and error lists are excluded from
//! serialized snapshots (they are time-bound) but still tolerated on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notify::{ErrorRecord, Notification};
use crate::phase::{Nav, PhaseSet};

/// Identifying metadata of the project aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMeta {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Updated on every phase-data mutation, never on navigation
    pub last_modified: DateTime<Utc>,
}

impl Default for ProjectMeta {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: "demo-project-001".to_string(),
            name: "E-Commerce Platform Testing".to_string(),
            description: "Comprehensive testing suite for a modern e-commerce platform"
                .to_string(),
            created_at: now,
            last_modified: now,
        }
    }
}

/// The whole mutable application state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub current_phase: Nav,
    pub project: ProjectMeta,
    pub phases: PhaseSet,
    /// Ephemeral; not written to snapshots
    #[serde(skip_serializing)]
    pub notifications: Vec<Notification>,
    /// Ephemeral; not written to snapshots
    #[serde(skip_serializing)]
    pub errors: Vec<ErrorRecord>,
}

/// A full or partial persisted state, merged over defaults at load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub current_phase: Option<Nav>,
    pub project: Option<ProjectMeta>,
    pub phases: Option<PhaseSet>,
    // Older snapshots persisted these wholesale; accepted but dropped.
    pub notifications: Option<Vec<Notification>>,
    pub errors: Option<Vec<ErrorRecord>>,
}

impl Snapshot {
    /// Capture the persistable parts of a state.
    #[must_use]
    pub fn of(state: &AppState) -> Self {
        Self {
            current_phase: Some(state.current_phase),
            project: Some(state.project.clone()),
            phases: Some(state.phases.clone()),
            notifications: None,
            errors: None,
        }
    }
}

impl AppState {
    /// Shallow-merge a snapshot over this state.
    ///
    /// Each present top-level field replaces its counterpart wholesale;
    /// absent fields leave the current value in place. Derived phase
    /// invariants are re-established afterwards so a hand-edited or stale
    /// snapshot cannot smuggle in an inconsistent `completed` flag.
    pub fn merge_snapshot(&mut self, snapshot: Snapshot) {
        if let Some(nav) = snapshot.current_phase {
            self.current_phase = nav;
        }
        if let Some(project) = snapshot.project {
            self.project = project;
        }
        if let Some(mut phases) = snapshot.phases {
            phases.normalize();
            self.phases = phases;
        }
        // Ephemeral lists from old snapshots are intentionally discarded.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;

    #[test]
    fn empty_snapshot_merge_is_identity() {
        let mut state = AppState::default();
        let before = state.clone();
        state.merge_snapshot(Snapshot::default());
        assert_eq!(state, before);
    }

    #[test]
    fn snapshot_merge_replaces_present_fields_only() {
        let mut state = AppState::default();
        state.phases.set_progress(crate::phase::Phase::Requirements, 40);
        state.merge_snapshot(Snapshot {
            current_phase: Some(Nav::Planning),
            ..Snapshot::default()
        });
        assert_eq!(state.current_phase, Nav::Planning);
        assert_eq!(state.phases.progress(crate::phase::Phase::Requirements), 40);
    }

    #[test]
    fn notifications_not_serialized() {
        let mut state = AppState::default();
        state
            .notifications
            .push(Notification::new(NotificationKind::Info, "hello"));
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("notifications").is_none());
        assert!(json.get("errors").is_none());
        assert!(json.get("currentPhase").is_some());
    }

    #[test]
    fn old_snapshot_with_ephemeral_lists_still_parses() {
        let raw = r#"{
            "currentPhase": "requirements",
            "notifications": [
                {"id": "1-x", "type": "success", "message": "m", "timestamp": "2024-01-01T00:00:00Z"}
            ],
            "errors": []
        }"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        let mut state = AppState::default();
        state.merge_snapshot(snapshot);
        assert_eq!(state.current_phase, Nav::Requirements);
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn snapshot_merge_repairs_progress_coupling() {
        let raw = r#"{
            "phases": {
                "planning": {"progress": 100, "completed": false, "data": {}}
            }
        }"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        let mut state = AppState::default();
        state.merge_snapshot(snapshot);
        assert!(state.phases.completed(crate::phase::Phase::Planning));
    }
}
