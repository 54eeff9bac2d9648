//! The project state store: intents and the reducer
//!
//! Every mutation flows through [`ProjectStore::dispatch`] with an
//! [`Intent`], the complete public mutation contract. The handler is an
//! exhaustive
//! match over the intent union, so adding an intent without handling it is a
//! compile error rather than a silent default-case fallthrough.

use chrono::{DateTime, Utc};

use crate::notify::{ErrorRecord, Notification, NotificationKind};
use crate::phase::{Nav, Phase, PhasePatch};
use crate::state::{AppState, Snapshot};

/// A single unit of store mutation
#[derive(Debug, Clone)]
pub enum Intent {
    /// Move the navigation pointer; touches no phase state
    SetCurrentPhase(Nav),
    /// Shallow-merge a partial payload into one phase's data
    UpdatePhaseData(PhasePatch),
    /// Set a phase's progress; `completed` is rederived, never set directly
    UpdatePhaseProgress { phase: Phase, progress: u8 },
    /// Append a notification with a fresh id and timestamp
    AddNotification {
        kind: NotificationKind,
        message: String,
    },
    /// Remove a notification by id; a no-op when absent
    RemoveNotification { id: String },
    /// Append a persistent error record
    AddError { message: String },
    /// Drop all accumulated error records
    ClearErrors,
    /// Replace the project with defaults, keeping the navigation pointer
    ResetProject,
    /// Merge a full or partial snapshot over the current state
    LoadState(Snapshot),
}

/// Single source of truth for the project aggregate
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    state: AppState,
}

impl ProjectStore {
    /// A store over the default initial state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store over a pre-built state (rehydration, tests)
    #[inline]
    #[must_use]
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    /// Read-only view of the current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply one intent synchronously and atomically.
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::SetCurrentPhase(nav) => {
                self.state.current_phase = nav;
            }
            Intent::UpdatePhaseData(patch) => {
                let now = Utc::now();
                tracing::debug!(phase = %patch.phase(), "merging phase data");
                self.state.phases.merge(patch, now);
                self.state.project.last_modified = now;
            }
            Intent::UpdatePhaseProgress { phase, progress } => {
                self.state.phases.set_progress(phase, progress);
            }
            Intent::AddNotification { kind, message } => {
                self.state.notifications.push(Notification::new(kind, message));
            }
            Intent::RemoveNotification { id } => {
                self.state.notifications.retain(|n| n.id != id);
            }
            Intent::AddError { message } => {
                self.state.errors.push(ErrorRecord::new(message));
            }
            Intent::ClearErrors => {
                self.state.errors.clear();
            }
            Intent::ResetProject => {
                // Data resets; the navigation pointer deliberately survives.
                let nav = self.state.current_phase;
                self.state = AppState {
                    current_phase: nav,
                    ..AppState::default()
                };
            }
            Intent::LoadState(snapshot) => {
                self.state.merge_snapshot(snapshot);
            }
        }
    }

    /// Dispatch [`Intent::AddNotification`] and return the new entry's id,
    /// for callers that schedule the auto-expiry removal.
    pub fn add_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> String {
        self.dispatch(Intent::AddNotification {
            kind,
            message: message.into(),
        });
        self.state
            .notifications
            .last()
            .map(|n| n.id.clone())
            .unwrap_or_default()
    }

    /// Remove every notification past its TTL at `now`, via the same
    /// removal path as explicit dismissal.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>) {
        let expired: Vec<String> = self
            .state
            .notifications
            .iter()
            .filter(|n| n.is_expired(now))
            .map(|n| n.id.clone())
            .collect();
        for id in expired {
            self.dispatch(Intent::RemoveNotification { id });
        }
    }

    // ---- derived queries (pure, never stored) ----

    /// Arithmetic mean of the three phase progresses, rounded to nearest.
    #[must_use]
    pub fn overall_progress(&self) -> u8 {
        let sum: u32 = Phase::ALL
            .iter()
            .map(|p| u32::from(self.state.phases.progress(*p)))
            .sum();
        ((sum as f64) / Phase::ALL.len() as f64).round() as u8
    }

    /// Count of phases at 100 percent
    #[must_use]
    pub fn completed_phases(&self) -> usize {
        Phase::ALL
            .iter()
            .filter(|p| self.state.phases.progress(**p) == 100)
            .count()
    }

    /// Count of requirements with high or critical risk
    #[must_use]
    pub fn high_risk_count(&self) -> usize {
        self.state
            .phases
            .requirements
            .data
            .requirements
            .iter()
            .filter(|r| r.is_high_risk())
            .count()
    }
}
