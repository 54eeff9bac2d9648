//! End-to-end store behavior: dispatch semantics, persistence round-trips
//! and the derived-query invariants the dashboard relies on.

use chrono::Utc;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use stlc_state::phase::{PlanningPatch, RequirementsPatch, TestCasesPatch};
use stlc_state::requirement::{ManualRequirement, Priority, ReqType, Requirement};
use stlc_state::testcase::Statistics;
use stlc_state::{
    Intent, Nav, NotificationKind, Phase, PhasePatch, ProjectStore, Snapshot, SnapshotSlot,
    StoreHandle,
};

fn manual_requirement(existing: &[Requirement], title: &str, priority: Priority) -> Requirement {
    Requirement::manual(
        existing,
        ManualRequirement {
            title: title.to_string(),
            description: "does something useful".to_string(),
            req_type: ReqType::Functional,
            priority,
            acceptance_criteria: vec!["it works".to_string()],
            ..ManualRequirement::default()
        },
    )
}

#[test]
fn full_requirements_round_trip_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let slot = SnapshotSlot::new(dir.path());

    let mut store = ProjectStore::new();
    let req = manual_requirement(&[], "User login", Priority::Critical);
    store.dispatch(Intent::UpdatePhaseData(PhasePatch::Requirements(
        RequirementsPatch {
            requirements: Some(vec![req.clone()]),
            functional_count: Some(1),
            quality_score: Some(85),
            ..RequirementsPatch::default()
        },
    )));
    store.dispatch(Intent::UpdatePhaseProgress {
        phase: Phase::Requirements,
        progress: 50,
    });
    slot.save(store.state()).expect("save");

    // a fresh process rehydrates from the slot
    let snapshot = slot.load().expect("load").expect("snapshot present");
    let mut restarted = ProjectStore::new();
    restarted.dispatch(Intent::LoadState(snapshot));

    let reqs = &restarted.state().phases.requirements.data.requirements;
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].id, req.id);
    assert_eq!(restarted.state().phases.progress(Phase::Requirements), 50);
    assert_eq!(restarted.high_risk_count(), 1);
}

#[test]
fn reset_discards_data_but_not_navigation() {
    let mut store = ProjectStore::new();
    store.dispatch(Intent::SetCurrentPhase(Nav::TestCases));
    store.dispatch(Intent::UpdatePhaseData(PhasePatch::Planning(
        PlanningPatch::default(),
    )));
    store.add_notification(NotificationKind::Error, "boom");
    store.dispatch(Intent::AddError {
        message: "boom".to_string(),
    });

    store.dispatch(Intent::ResetProject);

    assert_eq!(store.state().current_phase, Nav::TestCases);
    assert!(store.state().phases.last_modified(Phase::Planning).is_none());
    assert!(store.state().notifications.is_empty());
    assert!(store.state().errors.is_empty());
    assert_eq!(store.overall_progress(), 0);
}

#[test]
fn sequential_merges_from_two_sources_both_land() {
    // two callers patch different fields of the same phase; neither clobbers
    // the other because patches carry only the fields they set
    let mut store = ProjectStore::new();
    store.dispatch(Intent::UpdatePhaseData(PhasePatch::TestCases(
        TestCasesPatch {
            recommendations: Some(vec!["add boundary coverage".to_string()]),
            ..TestCasesPatch::default()
        },
    )));
    store.dispatch(Intent::UpdatePhaseData(PhasePatch::TestCases(
        TestCasesPatch {
            statistics: Some(Statistics {
                total: 7,
                ..Statistics::default()
            }),
            ..TestCasesPatch::default()
        },
    )));
    let data = &store.state().phases.test_cases.data;
    assert_eq!(data.recommendations.len(), 1);
    assert_eq!(data.statistics.total, 7);
}

#[test]
fn snapshot_of_state_excludes_ephemeral_lists() {
    let mut store = ProjectStore::new();
    store.add_notification(NotificationKind::Success, "saved");
    let snapshot = Snapshot::of(store.state());
    assert!(snapshot.notifications.is_none());
    assert!(snapshot.errors.is_none());

    let raw = serde_json::to_string(store.state()).expect("serialize");
    let reparsed: Snapshot = serde_json::from_str(&raw).expect("parse");
    let mut rehydrated = ProjectStore::new();
    rehydrated.dispatch(Intent::LoadState(reparsed));
    assert!(rehydrated.state().notifications.is_empty());
}

#[tokio::test(start_paused = true)]
async fn handle_notification_lifecycle_under_paused_clock() {
    let handle = StoreHandle::new();
    handle.notify(NotificationKind::Success, "test cases generated");
    handle.notify(NotificationKind::Info, "plan drafted");
    assert_eq!(handle.with_store(|s| s.state().notifications.len()), 2);

    tokio::time::sleep(std::time::Duration::from_millis(5001)).await;
    tokio::task::yield_now().await;
    assert_eq!(handle.with_store(|s| s.state().notifications.len()), 0);
}

proptest! {
    #[test]
    fn progress_always_clamped_and_coupled(progress in 0u8..=255) {
        let mut store = ProjectStore::new();
        store.dispatch(Intent::UpdatePhaseProgress {
            phase: Phase::Planning,
            progress,
        });
        let stored = store.state().phases.progress(Phase::Planning);
        prop_assert!(stored <= 100);
        prop_assert_eq!(store.state().phases.completed(Phase::Planning), stored == 100);
    }

    #[test]
    fn overall_progress_stays_in_range(
        a in 0u8..=100,
        b in 0u8..=100,
        c in 0u8..=100,
    ) {
        let mut store = ProjectStore::new();
        store.dispatch(Intent::UpdatePhaseProgress { phase: Phase::Requirements, progress: a });
        store.dispatch(Intent::UpdatePhaseProgress { phase: Phase::Planning, progress: b });
        store.dispatch(Intent::UpdatePhaseProgress { phase: Phase::TestCases, progress: c });
        let overall = store.overall_progress();
        prop_assert!(overall <= 100);
        if a == 100 && b == 100 && c == 100 {
            prop_assert_eq!(overall, 100);
            prop_assert_eq!(store.completed_phases(), 3);
        }
    }

    #[test]
    fn manual_ids_never_collide(count in 1usize..20) {
        let mut existing: Vec<Requirement> = Vec::new();
        for i in 0..count {
            let req = manual_requirement(&existing, &format!("req {i}"), Priority::Medium);
            prop_assert!(existing.iter().all(|r| r.id != req.id));
            existing.push(req);
        }
        let mut ids: Vec<&str> = existing.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), count);
    }

    #[test]
    fn sweep_never_removes_fresh_entries(extra_ms in 0i64..4999) {
        let mut store = ProjectStore::new();
        store.add_notification(NotificationKind::Info, "fresh");
        let now = Utc::now() + chrono::Duration::milliseconds(extra_ms);
        store.sweep_expired(now);
        prop_assert_eq!(store.state().notifications.len(), 1);
    }
}
