//! Phases, per-phase state and the shallow-merge patch types
//!
//! The phase set is closed: requirements, planning, testcases. `dashboard`
//! exists only as a navigation target and carries no data. Each phase tracks
//! an integer progress with a derived `completed` flag; the two are never
//! settable independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::ValidationReport;
use crate::plan::{TestPlan, WizardForm};
use crate::requirement::Requirement;
use crate::testcase::{GenerationConfig, GenerationSummary, Statistics, TestCase};

/// The three data-bearing workflow phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Requirements,
    Planning,
    #[serde(rename = "testcases")]
    TestCases,
}

impl Phase {
    /// All phases in workflow order
    pub const ALL: [Phase; 3] = [Phase::Requirements, Phase::Planning, Phase::TestCases];
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Requirements => "requirements",
            Phase::Planning => "planning",
            Phase::TestCases => "testcases",
        };
        f.pad(name)
    }
}

/// Navigation target: a phase, or the data-less dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nav {
    Dashboard,
    Requirements,
    Planning,
    #[serde(rename = "testcases")]
    TestCases,
}

impl Default for Nav {
    fn default() -> Self {
        Nav::Dashboard
    }
}

impl Nav {
    /// The data-bearing phase this target points at, if any
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Nav::Dashboard => None,
            Nav::Requirements => Some(Phase::Requirements),
            Nav::Planning => Some(Phase::Planning),
            Nav::TestCases => Some(Phase::TestCases),
        }
    }
}

impl From<Phase> for Nav {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Requirements => Nav::Requirements,
            Phase::Planning => Nav::Planning,
            Phase::TestCases => Nav::TestCases,
        }
    }
}

/// Progress plus payload for a single phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhaseState<D> {
    /// 0..=100; out-of-range input is clamped at the intent boundary
    pub progress: u8,
    /// Always equals `progress == 100`; recomputed on every progress write
    pub completed: bool,
    pub data: D,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl<D> PhaseState<D> {
    /// Set progress and rederive `completed`.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
        self.completed = self.progress == 100;
    }

    /// Re-establish the progress/completed coupling after a raw load.
    pub fn normalize(&mut self) {
        self.progress = self.progress.min(100);
        self.completed = self.progress == 100;
    }
}

/// A document supplied during requirements gathering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub content: String,
}

/// Payload of the requirements phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequirementsData {
    pub requirements: Vec<Requirement>,
    pub functional_count: usize,
    pub non_functional_count: usize,
    pub quality_score: u8,
    /// High-risk requirement count from the last analysis
    pub risk_count: usize,
    pub stakeholders: Vec<String>,
    pub business_drivers: Vec<String>,
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
}

/// Partial update for [`RequirementsData`]; `None` fields survive the merge
#[derive(Debug, Clone, Default)]
pub struct RequirementsPatch {
    pub requirements: Option<Vec<Requirement>>,
    pub functional_count: Option<usize>,
    pub non_functional_count: Option<usize>,
    pub quality_score: Option<u8>,
    pub risk_count: Option<usize>,
    pub stakeholders: Option<Vec<String>>,
    pub business_drivers: Option<Vec<String>>,
    pub uploaded_files: Option<Vec<UploadedFile>>,
    pub validation: Option<ValidationReport>,
}

impl RequirementsData {
    fn apply(&mut self, patch: RequirementsPatch) {
        if let Some(v) = patch.requirements {
            self.requirements = v;
        }
        if let Some(v) = patch.functional_count {
            self.functional_count = v;
        }
        if let Some(v) = patch.non_functional_count {
            self.non_functional_count = v;
        }
        if let Some(v) = patch.quality_score {
            self.quality_score = v;
        }
        if let Some(v) = patch.risk_count {
            self.risk_count = v;
        }
        if let Some(v) = patch.stakeholders {
            self.stakeholders = v;
        }
        if let Some(v) = patch.business_drivers {
            self.business_drivers = v;
        }
        if let Some(v) = patch.uploaded_files {
            self.uploaded_files = v;
        }
        if let Some(v) = patch.validation {
            self.validation = Some(v);
        }
    }
}

/// Payload of the planning phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanningData {
    pub wizard: WizardForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_plan: Option<TestPlan>,
}

/// Partial update for [`PlanningData`]
#[derive(Debug, Clone, Default)]
pub struct PlanningPatch {
    pub wizard: Option<WizardForm>,
    pub generated_plan: Option<TestPlan>,
}

impl PlanningData {
    fn apply(&mut self, patch: PlanningPatch) {
        if let Some(v) = patch.wizard {
            self.wizard = v;
        }
        if let Some(v) = patch.generated_plan {
            self.generated_plan = Some(v);
        }
    }
}

/// Payload of the test-case phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCasesData {
    pub test_cases: Vec<TestCase>,
    pub configuration: GenerationConfig,
    pub statistics: Statistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_summary: Option<GenerationSummary>,
    pub recommendations: Vec<String>,
}

/// Partial update for [`TestCasesData`]
#[derive(Debug, Clone, Default)]
pub struct TestCasesPatch {
    pub test_cases: Option<Vec<TestCase>>,
    pub configuration: Option<GenerationConfig>,
    pub statistics: Option<Statistics>,
    pub generation_summary: Option<GenerationSummary>,
    pub recommendations: Option<Vec<String>>,
}

impl TestCasesData {
    fn apply(&mut self, patch: TestCasesPatch) {
        if let Some(v) = patch.test_cases {
            self.test_cases = v;
        }
        if let Some(v) = patch.configuration {
            self.configuration = v;
        }
        if let Some(v) = patch.statistics {
            self.statistics = v;
        }
        if let Some(v) = patch.generation_summary {
            self.generation_summary = Some(v);
        }
        if let Some(v) = patch.recommendations {
            self.recommendations = v;
        }
    }
}

/// A phase-keyed partial data update
#[derive(Debug, Clone)]
pub enum PhasePatch {
    Requirements(RequirementsPatch),
    Planning(PlanningPatch),
    TestCases(TestCasesPatch),
}

impl PhasePatch {
    /// The phase this patch targets
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            PhasePatch::Requirements(_) => Phase::Requirements,
            PhasePatch::Planning(_) => Phase::Planning,
            PhasePatch::TestCases(_) => Phase::TestCases,
        }
    }
}

/// The fixed, closed set of three phases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseSet {
    pub requirements: PhaseState<RequirementsData>,
    pub planning: PhaseState<PlanningData>,
    #[serde(rename = "testcases")]
    pub test_cases: PhaseState<TestCasesData>,
}

impl PhaseSet {
    /// Progress of a phase
    #[inline]
    #[must_use]
    pub fn progress(&self, phase: Phase) -> u8 {
        match phase {
            Phase::Requirements => self.requirements.progress,
            Phase::Planning => self.planning.progress,
            Phase::TestCases => self.test_cases.progress,
        }
    }

    /// Completed flag of a phase
    #[inline]
    #[must_use]
    pub fn completed(&self, phase: Phase) -> bool {
        match phase {
            Phase::Requirements => self.requirements.completed,
            Phase::Planning => self.planning.completed,
            Phase::TestCases => self.test_cases.completed,
        }
    }

    /// Data-merge timestamp of a phase
    #[must_use]
    pub fn last_modified(&self, phase: Phase) -> Option<DateTime<Utc>> {
        match phase {
            Phase::Requirements => self.requirements.last_modified,
            Phase::Planning => self.planning.last_modified,
            Phase::TestCases => self.test_cases.last_modified,
        }
    }

    /// Set a phase's progress, rederiving `completed`.
    pub fn set_progress(&mut self, phase: Phase, progress: u8) {
        match phase {
            Phase::Requirements => self.requirements.set_progress(progress),
            Phase::Planning => self.planning.set_progress(progress),
            Phase::TestCases => self.test_cases.set_progress(progress),
        }
    }

    /// Shallow-merge a patch into the targeted phase's data and stamp its
    /// `last_modified`. Fields absent from the patch survive untouched.
    pub fn merge(&mut self, patch: PhasePatch, now: DateTime<Utc>) {
        match patch {
            PhasePatch::Requirements(p) => {
                self.requirements.data.apply(p);
                self.requirements.last_modified = Some(now);
            }
            PhasePatch::Planning(p) => {
                self.planning.data.apply(p);
                self.planning.last_modified = Some(now);
            }
            PhasePatch::TestCases(p) => {
                self.test_cases.data.apply(p);
                self.test_cases.last_modified = Some(now);
            }
        }
    }

    /// Re-establish derived invariants after rehydration.
    pub fn normalize(&mut self) {
        self.requirements.normalize();
        self.planning.normalize();
        self.test_cases.normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_progress_derives_completed() {
        let mut set = PhaseSet::default();
        set.set_progress(Phase::Planning, 100);
        assert!(set.completed(Phase::Planning));
        set.set_progress(Phase::Planning, 99);
        assert!(!set.completed(Phase::Planning));
    }

    #[test]
    fn progress_clamped_to_100() {
        let mut state: PhaseState<RequirementsData> = PhaseState::default();
        state.set_progress(250);
        assert_eq!(state.progress, 100);
        assert!(state.completed);
    }

    #[test]
    fn merge_is_non_destructive() {
        let mut set = PhaseSet::default();
        set.merge(
            PhasePatch::Requirements(RequirementsPatch {
                quality_score: Some(87),
                stakeholders: Some(vec!["QA Manager".to_string()]),
                ..RequirementsPatch::default()
            }),
            Utc::now(),
        );
        set.merge(
            PhasePatch::Requirements(RequirementsPatch {
                quality_score: Some(92),
                ..RequirementsPatch::default()
            }),
            Utc::now(),
        );
        assert_eq!(set.requirements.data.quality_score, 92);
        assert_eq!(set.requirements.data.stakeholders, vec!["QA Manager"]);
    }

    #[test]
    fn merge_stamps_last_modified() {
        let mut set = PhaseSet::default();
        assert!(set.last_modified(Phase::TestCases).is_none());
        let now = Utc::now();
        set.merge(PhasePatch::TestCases(TestCasesPatch::default()), now);
        assert_eq!(set.last_modified(Phase::TestCases), Some(now));
    }

    #[test]
    fn normalize_repairs_completed_flag() {
        let mut set = PhaseSet::default();
        set.requirements.progress = 100;
        set.requirements.completed = false;
        set.normalize();
        assert!(set.requirements.completed);
    }

    #[test]
    fn nav_phase_mapping() {
        assert_eq!(Nav::Dashboard.phase(), None);
        assert_eq!(Nav::Planning.phase(), Some(Phase::Planning));
        assert_eq!(Nav::from(Phase::TestCases), Nav::TestCases);
    }

    #[test]
    fn phase_serde_names() {
        assert_eq!(
            serde_json::to_string(&Phase::TestCases).unwrap(),
            "\"testcases\""
        );
        assert_eq!(serde_json::to_string(&Nav::Dashboard).unwrap(), "\"dashboard\"");
    }

    #[test]
    fn phase_set_serializes_under_original_keys() {
        let json = serde_json::to_value(PhaseSet::default()).unwrap();
        assert!(json.get("testcases").is_some());
        assert!(json.get("test_cases").is_none());
        let parsed: PhaseSet = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, PhaseSet::default());
    }
}
