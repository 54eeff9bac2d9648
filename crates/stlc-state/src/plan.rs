//! Test plan structures and the planning wizard form
//!
//! The wizard form is the persisted "configure" answer set for the planning
//! phase; its per-step validation predicates gate forward navigation in the
//! planning flow.

use serde::{Deserialize, Serialize};

/// Number of wizard sub-steps
pub const WIZARD_STEPS: usize = 4;

/// Answers collected by the four-step planning wizard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardForm {
    // Step 1: basic information
    pub project_name: String,
    pub project_description: String,
    pub testing_objective: String,
    // Step 2: scope and types
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub test_types: Vec<String>,
    // Step 3: resources and environment
    pub team_size: String,
    pub duration: String,
    pub environments: Vec<String>,
    pub tools: Vec<String>,
    // Step 4: risks and success criteria
    pub risks: Vec<String>,
    pub success_criteria: Vec<String>,
    pub assumptions: Vec<String>,
}

impl WizardForm {
    /// Required-field predicate for a wizard step (0-based).
    ///
    /// Forward navigation past a step is a no-op unless this holds;
    /// backward navigation is never gated.
    #[must_use]
    pub fn is_step_complete(&self, step: usize) -> bool {
        match step {
            0 => {
                !self.project_name.trim().is_empty()
                    && !self.project_description.trim().is_empty()
                    && !self.testing_objective.trim().is_empty()
            }
            1 => !self.inclusions.is_empty() && !self.test_types.is_empty(),
            2 => {
                !self.team_size.trim().is_empty()
                    && !self.duration.trim().is_empty()
                    && !self.environments.is_empty()
            }
            3 => !self.success_criteria.is_empty(),
            _ => true,
        }
    }

    /// Whether every step passes its predicate
    #[must_use]
    pub fn is_complete(&self) -> bool {
        (0..WIZARD_STEPS).all(|s| self.is_step_complete(s))
    }
}

/// Project information handed to the plan generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub project_name: String,
    pub project_description: String,
    pub testing_objective: String,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub test_types: Vec<String>,
    pub team_size: String,
    pub duration: String,
    pub environments: Vec<String>,
    pub tools: Vec<String>,
    pub risks: Vec<String>,
    pub success_criteria: Vec<String>,
    pub assumptions: Vec<String>,
    /// Count of requirements available at generation time
    pub requirement_count: usize,
}

impl ProjectInfo {
    /// Snapshot the wizard answers plus the requirement count.
    #[must_use]
    pub fn from_wizard(form: &WizardForm, requirement_count: usize) -> Self {
        Self {
            project_name: form.project_name.clone(),
            project_description: form.project_description.clone(),
            testing_objective: form.testing_objective.clone(),
            inclusions: form.inclusions.clone(),
            exclusions: form.exclusions.clone(),
            test_types: form.test_types.clone(),
            team_size: form.team_size.clone(),
            duration: form.duration.clone(),
            environments: form.environments.clone(),
            tools: form.tools.clone(),
            risks: form.risks.clone(),
            success_criteria: form.success_criteria.clone(),
            assumptions: form.assumptions.clone(),
            requirement_count,
        }
    }
}

/// Scope block of a test plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanScope {
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
}

/// Approach block of a test plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanApproach {
    pub strategy: String,
    pub methodology: String,
    pub phases: Vec<String>,
}

/// Environment block of a test plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanEnvironment {
    pub test_environments: Vec<String>,
    pub tools: Vec<String>,
    pub infrastructure: String,
}

/// Resource block of a test plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanResources {
    pub team_size: u32,
    pub roles: Vec<String>,
    pub duration: String,
    pub effort: String,
}

/// One named span in the plan schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulePhase {
    pub name: String,
    pub duration: String,
    pub start: String,
}

/// Schedule block of a test plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSchedule {
    pub phases: Vec<SchedulePhase>,
}

/// One risk entry with mitigation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRisk {
    pub risk: String,
    pub impact: String,
    pub probability: String,
    pub mitigation: String,
}

/// Tooling block of a test plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanTools {
    pub test_management: String,
    pub automation: String,
    pub performance: String,
    pub api_testing: String,
    pub security: String,
    pub ci_cd: String,
}

/// A generated test plan
///
/// Section order in exported documents is fixed: Objective, Scope, Approach,
/// Schedule, Resources, Risks, Tools, Deliverables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    pub objective: String,
    pub scope: PlanScope,
    pub approach: PlanApproach,
    pub test_types: Vec<String>,
    pub environment: PlanEnvironment,
    pub resources: PlanResources,
    pub schedule: PlanSchedule,
    pub risks: Vec<PlanRisk>,
    pub tools: PlanTools,
    pub deliverables: Vec<String>,
    pub success_criteria: Vec<String>,
}
