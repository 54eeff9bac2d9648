//! End-to-end flow behavior over the offline provider and failure doubles

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use stlc_ai::{AiError, AnalysisProvider, MockProvider};
use stlc_flow::{
    FlowError, GenerationOutcome, PlanningFlow, PlanningStep, RequirementsFlow, RequirementsStep,
    TestCaseFlow, TestCaseStep,
};
use stlc_state::analysis::{RequirementAnalysis, ValidationReport};
use stlc_state::phase::{PhasePatch, TestCasesPatch};
use stlc_state::plan::{ProjectInfo, TestPlan};
use stlc_state::requirement::Requirement;
use stlc_state::testcase::{
    CasePriority, CaseStatus, CaseType, GenerationConfig, Statistics, TestCase, TestCaseBatch,
    TestStep,
};
use stlc_state::{Intent, Nav, StoreHandle};

/// Provider double that fails every call.
struct AlwaysFailing;

#[async_trait]
impl AnalysisProvider for AlwaysFailing {
    async fn analyze_requirements(
        &self,
        _content: &str,
        _context: &str,
    ) -> Result<RequirementAnalysis, AiError> {
        Err(AiError::EmptyResponse)
    }

    async fn validate_requirements(
        &self,
        _requirements: &[Requirement],
    ) -> Result<ValidationReport, AiError> {
        Err(AiError::EmptyResponse)
    }

    async fn generate_test_plan(&self, _project: &ProjectInfo) -> Result<TestPlan, AiError> {
        Err(AiError::EmptyResponse)
    }

    async fn generate_test_cases(
        &self,
        _requirements: &[Requirement],
        _config: &GenerationConfig,
    ) -> Result<TestCaseBatch, AiError> {
        Err(AiError::EmptyResponse)
    }
}

/// Provider double that waits before delegating to the offline provider.
struct Slow(MockProvider);

#[async_trait]
impl AnalysisProvider for Slow {
    async fn analyze_requirements(
        &self,
        content: &str,
        context: &str,
    ) -> Result<RequirementAnalysis, AiError> {
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        self.0.analyze_requirements(content, context).await
    }

    async fn validate_requirements(
        &self,
        requirements: &[Requirement],
    ) -> Result<ValidationReport, AiError> {
        self.0.validate_requirements(requirements).await
    }

    async fn generate_test_plan(&self, project: &ProjectInfo) -> Result<TestPlan, AiError> {
        self.0.generate_test_plan(project).await
    }

    async fn generate_test_cases(
        &self,
        requirements: &[Requirement],
        config: &GenerationConfig,
    ) -> Result<TestCaseBatch, AiError> {
        self.0.generate_test_cases(requirements, config).await
    }
}

fn fill_wizard(flow: &PlanningFlow) {
    flow.edit_form(|form| {
        form.project_name = "E-Commerce Platform".to_string();
        form.project_description = "Online storefront with checkout".to_string();
        form.testing_objective = "Release readiness".to_string();
        form.inclusions = vec!["Checkout".to_string()];
        form.test_types = vec!["functional".to_string()];
        form.team_size = "4".to_string();
        form.duration = "6 weeks".to_string();
        form.environments = vec!["QA".to_string()];
        form.success_criteria = vec!["95% pass rate".to_string()];
    })
    .unwrap();
}

fn sample_case(id: &str) -> TestCase {
    TestCase {
        id: id.to_string(),
        title: format!("case {id}"),
        description: String::new(),
        requirement_id: None,
        case_type: CaseType::Positive,
        priority: CasePriority::High,
        category: "General".to_string(),
        test_type: "functional".to_string(),
        preconditions: Vec::new(),
        steps: vec![TestStep {
            step: 1,
            action: "do the thing".to_string(),
            expected: "it works".to_string(),
        }],
        expected_result: "it works".to_string(),
        test_data: BTreeMap::new(),
        tags: Vec::new(),
        estimated_time: "15 minutes".to_string(),
        status: CaseStatus::Draft,
        created_at: chrono::Utc::now(),
        automated: false,
    }
}

#[tokio::test]
async fn full_pipeline_over_offline_provider() {
    let store = StoreHandle::new();
    let provider: Arc<dyn AnalysisProvider> = Arc::new(MockProvider);

    // requirements: gather, analyze, review, complete
    let requirements = RequirementsFlow::new(store.clone(), provider.clone());
    assert!(!requirements.can_analyze());
    requirements.add_file("brief.txt", "The system shall allow user registration.");
    assert!(requirements.can_analyze());

    let outcome = requirements.analyze().await.unwrap();
    assert_eq!(outcome, GenerationOutcome::Completed);
    assert_eq!(requirements.step(), RequirementsStep::Review);
    store.with_store(|s| {
        let data = &s.state().phases.requirements.data;
        assert_eq!(data.requirements.len(), 6);
        assert_eq!(data.quality_score, 87);
        assert_eq!(s.state().phases.requirements.progress, 50);
        assert!(!s.state().phases.requirements.completed);
    });

    requirements.complete().unwrap();
    store.with_store(|s| {
        assert_eq!(s.state().current_phase, Nav::Planning);
        assert_eq!(s.state().phases.requirements.progress, 100);
        assert!(s.state().phases.requirements.completed);
    });

    // planning: wizard, generate, approve
    let planning = PlanningFlow::new(store.clone(), provider.clone());
    fill_wizard(&planning);
    let outcome = planning.generate().await.unwrap();
    assert_eq!(outcome, GenerationOutcome::Completed);
    assert_eq!(planning.step(), PlanningStep::Review);
    store.with_store(|s| {
        let data = &s.state().phases.planning.data;
        assert!(data.generated_plan.is_some());
        assert_eq!(data.wizard.project_name, "E-Commerce Platform");
        assert_eq!(s.state().phases.planning.progress, 100);
    });

    planning.approve().unwrap();
    store.with_store(|s| assert_eq!(s.state().current_phase, Nav::TestCases));

    // test cases: select everything, generate, manage
    let cases = TestCaseFlow::new(store.clone(), provider);
    cases.proceed_to_select().unwrap();
    assert_eq!(cases.selected().len(), 6);

    let outcome = cases.generate().await.unwrap();
    assert_eq!(outcome, GenerationOutcome::Completed);
    assert_eq!(cases.step(), TestCaseStep::Manage);
    store.with_store(|s| {
        let data = &s.state().phases.test_cases.data;
        // 6 positive + 6 negative + boundary for the 4 functional ones
        assert_eq!(data.test_cases.len(), 16);
        assert_eq!(data.statistics.total, 16);
        assert!(data.generation_summary.is_some());
        assert_eq!(s.state().phases.test_cases.progress, 100);
        assert_eq!(s.overall_progress(), 100);
    });

    cases.complete().unwrap();
}

#[tokio::test]
async fn analysis_failure_reverts_without_touching_data() {
    let store = StoreHandle::new();
    let flow = RequirementsFlow::new(store.clone(), Arc::new(AlwaysFailing));
    flow.set_context("some business context");

    let outcome = flow.analyze().await.unwrap();
    assert_eq!(outcome, GenerationOutcome::Failed);
    assert_eq!(flow.step(), RequirementsStep::Gather);
    store.with_store(|s| {
        assert!(s.state().phases.requirements.data.requirements.is_empty());
        assert_eq!(s.state().phases.requirements.progress, 0);
        assert_eq!(s.state().errors.len(), 1);
        assert_eq!(
            s.state().errors[0].message,
            "Failed to analyze requirements. Please try again."
        );
    });
}

#[tokio::test]
async fn case_generation_failure_reverts_to_selection() {
    let store = StoreHandle::new();
    // seed some requirements so there is something to select
    let seed = RequirementsFlow::new(store.clone(), Arc::new(MockProvider));
    seed.set_context("registration and checkout");
    seed.analyze().await.unwrap();

    let flow = TestCaseFlow::new(store.clone(), Arc::new(AlwaysFailing));
    flow.proceed_to_select().unwrap();
    let outcome = flow.generate().await.unwrap();
    assert_eq!(outcome, GenerationOutcome::Failed);
    assert_eq!(flow.step(), TestCaseStep::Select);
    store.with_store(|s| {
        let data = &s.state().phases.test_cases.data;
        assert!(data.test_cases.is_empty());
        assert_eq!(data.statistics.total, 0);
        assert_eq!(s.state().phases.test_cases.progress, 0);
        assert!(s
            .state()
            .errors
            .iter()
            .any(|e| e.message == "Failed to generate test cases. Please try again."));
    });
}

#[tokio::test(start_paused = true)]
async fn abandoned_analysis_response_is_discarded() {
    let store = StoreHandle::new();
    let flow = RequirementsFlow::new(store.clone(), Arc::new(Slow(MockProvider)));
    flow.set_context("slow analysis");

    let task = {
        let flow = flow.clone();
        tokio::spawn(async move { flow.analyze().await })
    };
    // let the call reach its await point before pulling the rug
    tokio::task::yield_now().await;
    flow.abandon();

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome, GenerationOutcome::Discarded);
    assert_eq!(flow.step(), RequirementsStep::Gather);
    store.with_store(|s| {
        assert!(s.state().phases.requirements.data.requirements.is_empty());
        assert_eq!(s.state().phases.requirements.progress, 0);
        assert!(s.state().errors.is_empty());
    });
}

#[tokio::test]
async fn wizard_gates_forward_navigation() {
    let store = StoreHandle::new();
    let flow = PlanningFlow::new(store, Arc::new(MockProvider));

    assert_eq!(flow.step(), PlanningStep::Configure { step: 0 });
    assert!(!flow.next_step().unwrap());
    assert_eq!(flow.step(), PlanningStep::Configure { step: 0 });
    assert_eq!(flow.generate().await.unwrap_err(), FlowError::IncompleteWizard(0));

    flow.edit_form(|form| {
        form.project_name = "Shop".to_string();
        form.project_description = "A shop".to_string();
        form.testing_objective = "Quality".to_string();
    })
    .unwrap();
    assert!(flow.next_step().unwrap());
    assert_eq!(flow.step(), PlanningStep::Configure { step: 1 });
    assert_eq!(flow.generate().await.unwrap_err(), FlowError::IncompleteWizard(1));

    flow.prev_step().unwrap();
    assert_eq!(flow.step(), PlanningStep::Configure { step: 0 });
    flow.prev_step().unwrap();
    assert_eq!(flow.step(), PlanningStep::Configure { step: 0 });
}

#[tokio::test]
async fn empty_selection_is_rejected() {
    let store = StoreHandle::new();
    let seed = RequirementsFlow::new(store.clone(), Arc::new(MockProvider));
    seed.set_context("registration");
    seed.analyze().await.unwrap();

    let flow = TestCaseFlow::new(store, Arc::new(MockProvider));
    flow.proceed_to_select().unwrap();
    for id in flow.selected() {
        flow.toggle_selection(&id).unwrap();
    }
    assert_eq!(flow.generate().await.unwrap_err(), FlowError::EmptySelection);
}

#[tokio::test]
async fn manage_operations_keep_statistics_in_step() {
    let store = StoreHandle::new();
    let cases = vec![sample_case("TC-001"), sample_case("TC-002")];
    store.dispatch(Intent::UpdatePhaseData(PhasePatch::TestCases(TestCasesPatch {
        statistics: Some(Statistics::recompute(&cases)),
        test_cases: Some(cases),
        ..TestCasesPatch::default()
    })));

    // an existing suite resumes the flow at manage
    let flow = TestCaseFlow::new(store.clone(), Arc::new(MockProvider));
    assert_eq!(flow.step(), TestCaseStep::Manage);

    let mut new_case = sample_case("");
    new_case.priority = CasePriority::Low;
    let id = flow.add_case(new_case).unwrap();
    assert_eq!(id, "TC-003");
    store.with_store(|s| {
        let data = &s.state().phases.test_cases.data;
        assert_eq!(data.statistics.total, 3);
        assert_eq!(data.statistics.by_priority.low, 1);
    });

    let mut edited = sample_case("TC-001");
    edited.priority = CasePriority::Medium;
    flow.edit_case(edited).unwrap();
    store.with_store(|s| {
        assert_eq!(s.state().phases.test_cases.data.statistics.by_priority.medium, 1);
    });

    assert_eq!(
        flow.delete_case("TC-999").unwrap_err(),
        FlowError::UnknownTestCase("TC-999".to_string())
    );
    flow.delete_case("TC-002").unwrap();
    let removed = flow
        .bulk_delete(&["TC-001".to_string(), "TC-404".to_string()])
        .unwrap();
    assert_eq!(removed, 1);
    store.with_store(|s| {
        let data = &s.state().phases.test_cases.data;
        assert_eq!(data.test_cases.len(), 1);
        assert_eq!(data.statistics.total, 1);
    });
}

#[tokio::test]
async fn manual_requirements_unlock_analysis() {
    let store = StoreHandle::new();
    let flow = RequirementsFlow::new(store.clone(), Arc::new(MockProvider));
    assert_eq!(flow.analyze().await.unwrap_err(), FlowError::NothingToAnalyze);

    let id = flow.add_manual_requirement(stlc_state::ManualRequirement {
        title: "User login".to_string(),
        description: "Users sign in with email and password".to_string(),
        ..stlc_state::ManualRequirement::default()
    });
    assert_eq!(id, "FR-001");
    assert!(flow.can_analyze());
    store.with_store(|s| {
        assert_eq!(s.state().phases.requirements.data.functional_count, 1);
    });
}

#[tokio::test]
async fn wrong_step_calls_are_rejected() {
    let store = StoreHandle::new();
    let flow = TestCaseFlow::new(store, Arc::new(MockProvider));
    assert!(matches!(
        flow.toggle_selection("REQ-001").unwrap_err(),
        FlowError::WrongStep("toggle_selection")
    ));
    assert!(matches!(
        flow.add_case(sample_case("TC-001")).unwrap_err(),
        FlowError::WrongStep("add_case")
    ));
    assert!(matches!(
        flow.generate().await.unwrap_err(),
        FlowError::WrongStep("generate")
    ));
}
