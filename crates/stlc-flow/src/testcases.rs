//! Test case phase flow: configure → select → generate → manage
//!
//! Configuration picks the case categories to produce; selection narrows
//! the requirement set (everything is selected by default); manage offers
//! CRUD over the generated suite, recomputing the statistics after every
//! mutation so counters never drift from the list.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;

use stlc_state::phase::{PhasePatch, TestCasesPatch};
use stlc_state::store::Intent;
use stlc_state::testcase::{GenerationConfig, Statistics, TestCase};
use stlc_state::{NotificationKind, Phase, StoreHandle};

use stlc_ai::AnalysisProvider;

use crate::error::FlowError;
use crate::GenerationOutcome;

/// Current step of the test case flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCaseStep {
    Configure,
    Select,
    Generating,
    Manage,
}

#[derive(Debug)]
struct Inner {
    step: TestCaseStep,
    config: GenerationConfig,
    selected: BTreeSet<String>,
    seq: u64,
}

/// The test case development step machine
#[derive(Clone)]
pub struct TestCaseFlow {
    store: StoreHandle,
    provider: Arc<dyn AnalysisProvider>,
    inner: Arc<Mutex<Inner>>,
}

impl TestCaseFlow {
    #[must_use]
    pub fn new(store: StoreHandle, provider: Arc<dyn AnalysisProvider>) -> Self {
        // resume on manage when a suite already exists from a prior session
        let data = store.with_store(|s| s.state().phases.test_cases.data.clone());
        let step = if data.test_cases.is_empty() {
            TestCaseStep::Configure
        } else {
            TestCaseStep::Manage
        };
        Self {
            store,
            provider,
            inner: Arc::new(Mutex::new(Inner {
                step,
                config: data.configuration,
                selected: BTreeSet::new(),
                seq: 0,
            })),
        }
    }

    /// Current step
    #[must_use]
    pub fn step(&self) -> TestCaseStep {
        self.inner.lock().step
    }

    /// Snapshot of the generation configuration
    #[must_use]
    pub fn config(&self) -> GenerationConfig {
        self.inner.lock().config.clone()
    }

    /// Currently selected requirement ids, in id order
    #[must_use]
    pub fn selected(&self) -> Vec<String> {
        self.inner.lock().selected.iter().cloned().collect()
    }

    /// Edit the generation configuration. Only valid while configuring.
    pub fn edit_config(&self, edit: impl FnOnce(&mut GenerationConfig)) -> Result<(), FlowError> {
        let mut inner = self.inner.lock();
        if inner.step != TestCaseStep::Configure {
            return Err(FlowError::WrongStep("edit_config"));
        }
        edit(&mut inner.config);
        Ok(())
    }

    /// Move from configuration to requirement selection with every
    /// requirement selected.
    pub fn proceed_to_select(&self) -> Result<(), FlowError> {
        let mut inner = self.inner.lock();
        if inner.step != TestCaseStep::Configure {
            return Err(FlowError::WrongStep("proceed_to_select"));
        }
        inner.selected = self.store.with_store(|s| {
            s.state()
                .phases
                .requirements
                .data
                .requirements
                .iter()
                .map(|r| r.id.clone())
                .collect()
        });
        inner.step = TestCaseStep::Select;
        Ok(())
    }

    /// Toggle one requirement in or out of the selection.
    pub fn toggle_selection(&self, requirement_id: &str) -> Result<(), FlowError> {
        let mut inner = self.inner.lock();
        if inner.step != TestCaseStep::Select {
            return Err(FlowError::WrongStep("toggle_selection"));
        }
        if !inner.selected.remove(requirement_id) {
            inner.selected.insert(requirement_id.to_string());
        }
        Ok(())
    }

    /// Return from selection to configuration.
    pub fn back_to_configure(&self) -> Result<(), FlowError> {
        let mut inner = self.inner.lock();
        if inner.step != TestCaseStep::Select {
            return Err(FlowError::WrongStep("back_to_configure"));
        }
        inner.step = TestCaseStep::Configure;
        Ok(())
    }

    /// Abandon any in-flight generation and return to selection.
    pub fn abandon(&self) {
        let mut inner = self.inner.lock();
        inner.seq += 1;
        if inner.step == TestCaseStep::Generating {
            inner.step = TestCaseStep::Select;
        }
    }

    /// Generate test cases for the selected requirements.
    ///
    /// Success replaces the suite, recomputes the statistics and marks the
    /// phase fully progressed; failure reverts to selection with an error
    /// record and leaves stored data untouched.
    pub async fn generate(&self) -> Result<GenerationOutcome, FlowError> {
        let (requirements, config, my_seq) = {
            let mut inner = self.inner.lock();
            if inner.step != TestCaseStep::Select {
                return Err(FlowError::WrongStep("generate"));
            }
            if inner.selected.is_empty() {
                return Err(FlowError::EmptySelection);
            }
            let requirements = self.store.with_store(|s| {
                s.state()
                    .phases
                    .requirements
                    .data
                    .requirements
                    .iter()
                    .filter(|r| inner.selected.contains(&r.id))
                    .cloned()
                    .collect::<Vec<_>>()
            });
            inner.step = TestCaseStep::Generating;
            inner.seq += 1;
            (requirements, inner.config.clone(), inner.seq)
        };

        let result = self.provider.generate_test_cases(&requirements, &config).await;

        let mut inner = self.inner.lock();
        if inner.seq != my_seq {
            tracing::debug!("discarding stale test case response");
            return Ok(GenerationOutcome::Discarded);
        }
        match result {
            Ok(batch) => {
                let generated = batch.test_cases.len();
                self.store.dispatch(Intent::UpdatePhaseData(PhasePatch::TestCases(
                    TestCasesPatch {
                        statistics: Some(Statistics::recompute(&batch.test_cases)),
                        test_cases: Some(batch.test_cases),
                        configuration: Some(config),
                        generation_summary: Some(batch.summary),
                        recommendations: Some(batch.recommendations),
                    },
                )));
                self.store.dispatch(Intent::UpdatePhaseProgress {
                    phase: Phase::TestCases,
                    progress: 100,
                });
                self.store.notify(
                    NotificationKind::Success,
                    format!("Generated {generated} test cases successfully!"),
                );
                inner.step = TestCaseStep::Manage;
                Ok(GenerationOutcome::Completed)
            }
            Err(e) => {
                tracing::warn!(error = %e, "test case generation failed");
                self.store.dispatch(Intent::AddError {
                    message: "Failed to generate test cases. Please try again.".to_string(),
                });
                self.store.notify(
                    NotificationKind::Error,
                    "Failed to generate test cases. Please try again.",
                );
                inner.step = TestCaseStep::Select;
                Ok(GenerationOutcome::Failed)
            }
        }
    }

    /// Append a test case, assigning the next sequential id when the form
    /// left it blank.
    pub fn add_case(&self, mut case: TestCase) -> Result<String, FlowError> {
        self.ensure_manage("add_case")?;
        let mut cases = self.current_cases();
        case.ensure_id(cases.len());
        let id = case.id.clone();
        cases.push(case);
        self.store_cases(cases);
        Ok(id)
    }

    /// Replace the test case with the same id.
    pub fn edit_case(&self, case: TestCase) -> Result<(), FlowError> {
        self.ensure_manage("edit_case")?;
        let mut cases = self.current_cases();
        let Some(slot) = cases.iter_mut().find(|c| c.id == case.id) else {
            return Err(FlowError::UnknownTestCase(case.id));
        };
        *slot = case;
        self.store_cases(cases);
        Ok(())
    }

    /// Remove one test case by id.
    pub fn delete_case(&self, id: &str) -> Result<(), FlowError> {
        self.ensure_manage("delete_case")?;
        let mut cases = self.current_cases();
        let before = cases.len();
        cases.retain(|c| c.id != id);
        if cases.len() == before {
            return Err(FlowError::UnknownTestCase(id.to_string()));
        }
        self.store_cases(cases);
        Ok(())
    }

    /// Remove every test case whose id is in `ids`. Unknown ids are
    /// ignored; returns how many were removed.
    pub fn bulk_delete(&self, ids: &[String]) -> Result<usize, FlowError> {
        self.ensure_manage("bulk_delete")?;
        let mut cases = self.current_cases();
        let before = cases.len();
        cases.retain(|c| !ids.contains(&c.id));
        let removed = before - cases.len();
        if removed > 0 {
            self.store_cases(cases);
        }
        Ok(removed)
    }

    /// Mark the phase done. The lifecycle ends here, so there is no
    /// onward navigation.
    pub fn complete(&self) -> Result<(), FlowError> {
        self.ensure_manage("complete")?;
        self.store.dispatch(Intent::UpdatePhaseProgress {
            phase: Phase::TestCases,
            progress: 100,
        });
        self.store.notify(
            NotificationKind::Success,
            "Test case development phase completed!",
        );
        Ok(())
    }

    fn ensure_manage(&self, op: &'static str) -> Result<(), FlowError> {
        if self.inner.lock().step != TestCaseStep::Manage {
            return Err(FlowError::WrongStep(op));
        }
        Ok(())
    }

    fn current_cases(&self) -> Vec<TestCase> {
        self.store
            .with_store(|s| s.state().phases.test_cases.data.test_cases.clone())
    }

    fn store_cases(&self, cases: Vec<TestCase>) {
        self.store.dispatch(Intent::UpdatePhaseData(PhasePatch::TestCases(
            TestCasesPatch {
                statistics: Some(Statistics::recompute(&cases)),
                test_cases: Some(cases),
                ..TestCasesPatch::default()
            },
        )));
    }
}

impl std::fmt::Debug for TestCaseFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCaseFlow")
            .field("step", &self.step())
            .finish()
    }
}
