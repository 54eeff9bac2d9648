//! Planning phase flow: four-step wizard → generate → review
//!
//! The wizard is edited locally and only lands in phase data when a plan
//! is generated from it, so half-filled forms never survive a restart.
//! Forward navigation is gated on the current wizard step being complete;
//! backward navigation is always allowed.

use std::sync::Arc;

use parking_lot::Mutex;

use stlc_state::phase::{PhasePatch, PlanningPatch};
use stlc_state::plan::{ProjectInfo, WizardForm, WIZARD_STEPS};
use stlc_state::store::Intent;
use stlc_state::{Nav, NotificationKind, Phase, StoreHandle};

use stlc_ai::AnalysisProvider;

use crate::error::FlowError;
use crate::GenerationOutcome;

/// Current step of the planning flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanningStep {
    /// Wizard page index in `0..WIZARD_STEPS`
    Configure { step: usize },
    Generating,
    Review,
}

#[derive(Debug)]
struct Inner {
    step: PlanningStep,
    form: WizardForm,
    seq: u64,
}

/// The planning phase step machine
#[derive(Clone)]
pub struct PlanningFlow {
    store: StoreHandle,
    provider: Arc<dyn AnalysisProvider>,
    inner: Arc<Mutex<Inner>>,
}

impl PlanningFlow {
    #[must_use]
    pub fn new(store: StoreHandle, provider: Arc<dyn AnalysisProvider>) -> Self {
        // resume on review when a plan already exists from a prior session
        let step = if store.with_store(|s| s.state().phases.planning.data.generated_plan.is_some())
        {
            PlanningStep::Review
        } else {
            PlanningStep::Configure { step: 0 }
        };
        let form = store.with_store(|s| s.state().phases.planning.data.wizard.clone());
        Self {
            store,
            provider,
            inner: Arc::new(Mutex::new(Inner { step, form, seq: 0 })),
        }
    }

    /// Current step
    #[must_use]
    pub fn step(&self) -> PlanningStep {
        self.inner.lock().step
    }

    /// Snapshot of the wizard answers
    #[must_use]
    pub fn form(&self) -> WizardForm {
        self.inner.lock().form.clone()
    }

    /// Edit the wizard answers in place. Only valid while configuring.
    pub fn edit_form(&self, edit: impl FnOnce(&mut WizardForm)) -> Result<(), FlowError> {
        let mut inner = self.inner.lock();
        if !matches!(inner.step, PlanningStep::Configure { .. }) {
            return Err(FlowError::WrongStep("edit_form"));
        }
        edit(&mut inner.form);
        Ok(())
    }

    /// Advance to the next wizard page. Returns `false` without moving
    /// when the current page's answers are incomplete.
    pub fn next_step(&self) -> Result<bool, FlowError> {
        let mut inner = self.inner.lock();
        let PlanningStep::Configure { step } = inner.step else {
            return Err(FlowError::WrongStep("next_step"));
        };
        if !inner.form.is_step_complete(step) {
            return Ok(false);
        }
        if step + 1 < WIZARD_STEPS {
            inner.step = PlanningStep::Configure { step: step + 1 };
        }
        Ok(true)
    }

    /// Go back one wizard page; a no-op on the first page.
    pub fn prev_step(&self) -> Result<(), FlowError> {
        let mut inner = self.inner.lock();
        let PlanningStep::Configure { step } = inner.step else {
            return Err(FlowError::WrongStep("prev_step"));
        };
        inner.step = PlanningStep::Configure {
            step: step.saturating_sub(1),
        };
        Ok(())
    }

    /// Abandon any in-flight generation and return to the last wizard page.
    pub fn abandon(&self) {
        let mut inner = self.inner.lock();
        inner.seq += 1;
        if inner.step == PlanningStep::Generating {
            inner.step = PlanningStep::Configure {
                step: WIZARD_STEPS - 1,
            };
        }
    }

    /// Generate the test plan from the completed wizard.
    ///
    /// Success stores the wizard answers and the plan together and marks
    /// the phase fully progressed; failure reverts to configuring with an
    /// error record and leaves stored data untouched.
    pub async fn generate(&self) -> Result<GenerationOutcome, FlowError> {
        let (info, form, my_seq) = {
            let mut inner = self.inner.lock();
            if !matches!(inner.step, PlanningStep::Configure { .. }) {
                return Err(FlowError::WrongStep("generate"));
            }
            if let Some(incomplete) =
                (0..WIZARD_STEPS).find(|&s| !inner.form.is_step_complete(s))
            {
                return Err(FlowError::IncompleteWizard(incomplete));
            }
            let requirement_count = self
                .store
                .with_store(|s| s.state().phases.requirements.data.requirements.len());
            inner.step = PlanningStep::Generating;
            inner.seq += 1;
            (
                ProjectInfo::from_wizard(&inner.form, requirement_count),
                inner.form.clone(),
                inner.seq,
            )
        };

        let result = self.provider.generate_test_plan(&info).await;

        let mut inner = self.inner.lock();
        if inner.seq != my_seq {
            tracing::debug!("discarding stale test plan response");
            return Ok(GenerationOutcome::Discarded);
        }
        match result {
            Ok(plan) => {
                self.store
                    .dispatch(Intent::UpdatePhaseData(PhasePatch::Planning(PlanningPatch {
                        wizard: Some(form),
                        generated_plan: Some(plan),
                    })));
                self.store.dispatch(Intent::UpdatePhaseProgress {
                    phase: Phase::Planning,
                    progress: 100,
                });
                self.store
                    .notify(NotificationKind::Success, "Test plan generated successfully!");
                inner.step = PlanningStep::Review;
                Ok(GenerationOutcome::Completed)
            }
            Err(e) => {
                tracing::warn!(error = %e, "test plan generation failed");
                self.store.dispatch(Intent::AddError {
                    message: "Failed to generate test plan. Please try again.".to_string(),
                });
                self.store.notify(
                    NotificationKind::Error,
                    "Failed to generate test plan. Please try again.",
                );
                inner.step = PlanningStep::Configure {
                    step: WIZARD_STEPS - 1,
                };
                Ok(GenerationOutcome::Failed)
            }
        }
    }

    /// Return from review to the wizard for another round of edits.
    pub fn revise(&self) -> Result<(), FlowError> {
        let mut inner = self.inner.lock();
        if inner.step != PlanningStep::Review {
            return Err(FlowError::WrongStep("revise"));
        }
        inner.step = PlanningStep::Configure { step: 0 };
        Ok(())
    }

    /// Approve the reviewed plan and navigate to test case development.
    pub fn approve(&self) -> Result<(), FlowError> {
        let inner = self.inner.lock();
        if inner.step != PlanningStep::Review {
            return Err(FlowError::WrongStep("approve"));
        }
        self.store.dispatch(Intent::UpdatePhaseProgress {
            phase: Phase::Planning,
            progress: 100,
        });
        self.store.notify(
            NotificationKind::Success,
            "Test plan approved! Moving to next phase.",
        );
        self.store.dispatch(Intent::SetCurrentPhase(Nav::TestCases));
        Ok(())
    }
}

impl std::fmt::Debug for PlanningFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanningFlow")
            .field("step", &self.step())
            .finish()
    }
}
