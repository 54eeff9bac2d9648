//! Requirements phase flow: gather → analyze → review
//!
//! Gathering accepts uploaded files, free-text business context and manual
//! requirement entries in any non-empty combination. Analysis is a
//! transient step with no user-initiated exit: it resolves to review on
//! success or back to gather on failure. Each analysis carries a sequence
//! number; a response whose number is stale by the time it resolves (the
//! flow was abandoned or re-triggered) is discarded without touching the
//! store.

use std::sync::Arc;

use parking_lot::Mutex;

use stlc_state::phase::{PhasePatch, RequirementsPatch, UploadedFile};
use stlc_state::requirement::{ManualRequirement, ReqType, Requirement};
use stlc_state::store::Intent;
use stlc_state::{Nav, NotificationKind, Phase, StoreHandle};

use stlc_ai::AnalysisProvider;

use crate::error::FlowError;
use crate::GenerationOutcome;

/// Progress checkpoint after a successful analysis
const ANALYZED_PROGRESS: u8 = 50;

/// Current step of the requirements flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementsStep {
    Gather,
    Analyzing,
    Review,
}

#[derive(Debug)]
struct Inner {
    step: RequirementsStep,
    files: Vec<UploadedFile>,
    context: String,
    seq: u64,
}

/// The requirements phase step machine
#[derive(Clone)]
pub struct RequirementsFlow {
    store: StoreHandle,
    provider: Arc<dyn AnalysisProvider>,
    inner: Arc<Mutex<Inner>>,
}

impl RequirementsFlow {
    #[must_use]
    pub fn new(store: StoreHandle, provider: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            store,
            provider,
            inner: Arc::new(Mutex::new(Inner {
                step: RequirementsStep::Gather,
                files: Vec::new(),
                context: String::new(),
                seq: 0,
            })),
        }
    }

    /// Current step
    #[must_use]
    pub fn step(&self) -> RequirementsStep {
        self.inner.lock().step
    }

    /// Add an uploaded document to the gather inputs.
    pub fn add_file(&self, name: impl Into<String>, content: impl Into<String>) {
        self.inner.lock().files.push(UploadedFile {
            name: name.into(),
            content: content.into(),
        });
    }

    /// Remove a previously added document by name.
    pub fn remove_file(&self, name: &str) {
        self.inner.lock().files.retain(|f| f.name != name);
    }

    /// Set the free-text business context.
    pub fn set_context(&self, context: impl Into<String>) {
        self.inner.lock().context = context.into();
    }

    /// Append a manually entered requirement to the store and return its id.
    ///
    /// Manual entries land in phase data immediately; they are not local
    /// flow state, so they survive navigation.
    pub fn add_manual_requirement(&self, form: ManualRequirement) -> String {
        let mut requirements = self
            .store
            .with_store(|s| s.state().phases.requirements.data.requirements.clone());
        let requirement = Requirement::manual(&requirements, form);
        let id = requirement.id.clone();
        requirements.push(requirement);
        self.store.dispatch(Intent::UpdatePhaseData(PhasePatch::Requirements(
            RequirementsPatch {
                functional_count: Some(count_of(&requirements, ReqType::Functional)),
                non_functional_count: Some(count_of(&requirements, ReqType::NonFunctional)),
                requirements: Some(requirements),
                ..RequirementsPatch::default()
            },
        )));
        id
    }

    /// Whether the gather inputs unlock analysis
    #[must_use]
    pub fn can_analyze(&self) -> bool {
        let inner = self.inner.lock();
        let has_local = !inner.files.is_empty() || !inner.context.trim().is_empty();
        has_local
            || self
                .store
                .with_store(|s| !s.state().phases.requirements.data.requirements.is_empty())
    }

    /// Abandon any in-flight analysis and return to gathering. A response
    /// resolving after this call is discarded.
    pub fn abandon(&self) {
        let mut inner = self.inner.lock();
        inner.seq += 1;
        inner.step = RequirementsStep::Gather;
    }

    /// Run the analysis call and, on success, the follow-up validation.
    ///
    /// Success merges the combined manual + analyzed requirements into
    /// phase data and checkpoints progress; failure reverts to gather and
    /// records the error. Neither failure nor a stale response touches
    /// previously stored data.
    pub async fn analyze(&self) -> Result<GenerationOutcome, FlowError> {
        let (content, context, my_seq) = {
            let mut inner = self.inner.lock();
            if inner.step != RequirementsStep::Gather {
                return Err(FlowError::WrongStep("analyze"));
            }
            let has_manual = self
                .store
                .with_store(|s| !s.state().phases.requirements.data.requirements.is_empty());
            if inner.files.is_empty() && inner.context.trim().is_empty() && !has_manual {
                return Err(FlowError::NothingToAnalyze);
            }
            inner.step = RequirementsStep::Analyzing;
            inner.seq += 1;
            (combined_content(&inner), inner.context.clone(), inner.seq)
        };

        let analysis = self.provider.analyze_requirements(&content, &context).await;

        let result = match analysis {
            Ok(analysis) => {
                // combined view: manual entries first, then analyzed ones
                let mut requirements = self
                    .store
                    .with_store(|s| s.state().phases.requirements.data.requirements.clone());
                requirements.extend(analysis.requirements.iter().cloned());
                let validation = self.provider.validate_requirements(&requirements).await.ok();
                Ok((analysis, requirements, validation))
            }
            Err(e) => Err(e),
        };

        let mut inner = self.inner.lock();
        if inner.seq != my_seq {
            tracing::debug!("discarding stale requirements analysis response");
            return Ok(GenerationOutcome::Discarded);
        }
        match result {
            Ok((analysis, requirements, validation)) => {
                let files = inner.files.clone();
                self.store.dispatch(Intent::UpdatePhaseData(PhasePatch::Requirements(
                    RequirementsPatch {
                        functional_count: Some(count_of(&requirements, ReqType::Functional)),
                        non_functional_count: Some(count_of(&requirements, ReqType::NonFunctional)),
                        quality_score: Some(analysis.quality_metrics.quality_score),
                        risk_count: Some(analysis.risk_assessment.high_risk_count),
                        stakeholders: Some(analysis.stakeholders),
                        business_drivers: Some(analysis.business_drivers),
                        uploaded_files: Some(files),
                        validation,
                        requirements: Some(requirements),
                    },
                )));
                self.store.dispatch(Intent::UpdatePhaseProgress {
                    phase: Phase::Requirements,
                    progress: ANALYZED_PROGRESS,
                });
                self.store
                    .notify(NotificationKind::Success, "Requirements analyzed successfully!");
                inner.step = RequirementsStep::Review;
                Ok(GenerationOutcome::Completed)
            }
            Err(e) => {
                tracing::warn!(error = %e, "requirements analysis failed");
                self.store.dispatch(Intent::AddError {
                    message: "Failed to analyze requirements. Please try again.".to_string(),
                });
                self.store.notify(
                    NotificationKind::Error,
                    "Failed to analyze requirements. Please try again.",
                );
                inner.step = RequirementsStep::Gather;
                Ok(GenerationOutcome::Failed)
            }
        }
    }

    /// Finish the phase: progress to 100 and navigate to planning.
    pub fn complete(&self) -> Result<(), FlowError> {
        let inner = self.inner.lock();
        if inner.step != RequirementsStep::Review {
            return Err(FlowError::WrongStep("complete"));
        }
        self.store.dispatch(Intent::UpdatePhaseProgress {
            phase: Phase::Requirements,
            progress: 100,
        });
        self.store.notify(
            NotificationKind::Success,
            "Requirements analysis phase completed!",
        );
        self.store.dispatch(Intent::SetCurrentPhase(Nav::Planning));
        drop(inner);
        Ok(())
    }
}

fn count_of(requirements: &[Requirement], req_type: ReqType) -> usize {
    requirements
        .iter()
        .filter(|r| r.req_type == req_type)
        .count()
}

fn combined_content(inner: &Inner) -> String {
    let combined: Vec<String> = inner
        .files
        .iter()
        .filter(|f| !f.content.is_empty())
        .map(|f| format!("File: {}\n{}", f.name, f.content))
        .collect();
    if combined.is_empty() {
        inner.context.clone()
    } else {
        combined.join("\n\n")
    }
}

impl std::fmt::Debug for RequirementsFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequirementsFlow")
            .field("step", &self.step())
            .finish()
    }
}
