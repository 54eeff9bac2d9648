//! The analysis provider trait

use async_trait::async_trait;

use stlc_state::analysis::{RequirementAnalysis, ValidationReport};
use stlc_state::plan::{ProjectInfo, TestPlan};
use stlc_state::requirement::Requirement;
use stlc_state::testcase::{GenerationConfig, TestCaseBatch};

use crate::error::AiError;

/// The four analysis operations the workflow phases depend on.
///
/// Implementations must be side-effect free with respect to project state:
/// they take inputs and return typed results, and the flows decide what to
/// merge into the store.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Extract structured requirements plus quality and risk analysis from
    /// raw document content and optional business context.
    async fn analyze_requirements(
        &self,
        content: &str,
        context: &str,
    ) -> Result<RequirementAnalysis, AiError>;

    /// Static validation of an existing requirement set: formal errors,
    /// ambiguities, contradictions and gaps, scored 0..=100.
    async fn validate_requirements(
        &self,
        requirements: &[Requirement],
    ) -> Result<ValidationReport, AiError>;

    /// Generate a full test plan from the wizard's project information.
    async fn generate_test_plan(&self, project: &ProjectInfo) -> Result<TestPlan, AiError>;

    /// Expand requirements into test cases per the generation settings.
    async fn generate_test_cases(
        &self,
        requirements: &[Requirement],
        config: &GenerationConfig,
    ) -> Result<TestCaseBatch, AiError>;
}
