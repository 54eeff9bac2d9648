//! Remote-with-mock-fallback combinator
//!
//! Mirrors the product behavior: when a remote endpoint is configured, try
//! it first; on any failure (missing config, HTTP error, unparseable reply,
//! timeout) log the failure and serve the deterministic offline result
//! instead. The workflow never sees a remote error.

use std::sync::Arc;

use async_trait::async_trait;

use stlc_state::analysis::{RequirementAnalysis, ValidationReport};
use stlc_state::plan::{ProjectInfo, TestPlan};
use stlc_state::requirement::Requirement;
use stlc_state::testcase::{GenerationConfig, TestCaseBatch};

use crate::azure::{AzureConfig, AzureOpenAiProvider};
use crate::error::AiError;
use crate::mock::MockProvider;
use crate::provider::AnalysisProvider;

/// Provider that prefers a remote backend and falls back to [`MockProvider`]
#[derive(Clone)]
pub struct FallbackProvider {
    remote: Option<Arc<dyn AnalysisProvider>>,
    mock: MockProvider,
}

impl FallbackProvider {
    /// Mock-only provider (no endpoint configured)
    #[must_use]
    pub fn mock_only() -> Self {
        Self {
            remote: None,
            mock: MockProvider::new(),
        }
    }

    /// Provider preferring the given remote backend
    #[must_use]
    pub fn with_remote(remote: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            remote: Some(remote),
            mock: MockProvider::new(),
        }
    }

    /// Build from the environment: remote-backed when the endpoint
    /// variables are set, mock-only otherwise.
    #[must_use]
    pub fn from_env() -> Self {
        match AzureConfig::from_env() {
            Some(config) => {
                tracing::info!(endpoint = %config.endpoint, "remote analysis provider configured");
                Self::with_remote(Arc::new(AzureOpenAiProvider::new(config)))
            }
            None => {
                tracing::info!("no remote analysis endpoint configured, using offline provider");
                Self::mock_only()
            }
        }
    }

    /// Whether a remote backend is attached
    #[inline]
    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }
}

impl Default for FallbackProvider {
    fn default() -> Self {
        Self::mock_only()
    }
}

impl std::fmt::Debug for FallbackProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackProvider")
            .field("has_remote", &self.has_remote())
            .finish()
    }
}

macro_rules! remote_or_mock {
    ($self:ident, $op:literal, $call:ident ( $($arg:expr),* )) => {{
        if let Some(remote) = &$self.remote {
            match remote.$call($($arg),*).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    tracing::warn!(operation = $op, error = %e, "remote analysis failed, using offline result");
                }
            }
        }
        $self.mock.$call($($arg),*).await
    }};
}

#[async_trait]
impl AnalysisProvider for FallbackProvider {
    async fn analyze_requirements(
        &self,
        content: &str,
        context: &str,
    ) -> Result<RequirementAnalysis, AiError> {
        remote_or_mock!(self, "analyze_requirements", analyze_requirements(content, context))
    }

    async fn validate_requirements(
        &self,
        requirements: &[Requirement],
    ) -> Result<ValidationReport, AiError> {
        remote_or_mock!(self, "validate_requirements", validate_requirements(requirements))
    }

    async fn generate_test_plan(&self, project: &ProjectInfo) -> Result<TestPlan, AiError> {
        remote_or_mock!(self, "generate_test_plan", generate_test_plan(project))
    }

    async fn generate_test_cases(
        &self,
        requirements: &[Requirement],
        config: &GenerationConfig,
    ) -> Result<TestCaseBatch, AiError> {
        remote_or_mock!(self, "generate_test_cases", generate_test_cases(requirements, config))
    }
}
