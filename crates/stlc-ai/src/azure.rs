//! Azure OpenAI-compatible chat-completions provider
//!
//! Talks to `{endpoint}/openai/deployments/{deployment}/chat/completions`
//! with the `api-key` header. Each operation sends a system/user prompt pair
//! asking for a bare JSON document and parses the reply content into the
//! typed result shapes. Every call runs under a deadline.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use stlc_state::analysis::{RequirementAnalysis, ValidationReport};
use stlc_state::plan::{ProjectInfo, TestPlan};
use stlc_state::requirement::Requirement;
use stlc_state::testcase::{GenerationConfig, TestCaseBatch};

use crate::error::AiError;
use crate::provider::AnalysisProvider;

/// Default per-call deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const ENDPOINT_VAR: &str = "STLC_AZURE_ENDPOINT";
const DEPLOYMENT_VAR: &str = "STLC_AZURE_DEPLOYMENT";
const API_KEY_VAR: &str = "STLC_AZURE_API_KEY";
const API_VERSION_VAR: &str = "STLC_AZURE_API_VERSION";
const DEFAULT_API_VERSION: &str = "2024-02-01";

/// Connection settings for the remote provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    /// Base URL, e.g. `https://example.openai.azure.com`
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
    pub api_key: String,
}

impl AzureConfig {
    /// Read the configuration from the environment. `None` when the
    /// endpoint, deployment or key is unset; the caller then runs
    /// mock-only, which is the normal unconfigured mode.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var(ENDPOINT_VAR).ok()?;
        let deployment = std::env::var(DEPLOYMENT_VAR).ok()?;
        let api_key = std::env::var(API_KEY_VAR).ok()?;
        let api_version =
            std::env::var(API_VERSION_VAR).unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
        Some(Self {
            endpoint,
            deployment,
            api_version,
            api_key,
        })
    }

    /// Full chat-completions URL for this configuration
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    // f64: JSON numbers are double-precision, f32 would round 0.7 on the wire
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

impl ChatRequest {
    fn new(messages: Vec<ChatMessage>, max_tokens: u32) -> Self {
        Self {
            messages,
            max_tokens,
            temperature: 0.7,
            top_p: 0.95,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Remote analysis provider over an Azure OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct AzureOpenAiProvider {
    client: reqwest::Client,
    config: AzureConfig,
    timeout: Duration,
}

impl AzureOpenAiProvider {
    /// Provider with the default per-call deadline
    #[must_use]
    pub fn new(config: AzureConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-call deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one chat completion and return the reply content.
    async fn complete(
        &self,
        system: &str,
        user: String,
        max_tokens: u32,
    ) -> Result<String, AiError> {
        let request = ChatRequest::new(
            vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens,
        );
        let call = async {
            let response = self
                .client
                .post(self.config.completions_url())
                .header("api-key", &self.config.api_key)
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let message = response
                    .json::<ApiErrorBody>()
                    .await
                    .ok()
                    .and_then(|b| b.error)
                    .map(|e| e.message)
                    .unwrap_or_else(|| "unknown error".to_string());
                return Err(AiError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body: ChatResponse = response.json().await?;
            body.choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .ok_or(AiError::EmptyResponse)
        };

        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AiError::Timeout(self.timeout)),
        }
    }

    /// Parse reply content as JSON, tolerating a markdown code fence around
    /// the document.
    fn parse_content<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, AiError> {
        let trimmed = strip_code_fence(content.trim());
        Ok(serde_json::from_str(trimmed)?)
    }
}

fn strip_code_fence(content: &str) -> &str {
    let Some(inner) = content.strip_prefix("```") else {
        return content;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner
        .strip_suffix("```")
        .unwrap_or(inner)
        .trim()
}

#[async_trait]
impl AnalysisProvider for AzureOpenAiProvider {
    async fn analyze_requirements(
        &self,
        content: &str,
        context: &str,
    ) -> Result<RequirementAnalysis, AiError> {
        let prompt = format!(
            "You are a requirements analysis expert. Analyze the following requirements \
             document and provide a comprehensive analysis in JSON format.\n\n\
             Requirements Document Content:\n{content}\n\n\
             Business Context:\n{context}\n\n\
             Please provide a detailed analysis including:\n\
             1. Extracted requirements with structured format (id, title, description, type, \
             priority, category, acceptance_criteria, business_value, complexity, risk_level)\n\
             2. Quality metrics (total_requirements, functional_count, non_functional_count, \
             quality_score, completeness_score, clarity_score, testability_score)\n\
             3. Validation results (errors, warnings, suggestions)\n\
             4. Identified stakeholders\n\
             5. Business drivers\n\
             6. Estimated effort (development_weeks, testing_weeks, total_story_points)\n\
             7. Risk assessment (high_risk_count, medium_risk_count, low_risk_count)\n\n\
             Return only valid JSON without any markdown formatting."
        );
        let reply = self
            .complete(
                "You are an expert requirements analyst. Provide detailed, structured \
                 analysis in JSON format only.",
                prompt,
                4000,
            )
            .await?;
        tracing::debug!("requirements analysis response received");
        Self::parse_content(&reply)
    }

    async fn validate_requirements(
        &self,
        requirements: &[Requirement],
    ) -> Result<ValidationReport, AiError> {
        let prompt = format!(
            "You are a requirements validation expert. Perform static analysis on the \
             following requirements to detect formal errors, ambiguities, contradictions, \
             and gaps in JSON format.\n\n\
             Requirements to validate:\n{}\n\n\
             Please provide comprehensive validation including:\n\
             1. overall_score (0-100 representing overall quality score)\n\
             2. summary (object with total_issues, critical_issues, warnings, suggestions)\n\
             3. findings (array of finding objects with: id, type [error|warning|suggestion], \
             category [formal_error|ambiguity|contradiction|gap|enhancement], title, \
             description, severity [critical|high|medium|low], requirement_id, suggestions \
             array)\n\n\
             Analysis focus areas:\n\
             - Formal structure and completeness\n\
             - Clarity and unambiguous language\n\
             - Consistency across requirements\n\
             - Missing information or gaps\n\
             - Testability and measurability\n\
             - Dependencies and conflicts\n\n\
             Return only valid JSON without any markdown formatting.",
            serde_json::to_string_pretty(requirements)?
        );
        let reply = self
            .complete(
                "You are an expert requirements validation specialist. Provide detailed \
                 static analysis in JSON format only.",
                prompt,
                3000,
            )
            .await?;
        tracing::debug!("requirements validation response received");
        Self::parse_content(&reply)
    }

    async fn generate_test_plan(&self, project: &ProjectInfo) -> Result<TestPlan, AiError> {
        let prompt = format!(
            "You are a test planning expert. Generate a comprehensive test plan based on \
             the following project information in JSON format.\n\n\
             Project Information:\n{}\n\n\
             Please provide a detailed test plan including:\n\
             1. objective (string)\n\
             2. scope (object with inclusions and exclusions arrays)\n\
             3. approach (object with strategy, methodology, and phases)\n\
             4. test_types (array)\n\
             5. environment (object with test_environments, tools, infrastructure)\n\
             6. resources (object with team_size, roles, duration, effort)\n\
             7. schedule (object with phases array containing name, duration, start)\n\
             8. risks (array with risk, impact, probability, mitigation)\n\
             9. tools (object with various tool categories)\n\
             10. deliverables (array)\n\
             11. success_criteria (array)\n\n\
             Return only valid JSON without any markdown formatting.",
            serde_json::to_string_pretty(project)?
        );
        let reply = self
            .complete(
                "You are an expert test planning specialist. Generate comprehensive test \
                 plans in JSON format only.",
                prompt,
                4000,
            )
            .await?;
        tracing::debug!("test plan response received");
        Self::parse_content(&reply)
    }

    async fn generate_test_cases(
        &self,
        requirements: &[Requirement],
        config: &GenerationConfig,
    ) -> Result<TestCaseBatch, AiError> {
        let prompt = format!(
            "You are a test case generation expert. Generate comprehensive test cases based \
             on the following requirements and configuration in JSON format.\n\n\
             Requirements:\n{}\n\n\
             Configuration:\n{}\n\n\
             Please provide:\n\
             1. test_cases (array of test case objects with: id, title, description, \
             requirement_id, type, priority, category, test_type, preconditions, steps, \
             expected_result, test_data, tags, estimated_time, status, created_at, \
             automated)\n\
             2. summary (object with total_generated, by_type, by_priority, \
             estimated_total_time, automation_candidates)\n\
             3. recommendations (array of strings)\n\n\
             Generate test cases based on configuration settings:\n\
             - includePositive: generate positive test cases\n\
             - includeNegative: generate negative test cases\n\
             - includeBoundary: generate boundary test cases\n\n\
             Return only valid JSON without any markdown formatting.",
            serde_json::to_string_pretty(requirements)?,
            serde_json::to_string_pretty(config)?
        );
        let reply = self
            .complete(
                "You are an expert test case generator. Create comprehensive test cases in \
                 JSON format only.",
                prompt,
                4000,
            )
            .await?;
        tracing::debug!("test case generation response received");
        Self::parse_content(&reply)
    }
}
