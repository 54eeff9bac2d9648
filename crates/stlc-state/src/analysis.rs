//! Structured results returned by the analysis provider
//!
//! Shapes mirror the JSON the provider is asked to produce; the store keeps
//! only distilled fields, the flows do the mapping.

use serde::{Deserialize, Serialize};

use crate::requirement::Requirement;

/// Quality metrics block of a requirements analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub total_requirements: usize,
    pub functional_count: usize,
    pub non_functional_count: usize,
    pub quality_score: u8,
    pub completeness_score: u8,
    pub clarity_score: u8,
    pub testability_score: u8,
}

/// A single analysis-time validation note (error, warning or suggestion)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationNote {
    #[serde(rename = "type")]
    pub note_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_id: Option<String>,
    pub message: String,
    pub severity: String,
}

/// Validation notes grouped by level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationNotes {
    pub errors: Vec<ValidationNote>,
    pub warnings: Vec<ValidationNote>,
    pub suggestions: Vec<ValidationNote>,
}

/// Effort estimate block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatedEffort {
    pub development_weeks: u32,
    pub testing_weeks: u32,
    pub total_story_points: u32,
}

/// Risk distribution over the analyzed requirements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
}

impl RiskAssessment {
    /// Derive the distribution from a requirement set.
    #[must_use]
    pub fn from_requirements(requirements: &[Requirement]) -> Self {
        use crate::requirement::RiskLevel;
        let mut out = Self::default();
        for req in requirements {
            match req.risk_level {
                RiskLevel::High | RiskLevel::Critical => out.high_risk_count += 1,
                RiskLevel::Medium => out.medium_risk_count += 1,
                RiskLevel::Low => out.low_risk_count += 1,
            }
        }
        out
    }
}

/// Full result of the requirements-analysis call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementAnalysis {
    pub requirements: Vec<Requirement>,
    pub quality_metrics: QualityMetrics,
    pub validation_results: ValidationNotes,
    pub stakeholders: Vec<String>,
    pub business_drivers: Vec<String>,
    pub estimated_effort: EstimatedEffort,
    pub risk_assessment: RiskAssessment,
}

/// Finding level in a static validation report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Error,
    Warning,
    Suggestion,
}

/// Finding classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    FormalError,
    Ambiguity,
    Contradiction,
    Gap,
    Enhancement,
}

/// Finding severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// One finding from the static requirements validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub category: FindingCategory,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_id: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Issue counts for a validation report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSummary {
    pub total_issues: usize,
    pub critical_issues: usize,
    pub warnings: usize,
    pub suggestions: usize,
}

/// Result of the static requirements-validation call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationReport {
    pub overall_score: u8,
    pub summary: ValidationSummary,
    pub findings: Vec<Finding>,
}

impl Default for FindingKind {
    fn default() -> Self {
        FindingKind::Suggestion
    }
}
