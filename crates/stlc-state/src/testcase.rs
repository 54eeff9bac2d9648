//! Test case records and derived statistics
//!
//! Statistics are always recomputed in full from the current list, never
//! patched incrementally, which keeps them immune to drift across
//! add/edit/delete and bulk operations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Test case flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    Positive,
    Negative,
    Boundary,
}

impl std::fmt::Display for CaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CaseType::Positive => "positive",
            CaseType::Negative => "negative",
            CaseType::Boundary => "boundary",
        };
        f.write_str(name)
    }
}

/// Test case priority (three levels, unlike requirement priority)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasePriority {
    High,
    Medium,
    Low,
}

impl From<crate::requirement::Priority> for CasePriority {
    fn from(p: crate::requirement::Priority) -> Self {
        use crate::requirement::Priority;
        match p {
            Priority::Critical | Priority::High => CasePriority::High,
            Priority::Medium => CasePriority::Medium,
            Priority::Low => CasePriority::Low,
        }
    }
}

impl std::fmt::Display for CasePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CasePriority::High => "high",
            CasePriority::Medium => "medium",
            CasePriority::Low => "low",
        };
        f.write_str(name)
    }
}

/// Review status of a test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Draft,
    Review,
    Approved,
}

impl Default for CaseStatus {
    fn default() -> Self {
        CaseStatus::Draft
    }
}

/// A single action/expected pair within a test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStep {
    pub step: u32,
    pub action: String,
    pub expected: String,
}

impl TestStep {
    #[inline]
    #[must_use]
    pub fn new(step: u32, action: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            step,
            action: action.into(),
            expected: expected.into(),
        }
    }
}

/// A single test case record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// `TC-NNN`, generated from list length + 1 when not supplied
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_id: Option<String>,
    #[serde(rename = "type")]
    pub case_type: CaseType,
    pub priority: CasePriority,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub test_type: String,
    /// Ordered setup conditions
    #[serde(default)]
    pub preconditions: Vec<String>,
    /// Ordered action/expected pairs
    #[serde(default)]
    pub steps: Vec<TestStep>,
    #[serde(default)]
    pub expected_result: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub test_data: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub status: CaseStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub automated: bool,
}

impl TestCase {
    /// Id for the case at position `existing_len` in the list, zero-padded
    /// to three digits (`TC-001` for the first case).
    #[inline]
    #[must_use]
    pub fn next_id(existing_len: usize) -> String {
        format!("TC-{:03}", existing_len + 1)
    }

    /// Fill in the id from the current list length when none was supplied.
    pub fn ensure_id(&mut self, existing_len: usize) {
        if self.id.is_empty() {
            self.id = Self::next_id(existing_len);
        }
    }
}

/// Counts by priority; the three buckets always sum to the list length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Counts by review status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub draft: usize,
    pub review: usize,
    pub approved: usize,
}

/// Counts by case type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub positive: usize,
    pub negative: usize,
    pub boundary: usize,
}

/// Derived statistics over a test case list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub by_priority: PriorityCounts,
    pub by_status: StatusCounts,
    pub by_type: TypeCounts,
}

impl Statistics {
    /// Recompute all counters from scratch.
    #[must_use]
    pub fn recompute(cases: &[TestCase]) -> Self {
        let mut stats = Statistics {
            total: cases.len(),
            ..Statistics::default()
        };
        for case in cases {
            match case.priority {
                CasePriority::High => stats.by_priority.high += 1,
                CasePriority::Medium => stats.by_priority.medium += 1,
                CasePriority::Low => stats.by_priority.low += 1,
            }
            match case.status {
                CaseStatus::Draft => stats.by_status.draft += 1,
                CaseStatus::Review => stats.by_status.review += 1,
                CaseStatus::Approved => stats.by_status.approved += 1,
            }
            match case.case_type {
                CaseType::Positive => stats.by_type.positive += 1,
                CaseType::Negative => stats.by_type.negative += 1,
                CaseType::Boundary => stats.by_type.boundary += 1,
            }
        }
        stats
    }
}

/// Generation settings for the test-case phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub include_positive: bool,
    pub include_negative: bool,
    pub include_boundary: bool,
    pub test_types: Vec<String>,
    pub complexity: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            include_positive: true,
            include_negative: true,
            include_boundary: true,
            test_types: vec!["functional".to_string()],
            complexity: "medium".to_string(),
        }
    }
}

/// Summary block attached to a generation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub total_generated: usize,
    pub by_type: TypeCounts,
    pub by_priority: PriorityCounts,
    pub estimated_total_time: String,
    pub automation_candidates: usize,
}

/// A batch of generated test cases plus metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseBatch {
    pub test_cases: Vec<TestCase>,
    pub summary: GenerationSummary,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str, priority: CasePriority, case_type: CaseType, status: CaseStatus) -> TestCase {
        TestCase {
            id: id.to_string(),
            title: format!("case {id}"),
            description: String::new(),
            requirement_id: None,
            case_type,
            priority,
            category: "General".to_string(),
            test_type: "functional".to_string(),
            preconditions: Vec::new(),
            steps: Vec::new(),
            expected_result: String::new(),
            test_data: BTreeMap::new(),
            tags: Vec::new(),
            estimated_time: "15 minutes".to_string(),
            status,
            created_at: Utc::now(),
            automated: false,
        }
    }

    #[test]
    fn next_id_is_length_plus_one_zero_padded() {
        assert_eq!(TestCase::next_id(0), "TC-001");
        assert_eq!(TestCase::next_id(1), "TC-002");
        assert_eq!(TestCase::next_id(99), "TC-100");
    }

    #[test]
    fn ensure_id_keeps_supplied_id() {
        let mut c = case("TC-042", CasePriority::High, CaseType::Positive, CaseStatus::Draft);
        c.ensure_id(0);
        assert_eq!(c.id, "TC-042");
        c.id.clear();
        c.ensure_id(3);
        assert_eq!(c.id, "TC-004");
    }

    #[test]
    fn statistics_buckets_sum_to_total() {
        let cases = vec![
            case("TC-001", CasePriority::High, CaseType::Positive, CaseStatus::Draft),
            case("TC-002", CasePriority::Medium, CaseType::Negative, CaseStatus::Review),
            case("TC-003", CasePriority::Medium, CaseType::Boundary, CaseStatus::Approved),
            case("TC-004", CasePriority::Low, CaseType::Positive, CaseStatus::Draft),
        ];
        let stats = Statistics::recompute(&cases);
        assert_eq!(stats.total, 4);
        assert_eq!(
            stats.by_priority.high + stats.by_priority.medium + stats.by_priority.low,
            cases.len()
        );
        assert_eq!(
            stats.by_type.positive + stats.by_type.negative + stats.by_type.boundary,
            cases.len()
        );
        assert_eq!(
            stats.by_status.draft + stats.by_status.review + stats.by_status.approved,
            cases.len()
        );
        assert_eq!(stats.by_type.positive, 2);
    }

    #[test]
    fn generation_config_defaults_match_initial_state() {
        let config = GenerationConfig::default();
        assert!(config.include_positive);
        assert!(config.include_negative);
        assert!(config.include_boundary);
        assert_eq!(config.test_types, vec!["functional"]);
        assert_eq!(config.complexity, "medium");
    }

    #[test]
    fn critical_requirement_priority_clamps_to_high() {
        use crate::requirement::Priority;
        assert_eq!(CasePriority::from(Priority::Critical), CasePriority::High);
        assert_eq!(CasePriority::from(Priority::Medium), CasePriority::Medium);
    }
}
