//! Requirement records
//!
//! Requirements are produced either by the analysis provider or by manual
//! entry. Ids follow the `FR-NNN` / `NFR-NNN` scheme and are collision-checked
//! against the existing set at creation time, so a number is never reused.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Requirement classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReqType {
    /// Functional requirement (`FR-` id prefix)
    #[serde(rename = "functional")]
    Functional,
    /// Non-functional requirement (`NFR-` id prefix)
    #[serde(rename = "non-functional")]
    NonFunctional,
}

impl std::fmt::Display for ReqType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReqType::Functional => "functional",
            ReqType::NonFunctional => "non-functional",
        };
        f.write_str(name)
    }
}

impl ReqType {
    /// Id prefix for this requirement type
    #[inline]
    #[must_use]
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ReqType::Functional => "FR",
            ReqType::NonFunctional => "NFR",
        }
    }
}

/// Requirement priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Requirement risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        f.write_str(name)
    }
}

impl RiskLevel {
    /// Whether this level counts toward the high-risk query
    #[inline]
    #[must_use]
    pub fn is_high(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

/// Where a requirement came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Manual,
    Ai,
}

/// A single requirement record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Unique id within the project (`FR-001`, `NFR-002`, `REQ-003`, ...)
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub user_story: String,
    /// Ordered Given/When/Then statements
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(rename = "type")]
    pub req_type: ReqType,
    pub priority: Priority,
    pub category: String,
    pub risk_level: RiskLevel,
    /// Set-like list: insertion order kept, duplicates rejected
    #[serde(default)]
    pub tags: Vec<String>,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form input for the manual-entry path
#[derive(Debug, Clone, Default)]
pub struct ManualRequirement {
    pub title: String,
    pub description: String,
    pub user_story: String,
    pub acceptance_criteria: Vec<String>,
    pub req_type: ReqType,
    pub priority: Priority,
    pub category: String,
    pub tags: Vec<String>,
}

impl Default for ReqType {
    fn default() -> Self {
        ReqType::Functional
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Requirement {
    /// Build a requirement from the manual-entry form.
    ///
    /// Centralizes the defaulting the render layer used to scatter: blank
    /// category becomes `"General"`, blank criteria are dropped, and the
    /// risk level is derived from priority (critical→high, high→medium,
    /// else low). AI-sourced requirements carry their own risk level and
    /// never pass through this mapping.
    #[must_use]
    pub fn manual(existing: &[Requirement], form: ManualRequirement) -> Self {
        let now = Utc::now();
        let category = form.category.trim();
        Self {
            id: next_requirement_id(existing, form.req_type),
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            user_story: form.user_story.trim().to_string(),
            acceptance_criteria: form
                .acceptance_criteria
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            req_type: form.req_type,
            priority: form.priority,
            category: if category.is_empty() {
                "General".to_string()
            } else {
                category.to_string()
            },
            risk_level: manual_risk_level(form.priority),
            tags: dedup_tags(form.tags),
            source: Source::Manual,
            business_value: None,
            complexity: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a tag, rejecting duplicates. Returns whether the tag was added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if tag.trim().is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Whether this requirement counts as high risk
    #[inline]
    #[must_use]
    pub fn is_high_risk(&self) -> bool {
        self.risk_level.is_high()
    }
}

/// Risk mapping used by the manual-entry path only
#[inline]
#[must_use]
pub fn manual_risk_level(priority: Priority) -> RiskLevel {
    match priority {
        Priority::Critical => RiskLevel::High,
        Priority::High => RiskLevel::Medium,
        Priority::Medium | Priority::Low => RiskLevel::Low,
    }
}

/// Next free sequential id for the given type.
///
/// Walks `FR-001, FR-002, ...` until a number not present in the existing
/// set is found, so ids survive interleaved functional/non-functional
/// creation without collisions.
#[must_use]
pub fn next_requirement_id(existing: &[Requirement], req_type: ReqType) -> String {
    let prefix = req_type.id_prefix();
    let mut counter = 1u32;
    loop {
        let candidate = format!("{prefix}-{counter:03}");
        if !existing.iter().any(|r| r.id == candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !tag.trim().is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
