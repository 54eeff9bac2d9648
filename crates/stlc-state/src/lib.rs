//! STLC State - project state store for the testing lifecycle assistant
//!
//! Single source of truth for one testing project: the three lifecycle
//! phases (requirements, planning, test cases), their data, progress and
//! completion, plus ephemeral notifications and error records. All
//! mutation flows through [`ProjectStore::dispatch`] with an [`Intent`];
//! [`StoreHandle`] layers shared access, autosave and notification expiry
//! on top.
//!
//! # Example
//!
//! ```rust,ignore
//! use stlc_state::{Intent, Nav, ProjectStore};
//!
//! let mut store = ProjectStore::new();
//! store.dispatch(Intent::SetCurrentPhase(Nav::Requirements));
//! assert_eq!(store.overall_progress(), 0);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod analysis;
pub mod error;
pub mod notify;
pub mod persist;
pub mod phase;
pub mod plan;
pub mod requirement;
pub mod state;
pub mod store;
pub mod testcase;

// Re-exports for convenience
pub use analysis::{
    EstimatedEffort, Finding, FindingCategory, FindingKind, QualityMetrics, RequirementAnalysis,
    RiskAssessment, Severity, ValidationNote, ValidationNotes, ValidationReport,
    ValidationSummary,
};
pub use error::StateError;
pub use notify::{ErrorRecord, Notification, NotificationKind, NOTIFICATION_TTL};
pub use persist::{
    ProjectExport, SnapshotSlot, StoreHandle, AUTOSAVE_INTERVAL, SNAPSHOT_KEY,
};
pub use phase::{
    Nav, Phase, PhasePatch, PhaseSet, PhaseState, PlanningData, PlanningPatch, RequirementsData,
    RequirementsPatch, TestCasesData, TestCasesPatch, UploadedFile,
};
pub use plan::{ProjectInfo, TestPlan, WizardForm, WIZARD_STEPS};
pub use requirement::{
    next_requirement_id, ManualRequirement, Priority, ReqType, Requirement, RiskLevel, Source,
};
pub use state::{AppState, ProjectMeta, Snapshot};
pub use store::{Intent, ProjectStore};
pub use testcase::{
    CasePriority, CaseStatus, CaseType, GenerationConfig, GenerationSummary, Statistics,
    TestCase, TestCaseBatch, TestStep,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the project store
    pub use crate::{
        AppState, Intent, Nav, Phase, PhasePatch, Priority, ProjectStore, Requirement, Snapshot,
        StoreHandle, TestCase, TestPlan,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
