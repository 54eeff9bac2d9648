//! STLC Flow - phase-local step machines over the project store
//!
//! Each lifecycle phase gets a small state machine that sequences its UI
//! steps, gates analysis and generation calls on their preconditions, and
//! translates provider results into store intents. Provider failures are
//! absorbed here: they become error records and a step revert, never a
//! crash and never a partial write to phase data.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod planning;
pub mod requirements;
pub mod testcases;

pub use error::FlowError;
pub use planning::{PlanningFlow, PlanningStep};
pub use requirements::{RequirementsFlow, RequirementsStep};
pub use testcases::{TestCaseFlow, TestCaseStep};

/// How an analysis or generation call resolved.
///
/// `Failed` is an absorbed provider error: the store already holds the
/// error record and the flow has reverted to its last interactive step.
/// `Discarded` means the flow moved on (abandoned or re-triggered) before
/// the response arrived, so the result was dropped unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    Completed,
    Failed,
    Discarded,
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
