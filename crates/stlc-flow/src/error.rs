//! Error types for the phase flows
//!
//! These cover misuse of the step machines (calling an operation its
//! current step does not offer). Provider failures are NOT errors at this
//! level: the flows absorb them into the store as error records and report
//! them through [`GenerationOutcome::Failed`].
//!
//! [`GenerationOutcome::Failed`]: crate::GenerationOutcome::Failed

/// Step machine misuse
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FlowError {
    /// Analysis was requested with no files, context or manual entries
    #[error("nothing to analyze: provide files, context or manual requirements")]
    NothingToAnalyze,

    /// The operation is not available in the flow's current step
    #[error("operation not available in the {0} step")]
    WrongStep(&'static str),

    /// Plan generation was requested before the wizard was filled in
    #[error("planning wizard step {0} is incomplete")]
    IncompleteWizard(usize),

    /// Test case generation was requested with nothing selected
    #[error("no requirements selected for test case generation")]
    EmptySelection,

    /// A manage operation referenced a test case id that does not exist
    #[error("unknown test case id {0}")]
    UnknownTestCase(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            FlowError::IncompleteWizard(2).to_string(),
            "planning wizard step 2 is incomplete"
        );
        assert_eq!(
            FlowError::UnknownTestCase("TC-099".to_string()).to_string(),
            "unknown test case id TC-099"
        );
    }
}
