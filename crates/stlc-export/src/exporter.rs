//! Format dispatch over the per-kind writers

use stlc_state::phase::{RequirementsData, TestCasesData};
use stlc_state::plan::TestPlan;
use stlc_state::state::AppState;

use crate::csv::{test_cases_csv, CsvDialect};
use crate::document::Document;
use crate::error::ExportError;
use crate::json::to_json_document;
use crate::word::{requirements_report, test_cases_document, test_plan_document};

/// Requested output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Word,
    Csv(CsvDialect),
}

impl ExportFormat {
    fn name(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Word => "word",
            ExportFormat::Csv(_) => "csv",
        }
    }
}

/// Export the requirements phase data. CSV has no requirements rendition.
pub fn export_requirements(
    data: &RequirementsData,
    format: ExportFormat,
) -> Result<Document, ExportError> {
    match format {
        ExportFormat::Json => to_json_document(data, "requirements-analysis"),
        ExportFormat::Word => Ok(requirements_report(data)),
        ExportFormat::Csv(_) => Err(ExportError::Unsupported {
            kind: "requirements analysis",
            format: format.name(),
        }),
    }
}

/// Export a generated test plan. CSV has no plan rendition.
pub fn export_test_plan(
    plan: &TestPlan,
    project_name: &str,
    format: ExportFormat,
) -> Result<Document, ExportError> {
    match format {
        ExportFormat::Json => to_json_document(plan, "test-plan"),
        ExportFormat::Word => Ok(test_plan_document(plan, project_name)),
        ExportFormat::Csv(_) => Err(ExportError::Unsupported {
            kind: "test plan",
            format: format.name(),
        }),
    }
}

/// Export the test-case phase data in any format.
pub fn export_test_cases(
    data: &TestCasesData,
    format: ExportFormat,
) -> Result<Document, ExportError> {
    let doc = match format {
        ExportFormat::Json => to_json_document(data, "test-cases")?,
        ExportFormat::Word => test_cases_document(data),
        ExportFormat::Csv(dialect) => test_cases_csv(&data.test_cases, dialect),
    };
    tracing::debug!(filename = %doc.filename, cases = data.test_cases.len(), "test cases exported");
    Ok(doc)
}

/// Export the whole project state as pretty JSON.
pub fn export_project(state: &AppState) -> Result<Document, ExportError> {
    to_json_document(state, "stlc-project")
}
