//! STLC Export - document renditions of project data
//!
//! Pure one-shot transforms from in-memory phase data to downloadable
//! documents: pretty JSON, Word-compatible HTML markup, and CSV dialects
//! for test-management imports. Nothing here touches the project store.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod csv;
pub mod document;
pub mod error;
pub mod exporter;
pub mod json;
pub mod word;

pub use csv::{test_cases_csv, CsvDialect};
pub use document::{export_filename, Document};
pub use error::ExportError;
pub use exporter::{
    export_project, export_requirements, export_test_cases, export_test_plan, ExportFormat,
};
pub use json::to_json_document;
pub use word::{requirements_report, test_cases_document, test_plan_document};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
