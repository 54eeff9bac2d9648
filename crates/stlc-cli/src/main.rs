//! stlc - command line front end for the testing lifecycle assistant
//!
//! Drives the three lifecycle phases against a snapshot directory: analyze
//! requirement documents, generate a plan and test cases, inspect progress
//! and export documents. Uses the Azure provider when the environment is
//! configured and falls back to the offline provider otherwise.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use stlc_ai::{AnalysisProvider, FallbackProvider};
use stlc_export::{
    export_project, export_requirements, export_test_cases, export_test_plan, CsvDialect,
    Document, ExportFormat,
};
use stlc_flow::{GenerationOutcome, PlanningFlow, RequirementsFlow, TestCaseFlow};
use stlc_state::{Intent, Phase, PhaseSet, StoreHandle};

#[derive(Parser)]
#[command(name = "stlc", version, about = "AI-assisted software testing lifecycle assistant")]
struct Cli {
    /// Directory holding the project snapshot
    #[arg(long, default_value = ".", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show phase progress and project counters
    Status,
    /// Analyze requirement documents and store the results
    Analyze {
        /// Requirement documents to read
        files: Vec<PathBuf>,
        /// Free-text business context
        #[arg(long)]
        context: Option<String>,
    },
    /// Run the whole lifecycle end to end with sample inputs
    Demo,
    /// Export phase data as a document
    Export {
        #[arg(value_enum)]
        what: ExportKind,
        #[arg(long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,
        /// Output directory; defaults to the data directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Discard all project data, keeping the snapshot directory
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportKind {
    Requirements,
    Plan,
    Cases,
    Project,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Word,
    Testrail,
    Xray,
    AzureDevops,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Word => ExportFormat::Word,
            FormatArg::Testrail => ExportFormat::Csv(CsvDialect::TestRail),
            FormatArg::Xray => ExportFormat::Csv(CsvDialect::JiraXray),
            FormatArg::AzureDevops => ExportFormat::Csv(CsvDialect::AzureDevOps),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!(dir = %cli.data_dir.display(), "using snapshot directory");
    let store = StoreHandle::open(&cli.data_dir);

    match cli.command {
        Commands::Status => status(&store),
        Commands::Analyze { files, context } => analyze(&store, &files, context).await?,
        Commands::Demo => demo(&store).await?,
        Commands::Export { what, format, out } => {
            let out = out.unwrap_or(cli.data_dir);
            export(&store, what, format.into(), &out)?;
        }
        Commands::Reset => {
            store.dispatch(Intent::ResetProject);
            store.save_now()?;
            println!("Project reset.");
        }
    }
    Ok(())
}

fn status(store: &StoreHandle) {
    store.with_store(|s| {
        let state = s.state();
        println!("Project: {}", state.project.name);
        println!("Overall progress: {}%", s.overall_progress());
        for phase in Phase::ALL {
            println!("{}", phase_row(&state.phases, phase));
        }
        println!(
            "Requirements: {} ({} high-risk)",
            state.phases.requirements.data.requirements.len(),
            s.high_risk_count()
        );
        println!(
            "Test cases:   {}",
            state.phases.test_cases.data.test_cases.len()
        );
        if state.phases.planning.data.generated_plan.is_some() {
            println!("Test plan:    generated");
        }
        for error in &state.errors {
            println!("error: {}", error.message);
        }
    });
}

async fn analyze(
    store: &StoreHandle,
    files: &[PathBuf],
    context: Option<String>,
) -> anyhow::Result<()> {
    if files.is_empty() && context.is_none() {
        bail!("nothing to analyze: pass documents or --context");
    }
    let flow = RequirementsFlow::new(store.clone(), provider());
    for path in files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        flow.add_file(name, content);
    }
    if let Some(context) = context {
        flow.set_context(context);
    }

    match flow.analyze().await? {
        GenerationOutcome::Completed => {
            store.save_now()?;
            store.with_store(|s| {
                let data = &s.state().phases.requirements.data;
                println!(
                    "Analyzed {} requirements ({} functional, {} non-functional), quality score {}.",
                    data.requirements.len(),
                    data.functional_count,
                    data.non_functional_count,
                    data.quality_score
                );
            });
            Ok(())
        }
        _ => bail!("analysis failed; run `stlc status` for details"),
    }
}

async fn demo(store: &StoreHandle) -> anyhow::Result<()> {
    let provider = provider();

    let requirements = RequirementsFlow::new(store.clone(), provider.clone());
    requirements.add_file(
        "sample-brief.txt",
        "Users register with email and password, browse the product catalog, \
         manage a shopping cart and pay through an external gateway.",
    );
    if requirements.analyze().await? != GenerationOutcome::Completed {
        bail!("requirements analysis failed");
    }
    requirements.complete()?;

    let planning = PlanningFlow::new(store.clone(), provider.clone());
    planning.edit_form(|form| {
        form.project_name = "E-Commerce Platform".to_string();
        form.project_description = "Online storefront with catalog and checkout".to_string();
        form.testing_objective = "Verify release readiness of the storefront".to_string();
        form.inclusions = vec!["Registration".to_string(), "Checkout".to_string()];
        form.test_types = vec!["functional".to_string(), "security".to_string()];
        form.team_size = "4".to_string();
        form.duration = "6 weeks".to_string();
        form.environments = vec!["QA".to_string(), "Staging".to_string()];
        form.success_criteria = vec!["95% pass rate".to_string()];
    })?;
    if planning.generate().await? != GenerationOutcome::Completed {
        bail!("test plan generation failed");
    }
    planning.approve()?;

    let cases = TestCaseFlow::new(store.clone(), provider);
    cases.proceed_to_select()?;
    if cases.generate().await? != GenerationOutcome::Completed {
        bail!("test case generation failed");
    }
    cases.complete()?;

    store.save_now()?;
    println!("Demo lifecycle finished.\n");
    status(store);
    Ok(())
}

fn export(
    store: &StoreHandle,
    what: ExportKind,
    format: ExportFormat,
    out: &Path,
) -> anyhow::Result<()> {
    let doc: Document = store.with_store(|s| {
        let state = s.state();
        match what {
            ExportKind::Requirements => {
                export_requirements(&state.phases.requirements.data, format)
            }
            ExportKind::Plan => {
                let Some(plan) = &state.phases.planning.data.generated_plan else {
                    return Err(stlc_export::ExportError::Unsupported {
                        kind: "test plan (none generated yet)",
                        format: "any",
                    });
                };
                let name = &state.phases.planning.data.wizard.project_name;
                let name = if name.is_empty() { "STLC Project" } else { name };
                export_test_plan(plan, name, format)
            }
            ExportKind::Cases => export_test_cases(&state.phases.test_cases.data, format),
            ExportKind::Project => export_project(state),
        }
    })?;

    let path = out.join(&doc.filename);
    std::fs::write(&path, &doc.bytes).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn provider() -> Arc<dyn AnalysisProvider> {
    Arc::new(FallbackProvider::from_env())
}

fn phase_row(phases: &PhaseSet, phase: Phase) -> String {
    let mark = if phases.completed(phase) { "done" } else { "open" };
    format!("  {phase:<13} {:>3}%  [{mark}]", phases.progress(phase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_rows_cover_every_phase() {
        let mut phases = PhaseSet::default();
        phases.set_progress(Phase::Planning, 100);
        phases.set_progress(Phase::Requirements, 50);

        let rows: Vec<String> = Phase::ALL
            .iter()
            .map(|p| phase_row(&phases, *p))
            .collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("requirements") && rows[0].contains("50%"));
        assert!(rows[1].contains("planning") && rows[1].contains("[done]"));
        assert!(rows[2].contains("testcases") && rows[2].contains("[open]"));
    }
}
