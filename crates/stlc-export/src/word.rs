//! Word-compatible markup rendition
//!
//! Word opens a plain HTML document served as `application/msword`, so the
//! writers here assemble a self-contained HTML page per report kind. Test
//! plan sections keep a fixed order: Objective, Scope, Approach, Schedule,
//! Resources, Risks, Tools, Deliverables.

use std::fmt::Write as _;

use chrono::Utc;

use stlc_state::phase::{RequirementsData, TestCasesData};
use stlc_state::plan::TestPlan;

use crate::document::{export_filename, Document};

const MEDIA_TYPE: &str = "application/msword";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn page_open(title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n\
         <style>\n\
         body {{ font-family: Arial, sans-serif; margin: 40px; }}\n\
         h1 {{ color: #2d5a27; border-bottom: 2px solid #2d5a27; }}\n\
         h2 {{ color: #2d5a27; margin-top: 30px; }}\n\
         h3 {{ color: #333; }}\n\
         .requirement {{ margin: 20px 0; padding: 15px; border-left: 4px solid #2d5a27; background: #f9f9f9; }}\n\
         .test-case {{ margin: 20px 0; padding: 15px; border: 1px solid #ccc; }}\n\
         .metadata {{ background: #f5f5f5; padding: 10px; margin: 10px 0; }}\n\
         ul {{ margin: 10px 0; }}\n\
         li {{ margin: 5px 0; }}\n\
         </style>\n</head>\n<body>\n",
        escape(title)
    )
}

fn bullet_list(out: &mut String, items: &[String]) {
    out.push_str("<ul>\n");
    for item in items {
        let _ = writeln!(out, "<li>{}</li>", escape(item));
    }
    out.push_str("</ul>\n");
}

/// Requirements analysis report
#[must_use]
pub fn requirements_report(data: &RequirementsData) -> Document {
    let mut html = page_open("Requirements Analysis Report");
    html.push_str("<h1>Requirements Analysis Report</h1>\n");
    let _ = writeln!(
        html,
        "<div class=\"metadata\">\n\
         <p><strong>Generated:</strong> {}</p>\n\
         <p><strong>Total Requirements:</strong> {}</p>\n\
         <p><strong>Quality Score:</strong> {}%</p>\n\
         </div>",
        Utc::now().format("%Y-%m-%d"),
        data.requirements.len(),
        data.quality_score
    );

    for req in &data.requirements {
        let _ = writeln!(
            html,
            "<div class=\"requirement\">\n<h3>{}: {}</h3>\n\
             <p><strong>Description:</strong> {}</p>\n\
             <p><strong>Type:</strong> {} | <strong>Priority:</strong> {} | \
             <strong>Risk:</strong> {}</p>",
            escape(&req.id),
            escape(&req.title),
            escape(&req.description),
            req.req_type,
            req.priority,
            req.risk_level
        );
        if !req.acceptance_criteria.is_empty() {
            html.push_str("<h4>Acceptance Criteria:</h4>\n");
            bullet_list(&mut html, &req.acceptance_criteria);
        }
        html.push_str("</div>\n");
    }

    if !data.stakeholders.is_empty() {
        html.push_str("<h2>Stakeholders</h2>\n");
        bullet_list(&mut html, &data.stakeholders);
    }
    if !data.business_drivers.is_empty() {
        html.push_str("<h2>Business Drivers</h2>\n");
        bullet_list(&mut html, &data.business_drivers);
    }

    html.push_str("</body>\n</html>\n");
    Document {
        filename: export_filename("requirements-analysis", "doc"),
        media_type: MEDIA_TYPE,
        bytes: html.into_bytes(),
    }
}

/// Test plan document with the fixed section order
#[must_use]
pub fn test_plan_document(plan: &TestPlan, project_name: &str) -> Document {
    let mut html = page_open("Test Plan Document");
    html.push_str("<h1>Test Plan Document</h1>\n");
    let _ = writeln!(
        html,
        "<div class=\"metadata\">\n\
         <p><strong>Project:</strong> {}</p>\n\
         <p><strong>Generated:</strong> {}</p>\n\
         </div>",
        escape(project_name),
        Utc::now().format("%Y-%m-%d")
    );

    // Objective
    html.push_str("<h2>Objective</h2>\n");
    let _ = writeln!(html, "<p>{}</p>", escape(&plan.objective));

    // Scope
    html.push_str("<h2>Scope</h2>\n<h3>Inclusions</h3>\n");
    bullet_list(&mut html, &plan.scope.inclusions);
    html.push_str("<h3>Exclusions</h3>\n");
    bullet_list(&mut html, &plan.scope.exclusions);

    // Approach
    html.push_str("<h2>Approach</h2>\n");
    let _ = writeln!(
        html,
        "<p><strong>Strategy:</strong> {}</p>\n<p><strong>Methodology:</strong> {}</p>",
        escape(&plan.approach.strategy),
        escape(&plan.approach.methodology)
    );
    bullet_list(&mut html, &plan.approach.phases);

    // Schedule
    html.push_str("<h2>Schedule</h2>\n<ul>\n");
    for phase in &plan.schedule.phases {
        let _ = writeln!(
            html,
            "<li><strong>{}</strong>: {} (starts {})</li>",
            escape(&phase.name),
            escape(&phase.duration),
            escape(&phase.start)
        );
    }
    html.push_str("</ul>\n");

    // Resources
    html.push_str("<h2>Resources</h2>\n");
    let _ = writeln!(
        html,
        "<p><strong>Team Size:</strong> {} | <strong>Duration:</strong> {} | \
         <strong>Effort:</strong> {}</p>",
        plan.resources.team_size,
        escape(&plan.resources.duration),
        escape(&plan.resources.effort)
    );
    bullet_list(&mut html, &plan.resources.roles);

    // Risks
    html.push_str("<h2>Risks and Mitigation</h2>\n");
    for risk in &plan.risks {
        let _ = writeln!(
            html,
            "<div class=\"requirement\">\n<h3>{}</h3>\n\
             <p><strong>Impact:</strong> {} | <strong>Probability:</strong> {}</p>\n\
             <p><strong>Mitigation:</strong> {}</p>\n</div>",
            escape(&risk.risk),
            escape(&risk.impact),
            escape(&risk.probability),
            escape(&risk.mitigation)
        );
    }

    // Tools
    html.push_str("<h2>Tools</h2>\n<ul>\n");
    for (label, tool) in [
        ("Test Management", &plan.tools.test_management),
        ("Automation", &plan.tools.automation),
        ("Performance", &plan.tools.performance),
        ("API Testing", &plan.tools.api_testing),
        ("Security", &plan.tools.security),
        ("CI/CD", &plan.tools.ci_cd),
    ] {
        let _ = writeln!(
            html,
            "<li><strong>{label}:</strong> {}</li>",
            escape(tool)
        );
    }
    html.push_str("</ul>\n");

    // Deliverables
    html.push_str("<h2>Deliverables</h2>\n");
    bullet_list(&mut html, &plan.deliverables);

    html.push_str("</body>\n</html>\n");
    Document {
        filename: export_filename("test-plan", "doc"),
        media_type: MEDIA_TYPE,
        bytes: html.into_bytes(),
    }
}

/// Test cases document: per-case blocks plus the summary statistics
#[must_use]
pub fn test_cases_document(data: &TestCasesData) -> Document {
    let mut html = page_open("Test Cases Document");
    html.push_str("<h1>Test Cases Document</h1>\n");
    let _ = writeln!(
        html,
        "<div class=\"metadata\">\n\
         <p><strong>Generated:</strong> {}</p>\n\
         <p><strong>Total Test Cases:</strong> {}</p>\n\
         <p><strong>High Priority:</strong> {} | <strong>Medium Priority:</strong> {} | \
         <strong>Low Priority:</strong> {}</p>\n\
         </div>",
        Utc::now().format("%Y-%m-%d"),
        data.test_cases.len(),
        data.statistics.by_priority.high,
        data.statistics.by_priority.medium,
        data.statistics.by_priority.low
    );

    for case in &data.test_cases {
        let _ = writeln!(
            html,
            "<div class=\"test-case\">\n<h3>{}: {}</h3>\n\
             <p><strong>Description:</strong> {}</p>\n\
             <p><strong>Type:</strong> {} | <strong>Priority:</strong> {}</p>",
            escape(&case.id),
            escape(&case.title),
            escape(&case.description),
            case.case_type,
            case.priority
        );
        if !case.preconditions.is_empty() {
            html.push_str("<h4>Preconditions:</h4>\n");
            bullet_list(&mut html, &case.preconditions);
        }
        if !case.steps.is_empty() {
            html.push_str("<h4>Test Steps:</h4>\n<ol>\n");
            for step in &case.steps {
                let _ = writeln!(
                    html,
                    "<li><strong>Action:</strong> {}<br><strong>Expected:</strong> {}</li>",
                    escape(&step.action),
                    escape(&step.expected)
                );
            }
            html.push_str("</ol>\n");
        }
        let _ = writeln!(
            html,
            "<p><strong>Expected Result:</strong> {}</p>\n</div>",
            escape(&case.expected_result)
        );
    }

    html.push_str("</body>\n</html>\n");
    Document {
        filename: export_filename("test-cases", "doc"),
        media_type: MEDIA_TYPE,
        bytes: html.into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stlc_state::requirement::{ManualRequirement, Priority, ReqType, Requirement};

    #[test]
    fn markup_is_escaped() {
        let req = Requirement::manual(
            &[],
            ManualRequirement {
                title: "Support <script> & \"quotes\"".to_string(),
                description: "a < b".to_string(),
                req_type: ReqType::Functional,
                priority: Priority::Medium,
                ..ManualRequirement::default()
            },
        );
        let data = RequirementsData {
            requirements: vec![req],
            ..RequirementsData::default()
        };
        let doc = requirements_report(&data);
        let text = doc.as_text().into_owned();
        assert!(text.contains("Support &lt;script&gt; &amp; &quot;quotes&quot;"));
        assert!(!text.contains("<script>"));
    }

    #[test]
    fn plan_sections_keep_fixed_order() {
        let doc = test_plan_document(&TestPlan::default(), "Shop");
        let text = doc.as_text().into_owned();
        let order = [
            "<h2>Objective</h2>",
            "<h2>Scope</h2>",
            "<h2>Approach</h2>",
            "<h2>Schedule</h2>",
            "<h2>Resources</h2>",
            "<h2>Risks and Mitigation</h2>",
            "<h2>Tools</h2>",
            "<h2>Deliverables</h2>",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| text.find(needle).expect(needle))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(doc.media_type, "application/msword");
        assert!(doc.filename.starts_with("test-plan-"));
        assert!(doc.filename.ends_with(".doc"));
    }
}
