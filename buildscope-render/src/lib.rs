//! Rendering helpers (markdown) for human-readable output.

use buildscope_types::summary::{ProjectSummary, ResultsSummary};
use buildscope_types::PackageReference;

pub fn render_project_md(project: &ProjectSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", project.name));
    out.push_str(&format!("- Path: `{}`\n", project.path));
    out.push_str(&format!("- Uses SDK: `{}`\n", project.uses_sdk));
    out.push_str(&format!(
        "- Requires .NET Framework host: `{}`\n",
        project.requires_net_framework
    ));
    out.push_str(&format!("- Multi-targeted: `{}`\n", project.is_multi_targeted));
    if let Some(output_type) = &project.output_type {
        out.push_str(&format!("- Output type: `{}`\n", output_type));
    }
    if let Some(tools_version) = &project.tools_version {
        out.push_str(&format!("- Tools version: `{}`\n", tools_version));
    }

    out.push_str("\n## Target frameworks\n\n");
    if project.target_frameworks.is_empty() {
        out.push_str("_None declared._\n");
    }
    for framework in &project.target_frameworks {
        out.push_str(&format!("- `{}` ({})\n", framework, framework.full_name()));
    }

    out.push_str("\n## Package references\n\n");
    if project.package_references.is_empty() {
        out.push_str("_None._\n");
        return out;
    }
    for reference in &project.package_references {
        out.push_str(&package_line(reference));
    }

    out
}

pub fn render_results_md(results: &ResultsSummary) -> String {
    let mut out = String::new();
    out.push_str("# buildscope results\n\n");
    out.push_str(&format!(
        "- Overall: `{}`\n- Frameworks: {}\n\n",
        verdict_label(results.overall_success),
        results.count
    ));

    if results.frameworks.is_empty() {
        out.push_str("_No outcomes._\n");
        return out;
    }

    for r in &results.frameworks {
        out.push_str(&format!(
            "## {}\n\n- Project: `{}`\n- Status: `{}`\n",
            r.target_framework,
            r.project_path,
            verdict_label(r.succeeded)
        ));
        if !r.diagnostics.is_empty() {
            out.push_str("\n**Diagnostics**\n\n");
            for d in &r.diagnostics {
                out.push_str(&format!("- {}\n", d));
            }
        }
        out.push('\n');
    }

    out
}

fn package_line(reference: &PackageReference) -> String {
    let mut line = format!("- `{}`", reference.name);
    if let Some(version) = &reference.version {
        line.push_str(&format!(" {}", version));
    }
    if !reference.metadata.is_empty() {
        let meta: Vec<String> = reference
            .metadata
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        line.push_str(&format!(" ({})", meta.join(", ")));
    }
    line.push('\n');
    line
}

fn verdict_label(succeeded: bool) -> &'static str {
    if succeeded { "succeeded" } else { "failed" }
}
