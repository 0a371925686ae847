//! Markdown report adapter implementing ReportPort.
//!
//! Writes the analysis summary as markdown and the explained-variance
//! scree chart as a sibling SVG file referenced from the report.

pub mod chart_svg;

use std::fs;
use std::path::Path;

use crate::domain::error::AnalyzerError;
use crate::ports::report_port::{ReportContext, ReportPort};

pub struct MarkdownReportAdapter;

impl MarkdownReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the full markdown body. Split out from the port impl so tests
/// can assert on content without touching the filesystem.
pub fn render_markdown(ctx: &ReportContext, chart_file: &str) -> String {
    let mut out = String::new();

    out.push_str("# Equity Market Analysis Report\n\n");
    out.push_str("## Introduction\n");
    out.push_str(
        "This report analyzes the configured equity universe to identify trends, \
         evaluate companies, and describe a rule-based trading strategy.\n\n",
    );

    out.push_str("## Market Trends\n");
    out.push_str(&format!(
        "- Bullish Crossovers: {} detected\n",
        ctx.result.bullish_count()
    ));
    out.push_str(&format!(
        "- Bearish Crossovers: {} detected\n\n",
        ctx.result.bearish_count()
    ));

    out.push_str("## Economic Indicators\n");
    match ctx.economic.policy_rate.latest() {
        Some(obs) => out.push_str(&format!(
            "- Latest Policy Rate: {:.2}% ({})\n",
            obs.value, obs.date
        )),
        None => out.push_str("- Latest Policy Rate: n/a\n"),
    }
    match ctx.economic.cpi.latest() {
        Some(obs) => out.push_str(&format!("- Latest CPI: {:.2} ({})\n\n", obs.value, obs.date)),
        None => out.push_str("- Latest CPI: n/a\n\n"),
    }

    out.push_str("## Variance Decomposition\n");
    let decomposition = &ctx.result.decomposition;
    out.push_str(&format!(
        "- Components analyzed: {}\n",
        decomposition.components.len()
    ));
    out.push_str(&format!(
        "- Components reaching 95% cumulative variance: {}\n",
        decomposition.threshold_count
    ));
    out.push_str(&format!(
        "- Scree elbow at component: {}\n\n",
        decomposition.elbow_index
    ));
    out.push_str(&format!("![Explained variance]({})\n\n", chart_file));

    out.push_str("## Company Evaluation\n");
    if ctx.evaluations.is_empty() {
        out.push_str("- No fundamental metrics available.\n");
    }
    for eval in ctx.evaluations {
        if eval.tags.is_empty() {
            out.push_str(&format!("- {}: no notable metrics\n", eval.code));
        } else {
            out.push_str(&format!("- {}: {}\n", eval.code, eval.tags.join(", ")));
        }
    }
    out.push('\n');

    out.push_str("## Trading Strategy\n");
    out.push_str(&ctx.strategy.describe());
    out.push_str("\n\n");

    out.push_str("### Trade Actions\n");
    if ctx.result.actions.is_empty() {
        out.push_str("No crossover trade actions in the analyzed window.\n");
    } else {
        out.push_str("| Date | Instrument | Side | Stop-loss % | Position size % |\n");
        out.push_str("|------|------------|------|-------------|-----------------|\n");
        for action in &ctx.result.actions {
            out.push_str(&format!(
                "| {} | {} | {} | {:.1} | {:.1} |\n",
                action.date, action.code, action.side, action.stop_loss_pct,
                action.position_size_pct
            ));
        }
    }

    out
}

impl ReportPort for MarkdownReportAdapter {
    fn write(&self, ctx: &ReportContext, output_path: &str) -> Result<(), AnalyzerError> {
        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(AnalyzerError::Io)?;
            }
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        let chart_name = format!("{}_explained_variance.svg", stem);
        let chart_path = path.with_file_name(&chart_name);

        let svg = chart_svg::generate_scree_svg(
            &ctx.result.decomposition.components.ratios(),
            ctx.result.decomposition.elbow_index,
            ctx.result.decomposition.threshold_count,
        );
        if !svg.is_empty() {
            fs::write(&chart_path, svg).map_err(AnalyzerError::Io)?;
        }

        let markdown = render_markdown(ctx, &chart_name);
        fs::write(path, markdown).map_err(AnalyzerError::Io)?;

        Ok(())
    }
}
