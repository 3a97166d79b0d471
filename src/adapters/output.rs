use crate::core::job::EvaluationResult;
use crate::utils::lib::get_output_file_path;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// Plain-text score card for a completed evaluation.
pub fn render_report(result: &EvaluationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Evaluation Report");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Overall score:   {:.1} / 5", result.overall_score);
    let _ = writeln!(out, "Recommendation:  {}", result.recommendation);
    let _ = writeln!(out, "Summary:         {}", result.overall_summary);
    let _ = writeln!(out);
    let _ = writeln!(out, "CV match rate:   {:.0}%", result.cv_match_rate * 100.0);
    let _ = writeln!(out, "{}", result.cv_feedback);
    for (name, detail) in result.cv_details.entries() {
        let _ = writeln!(
            out,
            "  {:<18} {:.1} / 5  {}",
            name, detail.score, detail.justification
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Project score:   {:.1} / 5", result.project_score);
    let _ = writeln!(out, "{}", result.project_feedback);
    for (name, detail) in result.project_details.entries() {
        let _ = writeln!(
            out,
            "  {:<18} {:.1} / 5  {}",
            name, detail.score, detail.justification
        );
    }
    let _ = writeln!(out, "{}", "=".repeat(60));
    out
}

/// Writes the result as pretty JSON, defaulting to a timestamped file under
/// `./output`, and returns the path written to.
pub fn save_result(output_arg: Option<PathBuf>, result: &EvaluationResult) -> Result<PathBuf> {
    let path = get_output_file_path(output_arg)?;
    let json =
        serde_json::to_string_pretty(result).context("Failed to serialize evaluation result")?;
    fs::write(&path, json).with_context(|| format!("Failed to write result to {:?}", path))?;
    Ok(path)
}
