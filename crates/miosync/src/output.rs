//! Output formatting: text, JSON, YAML, plain.
//!
//! Renders the reconciliation outcome in the format selected by
//! `--output`. Text shows the summary plus a before/after diff,
//! structured formats serialize the outcome via serde, plain emits a
//! single word for scripting.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;

use miosync_core::Outcome;

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Render an outcome in the chosen format.
pub fn render_outcome(format: &OutputFormat, outcome: &Outcome, color: bool) -> String {
    match format {
        OutputFormat::Text => render_text(outcome, color),
        OutputFormat::Json => render_json(outcome, false),
        OutputFormat::JsonCompact => render_json(outcome, true),
        OutputFormat::Yaml => render_yaml(outcome),
        OutputFormat::Plain => {
            if outcome.changed { "changed" } else { "unchanged" }.to_owned()
        }
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_text(outcome: &Outcome, color: bool) -> String {
    let status = if outcome.changed { "changed" } else { "unchanged" };
    let status = if color {
        if outcome.changed {
            status.yellow().bold().to_string()
        } else {
            status.green().to_string()
        }
    } else {
        status.to_owned()
    };

    let mut out = format!("{status}: {}", outcome.message);
    if outcome.diff.before != outcome.diff.after {
        out.push_str("\n\n--- before\n");
        out.push_str(diff_side(&outcome.diff.before));
        out.push_str("\n+++ after\n");
        out.push_str(diff_side(&outcome.diff.after));
    }
    out
}

fn diff_side(side: &str) -> &str {
    if side.is_empty() {
        "(absent)\n"
    } else {
        side
    }
}

fn render_json(outcome: &Outcome, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(outcome)
    } else {
        serde_json::to_string_pretty(outcome)
    };
    result.unwrap_or_default()
}

fn render_yaml(outcome: &Outcome) -> String {
    serde_yaml::to_string(outcome).unwrap_or_default()
}
