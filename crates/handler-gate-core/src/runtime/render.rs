// crates/handler-gate-core/src/runtime/render.rs
// ============================================================================
// Module: Handler Gate Report Rendering
// Description: Console, text, and HTML views of an aggregate report.
// Purpose: Present conformance and execution results in tabular form.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! All views share one row model: one row per [`HandlerRecord`] with the
//! columns listed in [`TABLE_HEADERS`]. Multi-valued cells carry one value per
//! line and empty cells render `-`. The plain-text table uses a "simple"
//! layout: a header row, a dashed rule under each column, and a two-space
//! column gap.
//!
//! Rendering is pure; writing files is handled by the artifacts module.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use crate::core::conformance::ConformanceStatus;
use crate::core::report::AggregateReport;
use crate::core::report::ExecutionLog;
use crate::core::report::HandlerRecord;
use crate::core::report::ReportSummary;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Column headers shared by every tabular view.
pub const TABLE_HEADERS: [&str; 7] =
    ["Handler", "Status", "Missing Symbols", "Found Symbols", "Execution", "Shape", "Imports"];

/// Title line used by the console and text views.
const REPORT_TITLE: &str = "Handler Conformance Results";

/// Placeholder for an empty cell.
const EMPTY_CELL: &str = "-";

/// Gap between table columns.
const COLUMN_GAP: &str = "  ";

// ============================================================================
// SECTION: Row Model
// ============================================================================

/// Visual tone of a cell in the HTML view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    /// No styling.
    Plain,
    /// Passing value.
    Success,
    /// Non-fatal finding.
    Warning,
    /// Failing value.
    Error,
}

impl Tone {
    /// CSS class for the tone, if any.
    const fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Success => Some("success"),
            Self::Warning => Some("warning"),
            Self::Error => Some("error"),
        }
    }
}

/// One table cell: its lines and its tone.
#[derive(Debug, Clone)]
struct Cell {
    /// Values rendered one per line.
    lines: Vec<String>,
    /// Styling hint for HTML.
    tone: Tone,
}

impl Cell {
    /// Builds a cell from a single value.
    fn single(value: impl Into<String>, tone: Tone) -> Self {
        Self::multi(vec![value.into()], tone)
    }

    /// Builds a cell from several values; an empty list renders `-`.
    fn multi(values: Vec<String>, tone: Tone) -> Self {
        let lines = if values.is_empty() { vec![EMPTY_CELL.to_string()] } else { values };
        Self {
            lines,
            tone,
        }
    }

    /// Display width of the widest line.
    fn width(&self) -> usize {
        self.lines.iter().map(|line| line.chars().count()).max().unwrap_or(0)
    }
}

/// Builds the cells for one record.
fn record_cells(record: &HandlerRecord) -> Vec<Cell> {
    let conformance = &record.conformance;
    let execution = &record.execution;

    let status_tone = match conformance.status {
        ConformanceStatus::Conformant => Tone::Success,
        ConformanceStatus::Partial => Tone::Warning,
        ConformanceStatus::Unparsable => Tone::Error,
    };

    let execution_cell = if execution.executed {
        Cell::single(format!("ok ({} intercepted)", execution.intercepted_calls), Tone::Success)
    } else {
        let mut lines = vec!["failed".to_string()];
        lines.extend(execution.message.lines().map(str::to_string));
        Cell::multi(lines, Tone::Error)
    };

    let shape_cell = if !execution.executed {
        Cell::single(EMPTY_CELL, Tone::Plain)
    } else if execution.response_shape_valid {
        Cell::single("valid", Tone::Success)
    } else {
        Cell::single("invalid", Tone::Warning)
    };

    vec![
        Cell::single(record.handler_name.as_str(), Tone::Plain),
        Cell::single(conformance.status.label(), status_tone),
        Cell::multi(conformance.missing_symbols.clone(), Tone::Plain),
        Cell::multi(conformance.found_symbols.clone(), Tone::Plain),
        execution_cell,
        shape_cell,
        Cell::multi(conformance.referenced_modules.iter().cloned().collect(), Tone::Plain),
    ]
}

// ============================================================================
// SECTION: Plain Text Table
// ============================================================================

/// Renders the records as a "simple" plain-text table.
#[must_use]
pub fn render_table(report: &AggregateReport) -> String {
    let rows: Vec<Vec<Cell>> = report.records.iter().map(record_cells).collect();

    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|header| header.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    let headers: Vec<&str> = TABLE_HEADERS.to_vec();
    push_line(&mut out, &headers, &widths);
    let rules: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let rules: Vec<&str> = rules.iter().map(String::as_str).collect();
    push_line(&mut out, &rules, &widths);

    let multi_line = rows.iter().any(|row| row.iter().any(|cell| cell.lines.len() > 1));
    for (index, row) in rows.iter().enumerate() {
        if multi_line && index > 0 {
            out.push('\n');
        }
        let height = row.iter().map(|cell| cell.lines.len()).max().unwrap_or(1);
        for line_index in 0 .. height {
            let values: Vec<&str> = row
                .iter()
                .map(|cell| cell.lines.get(line_index).map_or("", String::as_str))
                .collect();
            push_line(&mut out, &values, &widths);
        }
    }
    out
}

/// Appends one padded table line without trailing whitespace.
fn push_line(out: &mut String, values: &[&str], widths: &[usize]) {
    let mut line = String::new();
    for (index, (value, width)) in values.iter().zip(widths).enumerate() {
        if index > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(value);
        let pad = width.saturating_sub(value.chars().count());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

// ============================================================================
// SECTION: Console View
// ============================================================================

/// Renders the console view: title, table, missing entries, failures, summary.
#[must_use]
pub fn render_console(report: &AggregateReport) -> String {
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push('\n');
    out.push('\n');
    out.push_str(&render_table(report));

    if !report.missing_entries.is_empty() {
        out.push_str("\nNot found:\n");
        for entry in &report.missing_entries {
            let _ = writeln!(
                out,
                "  - {}: {} ({})",
                entry.handler_name,
                entry.entry_path.display(),
                entry.reason
            );
        }
    }

    let failures: Vec<String> = report.records.iter().flat_map(failure_lines).collect();
    if !failures.is_empty() {
        out.push_str("\nFailures:\n");
        for line in failures {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&summary_line(report));
    out.push('\n');
    out
}

/// Failure detail lines for one record.
fn failure_lines(record: &HandlerRecord) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(parse_error) = &record.conformance.parse_error {
        lines.push(format!("  - {} (parse): {parse_error}", record.handler_name));
    }
    if !record.execution.executed {
        lines.push(format!("  - {} (execution): {}", record.handler_name, record.execution.message));
    }
    lines
}

/// One-line summary with counts and the overall status.
#[must_use]
pub fn summary_line(report: &AggregateReport) -> String {
    let ReportSummary {
        handlers,
        conformant,
        partial,
        unparsable,
        executed,
        not_executed,
        invalid_shape,
        missing_entries,
    } = report.summary;
    format!(
        "Overall: {} ({handlers} handlers; {conformant} conformant, {partial} partial, \
         {unparsable} unparsable; {executed} executed, {not_executed} not executed, \
         {invalid_shape} invalid shape; {missing_entries} not found{})",
        report.status,
        if report.strict { "; strict" } else { "" }
    )
}

// ============================================================================
// SECTION: Text Artifact
// ============================================================================

/// Renders the flat text artifact: title, table, modules, and execution log.
#[must_use]
pub fn render_text_report(report: &AggregateReport, log: &ExecutionLog) -> String {
    let mut out = String::new();
    push_heading(&mut out, REPORT_TITLE, '=');
    out.push('\n');
    out.push_str(&render_table(report));
    out.push('\n');
    out.push_str(&summary_line(report));
    out.push('\n');

    if !report.missing_entries.is_empty() {
        out.push('\n');
        push_heading(&mut out, "Not Found", '-');
        for entry in &report.missing_entries {
            let _ = writeln!(out, "{}: {} ({})", entry.handler_name, entry.entry_path.display(), entry.reason);
        }
    }

    out.push('\n');
    push_heading(&mut out, "Referenced Modules", '-');
    for record in &report.records {
        let modules = &record.conformance.referenced_modules;
        let joined = if modules.is_empty() {
            EMPTY_CELL.to_string()
        } else {
            modules.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        let _ = writeln!(out, "{}: {joined}", record.handler_name);
    }

    out.push('\n');
    push_heading(&mut out, "Execution Log", '-');
    for line in log.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Appends a heading underlined with `rule`.
fn push_heading(out: &mut String, title: &str, rule: char) {
    out.push_str(title);
    out.push('\n');
    out.extend(std::iter::repeat_n(rule, title.chars().count()));
    out.push('\n');
}

// ============================================================================
// SECTION: HTML Fragment
// ============================================================================

/// Renders the HTML results fragment injected into the dashboard template.
#[must_use]
pub fn render_html_fragment(report: &AggregateReport) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"test-results\">\n");
    out.push_str("<table>\n<thead>\n<tr>");
    for header in TABLE_HEADERS {
        let _ = write!(out, "<th>{}</th>", escape_html(header));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for record in &report.records {
        out.push_str("<tr>");
        for cell in record_cells(record) {
            let body =
                cell.lines.iter().map(|line| escape_html(line)).collect::<Vec<_>>().join("<br>");
            match cell.tone.css_class() {
                Some(class) => {
                    let _ = write!(out, "<td class=\"{class}\">{body}</td>");
                }
                None => {
                    let _ = write!(out, "<td>{body}</td>");
                }
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");

    if !report.missing_entries.is_empty() {
        out.push_str("<ul class=\"not-found\">\n");
        for entry in &report.missing_entries {
            let _ = writeln!(
                out,
                "<li class=\"error\">{}: {}</li>",
                escape_html(entry.handler_name.as_str()),
                escape_html(&entry.reason)
            );
        }
        out.push_str("</ul>\n");
    }

    let summary_class = if report.status.is_pass() { "success" } else { "error" };
    let _ = writeln!(
        out,
        "<p class=\"summary {summary_class}\">{}</p>",
        escape_html(&summary_line(report))
    );
    out.push_str("</div>\n");
    out
}

/// Escapes text for inclusion in HTML element content or attributes.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
