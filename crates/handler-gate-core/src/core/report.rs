// crates/handler-gate-core/src/core/report.rs
// ============================================================================
// Module: Handler Gate Report Model
// Description: Execution results, handler records, and the aggregate report.
// Purpose: Join static and dynamic results and decide overall pass/fail.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The [`ReportAggregator`] collects per-handler [`ConformanceResult`] and
//! [`ExecutionResult`] values keyed by [`HandlerName`] and joins them into
//! [`HandlerRecord`]s in the order handlers were first recorded (discovery
//! order). Handlers whose entry file went missing are kept apart as
//! [`MissingEntry`] values and never produce a record.
//!
//! ## Invariants
//! - Every [`HandlerRecord`] carries both sub-results.
//! - Overall status fails on any missing entry, unparsable source, or handler
//!   that did not execute; strict mode also fails on partial conformance.
//! - The report is never mutated after [`ReportAggregator::finish`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::core::conformance::ConformanceResult;
use crate::core::conformance::ConformanceStatus;
use crate::core::identifiers::HandlerName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Message used when a failure carries no text of its own.
const EMPTY_FAILURE_MESSAGE: &str = "handler failed without an error message";

// ============================================================================
// SECTION: Execution Results
// ============================================================================

/// Mock execution outcome for one handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Handler this result belongs to.
    pub handler_name: HandlerName,
    /// True when the entry routine returned without raising.
    pub executed: bool,
    /// Human-readable outcome or the raised error message.
    pub message: String,
    /// True when the response is a mapping with the recognizable fields.
    pub response_shape_valid: bool,
    /// Number of remote calls intercepted by the substitution layer.
    pub intercepted_calls: u64,
    /// Type name of the value the entry routine returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
}

impl ExecutionResult {
    /// Builds a result for a handler that could not be executed.
    #[must_use]
    pub fn failed(handler_name: HandlerName, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            EMPTY_FAILURE_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            handler_name,
            executed: false,
            message,
            response_shape_valid: false,
            intercepted_calls: 0,
            response_type: None,
        }
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Joined static and dynamic results for one handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerRecord {
    /// Handler name shared by both sub-results.
    pub handler_name: HandlerName,
    /// Static conformance result.
    pub conformance: ConformanceResult,
    /// Mock execution result.
    pub execution: ExecutionResult,
}

/// A discovered handler whose entry file could not be read for checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingEntry {
    /// Handler name.
    pub handler_name: HandlerName,
    /// Entry file path that was expected.
    pub entry_path: PathBuf,
    /// Reason the entry file was unavailable.
    pub reason: String,
}

/// Overall run verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    /// Every handler passed.
    Pass,
    /// At least one failure condition was met.
    Fail,
}

impl OverallStatus {
    /// Returns the stable label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }

    /// Returns true for [`OverallStatus::Pass`].
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counts summarizing an aggregate report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Number of handler records.
    pub handlers: usize,
    /// Records with conformant status.
    pub conformant: usize,
    /// Records with partial status.
    pub partial: usize,
    /// Records with unparsable status.
    pub unparsable: usize,
    /// Records whose handler executed.
    pub executed: usize,
    /// Records whose handler did not execute.
    pub not_executed: usize,
    /// Executed records whose response shape was invalid.
    pub invalid_shape: usize,
    /// Handlers whose entry file was missing.
    pub missing_entries: usize,
}

/// Ordered handler records plus the overall verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    /// Records in discovery order.
    pub records: Vec<HandlerRecord>,
    /// Handlers whose entry file was missing, in discovery order.
    pub missing_entries: Vec<MissingEntry>,
    /// Whether partial conformance fails the run.
    pub strict: bool,
    /// Summary counts.
    pub summary: ReportSummary,
    /// Overall verdict.
    pub status: OverallStatus,
}

impl AggregateReport {
    /// Builds a report and derives its summary and verdict.
    #[must_use]
    pub fn new(records: Vec<HandlerRecord>, missing_entries: Vec<MissingEntry>, strict: bool) -> Self {
        let summary = summarize(&records, &missing_entries);
        let status = overall_status(&records, &missing_entries, strict);
        Self {
            records,
            missing_entries,
            strict,
            summary,
            status,
        }
    }
}

/// Computes summary counts.
fn summarize(records: &[HandlerRecord], missing_entries: &[MissingEntry]) -> ReportSummary {
    let mut summary = ReportSummary {
        handlers: records.len(),
        missing_entries: missing_entries.len(),
        ..ReportSummary::default()
    };
    for record in records {
        match record.conformance.status {
            ConformanceStatus::Conformant => summary.conformant += 1,
            ConformanceStatus::Partial => summary.partial += 1,
            ConformanceStatus::Unparsable => summary.unparsable += 1,
        }
        if record.execution.executed {
            summary.executed += 1;
            if !record.execution.response_shape_valid {
                summary.invalid_shape += 1;
            }
        } else {
            summary.not_executed += 1;
        }
    }
    summary
}

/// Derives the overall verdict.
fn overall_status(
    records: &[HandlerRecord],
    missing_entries: &[MissingEntry],
    strict: bool,
) -> OverallStatus {
    if !missing_entries.is_empty() {
        return OverallStatus::Fail;
    }
    let failed = records.iter().any(|record| {
        record.conformance.status == ConformanceStatus::Unparsable
            || !record.execution.executed
            || (strict && record.conformance.status == ConformanceStatus::Partial)
    });
    if failed { OverallStatus::Fail } else { OverallStatus::Pass }
}

// ============================================================================
// SECTION: Aggregator
// ============================================================================

/// Errors raised while aggregating results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A result was recorded twice for the same handler.
    #[error("duplicate {kind} result for handler {handler}")]
    Duplicate {
        /// Handler name.
        handler: HandlerName,
        /// Result kind (`conformance`, `execution`, or `missing entry`).
        kind: &'static str,
    },
    /// A handler has only one of its two sub-results.
    #[error("handler {handler} is missing its {kind} result")]
    IncompleteRecord {
        /// Handler name.
        handler: HandlerName,
        /// Absent result kind.
        kind: &'static str,
    },
}

/// Collects per-handler results and joins them into an [`AggregateReport`].
#[derive(Debug, Default)]
pub struct ReportAggregator {
    /// Whether partial conformance fails the run.
    strict: bool,
    /// Handler names in first-recorded order.
    order: Vec<HandlerName>,
    /// Conformance results by handler.
    conformance: BTreeMap<HandlerName, ConformanceResult>,
    /// Execution results by handler.
    execution: BTreeMap<HandlerName, ExecutionResult>,
    /// Missing entry conditions by handler.
    missing: BTreeMap<HandlerName, MissingEntry>,
}

impl ReportAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            ..Self::default()
        }
    }

    /// Records a conformance result.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Duplicate`] when the handler already has one.
    pub fn record_conformance(&mut self, result: ConformanceResult) -> Result<(), ReportError> {
        let name = result.handler_name.clone();
        if self.conformance.contains_key(&name) {
            return Err(ReportError::Duplicate {
                handler: name,
                kind: "conformance",
            });
        }
        self.track(&name);
        self.conformance.insert(name, result);
        Ok(())
    }

    /// Records an execution result.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Duplicate`] when the handler already has one.
    pub fn record_execution(&mut self, result: ExecutionResult) -> Result<(), ReportError> {
        let name = result.handler_name.clone();
        if self.execution.contains_key(&name) {
            return Err(ReportError::Duplicate {
                handler: name,
                kind: "execution",
            });
        }
        self.track(&name);
        self.execution.insert(name, result);
        Ok(())
    }

    /// Records a handler whose entry file went missing.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Duplicate`] when the handler is already missing.
    pub fn record_missing(&mut self, entry: MissingEntry) -> Result<(), ReportError> {
        let name = entry.handler_name.clone();
        if self.missing.contains_key(&name) {
            return Err(ReportError::Duplicate {
                handler: name,
                kind: "missing entry",
            });
        }
        self.track(&name);
        self.missing.insert(name, entry);
        Ok(())
    }

    /// Joins recorded results into a report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::IncompleteRecord`] when a handler that is not
    /// missing lacks either sub-result.
    pub fn finish(mut self) -> Result<AggregateReport, ReportError> {
        let mut records = Vec::with_capacity(self.order.len());
        let mut missing_entries = Vec::new();
        for name in &self.order {
            if let Some(entry) = self.missing.remove(name) {
                missing_entries.push(entry);
                continue;
            }
            let conformance =
                self.conformance.remove(name).ok_or_else(|| ReportError::IncompleteRecord {
                    handler: name.clone(),
                    kind: "conformance",
                })?;
            let execution =
                self.execution.remove(name).ok_or_else(|| ReportError::IncompleteRecord {
                    handler: name.clone(),
                    kind: "execution",
                })?;
            records.push(HandlerRecord {
                handler_name: name.clone(),
                conformance,
                execution,
            });
        }
        Ok(AggregateReport::new(records, missing_entries, self.strict))
    }

    /// Remembers the first time a handler name is seen.
    fn track(&mut self, name: &HandlerName) {
        if !self.order.contains(name) {
            self.order.push(name.clone());
        }
    }
}

// ============================================================================
// SECTION: Execution Log
// ============================================================================

/// Verbatim, ordered log of what happened while checking handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExecutionLog {
    /// Log lines in the order they were produced.
    lines: Vec<String>,
}

impl ExecutionLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line; embedded newlines are kept verbatim.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Returns the recorded lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns true when nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Joins the lines with newlines.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}
