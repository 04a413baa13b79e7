// crates/handler-gate-core/src/runtime/runner.rs
// ============================================================================
// Module: Handler Gate Verification Runner
// Description: Sequential per-handler static and dynamic verification.
// Purpose: Produce an aggregate report and execution log for discovered handlers.
// Dependencies: crate::{audit, core, interfaces}
// ============================================================================

//! ## Overview
//! [`VerificationRunner::run`] processes handlers one at a time in discovery
//! order. For each handler it reads the entry file, extracts symbols, checks
//! conformance, and then hands the handler to the [`ExecutionHarness`]. The two
//! phases are independent: a parse failure does not skip execution, and an
//! execution failure never alters the conformance result.
//!
//! ## Invariants
//! - Every per-handler failure becomes data in the report.
//! - An entry file that cannot be read becomes a [`MissingEntry`], never a
//!   partial record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

use crate::audit::AuditEvent;
use crate::audit::AuditOutcome;
use crate::audit::AuditPhase;
use crate::audit::AuditSink;
use crate::core::conformance::ConformanceResult;
use crate::core::conformance::ConformanceStatus;
use crate::core::conformance::check_conformance;
use crate::core::contract::RequiredContract;
use crate::core::discovery::HandlerTarget;
use crate::core::inventory::ParseError;
use crate::core::inventory::extract_symbols;
use crate::core::report::AggregateReport;
use crate::core::report::ExecutionLog;
use crate::core::report::ExecutionResult;
use crate::core::report::MissingEntry;
use crate::core::report::ReportAggregator;
use crate::core::report::ReportError;
use crate::interfaces::ExecutionHarness;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a handler entry file.
pub const MAX_ENTRY_FILE_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Report and log produced by one verification run.
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    /// Aggregate report in discovery order.
    pub report: AggregateReport,
    /// Verbatim execution log.
    pub log: ExecutionLog,
}

/// Failure to obtain an entry file's bytes.
enum EntryReadError {
    /// The file vanished or could not be opened.
    Unavailable(io::Error),
    /// The file exceeds [`MAX_ENTRY_FILE_BYTES`].
    TooLarge(u64),
}

/// Sequential verification driver.
pub struct VerificationRunner<'a> {
    /// Required-symbol contract.
    contract: &'a RequiredContract,
    /// Audit sink for phase events.
    audit: &'a dyn AuditSink,
    /// Whether partial conformance fails the run.
    strict: bool,
}

impl<'a> VerificationRunner<'a> {
    /// Creates a runner for one process-wide contract.
    #[must_use]
    pub fn new(contract: &'a RequiredContract, audit: &'a dyn AuditSink, strict: bool) -> Self {
        Self {
            contract,
            audit,
            strict,
        }
    }

    /// Verifies every handler and aggregates the results.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] only when result bookkeeping is inconsistent
    /// (duplicate handler names); handler failures are reported as data.
    pub fn run(
        &self,
        handlers: &[HandlerTarget],
        harness: &mut dyn ExecutionHarness,
    ) -> Result<VerificationOutcome, ReportError> {
        let mut aggregator = ReportAggregator::new(self.strict);
        let mut log = ExecutionLog::new();

        for target in handlers {
            log.push(format!("Testing {}...", target.name));
            let source = match read_entry(&target.entry_path) {
                Ok(bytes) => decode_source(bytes),
                Err(EntryReadError::Unavailable(err)) => {
                    let entry = MissingEntry {
                        handler_name: target.name.clone(),
                        entry_path: target.entry_path.clone(),
                        reason: err.to_string(),
                    };
                    log.push(format!(
                        "Entry file not found for {}: {} ({})",
                        target.name,
                        target.entry_path.display(),
                        entry.reason
                    ));
                    self.record(AuditPhase::Extraction, AuditOutcome::Failed, target, &entry.reason);
                    aggregator.record_missing(entry)?;
                    continue;
                }
                Err(EntryReadError::TooLarge(size)) => Err(ParseError::new(format!(
                    "entry file is {size} bytes (limit {MAX_ENTRY_FILE_BYTES})"
                ))),
            };

            let conformance = self.check_static(target, source);
            let mut execution = harness.execute(target, &mut log);
            execution.handler_name = target.name.clone();
            self.record_execution(target, &execution);

            if !conformance.missing_symbols.is_empty() {
                log.push(format!("Missing symbols in {}:", target.name));
                for symbol in &conformance.missing_symbols {
                    log.push(format!("  \u{2022} {symbol}"));
                }
            }

            aggregator.record_conformance(conformance)?;
            aggregator.record_execution(execution)?;
        }

        Ok(VerificationOutcome {
            report: aggregator.finish()?,
            log,
        })
    }

    /// Runs extraction and conformance for one handler's source text.
    fn check_static(
        &self,
        target: &HandlerTarget,
        source: Result<String, ParseError>,
    ) -> ConformanceResult {
        let label = target.entry_path.display().to_string();
        let extraction = source.and_then(|source| extract_symbols(&source, &label));
        let result = check_conformance(target.name.clone(), extraction.as_ref(), self.contract);
        match result.status {
            ConformanceStatus::Conformant => {
                self.record(AuditPhase::Extraction, AuditOutcome::Ok, target, "conformant");
            }
            ConformanceStatus::Partial => {
                let message = format!("missing: {}", result.missing_symbols.join(", "));
                self.record(AuditPhase::Extraction, AuditOutcome::Warning, target, &message);
            }
            ConformanceStatus::Unparsable => {
                let message = result.parse_error.clone().unwrap_or_default();
                self.record(AuditPhase::Extraction, AuditOutcome::Failed, target, &message);
            }
        }
        result
    }

    /// Records the audit event for an execution result.
    fn record_execution(&self, target: &HandlerTarget, execution: &ExecutionResult) {
        let outcome = if !execution.executed {
            AuditOutcome::Failed
        } else if execution.response_shape_valid {
            AuditOutcome::Ok
        } else {
            AuditOutcome::Warning
        };
        self.record(AuditPhase::Execution, outcome, target, &execution.message);
    }

    /// Emits one audit event for a handler.
    fn record(&self, phase: AuditPhase, outcome: AuditOutcome, target: &HandlerTarget, message: &str) {
        self.audit.record(&AuditEvent::new(
            phase,
            outcome,
            Some(target.name.clone()),
            Some(message.to_string()),
        ));
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an entry file while enforcing [`MAX_ENTRY_FILE_BYTES`].
fn read_entry(path: &Path) -> Result<Vec<u8>, EntryReadError> {
    let file = File::open(path).map_err(EntryReadError::Unavailable)?;
    let size = file.metadata().map_err(EntryReadError::Unavailable)?.len();
    let limit = u64::try_from(MAX_ENTRY_FILE_BYTES).unwrap_or(u64::MAX);
    if size > limit {
        return Err(EntryReadError::TooLarge(size));
    }
    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1)).read_to_end(&mut bytes).map_err(EntryReadError::Unavailable)?;
    if bytes.len() > MAX_ENTRY_FILE_BYTES {
        return Err(EntryReadError::TooLarge(u64::try_from(bytes.len()).unwrap_or(u64::MAX)));
    }
    Ok(bytes)
}

/// Decodes entry file bytes as UTF-8 source text.
fn decode_source(bytes: Vec<u8>) -> Result<String, ParseError> {
    String::from_utf8(bytes)
        .map_err(|err| ParseError::new(format!("entry file is not valid UTF-8: {err}")))
}
