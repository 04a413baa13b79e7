// crates/handler-gate-core/src/audit.rs
// ============================================================================
// Module: Handler Gate Audit Logging
// Description: Structured audit events for verification phases.
// Purpose: Emit JSON-lines logs without hard dependencies on a logging stack.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each verification phase (discovery, extraction, execution, rendering)
//! records an [`AuditEvent`] through an [`AuditSink`]. Sinks write one JSON
//! object per line so deployments can route events to their preferred
//! pipeline. Sinks never fail the run: write errors are swallowed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::identifiers::HandlerName;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Verification phase an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditPhase {
    /// Handler discovery.
    Discovery,
    /// Symbol extraction and conformance.
    Extraction,
    /// Mock execution.
    Execution,
    /// Artifact rendering.
    Render,
}

/// Outcome classification of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Phase succeeded.
    Ok,
    /// Phase completed with a non-fatal finding.
    Warning,
    /// Phase failed.
    Failed,
}

/// Audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Handler the event concerns, when any.
    pub handler: Option<HandlerName>,
    /// Verification phase.
    pub phase: AuditPhase,
    /// Outcome classification.
    pub outcome: AuditOutcome,
    /// Optional detail message.
    pub message: Option<String>,
}

impl AuditEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(
        phase: AuditPhase,
        outcome: AuditOutcome,
        handler: Option<HandlerName>,
        message: Option<String>,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "handler_gate",
            timestamp_ms,
            handler,
            phase,
            outcome,
            message,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for audit events.
pub trait AuditSink {
    /// Records one event.
    fn record(&self, event: &AuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// Append-mode file handle.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens (or creates) the audit log at `path` in append mode.
    ///
    /// # Errors
    ///
    /// Returns [`io::Error`] when the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
        }
    }
}

/// Audit sink that drops all events.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}
