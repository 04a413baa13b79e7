// crates/handler-gate-core/src/lib.rs
// ============================================================================
// Module: Handler Gate Core Library
// Description: Public API surface for the Handler Gate verification engine.
// Purpose: Expose the data model, static checks, interfaces, and runner.
// Dependencies: crate::{audit, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Handler Gate core verifies a fleet of handler modules in two phases: a
//! static conformance check that inventories symbols from parsed source
//! without executing it, and a mock execution phase delegated to an
//! [`ExecutionHarness`] implementation. Results are merged into an
//! [`AggregateReport`] that decides overall pass/fail and renders console,
//! text, and HTML views.
//!
//! The core never executes handler code itself; execution backends plug in
//! through [`interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use audit::AuditEvent;
pub use audit::AuditOutcome;
pub use audit::AuditPhase;
pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use interfaces::ExecutionHarness;
pub use runtime::MAX_ENTRY_FILE_BYTES;
pub use runtime::RenderError;
pub use runtime::TABLE_HEADERS;
pub use runtime::VerificationOutcome;
pub use runtime::VerificationRunner;
pub use runtime::render_console;
pub use runtime::escape_html;
pub use runtime::render_html_fragment;
pub use runtime::render_table;
pub use runtime::render_text_report;
pub use runtime::summary_line;
pub use runtime::write_html_report;
pub use runtime::write_text_report;
