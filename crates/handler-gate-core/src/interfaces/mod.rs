// crates/handler-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Handler Gate Interfaces
// Description: Backend-agnostic seam for executing handlers.
// Purpose: Define the contract surface the runner uses for mock execution.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The core never loads or runs handler code. Execution backends implement
//! [`ExecutionHarness`] and are handed to the runner, which keeps the static
//! and dynamic phases independent and lets tests substitute a scripted
//! harness.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::discovery::HandlerTarget;
use crate::core::report::ExecutionLog;
use crate::core::report::ExecutionResult;

// ============================================================================
// SECTION: Execution Harness
// ============================================================================

/// Executes one handler under substituted dependencies.
///
/// Implementations must convert every failure (load faults, missing entry
/// routine, errors raised by the handler, backend crashes) into an
/// [`ExecutionResult`] with `executed = false`. A failure in one handler must
/// never affect the result of another.
pub trait ExecutionHarness {
    /// Loads and invokes the handler, appending progress to `log`.
    fn execute(&mut self, target: &HandlerTarget, log: &mut ExecutionLog) -> ExecutionResult;
}
