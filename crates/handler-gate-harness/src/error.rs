// crates/handler-gate-harness/src/error.rs
// ============================================================================
// Module: Harness Errors
// Description: Failure taxonomy for the interpreter worker and its callers.
// Purpose: Carry worker faults verbatim and classify transport failures.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Faults raised inside the worker arrive as [`WorkerFault`] values tagged
//! with a [`FaultKind`]. Host-side failures (spawning, broken pipes, malformed
//! frames) are classified separately so a crashed worker is distinguishable
//! from a handler that raised.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Worker Faults
// ============================================================================

/// Category of a fault reported by the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// The handler module failed to load.
    Load,
    /// The stand-in could not be installed or reverted.
    Substitution,
    /// The entry routine raised.
    Runtime,
    /// The request violated the worker protocol.
    Protocol,
}

/// Exception details reported by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkerFault {
    /// Fault category.
    pub kind: FaultKind,
    /// Exception type name.
    #[serde(rename = "type")]
    pub exception_type: String,
    /// Exception message, verbatim.
    pub message: String,
}

impl fmt::Display for WorkerFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.exception_type)
        } else {
            write!(f, "{}: {}", self.exception_type, self.message)
        }
    }
}

// ============================================================================
// SECTION: Harness Errors
// ============================================================================

/// Errors raised while loading, substituting, or invoking a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// Harness settings are unusable.
    #[error("invalid harness settings: {0}")]
    Config(String),
    /// The interpreter worker could not be started.
    #[error("failed to start interpreter worker: {0}")]
    Spawn(String),
    /// The worker pipe broke or the worker exited mid-request.
    #[error("interpreter worker transport error: {0}")]
    Transport(String),
    /// A frame or reply was malformed.
    #[error("interpreter worker protocol error: {0}")]
    Protocol(String),
    /// The handler module failed to load.
    #[error("load failed: {0}")]
    Load(WorkerFault),
    /// The stand-in could not be installed or reverted.
    #[error("substitution failed: {0}")]
    Substitution(WorkerFault),
    /// The entry routine raised.
    #[error("{0}")]
    Runtime(WorkerFault),
}

impl HarnessError {
    /// Classifies a worker fault by its kind.
    #[must_use]
    pub fn from_fault(fault: WorkerFault) -> Self {
        match fault.kind {
            FaultKind::Load => Self::Load(fault),
            FaultKind::Substitution => Self::Substitution(fault),
            FaultKind::Runtime => Self::Runtime(fault),
            FaultKind::Protocol => Self::Protocol(fault.to_string()),
        }
    }
}
