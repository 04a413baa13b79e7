// crates/handler-gate-harness/src/lib.rs
// ============================================================================
// Module: Handler Gate Harness Library
// Description: Interpreter-backed mock execution for handler modules.
// Purpose: Load handlers in isolated workers and invoke them under substitution.
// Dependencies: handler-gate-core, jsonschema, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate provides the dynamic half of handler verification. Every
//! handler is imported in a freshly spawned interpreter worker so that no
//! module state leaks between handlers. The worker's remote client method is
//! replaced by a canned stand-in for the duration of one invocation, scoped by
//! an RAII [`SubstitutionGuard`].
//!
//! Security posture: handler code is untrusted and runs with the privileges of
//! the invoking user; isolation is per process, not a sandbox.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod harness;
pub mod shape;
pub mod substitution;
pub mod synthetic;
pub mod worker;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::FaultKind;
pub use error::HarnessError;
pub use error::WorkerFault;
pub use harness::DEFAULT_ENTRY_ROUTINE;
pub use harness::DEFAULT_INTERPRETER;
pub use harness::HarnessSettings;
pub use harness::PYTHON_ENV_VAR;
pub use harness::PythonHarness;
pub use harness::resolve_interpreter;
pub use shape::DEFAULT_RESPONSE_FIELDS;
pub use shape::ResponseShapeValidator;
pub use shape::ShapeVerdict;
pub use substitution::InvocationResponse;
pub use substitution::LoadedHandler;
pub use substitution::Substitution;
pub use substitution::SubstitutionGuard;
pub use synthetic::SyntheticContext;
pub use synthetic::build_event;
pub use synthetic::default_event_payload;
pub use worker::MAX_FRAME_BYTES;
pub use worker::WorkerCommand;
pub use worker::WorkerProcess;
pub use worker::read_framed;
pub use worker::write_framed;
