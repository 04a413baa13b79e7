// crates/handler-gate-harness/src/harness.rs
// ============================================================================
// Module: Mock Execution Harness
// Description: Executes handlers in interpreter workers under substitution.
// Purpose: Turn every load, substitution, and runtime failure into data.
// Dependencies: handler-gate-core, serde_json, crate::{shape, substitution, worker}
// ============================================================================

//! ## Overview
//! [`PythonHarness`] implements the core [`ExecutionHarness`] seam. Each
//! handler is loaded in a fresh worker, the remote client is substituted for
//! the duration of one invocation, and the response is shape-checked. No
//! failure escapes: every error becomes an [`ExecutionResult`] with
//! `executed = false` and the error text as its message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use handler_gate_core::ExecutionHarness;
use handler_gate_core::ExecutionLog;
use handler_gate_core::ExecutionResult;
use handler_gate_core::HandlerTarget;
use serde_json::Value;

use crate::error::FaultKind;
use crate::error::HarnessError;
use crate::error::WorkerFault;
use crate::shape::DEFAULT_RESPONSE_FIELDS;
use crate::shape::ResponseShapeValidator;
use crate::substitution::LoadedHandler;
use crate::substitution::Substitution;
use crate::synthetic::SyntheticContext;
use crate::synthetic::build_event;
use crate::synthetic::default_event_payload;
use crate::worker::WorkerCommand;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Default interpreter executable.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Environment variable overriding the interpreter executable.
pub const PYTHON_ENV_VAR: &str = "HANDLER_GATE_PYTHON";

/// Default entry routine name.
pub const DEFAULT_ENTRY_ROUTINE: &str = "lambda_handler";

/// Everything the harness needs to run one handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessSettings {
    /// Interpreter executable.
    pub interpreter: String,
    /// Whether handler stderr reaches the host's stderr.
    pub forward_handler_stderr: bool,
    /// Entry routine name.
    pub entry_routine: String,
    /// Stand-in configuration.
    pub substitution: Substitution,
    /// Synthetic event passed to the entry routine.
    pub event: Value,
    /// Synthetic context fields.
    pub context: SyntheticContext,
    /// Fields a well-shaped response must carry.
    pub response_fields: Vec<String>,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            forward_handler_stderr: false,
            entry_routine: DEFAULT_ENTRY_ROUTINE.to_string(),
            substitution: Substitution::default(),
            event: build_event(&default_event_payload()),
            context: SyntheticContext::default(),
            response_fields: DEFAULT_RESPONSE_FIELDS.iter().map(|field| (*field).to_string()).collect(),
        }
    }
}

/// Chooses the interpreter: a non-empty environment override wins over the
/// configured value, which wins over [`DEFAULT_INTERPRETER`].
#[must_use]
pub fn resolve_interpreter(env_override: Option<&str>, configured: Option<&str>) -> String {
    [env_override, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_INTERPRETER)
        .to_string()
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Execution harness backed by interpreter worker processes.
pub struct PythonHarness {
    /// Run settings.
    settings: HarnessSettings,
    /// Compiled response-shape validator.
    shape: ResponseShapeValidator,
}

impl PythonHarness {
    /// Creates a harness for `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] when the response schema is unusable.
    pub fn new(settings: HarnessSettings) -> Result<Self, HarnessError> {
        let shape = ResponseShapeValidator::new(&settings.response_fields)?;
        Ok(Self {
            settings,
            shape,
        })
    }

    /// Returns the harness settings.
    #[must_use]
    pub const fn settings(&self) -> &HarnessSettings {
        &self.settings
    }

    /// Loads, substitutes, invokes, and reverts one handler.
    fn run(&self, target: &HandlerTarget, log: &mut ExecutionLog) -> Result<ExecutionResult, HarnessError> {
        let command = WorkerCommand {
            interpreter: self.settings.interpreter.clone(),
            forward_stderr: self.settings.forward_handler_stderr,
        };
        let mut handler =
            LoadedHandler::load(&command, &target.entry_path, &self.settings.entry_routine)?;
        if !handler.has_entry_routine() {
            return Err(HarnessError::Runtime(WorkerFault {
                kind: FaultKind::Runtime,
                exception_type: "AttributeError".to_string(),
                message: format!(
                    "module has no callable entry routine '{}'",
                    self.settings.entry_routine
                ),
            }));
        }

        let substitution = &self.settings.substitution;
        let target_label = format!("{}.{}", substitution.client_attribute, substitution.method);
        let mut guard = handler.substitute(substitution)?;
        log.push(format!("Substituted {target_label} with canned response"));
        let invocation = guard.invoke(
            &self.settings.event,
            &self.settings.context,
            &self.settings.response_fields,
        );
        let released = guard.release();
        if let Ok(calls) = &released {
            log.push(format!("Restored {target_label} ({calls} intercepted calls)"));
        }
        let response = invocation?;
        let calls = released?;

        log.push(format!("Response type: {}", response.response_type));
        let rendered = serde_json::to_string_pretty(&response.response)
            .unwrap_or_else(|_| response.response.to_string());
        log.push(format!("Response: {rendered}"));
        if response.truncated {
            log.push("Response summarized to fit the worker frame limit".to_string());
        }

        let verdict = self.shape.check(response.is_mapping, &response.response);
        if let Some(reason) = &verdict.reason {
            log.push(format!("Response shape invalid: {reason}"));
        }

        if let Err(err) = handler.shutdown() {
            log.push(format!("Worker shutdown failed: {err}"));
        }
        Ok(ExecutionResult {
            handler_name: target.name.clone(),
            executed: true,
            message: "Success".to_string(),
            response_shape_valid: verdict.valid,
            intercepted_calls: calls,
            response_type: Some(response.response_type),
        })
    }
}

impl ExecutionHarness for PythonHarness {
    fn execute(&mut self, target: &HandlerTarget, log: &mut ExecutionLog) -> ExecutionResult {
        match self.run(target, log) {
            Ok(result) => result,
            Err(err) => {
                let message = err.to_string();
                log.push(format!("Error testing {}: {message}", target.name));
                ExecutionResult::failed(target.name.clone(), message)
            }
        }
    }
}
