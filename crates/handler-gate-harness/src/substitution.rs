// crates/handler-gate-harness/src/substitution.rs
// ============================================================================
// Module: Dependency Substitution Layer
// Description: Loaded handlers and the scoped stand-in for the remote client.
// Purpose: Guarantee the stand-in is active during invocation and reverted after.
// Dependencies: serde, serde_json, crate::{error, synthetic, worker}
// ============================================================================

//! ## Overview
//! A [`LoadedHandler`] owns the worker process that imported one handler
//! module. Acquiring a [`SubstitutionGuard`] installs the stand-in for the
//! handler's remote client method; the entry routine can only be invoked
//! through the guard. Releasing the guard, explicitly or by dropping it on an
//! early return or unwind, reverts the substitution.
//!
//! ## Invariants
//! - At most one guard exists per handler (it mutably borrows the handler).
//! - Every acquired guard sends exactly one restore request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;

use crate::error::HarnessError;
use crate::synthetic::SyntheticContext;
use crate::worker::WorkerCommand;
use crate::worker::WorkerProcess;
use crate::worker::WorkerRequest;

// ============================================================================
// SECTION: Stand-In Configuration
// ============================================================================

/// What to intercept and what the stand-in returns.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    /// Module attribute holding the remote client handle.
    pub client_attribute: String,
    /// Client method replaced by the stand-in.
    pub method: String,
    /// Payload returned through the canned response body.
    pub payload: Value,
    /// `ContentType` of the canned response.
    pub content_type: String,
    /// `InvokedProductionVariant` of the canned response.
    pub variant: String,
}

impl Default for Substitution {
    fn default() -> Self {
        Self {
            client_attribute: "sagemaker_runtime".to_string(),
            method: "invoke_endpoint".to_string(),
            payload: json!({"predictions": [[0.1, 0.9], [0.8, 0.2]]}),
            content_type: "application/json".to_string(),
            variant: "AllTraffic".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Replies
// ============================================================================

/// Reply to a load request.
#[derive(Debug, Deserialize)]
struct LoadReply {
    /// Whether the entry routine exists and is callable.
    entry_callable: bool,
}

/// Reply to a restore request.
#[derive(Debug, Deserialize)]
struct RestoreReply {
    /// Calls intercepted while the stand-in was installed.
    calls: u64,
}

/// Reply to a probe request.
#[derive(Debug, Deserialize)]
struct ProbeReply {
    /// Whether the stand-in is installed.
    installed: bool,
}

/// Value returned by the entry routine, as reported by the worker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvocationResponse {
    /// Whether the value is a mapping.
    pub is_mapping: bool,
    /// Type name of the value.
    pub response_type: String,
    /// JSON projection of the value. Non-finite floats are `null`.
    pub response: Value,
    /// True when the projection was summarized to fit one frame.
    #[serde(default)]
    pub truncated: bool,
}

// ============================================================================
// SECTION: Loaded Handler
// ============================================================================

/// A handler module imported into its own worker process.
pub struct LoadedHandler {
    /// Worker that holds the module.
    worker: WorkerProcess,
    /// Whether the entry routine is callable.
    entry_callable: bool,
}

impl LoadedHandler {
    /// Spawns a fresh worker and imports the module at `entry_path`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Spawn`] when the worker cannot start and
    /// [`HarnessError::Load`] when importing the module raises.
    pub fn load(
        command: &WorkerCommand,
        entry_path: &Path,
        entry_routine: &str,
    ) -> Result<Self, HarnessError> {
        let mut worker = WorkerProcess::spawn(command)?;
        let module_name =
            entry_path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("handler_module");
        let reply: LoadReply = worker.request(&WorkerRequest::Load {
            path: entry_path,
            module_name,
            entry_routine,
        })?;
        Ok(Self {
            worker,
            entry_callable: reply.entry_callable,
        })
    }

    /// Returns true when the entry routine exists and is callable.
    #[must_use]
    pub const fn has_entry_routine(&self) -> bool {
        self.entry_callable
    }

    /// Installs the stand-in and returns the guard that scopes it.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Substitution`] when the client attribute or
    /// method is missing or cannot be replaced.
    pub fn substitute(
        &mut self,
        substitution: &Substitution,
    ) -> Result<SubstitutionGuard<'_>, HarnessError> {
        let _: serde::de::IgnoredAny = self.worker.request(&WorkerRequest::Substitute {
            client_attribute: &substitution.client_attribute,
            method: &substitution.method,
            payload: &substitution.payload,
            content_type: &substitution.content_type,
            variant: &substitution.variant,
        })?;
        Ok(SubstitutionGuard {
            handler: self,
            released: false,
        })
    }

    /// Returns true while a stand-in is installed in the module.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the worker cannot be queried.
    pub fn is_substituted(&mut self) -> Result<bool, HarnessError> {
        probe(&mut self.worker)
    }

    /// Ends the worker cleanly.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the shutdown exchange fails.
    pub fn shutdown(self) -> Result<(), HarnessError> {
        self.worker.shutdown()
    }
}

/// Sends a probe request.
fn probe(worker: &mut WorkerProcess) -> Result<bool, HarnessError> {
    let reply: ProbeReply = worker.request(&WorkerRequest::Probe)?;
    Ok(reply.installed)
}

// ============================================================================
// SECTION: Substitution Guard
// ============================================================================

/// Scope during which the stand-in replaces the remote client method.
pub struct SubstitutionGuard<'h> {
    /// Handler whose module carries the stand-in.
    handler: &'h mut LoadedHandler,
    /// Whether restore has already been sent.
    released: bool,
}

impl SubstitutionGuard<'_> {
    /// Invokes the entry routine with the synthetic inputs.
    ///
    /// Oversized responses come back summarized; `keep_fields` that are
    /// present in a summarized mapping survive with bounded values.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Runtime`] when the entry routine raises or is
    /// not callable, and transport errors when the worker dies.
    pub fn invoke(
        &mut self,
        event: &Value,
        context: &SyntheticContext,
        keep_fields: &[String],
    ) -> Result<InvocationResponse, HarnessError> {
        self.handler.worker.request(&WorkerRequest::Invoke {
            event,
            context,
            keep_fields,
        })
    }

    /// Returns true while the stand-in is installed.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the worker cannot be queried.
    pub fn is_installed(&mut self) -> Result<bool, HarnessError> {
        probe(&mut self.handler.worker)
    }

    /// Reverts the substitution and returns the intercepted call count.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the worker cannot revert the stand-in.
    pub fn release(mut self) -> Result<u64, HarnessError> {
        self.released = true;
        let reply: RestoreReply = self.handler.worker.request(&WorkerRequest::Restore)?;
        Ok(reply.calls)
    }
}

impl Drop for SubstitutionGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.released = true;
            let _: Result<serde::de::IgnoredAny, HarnessError> =
                self.handler.worker.request(&WorkerRequest::Restore);
        }
    }
}
