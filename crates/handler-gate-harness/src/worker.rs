// crates/handler-gate-harness/src/worker.rs
// ============================================================================
// Module: Interpreter Worker Transport
// Description: Spawns the interpreter worker and exchanges framed JSON.
// Purpose: Give each handler a fresh, isolated interpreter process.
// Dependencies: serde, serde_json, crate::error
// ============================================================================

//! ## Overview
//! The worker is an embedded interpreter script started with `-B -c`. Host and
//! worker exchange JSON objects framed with `Content-Length: N\r\n\r\n`
//! headers over the child's stdin and stdout. Frames larger than
//! [`MAX_FRAME_BYTES`] are rejected. The child is killed when its
//! [`WorkerProcess`] handle drops.
//!
//! ## Invariants
//! - One request is outstanding at a time.
//! - Worker faults are decoded into [`HarnessError`] by kind; they never
//!   surface as transport errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::process::Child;
use std::process::ChildStdin;
use std::process::ChildStdout;
use std::process::Command;
use std::process::Stdio;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use crate::error::HarnessError;
use crate::error::WorkerFault;
use crate::synthetic::SyntheticContext;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum size of one protocol frame in either direction.
pub const MAX_FRAME_BYTES: usize = 8 * 1024 * 1024;

/// Embedded worker script.
const WORKER_SCRIPT: &str = include_str!("../assets/harness_worker.py");

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Requests understood by the worker.
#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum WorkerRequest<'a> {
    /// Load the handler module from `path`.
    Load {
        /// Entry file path.
        path: &'a Path,
        /// Module name registered for the handler.
        module_name: &'a str,
        /// Name of the entry routine.
        entry_routine: &'a str,
    },
    /// Install the stand-in on `client_attribute.method`.
    Substitute {
        /// Module attribute holding the remote client.
        client_attribute: &'a str,
        /// Client method to intercept.
        method: &'a str,
        /// Canned payload returned through the response body.
        payload: &'a Value,
        /// `ContentType` of the canned response.
        content_type: &'a str,
        /// `InvokedProductionVariant` of the canned response.
        variant: &'a str,
    },
    /// Revert the stand-in and report intercepted calls.
    Restore,
    /// Report whether the stand-in is installed.
    Probe,
    /// Invoke the entry routine.
    Invoke {
        /// Synthetic event.
        event: &'a Value,
        /// Synthetic context fields.
        context: &'a SyntheticContext,
        /// Fields kept verbatim when the response has to be summarized.
        keep_fields: &'a [String],
    },
    /// End the worker loop.
    Shutdown,
}

/// Reply envelope shared by every operation.
#[derive(Debug, Deserialize)]
struct ReplyEnvelope {
    /// Whether the operation succeeded.
    ok: bool,
    /// Fault details when `ok` is false.
    #[serde(default)]
    error: Option<WorkerFault>,
    /// Operation-specific fields.
    #[serde(flatten)]
    body: Map<String, Value>,
}

// ============================================================================
// SECTION: Worker Process
// ============================================================================

/// How to start the interpreter worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    /// Interpreter executable.
    pub interpreter: String,
    /// Whether handler stderr reaches the host's stderr.
    pub forward_stderr: bool,
}

/// A running interpreter worker.
pub struct WorkerProcess {
    /// Child process handle.
    child: Child,
    /// Request stream.
    stdin: ChildStdin,
    /// Reply stream.
    stdout: BufReader<ChildStdout>,
}

impl WorkerProcess {
    /// Starts a fresh worker.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Spawn`] when the interpreter cannot be started.
    pub fn spawn(command: &WorkerCommand) -> Result<Self, HarnessError> {
        let stderr = if command.forward_stderr { Stdio::inherit() } else { Stdio::null() };
        let mut child = Command::new(&command.interpreter)
            .arg("-B")
            .arg("-c")
            .arg(WORKER_SCRIPT)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(stderr)
            .spawn()
            .map_err(|err| HarnessError::Spawn(format!("{}: {err}", command.interpreter)))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HarnessError::Spawn("missing worker stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HarnessError::Spawn("missing worker stdout".to_string()))?;
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    /// Sends one request and decodes the reply body as `R`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on I/O failure, malformed replies, or worker
    /// faults.
    pub(crate) fn request<R: DeserializeOwned>(
        &mut self,
        request: &WorkerRequest<'_>,
    ) -> Result<R, HarnessError> {
        let payload = serde_json::to_vec(request)
            .map_err(|err| HarnessError::Protocol(format!("request serialization failed: {err}")))?;
        if payload.len() > MAX_FRAME_BYTES {
            return Err(HarnessError::Protocol(format!(
                "request exceeds frame limit ({} > {MAX_FRAME_BYTES})",
                payload.len()
            )));
        }
        write_framed(&mut self.stdin, &payload)?;
        let reply = read_framed(&mut self.stdout)?;
        decode_reply(&reply)
    }

    /// Asks the worker to exit and waits for it.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the shutdown exchange fails.
    pub fn shutdown(mut self) -> Result<(), HarnessError> {
        let _: serde::de::IgnoredAny = self.request(&WorkerRequest::Shutdown)?;
        self.child
            .wait()
            .map_err(|err| HarnessError::Transport(format!("worker wait failed: {err}")))?;
        Ok(())
    }
}

impl Drop for WorkerProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Decodes a reply frame into an operation-specific body.
fn decode_reply<R: DeserializeOwned>(bytes: &[u8]) -> Result<R, HarnessError> {
    let envelope: ReplyEnvelope = serde_json::from_slice(bytes)
        .map_err(|err| HarnessError::Protocol(format!("invalid worker reply: {err}")))?;
    if !envelope.ok {
        let fault = envelope.error.ok_or_else(|| {
            HarnessError::Protocol("failure reply without error details".to_string())
        })?;
        return Err(HarnessError::from_fault(fault));
    }
    serde_json::from_value(Value::Object(envelope.body))
        .map_err(|err| HarnessError::Protocol(format!("unexpected worker reply: {err}")))
}

// ============================================================================
// SECTION: Framing
// ============================================================================

/// Reads one `Content-Length` framed message.
///
/// # Errors
///
/// Returns [`HarnessError::Transport`] when the stream closes or fails, and
/// [`HarnessError::Protocol`] when headers are invalid or the frame exceeds
/// [`MAX_FRAME_BYTES`].
pub fn read_framed(reader: &mut impl BufRead) -> Result<Vec<u8>, HarnessError> {
    let mut content_length: Option<u64> = None;
    let mut line = String::new();
    loop {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .map_err(|err| HarnessError::Transport(format!("worker read failed: {err}")))?;
        if bytes == 0 {
            return Err(HarnessError::Transport("worker closed its output".to_string()));
        }
        if line.trim().is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Content-Length:") {
            let parsed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| HarnessError::Protocol("invalid content length".to_string()))?;
            content_length = Some(parsed);
        }
    }
    let len = content_length
        .ok_or_else(|| HarnessError::Protocol("missing content length".to_string()))?;
    let limit = u64::try_from(MAX_FRAME_BYTES).unwrap_or(u64::MAX);
    if len > limit {
        return Err(HarnessError::Protocol(format!(
            "frame exceeds size limit ({len} > {MAX_FRAME_BYTES})"
        )));
    }
    let len = usize::try_from(len)
        .map_err(|_| HarnessError::Protocol("content length exceeds addressable size".to_string()))?;
    let mut buf = vec![0u8; len];
    Read::read_exact(reader, &mut buf)
        .map_err(|err| HarnessError::Transport(format!("worker read failed: {err}")))?;
    Ok(buf)
}

/// Writes one `Content-Length` framed message.
///
/// # Errors
///
/// Returns [`HarnessError::Transport`] when writes fail.
pub fn write_framed(writer: &mut impl Write, payload: &[u8]) -> Result<(), HarnessError> {
    let header = format!("Content-Length: {}\r\n\r\n", payload.len());
    writer
        .write_all(header.as_bytes())
        .map_err(|err| HarnessError::Transport(format!("worker write failed: {err}")))?;
    writer
        .write_all(payload)
        .map_err(|err| HarnessError::Transport(format!("worker write failed: {err}")))?;
    writer.flush().map_err(|err| HarnessError::Transport(format!("worker write failed: {err}")))?;
    Ok(())
}
