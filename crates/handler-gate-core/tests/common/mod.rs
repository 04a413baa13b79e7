// crates/handler-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared fixtures for handler-gate-core tests.
// Purpose: Provide handler sources, scratch trees, and scripted collaborators.
// Dependencies: handler-gate-core, tempfile
// ============================================================================

//! ## Overview
//! Provides handler source fixtures, a helper that lays out handler
//! directories in a scratch root, a scripted [`ExecutionHarness`], and an
//! audit sink that records events in memory.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use handler_gate_core::AuditEvent;
use handler_gate_core::AuditSink;
use handler_gate_core::DEFAULT_ENTRY_FILE;
use handler_gate_core::ExecutionHarness;
use handler_gate_core::ExecutionLog;
use handler_gate_core::ExecutionResult;
use handler_gate_core::HandlerTarget;

// ============================================================================
// SECTION: Source Fixtures
// ============================================================================

/// A handler module that defines every default required symbol.
pub const CONFORMANT_SOURCE: &str = r#"
import json
import boto3
from vision.frames import FrameLoader

config = {"endpoint_name": "detector"}
sagemaker_runtime = boto3.client("sagemaker-runtime")
WARP_TEMPLATES = {"default": [0, 1, 2]}


class VisionFrame:
    def __init__(self, pixels):
        self.pixels = pixels


def convert_parsed_response_to_ndarray(parsed):
    return parsed["predictions"]


class Preprocessing:
    def run(self, frame):
        return frame


class Postprocessing:
    def run(self, predictions):
        return predictions


def lambda_handler(event, context):
    response = sagemaker_runtime.invoke_endpoint(EndpointName=config["endpoint_name"], Body=event["body"])
    parsed = json.loads(response["Body"].read())
    return {"statusCode": 200, "body": json.dumps(convert_parsed_response_to_ndarray(parsed))}
"#;

/// A handler module lacking `convert_parsed_response_to_ndarray`.
pub const PARTIAL_SOURCE: &str = r#"
import json
import boto3

config = {"endpoint_name": "detector"}
sagemaker_runtime = boto3.client("sagemaker-runtime")
WARP_TEMPLATES = {}


class VisionFrame:
    pass


class Preprocessing:
    pass


class Postprocessing:
    pass


def lambda_handler(event, context):
    return {"statusCode": 200, "body": "{}"}
"#;

/// A handler module with a syntax error.
pub const BROKEN_SOURCE: &str = "def lambda_handler(event, context)\n    return {}\n";

// ============================================================================
// SECTION: Scratch Trees
// ============================================================================

/// Writes `source` as the entry file of handler `name` under `root`.
pub fn write_handler(root: &Path, name: &str, source: &str) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("create handler dir");
    let entry = dir.join(DEFAULT_ENTRY_FILE);
    fs::write(&entry, source).expect("write entry file");
    entry
}

// ============================================================================
// SECTION: Scripted Harness
// ============================================================================

/// Harness that returns canned results keyed by handler name.
#[derive(Default)]
pub struct ScriptedHarness {
    /// Canned results; unknown handlers execute successfully.
    pub results: BTreeMap<String, ExecutionResult>,
    /// Handler names in the order they were executed.
    pub calls: Vec<String>,
}

impl ScriptedHarness {
    /// Scripts a failing execution for `name`.
    pub fn fail(mut self, name: &str, message: &str) -> Self {
        self.results.insert(name.to_string(), ExecutionResult::failed(name.into(), message));
        self
    }

    /// Scripts a successful execution with an invalid response shape.
    pub fn invalid_shape(mut self, name: &str) -> Self {
        let mut result = success(name);
        result.response_shape_valid = false;
        result.response_type = Some("str".to_string());
        self.results.insert(name.to_string(), result);
        self
    }
}

impl ExecutionHarness for ScriptedHarness {
    fn execute(&mut self, target: &HandlerTarget, log: &mut ExecutionLog) -> ExecutionResult {
        self.calls.push(target.name.to_string());
        let result =
            self.results.get(target.name.as_str()).cloned().unwrap_or_else(|| success(target.name.as_str()));
        log.push(format!("scripted {}: {}", target.name, result.message));
        result
    }
}

/// Builds a successful execution result.
pub fn success(name: &str) -> ExecutionResult {
    ExecutionResult {
        handler_name: name.into(),
        executed: true,
        message: "Success".to_string(),
        response_shape_valid: true,
        intercepted_calls: 1,
        response_type: Some("dict".to_string()),
    }
}

// ============================================================================
// SECTION: Audit Capture
// ============================================================================

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct RecordingAuditSink {
    /// Captured events.
    pub events: Mutex<Vec<AuditEvent>>,
}

impl RecordingAuditSink {
    /// Returns a snapshot of captured events.
    pub fn snapshot(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: &AuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
