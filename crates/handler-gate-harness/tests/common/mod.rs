// crates/handler-gate-harness/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared helpers for handler-gate-harness tests.
// Purpose: Locate an interpreter and lay out handler fixtures on disk.
// Dependencies: handler-gate-core, handler-gate-harness, tempfile
// ============================================================================

//! ## Overview
//! Tests that need a real interpreter call [`python`] and return early when
//! none is available, so the suite stays green on hosts without one.

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

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::process::Stdio;

use handler_gate_core::HandlerName;
use handler_gate_core::HandlerTarget;
use handler_gate_harness::HarnessSettings;
use handler_gate_harness::PYTHON_ENV_VAR;
use handler_gate_harness::WorkerCommand;
use handler_gate_harness::resolve_interpreter;

/// Returns a usable interpreter, or `None` after noting the skip on stderr.
pub fn python() -> Option<String> {
    let env_override = std::env::var(PYTHON_ENV_VAR).ok();
    let interpreter = resolve_interpreter(env_override.as_deref(), None);
    let available = Command::new(&interpreter)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success());
    if available {
        Some(interpreter)
    } else {
        let _ = writeln!(std::io::stderr(), "skipping: interpreter {interpreter} unavailable");
        None
    }
}

/// Harness settings using `interpreter`.
pub fn settings(interpreter: &str) -> HarnessSettings {
    HarnessSettings {
        interpreter: interpreter.to_string(),
        ..HarnessSettings::default()
    }
}

/// Worker command using `interpreter`.
pub fn command(interpreter: &str) -> WorkerCommand {
    WorkerCommand {
        interpreter: interpreter.to_string(),
        forward_stderr: false,
    }
}

/// Writes a handler entry file and returns its target.
pub fn handler(root: &Path, name: &str, source: &str) -> HandlerTarget {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    let entry_path = dir.join("lambda_function.py");
    fs::write(&entry_path, source).unwrap();
    HandlerTarget {
        name: HandlerName::new(name),
        entry_path,
    }
}

/// A handler that calls the remote client once and returns a valid response.
pub const WORKING_HANDLER: &str = r#"
import json


class RuntimeClient:
    def invoke_endpoint(self, **kwargs):
        raise RuntimeError("network access attempted")


sagemaker_runtime = RuntimeClient()


def lambda_handler(event, context):
    print("handler stdout must not reach the protocol stream")
    request = json.loads(event["body"])
    response = sagemaker_runtime.invoke_endpoint(EndpointName="detector", Body=json.dumps(request))
    predictions = json.loads(response["Body"].read())["predictions"]
    return {"statusCode": 200, "body": json.dumps({"predictions": predictions})}
"#;

/// Builds a handler whose entry routine body is `body`, with a stub client.
pub fn handler_with_body(body: &str) -> String {
    let indented: String = body.lines().map(|line| format!("    {line}\n")).collect();
    format!(
        "import json\n\n\nclass RuntimeClient:\n    def invoke_endpoint(self, **kwargs):\n        raise RuntimeError('network')\n\n\nsagemaker_runtime = RuntimeClient()\n\n\ndef lambda_handler(event, context):\n{indented}"
    )
}
