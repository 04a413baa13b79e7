// crates/handler-gate-cli/tests/common/mod.rs
// ============================================================================
// Module: CLI Test Helpers
// Description: Shared fixtures for driving the handler-gate binary.
// Purpose: Lay out handler trees and run the binary in a scratch directory.
// Dependencies: tempfile
// ============================================================================

//! ## Overview
//! Every test runs the built binary with a scratch working directory so that
//! artifacts and the default config lookup stay inside the sandbox. Tests that
//! need a real interpreter call [`python`] and return early when none exists.

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
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;

/// Handler module defining every default required symbol, runnable without
/// third-party packages.
pub const CONFORMANT_SOURCE: &str = r#"
import json

config = {"endpoint_name": "detector"}


class RuntimeClient:
    def invoke_endpoint(self, **kwargs):
        raise RuntimeError("network access attempted")


sagemaker_runtime = RuntimeClient()
WARP_TEMPLATES = {"default": [0, 1, 2]}


class VisionFrame:
    pass


def convert_parsed_response_to_ndarray(parsed):
    return parsed["predictions"]


class Preprocessing:
    pass


class Postprocessing:
    pass


def lambda_handler(event, context):
    response = sagemaker_runtime.invoke_endpoint(EndpointName=config["endpoint_name"], Body=event["body"])
    parsed = json.loads(response["Body"].read())
    return {"statusCode": 200, "body": json.dumps(convert_parsed_response_to_ndarray(parsed))}
"#;

/// Runnable handler module lacking `convert_parsed_response_to_ndarray`.
pub const PARTIAL_SOURCE: &str = r#"
import json

config = {}


class RuntimeClient:
    def invoke_endpoint(self, **kwargs):
        raise RuntimeError("network access attempted")


sagemaker_runtime = RuntimeClient()
WARP_TEMPLATES = {}


class VisionFrame:
    pass


class Preprocessing:
    pass


class Postprocessing:
    pass


def lambda_handler(event, context):
    sagemaker_runtime.invoke_endpoint(Body=event["body"])
    return {"statusCode": 200, "body": "{}"}
"#;

/// Handler module with a syntax error.
pub const BROKEN_SOURCE: &str = "def lambda_handler(event, context)\n    return {}\n";

/// Minimal dashboard template.
pub const TEMPLATE: &str = "<html><body><h1>Handlers</h1>\n<!-- TEST_RESULTS -->\n</body></html>\n";

/// Path to the built binary.
pub fn handler_gate_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_handler-gate"))
}

/// Writes `source` as `<root>/<name>/<entry_file>`.
pub fn write_handler_file(root: &Path, name: &str, entry_file: &str, source: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(entry_file), source).unwrap();
}

/// Writes `source` as the default entry file of handler `name`.
pub fn write_handler(root: &Path, name: &str, source: &str) {
    write_handler_file(root, name, "lambda_function.py", source);
}

/// Base command running in `workdir` with ambient overrides cleared.
pub fn command(workdir: &Path) -> Command {
    let mut command = Command::new(handler_gate_bin());
    command
        .current_dir(workdir)
        .env_remove("HANDLER_GATE_CONFIG")
        .env_remove("HANDLER_GATE_LANG");
    command
}

/// Runs the binary in `workdir` with `args`.
pub fn run(workdir: &Path, args: &[&str]) -> Output {
    command(workdir).args(args).output().expect("run handler-gate")
}

/// Returns stdout as text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Returns stderr as text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Returns true when an interpreter is available, noting the skip otherwise.
pub fn python() -> bool {
    let interpreter = std::env::var("HANDLER_GATE_PYTHON")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "python3".to_string());
    let available = Command::new(&interpreter)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success());
    if !available {
        let _ = writeln!(std::io::stderr(), "skipping: interpreter {interpreter} unavailable");
    }
    available
}
