// crates/handler-gate-harness/tests/substitution_guard.rs
// ============================================================================
// Module: Substitution Guard Tests
// Description: Drive the worker through load, substitute, invoke, and restore.
// Purpose: Ensure the stand-in is scoped to its guard and reverted correctly.
// Dependencies: handler-gate-harness, tempfile
// ============================================================================

//! Substitution layer tests against a real interpreter worker.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use handler_gate_harness::HarnessError;
use handler_gate_harness::LoadedHandler;
use handler_gate_harness::Substitution;
use handler_gate_harness::SyntheticContext;
use handler_gate_harness::build_event;
use handler_gate_harness::default_event_payload;
use serde_json::Value;
use tempfile::TempDir;

/// Handler whose client logs attribute writes and deletions into the response.
const TRACING_HANDLER: &str = r#"
import json

EVENTS = []


class RuntimeClient:
    def invoke_endpoint(self, **kwargs):
        raise RuntimeError("network")

    def __setattr__(self, name, value):
        EVENTS.append(["set", name])
        object.__setattr__(self, name, value)

    def __delattr__(self, name):
        EVENTS.append(["del", name])
        object.__delattr__(self, name)


sagemaker_runtime = RuntimeClient()


def lambda_handler(event, context):
    first = sagemaker_runtime.invoke_endpoint(Body=b"")
    second = sagemaker_runtime.invoke_endpoint(Body=b"")
    assert first["Body"].read() == second["Body"].read()
    return {"statusCode": 200, "body": json.dumps(EVENTS)}
"#;

/// Handler whose client carries the method as an instance attribute.
const INSTANCE_METHOD_HANDLER: &str = r#"
import json
import types

EVENTS = []


def original(**kwargs):
    raise RuntimeError("network")


class Namespace(types.SimpleNamespace):
    def __setattr__(self, name, value):
        EVENTS.append(["set", name, value is original])
        super().__setattr__(name, value)

    def __delattr__(self, name):
        EVENTS.append(["del", name])
        super().__delattr__(name)


sagemaker_runtime = Namespace()
sagemaker_runtime.invoke_endpoint = original
EVENTS.clear()


def lambda_handler(event, context):
    return {"statusCode": 200, "body": json.dumps(EVENTS)}
"#;

fn invoke_body(guard: &mut handler_gate_harness::SubstitutionGuard<'_>) -> Value {
    let event = build_event(&default_event_payload());
    let response = guard.invoke(&event, &SyntheticContext::default(), &[]).unwrap();
    serde_json::from_str(response.response["body"].as_str().unwrap()).unwrap()
}

#[test]
fn guard_installs_counts_and_restores() {
    let Some(python) = common::python() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let target = common::handler(dir.path(), "tracing", TRACING_HANDLER);
    let mut handler = LoadedHandler::load(&common::command(&python), &target.entry_path, "lambda_handler").unwrap();
    assert!(handler.has_entry_routine());
    assert!(!handler.is_substituted().unwrap());

    let substitution = Substitution::default();
    let mut guard = handler.substitute(&substitution).unwrap();
    assert!(guard.is_installed().unwrap());
    let _ = invoke_body(&mut guard);
    assert_eq!(guard.release().unwrap(), 2);

    assert!(!handler.is_substituted().unwrap());
    handler.shutdown().unwrap();
}

#[test]
fn class_level_method_is_restored_by_deleting_the_override() {
    let Some(python) = common::python() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let target = common::handler(dir.path(), "tracing", TRACING_HANDLER);
    let mut handler = LoadedHandler::load(&common::command(&python), &target.entry_path, "lambda_handler").unwrap();
    let substitution = Substitution::default();

    let guard = handler.substitute(&substitution).unwrap();
    guard.release().unwrap();
    let mut guard = handler.substitute(&substitution).unwrap();
    let events = invoke_body(&mut guard);
    guard.release().unwrap();

    assert_eq!(
        events,
        serde_json::json!([
            ["set", "invoke_endpoint"],
            ["del", "invoke_endpoint"],
            ["set", "invoke_endpoint"]
        ])
    );
}

#[test]
fn instance_level_method_is_restored_by_reassignment() {
    let Some(python) = common::python() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let target = common::handler(dir.path(), "instance", INSTANCE_METHOD_HANDLER);
    let mut handler = LoadedHandler::load(&common::command(&python), &target.entry_path, "lambda_handler").unwrap();
    let substitution = Substitution::default();

    let guard = handler.substitute(&substitution).unwrap();
    guard.release().unwrap();
    let mut guard = handler.substitute(&substitution).unwrap();
    let events = invoke_body(&mut guard);
    drop(guard);

    assert_eq!(
        events,
        serde_json::json!([
            ["set", "invoke_endpoint", false],
            ["set", "invoke_endpoint", true],
            ["set", "invoke_endpoint", false]
        ])
    );
    assert!(!handler.is_substituted().unwrap());
}

#[test]
fn dropping_the_guard_restores_the_client() {
    let Some(python) = common::python() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let target = common::handler(dir.path(), "tracing", TRACING_HANDLER);
    let mut handler = LoadedHandler::load(&common::command(&python), &target.entry_path, "lambda_handler").unwrap();

    {
        let mut guard = handler.substitute(&Substitution::default()).unwrap();
        assert!(guard.is_installed().unwrap());
    }

    assert!(!handler.is_substituted().unwrap());
}

#[test]
fn missing_client_attribute_is_a_substitution_error() {
    let Some(python) = common::python() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let target = common::handler(
        dir.path(),
        "clientless",
        "def lambda_handler(event, context):\n    return {'statusCode': 200, 'body': ''}\n",
    );
    let mut handler = LoadedHandler::load(&common::command(&python), &target.entry_path, "lambda_handler").unwrap();

    let err = handler.substitute(&Substitution::default()).err().unwrap();
    assert!(matches!(err, HarnessError::Substitution(_)));
    assert!(err.to_string().contains("sagemaker_runtime"));
}

#[test]
fn missing_client_method_is_a_substitution_error() {
    let Some(python) = common::python() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let target = common::handler(
        dir.path(),
        "methodless",
        "sagemaker_runtime = object()\n\ndef lambda_handler(event, context):\n    return {}\n",
    );
    let mut handler = LoadedHandler::load(&common::command(&python), &target.entry_path, "lambda_handler").unwrap();

    let err = handler.substitute(&Substitution::default()).err().unwrap();
    assert!(matches!(err, HarnessError::Substitution(_)));
    assert!(err.to_string().contains("invoke_endpoint"));
}

#[test]
fn import_failure_is_a_load_error() {
    let Some(python) = common::python() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let target = common::handler(dir.path(), "deps", "import handler_gate_missing_dependency\n");

    let err = LoadedHandler::load(&common::command(&python), &target.entry_path, "lambda_handler")
        .err()
        .unwrap();
    assert!(matches!(err, HarnessError::Load(_)));
    assert!(err.to_string().contains("ModuleNotFoundError"));
}

#[test]
fn sibling_modules_are_importable() {
    let Some(python) = common::python() else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let target = common::handler(
        dir.path(),
        "layered",
        "from helpers import STATUS\n\ndef lambda_handler(event, context):\n    return {}\n",
    );
    std::fs::write(dir.path().join("layered").join("helpers.py"), "STATUS = 200\n").unwrap();

    let handler = LoadedHandler::load(&common::command(&python), &target.entry_path, "lambda_handler").unwrap();
    assert!(handler.has_entry_routine());
}
