//! Default config tests for handler-gate-config.
// crates/handler-gate-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Default Tests
// Description: Validate built-in defaults and their conversions.
// Purpose: Ensure an empty config reproduces the stock handler ecosystem.
// =============================================================================

use handler_gate_config::AuditMode;
use handler_gate_config::DEFAULT_HTML_PLACEHOLDER;
use handler_gate_core::DEFAULT_REQUIRED_SYMBOLS;
use handler_gate_harness::HarnessSettings;
use serde_json::Value;

mod common;

use common::TestResult;

#[test]
fn empty_config_is_valid() -> TestResult {
    let config = common::minimal_config()?;
    config.validate().map_err(|err| err.to_string())?;
    if config.discovery.root != "lambdas" || config.discovery.entry_file != "lambda_function.py" {
        return Err("unexpected discovery defaults".to_string());
    }
    if config.logging.audit != AuditMode::None || config.report.strict {
        return Err("unexpected logging/report defaults".to_string());
    }
    if config.report.placeholder != DEFAULT_HTML_PLACEHOLDER {
        return Err("unexpected placeholder default".to_string());
    }
    Ok(())
}

#[test]
fn default_contract_preserves_symbol_order() -> TestResult {
    let config = common::minimal_config()?;
    let contract = config.required_contract().map_err(|err| err.to_string())?;
    let expected: Vec<String> =
        DEFAULT_REQUIRED_SYMBOLS.iter().map(|symbol| (*symbol).to_string()).collect();
    if contract.symbols() != expected.as_slice() {
        return Err(format!("contract order mismatch: {}", contract.symbols().join(", ")));
    }
    Ok(())
}

#[test]
fn default_harness_settings_match_harness_defaults() -> TestResult {
    let config = common::minimal_config()?;
    let settings = config.harness_settings(None);
    if settings != HarnessSettings::default() {
        return Err("config defaults diverge from harness defaults".to_string());
    }
    Ok(())
}

#[test]
fn environment_interpreter_overrides_config() -> TestResult {
    let config = common::config_from_toml("[harness]\ninterpreter = \"python3.11\"\n")
        .map_err(|err| err.to_string())?;
    if config.harness_settings(None).interpreter != "python3.11" {
        return Err("configured interpreter ignored".to_string());
    }
    if config.harness_settings(Some("/opt/python/bin/python3")).interpreter
        != "/opt/python/bin/python3"
    {
        return Err("environment interpreter did not take precedence".to_string());
    }
    if config.harness_settings(Some("")).interpreter != "python3.11" {
        return Err("empty environment value should be ignored".to_string());
    }
    Ok(())
}

#[test]
fn payload_tables_become_json_values() -> TestResult {
    let config = common::config_from_toml(
        r#"
[harness]
canned_payload = { predictions = [[1.0, 0.0]] }
event_payload = { text = "hello" }
"#,
    )
    .map_err(|err| err.to_string())?;
    let settings = config.harness_settings(None);
    if settings.substitution.payload["predictions"][0][0] != 1.0 {
        return Err("canned payload not carried through".to_string());
    }
    let body = settings.event["body"].as_str().ok_or("event body is not text")?;
    let decoded: Value = serde_json::from_str(body).map_err(|err| err.to_string())?;
    if decoded["text"] != "hello" {
        return Err("event payload not serialized into body".to_string());
    }
    Ok(())
}

#[test]
fn context_section_feeds_synthetic_context() -> TestResult {
    let config = common::config_from_toml(
        "[context]\nfunction_name = \"detector\"\nmemory_limit_in_mb = 512\ntimeout_ms = 1000\n",
    )
    .map_err(|err| err.to_string())?;
    let context = config.harness_settings(None).context;
    if context.function_name != "detector" || context.memory_limit_in_mb != 512 {
        return Err("context overrides not applied".to_string());
    }
    if context.aws_request_id != "test-request-id" || context.timeout_ms != 1000 {
        return Err("context defaults not preserved".to_string());
    }
    Ok(())
}
