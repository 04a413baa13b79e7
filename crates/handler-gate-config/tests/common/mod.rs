// crates/handler-gate-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for handler-gate-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::PathBuf;

use handler_gate_config::ConfigError;
use handler_gate_config::HandlerGateConfig;
use tempfile::TempDir;

/// Result type for tests that report failures as strings.
pub type TestResult = Result<(), String>;

/// Parses a TOML string into a `HandlerGateConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<HandlerGateConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<HandlerGateConfig, String> {
    config_from_toml("").map_err(|err| err.to_string())
}

/// Writes `contents` to a config file inside a fresh scratch directory.
pub fn write_config(contents: &str) -> Result<(TempDir, PathBuf), String> {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("handler-gate.toml");
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    Ok((dir, path))
}

/// Asserts that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
