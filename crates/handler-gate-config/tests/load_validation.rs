//! Config loading tests for handler-gate-config.
// crates/handler-gate-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Tests
// Description: Validate file loading, limits, and strict parsing.
// Purpose: Ensure config files are read fail-closed.
// =============================================================================

use std::fs;

use handler_gate_config::HandlerGateConfig;
use tempfile::TempDir;

mod common;

use common::TestResult;

#[test]
fn explicit_file_is_loaded_and_recorded() -> TestResult {
    let (_dir, path) = common::write_config("[report]\nstrict = true\n")?;
    let config = HandlerGateConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if !config.report.strict {
        return Err("strict flag not loaded".to_string());
    }
    if config.source.as_deref() != Some(path.as_path()) {
        return Err("config source not recorded".to_string());
    }
    Ok(())
}

#[test]
fn missing_explicit_file_is_an_io_error() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    common::assert_invalid(HandlerGateConfig::load(Some(&path)), "config io error")
}

#[test]
fn unknown_fields_are_rejected() -> TestResult {
    let (_dir, path) = common::write_config("[harness]\nentry_point = \"main\"\n")?;
    common::assert_invalid(HandlerGateConfig::load(Some(&path)), "config parse error")
}

#[test]
fn unknown_sections_are_rejected() -> TestResult {
    let (_dir, path) = common::write_config("[server]\nbind = \"127.0.0.1:0\"\n")?;
    common::assert_invalid(HandlerGateConfig::load(Some(&path)), "config parse error")
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let padding = "#".repeat(1024 * 1024 + 1);
    let (_dir, path) = common::write_config(&padding)?;
    common::assert_invalid(HandlerGateConfig::load(Some(&path)), "size limit")
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let (_dir, path) = common::write_config("")?;
    fs::write(&path, [0xff, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    common::assert_invalid(HandlerGateConfig::load(Some(&path)), "utf-8")
}

#[test]
fn loaded_file_is_validated() -> TestResult {
    let (_dir, path) = common::write_config("[contract]\nrequired_symbols = []\n")?;
    common::assert_invalid(HandlerGateConfig::load(Some(&path)), "at least one symbol")
}
