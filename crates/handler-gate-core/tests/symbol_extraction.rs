// crates/handler-gate-core/tests/symbol_extraction.rs
// ============================================================================
// Module: Symbol Extraction Tests
// Description: Validate symbol inventories produced from handler source.
// Purpose: Ensure defined, assigned, and module names follow assignment rules.
// Dependencies: handler-gate-core
// ============================================================================

//! Symbol extractor behavior tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use std::collections::BTreeSet;

use handler_gate_core::extract_symbols;

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[test]
fn top_level_definitions_assignments_and_imports_are_collected() {
    let inventory = extract_symbols(common::CONFORMANT_SOURCE, "fixture.py").unwrap();

    for name in
        ["VisionFrame", "convert_parsed_response_to_ndarray", "Preprocessing", "Postprocessing", "lambda_handler"]
    {
        assert!(inventory.defined.contains(name), "missing defined name {name}");
    }
    assert_eq!(inventory.assigned, set(&["config", "sagemaker_runtime", "WARP_TEMPLATES"]));
    assert_eq!(inventory.modules, set(&["boto3", "json", "vision.frames"]));
}

#[test]
fn nested_definitions_are_collected() {
    let source = "class Outer:\n    def method(self):\n        def inner():\n            pass\n";
    let inventory = extract_symbols(source, "nested.py").unwrap();
    assert_eq!(inventory.defined, set(&["Outer", "inner", "method"]));
}

#[test]
fn async_functions_count_as_definitions() {
    let inventory = extract_symbols("async def lambda_handler(event, context):\n    return {}\n", "a.py")
        .unwrap();
    assert!(inventory.provides("lambda_handler"));
}

#[test]
fn only_plain_name_assignments_count() {
    let source = "\
config = {}
a = b = 1
counter: int = 0
total += 1
obj.attr = 2
items[0] = 3
left, right = 4, 5
";
    let inventory = extract_symbols(source, "assign.py").unwrap();
    assert_eq!(inventory.assigned, set(&["a", "b", "config"]));
}

#[test]
fn definitions_inside_control_flow_blocks_are_collected() {
    let source = "\
try:
    import numpy
    WARP_TEMPLATES = {}
except ImportError:
    def fallback():
        pass
finally:
    done = True

if True:
    config = 1
else:
    class Alternative:
        pass

for _ in range(1):
    loop_value = 1

with open(__file__) as handle:
    content = handle.read()
";
    let inventory = extract_symbols(source, "blocks.py").unwrap();
    assert_eq!(inventory.defined, set(&["Alternative", "fallback"]));
    assert_eq!(inventory.assigned, set(&["WARP_TEMPLATES", "config", "content", "done", "loop_value"]));
    assert_eq!(inventory.modules, set(&["numpy"]));
}

#[test]
fn imports_record_module_names_only() {
    let source = "\
import os.path
import numpy as np
from . import sibling
from .pkg import helper
from collections import OrderedDict
";
    let inventory = extract_symbols(source, "imports.py").unwrap();
    assert_eq!(inventory.modules, set(&["collections", "numpy", "os.path", "pkg"]));
    assert!(inventory.defined.is_empty());
    assert!(inventory.assigned.is_empty());
    assert!(!inventory.provides("OrderedDict"));
    assert!(!inventory.provides("np"));
}

#[test]
fn empty_source_yields_empty_inventory() {
    let inventory = extract_symbols("", "empty.py").unwrap();
    assert!(inventory.defined.is_empty());
    assert!(inventory.assigned.is_empty());
    assert!(inventory.modules.is_empty());
}

#[test]
fn syntax_errors_are_reported_with_a_message() {
    let err = extract_symbols(common::BROKEN_SOURCE, "broken.py").unwrap_err();
    assert!(!err.message().is_empty());
}

#[test]
fn extraction_does_not_execute_source() {
    let source = "raise SystemExit(3)\nimport this_module_does_not_exist\nvalue = 1 / 0\n";
    let inventory = extract_symbols(source, "inert.py").unwrap();
    assert_eq!(inventory.assigned, set(&["value"]));
    assert_eq!(inventory.modules, set(&["this_module_does_not_exist"]));
}
