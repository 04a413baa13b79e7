// crates/handler-gate-core/src/core/conformance.rs
// ============================================================================
// Module: Handler Gate Conformance Checker
// Description: Compares a symbol inventory against the required contract.
// Purpose: Classify handlers as conformant, partial, or unparsable.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`check_conformance`] is a pure function of an extraction outcome and the
//! [`RequiredContract`]. Missing symbols are `contract - (defined | assigned)`
//! and are listed in contract order, never set order, so reports diff cleanly
//! between runs. Referenced modules are reported separately and never satisfy a
//! requirement.
//!
//! ## Invariants
//! - A failed extraction always yields [`ConformanceStatus::Unparsable`].
//! - A symbol provided by the inventory never appears in `missing_symbols`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::core::contract::RequiredContract;
use crate::core::identifiers::HandlerName;
use crate::core::inventory::ParseError;
use crate::core::inventory::SymbolInventory;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Structural conformance classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConformanceStatus {
    /// Every required symbol is present.
    Conformant,
    /// At least one required symbol is missing.
    Partial,
    /// The source could not be parsed.
    Unparsable,
}

impl ConformanceStatus {
    /// Returns the stable label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Conformant => "conformant",
            Self::Partial => "partial",
            Self::Unparsable => "unparsable",
        }
    }
}

impl fmt::Display for ConformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static conformance outcome for one handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConformanceResult {
    /// Handler this result belongs to.
    pub handler_name: HandlerName,
    /// Derived conformance status.
    pub status: ConformanceStatus,
    /// Required symbols absent from the module, in contract order.
    pub missing_symbols: Vec<String>,
    /// Required symbols present in the module, in contract order.
    pub found_symbols: Vec<String>,
    /// Modules referenced by import statements.
    pub referenced_modules: BTreeSet<String>,
    /// Parser message when the source could not be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

// ============================================================================
// SECTION: Checker
// ============================================================================

/// Derives the conformance result for one handler.
#[must_use]
pub fn check_conformance(
    handler_name: HandlerName,
    extraction: Result<&SymbolInventory, &ParseError>,
    contract: &RequiredContract,
) -> ConformanceResult {
    let inventory = match extraction {
        Ok(inventory) => inventory,
        Err(err) => {
            return ConformanceResult {
                handler_name,
                status: ConformanceStatus::Unparsable,
                missing_symbols: Vec::new(),
                found_symbols: Vec::new(),
                referenced_modules: BTreeSet::new(),
                parse_error: Some(err.message().to_string()),
            };
        }
    };

    let (found_symbols, missing_symbols): (Vec<String>, Vec<String>) =
        contract.symbols().iter().cloned().partition(|symbol| inventory.provides(symbol));
    let status = if missing_symbols.is_empty() {
        ConformanceStatus::Conformant
    } else {
        ConformanceStatus::Partial
    };

    ConformanceResult {
        handler_name,
        status,
        missing_symbols,
        found_symbols,
        referenced_modules: inventory.modules.clone(),
        parse_error: None,
    }
}
