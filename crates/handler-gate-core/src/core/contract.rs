// crates/handler-gate-core/src/core/contract.rs
// ============================================================================
// Module: Handler Gate Required Contract
// Description: Ordered set of symbol names every handler module must provide.
// Purpose: Fix the structural contract once per process and keep it immutable.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The required contract lists the symbols a conformant handler defines or
//! assigns: a configuration object, a remote-client handle, input and output
//! preparation types, a template registry, a response-conversion routine, and
//! the entry routine. The declared order is preserved so that missing-symbol
//! reports are deterministic across runs.
//!
//! ## Invariants
//! - The contract is non-empty.
//! - Symbol names are non-empty and unique.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default required symbols, in report order.
pub const DEFAULT_REQUIRED_SYMBOLS: &[&str] = &[
    "config",
    "sagemaker_runtime",
    "VisionFrame",
    "WARP_TEMPLATES",
    "convert_parsed_response_to_ndarray",
    "Preprocessing",
    "Postprocessing",
    "lambda_handler",
];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Errors raised while constructing a [`RequiredContract`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The contract lists no symbols.
    #[error("required contract must list at least one symbol")]
    Empty,
    /// A symbol name is blank.
    #[error("required contract contains a blank symbol name")]
    BlankSymbol,
    /// A symbol name appears more than once.
    #[error("required contract lists symbol `{0}` more than once")]
    Duplicate(String),
}

/// Immutable, ordered set of symbol names a handler module must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredContract {
    /// Symbol names in declaration order.
    symbols: Vec<String>,
}

impl RequiredContract {
    /// Builds a contract from symbol names, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when the list is empty, contains a blank name,
    /// or repeats a name.
    pub fn new<I, S>(symbols: I) -> Result<Self, ContractError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let mut ordered = Vec::new();
        for symbol in symbols {
            let symbol = symbol.into();
            let trimmed = symbol.trim();
            if trimmed.is_empty() {
                return Err(ContractError::BlankSymbol);
            }
            if !seen.insert(trimmed.to_string()) {
                return Err(ContractError::Duplicate(trimmed.to_string()));
            }
            ordered.push(trimmed.to_string());
        }
        if ordered.is_empty() {
            return Err(ContractError::Empty);
        }
        Ok(Self {
            symbols: ordered,
        })
    }

    /// Returns the symbols in declaration order.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Returns true when `symbol` is part of the contract.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|candidate| candidate == symbol)
    }

    /// Returns the number of required symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; contracts are non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for RequiredContract {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_REQUIRED_SYMBOLS.iter().map(|symbol| (*symbol).to_string()).collect(),
        }
    }
}
