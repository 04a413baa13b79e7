// crates/handler-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Handler Gate Identifiers
// Description: Opaque identifier for handler modules within one run.
// Purpose: Provide a strongly typed, ordered, serializable handler name.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A handler is named after the subdirectory that contains its entry file.
//! Names are unique within a run because each discovered subdirectory yields
//! exactly one handler.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Handler name derived from the handler's directory name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerName(String);

impl HandlerName {
    /// Creates a new handler name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for HandlerName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HandlerName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
