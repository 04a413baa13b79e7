// crates/handler-gate-core/src/core/discovery.rs
// ============================================================================
// Module: Handler Gate Module Discoverer
// Description: Directory walk mapping handler names to entry files.
// Purpose: Apply the "one subdirectory = one handler" convention.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Every immediate subdirectory of the root that contains the conventional
//! entry file is a handler named after the subdirectory. Subdirectories without
//! the entry file are not handlers and are skipped silently. Zero handlers is a
//! fatal condition: an empty report would be indistinguishable from a clean
//! pass.
//!
//! Handlers are returned sorted by name so discovery order is stable across
//! platforms and filesystems.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::HandlerName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Conventional entry file name inside each handler directory.
pub const DEFAULT_ENTRY_FILE: &str = "lambda_function.py";

// ============================================================================
// SECTION: Types
// ============================================================================

/// A discovered handler and the path of its entry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerTarget {
    /// Handler name (the subdirectory name).
    pub name: HandlerName,
    /// Path of the handler's entry file.
    pub entry_path: PathBuf,
}

/// Errors raised while discovering handlers.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No subdirectory of the root contains an entry file.
    #[error("no handlers found in {} (expected subdirectories containing {entry_file})", .root.display())]
    NoHandlersFound {
        /// Root directory that was scanned.
        root: PathBuf,
        /// Entry file name that was searched for.
        entry_file: String,
    },
    /// The root directory could not be listed.
    #[error("failed to read handler root {}: {error}", .root.display())]
    RootUnreadable {
        /// Root directory that was scanned.
        root: PathBuf,
        /// Underlying I/O error text.
        error: String,
    },
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Lists handlers under `root` whose directory contains `entry_file`.
///
/// # Errors
///
/// Returns [`DiscoveryError::RootUnreadable`] when the root cannot be listed
/// and [`DiscoveryError::NoHandlersFound`] when no subdirectory qualifies.
pub fn discover_handlers(root: &Path, entry_file: &str) -> Result<Vec<HandlerTarget>, DiscoveryError> {
    let unreadable = |err: std::io::Error| DiscoveryError::RootUnreadable {
        root: root.to_path_buf(),
        error: err.to_string(),
    };

    let mut handlers = Vec::new();
    for entry in fs::read_dir(root).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let entry_path = path.join(entry_file);
        if !entry_path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        handlers.push(HandlerTarget {
            name: HandlerName::new(name),
            entry_path,
        });
    }

    if handlers.is_empty() {
        return Err(DiscoveryError::NoHandlersFound {
            root: root.to_path_buf(),
            entry_file: entry_file.to_string(),
        });
    }
    handlers.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(handlers)
}
