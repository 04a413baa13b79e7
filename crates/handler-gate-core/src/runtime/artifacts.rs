// crates/handler-gate-core/src/runtime/artifacts.rs
// ============================================================================
// Module: Handler Gate Report Artifacts
// Description: Writes the text report and the HTML dashboard.
// Purpose: Persist rendered reports without affecting the run verdict.
// Dependencies: thiserror, crate::runtime::render
// ============================================================================

//! ## Overview
//! Artifact writers render a report and persist it. Parent directories are
//! created on demand. The HTML writer injects the results fragment into a
//! template at a placeholder; a template without the placeholder is an error
//! rather than a silently unchanged copy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::report::AggregateReport;
use crate::core::report::ExecutionLog;
use crate::runtime::render::render_html_fragment;
use crate::runtime::render::render_text_report;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while writing report artifacts.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The HTML template could not be read.
    #[error("failed to read template {}: {error}", path.display())]
    TemplateRead {
        /// Template path.
        path: PathBuf,
        /// Underlying error message.
        error: String,
    },
    /// The HTML template lacks the results placeholder.
    #[error("template {} does not contain placeholder {placeholder}", path.display())]
    PlaceholderMissing {
        /// Template path.
        path: PathBuf,
        /// Expected placeholder text.
        placeholder: String,
    },
    /// A parent directory could not be created.
    #[error("failed to create directory {}: {error}", path.display())]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying error message.
        error: String,
    },
    /// The artifact could not be written.
    #[error("failed to write {}: {error}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying error message.
        error: String,
    },
}

// ============================================================================
// SECTION: Writers
// ============================================================================

/// Writes the flat text report to `path`.
///
/// # Errors
///
/// Returns [`RenderError`] when the directory or file cannot be written.
pub fn write_text_report(
    path: &Path,
    report: &AggregateReport,
    log: &ExecutionLog,
) -> Result<(), RenderError> {
    write_artifact(path, &render_text_report(report, log))
}

/// Injects the results fragment into `template` and writes it to `output`.
///
/// Every occurrence of `placeholder` is replaced.
///
/// # Errors
///
/// Returns [`RenderError`] when the template is unreadable, lacks the
/// placeholder, or the output cannot be written.
pub fn write_html_report(
    template: &Path,
    output: &Path,
    placeholder: &str,
    report: &AggregateReport,
) -> Result<(), RenderError> {
    let source = fs::read_to_string(template).map_err(|err| RenderError::TemplateRead {
        path: template.to_path_buf(),
        error: err.to_string(),
    })?;
    if placeholder.is_empty() || !source.contains(placeholder) {
        return Err(RenderError::PlaceholderMissing {
            path: template.to_path_buf(),
            placeholder: placeholder.to_string(),
        });
    }
    let rendered = source.replace(placeholder, &render_html_fragment(report));
    write_artifact(output, &rendered)
}

/// Writes `contents` to `path`, creating parent directories.
fn write_artifact(path: &Path, contents: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| RenderError::CreateDir {
            path: parent.to_path_buf(),
            error: err.to_string(),
        })?;
    }
    fs::write(path, contents).map_err(|err| RenderError::Write {
        path: path.to_path_buf(),
        error: err.to_string(),
    })
}
