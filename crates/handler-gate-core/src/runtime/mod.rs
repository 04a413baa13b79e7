// crates/handler-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Handler Gate Runtime
// Description: Verification runner, report renderers, and artifact writers.
// Purpose: Drive per-handler checks and present the aggregate report.
// Dependencies: crate::{audit, core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime module sequences the static and dynamic checks for each
//! discovered handler, then renders the resulting report as a console table,
//! a flat text artifact, and an HTML fragment injected into a template.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod artifacts;
pub mod render;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use artifacts::RenderError;
pub use artifacts::write_html_report;
pub use artifacts::write_text_report;
pub use render::TABLE_HEADERS;
pub use render::escape_html;
pub use render::render_console;
pub use render::render_html_fragment;
pub use render::render_table;
pub use render::render_text_report;
pub use render::summary_line;
pub use runner::MAX_ENTRY_FILE_BYTES;
pub use runner::VerificationOutcome;
pub use runner::VerificationRunner;
