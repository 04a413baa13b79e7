// crates/handler-gate-cli/src/lib.rs
// ============================================================================
// Module: Handler Gate CLI Library
// Description: Shared helpers for the handler-gate binary.
// Purpose: Expose the message catalog to the binary and its tests.
// Dependencies: Standard library only.
// ============================================================================

//! ## Overview
//! The `handler-gate` binary routes every user-facing string through the
//! [`i18n`] catalog via the [`t!`] macro.

pub mod i18n;
