// crates/handler-gate-config/src/lib.rs
// ============================================================================
// Module: Handler Gate Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for handler-gate.toml semantics.
// Dependencies: handler-gate-core, handler-gate-harness, serde, toml
// ============================================================================

//! ## Overview
//! `handler-gate-config` defines the configuration model for the handler
//! verification tool. Every section has built-in defaults, so an absent
//! `handler-gate.toml` yields a fully usable config; a present file is parsed
//! strictly (unknown fields rejected) and validated fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
