// crates/handler-gate-core/src/core/mod.rs
// ============================================================================
// Module: Handler Gate Core Types
// Description: Canonical data model and static checks for handler verification.
// Purpose: Provide stable, serializable types for inventories, results, and reports.
// Dependencies: rustpython-parser, serde, thiserror
// ============================================================================

//! ## Overview
//! Handler Gate core types define the required-symbol contract, the symbol
//! inventory produced from handler source, conformance and execution results,
//! and the aggregate report. Inventories and conformance results are derived
//! purely from source text and never reflect execution side effects.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod conformance;
pub mod contract;
pub mod discovery;
pub mod identifiers;
pub mod inventory;
pub mod report;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use conformance::ConformanceResult;
pub use conformance::ConformanceStatus;
pub use conformance::check_conformance;
pub use contract::ContractError;
pub use contract::DEFAULT_REQUIRED_SYMBOLS;
pub use contract::RequiredContract;
pub use discovery::DEFAULT_ENTRY_FILE;
pub use discovery::DiscoveryError;
pub use discovery::HandlerTarget;
pub use discovery::discover_handlers;
pub use identifiers::HandlerName;
pub use inventory::ParseError;
pub use inventory::SymbolInventory;
pub use inventory::extract_symbols;
pub use report::AggregateReport;
pub use report::ExecutionLog;
pub use report::ExecutionResult;
pub use report::HandlerRecord;
pub use report::MissingEntry;
pub use report::OverallStatus;
pub use report::ReportAggregator;
pub use report::ReportError;
pub use report::ReportSummary;
