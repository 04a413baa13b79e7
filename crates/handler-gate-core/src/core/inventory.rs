// crates/handler-gate-core/src/core/inventory.rs
// ============================================================================
// Module: Handler Gate Symbol Extractor
// Description: Static symbol inventory built from a handler's parsed source.
// Purpose: Inventory definitions, assignments, and imports without executing code.
// Dependencies: rustpython-parser, serde, thiserror
// ============================================================================

//! ## Overview
//! [`extract_symbols`] parses one entry file with the Python grammar and walks
//! the statement tree once, collecting:
//! - every function, async function, and class name at any nesting depth,
//! - every plain assignment target that is a single bare name,
//! - the module of every `import` and `from module import ...` statement.
//!
//! Expressions cannot contain statements, so descending through statement
//! bodies reaches every definition, assignment, and import exactly once.
//! Member names of `from` imports are not tracked, and imports never satisfy a
//! contract requirement.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use rustpython_parser::Parse;
use rustpython_parser::ast;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Parse failure for a handler entry file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Original parser error text.
    message: String,
}

impl ParseError {
    /// Wraps a parser error message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the original parser error text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Names found in one handler's source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolInventory {
    /// Function and class names defined anywhere in the module.
    pub defined: BTreeSet<String>,
    /// Bare names bound by plain assignment statements.
    pub assigned: BTreeSet<String>,
    /// Modules referenced by import statements.
    pub modules: BTreeSet<String>,
}

impl SymbolInventory {
    /// Returns true when `symbol` is defined or assigned in the module.
    #[must_use]
    pub fn provides(&self, symbol: &str) -> bool {
        self.defined.contains(symbol) || self.assigned.contains(symbol)
    }
}

// ============================================================================
// SECTION: Extraction
// ============================================================================

/// Parses `source` and returns its symbol inventory.
///
/// `source_path` is only used to label parser diagnostics.
///
/// # Errors
///
/// Returns [`ParseError`] carrying the parser's message when the source is not
/// valid Python.
pub fn extract_symbols(source: &str, source_path: &str) -> Result<SymbolInventory, ParseError> {
    let suite = ast::Suite::parse(source, source_path)
        .map_err(|err| ParseError::new(err.to_string()))?;
    let mut collector = SymbolCollector::default();
    collector.visit_body(&suite);
    Ok(collector.inventory)
}

/// Single-pass statement walker accumulating an inventory.
#[derive(Default)]
struct SymbolCollector {
    /// Inventory under construction.
    inventory: SymbolInventory,
}

impl SymbolCollector {
    /// Visits each statement of a block in source order.
    fn visit_body(&mut self, body: &[ast::Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }

    /// Records the names a statement contributes, then descends into its blocks.
    fn visit_stmt(&mut self, stmt: &ast::Stmt) {
        match stmt {
            ast::Stmt::FunctionDef(def) => {
                self.inventory.defined.insert(def.name.to_string());
                self.visit_body(&def.body);
            }
            ast::Stmt::AsyncFunctionDef(def) => {
                self.inventory.defined.insert(def.name.to_string());
                self.visit_body(&def.body);
            }
            ast::Stmt::ClassDef(def) => {
                self.inventory.defined.insert(def.name.to_string());
                self.visit_body(&def.body);
            }
            ast::Stmt::Assign(assign) => {
                for target in &assign.targets {
                    if let ast::Expr::Name(name) = target {
                        self.inventory.assigned.insert(name.id.to_string());
                    }
                }
            }
            ast::Stmt::Import(import) => {
                for alias in &import.names {
                    self.inventory.modules.insert(alias.name.to_string());
                }
            }
            ast::Stmt::ImportFrom(import) => {
                if let Some(module) = &import.module {
                    self.inventory.modules.insert(module.to_string());
                }
            }
            ast::Stmt::For(block) => {
                self.visit_body(&block.body);
                self.visit_body(&block.orelse);
            }
            ast::Stmt::AsyncFor(block) => {
                self.visit_body(&block.body);
                self.visit_body(&block.orelse);
            }
            ast::Stmt::While(block) => {
                self.visit_body(&block.body);
                self.visit_body(&block.orelse);
            }
            ast::Stmt::If(block) => {
                self.visit_body(&block.body);
                self.visit_body(&block.orelse);
            }
            ast::Stmt::With(block) => self.visit_body(&block.body),
            ast::Stmt::AsyncWith(block) => self.visit_body(&block.body),
            ast::Stmt::Match(block) => {
                for case in &block.cases {
                    self.visit_body(&case.body);
                }
            }
            ast::Stmt::Try(block) => {
                self.visit_body(&block.body);
                self.visit_handlers(&block.handlers);
                self.visit_body(&block.orelse);
                self.visit_body(&block.finalbody);
            }
            ast::Stmt::TryStar(block) => {
                self.visit_body(&block.body);
                self.visit_handlers(&block.handlers);
                self.visit_body(&block.orelse);
                self.visit_body(&block.finalbody);
            }
            _ => {}
        }
    }

    /// Visits the bodies of `except` clauses.
    fn visit_handlers(&mut self, handlers: &[ast::ExceptHandler]) {
        for handler in handlers {
            let ast::ExceptHandler::ExceptHandler(clause) = handler;
            self.visit_body(&clause.body);
        }
    }
}
