// crates/handler-gate-harness/src/shape.rs
// ============================================================================
// Module: Response Shape Validation
// Description: Checks entry routine responses against the expected fields.
// Purpose: Decide whether a response looks like an HTTP-style reply.
// Dependencies: jsonschema, serde_json
// ============================================================================

//! ## Overview
//! A response is well shaped when the worker reports it as a mapping and its
//! JSON projection satisfies a Draft 2020-12 schema requiring every
//! configured field. The schema is compiled once per harness. The worker
//! keeps configured fields when it summarizes an oversized response, so a
//! summary is judged like the full value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;

use crate::error::HarnessError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Default fields a response must carry.
pub const DEFAULT_RESPONSE_FIELDS: &[&str] = &["statusCode", "body"];

/// Outcome of a shape check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeVerdict {
    /// True when the response is well shaped.
    pub valid: bool,
    /// First reason the response was rejected.
    pub reason: Option<String>,
}

/// Compiled response-shape validator.
pub struct ResponseShapeValidator {
    /// Compiled schema.
    validator: Validator,
}

impl ResponseShapeValidator {
    /// Compiles a validator requiring `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] when the schema cannot be compiled.
    pub fn new(fields: &[String]) -> Result<Self, HarnessError> {
        let schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": fields,
        });
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&schema)
            .map_err(|err| HarnessError::Config(format!("response schema: {err}")))?;
        Ok(Self {
            validator,
        })
    }

    /// Checks a response reported by the worker.
    #[must_use]
    pub fn check(&self, is_mapping: bool, projection: &Value) -> ShapeVerdict {
        if !is_mapping {
            return ShapeVerdict {
                valid: false,
                reason: Some("response is not a mapping".to_string()),
            };
        }
        if self.validator.is_valid(projection) {
            return ShapeVerdict {
                valid: true,
                reason: None,
            };
        }
        let reason = self
            .validator
            .iter_errors(projection)
            .next()
            .map_or_else(|| "response schema validation failed".to_string(), |err| err.to_string());
        ShapeVerdict {
            valid: false,
            reason: Some(reason),
        }
    }
}
