// crates/handler-gate-harness/src/synthetic.rs
// ============================================================================
// Module: Synthetic Inputs
// Description: Default event and runtime context handed to entry routines.
// Purpose: Build realistic, deterministic invocation inputs.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The synthetic event mimics an HTTP-style request whose `body` is the JSON
//! text of an inference payload. The synthetic context carries the function
//! identity fields a handler may read; the worker exposes it as a read-only
//! object with a `get_remaining_time_in_millis()` method.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Event
// ============================================================================

/// Default inference payload carried in the event body.
#[must_use]
pub fn default_event_payload() -> Value {
    json!({
        "image": "base64_encoded_image_here",
        "parameters": {
            "threshold": 0.5,
            "max_detections": 10
        }
    })
}

/// Builds the synthetic event around `payload`.
///
/// The payload is serialized to JSON text and placed in `body`, matching how
/// an HTTP front end delivers request bodies.
#[must_use]
pub fn build_event(payload: &Value) -> Value {
    json!({
        "httpMethod": "POST",
        "headers": {
            "Content-Type": "application/json"
        },
        "isBase64Encoded": false,
        "body": payload.to_string()
    })
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Fields of the read-only runtime context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntheticContext {
    /// Function name.
    pub function_name: String,
    /// Memory limit in megabytes.
    pub memory_limit_in_mb: u32,
    /// Fully qualified function identifier.
    pub invoked_function_arn: String,
    /// Request identifier.
    pub aws_request_id: String,
    /// Budget reported by `get_remaining_time_in_millis()`.
    pub timeout_ms: u64,
}

impl Default for SyntheticContext {
    fn default() -> Self {
        Self {
            function_name: "test-function".to_string(),
            memory_limit_in_mb: 128,
            invoked_function_arn: "arn:aws:lambda:us-east-1:123456789012:function:test-function"
                .to_string(),
            aws_request_id: "test-request-id".to_string(),
            timeout_ms: 30_000,
        }
    }
}
