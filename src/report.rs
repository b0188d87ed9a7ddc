//! Human-readable and JSON rendering of validation outcomes.

use serde_json::json;

use crate::error::{ValidateError, Violation};

/// Success line.
pub const SUCCESS_MESSAGE: &str = "✓ Validation successful! The document is valid.";

/// Header printed before the list of violations.
pub const FAILURE_MESSAGE: &str = "✗ Validation failed!";

/// Render violations in the text format, one block per violation.
///
/// Each block is `Error: <message>`, then `Path:` and `Schema path:` lines
/// when those paths are non-empty.
pub fn render_violations(violations: &[Violation]) -> String {
    let mut out = String::from(FAILURE_MESSAGE);
    for v in violations {
        out.push_str("\nError: ");
        out.push_str(&v.message);
        let trail = v.instance_trail();
        if !trail.is_empty() {
            out.push_str("\nPath: ");
            out.push_str(&trail);
        }
        let trail = v.schema_trail();
        if !trail.is_empty() {
            out.push_str("\nSchema path: ");
            out.push_str(&trail);
        }
    }
    out
}

/// Render a non-violation error in the text format.
pub fn render_error(err: &ValidateError) -> String {
    match err {
        ValidateError::Invalid { violations } => render_violations(violations),
        e if e.is_schema_error() => format!("✗ Schema error: {}", e),
        e => format!("Error: {}", e),
    }
}

/// JSON report for automation: `{"valid":true}` on success.
pub fn json_report(result: &Result<(), ValidateError>) -> serde_json::Value {
    match result {
        Ok(()) => json!({ "valid": true }),
        Err(ValidateError::Invalid { violations }) => json!({
            "valid": false,
            "errors": violations,
        }),
        Err(e) => json!({
            "valid": false,
            "error": e.to_string(),
        }),
    }
}
