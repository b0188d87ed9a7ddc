//! Error types for loading and validating service descriptions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by any step of a validation run.
#[derive(Debug, Error)]
pub enum ValidateError {
    // IO errors
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Error reading {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors
    #[error("Invalid JSON in {origin}: {source}")]
    InvalidJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    // Schema location
    #[error("Schema file not found: {}", path.display())]
    SchemaNotFound { path: PathBuf },

    #[error(
        "Schema file not found!\nPlease ensure the submodule is initialized:\n  git submodule update --init --recursive\nExpected schema location: {}\nOr specify a schema path with --schema option",
        expected.display()
    )]
    DefaultSchemaMissing { expected: PathBuf },

    // Schema errors
    #[error("failed to bundle schema: {message}")]
    BundleError { message: String },

    #[error("{message}")]
    SchemaInvalid { message: String },

    // Instance errors
    #[error("validation failed with {} error(s)", violations.len())]
    Invalid { violations: Vec<Violation> },
}

impl ValidateError {
    /// Returns the exit code for this error type.
    ///
    /// Every failure, from a missing file to a schema violation, exits with 1.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// True when the schema itself, not the instance, is at fault.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            ValidateError::SchemaInvalid { .. } | ValidateError::BundleError { .. }
        )
    }
}

/// Single schema violation with instance and schema context.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    /// Human-readable error message.
    pub message: String,
    /// JSON Pointer (RFC 6901) to the invalid value in the instance.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected the value.
    pub schema_path: String,
}

impl Violation {
    /// Instance path as segments joined with ` -> `, empty at the document root.
    pub fn instance_trail(&self) -> String {
        pointer_trail(&self.instance_path)
    }

    /// Schema path as segments joined with ` -> `.
    pub fn schema_trail(&self) -> String {
        pointer_trail(&self.schema_path)
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Split a JSON Pointer into unescaped segments and join them with ` -> `.
pub fn pointer_trail(pointer: &str) -> String {
    if pointer.is_empty() {
        return String::new();
    }
    pointer
        .trim_start_matches('/')
        .split('/')
        .map(|part| part.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(" -> ")
}
