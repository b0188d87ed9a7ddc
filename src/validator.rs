//! Instance validation against a JSON Schema.

use std::path::Path;

use serde_json::Value;

use crate::error::{ValidateError, Violation};
use crate::loader::{bundle_refs, load_json};

/// Validate an instance against an already-loaded schema.
///
/// Compiling the schema also checks it against its meta-schema, so a
/// malformed schema is reported before the instance is looked at.
///
/// # Errors
///
/// Returns `ValidateError::SchemaInvalid` if the schema doesn't compile, or
/// `ValidateError::Invalid` with every violation if the instance doesn't match.
pub fn validate_instance(schema: &Value, instance: &Value) -> Result<(), ValidateError> {
    let validator =
        jsonschema::validator_for(schema).map_err(|e| ValidateError::SchemaInvalid {
            message: e.to_string(),
        })?;

    let violations: Vec<Violation> = validator
        .iter_errors(instance)
        .map(|e| Violation {
            message: e.to_string(),
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid { violations })
    }
}

/// Load an instance and a schema from disk and validate one against the other.
///
/// The instance is loaded first, then the schema, whose external file refs
/// are inlined relative to the schema's directory.
pub fn validate_files(instance_path: &Path, schema_path: &Path) -> Result<(), ValidateError> {
    let instance = load_json(instance_path)?;
    let schema = load_schema(schema_path)?;
    validate_instance(&schema, &instance)
}

/// Load a schema file and bundle its external file refs.
pub fn load_schema(path: &Path) -> Result<Value, ValidateError> {
    let mut schema = load_json(path)?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    bundle_refs(&mut schema, base_dir)?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "port": { "type": "integer", "minimum": 1 }
            },
            "required": ["name"]
        })
    }

    #[test]
    fn validate_valid_instance() {
        let instance = json!({ "name": "flight-data", "port": 443 });
        assert!(validate_instance(&service_schema(), &instance).is_ok());
    }

    #[test]
    fn validate_missing_required_field() {
        let instance = json!({ "port": 443 });
        match validate_instance(&service_schema(), &instance) {
            Err(ValidateError::Invalid { violations }) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].instance_path, "");
                assert_eq!(violations[0].schema_path, "/required");
                assert!(violations[0].message.contains("name"));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn validate_reports_paths() {
        let instance = json!({ "name": "flight-data", "port": "https" });
        match validate_instance(&service_schema(), &instance) {
            Err(ValidateError::Invalid { violations }) => {
                assert_eq!(violations[0].instance_path, "/port");
                assert_eq!(violations[0].schema_path, "/properties/port/type");
                assert_eq!(violations[0].instance_trail(), "port");
                assert_eq!(violations[0].schema_trail(), "properties -> port -> type");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn validate_collects_multiple_errors() {
        let instance = json!({ "port": 0 });
        match validate_instance(&service_schema(), &instance) {
            Err(ValidateError::Invalid { violations }) => assert_eq!(violations.len(), 2),
            other => panic!("expected 2 violations, got {:?}", other),
        }
    }

    #[test]
    fn validate_malformed_schema() {
        let schema = json!({ "type": "not-a-type" });
        let result = validate_instance(&schema, &json!({}));
        assert!(matches!(result, Err(ValidateError::SchemaInvalid { .. })));
    }

    #[test]
    fn validate_root_internal_ref() {
        let schema = json!({
            "definitions": { "name": { "type": "string" } },
            "properties": { "name": { "$ref": "#/definitions/name" } }
        });
        assert!(validate_instance(&schema, &json!({ "name": "x" })).is_ok());
        assert!(validate_instance(&schema, &json!({ "name": 1 })).is_err());
    }
}
