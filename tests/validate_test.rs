//! Integration tests for loading and validating service descriptions.

use std::path::{Path, PathBuf};

use serde_json::json;
use swim_validate::{
    load_schema, locate_schema, validate_files, validate_instance, SchemaOrigin, ValidateError,
};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn description_schema() -> PathBuf {
    fixtures().join("service-metadata-schema/description/DESCRIPTION-V2.json")
}

mod files {
    use super::*;

    #[test]
    fn valid_fixture() {
        let doc = fixtures().join("documents/flight-info.json");
        assert!(validate_files(&doc, &description_schema()).is_ok());
    }

    #[test]
    fn invalid_fixture_reports_nested_path() {
        let doc = fixtures().join("documents/bad-port.json");
        match validate_files(&doc, &description_schema()) {
            Err(ValidateError::Invalid { violations }) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].instance_path, "/endpoints/0/port");
                let schema_path = &violations[0].schema_path;
                assert!(schema_path.starts_with("/properties/endpoints/items"));
                assert!(schema_path.ends_with("/properties/port/type"));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn missing_document_checked_before_schema() {
        let doc = fixtures().join("documents/absent.json");
        let result = validate_files(&doc, Path::new("/nonexistent/schema.json"));
        match result {
            Err(ValidateError::FileNotFound { path }) => assert_eq!(path, doc),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }
}

mod schema_loading {
    use super::*;

    #[test]
    fn external_refs_are_bundled_into_definitions() {
        let schema = load_schema(&description_schema()).unwrap();
        // draft-07 root, so bundled targets land under "definitions"
        assert_eq!(
            schema["properties"]["provider"]["$ref"],
            "#/definitions/common_json_definitions_organisation"
        );
        let defs = &schema["definitions"];
        assert_eq!(
            defs["common_json_definitions_organisation"]["required"],
            json!(["name"])
        );
        assert_eq!(
            defs["common_json_definitions_endpoint"]["properties"]["protocol"]["$ref"],
            "#/definitions/common_json_definitions_protocol"
        );
        assert_eq!(
            defs["common_json_definitions_protocol"]["enum"],
            json!(["AMQP", "HTTPS", "WS"])
        );
        assert!(schema.get("$defs").is_none());
    }

    #[test]
    fn located_default_schema_loads() {
        let location = locate_schema(None, &fixtures()).unwrap();
        assert_eq!(location.origin, SchemaOrigin::Submodule);
        assert!(load_schema(&location.path).is_ok());
    }
}

mod in_memory {
    use super::*;

    #[test]
    fn scalar_instance_against_scalar_schema() {
        let schema = json!({ "type": "number", "maximum": 10 });
        assert!(validate_instance(&schema, &json!(3)).is_ok());
        assert!(validate_instance(&schema, &json!(11)).is_err());
    }

    #[test]
    fn array_instance_paths() {
        let schema = json!({ "type": "array", "items": { "type": "string" } });
        match validate_instance(&schema, &json!(["a", 2])) {
            Err(ValidateError::Invalid { violations }) => {
                assert_eq!(violations[0].instance_path, "/1");
                assert_eq!(violations[0].schema_path, "/items/type");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn boolean_false_schema_rejects_everything() {
        let schema = json!(false);
        assert!(matches!(
            validate_instance(&schema, &json!({})),
            Err(ValidateError::Invalid { .. })
        ));
    }
}
