//! SWIM Service Description Validator
//!
//! Validates SWIM service description JSON documents against the DESCRIPTION-V2
//! JSON schema, or any other schema the `jsonschema` crate understands.
//!
//! # Example
//!
//! ```
//! use swim_validate::{validate_instance, ValidateError};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } },
//!     "required": ["name"]
//! });
//!
//! assert!(validate_instance(&schema, &json!({ "name": "flight-info" })).is_ok());
//!
//! match validate_instance(&schema, &json!({ "name": 7 })) {
//!     Err(ValidateError::Invalid { violations }) => {
//!         assert_eq!(violations[0].instance_path, "/name");
//!         assert_eq!(violations[0].schema_path, "/properties/name/type");
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! # Schema location
//!
//! Without an explicit path the schema is read from
//! `service-metadata-schema/description/DESCRIPTION-V2.json`, the checkout of
//! the schema submodule.

mod error;
mod loader;
mod locate;
mod report;
mod validator;

pub use error::{pointer_trail, ValidateError, Violation};
pub use loader::{bundle_refs, load_json, load_json_str, navigate_fragment};
pub use locate::{
    locate_schema, SchemaLocation, SchemaOrigin, DEFAULT_SCHEMA_PATH, SUBMODULE_INIT_COMMAND,
};
pub use report::{json_report, render_error, render_violations, FAILURE_MESSAGE, SUCCESS_MESSAGE};
pub use validator::{load_schema, validate_files, validate_instance};
