//! Schema location: explicit `--schema` path or the schema submodule default.

use std::path::{Path, PathBuf};

use crate::error::ValidateError;

/// Location of the DESCRIPTION-V2 schema inside the schema submodule.
pub const DEFAULT_SCHEMA_PATH: &str = "service-metadata-schema/description/DESCRIPTION-V2.json";

/// Command that populates the schema submodule.
pub const SUBMODULE_INIT_COMMAND: &str = "git submodule update --init --recursive";

/// Where the schema path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOrigin {
    /// Given on the command line.
    Explicit,
    /// Found at [`DEFAULT_SCHEMA_PATH`].
    Submodule,
}

/// A schema path that is known to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLocation {
    pub path: PathBuf,
    pub origin: SchemaOrigin,
}

/// Pick the schema file to validate against.
///
/// An explicit path wins. Otherwise the default submodule path is joined to
/// `base_dir`.
///
/// # Errors
///
/// Returns `ValidateError::SchemaNotFound` if the explicit path doesn't exist,
/// or `ValidateError::DefaultSchemaMissing` if no explicit path was given and
/// the submodule schema is absent.
pub fn locate_schema(
    explicit: Option<&Path>,
    base_dir: &Path,
) -> Result<SchemaLocation, ValidateError> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ValidateError::SchemaNotFound {
                    path: path.to_path_buf(),
                });
            }
            Ok(SchemaLocation {
                path: path.to_path_buf(),
                origin: SchemaOrigin::Explicit,
            })
        }
        None => {
            let path = base_dir.join(DEFAULT_SCHEMA_PATH);
            if !path.exists() {
                return Err(ValidateError::DefaultSchemaMissing { expected: path });
            }
            Ok(SchemaLocation {
                path,
                origin: SchemaOrigin::Submodule,
            })
        }
    }
}
