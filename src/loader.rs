//! JSON loading for instance and schema files.
//!
//! Also bundles external file `$ref`s into the root schema so that a schema
//! split across the schema submodule validates without fetching anything.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::ValidateError;

/// Load and parse a JSON file.
///
/// # Errors
///
/// Returns `ValidateError::FileNotFound` if the file doesn't exist,
/// `ValidateError::ReadError` if it can't be read,
/// or `ValidateError::InvalidJson` if the file isn't valid JSON.
pub fn load_json(path: &Path) -> Result<Value, ValidateError> {
    if !path.exists() {
        return Err(ValidateError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ValidateError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_json_str(&content, &path.display().to_string())
}

/// Parse JSON from a string. `origin` names the source in error messages.
///
/// # Errors
///
/// Returns `ValidateError::InvalidJson` if the string isn't valid JSON.
pub fn load_json_str(content: &str, origin: &str) -> Result<Value, ValidateError> {
    serde_json::from_str(content).map_err(|source| ValidateError::InvalidJson {
        origin: origin.to_string(),
        source,
    })
}

/// Check if a `$ref` targets something other than a local file.
fn is_remote_ref(r: &str) -> bool {
    r.contains("://") || r.starts_with("urn:")
}

/// Navigate a JSON Pointer fragment (e.g., "#/definitions/service").
///
/// The leading '#' is optional.
pub fn navigate_fragment(schema: &Value, fragment: &str) -> Result<Value, ValidateError> {
    let path = fragment.trim_start_matches('#').trim_start_matches('/');
    if path.is_empty() {
        return Ok(schema.clone());
    }

    let mut current = schema;
    for part in path.split('/') {
        // ~1 = /, ~0 = ~
        let key = part.replace("~1", "/").replace("~0", "~");
        let next = match current {
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => current.get(&key),
        };
        current = next.ok_or_else(|| ValidateError::BundleError {
            message: format!("fragment not found: {}", fragment),
        })?;
    }
    Ok(current.clone())
}

/// Pull external file `$ref` targets into the root schema.
///
/// Each referenced file or `file#/fragment` is copied once into the root's
/// definitions container (`definitions` for draft-07 and older, `$defs`
/// otherwise), and every `$ref` to it is rewritten to point there. Refs keep
/// their sibling keywords, so the validator applies its own draft's rules.
///
/// Relative file refs are resolved against `base_dir` (the schema's directory).
/// Internal refs (`#/...`) in the root schema and URL refs are left for the
/// validator. Internal refs inside a loaded file, including `#`, are resolved
/// against that file.
///
/// # Errors
///
/// Returns `ValidateError::BundleError` on refs that only alias each other in a
/// cycle or on missing fragments, and the usual load errors for referenced files.
pub fn bundle_refs(schema: &mut Value, base_dir: &Path) -> Result<(), ValidateError> {
    let keyword = defs_keyword(schema);
    let mut bundler = Bundler::new(keyword, schema.get(keyword));
    bundler.walk(schema, base_dir, None)?;

    if bundler.defs.is_empty() {
        return Ok(());
    }
    bundler.check_alias_cycles()?;

    let Value::Object(root) = schema else {
        return Err(ValidateError::BundleError {
            message: "root schema must be an object to hold bundled definitions".into(),
        });
    };
    let container = root
        .entry(keyword)
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(container) = container else {
        return Err(ValidateError::BundleError {
            message: format!("{} must be an object", keyword),
        });
    };
    container.extend(bundler.defs);
    Ok(())
}

/// Definitions keyword for the root schema's dialect.
fn defs_keyword(root: &Value) -> &'static str {
    let legacy = root
        .get("$schema")
        .and_then(Value::as_str)
        .map_or(false, |s| {
            ["draft-03", "draft-04", "draft-06", "draft-07"]
                .iter()
                .any(|d| s.contains(d))
        });
    if legacy {
        "definitions"
    } else {
        "$defs"
    }
}

/// A loaded file whose internal refs resolve against its own root.
struct Source {
    key: String,
    root: Value,
    dir: PathBuf,
}

struct Bundler {
    /// `#/$defs/` or `#/definitions/`
    prefix: String,
    defs: Map<String, Value>,
    /// "canonical path#fragment" -> definition name
    interned: HashMap<String, String>,
    taken: HashSet<String>,
}

impl Bundler {
    fn new(keyword: &str, existing: Option<&Value>) -> Self {
        let taken = existing
            .and_then(Value::as_object)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        Self {
            prefix: format!("#/{}/", keyword),
            defs: Map::new(),
            interned: HashMap::new(),
            taken,
        }
    }

    fn walk(
        &mut self,
        node: &mut Value,
        base_dir: &Path,
        source: Option<&Source>,
    ) -> Result<(), ValidateError> {
        match node {
            Value::Object(obj) => {
                let ref_val = obj.get("$ref").and_then(Value::as_str).map(str::to_owned);
                if let Some(ref_val) = ref_val {
                    if let Some(name) = self.rewrite(&ref_val, base_dir, source)? {
                        obj.insert(
                            "$ref".to_string(),
                            Value::String(format!("{}{}", self.prefix, name)),
                        );
                    }
                }
                for (key, value) in obj.iter_mut() {
                    if key != "$ref" {
                        self.walk(value, base_dir, source)?;
                    }
                }
            }
            Value::Array(arr) => {
                for item in arr {
                    self.walk(item, base_dir, source)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Definition name a `$ref` should point at, or `None` to leave it as written.
    fn rewrite(
        &mut self,
        ref_val: &str,
        base_dir: &Path,
        source: Option<&Source>,
    ) -> Result<Option<String>, ValidateError> {
        if let Some(fragment) = ref_val.strip_prefix('#') {
            // root schema refs stay for the validator
            let Some(source) = source else {
                return Ok(None);
            };
            let fragment = fragment.trim_start_matches('/');
            let visit_key = format!("{}#{}", source.key, fragment);
            if let Some(name) = self.interned.get(&visit_key) {
                return Ok(Some(name.clone()));
            }
            return self.hoist(visit_key, source, fragment).map(Some);
        }

        if is_remote_ref(ref_val) {
            return Ok(None);
        }

        let (file_part, fragment) = ref_val.split_once('#').unwrap_or((ref_val, ""));
        let fragment = fragment.trim_start_matches('/');
        let path = base_dir.join(file_part);
        let canonical = path.canonicalize().unwrap_or_else(|_| path.clone());
        let visit_key = format!("{}#{}", canonical.display(), fragment);
        if let Some(name) = self.interned.get(&visit_key) {
            return Ok(Some(name.clone()));
        }

        let source = Source {
            key: canonical.display().to_string(),
            root: load_json(&path)?,
            dir: path.parent().unwrap_or(base_dir).to_path_buf(),
        };
        self.hoist(visit_key, &source, fragment).map(Some)
    }

    /// Copy a target into the definitions, naming it before walking it so
    /// recursive refs find the name.
    fn hoist(
        &mut self,
        visit_key: String,
        source: &Source,
        fragment: &str,
    ) -> Result<String, ValidateError> {
        let name = self.unique_name(&source.key, fragment);
        self.interned.insert(visit_key, name.clone());

        let mut target = navigate_fragment(&source.root, fragment)?;
        if let Value::Object(obj) = &mut target {
            // a nested resource id would rebase the rewritten refs
            obj.remove("$id");
            obj.remove("$schema");
        }
        self.walk(&mut target, &source.dir, Some(source))?;
        self.defs.insert(name.clone(), target);
        Ok(name)
    }

    fn unique_name(&mut self, path_key: &str, fragment: &str) -> String {
        let file = Path::new(path_key)
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let raw = format!("{}/{}", file, fragment);
        let sanitized: String = raw
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let mut base = sanitized.trim_matches('_').to_string();
        if base.is_empty() {
            base = "bundled".to_string();
        }

        let mut name = base.clone();
        let mut n = 2;
        while !self.taken.insert(name.clone()) {
            name = format!("{}_{}", base, n);
            n += 1;
        }
        name
    }

    /// Reject definitions that are nothing but a `$ref` chain back to themselves.
    fn check_alias_cycles(&self) -> Result<(), ValidateError> {
        for start in self.defs.keys() {
            let mut seen = HashSet::new();
            let mut current = start.as_str();
            loop {
                if !seen.insert(current) {
                    return Err(ValidateError::BundleError {
                        message: format!(
                            "circular reference detected: {}{}",
                            self.prefix, current
                        ),
                    });
                }
                match self.alias_target(current) {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }
        Ok(())
    }

    fn alias_target(&self, name: &str) -> Option<&str> {
        let obj = self.defs.get(name)?.as_object()?;
        if obj.len() != 1 {
            return None;
        }
        obj.get("$ref")?.as_str()?.strip_prefix(self.prefix.as_str())
    }
}
