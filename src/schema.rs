//! JSON-schema validation of configuration documents.
//!
//! Only the first violation is reported, with its instance path rendered as
//! a dotted path (`tests.0.order`).

use anyhow::Result;
use serde_json::Value;
use std::path::Path;

use crate::document::load_json_file;
use crate::rules::Finding;

/// A compiled JSON schema, reusable across documents.
pub struct Schema {
    validator: jsonschema::Validator,
}

impl Schema {
    /// Compile a schema document.
    pub fn compile(schema: &Value) -> Result<Self> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| anyhow::anyhow!("Failed to compile JSON schema: {}", e))?;
        Ok(Self { validator })
    }

    /// Load and compile a JSON schema from a file path.
    pub fn load(schema_path: &Path) -> Result<Self> {
        let schema = load_json_file(schema_path)?;
        Self::compile(&schema)
    }

    /// Validate `instance`, returning the first violation if there is one.
    pub fn first_error(&self, instance: &Value) -> Option<Finding> {
        let error = self.validator.iter_errors(instance).next()?;
        let pointer = error.instance_path.to_string();
        let path = dotted_path(&pointer);

        Some(Finding::Schema {
            path: (!path.is_empty()).then_some(path),
            message: error.to_string(),
        })
    }

    /// Validity flag plus at most one schema finding.
    pub fn validate(&self, instance: &Value) -> (bool, Vec<Finding>) {
        match self.first_error(instance) {
            Some(finding) => (false, vec![finding]),
            None => (true, vec![]),
        }
    }
}

/// Convert a JSON pointer (`/tests/0/order`) into a dotted path (`tests.0.order`).
pub fn dotted_path(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn sample_schema() -> Schema {
        Schema::compile(&json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "order": {"type": "number"}
            },
            "required": ["name", "order"]
        }))
        .unwrap()
    }

    #[test]
    fn test_validate_valid() {
        let (is_valid, errors) = sample_schema().validate(&json!({"name": "test1", "order": 1}));
        assert!(is_valid);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_missing_required() {
        let (is_valid, errors) = sample_schema().validate(&json!({"name": "test2"}));
        assert!(!is_valid);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("order"));
        assert!(matches!(errors[0], Finding::Schema { path: None, .. }));
    }

    #[test]
    fn test_validate_reports_dotted_path() {
        let schema = Schema::compile(&json!({
            "type": "object",
            "properties": {
                "tests": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"order": {"type": "number"}}
                    }
                }
            }
        }))
        .unwrap();

        let (is_valid, errors) = schema.validate(&json!({"tests": [{"order": 1}, {"order": "x"}]}));
        assert!(!is_valid);
        assert_eq!(errors.len(), 1);
        assert!(
            errors[0].to_string().starts_with("At 'tests.1.order': "),
            "unexpected message: {}",
            errors[0]
        );
    }

    #[test]
    fn test_validate_reports_only_first_error() {
        let (_, errors) = sample_schema().validate(&json!({"name": 1, "order": "x"}));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_compile_invalid_schema() {
        let result = Schema::compile(&json!({"type": "not-a-type"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_schema_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("schema.json");
        fs::write(&path, r#"{"type": "object", "required": ["tests"]}"#).unwrap();

        let schema = Schema::load(&path).unwrap();
        let (is_valid, _) = schema.validate(&json!({}));
        assert!(!is_valid);
    }

    #[test]
    fn test_dotted_path() {
        assert_eq!(dotted_path(""), "");
        assert_eq!(dotted_path("/tests/0/order"), "tests.0.order");
        assert_eq!(dotted_path("/a~1b/c~0d"), "a/b.c~d");
    }
}
