//! Auth configuration must carry the block its type selects.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::{Finding, Rule};
use crate::document::Document;

/// Recognized `global_auth.type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    Bearer,
    Basic,
    ApiKey,
}

impl AuthType {
    /// Parse a `type` discriminator. Unrecognized values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bearer" => Some(Self::Bearer),
            "basic" => Some(Self::Basic),
            "api_key" => Some(Self::ApiKey),
            _ => None,
        }
    }

    /// Key of the nested configuration block this type requires.
    pub fn block_key(&self) -> &'static str {
        match self {
            Self::Bearer => "bearer",
            Self::Basic => "basic",
            Self::ApiKey => "api_key",
        }
    }

    /// Human-readable name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bearer => "Bearer",
            Self::Basic => "Basic",
            Self::ApiKey => "API key",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.block_key())
    }
}

pub struct AuthCompletenessRule;

impl Rule for AuthCompletenessRule {
    fn id(&self) -> &'static str {
        "auth_completeness"
    }

    fn check(&self, doc: &Document) -> Vec<Finding> {
        let Some(auth) = doc.global_auth() else {
            return vec![];
        };

        // Missing or unrecognized types are not flagged here.
        let Some(auth_type) = auth.get("type").and_then(Value::as_str).and_then(AuthType::parse)
        else {
            return vec![];
        };

        if auth.get(auth_type.block_key()).is_some() {
            return vec![];
        }

        vec![Finding::IncompleteAuth { auth_type }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: serde_json::Value) -> Vec<String> {
        AuthCompletenessRule
            .check(&Document::new(value))
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_auth_absent_is_fine() {
        assert!(check(json!({"tests": []})).is_empty());
    }

    #[test]
    fn test_auth_valid_bearer() {
        assert!(check(json!({"global_auth": {"type": "bearer", "bearer": {"token": "abc"}}})).is_empty());
    }

    #[test]
    fn test_auth_bearer_missing() {
        assert_eq!(
            check(json!({"global_auth": {"type": "bearer"}})),
            vec!["Bearer auth missing 'bearer' configuration"]
        );
    }

    #[test]
    fn test_auth_basic_missing() {
        assert_eq!(
            check(json!({"global_auth": {"type": "basic", "bearer": {}}})),
            vec!["Basic auth missing 'basic' configuration"]
        );
    }

    #[test]
    fn test_auth_api_key_missing() {
        assert_eq!(
            check(json!({"global_auth": {"type": "api_key"}})),
            vec!["API key auth missing 'api_key' configuration"]
        );
    }

    #[test]
    fn test_auth_unknown_or_missing_type_not_flagged() {
        assert!(check(json!({"global_auth": {"type": "oauth2"}})).is_empty());
        assert!(check(json!({"global_auth": {}})).is_empty());
    }

    #[test]
    fn test_auth_type_parse() {
        assert_eq!(AuthType::parse("api_key"), Some(AuthType::ApiKey));
        assert_eq!(AuthType::parse("Bearer"), None);
        assert_eq!(AuthType::Basic.to_string(), "basic");
    }
}
