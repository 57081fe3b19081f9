//! Business rules checked on top of schema validation.
//!
//! Each rule is an independent [`Rule`] producing zero or more [`Finding`]s.
//! [`default_rules`] lists them in the order the validator runs them; findings
//! are concatenated in that order and never short-circuit one another.

pub mod auth;
pub mod cycles;
pub mod dependencies;
pub mod orders;

use serde::Serialize;
use serde_json::Number;
use std::fmt;

use crate::document::Document;

pub use auth::{AuthCompletenessRule, AuthType};
pub use cycles::CircularDependencyRule;
pub use dependencies::DependencyExistenceRule;
pub use orders::UniqueOrderRule;

/// Where a finding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Reported by JSON-schema validation
    Schema,
    /// Reported by one of the business rules
    BusinessRule,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "Schema"),
            Self::BusinessRule => write!(f, "Business Logic"),
        }
    }
}

/// A single validation finding.
///
/// `Display` renders the message shown in reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Finding {
    /// First schema violation; `path` is the dotted instance path, if any
    Schema {
        path: Option<String>,
        message: String,
    },
    /// Order values used by more than one test, ascending
    DuplicateOrders { orders: Vec<Number> },
    /// A `depends_on` entry naming no declared test
    MissingDependency { test: String, dependency: String },
    /// A `use_response_from.test_name` naming no declared test
    MissingResponseSource { test: String, referenced: String },
    /// `global_auth.type` selects a block that is absent
    IncompleteAuth { auth_type: AuthType },
    /// A dependency loop; first and last entries are the same test
    CircularDependency { cycle: Vec<String> },
}

impl Finding {
    pub fn kind(&self) -> FindingKind {
        match self {
            Self::Schema { .. } => FindingKind::Schema,
            _ => FindingKind::BusinessRule,
        }
    }

    /// Identifier of the check that produced this finding.
    pub fn rule_id(&self) -> &'static str {
        match self {
            Self::Schema { .. } => "schema",
            Self::DuplicateOrders { .. } => UniqueOrderRule.id(),
            Self::MissingDependency { .. } | Self::MissingResponseSource { .. } => {
                DependencyExistenceRule.id()
            }
            Self::IncompleteAuth { .. } => AuthCompletenessRule.id(),
            Self::CircularDependency { .. } => CircularDependencyRule.id(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema {
                path: Some(path),
                message,
            } => write!(f, "At '{}': {}", path, message),
            Self::Schema {
                path: None,
                message,
            } => write!(f, "{}", message),
            Self::DuplicateOrders { orders } => {
                let list: Vec<String> = orders.iter().map(Number::to_string).collect();
                write!(f, "Duplicate test orders: [{}]", list.join(", "))
            }
            Self::MissingDependency { test, dependency } => {
                write!(f, "Test '{}' depends on non-existent '{}'", test, dependency)
            }
            Self::MissingResponseSource { test, referenced } => {
                write!(f, "Test '{}' references non-existent '{}'", test, referenced)
            }
            Self::IncompleteAuth { auth_type } => write!(
                f,
                "{} auth missing '{}' configuration",
                auth_type.label(),
                auth_type.block_key()
            ),
            Self::CircularDependency { cycle } => {
                write!(f, "Circular dependency detected: {}", cycle.join(" → "))
            }
        }
    }
}

/// A business rule over a whole configuration document.
pub trait Rule {
    /// Short, stable identifier (e.g. `"unique_orders"`).
    fn id(&self) -> &'static str;

    /// Inspect `doc` and return every finding.
    fn check(&self, doc: &Document) -> Vec<Finding>;
}

/// All business rules, in execution order: order uniqueness, dependency
/// existence, auth completeness, cycle detection.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(UniqueOrderRule),
        Box::new(DependencyExistenceRule),
        Box::new(AuthCompletenessRule),
        Box::new(CircularDependencyRule),
    ]
}

/// Run `rules` in order and concatenate their findings.
pub fn run_rules(rules: &[Box<dyn Rule>], doc: &Document) -> Vec<Finding> {
    rules.iter().flat_map(|rule| rule.check(doc)).collect()
}

/// Run every default rule against `doc`.
pub fn run_custom_validations(doc: &Document) -> Vec<Finding> {
    run_rules(&default_rules(), doc)
}
