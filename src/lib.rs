//! # apicheck - API test configuration validator
//!
//! Validates declarative API-test configuration documents against a JSON
//! schema and a set of cross-field business rules, then renders a pass/fail
//! report.
//!
//! ## Modules
//!
//! - [`document`] - Document loading and the flattened view of declared tests
//! - [`domain`] - Dependency graph construction and cycle detection
//! - [`rules`] - Business rules and the [`rules::Finding`] type
//! - [`schema`] - JSON-schema validation
//! - [`validator`] - Composition of schema and rule checks
//! - [`report`] - Text and JSON reports
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use apicheck::validator::ConfigValidator;
//!
//! let mut validator = ConfigValidator::new("schema.json");
//! let result = validator
//!     .validate_file(Path::new("test_config.json"))
//!     .expect("Failed to load configuration");
//!
//! for finding in result.outcome.findings() {
//!     println!("{}", finding);
//! }
//! ```

pub mod document;
pub mod domain;
pub mod report;
pub mod rules;
pub mod schema;
pub mod validator;
