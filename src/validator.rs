//! Validation composer: schema check plus business rules.

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::document::{load_document, Document};
use crate::rules::{default_rules, run_rules, Finding, Rule};
use crate::schema::Schema;

/// Result of validating one document.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// At most one schema finding
    pub schema_errors: Vec<Finding>,
    /// Business rule findings, in rule order
    pub custom_errors: Vec<Finding>,
    pub schema_valid: bool,
}

impl Outcome {
    /// Valid when the schema accepted the document and no rule fired.
    pub fn is_valid(&self) -> bool {
        self.schema_valid && self.custom_errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.schema_errors.len() + self.custom_errors.len()
    }

    /// Schema findings followed by rule findings.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.schema_errors.iter().chain(self.custom_errors.iter())
    }
}

/// Outcome of validating a file, with the data the report header needs.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub config_path: PathBuf,
    /// Local time of validation, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
    pub outcome: Outcome,
}

/// Validate `doc` against `schema` and every business rule.
///
/// Rules run regardless of the schema result.
pub fn validate_document(schema: &Schema, rules: &[Box<dyn Rule>], doc: &Document) -> Outcome {
    let (schema_valid, schema_errors) = schema.validate(doc.as_value());
    let custom_errors = run_rules(rules, doc);

    Outcome {
        schema_errors,
        custom_errors,
        schema_valid,
    }
}

/// Validates configuration files against one schema, compiled on first use.
pub struct ConfigValidator {
    schema_path: PathBuf,
    schema: Option<Schema>,
    rules: Vec<Box<dyn Rule>>,
    verbose: bool,
}

impl ConfigValidator {
    pub fn new(schema_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            schema: None,
            rules: default_rules(),
            verbose: false,
        }
    }

    /// Print progress lines while validating.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// Load and compile the schema unless already cached.
    pub fn load_schema(&mut self) -> Result<&Schema> {
        cached_schema(&mut self.schema, &self.schema_path)
    }

    /// Validate an already loaded document.
    pub fn validate_document(&mut self, doc: &Document) -> Result<Outcome> {
        let schema = cached_schema(&mut self.schema, &self.schema_path)?;
        Ok(validate_document(schema, &self.rules, doc))
    }

    /// Load `config_path` and validate it.
    ///
    /// Load failures are errors; findings are returned in the outcome.
    pub fn validate_file(&mut self, config_path: &Path) -> Result<FileOutcome> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let verbose = self.verbose;

        let schema = cached_schema(&mut self.schema, &self.schema_path)?;

        progress(verbose, "Loading configuration...");
        let doc = load_document(config_path)?;
        progress(verbose, format!("{} Configuration loaded", "✓".green()));

        progress(verbose, "\nValidating against schema...");
        let (schema_valid, schema_errors) = schema.validate(doc.as_value());
        if schema_valid {
            progress(verbose, format!("{} Schema validation passed", "✓".green()));
        } else {
            progress(
                verbose,
                format!(
                    "{} Schema validation failed ({} error(s))",
                    "✗".red(),
                    schema_errors.len()
                ),
            );
        }

        progress(verbose, "\nRunning custom validations...");
        let custom_errors = run_rules(&self.rules, &doc);
        if custom_errors.is_empty() {
            progress(verbose, format!("{} Custom validations passed", "✓".green()));
        } else {
            progress(
                verbose,
                format!(
                    "{} Custom validations failed ({} error(s))",
                    "✗".red(),
                    custom_errors.len()
                ),
            );
        }

        Ok(FileOutcome {
            config_path: config_path.to_path_buf(),
            timestamp,
            outcome: Outcome {
                schema_errors,
                custom_errors,
                schema_valid,
            },
        })
    }
}

fn cached_schema<'a>(slot: &'a mut Option<Schema>, path: &Path) -> Result<&'a Schema> {
    let schema = match slot.take() {
        Some(schema) => schema,
        None => Schema::load(path)?,
    };
    Ok(slot.insert(schema))
}

fn progress(verbose: bool, line: impl std::fmt::Display) {
    if verbose {
        println!("{}", line);
    }
}

/// Validate one configuration file against one schema file.
pub fn validate_config(config_path: &Path, schema_path: &Path) -> Result<bool> {
    let mut validator = ConfigValidator::new(schema_path);
    let result = validator.validate_file(config_path)?;
    Ok(result.outcome.is_valid())
}
