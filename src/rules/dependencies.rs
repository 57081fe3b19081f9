//! Test dependencies must reference existing tests.

use std::collections::HashSet;

use super::{Finding, Rule};
use crate::document::Document;

pub struct DependencyExistenceRule;

impl Rule for DependencyExistenceRule {
    fn id(&self) -> &'static str {
        "dependency_existence"
    }

    fn check(&self, doc: &Document) -> Vec<Finding> {
        let tests = doc.collect_tests();
        let names: HashSet<&str> = tests.iter().filter_map(|t| t.name()).collect();
        let mut findings = Vec::new();

        // Unnamed tests are still checked, under a placeholder name.
        for test in &tests {
            let test_name = test.display_name();

            for dependency in test.depends_on() {
                if !names.contains(dependency) {
                    findings.push(Finding::MissingDependency {
                        test: test_name.to_string(),
                        dependency: dependency.to_string(),
                    });
                }
            }

            if let Some(referenced) = test.response_source() {
                if !names.contains(referenced) {
                    findings.push(Finding::MissingResponseSource {
                        test: test_name.to_string(),
                        referenced: referenced.to_string(),
                    });
                }
            }
        }

        findings
    }
}
