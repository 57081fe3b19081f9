//! Tests cannot depend on themselves, directly or transitively.

use super::{Finding, Rule};
use crate::document::Document;
use crate::domain::dependency::{detect_cycles, DependencyGraph};

pub struct CircularDependencyRule;

impl Rule for CircularDependencyRule {
    fn id(&self) -> &'static str {
        "circular_dependencies"
    }

    fn check(&self, doc: &Document) -> Vec<Finding> {
        let graph = DependencyGraph::from_tests(&doc.collect_tests());

        detect_cycles(&graph)
            .into_iter()
            .map(|cycle| Finding::CircularDependency { cycle })
            .collect()
    }
}
