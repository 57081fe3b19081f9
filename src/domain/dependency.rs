//! Pure dependency graph functions for cycle detection.

use crate::document::TestRecord;
use std::collections::{HashMap, HashSet};

/// Adjacency map from test name to the names it depends on.
///
/// Keys iterate in first-declaration order. A name declared twice keeps its
/// first position but takes the later record's dependencies.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    order: Vec<String>,
    edges: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Builds the graph from test records. Records without a name are left out.
    pub fn from_tests(tests: &[TestRecord<'_>]) -> Self {
        let mut graph = Self::default();

        for test in tests {
            let Some(name) = test.name().filter(|name| !name.is_empty()) else {
                continue;
            };
            let deps = test.dependencies().into_iter().map(str::to_string).collect();
            graph.insert(name.to_string(), deps);
        }

        graph
    }

    pub fn insert(&mut self, name: String, deps: Vec<String>) {
        if !self.edges.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.edges.insert(name, deps);
    }

    /// Test names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Dependencies of `name`; empty for names that are not keys.
    pub fn dependencies(&self, name: &str) -> &[String] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.edges.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Detects cycles in the dependency graph.
///
/// Each root not yet visited starts one depth-first pass, and each pass
/// reports at most one cycle. A cycle is the path from the first occurrence of
/// the repeated node, with that node appended again: `[A, B, C, A]`.
///
/// Nodes left on the path when a pass finds a cycle are marked visited, so a
/// single cycle is reported once no matter how many of its members are roots.
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let mut cycles = Vec::new();
    let mut visited = HashSet::new();

    for root in graph.names() {
        if visited.contains(root) {
            continue;
        }
        if let Some(cycle) = find_cycle(graph, root, &mut visited) {
            cycles.push(cycle);
        }
    }

    cycles
}

/// One stack frame of the depth-first search: a node and the index of the
/// next dependency to explore.
struct Frame<'g> {
    node: &'g str,
    next: usize,
}

/// Iterative depth-first search from `root`.
fn find_cycle<'g>(
    graph: &'g DependencyGraph,
    root: &'g str,
    visited: &mut HashSet<&'g str>,
) -> Option<Vec<String>> {
    let mut path: Vec<&'g str> = vec![root];
    // Position of each node currently on `path`.
    let mut on_path: HashMap<&'g str, usize> = HashMap::from([(root, 0)]);
    let mut stack = vec![Frame { node: root, next: 0 }];

    while let Some(frame) = stack.last_mut() {
        let deps = graph.dependencies(frame.node);

        let Some(dep) = deps.get(frame.next) else {
            // Exhausted: backtrack.
            let node = frame.node;
            stack.pop();
            path.pop();
            on_path.remove(node);
            visited.insert(node);
            continue;
        };
        frame.next += 1;
        let dep = dep.as_str();

        if let Some(&start) = on_path.get(dep) {
            let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(dep.to_string());
            visited.extend(path);
            return Some(cycle);
        }

        if visited.contains(dep) {
            continue;
        }

        on_path.insert(dep, path.len());
        path.push(dep);
        stack.push(Frame { node: dep, next: 0 });
    }

    None
}
