//! Test order numbers must be unique.

use serde_json::Number;
use std::cmp::Ordering;

use super::{Finding, Rule};
use crate::document::Document;

pub struct UniqueOrderRule;

impl Rule for UniqueOrderRule {
    fn id(&self) -> &'static str {
        "unique_orders"
    }

    fn check(&self, doc: &Document) -> Vec<Finding> {
        let orders: Vec<&Number> = doc
            .collect_tests()
            .iter()
            .filter_map(|test| test.order())
            .collect();

        let duplicates = duplicate_orders(&orders);
        if duplicates.is_empty() {
            return vec![];
        }

        vec![Finding::DuplicateOrders { orders: duplicates }]
    }
}

/// Values occurring more than once, each listed once, in ascending order.
///
/// `1` and `1.0` are the same order.
pub fn duplicate_orders(orders: &[&Number]) -> Vec<Number> {
    let mut sorted: Vec<&Number> = orders.to_vec();
    sorted.sort_by(|a, b| compare(a, b));

    let mut duplicates: Vec<Number> = Vec::new();
    for pair in sorted.windows(2) {
        if compare(pair[0], pair[1]) != Ordering::Equal {
            continue;
        }
        let already_listed = duplicates
            .last()
            .is_some_and(|last| compare(last, pair[1]) == Ordering::Equal);
        if !already_listed {
            duplicates.push(pair[0].clone());
        }
    }

    duplicates
}

fn compare(a: &Number, b: &Number) -> Ordering {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a.cmp(&b);
    }
    let a = a.as_f64().unwrap_or(f64::NAN);
    let b = b.as_f64().unwrap_or(f64::NAN);
    a.total_cmp(&b)
}
