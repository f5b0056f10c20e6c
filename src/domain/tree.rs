//! Hierarchical budget dataset as delivered by the backend:
//! year → business unit → zone → rubro → subrubro, with a total at every level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::EngineResult;

pub type Year = i32;
pub type RubroIndex = usize;
pub type SubrubroIndex = usize;

/// Flat index → total accumulator produced by aggregation. Keyed with a
/// `BTreeMap` so iteration order, and therefore every derived report, is
/// deterministic.
pub type BucketTotals = BTreeMap<usize, f64>;

/// One budget variant (projected, updated, or executed) for any number of
/// years. Trees are sparse: a missing node at any level contributes zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetTree(pub BTreeMap<Year, BTreeMap<String, UenNode>>);

/// A business unit's yearly figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UenNode {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub zones: BTreeMap<String, ZoneNode>,
}

/// A geographic/organizational subdivision of a business unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneNode {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub rubros: BTreeMap<RubroIndex, RubroNode>,
}

/// A top-level budget category within a zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RubroNode {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub subrubros: BTreeMap<SubrubroIndex, SubrubroNode>,
}

/// A sub-category leaf.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubrubroNode {
    #[serde(default)]
    pub total: f64,
}

impl BudgetTree {
    /// Decodes a tree from the backend's JSON payload.
    pub fn from_json(value: serde_json::Value) -> EngineResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn year(&self, year: Year) -> Option<&BTreeMap<String, UenNode>> {
        self.0.get(&year)
    }

    pub fn unit(&self, year: Year, name: &str) -> Option<&UenNode> {
        self.0.get(&year).and_then(|units| units.get(name))
    }

    /// Years present in the tree, ascending.
    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.0.keys().copied()
    }

    /// Checks the total-consistency invariant: every node's total must equal
    /// the sum of its children's totals, within `tolerance`. Returns a
    /// human-readable description per violation; empty means consistent.
    /// Nodes without children are leaves and are skipped.
    pub fn consistency_violations(&self, tolerance: f64) -> Vec<String> {
        let mut violations = Vec::new();
        for (year, units) in &self.0 {
            for (uen, unit) in units {
                check_level(
                    &mut violations,
                    format!("{year}/{uen}"),
                    unit.total,
                    unit.zones.values().map(|z| z.total),
                    tolerance,
                );
                for (zone_name, zone) in &unit.zones {
                    check_level(
                        &mut violations,
                        format!("{year}/{uen}/{zone_name}"),
                        zone.total,
                        zone.rubros.values().map(|r| r.total),
                        tolerance,
                    );
                    for (rubro, node) in &zone.rubros {
                        check_level(
                            &mut violations,
                            format!("{year}/{uen}/{zone_name}/rubro {rubro}"),
                            node.total,
                            node.subrubros.values().map(|s| s.total),
                            tolerance,
                        );
                    }
                }
            }
        }
        violations
    }
}

fn check_level(
    violations: &mut Vec<String>,
    path: String,
    total: f64,
    children: impl Iterator<Item = f64>,
    tolerance: f64,
) {
    let mut sum = 0.0;
    let mut count = 0usize;
    for child in children {
        sum += child;
        count += 1;
    }
    if count > 0 && (sum - total).abs() > tolerance {
        violations.push(format!("{path}: total {total} != children sum {sum}"));
    }
}
