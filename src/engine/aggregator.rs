//! Sums leaf totals across zones into flat accumulators.
//!
//! All functions fold borrowed tree data into fresh maps; inputs are never
//! mutated, and projected and actual datasets are always aggregated through
//! separate calls so their accumulators stay apart.

use crate::domain::tree::{BucketTotals, BudgetTree, RubroIndex, Year, ZoneNode};
use crate::domain::uen::Uen;

/// Which leaf level a fold accumulates: whole rubros, or the subrubros of a
/// single rubro (drill-down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketSlice {
    Rubros,
    Subrubros(RubroIndex),
}

impl BucketSlice {
    pub(crate) fn accumulate(self, zone: &ZoneNode, acc: &mut BucketTotals) {
        match self {
            BucketSlice::Rubros => {
                for (rubro, node) in &zone.rubros {
                    *acc.entry(*rubro).or_insert(0.0) += node.total;
                }
            }
            BucketSlice::Subrubros(rubro) => {
                if let Some(node) = zone.rubros.get(&rubro) {
                    for (subrubro, leaf) in &node.subrubros {
                        *acc.entry(*subrubro).or_insert(0.0) += leaf.total;
                    }
                }
            }
        }
    }
}

/// Flat index → total map for one year, summed over every zone of the given
/// units. Missing years, units, zones, and rubros contribute zero.
pub fn bucket_totals(
    tree: &BudgetTree,
    year: Year,
    units: &[Uen],
    slice: BucketSlice,
) -> BucketTotals {
    let mut acc = BucketTotals::new();
    for unit in units {
        if let Some(node) = tree.unit(year, unit.name()) {
            for zone in node.zones.values() {
                slice.accumulate(zone, &mut acc);
            }
        }
    }
    acc
}

/// Scalar total of one unit for one year; zero when absent.
pub fn unit_total(tree: &BudgetTree, year: Year, unit: Uen) -> f64 {
    tree.unit(year, unit.name()).map_or(0.0, |node| node.total)
}
