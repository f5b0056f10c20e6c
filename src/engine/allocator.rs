//! Redistributes `Unidades de Apoyo` overhead onto the operating units.
//!
//! The shared unit's national zone is split under one percentage policy and
//! every other zone under a second, both keyed by year. Shares are computed
//! into fresh maps, so repeated runs over the same inputs give identical
//! results.

use tracing::warn;

use crate::domain::allocation::{AllocationRates, AllocationTable};
use crate::domain::tree::{BucketTotals, BudgetTree, Year};
use crate::domain::uen::{Uen, NACIONAL};

use super::aggregator::{self, BucketSlice};

/// Overhead amounts `unit` receives from the shared unit for one year, at the
/// given slice granularity. Empty when the shared unit is absent.
pub fn overhead_shares(
    tree: &BudgetTree,
    year: Year,
    rates: &AllocationRates,
    unit: Uen,
    slice: BucketSlice,
) -> BucketTotals {
    let mut shares = BucketTotals::new();
    let Some(apoyo) = tree.unit(year, Uen::UnidadesDeApoyo.name()) else {
        return shares;
    };

    for (zone_name, zone) in &apoyo.zones {
        let fraction = if zone_name == NACIONAL {
            rates.nacional(unit)
        } else {
            rates.diferente_nacional(unit)
        };
        if fraction == 0.0 {
            continue;
        }
        let mut zone_buckets = BucketTotals::new();
        slice.accumulate(zone, &mut zone_buckets);
        for (index, total) in zone_buckets {
            *shares.entry(index).or_insert(0.0) += total * fraction;
        }
    }
    shares
}

/// Overhead share of `unit`'s scalar year total (spec'd alongside the
/// per-rubro shares so whole-unit figures stay consistent with the buckets).
pub fn overhead_total_share(
    tree: &BudgetTree,
    year: Year,
    rates: &AllocationRates,
    unit: Uen,
) -> f64 {
    let Some(apoyo) = tree.unit(year, Uen::UnidadesDeApoyo.name()) else {
        return 0.0;
    };
    apoyo
        .zones
        .iter()
        .map(|(zone_name, zone)| {
            let fraction = if zone_name == NACIONAL {
                rates.nacional(unit)
            } else {
                rates.diferente_nacional(unit)
            };
            zone.total * fraction
        })
        .sum()
}

/// Aggregates the given units' raw buckets for one year and adds each unit's
/// overhead share. This is the engine's post-allocation view of a year.
pub fn allocated_totals(
    tree: &BudgetTree,
    year: Year,
    table: &AllocationTable,
    units: &[Uen],
    slice: BucketSlice,
) -> BucketTotals {
    let rates = effective_rates(tree, year, table);
    let mut totals = aggregator::bucket_totals(tree, year, units, slice);
    for unit in units {
        for (index, share) in overhead_shares(tree, year, &rates, *unit, slice) {
            *totals.entry(index).or_insert(0.0) += share;
        }
    }
    totals
}

/// One unit's scalar year total after allocation.
pub fn allocated_unit_total(
    tree: &BudgetTree,
    year: Year,
    table: &AllocationTable,
    unit: Uen,
) -> f64 {
    let rates = effective_rates(tree, year, table);
    aggregator::unit_total(tree, year, unit) + overhead_total_share(tree, year, &rates, unit)
}

/// Rates for the year, falling back to all-zero fractions when the year is
/// not configured. The fallback silently drops the shared unit's contribution
/// for that year, so it is logged whenever there is overhead to drop.
fn effective_rates(tree: &BudgetTree, year: Year, table: &AllocationTable) -> AllocationRates {
    match table.rates(year) {
        Some(rates) => *rates,
        None => {
            if tree.unit(year, Uen::UnidadesDeApoyo.name()).is_some() {
                warn!(year, "no allocation rates for year; overhead contribution dropped");
            }
            AllocationRates::ZERO
        }
    }
}
