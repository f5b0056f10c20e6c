//! Projects two allocated bucket maps into ordered, scaled chart rows.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::domain::catalog::{PnlBucket, RubroCatalog};
use crate::domain::tree::{BucketTotals, RubroIndex, Year};

use super::pnl::PnlStatement;

/// Label of the closing pre-tax profit row.
pub const UTILIDAD: &str = "UTILIDAD";

/// Canonical row order for rubro-level charts. Categories outside this list
/// keep their insertion order after the canonical block.
pub const CATEGORY_ORDER: [&str; 7] = [
    "INGRESOS OPERACIONALES",
    "COSTOS DE VENTA",
    "GASTOS ADMINISTRACION",
    "GASTOS COMERCIALIZACION",
    "INGRESOS NO OPERACIONALES",
    "GASTOS NO OPERACIONALES",
    UTILIDAD,
];

static CATEGORY_RANK: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    CATEGORY_ORDER
        .iter()
        .enumerate()
        .map(|(rank, name)| (*name, rank))
        .collect()
});

/// One chart/report row. The three numeric fields are expressed in millions,
/// rounded half-away-from-zero to whole numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub year: Year,
    pub categoria: String,
    pub proyectado: f64,
    pub actualizado: f64,
    pub diferencia: f64,
}

impl ChartRow {
    /// Scales raw currency amounts into a presentation row. The difference is
    /// taken on the raw values before rounding, so it reconciles with the raw
    /// totals rather than with the two rounded columns.
    fn from_raw(year: Year, categoria: String, proyectado: f64, actualizado: f64) -> Self {
        ChartRow {
            year,
            categoria,
            proyectado: to_millions(proyectado),
            actualizado: to_millions(actualizado),
            diferencia: to_millions(proyectado - actualizado),
        }
    }
}

fn to_millions(value: f64) -> f64 {
    (value / 1_000_000.0).round()
}

fn is_cost(bucket: Option<PnlBucket>) -> bool {
    matches!(
        bucket,
        Some(PnlBucket::CostosDeVenta) | Some(PnlBucket::CostosIndirectos)
    )
}

/// Rubro-level variance rows: one row per projected rubro, with the two cost
/// categories merged into a single `COSTOS DE VENTA` row and a closing
/// `UTILIDAD` row from each side's pre-tax profit.
pub fn rubro_rows(
    year: Year,
    proyectado: &BucketTotals,
    actualizado: &BucketTotals,
    catalog: &RubroCatalog,
) -> Vec<ChartRow> {
    let mut rows = Vec::with_capacity(proyectado.len() + 1);
    let mut cost_proyectado = 0.0;
    let mut has_cost_rows = false;

    for (rubro, total) in proyectado {
        if is_cost(catalog.bucket(*rubro)) {
            cost_proyectado += *total;
            has_cost_rows = true;
        } else {
            let actual = actualizado.get(rubro).copied().unwrap_or(0.0);
            rows.push(ChartRow::from_raw(year, catalog.rubro_label(*rubro), *total, actual));
        }
    }

    if has_cost_rows {
        let cost_actualizado: f64 = actualizado
            .iter()
            .filter(|(rubro, _)| is_cost(catalog.bucket(**rubro)))
            .map(|(_, total)| *total)
            .sum();
        rows.push(ChartRow::from_raw(
            year,
            PnlBucket::CostosDeVenta.nombre().to_string(),
            cost_proyectado,
            cost_actualizado,
        ));
    }

    let proyectado_pnl = PnlStatement::from_buckets(proyectado, catalog);
    let actualizado_pnl = PnlStatement::from_buckets(actualizado, catalog);
    rows.push(ChartRow::from_raw(
        year,
        UTILIDAD.to_string(),
        proyectado_pnl.utilidad_antes_impuesto(),
        actualizado_pnl.utilidad_antes_impuesto(),
    ));

    rows.sort_by_key(|row| {
        CATEGORY_RANK
            .get(row.categoria.as_str())
            .copied()
            .unwrap_or(usize::MAX)
    });
    rows
}

/// Subrubro drill-down rows for one rubro: one row per projected subrubro, in
/// index order, with no category merging or reordering.
pub fn subrubro_rows(
    year: Year,
    rubro: RubroIndex,
    proyectado: &BucketTotals,
    actualizado: &BucketTotals,
    catalog: &RubroCatalog,
) -> Vec<ChartRow> {
    proyectado
        .iter()
        .map(|(subrubro, total)| {
            let actual = actualizado.get(subrubro).copied().unwrap_or(0.0);
            ChartRow::from_raw(year, catalog.subrubro_label(rubro, *subrubro), *total, actual)
        })
        .collect()
}
