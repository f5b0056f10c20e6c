//! One parameterized consolidation pipeline for every report page.
//!
//! The façade borrows the caller's trees, catalog, and allocation table for
//! the duration of a query and returns freshly built rows, so concurrent
//! callers never share mutable state.

use tracing::debug;

use crate::domain::allocation::AllocationTable;
use crate::domain::catalog::RubroCatalog;
use crate::domain::tree::{BudgetTree, RubroIndex, Year};
use crate::domain::uen::Uen;
use crate::errors::EngineResult;

use super::aggregator::BucketSlice;
use super::allocator;
use super::pnl::{PnlComparison, PnlStatement};
use super::projector::{self, ChartRow};

/// Interactive drill-down selection. Both fields absent means the
/// consolidated dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub uen: Option<Uen>,
    pub rubro: Option<RubroIndex>,
}

impl ReportFilter {
    pub fn consolidated() -> Self {
        Self::default()
    }

    pub fn for_uen(uen: Uen) -> Self {
        Self {
            uen: Some(uen),
            rubro: None,
        }
    }

    pub fn granularity(self) -> Granularity {
        match (self.uen, self.rubro) {
            (uen, Some(rubro)) => Granularity::PerRubro { uen, rubro },
            (Some(uen), None) => Granularity::PerUen(uen),
            (None, None) => Granularity::Consolidated,
        }
    }
}

/// Report granularity the pipeline is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// All operating units combined; the shared unit contributes only
    /// through allocation.
    Consolidated,
    /// One unit's allocated totals.
    PerUen(Uen),
    /// One rubro's subrubros, optionally restricted to one unit.
    PerRubro { uen: Option<Uen>, rubro: RubroIndex },
}

/// The consolidation engine: aggregation, overhead allocation, P&L roll-up,
/// and chart projection over one projected tree and one actual/updated tree.
pub struct ConsolidationEngine<'a> {
    proyectado: &'a BudgetTree,
    actualizado: &'a BudgetTree,
    catalog: &'a RubroCatalog,
    table: &'a AllocationTable,
}

impl<'a> ConsolidationEngine<'a> {
    /// Validates the allocation table up front; every later query is
    /// infallible (missing tree structure contributes zero).
    pub fn new(
        proyectado: &'a BudgetTree,
        actualizado: &'a BudgetTree,
        catalog: &'a RubroCatalog,
        table: &'a AllocationTable,
    ) -> EngineResult<Self> {
        table.validate()?;
        Ok(Self {
            proyectado,
            actualizado,
            catalog,
            table,
        })
    }

    /// Variance rows for one year at the filter's granularity.
    pub fn chart_rows(&self, year: Year, filter: ReportFilter) -> Vec<ChartRow> {
        let granularity = filter.granularity();
        debug!(year, ?granularity, "running consolidation pipeline");

        let (units, slice) = match granularity {
            Granularity::Consolidated => (Uen::OPERATING.to_vec(), BucketSlice::Rubros),
            Granularity::PerUen(uen) => (vec![uen], BucketSlice::Rubros),
            Granularity::PerRubro { uen, rubro } => (
                uen.map_or_else(|| Uen::OPERATING.to_vec(), |u| vec![u]),
                BucketSlice::Subrubros(rubro),
            ),
        };

        let proyectado =
            allocator::allocated_totals(self.proyectado, year, self.table, &units, slice);
        let actualizado =
            allocator::allocated_totals(self.actualizado, year, self.table, &units, slice);

        match slice {
            BucketSlice::Rubros => {
                projector::rubro_rows(year, &proyectado, &actualizado, self.catalog)
            }
            BucketSlice::Subrubros(rubro) => {
                projector::subrubro_rows(year, rubro, &proyectado, &actualizado, self.catalog)
            }
        }
    }

    /// Variance rows for every year present in the projected tree, ascending,
    /// at the filter's granularity.
    pub fn chart_series(&self, filter: ReportFilter) -> Vec<ChartRow> {
        self.proyectado
            .years()
            .flat_map(|year| self.chart_rows(year, filter))
            .collect()
    }

    /// Flat P&L comparison for tabular reports, consolidated or for one unit.
    pub fn pnl_comparison(&self, year: Year, uen: Option<Uen>) -> PnlComparison {
        let units = uen.map_or_else(|| Uen::OPERATING.to_vec(), |u| vec![u]);
        let proyectado = allocator::allocated_totals(
            self.proyectado,
            year,
            self.table,
            &units,
            BucketSlice::Rubros,
        );
        let actualizado = allocator::allocated_totals(
            self.actualizado,
            year,
            self.table,
            &units,
            BucketSlice::Rubros,
        );
        PnlComparison {
            year,
            proyectado: PnlStatement::from_buckets(&proyectado, self.catalog),
            actualizado: PnlStatement::from_buckets(&actualizado, self.catalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::allocation::AllocationRates;
    use serde_json::json;

    fn catalog() -> RubroCatalog {
        RubroCatalog::from_json(json!([
            { "nombre": "INGRESOS OPERACIONALES", "subrubros": [{ "nombre": "Ventas" }] },
            { "nombre": "COSTOS DE VENTA" },
        ]))
        .unwrap()
    }

    fn trees() -> (BudgetTree, BudgetTree) {
        let proyectado = BudgetTree::from_json(json!({
            "2025": {
                "Constructora": {
                    "total": 20_000_000.0,
                    "zones": {
                        "Bogota": { "total": 20_000_000.0, "rubros": {
                            "0": { "total": 20_000_000.0, "subrubros": { "0": { "total": 20_000_000.0 } } }
                        } }
                    }
                },
                "Promotora": {
                    "total": 6_000_000.0,
                    "zones": {
                        "Cali": { "total": 6_000_000.0, "rubros": { "1": { "total": 6_000_000.0 } } }
                    }
                },
                "Unidades de Apoyo": {
                    "total": 10_000_000.0,
                    "zones": {
                        "Nacional": { "total": 10_000_000.0, "rubros": {
                            "0": { "total": 10_000_000.0, "subrubros": { "0": { "total": 10_000_000.0 } } }
                        } }
                    }
                }
            }
        }))
        .unwrap();
        let actualizado = BudgetTree::from_json(json!({
            "2025": {
                "Constructora": {
                    "total": 18_000_000.0,
                    "zones": {
                        "Bogota": { "total": 18_000_000.0, "rubros": {
                            "0": { "total": 18_000_000.0, "subrubros": { "0": { "total": 18_000_000.0 } } }
                        } }
                    }
                }
            }
        }))
        .unwrap();
        (proyectado, actualizado)
    }

    fn table() -> AllocationTable {
        let mut table = AllocationTable::default();
        table.0.insert(
            2025,
            AllocationRates {
                nacional_constructora: 0.5,
                nacional_promotora: 0.3,
                nacional_inmobiliaria: 0.2,
                ..AllocationRates::ZERO
            },
        );
        table
    }

    #[test]
    fn consolidated_rows_include_allocated_overhead() {
        let (proyectado, actualizado) = trees();
        let catalog = catalog();
        let table = table();
        let engine = ConsolidationEngine::new(&proyectado, &actualizado, &catalog, &table).unwrap();

        let rows = engine.chart_rows(2025, ReportFilter::consolidated());
        let ingresos = rows
            .iter()
            .find(|r| r.categoria == "INGRESOS OPERACIONALES")
            .unwrap();
        // 20 raw + 10 fully reallocated overhead
        assert_eq!(ingresos.proyectado, 30.0);
        assert_eq!(ingresos.actualizado, 18.0);
        assert!(rows.iter().all(|r| !r.categoria.contains("Apoyo")));
    }

    #[test]
    fn per_uen_filter_restricts_both_aggregation_and_shares() {
        let (proyectado, actualizado) = trees();
        let catalog = catalog();
        let table = table();
        let engine = ConsolidationEngine::new(&proyectado, &actualizado, &catalog, &table).unwrap();

        let rows = engine.chart_rows(2025, ReportFilter::for_uen(Uen::Promotora));
        let cost = rows.iter().find(|r| r.categoria == "COSTOS DE VENTA").unwrap();
        assert_eq!(cost.proyectado, 6.0);
        let ingresos = rows
            .iter()
            .find(|r| r.categoria == "INGRESOS OPERACIONALES")
            .unwrap();
        // Promotora's only income is its 30% national overhead share
        assert_eq!(ingresos.proyectado, 3.0);
    }

    #[test]
    fn rubro_filter_switches_to_subrubro_rows() {
        let (proyectado, actualizado) = trees();
        let catalog = catalog();
        let table = table();
        let engine = ConsolidationEngine::new(&proyectado, &actualizado, &catalog, &table).unwrap();

        let filter = ReportFilter {
            uen: Some(Uen::Constructora),
            rubro: Some(0),
        };
        let rows = engine.chart_rows(2025, filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].categoria, "Ventas");
        // 20 raw + 50% of the national subrubro total
        assert_eq!(rows[0].proyectado, 25.0);
        assert_eq!(rows[0].actualizado, 18.0);
    }

    #[test]
    fn pnl_comparison_classifies_both_sides_identically() {
        let (proyectado, actualizado) = trees();
        let catalog = catalog();
        let table = table();
        let engine = ConsolidationEngine::new(&proyectado, &actualizado, &catalog, &table).unwrap();

        let pnl = engine.pnl_comparison(2025, None);
        assert_eq!(pnl.proyectado.ingresos_operacionales, 30_000_000.0);
        assert_eq!(pnl.proyectado.costos_de_venta, 6_000_000.0);
        assert_eq!(pnl.actualizado.ingresos_operacionales, 18_000_000.0);
        assert_eq!(pnl.actualizado.utilidad_antes_impuesto(), 18_000_000.0);
    }

    #[test]
    fn invalid_table_is_rejected_at_construction() {
        let (proyectado, actualizado) = trees();
        let catalog = catalog();
        let mut table = AllocationTable::default();
        table.0.insert(
            2025,
            AllocationRates {
                diferente_nacional_promotora: f64::INFINITY,
                ..AllocationRates::ZERO
            },
        );

        let err = ConsolidationEngine::new(&proyectado, &actualizado, &catalog, &table)
            .err()
            .expect("infinite fraction must fail validation");
        assert!(format!("{err}").contains("2025"));
    }

    #[test]
    fn chart_series_walks_every_projected_year() {
        let proyectado = BudgetTree::from_json(json!({
            "2024": {
                "Constructora": {
                    "total": 4_000_000.0,
                    "zones": { "Bogota": { "total": 4_000_000.0, "rubros": { "0": { "total": 4_000_000.0 } } } }
                }
            },
            "2025": {
                "Constructora": {
                    "total": 5_000_000.0,
                    "zones": { "Bogota": { "total": 5_000_000.0, "rubros": { "0": { "total": 5_000_000.0 } } } }
                }
            }
        }))
        .unwrap();
        let actualizado = BudgetTree::default();
        let catalog = catalog();
        let table = AllocationTable::default();
        let engine = ConsolidationEngine::new(&proyectado, &actualizado, &catalog, &table).unwrap();

        let rows = engine.chart_series(ReportFilter::consolidated());
        let years: Vec<Year> = rows
            .iter()
            .filter(|r| r.categoria == "INGRESOS OPERACIONALES")
            .map(|r| r.year)
            .collect();
        assert_eq!(years, vec![2024, 2025]);
    }
}
