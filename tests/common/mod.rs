//! Shared fixtures for the integration suites.

use presupuesto_core::domain::{AllocationRates, AllocationTable, BudgetTree, RubroCatalog, Year};
use serde_json::json;

/// Catalog covering the full P&L structure plus one unclassified rubro.
pub fn full_catalog() -> RubroCatalog {
    RubroCatalog::from_json(json!([
        { "nombre": "INGRESOS OPERACIONALES", "subrubros": [
            { "nombre": "Ventas" },
            { "nombre": "Servicios" }
        ] },
        { "nombre": "COSTOS DE VENTA" },
        { "nombre": "COSTOS INDIRECTOS" },
        { "nombre": "GASTOS OPERACIONALES DE ADMINISTRACION" },
        { "nombre": "GASTOS OPERACIONALES DE COMERCIALIZACION" },
        { "nombre": "INGRESOS NO OPERACIONALES" },
        { "nombre": "GASTOS NO OPERACIONALES" },
        { "nombre": "PARTIDAS EXTRAORDINARIAS" },
    ]))
    .expect("fixture catalog decodes")
}

/// One operating unit with a single zone and rubro, plus a national-only
/// shared unit. The base fixture for the allocation scenarios.
pub fn tree_with_national_overhead(
    year: Year,
    operating_total: f64,
    overhead_total: f64,
) -> BudgetTree {
    BudgetTree::from_json(json!({
        year.to_string(): {
            "Constructora": {
                "total": operating_total,
                "zones": {
                    "Bogota": {
                        "total": operating_total,
                        "rubros": { "0": { "total": operating_total } }
                    }
                }
            },
            "Unidades de Apoyo": {
                "total": overhead_total,
                "zones": {
                    "Nacional": {
                        "total": overhead_total,
                        "rubros": { "0": { "total": overhead_total } }
                    }
                }
            }
        }
    }))
    .expect("fixture tree decodes")
}

pub fn table_for(year: Year, rates: AllocationRates) -> AllocationTable {
    let mut table = AllocationTable::default();
    table.0.insert(year, rates);
    table
}
