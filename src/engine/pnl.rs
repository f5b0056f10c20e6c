//! Profit-and-loss roll-up over post-allocation bucket maps.

use serde::Serialize;

use crate::domain::catalog::{PnlBucket, RubroCatalog};
use crate::domain::tree::{BucketTotals, Year};

/// The seven P&L accumulators for one dataset variant. Derived figures are
/// methods so they are recomputed from the base accumulators on every query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PnlStatement {
    pub ingresos_operacionales: f64,
    pub costos_indirectos: f64,
    pub costos_de_venta: f64,
    pub gastos_administrativos: f64,
    pub gastos_comerciales: f64,
    pub ingresos_no_operacionales: f64,
    pub gastos_no_operacionales: f64,
}

impl PnlStatement {
    /// Classifies every rubro total into its bucket. Rubros without a bucket
    /// (unrecognized or uncatalogued names) are excluded from all seven sums.
    pub fn from_buckets(buckets: &BucketTotals, catalog: &RubroCatalog) -> Self {
        let mut statement = PnlStatement::default();
        for (rubro, total) in buckets {
            if let Some(bucket) = catalog.bucket(*rubro) {
                statement.add(bucket, *total);
            }
        }
        statement
    }

    pub fn add(&mut self, bucket: PnlBucket, amount: f64) {
        match bucket {
            PnlBucket::IngresosOperacionales => self.ingresos_operacionales += amount,
            PnlBucket::CostosIndirectos => self.costos_indirectos += amount,
            PnlBucket::CostosDeVenta => self.costos_de_venta += amount,
            PnlBucket::GastosAdministrativos => self.gastos_administrativos += amount,
            PnlBucket::GastosComerciales => self.gastos_comerciales += amount,
            PnlBucket::IngresosNoOperacionales => self.ingresos_no_operacionales += amount,
            PnlBucket::GastosNoOperacionales => self.gastos_no_operacionales += amount,
        }
    }

    pub fn costos_de_venta_e_indirectos(&self) -> f64 {
        self.costos_de_venta + self.costos_indirectos
    }

    pub fn utilidad_bruta(&self) -> f64 {
        self.ingresos_operacionales - self.costos_de_venta - self.costos_indirectos
    }

    pub fn utilidad_operacional(&self) -> f64 {
        self.utilidad_bruta() - self.gastos_administrativos - self.gastos_comerciales
    }

    pub fn utilidad_antes_impuesto(&self) -> f64 {
        self.utilidad_operacional() + self.ingresos_no_operacionales - self.gastos_no_operacionales
    }
}

/// Projected and actual statements for one year, classified under the same
/// rules so categories line up 1:1 for variance computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PnlComparison {
    pub year: Year,
    pub proyectado: PnlStatement,
    pub actualizado: PnlStatement,
}
