//! Rubro reference catalog: maps numeric indices to category names and
//! classifies each category into the P&L structure once, at load time.

use serde::{Deserialize, Serialize};

use crate::errors::EngineResult;
use crate::domain::tree::{RubroIndex, SubrubroIndex};

/// Historical display renames applied once when the catalog is loaded.
/// Presentation normalization only; classification runs on the renamed form.
const DISPLAY_ALIASES: [(&str, &str); 2] = [
    ("GASTOS OPERACIONALES DE ADMINISTRACION", "GASTOS ADMINISTRACION"),
    ("GASTOS OPERACIONALES DE COMERCIALIZACION", "GASTOS COMERCIALIZACION"),
];

/// Raw catalog entry as served by the backend, positionally indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubroDef {
    pub nombre: String,
    #[serde(default)]
    pub subrubros: Vec<SubrubroDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubrubroDef {
    pub nombre: String,
}

/// The seven P&L classification buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PnlBucket {
    IngresosOperacionales,
    CostosIndirectos,
    CostosDeVenta,
    GastosAdministrativos,
    GastosComerciales,
    IngresosNoOperacionales,
    GastosNoOperacionales,
}

impl PnlBucket {
    /// Exact-match classification on the catalog's (aliased) display name.
    /// Unrecognized names classify into no bucket.
    pub fn from_nombre(nombre: &str) -> Option<PnlBucket> {
        match nombre {
            "INGRESOS OPERACIONALES" => Some(PnlBucket::IngresosOperacionales),
            "COSTOS INDIRECTOS" => Some(PnlBucket::CostosIndirectos),
            "COSTOS DE VENTA" => Some(PnlBucket::CostosDeVenta),
            "GASTOS ADMINISTRACION" => Some(PnlBucket::GastosAdministrativos),
            "GASTOS COMERCIALIZACION" => Some(PnlBucket::GastosComerciales),
            "INGRESOS NO OPERACIONALES" => Some(PnlBucket::IngresosNoOperacionales),
            "GASTOS NO OPERACIONALES" => Some(PnlBucket::GastosNoOperacionales),
            _ => None,
        }
    }

    pub fn nombre(self) -> &'static str {
        match self {
            PnlBucket::IngresosOperacionales => "INGRESOS OPERACIONALES",
            PnlBucket::CostosIndirectos => "COSTOS INDIRECTOS",
            PnlBucket::CostosDeVenta => "COSTOS DE VENTA",
            PnlBucket::GastosAdministrativos => "GASTOS ADMINISTRACION",
            PnlBucket::GastosComerciales => "GASTOS COMERCIALIZACION",
            PnlBucket::IngresosNoOperacionales => "INGRESOS NO OPERACIONALES",
            PnlBucket::GastosNoOperacionales => "GASTOS NO OPERACIONALES",
        }
    }
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    nombre: String,
    bucket: Option<PnlBucket>,
    subrubros: Vec<String>,
}

/// Read-only rubro reference data, shared by every report in a session.
///
/// `load` produces a derived copy so the aliasing never touches the caller's
/// catalog payload.
#[derive(Debug, Clone)]
pub struct RubroCatalog {
    entries: Vec<CatalogEntry>,
}

impl RubroCatalog {
    /// Builds the session catalog: applies the display aliases and resolves
    /// each rubro's P&L bucket exactly once.
    pub fn load(defs: &[RubroDef]) -> Self {
        let entries = defs
            .iter()
            .map(|def| {
                let nombre = apply_alias(&def.nombre);
                let bucket = PnlBucket::from_nombre(&nombre);
                let subrubros = def.subrubros.iter().map(|s| s.nombre.clone()).collect();
                CatalogEntry {
                    nombre,
                    bucket,
                    subrubros,
                }
            })
            .collect();
        Self { entries }
    }

    /// Decodes and loads the catalog from the backend's JSON payload.
    pub fn from_json(value: serde_json::Value) -> EngineResult<Self> {
        let defs: Vec<RubroDef> = serde_json::from_value(value)?;
        Ok(Self::load(&defs))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rubro_name(&self, rubro: RubroIndex) -> Option<&str> {
        self.entries.get(rubro).map(|e| e.nombre.as_str())
    }

    /// Display label for a rubro, with a traceable placeholder when the
    /// catalog does not cover the index.
    pub fn rubro_label(&self, rubro: RubroIndex) -> String {
        match self.rubro_name(rubro) {
            Some(nombre) => nombre.to_string(),
            None => format!("SIN CATALOGO {rubro}"),
        }
    }

    pub fn bucket(&self, rubro: RubroIndex) -> Option<PnlBucket> {
        self.entries.get(rubro).and_then(|e| e.bucket)
    }

    /// Display label for a subrubro, with the same placeholder policy.
    pub fn subrubro_label(&self, rubro: RubroIndex, subrubro: SubrubroIndex) -> String {
        match self
            .entries
            .get(rubro)
            .and_then(|e| e.subrubros.get(subrubro))
        {
            Some(nombre) => nombre.clone(),
            None => format!("SIN CATALOGO {rubro}.{subrubro}"),
        }
    }
}

fn apply_alias(nombre: &str) -> String {
    for (from, to) in DISPLAY_ALIASES {
        if nombre == from {
            return to.to_string();
        }
    }
    nombre.to_string()
}
