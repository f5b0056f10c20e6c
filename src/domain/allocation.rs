//! Year-keyed cost-allocation configuration, injected by the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::tree::Year;
use crate::domain::uen::Uen;
use crate::errors::{EngineError, EngineResult};

/// Allocation fractions for one year: a national split and a non-national
/// split, one fraction per operating unit. The two tiers are independent
/// business policies; fractions are applied as configured and are not
/// required to sum to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllocationRates {
    pub nacional_constructora: f64,
    pub nacional_promotora: f64,
    pub nacional_inmobiliaria: f64,
    pub diferente_nacional_constructora: f64,
    pub diferente_nacional_promotora: f64,
    pub diferente_nacional_inmobiliaria: f64,
}

impl AllocationRates {
    pub const ZERO: AllocationRates = AllocationRates {
        nacional_constructora: 0.0,
        nacional_promotora: 0.0,
        nacional_inmobiliaria: 0.0,
        diferente_nacional_constructora: 0.0,
        diferente_nacional_promotora: 0.0,
        diferente_nacional_inmobiliaria: 0.0,
    };

    /// Fraction of the national zone's overhead assigned to `uen`.
    pub fn nacional(&self, uen: Uen) -> f64 {
        match uen {
            Uen::Constructora => self.nacional_constructora,
            Uen::Promotora => self.nacional_promotora,
            Uen::Inmobiliaria => self.nacional_inmobiliaria,
            Uen::UnidadesDeApoyo => 0.0,
        }
    }

    /// Fraction of each non-national zone's overhead assigned to `uen`.
    pub fn diferente_nacional(&self, uen: Uen) -> f64 {
        match uen {
            Uen::Constructora => self.diferente_nacional_constructora,
            Uen::Promotora => self.diferente_nacional_promotora,
            Uen::Inmobiliaria => self.diferente_nacional_inmobiliaria,
            Uen::UnidadesDeApoyo => 0.0,
        }
    }

    fn validate(&self, year: Year) -> EngineResult<()> {
        let fractions = [
            ("nacionalConstructora", self.nacional_constructora),
            ("nacionalPromotora", self.nacional_promotora),
            ("nacionalInmobiliaria", self.nacional_inmobiliaria),
            (
                "diferenteNacionalConstructora",
                self.diferente_nacional_constructora,
            ),
            (
                "diferenteNacionalPromotora",
                self.diferente_nacional_promotora,
            ),
            (
                "diferenteNacionalInmobiliaria",
                self.diferente_nacional_inmobiliaria,
            ),
        ];
        for (name, value) in fractions {
            if !value.is_finite() {
                return Err(EngineError::InvalidAllocation {
                    year,
                    detail: format!("{name} is not a finite number ({value})"),
                });
            }
        }
        Ok(())
    }
}

/// Per-year allocation rates. A year with no entry yields all-zero fractions,
/// dropping the shared unit's contribution for that year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationTable(pub BTreeMap<Year, AllocationRates>);

impl AllocationTable {
    /// Decodes the table from the caller's JSON configuration.
    pub fn from_json(value: serde_json::Value) -> EngineResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn rates(&self, year: Year) -> Option<&AllocationRates> {
        self.0.get(&year)
    }

    /// Rejects any configured year whose fractions are not all finite.
    pub fn validate(&self) -> EngineResult<()> {
        for (year, rates) in &self.0 {
            rates.validate(*year)?;
        }
        Ok(())
    }
}
