//! Business units (UENs) of the organisation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Zone within `Unidades de Apoyo` whose overhead is allocated under the
/// national percentage policy; every other zone falls under the
/// non-national policy.
pub const NACIONAL: &str = "Nacional";

/// An operating division or the shared-overhead division.
///
/// `UnidadesDeApoyo` never appears in consolidated output directly; its
/// figures reach the reports only through cost allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Uen {
    Constructora,
    Promotora,
    Inmobiliaria,
    UnidadesDeApoyo,
}

impl Uen {
    /// The three operating units, in reporting order.
    pub const OPERATING: [Uen; 3] = [Uen::Constructora, Uen::Promotora, Uen::Inmobiliaria];

    /// The unit's name as it appears in backend payloads.
    pub fn name(self) -> &'static str {
        match self {
            Uen::Constructora => "Constructora",
            Uen::Promotora => "Promotora",
            Uen::Inmobiliaria => "Inmobiliaria",
            Uen::UnidadesDeApoyo => "Unidades de Apoyo",
        }
    }

    /// Strict-equality lookup by payload name.
    pub fn from_name(name: &str) -> Option<Uen> {
        match name {
            "Constructora" => Some(Uen::Constructora),
            "Promotora" => Some(Uen::Promotora),
            "Inmobiliaria" => Some(Uen::Inmobiliaria),
            "Unidades de Apoyo" => Some(Uen::UnidadesDeApoyo),
            _ => None,
        }
    }

    pub fn is_operating(self) -> bool {
        !matches!(self, Uen::UnidadesDeApoyo)
    }
}

impl fmt::Display for Uen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
