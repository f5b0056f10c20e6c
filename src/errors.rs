use thiserror::Error;

use crate::domain::tree::Year;

pub type EngineResult<T> = Result<T, EngineError>;

/// Error type that captures the engine's few hard failure modes.
///
/// Missing tree structure is never an error (sparse trees contribute zero);
/// only malformed configuration and undecodable payloads surface here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("allocation table for year {year} is invalid: {detail}")]
    InvalidAllocation { year: Year, detail: String },
    #[error("payload decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
