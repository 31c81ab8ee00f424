use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which catalog a failed lookup was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Foundation,
    Phase,
    Principle,
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::Foundation => write!(f, "harmonic foundation"),
            CatalogKind::Phase => write!(f, "solo phase"),
            CatalogKind::Principle => write!(f, "monk principle"),
        }
    }
}

/// Request-level failures. Both variants are deterministic input problems
/// and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoloError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: CatalogKind, id: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SoloError {
    pub fn not_found(kind: CatalogKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Stable machine-readable error kind used by the transports.
    pub fn kind(&self) -> &'static str {
        match self {
            SoloError::NotFound { .. } => "not_found",
            SoloError::InvalidArgument(_) => "invalid_argument",
        }
    }
}

pub type SoloResult<T> = Result<T, SoloError>;
