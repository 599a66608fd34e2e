//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::VampireId;

/// Domain errors represent violations of the lineage tree structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown vampire: {0}")]
    UnknownVampire(VampireId),

    #[error("{vampire} was already created by {creator}")]
    AlreadyCreated {
        vampire: VampireId,
        creator: VampireId,
    },

    #[error("cycle detected in lineage at: {0}")]
    CycleDetected(VampireId),

    #[error("{vampire} lies more than {limit} generations below the rendered root")]
    TooDeep { vampire: VampireId, limit: usize },

    #[error("no common ancestor between {0} and {1}")]
    NoCommonAncestor(VampireId, VampireId),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
