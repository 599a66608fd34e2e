//! Domain entities: core data structures

use std::fmt;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

/// Handle to a vampire stored in a [`Coven`](crate::domain::Coven).
///
/// Handles are non-owning and `Copy`. A handle is only meaningful for the coven
/// that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VampireId(pub(crate) Index);

impl VampireId {
    pub(crate) fn index(self) -> Index {
        self.0
    }
}

impl fmt::Display for VampireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "vampire#{}.{}", slot, generation)
    }
}

/// A node of the lineage tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vampire {
    name: Option<String>,
    creator: Option<VampireId>,
    offspring: Vec<VampireId>,
}

impl Vampire {
    pub(crate) fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            creator: None,
            offspring: Vec::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Creator of this vampire, `None` for an original.
    pub fn creator(&self) -> Option<VampireId> {
        self.creator
    }

    /// Direct offspring in the order they were added.
    pub fn offspring(&self) -> &[VampireId] {
        &self.offspring
    }

    pub fn number_of_offspring(&self) -> usize {
        self.offspring.len()
    }

    pub fn is_original(&self) -> bool {
        self.creator.is_none()
    }

    pub(crate) fn set_creator(&mut self, creator: VampireId) {
        self.creator = Some(creator);
    }

    pub(crate) fn push_offspring(&mut self, child: VampireId) {
        self.offspring.push(child);
    }
}

/// How [`Coven::add_offspring`](crate::domain::Coven::add_offspring) treats
/// attachments that would break the tree shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachPolicy {
    /// Reject double attachment and cycles.
    ///
    /// Attaching a childless vampire is constant time. Attaching one that
    /// already has offspring walks the new creator's lineage, so it costs time
    /// proportional to the creator's generation depth.
    #[default]
    Strict,
    /// Overwrite the creator and append; shape errors surface during traversal.
    Permissive,
}

impl AttachPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachPolicy::Strict => "strict",
            AttachPolicy::Permissive => "permissive",
        }
    }
}

impl fmt::Display for AttachPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
