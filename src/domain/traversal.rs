//! Upward (lineage) and downward (descendant) walks over a coven.
//!
//! Both walks are iterative. Upward walks are bounded by the coven size, which
//! no well-formed lineage can exceed; downward walks never revisit a vampire.

use std::collections::HashSet;

use tracing::instrument;

use crate::domain::coven::Coven;
use crate::domain::entities::{Vampire, VampireId};
use crate::domain::error::{DomainError, DomainResult};

impl Coven {
    /// `id` followed by its creator, the creator's creator, and so on up to
    /// the original.
    #[instrument(level = "trace", skip(self))]
    pub fn lineage(&self, id: VampireId) -> DomainResult<Vec<VampireId>> {
        let mut lineage = vec![id];
        let mut current = self.get(id)?;

        while let Some(creator) = current.creator() {
            if lineage.len() >= self.len() {
                return Err(DomainError::CycleDetected(creator));
            }
            lineage.push(creator);
            current = self.get(creator)?;
        }

        Ok(lineage)
    }

    /// Pre-order walk over everything below `id`, offspring left to right.
    #[instrument(level = "trace", skip(self))]
    pub fn descendants(&self, id: VampireId) -> DomainResult<Descendants<'_>> {
        let vampire = self.get(id)?;
        Ok(Descendants::new(self, id, vampire))
    }

    /// Size of the subtree below `id`, excluding `id` itself.
    #[instrument(level = "debug", skip(self))]
    pub fn total_descendants(&self, id: VampireId) -> DomainResult<usize> {
        Ok(self.descendants(id)?.count())
    }

    /// First vampire called `name` in pre-order over `id` and its descendants.
    #[instrument(level = "debug", skip(self))]
    pub fn vampire_with_name(&self, id: VampireId, name: &str) -> DomainResult<Option<VampireId>> {
        if self.get(id)?.name() == Some(name) {
            return Ok(Some(id));
        }
        Ok(self
            .descendants(id)?
            .find(|(_, vampire)| vampire.name() == Some(name))
            .map(|(found, _)| found))
    }
}

/// Pre-order iterator over a vampire's descendants, see [`Coven::descendants`].
pub struct Descendants<'a> {
    coven: &'a Coven,
    stack: Vec<VampireId>,
    visited: HashSet<VampireId>,
}

impl<'a> Descendants<'a> {
    fn new(coven: &'a Coven, start: VampireId, vampire: &'a Vampire) -> Self {
        // Push children in reverse order for left-to-right traversal
        let stack = vampire.offspring().iter().rev().copied().collect();
        let visited = HashSet::from([start]);
        Self {
            coven,
            stack,
            visited,
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (VampireId, &'a Vampire);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if !self.visited.insert(current) {
                continue;
            }
            if let Ok(vampire) = self.coven.get(current) {
                self.stack.extend(vampire.offspring().iter().rev().copied());
                return Some((current, vampire));
            }
        }
        None
    }
}
