use generational_arena::Arena;
use tracing::{debug, instrument, warn};

use crate::config::Settings;
use crate::domain::entities::{AttachPolicy, Vampire, VampireId};
use crate::domain::error::{DomainError, DomainResult};

/// Arena owning every vampire and hosting the lineage operations.
///
/// Creator and offspring links are stored as [`VampireId`] handles, so neither
/// side owns the other. A coven may contain several independent trees, one per
/// original.
#[derive(Debug, Clone)]
pub struct Coven {
    /// Arena storage for all vampires
    arena: Arena<Vampire>,
    policy: AttachPolicy,
    /// Label used when rendering vampires without a name
    unnamed_label: String,
}

impl Default for Coven {
    fn default() -> Self {
        Self::new()
    }
}

impl Coven {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            arena: Arena::new(),
            policy: settings.attach_policy,
            unnamed_label: settings.unnamed_label.clone(),
        }
    }

    pub fn with_policy(policy: AttachPolicy) -> Self {
        Self {
            policy,
            ..Self::new()
        }
    }

    pub fn policy(&self) -> AttachPolicy {
        self.policy
    }

    pub fn unnamed_label(&self) -> &str {
        &self.unnamed_label
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Creates a standalone vampire: an original with no offspring.
    #[instrument(level = "debug", skip(self))]
    pub fn spawn(&mut self, name: Option<&str>) -> VampireId {
        let id = VampireId(self.arena.insert(Vampire::new(name)));
        debug!(%id, "spawned");
        id
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: VampireId) -> DomainResult<&Vampire> {
        self.arena
            .get(id.index())
            .ok_or(DomainError::UnknownVampire(id))
    }

    fn get_mut(&mut self, id: VampireId) -> DomainResult<&mut Vampire> {
        self.arena
            .get_mut(id.index())
            .ok_or(DomainError::UnknownVampire(id))
    }

    pub fn name(&self, id: VampireId) -> DomainResult<Option<&str>> {
        Ok(self.get(id)?.name())
    }

    pub fn creator(&self, id: VampireId) -> DomainResult<Option<VampireId>> {
        Ok(self.get(id)?.creator())
    }

    pub fn offspring(&self, id: VampireId) -> DomainResult<&[VampireId]> {
        Ok(self.get(id)?.offspring())
    }

    /// All vampires in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (VampireId, &Vampire)> {
        self.arena.iter().map(|(idx, vampire)| (VampireId(idx), vampire))
    }

    /// Vampires without a creator, in spawn order.
    pub fn originals(&self) -> Vec<VampireId> {
        self.iter()
            .filter(|(_, vampire)| vampire.is_original())
            .map(|(id, _)| id)
            .collect()
    }

    /// Makes `child` an offspring of `parent`.
    ///
    /// Under [`AttachPolicy::Strict`] the child must still be an original and
    /// must not be an ancestor-or-self of `parent`. Under
    /// [`AttachPolicy::Permissive`] an existing creator is overwritten.
    #[instrument(level = "debug", skip(self))]
    pub fn add_offspring(&mut self, parent: VampireId, child: VampireId) -> DomainResult<()> {
        self.get(parent)?;
        let previous = self.get(child)?.creator();

        match (self.policy, previous) {
            (AttachPolicy::Strict, Some(creator)) => {
                return Err(DomainError::AlreadyCreated {
                    vampire: child,
                    creator,
                });
            }
            (AttachPolicy::Strict, None) => {
                // a childless original can only close a cycle with itself
                let closes_cycle = if self.get(child)?.offspring().is_empty() {
                    parent == child
                } else {
                    self.lineage(parent)?.contains(&child)
                };
                if closes_cycle {
                    return Err(DomainError::CycleDetected(child));
                }
            }
            (AttachPolicy::Permissive, Some(creator)) => {
                warn!(%child, %creator, %parent, "overwriting creator");
            }
            (AttachPolicy::Permissive, None) => {}
        }

        self.get_mut(parent)?.push_offspring(child);
        self.get_mut(child)?.set_creator(parent);
        debug!(%parent, %child, "offspring added");
        Ok(())
    }

    /// Direct offspring count, not the subtree size.
    pub fn number_of_offspring(&self, id: VampireId) -> DomainResult<usize> {
        Ok(self.get(id)?.number_of_offspring())
    }

    /// Creator hops between `id` and its original. Originals are 0.
    #[instrument(level = "debug", skip(self))]
    pub fn number_of_vampires_from_original(&self, id: VampireId) -> DomainResult<usize> {
        Ok(self.lineage(id)?.len() - 1)
    }

    /// True iff `senior` is a strict ancestor of `junior`.
    #[instrument(level = "debug", skip(self))]
    pub fn is_more_senior_than(&self, senior: VampireId, junior: VampireId) -> DomainResult<bool> {
        self.get(senior)?;
        let lineage = self.lineage(junior)?;
        Ok(lineage[1..].contains(&senior))
    }

    /// Deepest vampire that is an ancestor-or-self of both `a` and `b`.
    ///
    /// Both lineages are compared from the original downwards; the last
    /// position where they still agree is the answer.
    #[instrument(level = "debug", skip(self))]
    pub fn closest_common_ancestor(&self, a: VampireId, b: VampireId) -> DomainResult<VampireId> {
        let mut left = self.lineage(a)?;
        let mut right = self.lineage(b)?;
        left.reverse();
        right.reverse();

        left.iter()
            .zip(right.iter())
            .take_while(|(l, r)| l == r)
            .last()
            .map(|(common, _)| *common)
            .ok_or(DomainError::NoCommonAncestor(a, b))
    }

    /// The original at the top of `id`'s lineage.
    pub fn original(&self, id: VampireId) -> DomainResult<VampireId> {
        Ok(self.lineage(id)?.last().copied().unwrap_or(id))
    }
}
