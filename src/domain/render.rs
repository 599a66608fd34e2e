use std::collections::HashSet;

use termtree::Tree;
use tracing::instrument;

use crate::domain::coven::Coven;
use crate::domain::entities::{Vampire, VampireId};
use crate::domain::error::{DomainError, DomainResult};

/// Deepest generation `to_tree` will render below its root.
///
/// `termtree` formats and drops trees recursively, so the rendered tree must
/// stay shallow even though the walk building it does not recurse.
pub const MAX_RENDER_DEPTH: usize = 1024;

/// A vampire whose label is built and whose offspring are still pending.
type Frame = (Tree<String>, Vec<VampireId>);

impl Coven {
    /// Renders the subtree under `root`, e.g.
    ///
    /// ```text
    /// root
    /// ├── a
    /// └── b
    ///     └── h
    /// ```
    ///
    /// Fails with [`DomainError::TooDeep`] when a descendant lies more than
    /// [`MAX_RENDER_DEPTH`] generations below `root`.
    #[instrument(level = "debug", skip(self))]
    pub fn to_tree(&self, root: VampireId) -> DomainResult<Tree<String>> {
        let mut visited = HashSet::from([root]);
        let mut stack = vec![self.frame(root)?];
        let mut rendered = None;

        while let Some((_, pending)) = stack.last_mut() {
            if let Some(child) = pending.pop() {
                if !visited.insert(child) {
                    continue;
                }
                if stack.len() > MAX_RENDER_DEPTH {
                    return Err(DomainError::TooDeep {
                        vampire: child,
                        limit: MAX_RENDER_DEPTH,
                    });
                }
                stack.push(self.frame(child)?);
                continue;
            }

            // all offspring rendered, hand the finished subtree to its creator
            if let Some((tree, _)) = stack.pop() {
                match stack.last_mut() {
                    Some((parent, _)) => {
                        parent.push(tree);
                    }
                    None => rendered = Some(tree),
                }
            }
        }

        rendered.ok_or(DomainError::UnknownVampire(root))
    }

    fn frame(&self, id: VampireId) -> DomainResult<Frame> {
        let vampire = self.get(id)?;
        // reversed so that pop() yields offspring left to right
        let pending = vampire.offspring().iter().rev().copied().collect();
        Ok((Tree::new(self.label(vampire)), pending))
    }

    /// Display label: the name, or the configured placeholder.
    pub fn label(&self, vampire: &Vampire) -> String {
        vampire
            .name()
            .unwrap_or_else(|| self.unnamed_label())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(coven: &mut Coven, length: usize) -> Vec<VampireId> {
        let mut chain = vec![coven.spawn(Some("root"))];
        for _ in 1..length {
            let child = coven.spawn(None);
            let parent = chain[chain.len() - 1];
            coven.add_offspring(parent, child).unwrap();
            chain.push(child);
        }
        chain
    }

    #[test]
    fn given_small_tree_when_rendering_then_lists_every_vampire() {
        let mut coven = Coven::new();
        let root = coven.spawn(Some("root"));
        let a = coven.spawn(Some("a"));
        let b = coven.spawn(None);
        coven.add_offspring(root, a).unwrap();
        coven.add_offspring(root, b).unwrap();

        let rendered = coven.to_tree(root).unwrap().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "root");
        assert!(lines[1].ends_with("a"));
        assert!(lines[2].ends_with("<unnamed>"));
    }

    #[test]
    fn given_nested_tree_when_rendering_then_children_follow_their_creator() {
        let mut coven = Coven::new();
        let [root, a, b, h] = ["root", "a", "b", "h"].map(|name| coven.spawn(Some(name)));
        coven.add_offspring(root, a).unwrap();
        coven.add_offspring(root, b).unwrap();
        coven.add_offspring(b, h).unwrap();

        let rendered = coven.to_tree(root).unwrap().to_string();
        let labels: Vec<&str> = rendered
            .lines()
            .map(|line| line.rsplit(' ').next().unwrap_or(line))
            .collect();

        assert_eq!(labels, vec!["root", "a", "b", "h"]);
    }

    #[test]
    fn given_chain_at_depth_limit_when_rendering_then_renders_all() {
        let mut coven = Coven::new();
        let chain = chain(&mut coven, MAX_RENDER_DEPTH + 1);

        let tree = coven.to_tree(chain[0]).unwrap();

        assert_eq!(tree.to_string().lines().count(), MAX_RENDER_DEPTH + 1);
    }

    #[test]
    fn given_very_deep_chain_when_rendering_then_too_deep_instead_of_overflow() {
        let mut coven = Coven::with_policy(crate::domain::AttachPolicy::Permissive);
        let chain = chain(&mut coven, 200_000);

        let result = coven.to_tree(chain[0]);

        assert_eq!(
            result.err(),
            Some(DomainError::TooDeep {
                vampire: chain[MAX_RENDER_DEPTH + 1],
                limit: MAX_RENDER_DEPTH
            })
        );
        // a shallow subtree of the same chain still renders
        let near_leaf = chain[chain.len() - 3];
        assert_eq!(coven.to_tree(near_leaf).unwrap().to_string().lines().count(), 3);
        assert_eq!(
            coven.number_of_vampires_from_original(chain[chain.len() - 1]).unwrap(),
            199_999
        );
    }
}
