//! Parent/child relations, cycle checks and cascading destruction

use super::Scene;
use crate::error::SceneError;
use crate::foundation::collections::NodeId;

impl Scene {
    /// Attach `child` under `parent`, moving it from its old parent if needed
    ///
    /// The child is appended after any existing children. Fails without
    /// changing anything if either node is gone, if `child == parent`, if the
    /// child is already directly under `parent`, or if `parent` lies inside the
    /// subtree of `child`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::InvalidNode(parent));
        }
        let old_parent = self.nodes.get(child).ok_or(SceneError::InvalidNode(child))?.parent;
        if parent == child {
            return Err(SceneError::SelfReference(child));
        }
        if old_parent == Some(parent) {
            return Err(SceneError::AlreadyChild { parent, child });
        }
        // A leaf cannot have `parent` below it.
        if !self.nodes[child].children.is_empty() && self.is_descendant(parent, child) {
            return Err(SceneError::CycleDetected { parent, child });
        }

        if let Some(old_parent) = old_parent {
            self.unlink_child(old_parent, child);
            log::trace!("Reparenting node {:?} from {:?} to {:?}", child, old_parent, parent);
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        log::trace!("Attached node {:?} under {:?}", child, parent);
        Ok(())
    }

    /// Detach a direct child, turning it into a root that survives on its own
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::InvalidNode(parent));
        }
        if self.unlink_child(parent, child) {
            log::trace!("Detached node {:?} from {:?}", child, parent);
            Ok(())
        } else {
            Err(SceneError::NotAChild { parent, child })
        }
    }

    fn unlink_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(data) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(index) = data.children.iter().position(|&c| c == child) else {
            return false;
        };
        data.children.remove(index);
        if let Some(child) = self.nodes.get_mut(child) {
            child.parent = None;
        }
        true
    }

    /// Whether `node` lies in the subtree rooted at `ancestor`
    ///
    /// A node counts as part of its own subtree.
    pub fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        if !self.nodes.contains_key(ancestor) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|data| data.parent);
        }
        false
    }

    /// Parent of the node; `None` for roots and gone nodes
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|data| data.parent)
    }

    /// Walk the parent chain upwards, starting with the direct parent
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            scene: self,
            next: self.parent(node),
        }
    }

    /// Children in attachment order; empty for gone nodes
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|data| data.children.as_slice())
            .unwrap_or_default()
    }

    /// Number of direct children
    pub fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    /// Whether the node has no children
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.children(node).is_empty()
    }

    /// Child at `index` in attachment order
    ///
    /// # Panics
    ///
    /// Panics if `node` is gone or `index` is out of range, like slice indexing.
    pub fn child(&self, node: NodeId, index: usize) -> NodeId {
        self.nodes[node].children[index]
    }

    /// First direct child whose name equals `name`
    pub fn child_by_name(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&child| self.nodes.get(child).is_some_and(|data| data.name == name))
    }

    /// Destroy a node together with its components and whole subtree
    ///
    /// The node is detached from its parent first. Returns `false` if the node
    /// was already gone. Handles to anything destroyed here report the object
    /// as gone afterwards.
    pub fn destroy_node(&mut self, node: NodeId) -> bool {
        if !self.nodes.contains_key(node) {
            return false;
        }
        if let Some(parent) = self.nodes[node].parent {
            self.unlink_child(parent, node);
        }

        // Pre-order collection; reversed it visits every child before its parent.
        let mut pending = vec![node];
        let mut order = Vec::new();
        while let Some(id) = pending.pop() {
            if let Some(data) = self.nodes.get(id) {
                pending.extend(data.children.iter().copied());
                order.push(id);
            }
        }

        let mut destroyed_behaviors = 0usize;
        for &id in order.iter().rev() {
            let Some(data) = self.nodes.remove(id) else {
                continue;
            };
            for behavior in data.components.into_values() {
                if self.behaviors.remove(behavior).is_some() {
                    destroyed_behaviors += 1;
                }
            }
        }
        log::debug!(
            "Destroyed node {:?} with {} node(s) and {} behavior(s) in total",
            node,
            order.len(),
            destroyed_behaviors
        );
        true
    }
}

/// Iterator over the ancestors of a node, nearest first
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    scene: &'a Scene,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.scene.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(scene: &mut Scene) -> (NodeId, NodeId, NodeId) {
        let a = scene.create_node("A");
        let b = scene.create_node("B");
        let c = scene.create_node("C");
        scene.add_child(a, b).unwrap();
        scene.add_child(b, c).unwrap();
        (a, b, c)
    }

    #[test]
    fn test_add_child_links_both_directions() {
        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let child = scene.create_node("child");

        assert!(scene.add_child(root, child).is_ok());
        assert_eq!(scene.parent(child), Some(root));
        assert_eq!(scene.children(root), &[child]);
        assert_eq!(scene.child_count(root), 1);
        assert!(!scene.is_leaf(root));
        assert!(scene.is_leaf(child));
    }

    #[test]
    fn test_children_keep_attachment_order() {
        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let kids: Vec<_> = (0..4).map(|i| scene.create_node(format!("kid{i}"))).collect();
        for &kid in &kids {
            scene.add_child(root, kid).unwrap();
        }

        assert_eq!(scene.children(root), kids.as_slice());
        assert_eq!(scene.child(root, 2), kids[2]);
    }

    #[test]
    fn test_invalid_references_rejected() {
        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let child = scene.create_node("child");

        assert_eq!(scene.add_child(root, root), Err(SceneError::SelfReference(root)));

        scene.add_child(root, child).unwrap();
        assert_eq!(
            scene.add_child(root, child),
            Err(SceneError::AlreadyChild { parent: root, child })
        );
        assert_eq!(scene.children(root), &[child]);

        let gone = scene.create_node("gone");
        scene.destroy_node(gone);
        assert_eq!(scene.add_child(root, gone), Err(SceneError::InvalidNode(gone)));
        assert_eq!(scene.add_child(gone, child), Err(SceneError::InvalidNode(gone)));
    }

    #[test]
    fn test_cycle_through_root_rejected() {
        let mut scene = Scene::new();
        let (a, b, c) = chain(&mut scene);

        assert_eq!(
            scene.add_child(c, a),
            Err(SceneError::CycleDetected { parent: c, child: a })
        );
        assert_eq!(scene.parent(a), None);
        assert!(scene.is_leaf(c));
        assert_eq!(scene.parent(b), Some(a));
    }

    #[test]
    fn test_cycle_through_attached_child_rejected() {
        let mut scene = Scene::new();
        let (a, b, c) = chain(&mut scene);
        let d = scene.create_node("D");
        scene.add_child(c, d).unwrap();

        assert!(matches!(scene.add_child(d, b), Err(SceneError::CycleDetected { .. })));
        assert_eq!(scene.parent(b), Some(a));
        assert_eq!(scene.children(a), &[b]);
        assert!(scene.is_leaf(d));
    }

    #[test]
    fn test_reparenting_moves_child_and_reports_success() {
        let mut scene = Scene::new();
        let first = scene.create_node("first");
        let second = scene.create_node("second");
        let child = scene.create_node("child");
        scene.add_child(first, child).unwrap();

        assert_eq!(scene.add_child(second, child), Ok(()));
        assert_eq!(scene.parent(child), Some(second));
        assert!(scene.is_leaf(first));
        assert_eq!(scene.children(second), &[child]);
    }

    #[test]
    fn test_remove_child_keeps_subtree_alive() {
        let mut scene = Scene::new();
        let (a, b, c) = chain(&mut scene);

        assert!(scene.remove_child(a, b).is_ok());
        assert_eq!(scene.parent(b), None);
        assert!(scene.is_leaf(a));
        assert_eq!(scene.parent(c), Some(b));
        assert_eq!(
            scene.remove_child(a, b),
            Err(SceneError::NotAChild { parent: a, child: b })
        );
    }

    #[test]
    fn test_is_descendant() {
        let mut scene = Scene::new();
        let (a, b, c) = chain(&mut scene);
        let other = scene.create_node("other");

        assert!(scene.is_descendant(c, a));
        assert!(scene.is_descendant(b, b));
        assert!(!scene.is_descendant(a, c));
        assert!(!scene.is_descendant(other, a));
        assert_eq!(scene.ancestors(c).collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn test_child_by_name_returns_first_match() {
        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let first = scene.create_node("twin");
        let second = scene.create_node("twin");
        scene.add_child(root, first).unwrap();
        scene.add_child(root, second).unwrap();

        assert_eq!(scene.child_by_name(root, "twin"), Some(first));
        assert_eq!(scene.child_by_name(root, "nobody"), None);
    }

    #[test]
    #[should_panic]
    fn test_child_index_out_of_range_panics() {
        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let _ = scene.child(root, 0);
    }

    #[test]
    fn test_destroy_detaches_from_parent() {
        let mut scene = Scene::new();
        let (a, b, c) = chain(&mut scene);

        assert!(scene.destroy_node(b));
        assert!(scene.is_leaf(a));
        assert!(!scene.contains_node(b));
        assert!(!scene.contains_node(c));
        assert_eq!(scene.parent(c), None);
        assert_eq!(scene.node_count(), 1);
        assert!(!scene.destroy_node(b));
    }

    #[test]
    fn test_destroy_deep_chain_without_recursion() {
        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let mut tip = root;
        for _ in 0..50_000 {
            let next = scene.create_node("");
            scene.add_child(tip, next).unwrap();
            tip = next;
        }

        assert!(scene.destroy_node(root));
        assert_eq!(scene.node_count(), 0);
        assert!(!scene.contains_node(tip));
    }
}
