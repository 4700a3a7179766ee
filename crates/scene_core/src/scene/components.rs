//! Type-keyed component registry of a node

use super::Scene;
use crate::behavior::{Behavior, BehaviorKind};
use crate::error::SceneError;
use crate::foundation::collections::{BehaviorId, NodeId};

impl Scene {
    /// Attach a detached behavior to `node`
    ///
    /// Fails, leaving the behavior detached and owned by the caller, when the
    /// behavior already has an owner (this node included) or when the node
    /// already holds a component of the same concrete type.
    pub fn add_component(
        &mut self,
        node: NodeId,
        behavior: BehaviorId,
    ) -> Result<(), SceneError> {
        let data = self.nodes.get(node).ok_or(SceneError::InvalidNode(node))?;
        let slot = self
            .behaviors
            .get(behavior)
            .ok_or(SceneError::InvalidBehavior(behavior))?;
        if let Some(owner) = slot.owner {
            return Err(SceneError::BehaviorAlreadyAttached { owner });
        }
        let kind = slot.kind;
        if data.components.contains_key(&kind) {
            return Err(SceneError::DuplicateKind { node, kind });
        }

        self.nodes[node].components.insert(kind, behavior);
        self.behaviors[behavior].owner = Some(node);
        log::trace!("Attached {} behavior {:?} to node {:?}", kind, behavior, node);
        Ok(())
    }

    /// Detach `behavior` from `node`, handing it back to the caller
    ///
    /// Only succeeds if `behavior` is exactly the instance stored on the node
    /// for its kind. The behavior stays alive in the scene, detached.
    pub fn remove_component(
        &mut self,
        node: NodeId,
        behavior: BehaviorId,
    ) -> Result<(), SceneError> {
        let kind = self
            .behaviors
            .get(behavior)
            .map(|slot| slot.kind)
            .ok_or(SceneError::InvalidBehavior(behavior))?;
        let data = self.nodes.get_mut(node).ok_or(SceneError::InvalidNode(node))?;
        if data.components.get(&kind) != Some(&behavior) {
            return Err(SceneError::ComponentNotFound { node, behavior });
        }

        data.components.remove(&kind);
        self.behaviors[behavior].owner = None;
        log::trace!("Detached {} behavior {:?} from node {:?}", kind, behavior, node);
        Ok(())
    }

    /// Handle of the node's component of type `T`
    pub fn component_id<T: Behavior>(&self, node: NodeId) -> Option<BehaviorId> {
        self.component_id_of(node, BehaviorKind::of::<T>())
    }

    /// Handle of the node's component of the given kind
    pub fn component_id_of(&self, node: NodeId, kind: BehaviorKind) -> Option<BehaviorId> {
        self.nodes.get(node)?.components.get(&kind).copied()
    }

    /// Borrow the node's component of type `T`
    pub fn component<T: Behavior>(&self, node: NodeId) -> Option<&T> {
        self.behavior::<T>(self.component_id::<T>(node)?)
    }

    /// Mutably borrow the node's component of type `T`
    pub fn component_mut<T: Behavior>(&mut self, node: NodeId) -> Option<&mut T> {
        let id = self.component_id::<T>(node)?;
        self.behavior_mut::<T>(id)
    }

    /// Whether the node holds a component of type `T`
    pub fn has_component<T: Behavior>(&self, node: NodeId) -> bool {
        self.component_id::<T>(node).is_some()
    }

    /// All components of the node with their kinds, in no particular order
    pub fn components(
        &self,
        node: NodeId,
    ) -> impl Iterator<Item = (BehaviorKind, BehaviorId)> + '_ {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|data| data.components.iter().map(|(&kind, &id)| (kind, id)))
    }

    /// Number of components on the node
    pub fn component_count(&self, node: NodeId) -> usize {
        self.nodes.get(node).map_or(0, |data| data.components.len())
    }
}
