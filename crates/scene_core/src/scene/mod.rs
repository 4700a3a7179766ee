//! Scene graph
//!
//! A [`Scene`] is the arena that owns every node and every behavior. Nodes form
//! a forest: each node has at most one parent and an ordered list of children,
//! and holds at most one behavior per concrete type.
//!
//! ## Ownership
//!
//! ```text
//! Scene ──owns──> nodes      (parent / children are keys)
//!       ──owns──> behaviors  (owner is a key)
//! ```
//!
//! A node without a parent is a root and is owned by whoever created it; a
//! behavior without an owner is detached and likewise belongs to its creator.
//! Attaching hands that responsibility to the new parent/owner, and destroying
//! a node destroys everything it owns. Handles to destroyed objects stay safe
//! to use and simply report the object as gone.
//!
//! ## Frame dispatch
//!
//! The driver calls [`Scene::update`] and then [`Scene::render`] on a root once
//! per frame. Disabled nodes cut off their whole subtree for that frame.

mod components;
mod dispatch;
mod hierarchy;
mod node;


pub use hierarchy::Ancestors;

use crate::behavior::{Behavior, BehaviorAny, BehaviorKind};
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::foundation::collections::{BehaviorArena, BehaviorId, NodeArena, NodeId};
use node::{BehaviorSlot, NodeData};
use std::fmt;

/// Arena owning a hierarchy of nodes and the behaviors attached to them
pub struct Scene {
    nodes: NodeArena<NodeData>,
    behaviors: BehaviorArena<BehaviorSlot>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::with_key(),
            behaviors: BehaviorArena::with_key(),
        }
    }

    /// Create an empty scene with arenas sized from `config`
    pub fn with_config(config: &SceneConfig) -> Self {
        Self {
            nodes: NodeArena::with_capacity_and_key(config.node_capacity),
            behaviors: BehaviorArena::with_capacity_and_key(config.behavior_capacity),
        }
    }

    /// Create a scene holding a single root node named after `config.root_name`
    pub fn with_root(config: &SceneConfig) -> (Self, NodeId) {
        let mut scene = Self::with_config(config);
        let root = scene.create_node(config.root_name.clone());
        (scene, root)
    }

    // ---------------------------------------------------------------------
    // Nodes
    // ---------------------------------------------------------------------

    /// Create a detached root node
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.nodes.insert(NodeData::new(name.into()));
        log::trace!("Created node {:?} '{}'", id, self.nodes[id].name);
        id
    }

    /// Whether `node` names a live node
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Name of the node, or `None` if it is gone
    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|data| data.name.as_str())
    }

    /// Rename a node
    pub fn set_name(&mut self, node: NodeId, name: impl Into<String>) -> Result<(), SceneError> {
        let data = self.nodes.get_mut(node).ok_or(SceneError::InvalidNode(node))?;
        data.name = name.into();
        Ok(())
    }

    /// Whether the node itself is enabled; `false` for unknown nodes
    pub fn is_enabled(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|data| data.enabled)
    }

    /// Enable or disable a node and, for dispatch purposes, its subtree
    pub fn set_enabled(&mut self, node: NodeId, enabled: bool) -> Result<(), SceneError> {
        let data = self.nodes.get_mut(node).ok_or(SceneError::InvalidNode(node))?;
        data.enabled = enabled;
        Ok(())
    }

    /// Whether the node and every ancestor are enabled
    pub fn is_active_in_hierarchy(&self, node: NodeId) -> bool {
        self.is_enabled(node) && self.ancestors(node).all(|ancestor| self.is_enabled(ancestor))
    }

    /// Iterate over all nodes that have no parent
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
    }

    // ---------------------------------------------------------------------
    // Behaviors
    // ---------------------------------------------------------------------

    /// Store a detached behavior
    pub fn create_behavior<B: Behavior>(&mut self, behavior: B) -> BehaviorId {
        self.insert_behavior(Box::new(behavior))
    }

    /// Store an already boxed detached behavior
    pub fn insert_behavior(&mut self, behavior: Box<dyn Behavior>) -> BehaviorId {
        let id = self.behaviors.insert(BehaviorSlot::new(behavior));
        log::trace!("Created behavior {:?} of kind {}", id, self.behaviors[id].kind);
        id
    }

    /// Whether `behavior` names a live behavior
    pub fn contains_behavior(&self, behavior: BehaviorId) -> bool {
        self.behaviors.contains_key(behavior)
    }

    /// Number of live behaviors, attached or not
    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    /// Node currently owning the behavior; `None` if detached or gone
    pub fn behavior_owner(&self, behavior: BehaviorId) -> Option<NodeId> {
        self.behaviors.get(behavior).and_then(|slot| slot.owner)
    }

    /// Concrete kind of a stored behavior
    pub fn behavior_kind(&self, behavior: BehaviorId) -> Option<BehaviorKind> {
        self.behaviors.get(behavior).map(|slot| slot.kind)
    }

    /// Whether the behavior is enabled; `false` for unknown behaviors
    pub fn is_behavior_enabled(&self, behavior: BehaviorId) -> bool {
        self.behaviors.get(behavior).is_some_and(|slot| slot.enabled)
    }

    /// Toggle dispatch to a behavior without touching its attachment
    pub fn set_behavior_enabled(
        &mut self,
        behavior: BehaviorId,
        enabled: bool,
    ) -> Result<(), SceneError> {
        let slot = self
            .behaviors
            .get_mut(behavior)
            .ok_or(SceneError::InvalidBehavior(behavior))?;
        slot.enabled = enabled;
        Ok(())
    }

    /// Borrow a behavior as its concrete type
    pub fn behavior<T: Behavior>(&self, behavior: BehaviorId) -> Option<&T> {
        self.behaviors
            .get(behavior)?
            .behavior
            .as_deref()?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Mutably borrow a behavior as its concrete type
    pub fn behavior_mut<T: Behavior>(&mut self, behavior: BehaviorId) -> Option<&mut T> {
        self.behaviors
            .get_mut(behavior)?
            .behavior
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Move a detached behavior out of the scene
    ///
    /// Attached behaviors must be removed from their node first.
    pub fn take_behavior(&mut self, behavior: BehaviorId) -> Result<Box<dyn Behavior>, SceneError> {
        let slot = self
            .behaviors
            .get(behavior)
            .ok_or(SceneError::InvalidBehavior(behavior))?;
        if let Some(owner) = slot.owner {
            return Err(SceneError::BehaviorAlreadyAttached { owner });
        }
        self.behaviors
            .remove(behavior)
            .and_then(|slot| slot.behavior)
            .ok_or(SceneError::InvalidBehavior(behavior))
    }

    /// Destroy a behavior, detaching it from its owner first
    ///
    /// Returns `false` if the behavior was already gone.
    pub fn destroy_behavior(&mut self, behavior: BehaviorId) -> bool {
        let Some(slot) = self.behaviors.remove(behavior) else {
            return false;
        };
        if let Some(data) = slot.owner.and_then(|owner| self.nodes.get_mut(owner)) {
            data.components.remove(&slot.kind);
        }
        log::trace!("Destroyed behavior {:?} of kind {}", behavior, slot.kind);
        true
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.nodes.len())
            .field("behaviors", &self.behaviors.len())
            .finish()
    }
}
