//! Behavior (component) contract
//!
//! A behavior is a unit of per-frame logic that a [`Scene`] attaches to one
//! node at a time. Concrete behaviors implement [`Behavior`]; the scene keys
//! them by [`BehaviorKind`] so a node holds at most one instance per type.

use crate::foundation::collections::{BehaviorId, NodeId};
use crate::scene::Scene;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable identifier of a concrete behavior type
///
/// Two kinds compare equal exactly when they describe the same Rust type.
/// The type name is carried along for diagnostics only.
#[derive(Clone, Copy)]
pub struct BehaviorKind {
    id: TypeId,
    name: &'static str,
}

impl BehaviorKind {
    /// Kind of the behavior type `T`
    pub fn of<T: Behavior>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Fully qualified type name of the behavior
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for BehaviorKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BehaviorKind {}

impl Hash for BehaviorKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BehaviorKind").field(&self.name).finish()
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Type-erasure helpers every behavior gets for free
///
/// Implemented for all sized [`Behavior`] types; never implement it by hand.
pub trait BehaviorAny: Any {
    /// Borrow as [`Any`] for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as [`Any`] for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Kind of the concrete type behind this behavior
    fn kind(&self) -> BehaviorKind;
}

impl<T: Behavior> BehaviorAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn kind(&self) -> BehaviorKind {
        BehaviorKind::of::<T>()
    }
}

/// Per-frame logic attachable to a scene node
///
/// Both hooks default to doing nothing. They are only called while the
/// behavior is enabled and attached to an enabled node that the traversal
/// reaches. No ordering is guaranteed between sibling behaviors on a node.
///
/// Behaviors receive shared access to the scene through [`FrameContext`], so
/// they cannot restructure the hierarchy or destroy their owner mid-frame.
/// Queue such changes and apply them after the traversal returns.
pub trait Behavior: BehaviorAny {
    /// Advance per-frame state
    ///
    /// # Arguments
    /// * `ctx` - Owner and read-only scene access
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, ctx: &FrameContext<'_>, delta_time: f64) {
        let _ = (ctx, delta_time);
    }

    /// Emit drawing work; must not mutate shared state
    fn render(&self, ctx: &FrameContext<'_>) {
        let _ = ctx;
    }
}

/// View of the scene handed to a behavior while it is being dispatched
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    scene: &'a Scene,
    owner: NodeId,
    behavior: BehaviorId,
}

impl<'a> FrameContext<'a> {
    pub(crate) const fn new(scene: &'a Scene, owner: NodeId, behavior: BehaviorId) -> Self {
        Self { scene, owner, behavior }
    }

    /// Read-only access to the whole scene
    pub const fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Node that owns the running behavior
    pub const fn owner(&self) -> NodeId {
        self.owner
    }

    /// Handle of the running behavior
    pub const fn behavior_id(&self) -> BehaviorId {
        self.behavior
    }

    /// Name of the owning node
    pub fn owner_name(&self) -> &'a str {
        self.scene.name(self.owner).unwrap_or_default()
    }

    /// Another component of type `T` on the owning node
    ///
    /// During `update` the running behavior itself is not visible here.
    pub fn sibling<T: Behavior>(&self) -> Option<&'a T> {
        self.scene.component::<T>(self.owner)
    }

    /// Nearest strict ancestor of the owner holding a component of type `T`
    pub fn find_in_ancestors<T: Behavior>(&self) -> Option<(NodeId, &'a T)> {
        let scene = self.scene;
        scene
            .ancestors(self.owner)
            .find_map(|node| scene.component::<T>(node).map(|c| (node, c)))
    }
}

impl fmt::Debug for FrameContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameContext")
            .field("owner", &self.owner)
            .field("behavior", &self.behavior)
            .finish_non_exhaustive()
    }
}
