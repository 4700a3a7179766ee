//! Arena collections and the stable keys used to address scene objects

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational handle to a node stored in a [`Scene`](crate::scene::Scene)
    ///
    /// A handle outlives the node it names; once the node is destroyed every
    /// lookup through the handle reports the node as gone.
    pub struct NodeId;

    /// Generational handle to a behavior stored in a [`Scene`](crate::scene::Scene)
    pub struct BehaviorId;
}

/// Arena of values addressed by [`NodeId`]
pub type NodeArena<T> = SlotMap<NodeId, T>;

/// Arena of values addressed by [`BehaviorId`]
pub type BehaviorArena<T> = SlotMap<BehaviorId, T>;
