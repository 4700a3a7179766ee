//! Errors reported by scene mutations
//!
//! Every fallible operation on [`Scene`](crate::scene::Scene) leaves the scene
//! untouched when it returns one of these.

use crate::behavior::BehaviorKind;
use crate::foundation::collections::{BehaviorId, NodeId};
use thiserror::Error;

/// Scene mutation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The node handle does not name a live node
    #[error("Node {0:?} does not exist")]
    InvalidNode(NodeId),

    /// The behavior handle does not name a live behavior
    #[error("Behavior {0:?} does not exist")]
    InvalidBehavior(BehaviorId),

    /// A node was asked to adopt itself
    #[error("Node {0:?} cannot be its own child")]
    SelfReference(NodeId),

    /// The child is already directly under this parent
    #[error("Node {child:?} is already a child of {parent:?}")]
    AlreadyChild {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },

    /// The parent lies inside the subtree of the child
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },

    /// The behavior is owned by a node already
    #[error("Behavior is already attached to node {owner:?}")]
    BehaviorAlreadyAttached {
        /// Current owner of the behavior
        owner: NodeId,
    },

    /// The node already holds a behavior of the same concrete type
    #[error("Node {node:?} already has a {kind} component")]
    DuplicateKind {
        /// Target node
        node: NodeId,
        /// Kind that is already present
        kind: BehaviorKind,
    },

    /// The behavior is not the component stored on the node for its kind
    #[error("Behavior {behavior:?} is not a component of node {node:?}")]
    ComponentNotFound {
        /// Node that was searched
        node: NodeId,
        /// Behavior that was expected
        behavior: BehaviorId,
    },

    /// The node is not a direct child of the given parent
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Node that was searched
        parent: NodeId,
        /// Node that was expected among its children
        child: NodeId,
    },
}
