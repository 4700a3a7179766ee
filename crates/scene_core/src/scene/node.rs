//! Per-node and per-behavior slot data stored in the scene arenas

use crate::behavior::{Behavior, BehaviorAny, BehaviorKind};
use crate::foundation::collections::{BehaviorId, NodeId};
use std::collections::HashMap;

/// Node record
///
/// `parent` and the entries of `children` are non-owning keys; the arena owns
/// every node. `children` keeps insertion order for deterministic traversal.
#[derive(Debug, Default)]
pub(crate) struct NodeData {
    pub(crate) name: String,
    pub(crate) enabled: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) components: HashMap<BehaviorKind, BehaviorId>,
}

impl NodeData {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            enabled: true,
            ..Self::default()
        }
    }
}

/// Behavior record
pub(crate) struct BehaviorSlot {
    /// Vacated only while the behavior runs its own `update`
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    pub(crate) kind: BehaviorKind,
    pub(crate) owner: Option<NodeId>,
    pub(crate) enabled: bool,
}

impl BehaviorSlot {
    pub(crate) fn new(behavior: Box<dyn Behavior>) -> Self {
        let kind = (*behavior).kind();
        Self {
            behavior: Some(behavior),
            kind,
            owner: None,
            enabled: true,
        }
    }
}
