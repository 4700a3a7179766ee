//! # Scene Core
//!
//! Scene graph ownership and per-frame dispatch for node/component hierarchies.
//!
//! ## Features
//!
//! - **Arena Ownership**: every node and behavior lives in one [`Scene`]
//! - **Typed Components**: at most one behavior instance per concrete type
//! - **Cycle-Safe Hierarchy**: reparenting that would form a loop is rejected
//! - **Cascading Enable/Destroy**: disabling or destroying a node covers its subtree
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_core::prelude::*;
//!
//! #[derive(Default)]
//! struct Spinner {
//!     angle: f64,
//! }
//!
//! impl Behavior for Spinner {
//!     fn update(&mut self, _ctx: &FrameContext<'_>, delta_time: f64) {
//!         self.angle += 90.0 * delta_time;
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! let root = scene.create_node("root");
//! let ship = scene.create_node("ship");
//! scene.add_child(root, ship).unwrap();
//!
//! let spinner = scene.create_behavior(Spinner::default());
//! scene.add_component(ship, spinner).unwrap();
//!
//! scene.update(root, 1.0);
//! scene.render(root);
//! assert_eq!(scene.component::<Spinner>(ship).map(|s| s.angle), Some(90.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod behavior;
pub mod config;
pub mod error;
pub mod foundation;
pub mod scene;

pub use behavior::{Behavior, BehaviorKind, FrameContext};
pub use config::{Config, ConfigError, SceneConfig};
pub use error::SceneError;
pub use foundation::collections::{BehaviorId, NodeId};
pub use scene::Scene;

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        behavior::{Behavior, BehaviorKind, FrameContext},
        config::{Config, SceneConfig},
        error::SceneError,
        foundation::collections::{BehaviorId, NodeId},
        scene::Scene,
    };
}
