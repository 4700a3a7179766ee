//! Per-frame update and render traversal

use super::Scene;
use crate::behavior::FrameContext;
use crate::foundation::collections::{BehaviorId, NodeId};

impl Scene {
    /// Run one update pass over the subtree rooted at `node`
    ///
    /// Nothing runs if `node` is disabled or gone. Otherwise each enabled
    /// component of the node is updated, then each child in attachment order
    /// is updated the same way. A disabled child skips its whole subtree.
    pub fn update(&mut self, node: NodeId, delta_time: f64) {
        let Some(data) = self.nodes.get(node) else {
            return;
        };
        if !data.enabled {
            return;
        }

        let components: Vec<BehaviorId> = data.components.values().copied().collect();
        for behavior in components {
            self.update_behavior(node, behavior, delta_time);
        }

        // Behaviors only see `&Scene`, so the child list cannot change here.
        let mut index = 0;
        while let Some(&child) = self.nodes[node].children.get(index) {
            self.update(child, delta_time);
            index += 1;
        }
    }

    fn update_behavior(&mut self, owner: NodeId, behavior: BehaviorId, delta_time: f64) {
        let Some(slot) = self.behaviors.get_mut(behavior) else {
            return;
        };
        if !slot.enabled {
            return;
        }
        let Some(mut running) = slot.behavior.take() else {
            return;
        };

        running.update(&FrameContext::new(self, owner, behavior), delta_time);

        if let Some(slot) = self.behaviors.get_mut(behavior) {
            slot.behavior = Some(running);
        }
    }

    /// Run one render pass over the components of `node`
    ///
    /// Nothing runs unless `node` and all of its ancestors are enabled. Does
    /// not descend into children; renderers that depend on ancestors read them
    /// through [`FrameContext`].
    pub fn render(&self, node: NodeId) {
        if !self.is_active_in_hierarchy(node) {
            return;
        }
        let Some(data) = self.nodes.get(node) else {
            return;
        };

        for &behavior in data.components.values() {
            let Some(slot) = self.behaviors.get(behavior) else {
                continue;
            };
            if !slot.enabled {
                continue;
            }
            if let Some(running) = slot.behavior.as_deref() {
                running.render(&FrameContext::new(self, node, behavior));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct Clock {
        elapsed: f64,
        ticks: u32,
    }

    impl Behavior for Clock {
        fn update(&mut self, _ctx: &FrameContext<'_>, delta_time: f64) {
            self.elapsed += delta_time;
            self.ticks += 1;
        }
    }

    #[derive(Default)]
    struct Depth(usize);

    impl Behavior for Depth {
        fn update(&mut self, ctx: &FrameContext<'_>, _delta_time: f64) {
            self.0 = ctx.scene().ancestors(ctx.owner()).count();
        }
    }

    fn ticks(scene: &Scene, node: NodeId) -> u32 {
        scene.component::<Clock>(node).map_or(0, |c| c.ticks)
    }

    #[test]
    fn test_update_accumulates_delta_time() {
        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let clock = scene.create_behavior(Clock::default());
        scene.add_component(root, clock).unwrap();

        for _ in 0..60 {
            scene.update(root, 1.0 / 60.0);
        }

        let clock = scene.component::<Clock>(root).unwrap();
        assert_eq!(clock.ticks, 60);
        assert_relative_eq!(clock.elapsed, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_update_recurses_into_enabled_children() {
        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let child = scene.create_node("child");
        let grandchild = scene.create_node("grandchild");
        scene.add_child(root, child).unwrap();
        scene.add_child(child, grandchild).unwrap();
        let clock = scene.create_behavior(Clock::default());
        let depth = scene.create_behavior(Depth::default());
        scene.add_component(grandchild, clock).unwrap();
        scene.add_component(grandchild, depth).unwrap();

        scene.update(root, 0.5);

        assert_eq!(ticks(&scene, grandchild), 1);
        assert_eq!(scene.component::<Depth>(grandchild).map(|d| d.0), Some(2));
    }

    #[test]
    fn test_disabled_child_skips_subtree_until_reenabled() {
        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let child = scene.create_node("child");
        let grandchild = scene.create_node("grandchild");
        scene.add_child(root, child).unwrap();
        scene.add_child(child, grandchild).unwrap();
        let clock = scene.create_behavior(Clock::default());
        scene.add_component(grandchild, clock).unwrap();

        scene.set_enabled(child, false).unwrap();
        scene.update(root, 0.1);
        assert_eq!(ticks(&scene, grandchild), 0);
        assert_eq!(scene.parent(child), Some(root));

        scene.set_enabled(child, true).unwrap();
        scene.update(root, 0.1);
        assert_eq!(ticks(&scene, grandchild), 1);
    }

    #[test]
    fn test_disabled_behavior_skipped() {
        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let clock = scene.create_behavior(Clock::default());
        scene.add_component(root, clock).unwrap();
        scene.set_behavior_enabled(clock, false).unwrap();

        scene.update(root, 0.1);
        assert_eq!(ticks(&scene, root), 0);
        assert_eq!(scene.behavior_owner(clock), Some(root));

        scene.set_behavior_enabled(clock, true).unwrap();
        scene.update(root, 0.1);
        assert_eq!(ticks(&scene, root), 1);
    }

    #[test]
    fn test_running_behavior_hidden_from_its_own_lookup() {
        struct SelfLookup(Option<bool>);
        impl Behavior for SelfLookup {
            fn update(&mut self, ctx: &FrameContext<'_>, _delta_time: f64) {
                self.0 = Some(ctx.sibling::<SelfLookup>().is_some());
            }
        }

        let mut scene = Scene::new();
        let root = scene.create_node("root");
        let probe = scene.create_behavior(SelfLookup(None));
        scene.add_component(root, probe).unwrap();
        scene.update(root, 0.0);

        assert_eq!(scene.component::<SelfLookup>(root).and_then(|p| p.0), Some(false));
    }
}
