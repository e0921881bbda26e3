// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the SceneAgent, the logic-thread owner of publishable object state.

use ahash::{AHashMap, AHashSet};
use ember_core::animation::AnimationProvider;
use ember_core::asset::MeshRef;
use ember_core::frame::{FrameSwapContext, GameObjectDesc, GameObjectId, SnapshotDelta};
use ember_core::math::Mat4;
use ember_lanes::descriptor_lane::PartDescriptorBuilder;
use std::sync::Arc;

/// One authored sub-mesh of a scene object.
#[derive(Debug, Clone)]
pub struct ScenePart {
    /// The sub-mesh to draw.
    pub mesh: MeshRef,
    /// The material reference; empty means factor-only default shading.
    pub material_ref: String,
}

/// Logic-side state for one object.
struct SceneObject {
    parts: Vec<ScenePart>,
    /// The object's own transform. Never overwritten by the world multiply —
    /// the multiplied matrix exists only in the outgoing descriptor.
    local_transform: Mat4,
    dirty: bool,
}

/// Owns the object table on the logic thread and publishes dirty descriptors
/// into the frame swap once per tick.
///
/// Rebuild policy: an object is recomposed only when marked dirty (spawn,
/// transform change, explicit `mark_dirty`) or when the animation provider
/// reports an active pose for it this tick. The dirty flag clears immediately
/// after the tick's snapshot is composed and handed to the swap context.
pub struct SceneAgent {
    objects: AHashMap<GameObjectId, SceneObject>,
    pending_removals: Vec<GameObjectId>,
    builder: PartDescriptorBuilder,
    animation: Arc<dyn AnimationProvider>,
    swap: Arc<FrameSwapContext>,
    /// The scene root's world transform, multiplied onto every local
    /// transform while composing descriptors.
    world_transform: Mat4,
    /// Material references already reported as broken, so each failure is
    /// logged once rather than every tick.
    reported_failures: AHashSet<String>,
}

impl SceneAgent {
    /// Creates an agent publishing into `swap`.
    pub fn new(
        builder: PartDescriptorBuilder,
        animation: Arc<dyn AnimationProvider>,
        swap: Arc<FrameSwapContext>,
    ) -> Self {
        Self {
            objects: AHashMap::new(),
            pending_removals: Vec::new(),
            builder,
            animation,
            swap,
            world_transform: Mat4::IDENTITY,
            reported_failures: AHashSet::new(),
        }
    }

    /// Sets the scene root's world transform. Dirties every object, since
    /// every world matrix changes.
    pub fn set_world_transform(&mut self, world: Mat4) {
        self.world_transform = world;
        for object in self.objects.values_mut() {
            object.dirty = true;
        }
    }

    /// Adds an object to the scene, dirty so it publishes on the next tick.
    pub fn spawn(&mut self, parts: Vec<ScenePart>, local_transform: Mat4) -> GameObjectId {
        let id = GameObjectId::new();
        self.objects.insert(
            id,
            SceneObject {
                parts,
                local_transform,
                dirty: true,
            },
        );
        id
    }

    /// Replaces an object's local transform and marks it dirty.
    ///
    /// Returns `false` when the object is no longer present — a normal skip
    /// condition, not an error.
    pub fn set_local_transform(&mut self, id: GameObjectId, local: Mat4) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.local_transform = local;
                object.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Marks an object dirty without changing it (e.g. a material hot-swap).
    ///
    /// Returns `false` when the object is no longer present.
    pub fn mark_dirty(&mut self, id: GameObjectId) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => {
                object.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Removes an object; the removal is announced in the next publish.
    pub fn remove(&mut self, id: GameObjectId) {
        if self.objects.remove(&id).is_some() {
            self.pending_removals.push(id);
        }
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Runs one logic tick: composes descriptors for every dirty or animated
    /// object and publishes the delta.
    ///
    /// Always publishes, even with no changes — an empty publish still
    /// advances the swap tick.
    pub fn tick(&mut self) {
        let mut delta = SnapshotDelta::new();

        for (id, object) in &mut self.objects {
            let pose = self.animation.current_pose(*id);
            // An active pose re-publishes the object even when its transform
            // is clean; the joints moved.
            if !object.dirty && pose.is_none() {
                continue;
            }

            // The world multiply is transient: it goes into the descriptor,
            // while the stored local transform stays untouched.
            let world = self.world_transform * object.local_transform;

            let mut parts = Vec::with_capacity(object.parts.len());
            for part in &object.parts {
                let descriptor =
                    match self
                        .builder
                        .build(part.mesh.clone(), &part.material_ref, world)
                    {
                        Ok(descriptor) => descriptor,
                        Err(err) => {
                            // Fatal to this part only; the rest of the frame
                            // is unaffected. Log each broken reference once.
                            if self.reported_failures.insert(part.material_ref.clone()) {
                                log::warn!(
                                    "Dropping part '{}' of {id}: {err}",
                                    part.mesh
                                );
                            }
                            continue;
                        }
                    };

                let descriptor = match &pose {
                    Some(joints) => self.builder.apply_animation(descriptor, joints.clone()),
                    None => descriptor,
                };
                parts.push(descriptor);
            }

            delta.update(GameObjectDesc { id: *id, parts });
            object.dirty = false;
        }

        for id in self.pending_removals.drain(..) {
            delta.remove(id);
        }

        self.swap.publish(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::animation::AnimationProvider;
    use ember_core::asset::{
        AssetProvider, AssetResolutionError, MaterialRecord, ToonSettingsRecord,
    };
    use ember_core::math::Vec3;
    use ember_lanes::descriptor_lane::MaterialResolver;

    struct NoAssets;

    impl AssetProvider for NoAssets {
        fn resolve_path(&self, reference: &str) -> Result<String, AssetResolutionError> {
            Err(AssetResolutionError::NotFound {
                reference: reference.into(),
            })
        }
        fn load_material(&self, reference: &str) -> Result<MaterialRecord, AssetResolutionError> {
            Err(AssetResolutionError::NotFound {
                reference: reference.into(),
            })
        }
        fn load_material_settings(
            &self,
            reference: &str,
        ) -> Result<ToonSettingsRecord, AssetResolutionError> {
            Err(AssetResolutionError::NotFound {
                reference: reference.into(),
            })
        }
    }

    struct NoAnimation;

    impl AnimationProvider for NoAnimation {
        fn current_pose(&self, _object: GameObjectId) -> Option<Vec<Mat4>> {
            None
        }
    }

    fn agent_with_swap() -> (SceneAgent, Arc<FrameSwapContext>) {
        let swap = Arc::new(FrameSwapContext::new());
        let agent = SceneAgent::new(
            PartDescriptorBuilder::new(MaterialResolver::new(Arc::new(NoAssets))),
            Arc::new(NoAnimation),
            swap.clone(),
        );
        (agent, swap)
    }

    fn crate_part() -> ScenePart {
        ScenePart {
            mesh: MeshRef::new("meshes/crate.mesh"),
            material_ref: String::new(),
        }
    }

    #[test]
    fn spawned_objects_publish_on_the_next_tick() {
        let (mut agent, swap) = agent_with_swap();
        let id = agent.spawn(vec![crate_part()], Mat4::IDENTITY);

        agent.tick();
        let view = swap.acquire_for_render();
        assert!(view.fresh);
        assert!(view.snapshot.get(&id).is_some());
    }

    #[test]
    fn clean_objects_are_not_republished() {
        let (mut agent, swap) = agent_with_swap();
        agent.spawn(vec![crate_part()], Mat4::IDENTITY);

        agent.tick();
        swap.acquire_for_render();

        // Nothing changed: the second tick publishes an empty delta, but the
        // object persists in the cumulative snapshot.
        agent.tick();
        let view = swap.acquire_for_render();
        assert!(view.fresh);
        assert_eq!(view.snapshot.len(), 1);
    }

    #[test]
    fn transform_change_restores_local_and_publishes_world() {
        let (mut agent, swap) = agent_with_swap();
        let id = agent.spawn(vec![crate_part()], Mat4::IDENTITY);
        agent.set_world_transform(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));

        let local = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
        assert!(agent.set_local_transform(id, local));
        agent.tick();

        let view = swap.acquire_for_render();
        let published = &view.snapshot.get(&id).unwrap().parts[0];
        // The descriptor carries world * local...
        assert_eq!(
            published.world_transform.translation(),
            Vec3::new(10.0, 2.0, 0.0)
        );

        // ...while the stored local transform survives un-multiplied: moving
        // the world root alone re-publishes from the same local matrix.
        agent.set_world_transform(Mat4::IDENTITY);
        agent.tick();
        let view = swap.acquire_for_render();
        let published = &view.snapshot.get(&id).unwrap().parts[0];
        assert_eq!(
            published.world_transform.translation(),
            Vec3::new(0.0, 2.0, 0.0)
        );
    }

    #[test]
    fn missing_object_operations_are_skips_not_errors() {
        let (mut agent, _swap) = agent_with_swap();
        let ghost = GameObjectId::new();
        assert!(!agent.set_local_transform(ghost, Mat4::IDENTITY));
        assert!(!agent.mark_dirty(ghost));
        agent.remove(ghost); // silently nothing
        assert!(agent.is_empty());
    }

    #[test]
    fn broken_material_drops_the_part_but_keeps_the_object() {
        let (mut agent, swap) = agent_with_swap();
        let id = agent.spawn(
            vec![
                ScenePart {
                    mesh: MeshRef::new("meshes/body.mesh"),
                    material_ref: "materials/broken.mat".into(),
                },
                crate_part(),
            ],
            Mat4::IDENTITY,
        );

        agent.tick();
        let view = swap.acquire_for_render();
        let desc = view.snapshot.get(&id).unwrap();
        assert_eq!(desc.parts.len(), 1, "only the healthy part publishes");
    }

    #[test]
    fn removal_is_announced_once() {
        let (mut agent, swap) = agent_with_swap();
        let id = agent.spawn(vec![crate_part()], Mat4::IDENTITY);
        agent.tick();
        swap.acquire_for_render();

        agent.remove(id);
        agent.tick();
        let view = swap.acquire_for_render();
        assert!(view.snapshot.removed.contains(&id));
        assert!(view.snapshot.get(&id).is_none());
    }
}
