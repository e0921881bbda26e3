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

//! Composes mesh, material, transform, and pose into part descriptors.

use ember_core::animation::SkeletonPose;
use ember_core::asset::{AssetResolutionError, MeshRef};
use ember_core::frame::ObjectPartDescriptor;
use ember_core::math::Mat4;

use super::MaterialResolver;

/// Builds [`ObjectPartDescriptor`]s for one sub-mesh at a time.
///
/// Pure composition: one material resolution per sub-mesh, a transform copy,
/// and — when the owning object animates — a pose attachment. The builder
/// holds no per-object state; tick policy (who is dirty, when flags clear)
/// belongs to the scene agent.
pub struct PartDescriptorBuilder {
    resolver: MaterialResolver,
}

impl PartDescriptorBuilder {
    /// Creates a builder resolving materials through `resolver`.
    pub fn new(resolver: MaterialResolver) -> Self {
        Self { resolver }
    }

    /// Builds a rigid part descriptor.
    ///
    /// `world_transform` is the already-multiplied world matrix for this
    /// frame — it lives only in the descriptor, never back in scene state.
    pub fn build(
        &self,
        sub_mesh: MeshRef,
        material_ref: &str,
        world_transform: Mat4,
    ) -> Result<ObjectPartDescriptor, AssetResolutionError> {
        let material = self.resolver.resolve(material_ref)?;
        Ok(ObjectPartDescriptor {
            mesh: sub_mesh,
            material,
            world_transform,
            has_animation: false,
            skeleton_binding: None,
            pose: None,
        })
    }

    /// Attaches this frame's skeletal pose to a built descriptor.
    ///
    /// `joints` are the rig's per-joint matrices without the root; the
    /// identity root is prepended here. The skeleton binding is the mesh
    /// reference itself — binding and mesh share the same rig.
    pub fn apply_animation(
        &self,
        descriptor: ObjectPartDescriptor,
        joints: Vec<Mat4>,
    ) -> ObjectPartDescriptor {
        let binding = descriptor.mesh.clone();
        ObjectPartDescriptor {
            has_animation: true,
            skeleton_binding: Some(binding),
            pose: Some(SkeletonPose::from_joints(joints)),
            ..descriptor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::asset::{AssetProvider, MaterialRecord, ToonSettingsRecord};
    use ember_core::math::Vec3;
    use std::sync::Arc;

    /// A provider with no assets at all — everything non-empty fails.
    struct EmptyProvider;

    impl AssetProvider for EmptyProvider {
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

    fn builder() -> PartDescriptorBuilder {
        PartDescriptorBuilder::new(MaterialResolver::new(Arc::new(EmptyProvider)))
    }

    #[test]
    fn build_without_material_is_untextured_and_rigid() {
        let descriptor = builder()
            .build(MeshRef::new("meshes/crate.mesh"), "", Mat4::IDENTITY)
            .expect("empty material ref must not fail");

        assert!(!descriptor.material.has_texture());
        assert!(!descriptor.material.is_nbr());
        assert!(!descriptor.has_animation);
        assert!(descriptor.skeleton_binding.is_none());
        assert!(descriptor.pose.is_none());
    }

    #[test]
    fn build_copies_the_world_transform() {
        let world = Mat4::from_translation(Vec3::new(3.0, 4.0, 5.0));
        let descriptor = builder()
            .build(MeshRef::new("meshes/crate.mesh"), "", world)
            .unwrap();
        assert_eq!(descriptor.world_transform, world);
    }

    #[test]
    fn apply_animation_prepends_root_and_binds_the_mesh_rig() {
        let b = builder();
        let descriptor = b
            .build(MeshRef::new("meshes/avatar.mesh"), "", Mat4::IDENTITY)
            .unwrap();

        let joints = vec![Mat4::IDENTITY; 3];
        let animated = b.apply_animation(descriptor, joints);

        assert!(animated.has_animation);
        let pose = animated.pose.as_ref().expect("pose attached");
        assert_eq!(pose.len(), 4, "identity root + 3 joints");
        assert_eq!(pose.joint_count(), 3);
        assert_eq!(
            animated.skeleton_binding.as_ref(),
            Some(&animated.mesh),
            "binding and mesh share the same rig"
        );
    }

    #[test]
    fn missing_material_record_propagates() {
        let result = builder().build(
            MeshRef::new("meshes/crate.mesh"),
            "materials/absent.mat",
            Mat4::IDENTITY,
        );
        assert!(result.is_err());
    }
}
