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

//! The resource-binding stage: snapshot descriptors → flattened render entities.

use ember_core::asset::TextureRef;
use ember_core::frame::{FrameSnapshot, ObjectPartDescriptor};
use ember_core::material::MaterialDescriptor;
use ember_core::renderer::{
    DeviceResourceRegistry, InstanceId, NbrShadingParams, NbrUniforms, PbrShadingParams,
    PbrUniforms, RenderEntity, ShadingParams, TextureHandle,
};

/// Flattens the acquired snapshot into GPU-facing [`RenderEntity`] records
/// through the injected [`DeviceResourceRegistry`].
///
/// Degradation rules, in order of severity:
/// - a mesh that fails to resolve skips the whole part (retried naturally on
///   the owner's next dirty publish),
/// - an animated part whose pose disagrees with the mesh's expected joint
///   count skips the part (the invariant is validated here, at consumption),
/// - a texture that fails to resolve degrades that slot to "unbound" and the
///   draw proceeds factor-only.
#[derive(Debug, Default)]
pub struct ResourceBindingStage;

impl ResourceBindingStage {
    /// Creates the stage.
    pub fn new() -> Self {
        Self
    }

    /// Binds every part of every live object in `snapshot`.
    ///
    /// Instance ids are per-frame sequence numbers; all handles are valid
    /// only for this frame.
    pub fn bind(
        &self,
        snapshot: &FrameSnapshot,
        registry: &dyn DeviceResourceRegistry,
    ) -> Vec<RenderEntity> {
        let mut entities = Vec::new();
        let mut next_instance = 0u64;

        for desc in snapshot.objects.values() {
            for part in &desc.parts {
                match self.bind_part(part, desc.id, InstanceId(next_instance), registry) {
                    Some(entity) => {
                        entities.push(entity);
                        next_instance += 1;
                    }
                    None => continue,
                }
            }
        }

        entities
    }

    fn bind_part(
        &self,
        part: &ObjectPartDescriptor,
        object: ember_core::frame::GameObjectId,
        instance: InstanceId,
        registry: &dyn DeviceResourceRegistry,
    ) -> Option<RenderEntity> {
        let mesh_info = match registry.resolve_mesh(&part.mesh) {
            Ok(info) => info,
            Err(err) => {
                log::warn!("Skipping part '{}' of {object}: {err}", part.mesh);
                return None;
            }
        };

        let joint_matrices = if part.has_animation {
            let pose = match &part.pose {
                Some(pose) if !pose.is_empty() => pose,
                _ => {
                    log::warn!(
                        "Skipping animated part '{}' of {object}: pose snapshot missing",
                        part.mesh
                    );
                    return None;
                }
            };
            if pose.joint_count() != mesh_info.expected_joint_count {
                log::warn!(
                    "Skipping animated part '{}' of {object}: pose has {} joints, mesh expects {}",
                    part.mesh,
                    pose.joint_count(),
                    mesh_info.expected_joint_count
                );
                return None;
            }
            pose.matrices().to_vec()
        } else {
            Vec::new()
        };

        let shading = match &part.material {
            MaterialDescriptor::Pbr(pbr) => ShadingParams::Pbr(PbrShadingParams {
                base_color_texture: self.bind_texture(&pbr.base_color_texture, registry),
                metallic_roughness_texture: self
                    .bind_texture(&pbr.metallic_roughness_texture, registry),
                normal_texture: self.bind_texture(&pbr.normal_texture, registry),
                occlusion_texture: self.bind_texture(&pbr.occlusion_texture, registry),
                emissive_texture: self.bind_texture(&pbr.emissive_texture, registry),
                uniforms: PbrUniforms::from(pbr),
            }),
            MaterialDescriptor::Nbr(nbr) => ShadingParams::Nbr(NbrShadingParams {
                base_color_texture: self.bind_texture(&nbr.base_color_texture, registry),
                light_map_texture: self.bind_texture(&nbr.light_map_texture, registry),
                face_map_texture: self.bind_texture(&nbr.face_map_texture, registry),
                warm_ramp_texture: self.bind_texture(&nbr.warm_ramp_texture, registry),
                cool_ramp_texture: self.bind_texture(&nbr.cool_ramp_texture, registry),
                area: nbr.area,
                uniforms: NbrUniforms::from(nbr),
            }),
        };

        Some(RenderEntity {
            instance,
            object,
            model_matrix: part.world_transform,
            mesh: mesh_info.handle,
            bounds: mesh_info.bounds.transformed(&part.world_transform),
            shading,
            vertex_blending: part.has_animation,
            joint_matrices,
        })
    }

    /// Resolves one texture slot; empty slots and resolve failures both end
    /// up unbound, the latter with a warning.
    fn bind_texture(
        &self,
        reference: &TextureRef,
        registry: &dyn DeviceResourceRegistry,
    ) -> Option<TextureHandle> {
        if reference.is_empty() {
            return None;
        }
        match registry.resolve_texture(reference) {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::warn!("Texture '{reference}' unavailable this frame: {err}");
                None
            }
        }
    }
}
