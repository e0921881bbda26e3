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

//! The flattened per-drawable record consumed by render passes.

use crate::frame::GameObjectId;
use crate::material::{NbrMaterialDescriptor, NbrSurfaceArea, PbrMaterialDescriptor};
use crate::math::{Aabb, Mat4};

use super::{MeshHandle, TextureHandle};

/// Per-frame identifier of one flattened drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u64);

/// The PBR factor block in GPU uniform layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PbrUniforms {
    /// Base color factor (RGBA).
    pub base_color_factor: [f32; 4],
    /// Emissive factor in xyz; w is padding.
    pub emissive_factor: [f32; 4],
    /// Metallic factor.
    pub metallic_factor: f32,
    /// Roughness factor.
    pub roughness_factor: f32,
    /// Normal map scale.
    pub normal_scale: f32,
    /// Occlusion strength.
    pub occlusion_strength: f32,
}

impl From<&PbrMaterialDescriptor> for PbrUniforms {
    fn from(material: &PbrMaterialDescriptor) -> Self {
        Self {
            base_color_factor: material.base_color_factor.to_array(),
            emissive_factor: [
                material.emissive_factor.x,
                material.emissive_factor.y,
                material.emissive_factor.z,
                0.0,
            ],
            metallic_factor: material.metallic_factor,
            roughness_factor: material.roughness_factor,
            normal_scale: material.normal_scale,
            occlusion_strength: material.occlusion_strength,
        }
    }
}

/// The NBR tuning block in GPU uniform layout.
///
/// Scalar knobs are packed four to a vector; the lane assignments are part of
/// the shader contract and documented per field.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NbrUniforms {
    /// Rim light tint.
    pub rim_color: [f32; 4],
    /// First (outer) shadow tier tint.
    pub first_shadow_color: [f32; 4],
    /// Second (deeper) shadow tier tint.
    pub second_shadow_color: [f32; 4],
    /// Specular highlight tint.
    pub specular_color: [f32; 4],
    /// Emission tint.
    pub emission_tint: [f32; 4],
    /// Outline shell tint.
    pub outline_color: [f32; 4],
    /// x: rim intensity, y: rim width, z: rim softness, w: face shadow softness.
    pub rim_face_params: [f32; 4],
    /// x: face shadow offset, y: shadow ramp width, z: shadow transition
    /// softness, w: warm ramp shift.
    pub ramp_params: [f32; 4],
    /// x: cool ramp shift, y: day/night blend, z: specular intensity,
    /// w: specular shininess.
    pub specular_params: [f32; 4],
    /// x: specular threshold, y: hair specular shift, z: indirect light mix,
    /// w: indirect light intensity.
    pub indirect_params: [f32; 4],
    /// x: indirect light occlusion, y: emission intensity, z: emission
    /// threshold, w: light area threshold.
    pub emission_params: [f32; 4],
    /// x: bloom factor, y: outline width, z: surface area index, w: padding.
    pub misc_params: [f32; 4],
}

impl From<&NbrMaterialDescriptor> for NbrUniforms {
    fn from(material: &NbrMaterialDescriptor) -> Self {
        let t = &material.tuning;
        let area_index = match material.area {
            NbrSurfaceArea::Body => 0.0,
            NbrSurfaceArea::Hair => 1.0,
            NbrSurfaceArea::Face => 2.0,
        };
        Self {
            rim_color: t.rim_color.to_array(),
            first_shadow_color: t.first_shadow_color.to_array(),
            second_shadow_color: t.second_shadow_color.to_array(),
            specular_color: t.specular_color.to_array(),
            emission_tint: t.emission_tint.to_array(),
            outline_color: t.outline_color.to_array(),
            rim_face_params: [
                t.rim_intensity,
                t.rim_width,
                t.rim_softness,
                t.face_shadow_softness,
            ],
            ramp_params: [
                t.face_shadow_offset,
                t.shadow_ramp_width,
                t.shadow_transition_softness,
                t.warm_ramp_shift,
            ],
            specular_params: [
                t.cool_ramp_shift,
                t.day_night_blend,
                t.specular_intensity,
                t.specular_shininess,
            ],
            indirect_params: [
                t.specular_threshold,
                t.hair_specular_shift,
                t.indirect_light_mix,
                t.indirect_light_intensity,
            ],
            emission_params: [
                t.indirect_light_occlusion,
                t.emission_intensity,
                t.emission_threshold,
                t.light_area_threshold,
            ],
            misc_params: [t.bloom_factor, t.outline_width, area_index, 0.0],
        }
    }
}

/// Resolved texture bindings and factors for a PBR drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct PbrShadingParams {
    /// Base color texture, if bound.
    pub base_color_texture: Option<TextureHandle>,
    /// Metallic-roughness texture, if bound.
    pub metallic_roughness_texture: Option<TextureHandle>,
    /// Normal map, if bound.
    pub normal_texture: Option<TextureHandle>,
    /// Occlusion map, if bound.
    pub occlusion_texture: Option<TextureHandle>,
    /// Emissive texture, if bound.
    pub emissive_texture: Option<TextureHandle>,
    /// The factor block, upload-ready.
    pub uniforms: PbrUniforms,
}

/// Resolved texture bindings and tuning for an NBR drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct NbrShadingParams {
    /// Base color texture, if bound.
    pub base_color_texture: Option<TextureHandle>,
    /// Packed light map, if bound.
    pub light_map_texture: Option<TextureHandle>,
    /// Face shadow map, if bound.
    pub face_map_texture: Option<TextureHandle>,
    /// Daylight shading ramp, if bound.
    pub warm_ramp_texture: Option<TextureHandle>,
    /// Night shading ramp, if bound.
    pub cool_ramp_texture: Option<TextureHandle>,
    /// Which surface family the shader branches for.
    pub area: NbrSurfaceArea,
    /// The tuning block, upload-ready.
    pub uniforms: NbrUniforms,
}

/// The shading parameter set of a drawable — exactly one model.
#[derive(Debug, Clone, PartialEq)]
pub enum ShadingParams {
    /// Physically based shading.
    Pbr(PbrShadingParams),
    /// Stylized toon shading.
    Nbr(NbrShadingParams),
}

impl ShadingParams {
    /// Whether this drawable shades through the stylized model.
    #[inline]
    pub fn is_nbr(&self) -> bool {
        matches!(self, ShadingParams::Nbr(_))
    }
}

/// A flattened, GPU-facing drawable record.
///
/// Created by the resource-binding stage each frame from the acquired
/// snapshot; replaced every frame (or dropped when the owning object is
/// removed). All handles are valid only for the frame that resolved them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEntity {
    /// This drawable's per-frame identity.
    pub instance: InstanceId,
    /// The owning game object — a non-owning id, looked up when needed.
    pub object: GameObjectId,
    /// World transform.
    pub model_matrix: Mat4,
    /// The GPU mesh to draw.
    pub mesh: MeshHandle,
    /// World-space bounds.
    pub bounds: Aabb,
    /// The full shading parameter set.
    pub shading: ShadingParams,
    /// Whether the vertex stage applies joint blending.
    pub vertex_blending: bool,
    /// Joint matrices (identity root at index 0); empty when rigid.
    pub joint_matrices: Vec<Mat4>,
}
