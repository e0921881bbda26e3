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

//! The standard PBR material descriptor (metallic-roughness workflow).

use crate::asset::TextureRef;
use crate::math::{LinearRgba, Vec3};

/// A resolved physically-based material using the metallic-roughness workflow.
///
/// Texture references here are already resolved (or empty). Every slot may be
/// empty — an empty slot tells the shader to use the corresponding scalar
/// factor alone, which is the normal state of untextured geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PbrMaterialDescriptor {
    /// Base color (albedo) texture; multiplied with `base_color_factor`.
    pub base_color_texture: TextureRef,
    /// Combined metallic-roughness texture.
    ///
    /// glTF 2.0 convention: blue channel = metallic, green = roughness.
    pub metallic_roughness_texture: TextureRef,
    /// Tangent-space normal map.
    pub normal_texture: TextureRef,
    /// Ambient-occlusion map (red channel).
    pub occlusion_texture: TextureRef,
    /// Emissive texture; multiplied with `emissive_factor`.
    pub emissive_texture: TextureRef,

    /// Metallic factor (0.0 = dielectric, 1.0 = metal).
    pub metallic_factor: f32,
    /// Roughness factor (0.0 = smooth, 1.0 = rough).
    pub roughness_factor: f32,
    /// Scale applied to the sampled normal's XY before renormalization.
    pub normal_scale: f32,
    /// Strength of the sampled occlusion term (0.0 disables it).
    pub occlusion_strength: f32,
    /// Base color factor (RGBA).
    pub base_color_factor: LinearRgba,
    /// Emissive color factor (RGB).
    pub emissive_factor: Vec3,
}

impl PbrMaterialDescriptor {
    /// Whether any of the five texture slots is bound.
    pub fn has_texture(&self) -> bool {
        !(self.base_color_texture.is_empty()
            && self.metallic_roughness_texture.is_empty()
            && self.normal_texture.is_empty()
            && self.occlusion_texture.is_empty()
            && self.emissive_texture.is_empty())
    }
}

impl Default for PbrMaterialDescriptor {
    fn default() -> Self {
        Self {
            base_color_texture: TextureRef::EMPTY,
            metallic_roughness_texture: TextureRef::EMPTY,
            normal_texture: TextureRef::EMPTY,
            occlusion_texture: TextureRef::EMPTY,
            emissive_texture: TextureRef::EMPTY,
            metallic_factor: 0.0,
            roughness_factor: 0.5,
            normal_scale: 1.0,
            occlusion_strength: 1.0,
            base_color_factor: LinearRgba::WHITE,
            emissive_factor: Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_texture() {
        assert!(!PbrMaterialDescriptor::default().has_texture());
    }

    #[test]
    fn any_single_slot_counts_as_textured() {
        let material = PbrMaterialDescriptor {
            normal_texture: TextureRef::new("tex/normal.png"),
            ..Default::default()
        };
        assert!(material.has_texture());
    }
}
