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

//! The stylized (NBR/toon) material descriptor.

use crate::asset::TextureRef;
use crate::math::LinearRgba;
use serde::{Deserialize, Serialize};

/// Which surface family an NBR material shades.
///
/// The area selects shader branches: faces use the face shadow map instead of
/// N·L ramping, hair gets the anisotropic specular strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NbrSurfaceArea {
    /// Skin and clothing.
    #[default]
    Body,
    /// Hair strips.
    Hair,
    /// The face, shaded via the pre-painted face shadow map.
    Face,
}

/// The tunable shading parameters of an NBR material.
///
/// These are independent artist-facing knobs; the defaults below reproduce
/// the neutral look of an uncustomized character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NbrTuning {
    // --- Rim lighting ---
    /// Overall strength of the screen-space rim light.
    pub rim_intensity: f32,
    /// Width of the rim band, in normalized screen units.
    pub rim_width: f32,
    /// Softness of the rim band's inner edge.
    pub rim_softness: f32,
    /// Tint of the rim light.
    pub rim_color: LinearRgba,

    // --- Face shadow falloff ---
    /// Softness of the face shadow-map threshold transition.
    pub face_shadow_softness: f32,
    /// Offset applied to the face shadow threshold, shifting the terminator.
    pub face_shadow_offset: f32,

    // --- Ramp shading ---
    /// Width of the lit→shadow transition band on the shading ramp.
    pub shadow_ramp_width: f32,
    /// Softness of the transition between the two shadow tiers.
    pub shadow_transition_softness: f32,
    /// Tint of the first (outer) shadow tier.
    pub first_shadow_color: LinearRgba,
    /// Tint of the second (deeper) shadow tier.
    pub second_shadow_color: LinearRgba,
    /// Vertical sampling shift into the warm ramp texture.
    pub warm_ramp_shift: f32,
    /// Vertical sampling shift into the cool ramp texture.
    pub cool_ramp_shift: f32,
    /// Blend between the warm (0.0) and cool (1.0) ramps.
    pub day_night_blend: f32,

    // --- Specular response ---
    /// Strength of the stylized specular highlight.
    pub specular_intensity: f32,
    /// Exponent shaping the highlight; higher is tighter.
    pub specular_shininess: f32,
    /// Threshold below which the highlight is cut to zero.
    pub specular_threshold: f32,
    /// Tint of the highlight.
    pub specular_color: LinearRgba,
    /// Tangential shift of the hair specular strip. Hair area only.
    pub hair_specular_shift: f32,

    // --- Indirect light mixing ---
    /// Blend factor between direct ramp shading and the indirect term.
    pub indirect_light_mix: f32,
    /// Intensity of the indirect (environment) contribution.
    pub indirect_light_intensity: f32,
    /// How strongly the light map's occlusion channel darkens indirect light.
    pub indirect_light_occlusion: f32,

    // --- Emission ---
    /// Tint applied to the emissive region of the base color texture.
    pub emission_tint: LinearRgba,
    /// Strength of the emission.
    pub emission_intensity: f32,
    /// Alpha threshold above which a texel counts as emissive.
    pub emission_threshold: f32,

    // --- Misc ---
    /// N·L threshold separating the lit area from the ramped area.
    pub light_area_threshold: f32,
    /// Multiplier feeding the bloom pass for this material.
    pub bloom_factor: f32,
    /// Width of the back-face outline shell, in model units.
    pub outline_width: f32,
    /// Tint of the outline shell.
    pub outline_color: LinearRgba,
}

impl Default for NbrTuning {
    fn default() -> Self {
        Self {
            rim_intensity: 0.5,
            rim_width: 0.3,
            rim_softness: 0.1,
            rim_color: LinearRgba::WHITE,
            face_shadow_softness: 0.05,
            face_shadow_offset: 0.0,
            shadow_ramp_width: 0.5,
            shadow_transition_softness: 0.08,
            first_shadow_color: LinearRgba::rgb(0.9, 0.75, 0.75),
            second_shadow_color: LinearRgba::rgb(0.7, 0.55, 0.6),
            warm_ramp_shift: 0.0,
            cool_ramp_shift: 0.0,
            day_night_blend: 0.0,
            specular_intensity: 1.0,
            specular_shininess: 64.0,
            specular_threshold: 0.5,
            specular_color: LinearRgba::WHITE,
            hair_specular_shift: 0.0,
            indirect_light_mix: 0.3,
            indirect_light_intensity: 1.0,
            indirect_light_occlusion: 1.0,
            emission_tint: LinearRgba::WHITE,
            emission_intensity: 0.0,
            emission_threshold: 0.95,
            light_area_threshold: 0.5,
            bloom_factor: 0.0,
            outline_width: 0.003,
            outline_color: LinearRgba::rgb(0.1, 0.08, 0.08),
        }
    }
}

/// A resolved stylized material.
///
/// Texture references are already resolved (or empty); an empty ramp slot
/// falls back to the analytic two-tier shadow colors in [`NbrTuning`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NbrMaterialDescriptor {
    /// Base color texture.
    pub base_color_texture: TextureRef,
    /// Packed light map (AO / specular mask / ramp selector).
    pub light_map_texture: TextureRef,
    /// Pre-painted face shadow map. Face area only.
    pub face_map_texture: TextureRef,
    /// Daylight shading ramp.
    pub warm_ramp_texture: TextureRef,
    /// Night shading ramp.
    pub cool_ramp_texture: TextureRef,
    /// Which surface family this material shades.
    pub area: NbrSurfaceArea,
    /// The tunable shading parameters.
    pub tuning: NbrTuning,
}

impl NbrMaterialDescriptor {
    /// Whether any texture slot is bound.
    pub fn has_texture(&self) -> bool {
        !(self.base_color_texture.is_empty()
            && self.light_map_texture.is_empty()
            && self.face_map_texture.is_empty()
            && self.warm_ramp_texture.is_empty()
            && self.cool_ramp_texture.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_area_is_body() {
        assert_eq!(NbrSurfaceArea::default(), NbrSurfaceArea::Body);
    }

    #[test]
    fn default_descriptor_is_untextured() {
        assert!(!NbrMaterialDescriptor::default().has_texture());
    }

    #[test]
    fn tuning_parses_partial_records() {
        let tuning: NbrTuning =
            serde_json::from_str(r#"{ "rim_intensity": 0.8, "day_night_blend": 1.0 }"#)
                .expect("partial tuning should parse");
        assert_eq!(tuning.rim_intensity, 0.8);
        assert_eq!(tuning.day_night_blend, 1.0);
        // Untouched knobs keep their defaults.
        assert_eq!(tuning.specular_shininess, 64.0);
    }

    #[test]
    fn area_deserializes_lowercase() {
        let area: NbrSurfaceArea = serde_json::from_str(r#""hair""#).unwrap();
        assert_eq!(area, NbrSurfaceArea::Hair);
    }
}
