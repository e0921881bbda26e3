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

//! The asset-provider contract and the typed records it serves.

use crate::material::{NbrSurfaceArea, NbrTuning};
use crate::math::{LinearRgba, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::TextureRef;

/// An error produced when an asset record cannot be resolved or loaded.
///
/// This is fatal only to the part that referenced the asset: the part is
/// dropped from the frame and the failure logged once. Missing *texture*
/// references never produce this error — absence means "factor-only".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetResolutionError {
    /// The referenced asset is not known to the provider.
    NotFound {
        /// The reference that failed to resolve.
        reference: String,
    },
    /// The asset exists but its record could not be loaded or parsed.
    LoadFailed {
        /// The reference whose record failed to load.
        reference: String,
        /// The underlying decoding or I/O error, stringified.
        details: String,
    },
}

impl fmt::Display for AssetResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetResolutionError::NotFound { reference } => {
                write!(f, "Asset not found: '{reference}'")
            }
            AssetResolutionError::LoadFailed { reference, details } => {
                write!(f, "Failed to load asset record '{reference}': {details}")
            }
        }
    }
}

impl std::error::Error for AssetResolutionError {}

/// The raw material record as authored, before descriptor resolution.
///
/// `is_nbr_material` selects the shading model: when `true`, the resolver
/// loads the auxiliary [`ToonSettingsRecord`] named by `nbr_settings_ref` and
/// emits an NBR descriptor; the PBR fields below are then ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialRecord {
    /// Whether this material uses the stylized (NBR) shading model.
    pub is_nbr_material: bool,
    /// Reference to the auxiliary toon settings record. Only read when
    /// `is_nbr_material` is `true`.
    pub nbr_settings_ref: String,

    /// Base color (albedo) texture reference.
    pub base_color_texture: TextureRef,
    /// Combined metallic-roughness texture reference (glTF channel layout).
    pub metallic_roughness_texture: TextureRef,
    /// Tangent-space normal map reference.
    pub normal_texture: TextureRef,
    /// Ambient-occlusion texture reference.
    pub occlusion_texture: TextureRef,
    /// Emissive texture reference.
    pub emissive_texture: TextureRef,

    /// Metallic factor (0.0 = dielectric, 1.0 = metal).
    pub metallic_factor: f32,
    /// Roughness factor (0.0 = smooth, 1.0 = rough).
    pub roughness_factor: f32,
    /// Scale applied to the sampled normal's XY before renormalization.
    pub normal_scale: f32,
    /// Strength of the sampled occlusion term.
    pub occlusion_strength: f32,
    /// Base color factor, multiplied with the base color texture.
    pub base_color_factor: LinearRgba,
    /// Emissive color factor (RGB).
    pub emissive_factor: Vec3,
}

impl Default for MaterialRecord {
    fn default() -> Self {
        Self {
            is_nbr_material: false,
            nbr_settings_ref: String::new(),
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

/// The auxiliary settings record backing an NBR (toon) material.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToonSettingsRecord {
    /// Base color texture reference.
    pub base_color_texture: TextureRef,
    /// Light map reference (packed AO / specular-mask / ramp-selector).
    pub light_map_texture: TextureRef,
    /// Face shadow map reference; only meaningful for the face area.
    pub face_map_texture: TextureRef,
    /// Daylight shading ramp reference.
    pub warm_ramp_texture: TextureRef,
    /// Night shading ramp reference.
    pub cool_ramp_texture: TextureRef,
    /// Which surface family this material shades.
    pub area: NbrSurfaceArea,
    /// The tunable shading parameters.
    pub tuning: NbrTuning,
}

/// The contract the descriptor stage resolves assets through.
///
/// Implemented outside the frame core (virtual file system, pack files,
/// in-memory fixtures in tests). Injected explicitly — the core never reaches
/// for ambient global state to find its providers.
pub trait AssetProvider: Send + Sync {
    /// Resolves a logical reference to an absolute path or storage key.
    fn resolve_path(&self, reference: &str) -> Result<String, AssetResolutionError>;

    /// Loads the material record behind `reference`.
    fn load_material(&self, reference: &str) -> Result<MaterialRecord, AssetResolutionError>;

    /// Loads the toon settings record behind `reference`.
    fn load_material_settings(
        &self,
        reference: &str,
    ) -> Result<ToonSettingsRecord, AssetResolutionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_record_default_is_factor_only_pbr() {
        let record = MaterialRecord::default();
        assert!(!record.is_nbr_material);
        assert!(record.base_color_texture.is_empty());
        assert_eq!(record.roughness_factor, 0.5);
        assert_eq!(record.base_color_factor, LinearRgba::WHITE);
    }

    #[test]
    fn material_record_parses_partial_json() {
        // Authored records routinely omit defaulted fields.
        let record: MaterialRecord =
            serde_json::from_str(r#"{ "metallic_factor": 1.0, "roughness_factor": 0.2 }"#)
                .expect("partial record should parse");
        assert_eq!(record.metallic_factor, 1.0);
        assert_eq!(record.roughness_factor, 0.2);
        assert!(record.normal_texture.is_empty());
    }

    #[test]
    fn toon_record_parses_with_area() {
        let record: ToonSettingsRecord =
            serde_json::from_str(r#"{ "area": "face", "face_map_texture": "tex/face_shadow.png" }"#)
                .expect("toon record should parse");
        assert_eq!(record.area, NbrSurfaceArea::Face);
        assert_eq!(record.face_map_texture.as_str(), "tex/face_shadow.png");
    }

    #[test]
    fn error_display_names_the_reference() {
        let err = AssetResolutionError::NotFound {
            reference: "materials/missing.mat".into(),
        };
        assert_eq!(format!("{err}"), "Asset not found: 'materials/missing.mat'");
    }
}
