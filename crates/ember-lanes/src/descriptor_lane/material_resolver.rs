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

//! Resolves authored material references into render-ready descriptors.

use ember_core::asset::{AssetProvider, AssetResolutionError, TextureRef};
use ember_core::material::{MaterialDescriptor, NbrMaterialDescriptor, PbrMaterialDescriptor};
use std::sync::Arc;

/// Translates a material reference into exactly one [`MaterialDescriptor`]
/// variant, resolving texture paths through the injected [`AssetProvider`].
///
/// Missing *textures* are never failures — an unresolved slot stays empty and
/// the shader takes the factor-only path. The only error condition is the
/// material record (or its auxiliary toon settings record) itself failing to
/// load.
pub struct MaterialResolver {
    provider: Arc<dyn AssetProvider>,
}

impl MaterialResolver {
    /// Creates a resolver backed by `provider`.
    pub fn new(provider: Arc<dyn AssetProvider>) -> Self {
        Self { provider }
    }

    /// Resolves `material_ref` to a descriptor.
    ///
    /// An empty reference yields the default factor-only PBR descriptor —
    /// untextured geometry is a normal state, not an error.
    pub fn resolve(&self, material_ref: &str) -> Result<MaterialDescriptor, AssetResolutionError> {
        if material_ref.is_empty() {
            return Ok(MaterialDescriptor::default());
        }

        let record = self.provider.load_material(material_ref)?;

        if record.is_nbr_material {
            let settings = self
                .provider
                .load_material_settings(&record.nbr_settings_ref)?;
            Ok(MaterialDescriptor::Nbr(NbrMaterialDescriptor {
                base_color_texture: self.resolve_texture(&settings.base_color_texture),
                light_map_texture: self.resolve_texture(&settings.light_map_texture),
                face_map_texture: self.resolve_texture(&settings.face_map_texture),
                warm_ramp_texture: self.resolve_texture(&settings.warm_ramp_texture),
                cool_ramp_texture: self.resolve_texture(&settings.cool_ramp_texture),
                area: settings.area,
                tuning: settings.tuning,
            }))
        } else {
            Ok(MaterialDescriptor::Pbr(PbrMaterialDescriptor {
                base_color_texture: self.resolve_texture(&record.base_color_texture),
                metallic_roughness_texture: self
                    .resolve_texture(&record.metallic_roughness_texture),
                normal_texture: self.resolve_texture(&record.normal_texture),
                occlusion_texture: self.resolve_texture(&record.occlusion_texture),
                emissive_texture: self.resolve_texture(&record.emissive_texture),
                metallic_factor: record.metallic_factor,
                roughness_factor: record.roughness_factor,
                normal_scale: record.normal_scale,
                occlusion_strength: record.occlusion_strength,
                base_color_factor: record.base_color_factor,
                emissive_factor: record.emissive_factor,
            }))
        }
    }

    /// Resolves one texture slot. Empty passes through; a reference the
    /// provider cannot resolve degrades to empty with a warning.
    fn resolve_texture(&self, reference: &TextureRef) -> TextureRef {
        if reference.is_empty() {
            return TextureRef::EMPTY;
        }
        match self.provider.resolve_path(reference.as_str()) {
            Ok(path) => TextureRef::new(path),
            Err(err) => {
                log::warn!("Texture '{reference}' did not resolve, using factor only: {err}");
                TextureRef::EMPTY
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::asset::{MaterialRecord, ToonSettingsRecord};
    use ember_core::material::NbrSurfaceArea;
    use std::collections::HashMap;

    /// In-memory provider fixture mapping references to records.
    #[derive(Default)]
    struct FixtureProvider {
        materials: HashMap<String, MaterialRecord>,
        settings: HashMap<String, ToonSettingsRecord>,
    }

    impl AssetProvider for FixtureProvider {
        fn resolve_path(&self, reference: &str) -> Result<String, AssetResolutionError> {
            if reference.starts_with("missing/") {
                Err(AssetResolutionError::NotFound {
                    reference: reference.into(),
                })
            } else {
                Ok(format!("/assets/{reference}"))
            }
        }

        fn load_material(&self, reference: &str) -> Result<MaterialRecord, AssetResolutionError> {
            self.materials
                .get(reference)
                .cloned()
                .ok_or_else(|| AssetResolutionError::NotFound {
                    reference: reference.into(),
                })
        }

        fn load_material_settings(
            &self,
            reference: &str,
        ) -> Result<ToonSettingsRecord, AssetResolutionError> {
            self.settings
                .get(reference)
                .cloned()
                .ok_or_else(|| AssetResolutionError::NotFound {
                    reference: reference.into(),
                })
        }
    }

    #[test]
    fn empty_reference_yields_default_pbr() {
        let resolver = MaterialResolver::new(Arc::new(FixtureProvider::default()));
        let material = resolver.resolve("").expect("empty ref is not an error");
        assert!(!material.is_nbr());
        assert!(!material.has_texture());
    }

    #[test]
    fn pbr_record_yields_pbr_variant() {
        let mut provider = FixtureProvider::default();
        provider.materials.insert(
            "materials/rock.mat".into(),
            MaterialRecord {
                base_color_texture: "tex/rock_albedo.png".into(),
                roughness_factor: 0.9,
                ..Default::default()
            },
        );
        let resolver = MaterialResolver::new(Arc::new(provider));

        let material = resolver.resolve("materials/rock.mat").unwrap();
        match material {
            MaterialDescriptor::Pbr(pbr) => {
                assert_eq!(
                    pbr.base_color_texture.as_str(),
                    "/assets/tex/rock_albedo.png"
                );
                assert_eq!(pbr.roughness_factor, 0.9);
            }
            MaterialDescriptor::Nbr(_) => panic!("expected the PBR variant"),
        }
    }

    #[test]
    fn nbr_record_loads_the_settings_record() {
        let mut provider = FixtureProvider::default();
        provider.materials.insert(
            "materials/avatar_face.mat".into(),
            MaterialRecord {
                is_nbr_material: true,
                nbr_settings_ref: "materials/avatar_face.toon".into(),
                ..Default::default()
            },
        );
        provider.settings.insert(
            "materials/avatar_face.toon".into(),
            ToonSettingsRecord {
                face_map_texture: "tex/face_shadow.png".into(),
                area: NbrSurfaceArea::Face,
                ..Default::default()
            },
        );
        let resolver = MaterialResolver::new(Arc::new(provider));

        let material = resolver.resolve("materials/avatar_face.mat").unwrap();
        match material {
            MaterialDescriptor::Nbr(nbr) => {
                assert_eq!(nbr.area, NbrSurfaceArea::Face);
                assert_eq!(nbr.face_map_texture.as_str(), "/assets/tex/face_shadow.png");
                assert!(nbr.warm_ramp_texture.is_empty());
            }
            MaterialDescriptor::Pbr(_) => panic!("expected the NBR variant"),
        }
    }

    #[test]
    fn unresolvable_texture_degrades_to_empty() {
        let mut provider = FixtureProvider::default();
        provider.materials.insert(
            "materials/broken.mat".into(),
            MaterialRecord {
                base_color_texture: "missing/albedo.png".into(),
                ..Default::default()
            },
        );
        let resolver = MaterialResolver::new(Arc::new(provider));

        let material = resolver.resolve("materials/broken.mat").unwrap();
        assert!(!material.has_texture());
    }

    #[test]
    fn missing_material_record_is_an_error() {
        let resolver = MaterialResolver::new(Arc::new(FixtureProvider::default()));
        let err = resolver.resolve("materials/nope.mat").unwrap_err();
        assert!(matches!(err, AssetResolutionError::NotFound { .. }));
    }

    #[test]
    fn missing_settings_record_is_an_error() {
        let mut provider = FixtureProvider::default();
        provider.materials.insert(
            "materials/half_toon.mat".into(),
            MaterialRecord {
                is_nbr_material: true,
                nbr_settings_ref: "materials/absent.toon".into(),
                ..Default::default()
            },
        );
        let resolver = MaterialResolver::new(Arc::new(provider));
        assert!(resolver.resolve("materials/half_toon.mat").is_err());
    }
}
