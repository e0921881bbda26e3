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

//! Render-ready material descriptors.
//!
//! A resolved material is exactly one of two shading models: the standard
//! metallic-roughness PBR model, or the stylized NBR (toon) model. The two are
//! held in a tagged union so there is no flag that can disagree with which
//! fields were populated.

mod nbr;
mod pbr;

pub use nbr::{NbrMaterialDescriptor, NbrSurfaceArea, NbrTuning};
pub use pbr::PbrMaterialDescriptor;

/// A fully resolved material, ready to flatten into a render entity.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialDescriptor {
    /// Standard physically based metallic-roughness shading.
    Pbr(PbrMaterialDescriptor),
    /// Stylized toon shading.
    Nbr(NbrMaterialDescriptor),
}

impl MaterialDescriptor {
    /// Whether this material uses the stylized shading model.
    #[inline]
    pub fn is_nbr(&self) -> bool {
        matches!(self, MaterialDescriptor::Nbr(_))
    }

    /// Whether any texture slot of the active model is bound.
    ///
    /// `false` means every slot is empty and the shader takes the
    /// factor-only path.
    pub fn has_texture(&self) -> bool {
        match self {
            MaterialDescriptor::Pbr(pbr) => pbr.has_texture(),
            MaterialDescriptor::Nbr(nbr) => nbr.has_texture(),
        }
    }
}

impl Default for MaterialDescriptor {
    /// The default material: factor-only PBR.
    fn default() -> Self {
        MaterialDescriptor::Pbr(PbrMaterialDescriptor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_untextured_pbr() {
        let material = MaterialDescriptor::default();
        assert!(!material.is_nbr());
        assert!(!material.has_texture());
    }

    #[test]
    fn discriminant_follows_variant() {
        let nbr = MaterialDescriptor::Nbr(NbrMaterialDescriptor::default());
        assert!(nbr.is_nbr());
        let pbr = MaterialDescriptor::Pbr(PbrMaterialDescriptor::default());
        assert!(!pbr.is_nbr());
    }
}
