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

//! Light descriptions consumed by the render passes.

use crate::math::{LinearRgba, Vec3};
use serde::{Deserialize, Serialize};

/// A directional light source illuminating from a uniform direction.
///
/// Simulates an infinitely distant source like the sun: no position, parallel
/// rays, no falloff. The single shadow-casting light of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// The direction the light is pointing (normalized), from the light
    /// toward the scene.
    pub direction: Vec3,
    /// The light color in linear space.
    pub color: LinearRgba,
    /// Intensity multiplier; 1.0 is standard.
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            // Light from above and slightly forward.
            direction: Vec3::new(0.0, -1.0, -0.5).normalize(),
            color: LinearRgba::WHITE,
            intensity: 1.0,
        }
    }
}

/// A point light emitting in all directions from a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// World-space position.
    pub position: Vec3,
    /// The light color in linear space.
    pub color: LinearRgba,
    /// Intensity in lumens.
    pub intensity: f32,
    /// Maximum range in world units; beyond it the light is culled.
    pub range: f32,
    /// Whether this light renders a shadow cube this frame.
    pub shadow_enabled: bool,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: LinearRgba::WHITE,
            intensity: 100.0,
            range: 10.0,
            shadow_enabled: false,
        }
    }
}

/// The frame's lighting inputs, supplied by the simulation side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LightingEnvironment {
    /// The shadow-casting directional light.
    pub directional: DirectionalLight,
    /// Local point lights.
    pub point_lights: Vec<PointLight>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn default_directional_light_is_normalized() {
        let light = DirectionalLight::default();
        assert!(approx_eq(light.direction.length(), 1.0));
    }

    #[test]
    fn default_environment_has_no_point_lights() {
        assert!(LightingEnvironment::default().point_lights.is_empty());
    }
}
