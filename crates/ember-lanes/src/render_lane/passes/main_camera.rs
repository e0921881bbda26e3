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

//! The main camera pass: lit geometry into the scene color buffer.

use crate::render_lane::{
    DrawCommand, FrameResources, LightingMode, PassError, PassExecution, RenderPass, ShadingKind,
};
use ember_core::math::{Mat4, Vec3};
use ember_core::renderer::{DirectionalLight, ShadingParams};
use ember_core::shading::{base_reflectivity, evaluate_brdf};

/// The interpolated per-pixel inputs the device hands to the shading stage.
///
/// This struct is the fixed contract between the main pass and the
/// rasterizer: whatever the backend, these are the quantities arriving at
/// [`MainCameraPass::shade_pixel`].
#[derive(Debug, Clone, Copy)]
pub struct SurfaceSample {
    /// Interpolated surface normal (normalized).
    pub normal: Vec3,
    /// Direction from the surface toward the camera (normalized).
    pub view_dir: Vec3,
    /// Sampled or factor-derived base color.
    pub base_color: Vec3,
    /// Metallic value at the pixel.
    pub metallic: f32,
    /// Roughness value at the pixel.
    pub roughness: f32,
    /// Shadow visibility in `[0, 1]`, from the PCF mask.
    pub shadow_visibility: f32,
}

/// Renders all PBR-shaded entities from the main camera.
///
/// In forward mode the draws carry full per-draw lighting; in deferred mode
/// they fill the geometry buffer and lighting happens in the resolve.
#[derive(Debug, Default)]
pub struct MainCameraPass {
    visible: Vec<usize>,
    view_proj: Mat4,
    light: DirectionalLight,
}

impl MainCameraPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "main_camera";

    /// Creates the pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates the lit color of one pixel.
    ///
    /// Invoked per pixel with device-supplied interpolated inputs; combines
    /// the Cook-Torrance BRDF with the directional light and the PCF shadow
    /// visibility.
    pub fn shade_pixel(&self, sample: &SurfaceSample) -> Vec3 {
        let light_dir = -self.light.direction.normalize();
        let f0 = base_reflectivity(sample.base_color, sample.metallic);
        let radiance = evaluate_brdf(
            light_dir,
            sample.view_dir,
            sample.normal,
            f0,
            sample.base_color,
            sample.metallic,
            sample.roughness,
        );
        radiance
            * self.light.color.to_vec3()
            * (self.light.intensity * sample.shadow_visibility)
    }
}

impl RenderPass for MainCameraPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, resources: &FrameResources<'_>) -> Result<(), PassError> {
        self.view_proj = resources.view_proj;
        self.light = resources.lights.directional;
        self.visible = resources
            .entities
            .iter()
            .enumerate()
            .filter(|(_, entity)| matches!(entity.shading, ShadingParams::Pbr(_)))
            .map(|(index, _)| index)
            .collect();
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        let shading = match execution.lighting {
            LightingMode::PerDraw => ShadingKind::Lit,
            LightingMode::GBuffer => ShadingKind::GBuffer,
        };
        for &index in &self.visible {
            let entity = &execution.entities[index];
            execution.sink.submit(DrawCommand::Mesh {
                pass: Self::NAME,
                instance: entity.instance,
                mesh: entity.mesh,
                shading,
            });
        }
        execution.artifacts.scene_color_rendered = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::math::LinearRgba;

    fn lit_sample(visibility: f32) -> SurfaceSample {
        SurfaceSample {
            normal: Vec3::Y,
            view_dir: Vec3::new(0.0, 1.0, 0.3).normalize(),
            base_color: Vec3::new(0.8, 0.6, 0.4),
            metallic: 0.0,
            roughness: 0.5,
            shadow_visibility: visibility,
        }
    }

    fn overhead_light_pass() -> MainCameraPass {
        MainCameraPass {
            light: DirectionalLight {
                direction: -Vec3::Y,
                color: LinearRgba::WHITE,
                intensity: 1.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn shade_pixel_is_dark_in_full_shadow() {
        let pass = overhead_light_pass();
        let shaded = pass.shade_pixel(&lit_sample(0.0));
        assert_eq!(shaded, Vec3::ZERO);
    }

    #[test]
    fn shade_pixel_scales_with_visibility() {
        let pass = overhead_light_pass();
        let full = pass.shade_pixel(&lit_sample(1.0));
        let half = pass.shade_pixel(&lit_sample(0.5));
        assert!(full.x > 0.0);
        assert!((half.x - full.x * 0.5).abs() < 1e-6);
    }
}
