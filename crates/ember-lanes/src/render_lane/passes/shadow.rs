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

//! Shadow map passes: the directional sun map and local point-light maps.

use crate::render_lane::{
    DrawCommand, FrameResources, PassError, PassExecution, RenderPass, ShadingKind,
};
use ember_core::math::{Aabb, Mat4, Vec3};
use ember_core::renderer::PointLight;

/// Extra depth range behind and in front of the fitted caster box, so
/// casters just outside the camera's view still land in the map.
const SHADOW_Z_PADDING: f32 = 100.0;

/// Renders the directional light's shadow map.
///
/// Fits an orthographic frustum around the union of caster bounds each frame
/// and publishes the light view-projection for the PCF mask and main passes.
#[derive(Debug, Default)]
pub struct DirectionalShadowPass {
    light_view_proj: Option<Mat4>,
    casters: Vec<usize>,
}

impl DirectionalShadowPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "directional_shadow";

    /// Creates the pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// The light-space view-projection fitted during the last prepare.
    pub fn light_view_proj(&self) -> Option<Mat4> {
        self.light_view_proj
    }

    fn fit_light_frustum(scene_bounds: &Aabb, light_dir: Vec3) -> Option<Mat4> {
        let light_dir = light_dir.normalize();
        if light_dir == Vec3::ZERO {
            return None;
        }
        let up = if light_dir.y.abs() > 0.99 {
            Vec3::Z
        } else {
            Vec3::Y
        };

        let center = scene_bounds.center();
        let radius = scene_bounds.half_extent().length().max(1.0);
        let eye = center - light_dir * (radius * 2.0);
        let light_view = Mat4::look_at_rh(eye, center, up)?;

        // Re-enclose the caster box in light space and fit an ortho around it.
        let light_space = scene_bounds.transformed(&light_view);
        let proj = Mat4::orthographic_rh_zo(
            light_space.min.x,
            light_space.max.x,
            light_space.min.y,
            light_space.max.y,
            -light_space.max.z - SHADOW_Z_PADDING,
            -light_space.min.z + SHADOW_Z_PADDING,
        );
        Some(proj * light_view)
    }
}

impl RenderPass for DirectionalShadowPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, resources: &FrameResources<'_>) -> Result<(), PassError> {
        // Every drawable casts; both shading models write plain depth here.
        self.casters = (0..resources.entities.len()).collect();

        if resources.entities.is_empty() {
            self.light_view_proj = None;
            return Ok(());
        }

        let mut scene_bounds = resources.entities[0].bounds;
        for entity in &resources.entities[1..] {
            scene_bounds.min = scene_bounds.min.min(entity.bounds.min);
            scene_bounds.max = scene_bounds.max.max(entity.bounds.max);
        }

        self.light_view_proj =
            Self::fit_light_frustum(&scene_bounds, resources.lights.directional.direction);
        if self.light_view_proj.is_none() {
            return Err(PassError::MissingResource("directional light frustum"));
        }
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        let Some(view_proj) = self.light_view_proj else {
            // Nothing to cast; later consumers see no shadow map this frame.
            return Ok(());
        };

        for &index in &self.casters {
            let entity = &execution.entities[index];
            execution.sink.submit(DrawCommand::Mesh {
                pass: Self::NAME,
                instance: entity.instance,
                mesh: entity.mesh,
                shading: ShadingKind::DepthOnly,
            });
        }

        execution.artifacts.light_view_proj = Some(view_proj);
        execution.artifacts.shadow_map_rendered = true;
        Ok(())
    }
}

/// Renders depth cubes for shadow-enabled point lights.
#[derive(Debug, Default)]
pub struct PointShadowPass {
    shadow_lights: Vec<PointLight>,
}

impl PointShadowPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "point_shadow";

    /// Creates the pass.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderPass for PointShadowPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, resources: &FrameResources<'_>) -> Result<(), PassError> {
        self.shadow_lights = resources
            .lights
            .point_lights
            .iter()
            .filter(|light| light.shadow_enabled)
            .copied()
            .collect();
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        for _light in &self.shadow_lights {
            for entity in execution.entities {
                execution.sink.submit(DrawCommand::Mesh {
                    pass: Self::NAME,
                    instance: entity.instance,
                    mesh: entity.mesh,
                    shading: ShadingKind::DepthOnly,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::math::Vec4;

    #[test]
    fn fitted_frustum_contains_the_scene_center() {
        let bounds = Aabb::new(Vec3::new(-2.0, 0.0, -2.0), Vec3::new(2.0, 4.0, 2.0));
        let view_proj =
            DirectionalShadowPass::fit_light_frustum(&bounds, Vec3::new(0.3, -1.0, 0.2))
                .expect("frustum fits");

        let center = bounds.center();
        let clip = view_proj * Vec4::from_vec3(center, 1.0);
        // Orthographic: no divide needed. The center must land inside clip
        // space on every axis.
        assert!(clip.x.abs() <= 1.0);
        assert!(clip.y.abs() <= 1.0);
        assert!((0.0..=1.0).contains(&clip.z));
    }

    #[test]
    fn straight_down_light_still_fits() {
        let bounds = Aabb::UNIT;
        assert!(DirectionalShadowPass::fit_light_frustum(&bounds, -Vec3::Y).is_some());
    }

    #[test]
    fn zero_direction_does_not_fit() {
        assert!(DirectionalShadowPass::fit_light_frustum(&Aabb::UNIT, Vec3::ZERO).is_none());
    }
}
