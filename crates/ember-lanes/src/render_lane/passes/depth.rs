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

//! Depth-side passes: the pre-depth layer and the screen-space PCF mask.

use crate::render_lane::{
    DrawCommand, FrameResources, PassError, PassExecution, RenderPass, ShadingKind,
};
use ember_core::math::{Vec2, Vec3};
use ember_core::shading::{ndc_to_uv, pcf_shadow, DepthMap, PcfSettings, PoissonDisk};

/// Lays down scene depth before any color pass, so later stages can reject
/// occluded fragments early.
#[derive(Debug, Default)]
pub struct PreDepthPass {
    drawables: Vec<usize>,
}

impl PreDepthPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "pre_depth";

    /// Creates the pass.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderPass for PreDepthPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, resources: &FrameResources<'_>) -> Result<(), PassError> {
        self.drawables = (0..resources.entities.len()).collect();
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        for &index in &self.drawables {
            let entity = &execution.entities[index];
            execution.sink.submit(DrawCommand::Mesh {
                pass: Self::NAME,
                instance: entity.instance,
                mesh: entity.mesh,
                shading: ShadingKind::DepthOnly,
            });
        }
        execution.artifacts.pre_depth_rendered = true;
        Ok(())
    }
}

/// Generates the screen-space shadow visibility mask by PCF-filtering the
/// directional shadow map.
///
/// Owns the frame-stable Poisson disk; the disk is generated once per
/// sampling context from the configured seed and passed by value into the
/// sampling routine — no hidden shared sample buffer.
pub struct PcfMaskPass {
    disk: PoissonDisk,
    settings: PcfSettings,
    filter_radius: f32,
}

impl PcfMaskPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "pcf_mask";

    /// Creates the pass with its sampling context.
    pub fn new(seed: u32, settings: PcfSettings, filter_radius: f32) -> Self {
        Self {
            disk: PoissonDisk::generate(seed),
            settings,
            filter_radius,
        }
    }

    /// Evaluates shadow visibility for one mask texel.
    ///
    /// `ndc` is the receiver position in light-space NDC; `depth` its
    /// light-space depth. Called per pixel by the device with its shadow-map
    /// sampler — the second half of the fixed shading-stage contract.
    pub fn mask_visibility(&self, map: &impl DepthMap, ndc: Vec2, depth: f32) -> f32 {
        let uv = ndc_to_uv(ndc);
        pcf_shadow(
            map,
            Vec3::new(uv.x, uv.y, depth),
            self.filter_radius,
            &self.disk,
            &self.settings,
        )
    }
}

impl RenderPass for PcfMaskPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, resources: &FrameResources<'_>) -> Result<(), PassError> {
        // The disk and comparison constants are fixed for the context's
        // lifetime; per-frame settings changes only affect the radius.
        self.filter_radius = resources.settings.shadow_filter_radius;
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        if execution.artifacts.light_view_proj.is_none()
            || !execution.artifacts.shadow_map_rendered
        {
            return Err(PassError::MissingResource("directional shadow map"));
        }
        execution.sink.submit(DrawCommand::Fullscreen { pass: Self::NAME });
        execution.artifacts.shadow_mask_generated = true;
        Ok(())
    }
}
