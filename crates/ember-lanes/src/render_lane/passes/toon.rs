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

//! The stylized-shading pass for NBR materials.

use crate::render_lane::{
    DrawCommand, FrameResources, PassError, PassExecution, RenderPass, ShadingKind,
};
use ember_core::material::NbrTuning;
use ember_core::math::saturate;
use ember_core::renderer::ShadingParams;

/// Hermite smoothstep between two edges.
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 >= edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// The two-tier ramp factor for body/hair shading.
///
/// Maps a half-lambert term (`dot_nl` remapped into `[0, 1]`) onto the lit
/// tier (1.0), the first shadow tier (0.5), or the second shadow tier (0.0),
/// with smoothed transitions whose width comes from the tuning block. This is
/// the CPU reference of the ramp the shader samples.
pub fn shadow_ramp_tier(dot_nl: f32, tuning: &NbrTuning) -> f32 {
    let half_lambert = saturate(dot_nl * 0.5 + 0.5);
    let lit = smoothstep(
        tuning.light_area_threshold - tuning.shadow_transition_softness,
        tuning.light_area_threshold + tuning.shadow_transition_softness,
        half_lambert,
    );
    let second_edge = tuning.light_area_threshold * (1.0 - tuning.shadow_ramp_width);
    let deep = smoothstep(
        second_edge - tuning.shadow_transition_softness,
        second_edge + tuning.shadow_transition_softness,
        half_lambert,
    );
    // deep gates the first tier in; lit lifts it to full.
    0.5 * deep + 0.5 * lit
}

/// Face shadow visibility from the pre-painted face map.
///
/// The face map stores, per texel, the light yaw fraction at which the texel
/// falls into shadow. A texel is lit while the map value exceeds the current
/// fraction (shifted by the tuned offset), smoothed by the tuned softness.
pub fn face_shadow_factor(face_map_value: f32, light_yaw_fraction: f32, tuning: &NbrTuning) -> f32 {
    let threshold = saturate(light_yaw_fraction + tuning.face_shadow_offset);
    smoothstep(
        threshold - tuning.face_shadow_softness,
        threshold + tuning.face_shadow_softness,
        face_map_value,
    )
}

/// Renders all NBR-shaded entities.
///
/// Stylized materials light per draw in both pipeline modes — ramp shading
/// does not decompose into geometry-buffer attributes, so the deferred
/// strategy forward-lights this pass over the resolved scene.
#[derive(Debug, Default)]
pub struct NbrPass {
    visible: Vec<usize>,
}

impl NbrPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "nbr_stylized";

    /// Creates the pass.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderPass for NbrPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, resources: &FrameResources<'_>) -> Result<(), PassError> {
        self.visible = resources
            .entities
            .iter()
            .enumerate()
            .filter(|(_, entity)| matches!(entity.shading, ShadingParams::Nbr(_)))
            .map(|(index, _)| index)
            .collect();
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        for &index in &self.visible {
            let entity = &execution.entities[index];
            execution.sink.submit(DrawCommand::Mesh {
                pass: Self::NAME,
                instance: entity.instance,
                mesh: entity.mesh,
                shading: ShadingKind::Toon,
            });
        }
        Ok(())
    }
}
