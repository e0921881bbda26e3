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

//! Fullscreen post-processing passes over the scene color buffer.

use crate::render_lane::{
    DrawCommand, FrameResources, PassError, PassExecution, RenderPass,
};

/// Submits a fullscreen draw if the scene color buffer exists this frame;
/// shared body of the post passes.
fn submit_over_scene_color(
    pass: &'static str,
    execution: &mut PassExecution<'_>,
) -> Result<(), PassError> {
    if !execution.artifacts.scene_color_rendered {
        return Err(PassError::MissingResource("scene color buffer"));
    }
    execution.sink.submit(DrawCommand::Fullscreen { pass });
    Ok(())
}

/// The combined tonemap/exposure resolve over the scene color buffer.
#[derive(Debug, Default)]
pub struct PostProcessPass;

impl PostProcessPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "post_process";

    /// Creates the pass.
    pub fn new() -> Self {
        Self
    }
}

impl RenderPass for PostProcessPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, _resources: &FrameResources<'_>) -> Result<(), PassError> {
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        submit_over_scene_color(Self::NAME, execution)
    }
}

/// Darkens the frame toward its corners.
#[derive(Debug)]
pub struct VignettePass {
    /// Vignette strength in `[0, 1]`.
    pub strength: f32,
}

impl VignettePass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "vignette";

    /// Creates the pass with a subtle default strength.
    pub fn new() -> Self {
        Self { strength: 0.25 }
    }
}

impl Default for VignettePass {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPass for VignettePass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, _resources: &FrameResources<'_>) -> Result<(), PassError> {
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        submit_over_scene_color(Self::NAME, execution)
    }
}

/// Applies the grading LUT to the tonemapped frame.
#[derive(Debug, Default)]
pub struct ColorGradingPass;

impl ColorGradingPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "color_grading";

    /// Creates the pass.
    pub fn new() -> Self {
        Self
    }
}

impl RenderPass for ColorGradingPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, _resources: &FrameResources<'_>) -> Result<(), PassError> {
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        submit_over_scene_color(Self::NAME, execution)
    }
}

/// Separable gaussian blur used by bloom and depth-of-field composition.
#[derive(Debug)]
pub struct BlurPass {
    /// Number of separable blur iterations.
    pub iterations: u32,
}

impl BlurPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "blur";

    /// Creates the pass with one horizontal+vertical iteration.
    pub fn new() -> Self {
        Self { iterations: 1 }
    }
}

impl Default for BlurPass {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPass for BlurPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, _resources: &FrameResources<'_>) -> Result<(), PassError> {
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        if !execution.artifacts.scene_color_rendered {
            return Err(PassError::MissingResource("scene color buffer"));
        }
        // Each iteration is a horizontal then a vertical fullscreen draw.
        for _ in 0..self.iterations * 2 {
            execution.sink.submit(DrawCommand::Fullscreen { pass: Self::NAME });
        }
        Ok(())
    }
}
