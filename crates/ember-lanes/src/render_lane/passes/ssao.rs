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

//! Screen-space ambient occlusion: generation and the follow-up blur.

use crate::render_lane::{
    DrawCommand, FrameResources, PassError, PassExecution, RenderPass,
};

/// Generates the raw SSAO buffer from scene depth and normals.
#[derive(Debug)]
pub struct SsaoGeneratePass {
    /// Occlusion sampling radius in view-space units.
    pub radius: f32,
    /// Occlusion strength multiplier.
    pub intensity: f32,
    enabled: bool,
}

impl SsaoGeneratePass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "ssao_generate";

    /// Creates the pass with default sampling parameters.
    pub fn new() -> Self {
        Self {
            radius: 0.5,
            intensity: 1.0,
            enabled: true,
        }
    }
}

impl Default for SsaoGeneratePass {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPass for SsaoGeneratePass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, resources: &FrameResources<'_>) -> Result<(), PassError> {
        // An empty frame has no depth to sample; generating would only
        // produce a cleared buffer.
        self.enabled = !resources.entities.is_empty();
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        if !self.enabled {
            return Ok(());
        }
        execution.sink.submit(DrawCommand::Fullscreen { pass: Self::NAME });
        execution.artifacts.ssao_generated = true;
        Ok(())
    }
}

/// Blurs the raw SSAO buffer to suppress sampling noise.
///
/// Consumes the buffer produced by [`SsaoGeneratePass`]; without it there is
/// nothing to blur and the pass skips.
#[derive(Debug, Default)]
pub struct SsaoBlurPass;

impl SsaoBlurPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "ssao_blur";

    /// Creates the pass.
    pub fn new() -> Self {
        Self
    }
}

impl RenderPass for SsaoBlurPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, _resources: &FrameResources<'_>) -> Result<(), PassError> {
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        if !execution.artifacts.ssao_generated {
            return Err(PassError::MissingResource("ssao buffer"));
        }
        execution.sink.submit(DrawCommand::Fullscreen { pass: Self::NAME });
        Ok(())
    }
}
