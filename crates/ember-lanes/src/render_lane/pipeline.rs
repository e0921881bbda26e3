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

//! The render pipeline: an ordered registry of passes and the two terminal
//! render strategies.

use crate::config::{RenderMode, RendererSettings};
use crate::render_lane::passes::{
    BlurPass, ColorGradingPass, DirectionalShadowPass, MainCameraPass, NbrPass, ParticlePass,
    PcfMaskPass, PickingPass, PointShadowPass, PostProcessPass, PreDepthPass, SsaoBlurPass,
    SsaoGeneratePass, VignettePass,
};
use crate::render_lane::{
    CommandSink, DrawCommand, FrameArtifacts, FrameResources, LightingMode, PassExecution,
    RenderPass,
};
use ember_core::renderer::RenderEntity;

/// The fullscreen resolve recorded by the deferred strategy after the
/// geometry passes have filled the G-buffer.
const DEFERRED_RESOLVE_PASS: &str = "deferred_lighting_resolve";

/// Owns the ordered pass list and drives it once per frame.
///
/// The pass sequence is **fixed and order-significant** — later passes
/// consume buffers earlier passes produce — and is represented as data (the
/// list) rather than code structure, so passes stay testable in isolation.
pub struct RenderPipeline {
    passes: Vec<Box<dyn RenderPass>>,
    ready: Vec<bool>,
}

impl RenderPipeline {
    /// Creates an empty pipeline. Most callers want
    /// [`with_default_passes`](Self::with_default_passes).
    pub fn new() -> Self {
        Self {
            passes: Vec::new(),
            ready: Vec::new(),
        }
    }

    /// Builds the canonical pipeline in its fixed order:
    /// main camera, post-process, object picking, directional shadow,
    /// SSAO generate, SSAO blur, vignette, color grading, blur, point
    /// shadow, particle, pre-depth, PCF mask, stylized (NBR).
    pub fn with_default_passes(settings: &RendererSettings) -> Self {
        let mut pipeline = Self::new();
        pipeline.push_pass(Box::new(MainCameraPass::new()));
        pipeline.push_pass(Box::new(PostProcessPass::new()));
        pipeline.push_pass(Box::new(PickingPass::new()));
        pipeline.push_pass(Box::new(DirectionalShadowPass::new()));
        pipeline.push_pass(Box::new(SsaoGeneratePass::new()));
        pipeline.push_pass(Box::new(SsaoBlurPass::new()));
        pipeline.push_pass(Box::new(VignettePass::new()));
        pipeline.push_pass(Box::new(ColorGradingPass::new()));
        pipeline.push_pass(Box::new(BlurPass::new()));
        pipeline.push_pass(Box::new(PointShadowPass::new()));
        pipeline.push_pass(Box::new(ParticlePass::new()));
        pipeline.push_pass(Box::new(PreDepthPass::new()));
        pipeline.push_pass(Box::new(PcfMaskPass::new(
            settings.poisson_seed,
            settings.pcf,
            settings.shadow_filter_radius,
        )));
        pipeline.push_pass(Box::new(NbrPass::new()));
        pipeline
    }

    /// Appends a pass to the end of the order.
    pub fn push_pass(&mut self, pass: Box<dyn RenderPass>) {
        self.passes.push(pass);
        self.ready.push(false);
    }

    /// The pass names in pipeline order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Runs every pass's preparation, in order, once per frame before any
    /// drawing. A pass that cannot prepare is skipped for the frame and
    /// logged; the remaining passes still prepare.
    ///
    /// Returns the number of passes ready to execute. Preparation is
    /// mode-independent; both strategies consume the same prepared data.
    pub fn prepare_pass_data(&mut self, resources: &FrameResources<'_>) -> usize {
        let mut ready_count = 0;
        for (index, pass) in self.passes.iter_mut().enumerate() {
            match pass.prepare(resources) {
                Ok(()) => {
                    self.ready[index] = true;
                    ready_count += 1;
                }
                Err(err) => {
                    self.ready[index] = false;
                    log::warn!("Pass '{}' skipped this frame: {err}", pass.name());
                }
            }
        }
        ready_count
    }

    /// Executes the prepared passes with per-draw lighting.
    pub fn forward_render(
        &self,
        entities: &[RenderEntity],
        settings: &RendererSettings,
        sink: &mut dyn CommandSink,
    ) -> FrameArtifacts {
        self.execute_passes(LightingMode::PerDraw, entities, settings, sink)
    }

    /// Executes the prepared passes into the geometry buffer, then records
    /// the single lighting resolve.
    pub fn deferred_render(
        &self,
        entities: &[RenderEntity],
        settings: &RendererSettings,
        sink: &mut dyn CommandSink,
    ) -> FrameArtifacts {
        let artifacts = self.execute_passes(LightingMode::GBuffer, entities, settings, sink);
        sink.submit(DrawCommand::Fullscreen {
            pass: DEFERRED_RESOLVE_PASS,
        });
        artifacts
    }

    /// Prepares and executes one frame with the strategy selected by the
    /// settings. Convenience over the prepare/execute split.
    pub fn render(
        &mut self,
        resources: &FrameResources<'_>,
        sink: &mut dyn CommandSink,
    ) -> FrameArtifacts {
        self.prepare_pass_data(resources);
        match resources.settings.mode {
            RenderMode::Forward => {
                self.forward_render(resources.entities, resources.settings, sink)
            }
            RenderMode::Deferred => {
                self.deferred_render(resources.entities, resources.settings, sink)
            }
        }
    }

    fn execute_passes(
        &self,
        lighting: LightingMode,
        entities: &[RenderEntity],
        settings: &RendererSettings,
        sink: &mut dyn CommandSink,
    ) -> FrameArtifacts {
        let mut artifacts = FrameArtifacts::default();
        for (index, pass) in self.passes.iter().enumerate() {
            if !self.ready[index] {
                continue;
            }
            let mut execution = PassExecution {
                entities,
                lighting,
                artifacts: &mut artifacts,
                sink,
                settings,
            };
            if let Err(err) = pass.execute(&mut execution) {
                // Degrade, never abort: the remaining passes still run.
                log::warn!("Pass '{}' failed during execution: {err}", pass.name());
            }
        }
        artifacts
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}
