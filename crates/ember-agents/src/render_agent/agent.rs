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

//! Defines the RenderAgent, the per-frame driver of the render pipeline.

use ember_core::frame::FrameSwapContext;
use ember_core::math::Mat4;
use ember_core::renderer::{DeviceResourceRegistry, LightingEnvironment};
use ember_lanes::config::RendererSettings;
use ember_lanes::render_lane::{
    CommandSink, FrameResources, RenderPipeline, ResourceBindingStage,
};
use std::sync::Arc;

/// What one call to [`RenderAgent::render_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// The snapshot tick this frame drew from.
    pub snapshot_tick: u64,
    /// Whether the snapshot was newly published (vs. re-served).
    pub fresh: bool,
    /// Entities that survived resource binding.
    pub entities_bound: usize,
    /// Passes whose preparation succeeded.
    pub passes_ready: usize,
    /// Objects retired because the snapshot announced their removal.
    pub objects_retired: usize,
}

/// Consumes snapshots from the swap context and turns them into recorded
/// GPU work through the pipeline.
///
/// All collaborators are injected: the swap context it reads, the device
/// registry it resolves against, and the sink it records into per frame.
pub struct RenderAgent {
    swap: Arc<FrameSwapContext>,
    registry: Arc<dyn DeviceResourceRegistry>,
    binding: ResourceBindingStage,
    pipeline: RenderPipeline,
    settings: RendererSettings,
    lights: LightingEnvironment,
    view_proj: Mat4,
    frame_count: u64,
}

impl RenderAgent {
    /// Creates an agent with the canonical pass pipeline.
    pub fn new(
        swap: Arc<FrameSwapContext>,
        registry: Arc<dyn DeviceResourceRegistry>,
        settings: RendererSettings,
    ) -> Self {
        let pipeline = RenderPipeline::with_default_passes(&settings);
        Self {
            swap,
            registry,
            binding: ResourceBindingStage::new(),
            pipeline,
            settings,
            lights: LightingEnvironment::default(),
            view_proj: Mat4::IDENTITY,
            frame_count: 0,
        }
    }

    /// Updates the frame's lighting inputs.
    pub fn set_lights(&mut self, lights: LightingEnvironment) {
        self.lights = lights;
    }

    /// Updates the main camera's view-projection.
    pub fn set_camera(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj;
    }

    /// The renderer settings in effect.
    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// Total frames rendered by this agent.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Renders one frame into `sink`.
    ///
    /// Acquires the latest snapshot (an empty or re-served one is still a
    /// drawable frame), retires removed objects, flattens the survivors
    /// through resource binding, prepares every pass, and executes the
    /// strategy selected by the settings.
    pub fn render_frame(&mut self, sink: &mut dyn CommandSink) -> FrameStats {
        let view = self.swap.acquire_for_render();

        // Removal notices are only acted on for fresh snapshots; a re-served
        // snapshot's set was already processed.
        let objects_retired = if view.fresh {
            for id in &view.snapshot.removed {
                log::debug!("Retiring GPU state of removed object {id}");
            }
            view.snapshot.removed.len()
        } else {
            0
        };

        let entities = self.binding.bind(&view.snapshot, self.registry.as_ref());

        let resources = FrameResources {
            snapshot: &view.snapshot,
            entities: &entities,
            view_proj: self.view_proj,
            lights: &self.lights,
            registry: self.registry.as_ref(),
            settings: &self.settings,
        };

        let passes_ready = self.pipeline.prepare_pass_data(&resources);
        match self.settings.mode {
            ember_lanes::config::RenderMode::Forward => {
                self.pipeline.forward_render(&entities, &self.settings, sink);
            }
            ember_lanes::config::RenderMode::Deferred => {
                self.pipeline.deferred_render(&entities, &self.settings, sink);
            }
        }

        self.frame_count += 1;
        let stats = FrameStats {
            snapshot_tick: view.snapshot.tick,
            fresh: view.fresh,
            entities_bound: entities.len(),
            passes_ready,
            objects_retired,
        };
        log::trace!(
            "Frame {}: tick {} ({}), {} entities, {} passes",
            self.frame_count,
            stats.snapshot_tick,
            if stats.fresh { "fresh" } else { "re-served" },
            stats.entities_bound,
            stats.passes_ready
        );
        stats
    }
}
