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

//! Per-frame contexts handed to render passes.

use crate::config::RendererSettings;
use ember_core::frame::FrameSnapshot;
use ember_core::math::Mat4;
use ember_core::renderer::{
    DeviceResourceRegistry, InstanceId, LightingEnvironment, MeshHandle, RenderEntity,
};

/// Read-only inputs available to every pass during preparation.
///
/// Each pass pulls only the subset it needs.
pub struct FrameResources<'a> {
    /// The acquired snapshot, valid for exactly this frame.
    pub snapshot: &'a FrameSnapshot,
    /// The flattened drawables produced by the resource-binding stage.
    pub entities: &'a [RenderEntity],
    /// The main camera's combined view-projection.
    pub view_proj: Mat4,
    /// This frame's lights.
    pub lights: &'a LightingEnvironment,
    /// The device-resource registry, for pass-owned resources.
    pub registry: &'a dyn DeviceResourceRegistry,
    /// Renderer configuration.
    pub settings: &'a RendererSettings,
}

/// How geometry draws accumulate lighting this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingMode {
    /// Forward: lighting evaluated per draw.
    PerDraw,
    /// Deferred: draws fill the geometry buffer; a later resolve lights it.
    GBuffer,
}

/// The shader family a recorded draw binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingKind {
    /// Full PBR lighting.
    Lit,
    /// Stylized toon shading.
    Toon,
    /// Depth-only, no color target.
    DepthOnly,
    /// Object-id encoding for picking.
    PickingId,
    /// Geometry-buffer attribute write (deferred).
    GBuffer,
}

/// One recorded unit of GPU work, consumed by the device layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw one flattened entity.
    Mesh {
        /// The pass that recorded the draw.
        pass: &'static str,
        /// The drawable being submitted.
        instance: InstanceId,
        /// The GPU mesh to bind.
        mesh: MeshHandle,
        /// The shader family to bind.
        shading: ShadingKind,
    },
    /// Draw a fullscreen quad (post-processing, resolves, masks).
    Fullscreen {
        /// The pass that recorded the draw.
        pass: &'static str,
    },
}

/// Receives recorded commands in submission order.
///
/// The graphics device implements this on its command encoder; tests use
/// [`RecordingSink`].
pub trait CommandSink {
    /// Accepts one recorded command.
    fn submit(&mut self, command: DrawCommand);
}

/// A sink that records commands into a `Vec` for inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// The recorded commands, in submission order.
    pub commands: Vec<DrawCommand>,
}

impl RecordingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The names of the passes that recorded at least one command, in first
    /// submission order.
    pub fn pass_sequence(&self) -> Vec<&'static str> {
        let mut sequence = Vec::new();
        for command in &self.commands {
            let pass = match command {
                DrawCommand::Mesh { pass, .. } | DrawCommand::Fullscreen { pass } => *pass,
            };
            if sequence.last() != Some(&pass) {
                sequence.push(pass);
            }
        }
        sequence
    }
}

impl CommandSink for RecordingSink {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Cross-pass artifacts produced during execution.
///
/// Earlier passes write, later passes read; the fixed pipeline order is what
/// makes this sound.
#[derive(Debug, Clone, Default)]
pub struct FrameArtifacts {
    /// Light-space view-projection from the directional shadow pass.
    pub light_view_proj: Option<Mat4>,
    /// Whether the directional shadow map was rendered this frame.
    pub shadow_map_rendered: bool,
    /// Whether the screen-space PCF mask was generated this frame.
    pub shadow_mask_generated: bool,
    /// Whether the SSAO buffer was generated (and then blurred).
    pub ssao_generated: bool,
    /// Whether the main camera pass produced the scene color buffer.
    pub scene_color_rendered: bool,
    /// Whether the pre-depth buffer was laid down.
    pub pre_depth_rendered: bool,
}

/// The mutable execution context a pass records into.
pub struct PassExecution<'a> {
    /// The flattened drawables for this frame.
    pub entities: &'a [RenderEntity],
    /// How geometry draws accumulate lighting.
    pub lighting: LightingMode,
    /// Cross-pass artifacts.
    pub artifacts: &'a mut FrameArtifacts,
    /// The command sink.
    pub sink: &'a mut dyn CommandSink,
    /// Renderer configuration.
    pub settings: &'a RendererSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_collapses_consecutive_passes() {
        let mut sink = RecordingSink::new();
        sink.submit(DrawCommand::Fullscreen { pass: "a" });
        sink.submit(DrawCommand::Fullscreen { pass: "a" });
        sink.submit(DrawCommand::Fullscreen { pass: "b" });
        assert_eq!(sink.pass_sequence(), vec!["a", "b"]);
    }
}
