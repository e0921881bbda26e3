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

//! The object-picking pass: id-encoded draws into the picking buffer.

use crate::render_lane::{
    DrawCommand, FrameResources, PassError, PassExecution, RenderPass, ShadingKind,
};
use ember_core::frame::GameObjectId;
use ember_core::renderer::InstanceId;

/// Draws every entity with its instance id encoded into the color target,
/// enabling pixel-exact object picking from a readback.
#[derive(Debug, Default)]
pub struct PickingPass {
    /// Instance → owning object, rebuilt each frame for readback resolution.
    id_table: Vec<(InstanceId, GameObjectId)>,
}

impl PickingPass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "object_picking";

    /// Creates the pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a readback instance id to its owning object.
    ///
    /// The object may have been removed since the readback frame; a miss is
    /// a normal skip condition for the caller, not an error.
    pub fn lookup(&self, instance: InstanceId) -> Option<GameObjectId> {
        self.id_table
            .iter()
            .find(|(candidate, _)| *candidate == instance)
            .map(|(_, object)| *object)
    }
}

impl RenderPass for PickingPass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, resources: &FrameResources<'_>) -> Result<(), PassError> {
        self.id_table = resources
            .entities
            .iter()
            .map(|entity| (entity.instance, entity.object))
            .collect();
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        for entity in execution.entities {
            execution.sink.submit(DrawCommand::Mesh {
                pass: Self::NAME,
                instance: entity.instance,
                mesh: entity.mesh,
                shading: ShadingKind::PickingId,
            });
        }
        Ok(())
    }
}
