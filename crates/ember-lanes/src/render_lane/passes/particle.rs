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

//! The particle pass: batched draws of GPU-simulated effect emitters.

use crate::render_lane::{
    DrawCommand, FrameResources, PassError, PassExecution, RenderPass, ShadingKind,
};
use ember_core::renderer::{InstanceId, MeshHandle};

/// One emitter's worth of particles, registered by the effects system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleBatch {
    /// The quad/ribbon mesh the emitter instances.
    pub mesh: MeshHandle,
    /// Live particle count this frame.
    pub live_count: u32,
}

/// Draws registered particle batches over the lit scene.
///
/// Particle *simulation* lives outside this core; the effects system
/// registers its surviving batches before each frame and the pass only
/// records their draws. No registered batches means the pass records
/// nothing, which is the common case in scenes without effects.
#[derive(Debug, Default)]
pub struct ParticlePass {
    batches: Vec<ParticleBatch>,
}

impl ParticlePass {
    /// The pass name in command attribution.
    pub const NAME: &'static str = "particle";

    /// Creates the pass with no registered emitters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces this frame's batch list.
    pub fn set_batches(&mut self, batches: Vec<ParticleBatch>) {
        self.batches = batches;
    }
}

impl RenderPass for ParticlePass {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn prepare(&mut self, _resources: &FrameResources<'_>) -> Result<(), PassError> {
        // Dead emitters submit nothing; drop them before execution.
        self.batches.retain(|batch| batch.live_count > 0);
        Ok(())
    }

    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError> {
        for (index, batch) in self.batches.iter().enumerate() {
            execution.sink.submit(DrawCommand::Mesh {
                pass: Self::NAME,
                // Batches are not snapshot entities; their instance ids live
                // in a reserved range above any per-frame entity id.
                instance: InstanceId(u64::MAX - index as u64),
                mesh: batch.mesh,
                shading: ShadingKind::Lit,
            });
        }
        Ok(())
    }
}
