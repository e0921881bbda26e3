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

//! Render lane — the ordered multi-pass pipeline.
//!
//! Passes are polymorphic objects held in an explicit ordered list; the order
//! is data, not code structure, and it is fixed because later passes consume
//! the output buffers of earlier ones. A pass that cannot prepare is skipped
//! for the frame and logged — rendering degrades pass by pass instead of
//! halting.

pub mod binding;
pub mod context;
pub mod passes;
pub mod pipeline;

pub use binding::ResourceBindingStage;
pub use context::{
    CommandSink, DrawCommand, FrameArtifacts, FrameResources, LightingMode, PassExecution,
    RecordingSink, ShadingKind,
};
pub use pipeline::RenderPipeline;

use ember_core::renderer::ResourceUnavailableError;
use thiserror::Error;

/// An error raised by a single pass. Never fatal to the frame: the pipeline
/// logs it and moves on to the next pass.
#[derive(Debug, Error)]
pub enum PassError {
    /// A frame resource the pass depends on is absent this frame.
    #[error("missing frame resource: {0}")]
    MissingResource(&'static str),
    /// A GPU resource was not ready.
    #[error(transparent)]
    Resource(#[from] ResourceUnavailableError),
    /// The pass failed while recording commands.
    #[error("pass execution failed: {0}")]
    Execution(String),
}

/// One stage of the render pipeline.
///
/// Lifecycle per frame: `prepare` runs once for every pass (in pipeline
/// order) before any drawing; `execute` then runs, in the same order, for
/// every pass whose `prepare` succeeded. Both strategies (forward and
/// deferred) share the prepared data — preparation is mode-independent.
pub trait RenderPass: Send + Sync {
    /// Stable, human-readable pass name, used for logging and command
    /// attribution.
    fn name(&self) -> &'static str;

    /// Pulls the subset of the frame snapshot and GPU resources this pass
    /// needs, storing any derived state on the pass itself.
    fn prepare(&mut self, resources: &FrameResources<'_>) -> Result<(), PassError>;

    /// Records this pass's commands into the execution context.
    fn execute(&self, execution: &mut PassExecution<'_>) -> Result<(), PassError>;
}
