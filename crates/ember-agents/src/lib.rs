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

//! # Ember Agents
//!
//! Orchestration over the lanes: the scene agent owns logic-side object
//! state and dirty tracking, the render agent drives the pipeline each
//! frame, and the runner hosts the render thread.

#![warn(missing_docs)]

pub mod render_agent;
pub mod runner;
pub mod scene_agent;

pub use render_agent::{FrameStats, RenderAgent};
pub use runner::RenderThread;
pub use scene_agent::{SceneAgent, ScenePart};
