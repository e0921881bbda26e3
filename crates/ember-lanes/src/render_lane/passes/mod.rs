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

//! The concrete render passes.
//!
//! Pass *preparation* order is fixed and significant — see
//! [`RenderPipeline::with_default_passes`](crate::render_lane::RenderPipeline::with_default_passes)
//! for the canonical sequence.

mod depth;
mod main_camera;
mod particle;
mod picking;
mod post;
mod shadow;
mod ssao;
mod toon;

pub use depth::{PcfMaskPass, PreDepthPass};
pub use main_camera::{MainCameraPass, SurfaceSample};
pub use particle::ParticlePass;
pub use picking::PickingPass;
pub use post::{BlurPass, ColorGradingPass, PostProcessPass, VignettePass};
pub use shadow::{DirectionalShadowPass, PointShadowPass};
pub use ssao::{SsaoBlurPass, SsaoGeneratePass};
pub use toon::NbrPass;
