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

//! # Shading Math
//!
//! Pure per-pixel shading functions: the Cook-Torrance style BRDF, Poisson-disk
//! generation, PCF shadow filtering, and the NDC↔UV coordinate remaps.
//!
//! Everything in this module is stateless and safe to call from any thread.
//! Render passes invoke these functions with device-supplied interpolated
//! inputs (normals, view/light vectors, shadow-map samples); that call surface
//! is the fixed contract between the pipeline and the shading stage.
//!
//! ## Tuned constants
//!
//! The numeric constants below are empirically tuned and part of the visual
//! contract — changing any of them changes rendered output and must be treated
//! as a versioned change. They are named here (never inlined at use sites) and
//! the shadow-filtering pair can be overridden per context via
//! [`PcfSettings`].

use serde::{Deserialize, Serialize};

pub mod brdf;
pub mod coords;
pub mod poisson;
pub mod shadow;

pub use self::brdf::{
    base_reflectivity, evaluate_brdf, fresnel_schlick, fresnel_schlick_roughness,
    geometric_shadowing, normal_distribution,
};
pub use self::coords::{ndc_to_uv, uv_to_ndc};
pub use self::poisson::PoissonDisk;
pub use self::shadow::{pcf_shadow, DepthMap};

/// Number of Poisson-disk offsets in a shadow-sampling context.
///
/// The sample buffer is sized and laid out by this constant; it is not
/// reconfigurable at call time.
pub const POISSON_SAMPLE_COUNT: usize = 100;

/// Number of spiral rings the Poisson-disk offsets are distributed over.
pub const POISSON_RING_COUNT: u32 = 10;

/// Depth bias subtracted from the receiver depth during shadow comparison.
///
/// Trades peter-panning against acne; tuned, not derived.
pub const SHADOW_DEPTH_BIAS: f32 = 0.000075;

/// Stored depths beyond this value mean "no occluder recorded" (outside the
/// far clip) and count as lit.
pub const FAR_DEPTH_SENTINEL: f32 = 0.99;

/// Minimum roughness fed into the distribution and masking terms, keeping
/// their denominators away from zero.
pub const ROUGHNESS_FLOOR: f32 = 0.05;

/// Epsilon added to the specular denominator to survive grazing angles.
pub const SPECULAR_EPSILON: f32 = 0.001;

/// Per-context overrides for the shadow-comparison constants.
///
/// `Default` is exactly the named constants, so a context that never touches
/// its settings renders identically to the compiled-in values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PcfSettings {
    /// See [`SHADOW_DEPTH_BIAS`].
    pub depth_bias: f32,
    /// See [`FAR_DEPTH_SENTINEL`].
    pub far_depth_sentinel: f32,
}

impl Default for PcfSettings {
    fn default() -> Self {
        Self {
            depth_bias: SHADOW_DEPTH_BIAS,
            far_depth_sentinel: FAR_DEPTH_SENTINEL,
        }
    }
}
