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

//! Percentage-closer shadow filtering over a Poisson-disk sample set.

use super::{PcfSettings, PoissonDisk};
use crate::math::{Vec2, Vec3};

/// Read access to a depth texture, supplied by the device side.
///
/// `sample` takes UV coordinates in `[0, 1]²` and returns the stored depth.
/// Sampling outside the texture should clamp, matching the shadow sampler's
/// clamp-to-edge address mode.
pub trait DepthMap {
    /// Samples the stored depth at `uv`.
    fn sample(&self, uv: Vec2) -> f32;
}

impl<F> DepthMap for F
where
    F: Fn(Vec2) -> f32,
{
    fn sample(&self, uv: Vec2) -> f32 {
        self(uv)
    }
}

/// Percentage-closer-filtered visibility for a directional shadow map.
///
/// `projected` is the receiver position in the light's clip space after the
/// perspective divide and NDC→UV remap: `xy` addresses the shadow map, `z` is
/// the receiver depth. Each of the disk's offsets is scaled by
/// `filter_radius` and the map is sampled at the displaced coordinate; a
/// sample counts as lit when either
///
/// - the stored depth exceeds `settings.far_depth_sentinel` (no occluder was
///   recorded there), or
/// - the stored depth is at least the receiver depth minus
///   `settings.depth_bias`.
///
/// Returns the lit fraction in `[0, 1]`.
pub fn pcf_shadow(
    map: &impl DepthMap,
    projected: Vec3,
    filter_radius: f32,
    disk: &PoissonDisk,
    settings: &PcfSettings,
) -> f32 {
    let uv = Vec2::new(projected.x, projected.y);
    let receiver_depth = projected.z;

    let mut lit = 0u32;
    for offset in disk.offsets() {
        let stored = map.sample(uv + *offset * filter_radius);
        if stored > settings.far_depth_sentinel || stored >= receiver_depth - settings.depth_bias {
            lit += 1;
        }
    }

    lit as f32 / disk.offsets().len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::SHADOW_DEPTH_BIAS;

    fn disk() -> PoissonDisk {
        PoissonDisk::generate(11)
    }

    #[test]
    fn fully_unoccluded_map_is_fully_lit() {
        // Every stored depth at the far sentinel: "no occluder recorded".
        let map = |_uv: Vec2| 1.0f32;
        let visibility = pcf_shadow(
            &map,
            Vec3::new(0.5, 0.5, 0.3),
            0.01,
            &disk(),
            &PcfSettings::default(),
        );
        assert_eq!(visibility, 1.0);
    }

    #[test]
    fn fully_occluded_map_is_fully_shadowed() {
        // Occluder at depth 0 in front of a receiver well past the bias.
        let map = |_uv: Vec2| 0.0f32;
        let visibility = pcf_shadow(
            &map,
            Vec3::new(0.5, 0.5, 0.5),
            0.01,
            &disk(),
            &PcfSettings::default(),
        );
        assert_eq!(visibility, 0.0);
    }

    #[test]
    fn bias_forgives_receiver_level_depths() {
        // Stored depth equals receiver depth minus half the bias: still lit.
        let receiver = 0.4f32;
        let stored = receiver - SHADOW_DEPTH_BIAS * 0.5;
        let map = move |_uv: Vec2| stored;
        let visibility = pcf_shadow(
            &map,
            Vec3::new(0.5, 0.5, receiver),
            0.01,
            &disk(),
            &PcfSettings::default(),
        );
        assert_eq!(visibility, 1.0);
    }

    #[test]
    fn partial_occlusion_yields_fractional_visibility() {
        // Left half of the map occluded, right half free.
        let map = |uv: Vec2| if uv.x < 0.5 { 0.0f32 } else { 1.0 };
        let visibility = pcf_shadow(
            &map,
            Vec3::new(0.5, 0.5, 0.6),
            0.2,
            &disk(),
            &PcfSettings::default(),
        );
        assert!(
            visibility > 0.0 && visibility < 1.0,
            "expected penumbra, got {visibility}"
        );
    }

    #[test]
    fn override_sentinel_changes_classification() {
        // Stored depth 0.95 occludes a receiver at 0.97 under the default
        // sentinel, but counts as lit once the sentinel drops below it.
        let map = |_uv: Vec2| 0.95f32;
        let projected = Vec3::new(0.5, 0.5, 0.97);
        let default_vis = pcf_shadow(&map, projected, 0.01, &disk(), &PcfSettings::default());
        assert_eq!(default_vis, 0.0);

        let relaxed = PcfSettings {
            far_depth_sentinel: 0.9,
            ..Default::default()
        };
        let relaxed_vis = pcf_shadow(&map, projected, 0.01, &disk(), &relaxed);
        assert_eq!(relaxed_vis, 1.0);
    }
}
