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

//! Cook-Torrance style BRDF terms: GGX distribution, Schlick-GGX masking,
//! and the Schlick Fresnel approximation.

use super::{ROUGHNESS_FLOOR, SPECULAR_EPSILON};
use crate::math::{saturate, Vec3, PI};

/// GGX (Trowbridge-Reitz) normal distribution.
///
/// `alpha = roughness²`; returns `alpha² / (π · denom²)` with
/// `denom = dotNH²·(alpha²-1)+1`.
///
/// The caller is responsible for flooring `roughness` at
/// [`ROUGHNESS_FLOOR`](super::ROUGHNESS_FLOOR) — the denominator approaches
/// zero as roughness does.
#[inline]
pub fn normal_distribution(dot_nh: f32, roughness: f32) -> f32 {
    let alpha = roughness * roughness;
    let alpha_sq = alpha * alpha;
    let denom = dot_nh * dot_nh * (alpha_sq - 1.0) + 1.0;
    alpha_sq / (PI * denom * denom)
}

/// Schlick-GGX geometric shadowing for direct lighting.
///
/// `k = (roughness+1)²/8`; returns the product of the masking terms for the
/// light and view directions.
#[inline]
pub fn geometric_shadowing(dot_nl: f32, dot_nv: f32, roughness: f32) -> f32 {
    let r = roughness + 1.0;
    let k = (r * r) / 8.0;
    let g1 = |dot: f32| dot / (dot * (1.0 - k) + k);
    g1(dot_nl) * g1(dot_nv)
}

/// Schlick's Fresnel approximation.
#[inline]
pub fn fresnel_schlick(cos_theta: f32, f0: Vec3) -> Vec3 {
    let factor = (1.0 - cos_theta).clamp(0.0, 1.0).powi(5);
    f0 + (Vec3::ONE - f0) * factor
}

/// Roughness-aware Fresnel used for ambient/indirect terms:
/// `F0 + (max(1-roughness, F0) - F0)·(1-cosθ)⁵` per channel.
#[inline]
pub fn fresnel_schlick_roughness(cos_theta: f32, f0: Vec3, roughness: f32) -> Vec3 {
    let factor = (1.0 - cos_theta).clamp(0.0, 1.0).powi(5);
    let ceiling = Vec3::splat(1.0 - roughness).max(f0);
    f0 + (ceiling - f0) * factor
}

/// Normal-incidence reflectance for the metallic workflow: dielectrics sit at
/// 0.04, metals reflect their base color.
#[inline]
pub fn base_reflectivity(base_color: Vec3, metallic: f32) -> Vec3 {
    Vec3::lerp(Vec3::splat(0.04), base_color, metallic)
}

/// Evaluates the direct-lighting BRDF for one light.
///
/// Combines the GGX distribution, Schlick-GGX masking, and Schlick Fresnel
/// into a diffuse + specular radiance contribution, already weighted by
/// `N·L`. `roughness` is floored at [`ROUGHNESS_FLOOR`](super::ROUGHNESS_FLOOR)
/// before the distribution and masking terms; the specular denominator adds
/// [`SPECULAR_EPSILON`](super::SPECULAR_EPSILON) against grazing angles.
///
/// All direction vectors must be normalized. `light_dir` points from the
/// surface toward the light, `view_dir` toward the camera.
pub fn evaluate_brdf(
    light_dir: Vec3,
    view_dir: Vec3,
    normal: Vec3,
    f0: Vec3,
    base_color: Vec3,
    metallic: f32,
    roughness: f32,
) -> Vec3 {
    let roughness = roughness.max(ROUGHNESS_FLOOR);
    let half = (light_dir + view_dir).normalize();

    let dot_nl = saturate(normal.dot(light_dir));
    let dot_nv = saturate(normal.dot(view_dir));
    let dot_nh = saturate(normal.dot(half));
    let dot_hv = saturate(half.dot(view_dir));

    let d = normal_distribution(dot_nh, roughness);
    let g = geometric_shadowing(dot_nl, dot_nv, roughness);
    let f = fresnel_schlick(dot_hv, f0);

    let specular = f * (d * g / (4.0 * dot_nl * dot_nv + SPECULAR_EPSILON));

    // Energy not reflected specularly refracts; metals absorb it entirely.
    let k_diffuse = (Vec3::ONE - f) * (1.0 - metallic);
    let diffuse = k_diffuse * base_color * (1.0 / PI);

    (diffuse + specular) * dot_nl
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq_eps;
    use crate::shading::ROUGHNESS_FLOOR;

    #[test]
    fn distribution_finite_and_non_negative_over_roughness_range() {
        // Sweep roughness in [floor, 1] and dotNH in [0, 1].
        let mut r = ROUGHNESS_FLOOR;
        while r <= 1.0 {
            let mut nh = 0.0f32;
            while nh <= 1.0 {
                let d = normal_distribution(nh, r);
                assert!(d.is_finite(), "D not finite at r={r} nh={nh}");
                assert!(d >= 0.0, "D negative at r={r} nh={nh}");
                nh += 0.05;
            }
            r += 0.05;
        }
    }

    #[test]
    fn distribution_peaks_at_aligned_half_vector() {
        let aligned = normal_distribution(1.0, 0.3);
        let grazing = normal_distribution(0.2, 0.3);
        assert!(aligned > grazing);
    }

    #[test]
    fn shadowing_is_bounded_by_one() {
        for &(nl, nv, r) in &[(1.0, 1.0, 0.1), (0.5, 0.7, 0.5), (0.1, 0.9, 1.0)] {
            let g = geometric_shadowing(nl, nv, r);
            assert!((0.0..=1.0).contains(&g), "G out of range: {g}");
        }
    }

    #[test]
    fn fresnel_reaches_unity_at_grazing() {
        let f0 = Vec3::splat(0.04);
        let grazing = fresnel_schlick(0.0, f0);
        assert!(approx_eq_eps(grazing.x, 1.0, 1e-4));
        let head_on = fresnel_schlick(1.0, f0);
        assert!(approx_eq_eps(head_on.x, 0.04, 1e-6));
    }

    #[test]
    fn fresnel_roughness_variant_caps_below_unity_for_rough_surfaces() {
        let f0 = Vec3::splat(0.04);
        let grazing = fresnel_schlick_roughness(0.0, f0, 1.0);
        // A fully rough surface cannot exceed its F0 ceiling of max(0, F0).
        assert!(grazing.x <= 0.04 + 1e-6);
    }

    #[test]
    fn base_reflectivity_interpolates_between_dielectric_and_metal() {
        let color = Vec3::new(1.0, 0.8, 0.3);
        assert_eq!(base_reflectivity(color, 0.0), Vec3::splat(0.04));
        assert_eq!(base_reflectivity(color, 1.0), color);
    }

    #[test]
    fn brdf_output_is_finite_at_grazing_angles() {
        let n = Vec3::Y;
        // Light and view nearly parallel to the surface.
        let l = Vec3::new(1.0, 0.001, 0.0).normalize();
        let v = Vec3::new(-1.0, 0.001, 0.0).normalize();
        let out = evaluate_brdf(l, v, n, Vec3::splat(0.04), Vec3::ONE, 0.0, 0.0);
        assert!(out.x.is_finite() && out.y.is_finite() && out.z.is_finite());
    }

    #[test]
    fn brdf_is_zero_for_backfacing_light() {
        let n = Vec3::Y;
        let l = -Vec3::Y;
        let v = Vec3::Y;
        let out = evaluate_brdf(l, v, n, Vec3::splat(0.04), Vec3::ONE, 0.0, 0.5);
        assert_eq!(out, Vec3::ZERO);
    }

    #[test]
    fn metallic_surfaces_have_no_diffuse_term() {
        let n = Vec3::Y;
        let l = Vec3::new(0.0, 1.0, 0.2).normalize();
        let v = Vec3::new(0.2, 1.0, 0.0).normalize();
        let base = Vec3::new(0.9, 0.5, 0.2);
        let metal = evaluate_brdf(l, v, n, base, base, 1.0, 0.4);
        let dielectric = evaluate_brdf(l, v, n, Vec3::splat(0.04), base, 0.0, 0.4);
        // Not a strict inequality on every channel, but the dielectric's
        // diffuse lobe must dominate away from the specular peak.
        assert!(dielectric.y > metal.y * 0.1);
        assert!(metal.x.is_finite());
    }
}
