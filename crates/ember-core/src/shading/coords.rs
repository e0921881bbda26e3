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

//! Affine remaps between normalized device coordinates and texture UVs.

use crate::math::Vec2;

/// Maps NDC `[-1, 1]²` to UV `[0, 1]²`: `uv = ndc·0.5 + 0.5`.
#[inline]
pub fn ndc_to_uv(ndc: Vec2) -> Vec2 {
    ndc * 0.5 + Vec2::new(0.5, 0.5)
}

/// Maps UV `[0, 1]²` back to NDC `[-1, 1]²`. Exact inverse of [`ndc_to_uv`].
#[inline]
pub fn uv_to_ndc(uv: Vec2) -> Vec2 {
    uv * 2.0 - Vec2::ONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TOLERANCE: f32 = 1e-6;

    fn assert_vec2_eq(a: Vec2, b: Vec2) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = TOLERANCE);
        assert_abs_diff_eq!(a.y, b.y, epsilon = TOLERANCE);
    }

    #[test]
    fn round_trips_are_identities() {
        for &(x, y) in &[(-1.0, -1.0), (0.0, 0.0), (1.0, 1.0), (0.25, -0.75), (0.3, 0.9)] {
            let ndc = Vec2::new(x, y);
            assert_vec2_eq(uv_to_ndc(ndc_to_uv(ndc)), ndc);
            let uv = Vec2::new(x.abs(), y.abs());
            assert_vec2_eq(ndc_to_uv(uv_to_ndc(uv)), uv);
        }
    }

    #[test]
    fn known_anchors() {
        assert_vec2_eq(ndc_to_uv(Vec2::ZERO), Vec2::new(0.5, 0.5));
        assert_vec2_eq(ndc_to_uv(Vec2::new(-1.0, -1.0)), Vec2::ZERO);
        assert_vec2_eq(uv_to_ndc(Vec2::ONE), Vec2::new(1.0, 1.0));
    }
}
