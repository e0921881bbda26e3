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

//! Deterministic Poisson-disk offset generation for shadow filtering.

use super::{POISSON_RING_COUNT, POISSON_SAMPLE_COUNT};
use crate::math::{Vec2, TAU};

/// A fixed set of [`POISSON_SAMPLE_COUNT`] 2D offsets with blue-noise-like
/// spacing, laid out on a [`POISSON_RING_COUNT`]-ring spiral.
///
/// A disk is generated once per shadow-sampling context and passed by
/// reference to [`pcf_shadow`](super::pcf_shadow); there is no shared mutable
/// sample buffer. Offsets lie within the unit disk and are scaled by the
/// filter radius at sampling time.
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonDisk {
    offsets: [Vec2; POISSON_SAMPLE_COUNT],
}

impl PoissonDisk {
    /// Generates the offset spiral for `seed`.
    ///
    /// Deterministic: the same seed yields a bit-identical sequence on every
    /// run and platform, which keeps shadow noise stable across frames.
    pub fn generate(seed: u32) -> Self {
        let angle_step = TAU * POISSON_RING_COUNT as f32 / POISSON_SAMPLE_COUNT as f32;
        let radius_step = 1.0 / POISSON_SAMPLE_COUNT as f32;

        let mut angle = hash_to_unit(seed) * TAU;
        let mut radius = radius_step;

        let mut offsets = [Vec2::ZERO; POISSON_SAMPLE_COUNT];
        for offset in &mut offsets {
            // The 0.75 exponent biases samples toward the rim, where the
            // penumbra estimate benefits most from coverage.
            let r = radius.powf(0.75);
            *offset = Vec2::new(angle.cos() * r, angle.sin() * r);
            radius += radius_step;
            angle += angle_step;
        }

        Self { offsets }
    }

    /// The generated offsets, in spiral order.
    #[inline]
    pub fn offsets(&self) -> &[Vec2; POISSON_SAMPLE_COUNT] {
        &self.offsets
    }
}

/// Maps a seed to `[0, 1)` with one round of an LCG followed by an xorshift
/// mix. Written out by hand so the sequence is stable across platforms and
/// toolchain upgrades, which a library RNG does not promise.
fn hash_to_unit(seed: u32) -> f32 {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    state ^= state >> 16;
    state = state.wrapping_mul(2_654_435_769);
    state ^= state >> 16;
    (state >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_is_bit_identical() {
        let a = PoissonDisk::generate(42);
        let b = PoissonDisk::generate(42);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_seeds_differ() {
        let a = PoissonDisk::generate(1);
        let b = PoissonDisk::generate(2);
        assert_ne!(a, b);
    }

    #[test]
    fn offsets_stay_within_unit_disk() {
        let disk = PoissonDisk::generate(7);
        for offset in disk.offsets() {
            assert!(
                offset.length() <= 1.0 + 1e-6,
                "offset escaped the unit disk: {offset:?}"
            );
        }
    }

    #[test]
    fn sample_count_is_fixed() {
        let disk = PoissonDisk::generate(0);
        assert_eq!(disk.offsets().len(), POISSON_SAMPLE_COUNT);
    }

    #[test]
    fn hash_to_unit_is_in_range() {
        for seed in [0u32, 1, 1000, u32::MAX] {
            let v = hash_to_unit(seed);
            assert!((0.0..1.0).contains(&v), "hash out of range for {seed}: {v}");
        }
    }
}
