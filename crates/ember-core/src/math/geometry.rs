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

//! Defines the axis-aligned bounding box used as the per-entity bounding volume.

use super::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// The minimum corner of the box.
    pub min: Vec3,
    /// The maximum corner of the box.
    pub max: Vec3,
}

impl Aabb {
    /// A unit cube centered on the origin, the fallback bound for meshes
    /// whose extents are not yet known.
    pub const UNIT: Self = Self {
        min: Vec3::new(-0.5, -0.5, -0.5),
        max: Vec3::new(0.5, 0.5, 0.5),
    };

    /// Creates a box from explicit corners. `min` must be component-wise
    /// less than or equal to `max`.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns the center point of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the half-extent of the box along each axis.
    #[inline]
    pub fn half_extent(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Transforms the box by a matrix and returns the AABB of the result.
    ///
    /// The eight transformed corners are re-enclosed, so rotation widens the
    /// box rather than tilting it.
    pub fn transformed(&self, m: &Mat4) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];
        let first = m.transform_point(corners[0]);
        let mut out = Self::new(first, first);
        for corner in &corners[1..] {
            let p = m.transform_point(*corner);
            out.min = out.min.min(p);
            out.max = out.max.max(p);
        }
        out
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::UNIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_and_half_extent() {
        let b = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(b.center(), Vec3::ONE);
        assert_eq!(b.half_extent(), Vec3::ONE);
    }

    #[test]
    fn translation_moves_the_box() {
        let b = Aabb::UNIT.transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(b.center(), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(b.half_extent(), Vec3::splat(0.5));
    }

    #[test]
    fn scale_widens_the_box() {
        let b = Aabb::UNIT.transformed(&Mat4::from_scale(Vec3::splat(4.0)));
        assert_eq!(b.half_extent(), Vec3::splat(2.0));
    }
}
