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

//! Defines the `Mat4` type and the operations the frame core needs from it.

use super::{Vec3, Vec4};
use std::ops::Mul;

/// A 4x4 column-major matrix used for world transforms and joint poses.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Returns a row of the matrix as a `Vec4`.
    ///
    /// # Panics
    /// Panics if `index` is greater than 3.
    #[inline]
    pub fn get_row(&self, index: usize) -> Vec4 {
        let get = |v: &Vec4| match index {
            0 => v.x,
            1 => v.y,
            2 => v.z,
            3 => v.w,
            _ => panic!("Mat4 row index out of bounds: {index}"),
        };
        Vec4::new(
            get(&self.cols[0]),
            get(&self.cols[1]),
            get(&self.cols[2]),
            get(&self.cols[3]),
        )
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vec4::from_vec3(v, 1.0);
        m
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(scale.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, scale.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, scale.z, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Extracts the translation part of the matrix.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.cols[3].truncate()
    }

    /// Creates a right-handed view matrix looking from `eye` toward `target`.
    ///
    /// Returns `None` when the view direction is degenerate (zero length or
    /// parallel to `up`).
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Option<Self> {
        let forward = (target - eye).normalize();
        if forward == Vec3::ZERO {
            return None;
        }
        let right = forward.cross(up).normalize();
        if right == Vec3::ZERO {
            return None;
        }
        let camera_up = right.cross(forward);

        Some(Self::from_cols(
            Vec4::new(right.x, camera_up.x, -forward.x, 0.0),
            Vec4::new(right.y, camera_up.y, -forward.y, 0.0),
            Vec4::new(right.z, camera_up.z, -forward.z, 0.0),
            Vec4::new(
                -right.dot(eye),
                -camera_up.dot(eye),
                forward.dot(eye),
                1.0,
            ),
        ))
    }

    /// Creates a right-handed orthographic projection with a `[0, 1]` depth
    /// range (the convention of modern graphics APIs).
    pub fn orthographic_rh_zo(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let rcp_width = 1.0 / (right - left);
        let rcp_height = 1.0 / (top - bottom);
        let rcp_depth = 1.0 / (near - far);
        Self::from_cols(
            Vec4::new(2.0 * rcp_width, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * rcp_height, 0.0, 0.0),
            Vec4::new(0.0, 0.0, rcp_depth, 0.0),
            Vec4::new(
                -(right + left) * rcp_width,
                -(top + bottom) * rcp_height,
                near * rcp_depth,
                1.0,
            ),
        )
    }

    /// Returns the transpose of the matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(
            self.get_row(0),
            self.get_row(1),
            self.get_row(2),
            self.get_row(3),
        )
    }

    /// Transforms a point, applying translation (`w = 1`).
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(p, 1.0)).truncate()
    }

    /// Returns the matrix as a `[[f32; 4]; 4]` in column-major order,
    /// the layout expected by GPU uniform blocks.
    #[inline]
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        [
            [self.cols[0].x, self.cols[0].y, self.cols[0].z, self.cols[0].w],
            [self.cols[1].x, self.cols[1].y, self.cols[1].z, self.cols[1].w],
            [self.cols[2].x, self.cols[2].y, self.cols[2].z, self.cols[2].w],
            [self.cols[3].x, self.cols[3].y, self.cols[3].z, self.cols[3].w],
        ]
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;
    /// Standard matrix multiplication: `self * rhs` applies `rhs` first.
    fn mul(self, rhs: Self) -> Self::Output {
        let mut cols = [Vec4::ZERO; 4];
        for (i, col) in cols.iter_mut().enumerate() {
            *col = self * rhs.cols[i];
        }
        Self { cols }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    /// Transforms a `Vec4` by the matrix.
    #[inline]
    fn mul(self, v: Vec4) -> Self::Output {
        self.cols[0] * v.x + self.cols[1] * v.y + (self.cols[2] * v.z + self.cols[3] * v.w)
    }
}
