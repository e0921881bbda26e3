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

//! Defines a linear-space RGBA color type.

use serde::{Deserialize, Serialize};

use super::Vec3;

/// An RGBA color in linear (not sRGB-encoded) space.
///
/// All shading math operates in linear space; conversion to and from display
/// encodings is the device's concern.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct LinearRgba {
    /// The red channel.
    pub r: f32,
    /// The green channel.
    pub g: f32,
    /// The blue channel.
    pub b: f32,
    /// The alpha (opacity) channel.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new color from linear channel values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from linear RGB channel values.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Returns the RGB part of the color as a vector, dropping alpha.
    #[inline]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Creates an opaque color from an RGB vector.
    #[inline]
    pub const fn from_vec3(v: Vec3) -> Self {
        Self::rgb(v.x, v.y, v.z)
    }

    /// Returns the color as `[r, g, b, a]`, the layout uniform blocks expect.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_agree() {
        assert_eq!(LinearRgba::rgb(1.0, 1.0, 1.0), LinearRgba::WHITE);
        assert_eq!(LinearRgba::new(0.0, 0.0, 0.0, 1.0), LinearRgba::BLACK);
    }

    #[test]
    fn vec3_round_trip_preserves_rgb() {
        let c = LinearRgba::rgb(0.1, 0.2, 0.3);
        assert_eq!(LinearRgba::from_vec3(c.to_vec3()), c);
    }

    #[test]
    fn to_array_layout() {
        assert_eq!(
            LinearRgba::new(0.1, 0.2, 0.3, 0.4).to_array(),
            [0.1, 0.2, 0.3, 0.4]
        );
    }
}
