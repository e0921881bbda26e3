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

//! Path-style references to meshes and textures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a mesh asset by logical path.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshRef(String);

impl MeshRef {
    /// Creates a mesh reference from a logical path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the reference as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the reference is empty (no mesh).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MeshRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MeshRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// A reference to a texture asset by logical path.
///
/// An **empty** reference is a valid, expected shading input meaning "no
/// texture bound; use the material's scalar factor instead". It is never an
/// error anywhere in the frame core.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureRef(String);

impl TextureRef {
    /// The empty reference: "factor-only" shading.
    pub const EMPTY: Self = Self(String::new());

    /// Creates a texture reference from a logical path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the reference as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the reference is empty (factor-only).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TextureRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_texture_ref_is_empty() {
        assert!(TextureRef::EMPTY.is_empty());
        assert!(TextureRef::default().is_empty());
        assert!(!TextureRef::new("textures/base.png").is_empty());
    }

    #[test]
    fn refs_round_trip_through_strings() {
        let m = MeshRef::new("meshes/avatar_body.mesh");
        assert_eq!(m.as_str(), "meshes/avatar_body.mesh");
        assert_eq!(m.to_string(), "meshes/avatar_body.mesh");
    }
}
