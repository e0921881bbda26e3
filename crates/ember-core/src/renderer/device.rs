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

//! The device-resource registry contract.

use crate::asset::{MeshRef, TextureRef};
use crate::math::Aabb;
use std::fmt;

/// An opaque handle to a GPU-resident mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// An opaque handle to a GPU-resident texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// What the registry knows about a resolved mesh, beyond the handle itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuMeshInfo {
    /// The device handle for draw submission.
    pub handle: MeshHandle,
    /// Object-space bounds, for the entity's bounding volume.
    pub bounds: Aabb,
    /// The joint count a skinned pose must supply for this mesh.
    /// Zero for rigid meshes.
    pub expected_joint_count: usize,
}

/// Raised when a GPU resource is not ready for this frame.
///
/// The owning pass skips the affected entity and the frame proceeds; because
/// descriptors are rebuilt on every dirty tick, the resolve is retried
/// automatically on the next publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUnavailableError {
    /// The resource is still being uploaded or compiled.
    NotReady {
        /// The reference that is not yet resident.
        resource: String,
    },
    /// The device failed to create the resource.
    Failed {
        /// The reference that failed.
        resource: String,
        /// Backend error details, stringified.
        details: String,
    },
}

impl fmt::Display for ResourceUnavailableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceUnavailableError::NotReady { resource } => {
                write!(f, "GPU resource not ready: '{resource}'")
            }
            ResourceUnavailableError::Failed { resource, details } => {
                write!(f, "GPU resource creation failed for '{resource}': {details}")
            }
        }
    }
}

impl std::error::Error for ResourceUnavailableError {}

/// Resolves descriptors to device resources.
///
/// Implemented by the graphics-device layer outside this core and injected
/// into the resource-binding stage. Handles issued here are valid only for
/// the frame in which they were resolved.
pub trait DeviceResourceRegistry: Send + Sync {
    /// Resolves a mesh reference to its GPU-resident form.
    fn resolve_mesh(&self, mesh: &MeshRef) -> Result<GpuMeshInfo, ResourceUnavailableError>;

    /// Resolves a texture reference to a device handle.
    ///
    /// Callers never pass empty references; an empty slot means "no texture"
    /// and is handled before the registry is consulted.
    fn resolve_texture(&self, texture: &TextureRef)
        -> Result<TextureHandle, ResourceUnavailableError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_resource() {
        let err = ResourceUnavailableError::NotReady {
            resource: "meshes/avatar.mesh".into(),
        };
        assert_eq!(format!("{err}"), "GPU resource not ready: 'meshes/avatar.mesh'");
    }
}
