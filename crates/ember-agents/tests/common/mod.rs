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

//! Shared in-memory collaborators for the agent integration tests.

use ember_core::animation::AnimationProvider;
use ember_core::asset::{
    AssetProvider, AssetResolutionError, MaterialRecord, MeshRef, TextureRef, ToonSettingsRecord,
};
use ember_core::frame::GameObjectId;
use ember_core::math::{Aabb, Mat4};
use ember_core::renderer::{
    DeviceResourceRegistry, GpuMeshInfo, MeshHandle, ResourceUnavailableError, TextureHandle,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// An asset provider backed by in-memory maps.
#[derive(Default)]
pub struct MemoryAssetProvider {
    pub materials: HashMap<String, MaterialRecord>,
    pub settings: HashMap<String, ToonSettingsRecord>,
}

impl MemoryAssetProvider {
    pub fn with_material(mut self, reference: &str, record: MaterialRecord) -> Self {
        self.materials.insert(reference.into(), record);
        self
    }

    #[allow(dead_code)]
    pub fn with_settings(mut self, reference: &str, record: ToonSettingsRecord) -> Self {
        self.settings.insert(reference.into(), record);
        self
    }
}

impl AssetProvider for MemoryAssetProvider {
    fn resolve_path(&self, reference: &str) -> Result<String, AssetResolutionError> {
        Ok(format!("/assets/{reference}"))
    }

    fn load_material(&self, reference: &str) -> Result<MaterialRecord, AssetResolutionError> {
        self.materials
            .get(reference)
            .cloned()
            .ok_or_else(|| AssetResolutionError::NotFound {
                reference: reference.into(),
            })
    }

    fn load_material_settings(
        &self,
        reference: &str,
    ) -> Result<ToonSettingsRecord, AssetResolutionError> {
        self.settings
            .get(reference)
            .cloned()
            .ok_or_else(|| AssetResolutionError::NotFound {
                reference: reference.into(),
            })
    }
}

/// A registry where every mesh resolves, with per-mesh joint counts.
#[derive(Default)]
pub struct MemoryRegistry {
    pub joint_counts: HashMap<String, usize>,
}

impl MemoryRegistry {
    #[allow(dead_code)]
    pub fn with_skinned_mesh(mut self, mesh: &str, joints: usize) -> Self {
        self.joint_counts.insert(mesh.into(), joints);
        self
    }
}

impl DeviceResourceRegistry for MemoryRegistry {
    fn resolve_mesh(&self, mesh: &MeshRef) -> Result<GpuMeshInfo, ResourceUnavailableError> {
        Ok(GpuMeshInfo {
            handle: MeshHandle(1),
            bounds: Aabb::UNIT,
            expected_joint_count: self.joint_counts.get(mesh.as_str()).copied().unwrap_or(0),
        })
    }

    fn resolve_texture(
        &self,
        _texture: &TextureRef,
    ) -> Result<TextureHandle, ResourceUnavailableError> {
        Ok(TextureHandle(1))
    }
}

/// An animation provider scripted per object.
#[derive(Default)]
pub struct ScriptedAnimation {
    poses: Mutex<HashMap<GameObjectId, Vec<Mat4>>>,
}

impl ScriptedAnimation {
    #[allow(dead_code)]
    pub fn set_pose(&self, object: GameObjectId, joints: Vec<Mat4>) {
        self.poses.lock().unwrap().insert(object, joints);
    }

    #[allow(dead_code)]
    pub fn clear_pose(&self, object: GameObjectId) {
        self.poses.lock().unwrap().remove(&object);
    }
}

impl AnimationProvider for ScriptedAnimation {
    fn current_pose(&self, object: GameObjectId) -> Option<Vec<Mat4>> {
        self.poses.lock().unwrap().get(&object).cloned()
    }
}
