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

//! GPU-facing records and the device-resource contract.
//!
//! The frame core never owns GPU memory. It holds opaque handles issued by an
//! external [`DeviceResourceRegistry`] and treats them as valid only for the
//! frame in which they were resolved.

mod device;
mod entity;
pub mod light;

pub use device::{
    DeviceResourceRegistry, GpuMeshInfo, MeshHandle, ResourceUnavailableError, TextureHandle,
};
pub use entity::{
    InstanceId, NbrShadingParams, NbrUniforms, PbrShadingParams, PbrUniforms, RenderEntity,
    ShadingParams,
};
pub use light::{DirectionalLight, LightingEnvironment, PointLight};
