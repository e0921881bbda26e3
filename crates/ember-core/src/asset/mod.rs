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

//! Asset references, handles, and the provider contract.
//!
//! Asset *loading* (disk I/O, decoding) lives outside this core; what lives
//! here is the vocabulary the frame core uses to talk about assets: path-style
//! references, the shared-ownership handle, and the [`AssetProvider`] trait
//! the descriptor stage resolves through.

mod handle;
mod provider;
mod reference;

pub use handle::AssetHandle;
pub use provider::{AssetProvider, AssetResolutionError, MaterialRecord, ToonSettingsRecord};
pub use reference::{MeshRef, TextureRef};

/// A marker trait for types that can be managed as assets.
///
/// Requires `Send + Sync + 'static` so handles can cross the logic/render
/// thread boundary.
pub trait Asset: Send + Sync + 'static {}
