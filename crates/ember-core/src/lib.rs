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

//! # Ember Core
//!
//! Foundational crate of the Ember frame-production core: the math and
//! shading primitives, material and frame descriptors, the cross-thread
//! frame swap, and the interface contracts toward the asset, animation, and
//! graphics-device collaborators.

#![warn(missing_docs)]

pub mod animation;
pub mod asset;
pub mod frame;
pub mod material;
pub mod math;
pub mod renderer;
pub mod shading;

pub use frame::{FrameSnapshot, FrameSwapContext, GameObjectId};
