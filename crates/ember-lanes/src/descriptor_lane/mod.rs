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

//! Descriptor lane — turns raw asset references into render-ready descriptors.
//!
//! This is logic-thread territory: the scene agent calls into here each tick
//! for its dirty objects, and the resulting [`ObjectPartDescriptor`]s flow
//! into the frame swap.
//!
//! [`ObjectPartDescriptor`]: ember_core::frame::ObjectPartDescriptor

mod material_resolver;
mod part_builder;

pub use material_resolver::MaterialResolver;
pub use part_builder::PartDescriptorBuilder;
