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

//! Frame descriptors and the cross-thread frame exchange.
//!
//! The types here are the currency between the logic thread and the render
//! thread: the logic side composes [`ObjectPartDescriptor`]s into a
//! [`SnapshotDelta`] each tick, the [`FrameSwapContext`](swap::FrameSwapContext)
//! carries the resulting [`FrameSnapshot`] across the thread boundary, and the
//! render side reads it for exactly one frame.

pub mod swap;

pub use swap::{FrameSwapContext, FrameView, StaleSnapshotError};

use crate::animation::SkeletonPose;
use crate::asset::MeshRef;
use crate::material::MaterialDescriptor;
use crate::math::Mat4;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A stable identifier for a logical game object.
///
/// Identities survive transform and material changes; the id is the key the
/// render side uses to correlate snapshots across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameObjectId(Uuid);

impl GameObjectId {
    /// Creates a new, random (version 4) id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameObjectId {
    /// Creates a new, random (version 4) id.
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One drawable piece of a game object, fully resolved for rendering.
///
/// Created fresh on each tick in which the owning object is dirty, treated as
/// immutable once handed to the swap context, and discarded after one frame's
/// consumption.
///
/// When `has_animation` is `true` the pose is present and non-empty; its
/// joint count must match the mesh's expected joint count. That invariant is
/// validated where the descriptor is consumed (resource binding), not here.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPartDescriptor {
    /// The mesh this part draws.
    pub mesh: MeshRef,
    /// The resolved material (exactly one shading model).
    pub material: MaterialDescriptor,
    /// The world transform for this frame.
    pub world_transform: Mat4,
    /// Whether a skeletal pose snapshot is attached.
    pub has_animation: bool,
    /// The rig this part binds to. Always equal to `mesh` when animated —
    /// binding and mesh share the same rig.
    pub skeleton_binding: Option<MeshRef>,
    /// The pose snapshot for this frame, identity root at index 0.
    pub pose: Option<SkeletonPose>,
}

/// A game object's full set of drawable parts for one frame.
///
/// Part order is stable for deterministic iteration; rendering correctness
/// does not depend on it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObjectDesc {
    /// The owning object's identity.
    pub id: GameObjectId,
    /// The object's drawable parts, in authoring order.
    pub parts: Vec<ObjectPartDescriptor>,
}

/// The per-tick change set the logic side hands to the swap context.
///
/// Only dirty objects appear in `updated`; an id absent from every delta is
/// unchanged since the last consumed snapshot. Removal is explicit via
/// `removed` — never inferred from absence.
#[derive(Debug, Clone, Default)]
pub struct SnapshotDelta {
    /// Rebuilt descriptors for objects whose transform or pose changed.
    pub updated: Vec<GameObjectDesc>,
    /// Objects removed from the scene this tick.
    pub removed: Vec<GameObjectId>,
}

impl SnapshotDelta {
    /// Creates an empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rebuilt object descriptor.
    pub fn update(&mut self, desc: GameObjectDesc) {
        self.updated.push(desc);
    }

    /// Marks an object as removed.
    pub fn remove(&mut self, id: GameObjectId) {
        self.removed.push(id);
    }

    /// Whether the delta carries no changes.
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.removed.is_empty()
    }
}

/// One frame's complete, self-consistent set of render descriptors.
///
/// Owned by the swap context; the render side receives it behind an `Arc`,
/// valid for exactly one frame. The object map is cumulative — it reflects
/// every object published so far and not yet removed. `removed` lists the
/// ids dropped since the previous consumed snapshot so the render side can
/// retire their GPU state; removal notices are idempotent and may repeat
/// across consecutive snapshots.
#[derive(Debug, Clone, Default)]
pub struct FrameSnapshot {
    /// Every live object's latest descriptor set.
    pub objects: AHashMap<GameObjectId, Arc<GameObjectDesc>>,
    /// Ids removed since the previously consumed snapshot.
    pub removed: AHashSet<GameObjectId>,
    /// The publish tick this snapshot was composed at.
    pub tick: u64,
}

impl FrameSnapshot {
    /// Looks up an object's descriptor set.
    pub fn get(&self, id: &GameObjectId) -> Option<&Arc<GameObjectDesc>> {
        self.objects.get(id)
    }

    /// Number of live objects in the snapshot.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the snapshot holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_delta_tracks_emptiness() {
        let mut delta = SnapshotDelta::new();
        assert!(delta.is_empty());
        delta.remove(GameObjectId::new());
        assert!(!delta.is_empty());
    }

    #[test]
    fn game_object_ids_are_unique() {
        assert_ne!(GameObjectId::new(), GameObjectId::new());
    }
}
