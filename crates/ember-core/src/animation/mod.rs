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

//! Skeletal pose snapshots and the animation-provider contract.

use crate::frame::GameObjectId;
use crate::math::Mat4;

/// One frame's joint matrices for a skinned mesh.
///
/// Index 0 is always the identity root; the actual joints follow in rig
/// order. The pose is a value snapshot — it does not reference the animation
/// system that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonPose {
    matrices: Vec<Mat4>,
}

impl SkeletonPose {
    /// Builds a pose from per-joint matrices, prepending the identity root.
    pub fn from_joints(joints: Vec<Mat4>) -> Self {
        let mut matrices = Vec::with_capacity(joints.len() + 1);
        matrices.push(Mat4::IDENTITY);
        matrices.extend(joints);
        Self { matrices }
    }

    /// All matrices including the identity root at index 0.
    #[inline]
    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }

    /// Number of actual joints, excluding the reserved root slot.
    #[inline]
    pub fn joint_count(&self) -> usize {
        self.matrices.len().saturating_sub(1)
    }

    /// Total number of matrices, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Whether the pose carries no matrices at all.
    ///
    /// A well-formed pose is never empty (the root slot is always present);
    /// this exists for defensive validation at consumption time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

/// Supplies the current frame's skeletal pose for animated objects.
///
/// Implemented by the animation system outside this core and injected into
/// the descriptor-building stage.
pub trait AnimationProvider: Send + Sync {
    /// Returns the current per-joint transforms for `object`, in rig order
    /// and **without** the identity root, or `None` when the object has no
    /// active skeletal animation this frame.
    fn current_pose(&self, object: GameObjectId) -> Option<Vec<Mat4>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn from_joints_prepends_identity_root() {
        let joints = vec![
            Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)),
            Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)),
            Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0)),
        ];
        let pose = SkeletonPose::from_joints(joints);
        assert_eq!(pose.len(), 4);
        assert_eq!(pose.joint_count(), 3);
        assert_eq!(pose.matrices()[0], Mat4::IDENTITY);
    }

    #[test]
    fn empty_joint_list_still_has_root() {
        let pose = SkeletonPose::from_joints(Vec::new());
        assert_eq!(pose.len(), 1);
        assert_eq!(pose.joint_count(), 0);
        assert!(!pose.is_empty());
    }
}
