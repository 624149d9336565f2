//! Bone role names and local transforms.

use std::fmt;
use std::str::FromStr;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// Semantic joint names of a humanoid rig.
///
/// Wire names are camelCase (`"leftUpperArm"`), matching the humanoid bone
/// naming used by VRM-style avatar assets. The set is closed: every consumer
/// matches exhaustively, and a rig simply omits the roles it does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoneRole {
    Hips,
    Spine,
    Chest,
    Neck,
    Head,
    LeftUpperArm,
    LeftLowerArm,
    RightUpperArm,
    RightLowerArm,
    LeftUpperLeg,
    RightUpperLeg,
}

impl BoneRole {
    /// Every role, in hierarchy order (root first).
    pub const ALL: [BoneRole; 11] = [
        BoneRole::Hips,
        BoneRole::Spine,
        BoneRole::Chest,
        BoneRole::Neck,
        BoneRole::Head,
        BoneRole::LeftUpperArm,
        BoneRole::LeftLowerArm,
        BoneRole::RightUpperArm,
        BoneRole::RightLowerArm,
        BoneRole::LeftUpperLeg,
        BoneRole::RightUpperLeg,
    ];

    /// Returns the wire name for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoneRole::Hips => "hips",
            BoneRole::Spine => "spine",
            BoneRole::Chest => "chest",
            BoneRole::Neck => "neck",
            BoneRole::Head => "head",
            BoneRole::LeftUpperArm => "leftUpperArm",
            BoneRole::LeftLowerArm => "leftLowerArm",
            BoneRole::RightUpperArm => "rightUpperArm",
            BoneRole::RightLowerArm => "rightLowerArm",
            BoneRole::LeftUpperLeg => "leftUpperLeg",
            BoneRole::RightUpperLeg => "rightUpperLeg",
        }
    }
}

impl fmt::Display for BoneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoneRole {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoneRole::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| RigError::UnknownBone {
                name: s.to_string(),
            })
    }
}

/// Local transform of a bone: position and rotation relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneTransform {
    /// Local position.
    pub position: Vec3,
    /// Local rotation.
    pub rotation: Quat,
}

impl BoneTransform {
    /// Identity transform (origin position, no rotation).
    pub const IDENTITY: BoneTransform = BoneTransform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Creates a transform at `position` with no rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
