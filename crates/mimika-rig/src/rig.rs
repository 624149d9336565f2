//! Rig state and JSON rig descriptors.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bone::{BoneRole, BoneTransform};
use crate::error::{RigError, RigResult};
use crate::expression::Expression;

/// In-memory state of a loaded avatar model.
///
/// Holds the live local transform of every bone the model actually has, and
/// a weight per enabled expression channel. Bone and expression lookups by
/// role never fail - an absent name yields `None` / a silent no-op, which is
/// what lets every animation layer degrade partially on reduced rigs.
#[derive(Debug, Clone)]
pub struct Rig {
    bones: HashMap<BoneRole, BoneTransform>,
    expressions: HashMap<Expression, f32>,
}

impl Rig {
    /// Builds a rig from a descriptor, placing each listed bone at its
    /// default local transform and zeroing each enabled expression.
    pub fn from_descriptor(descriptor: &RigDescriptor) -> Self {
        let bones = descriptor
            .bones
            .iter()
            .map(|&role| (role, default_transform(role)))
            .collect();
        let expressions = descriptor
            .expressions
            .iter()
            .map(|&expr| (expr, 0.0))
            .collect();
        Self { bones, expressions }
    }

    /// Returns the bone's transform, or `None` if the rig lacks the role.
    pub fn bone(&self, role: BoneRole) -> Option<&BoneTransform> {
        self.bones.get(&role)
    }

    /// Mutable access to a bone's transform.
    pub fn bone_mut(&mut self, role: BoneRole) -> Option<&mut BoneTransform> {
        self.bones.get_mut(&role)
    }

    /// Whether the rig has a bone for this role.
    pub fn has_bone(&self, role: BoneRole) -> bool {
        self.bones.contains_key(&role)
    }

    /// Sets an expression weight. Silent no-op if the channel is not
    /// enabled on this rig.
    pub fn set_expression(&mut self, expr: Expression, weight: f32) {
        if let Some(value) = self.expressions.get_mut(&expr) {
            *value = weight.clamp(0.0, 1.0);
        }
    }

    /// Returns the current weight of an enabled channel.
    pub fn expression(&self, expr: Expression) -> Option<f32> {
        self.expressions.get(&expr).copied()
    }

    /// Whether the rig enables this expression channel.
    pub fn has_expression(&self, expr: Expression) -> bool {
        self.expressions.contains_key(&expr)
    }
}

/// Loadable description of an avatar rig: which bones and expression
/// channels the model exposes.
///
/// This is the narrow contract with the model-loading collaborator: it
/// resolves an avatar identifier to one of these, and the runtime only ever
/// asks for bones/expressions by name afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigDescriptor {
    /// Stable identifier, e.g. `"avatar_a"`.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Bones present on the model.
    pub bones: Vec<BoneRole>,
    /// Expression channels the model supports.
    pub expressions: Vec<Expression>,
}

impl RigDescriptor {
    /// Parses a descriptor from JSON and validates it.
    pub fn from_json(json: &str) -> RigResult<Self> {
        let descriptor: RigDescriptor = serde_json::from_str(json)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Checks structural validity (non-empty id and bone set).
    pub fn validate(&self) -> RigResult<()> {
        if self.id.is_empty() {
            return Err(RigError::invalid_descriptor("empty rig id"));
        }
        if self.bones.is_empty() {
            return Err(RigError::invalid_descriptor("rig lists no bones"));
        }
        Ok(())
    }

    /// Full humanoid preset: every bone role, every expression channel.
    pub fn humanoid() -> Self {
        Self {
            id: "humanoid".to_string(),
            name: "Humanoid".to_string(),
            bones: BoneRole::ALL.to_vec(),
            expressions: Expression::ALL.to_vec(),
        }
    }

    /// Bust preset: torso and head only, no arms or legs. Exercises the
    /// partial-degradation paths.
    pub fn bust() -> Self {
        Self {
            id: "bust".to_string(),
            name: "Bust".to_string(),
            bones: vec![
                BoneRole::Spine,
                BoneRole::Chest,
                BoneRole::Neck,
                BoneRole::Head,
            ],
            expressions: Expression::ALL.to_vec(),
        }
    }
}

/// Default local transform for a role: an approximate humanoid bind pose.
/// Only the positions matter (gestures that translate compose offsets onto
/// them); rotations start at identity.
fn default_transform(role: BoneRole) -> BoneTransform {
    let position = match role {
        BoneRole::Hips => Vec3::new(0.0, 0.95, 0.0),
        BoneRole::Spine => Vec3::new(0.0, 0.10, 0.0),
        BoneRole::Chest => Vec3::new(0.0, 0.15, 0.0),
        BoneRole::Neck => Vec3::new(0.0, 0.20, 0.0),
        BoneRole::Head => Vec3::new(0.0, 0.08, 0.0),
        BoneRole::LeftUpperArm => Vec3::new(0.12, 0.17, 0.0),
        BoneRole::LeftLowerArm => Vec3::new(0.26, 0.0, 0.0),
        BoneRole::RightUpperArm => Vec3::new(-0.12, 0.17, 0.0),
        BoneRole::RightLowerArm => Vec3::new(-0.26, 0.0, 0.0),
        BoneRole::LeftUpperLeg => Vec3::new(0.09, -0.04, 0.0),
        BoneRole::RightUpperLeg => Vec3::new(-0.09, -0.04, 0.0),
    };
    BoneTransform::at(position)
}
