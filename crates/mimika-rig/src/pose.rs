//! Rest-pose snapshot store.
//!
//! Every animation layer composes its motion onto the rest pose captured
//! here, never onto a previously-animated transform. The snapshot for a bone
//! is taken at most once per model load, on the first touch by any layer;
//! restoring it is bit-exact, so repeated animate/restore cycles cannot
//! accumulate drift.

use std::collections::HashMap;

use crate::bone::{BoneRole, BoneTransform};
use crate::rig::Rig;

/// Per-bone rest-pose snapshots for one loaded model instance.
///
/// Lifetime is tied to the model: [`PoseCache::reset`] discards everything
/// when the model is replaced.
#[derive(Debug, Default)]
pub struct PoseCache {
    snapshots: HashMap<BoneRole, BoneTransform>,
}

impl PoseCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the bone's current transform as its rest pose, unless a
    /// snapshot already exists. No-op if the rig lacks the bone.
    pub fn capture_if_absent(&mut self, rig: &Rig, role: BoneRole) {
        if self.snapshots.contains_key(&role) {
            return;
        }
        if let Some(bone) = rig.bone(role) {
            self.snapshots.insert(role, *bone);
        }
    }

    /// Copies the stored snapshot back onto the bone's live transform.
    /// No-op if no snapshot exists or the rig lacks the bone.
    pub fn restore(&self, rig: &mut Rig, role: BoneRole) {
        if let Some(snapshot) = self.snapshots.get(&role) {
            if let Some(bone) = rig.bone_mut(role) {
                *bone = *snapshot;
            }
        }
    }

    /// Returns the stored snapshot for a bone, if captured.
    pub fn snapshot(&self, role: BoneRole) -> Option<&BoneTransform> {
        self.snapshots.get(&role)
    }

    /// Discards all snapshots. Called on model unload/swap.
    pub fn reset(&mut self) {
        self.snapshots.clear();
    }

    /// Number of captured snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshot has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
