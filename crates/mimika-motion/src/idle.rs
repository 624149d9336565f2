//! Continuous idle motion layer.
//!
//! Applies small rotational offsets every frame a rig is loaded: breathing
//! on spine/chest, lateral sway on hips/spine, multi-frequency head wander,
//! and a counter-phased arm pendulum. The sinusoid frequencies are
//! deliberately non-integer-ratio so the combined motion does not visibly
//! repeat within a session.
//!
//! Offsets compose onto each bone's *current* rotation; the layer runs
//! unconditionally and never blocks. It also captures the rest snapshot on
//! first touch, so the gesture layer always composes against true rest.

use glam::{Quat, Vec3};
use mimika_rig::{BoneRole, PoseCache, Rig};

/// Idle motion state: one phase clock, running since model load.
///
/// The clock is never reset by gestures or lip-sync; only a model swap
/// (via [`IdleLayer::reset`]) restarts it.
#[derive(Debug, Default)]
pub struct IdleLayer {
    elapsed: f32,
}

impl IdleLayer {
    /// Creates the layer with its phase clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of idle phase accumulated since model load.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Restarts the phase clock. Called on model swap.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advances the phase clock by `dt` seconds and applies this frame's
    /// offsets. Bones absent from the rig are skipped.
    pub fn update(&mut self, rig: &mut Rig, cache: &mut PoseCache, dt: f32) {
        self.elapsed += dt;
        let t = self.elapsed;

        // Breathing: slow inhale/exhale (~4.2s) with a secondary rhythm
        // breaking the regularity.
        let breath = (t * 1.5).sin();
        let breath2 = (t * 0.9).sin() * 0.3;
        rotate(rig, cache, BoneRole::Spine, Vec3::X, (breath + breath2) * 0.012);
        rotate(rig, cache, BoneRole::Chest, Vec3::X, breath * -0.008);

        // Body sway: lateral (~7.3s) plus forward-back drift (~9.1s),
        // with a counter-sway on the spine.
        let sway_z = (t * 0.86).sin() * 0.008;
        let sway_x = (t * 0.69).sin() * 0.005;
        rotate(rig, cache, BoneRole::Hips, Vec3::Z, sway_z);
        rotate(rig, cache, BoneRole::Hips, Vec3::X, sway_x);
        rotate(rig, cache, BoneRole::Spine, Vec3::Z, sway_z * -0.4);

        // Head micro-movement: nod, tilt and turn wander on separate
        // incommensurate frequencies, split between neck and head.
        let nod = (t * 1.1).sin() * 0.01 + (t * 0.47).sin() * 0.006;
        let tilt = (t * 0.76).sin() * 0.008 + (t * 0.31).sin() * 0.005;
        let turn = (t * 0.57).sin() * 0.007;
        rotate(rig, cache, BoneRole::Neck, Vec3::X, nod * 0.4);
        rotate(rig, cache, BoneRole::Neck, Vec3::Z, tilt * 0.3);
        rotate(rig, cache, BoneRole::Head, Vec3::X, nod * 0.6);
        rotate(rig, cache, BoneRole::Head, Vec3::Z, tilt * 0.7);
        rotate(rig, cache, BoneRole::Head, Vec3::Y, turn);

        // Arm pendulum, counter-phased left/right.
        let swing = (t * 0.86 + 0.5).sin() * 0.01;
        rotate(rig, cache, BoneRole::LeftUpperArm, Vec3::X, swing);
        rotate(rig, cache, BoneRole::RightUpperArm, Vec3::X, -swing);
    }
}

/// Composes an axis-angle increment onto the bone's current rotation,
/// capturing its rest snapshot first.
fn rotate(rig: &mut Rig, cache: &mut PoseCache, role: BoneRole, axis: Vec3, angle: f32) {
    cache.capture_if_absent(rig, role);
    if let Some(bone) = rig.bone_mut(role) {
        bone.rotation *= Quat::from_axis_angle(axis, angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimika_rig::RigDescriptor;

    #[test]
    fn test_phase_clock_accumulates() {
        let mut rig = Rig::from_descriptor(&RigDescriptor::humanoid());
        let mut cache = PoseCache::new();
        let mut idle = IdleLayer::new();

        for _ in 0..60 {
            idle.update(&mut rig, &mut cache, 1.0 / 60.0);
        }
        assert!((idle.elapsed() - 1.0).abs() < 1e-4);

        idle.reset();
        assert_eq!(idle.elapsed(), 0.0);
    }

    #[test]
    fn test_update_moves_present_bones() {
        let mut rig = Rig::from_descriptor(&RigDescriptor::humanoid());
        let mut cache = PoseCache::new();
        let mut idle = IdleLayer::new();

        let rest = rig.bone(BoneRole::Spine).unwrap().rotation;
        // Advance far enough that the breathing sinusoid is well off zero.
        for _ in 0..30 {
            idle.update(&mut rig, &mut cache, 1.0 / 30.0);
        }
        assert_ne!(rig.bone(BoneRole::Spine).unwrap().rotation, rest);
    }

    #[test]
    fn test_missing_bones_are_skipped() {
        let mut rig = Rig::from_descriptor(&RigDescriptor::bust());
        let mut cache = PoseCache::new();
        let mut idle = IdleLayer::new();

        // No hips, arms or legs on the bust rig; this must not panic and
        // must still move the bones that do exist.
        for _ in 0..10 {
            idle.update(&mut rig, &mut cache, 0.033);
        }
        assert!(rig.bone(BoneRole::Head).is_some());
        assert!(cache.snapshot(BoneRole::Hips).is_none());
    }

    #[test]
    fn test_first_touch_captures_rest_snapshot() {
        let mut rig = Rig::from_descriptor(&RigDescriptor::humanoid());
        let mut cache = PoseCache::new();
        let mut idle = IdleLayer::new();

        let rest = *rig.bone(BoneRole::Head).unwrap();
        idle.update(&mut rig, &mut cache, 0.016);
        // The snapshot is the pre-update transform, not the perturbed one.
        assert_eq!(*cache.snapshot(BoneRole::Head).unwrap(), rest);
    }

    #[test]
    fn test_same_clock_is_deterministic() {
        let mut rig_a = Rig::from_descriptor(&RigDescriptor::humanoid());
        let mut rig_b = Rig::from_descriptor(&RigDescriptor::humanoid());
        let mut cache_a = PoseCache::new();
        let mut cache_b = PoseCache::new();
        let mut idle_a = IdleLayer::new();
        let mut idle_b = IdleLayer::new();

        for _ in 0..100 {
            idle_a.update(&mut rig_a, &mut cache_a, 0.016);
            idle_b.update(&mut rig_b, &mut cache_b, 0.016);
        }
        for role in BoneRole::ALL {
            assert_eq!(rig_a.bone(role).map(|b| b.rotation), rig_b.bone(role).map(|b| b.rotation));
        }
    }
}
