//! Tests for gesture triggering, preemption, completion and degradation.

use mimika_rig::{BoneRole, BoneTransform, Expression, PoseCache, Rig, RigDescriptor};

use super::{Gesture, GestureEngine};

const DT: f32 = 1.0 / 60.0;

fn humanoid() -> Rig {
    Rig::from_descriptor(&RigDescriptor::humanoid())
}

fn rest_pose(rig: &Rig) -> Vec<(BoneRole, BoneTransform)> {
    BoneRole::ALL
        .iter()
        .filter_map(|&role| rig.bone(role).map(|b| (role, *b)))
        .collect()
}

/// Steps the engine until the active slot clears.
fn run_to_completion(engine: &mut GestureEngine, rig: &mut Rig, cache: &mut PoseCache) {
    let mut frames = 0;
    while engine.active().is_some() {
        engine.update(rig, cache, DT);
        frames += 1;
        assert!(frames < 1000, "gesture never completed");
    }
}

#[test]
fn test_completion_restores_rest_pose_exactly() {
    let mut rig = humanoid();
    let mut cache = PoseCache::new();
    let mut engine = GestureEngine::new(42);
    let rest = rest_pose(&rig);

    // Repeated trigger/complete cycles must land back on the identical
    // rest transforms every time - no accumulation across invocations.
    for cycle in 0..10 {
        engine.set_action(&mut rig, &mut cache, Some(Gesture::Jump));
        run_to_completion(&mut engine, &mut rig, &mut cache);
        engine.set_action(&mut rig, &mut cache, None);

        for (role, transform) in &rest {
            assert_eq!(
                rig.bone(*role).unwrap(),
                transform,
                "cycle {}: {} drifted",
                cycle,
                role
            );
        }
    }
}

#[test]
fn test_every_catalog_entry_restores_its_bones() {
    for gesture in Gesture::ALL {
        let mut rig = humanoid();
        let mut cache = PoseCache::new();
        let mut engine = GestureEngine::new(7);
        let rest = rest_pose(&rig);

        engine.set_action(&mut rig, &mut cache, Some(gesture));
        run_to_completion(&mut engine, &mut rig, &mut cache);

        for (role, transform) in &rest {
            assert_eq!(
                rig.bone(*role).unwrap(),
                transform,
                "{} left {} off rest",
                gesture,
                role
            );
        }
    }
}

#[test]
fn test_repeated_request_is_edge_triggered() {
    let mut rig = humanoid();
    let mut cache = PoseCache::new();
    let mut engine = GestureEngine::new(42);

    engine.set_action(&mut rig, &mut cache, Some(Gesture::Wave));
    for _ in 0..10 {
        engine.update(&mut rig, &mut cache, DT);
    }
    let mid_flight = rig.bone(BoneRole::RightUpperArm).unwrap().rotation;

    // Same request again: no restart, the pose keeps evolving from where
    // it was rather than snapping back to progress zero.
    engine.set_action(&mut rig, &mut cache, Some(Gesture::Wave));
    engine.update(&mut rig, &mut cache, DT);
    assert_ne!(rig.bone(BoneRole::RightUpperArm).unwrap().rotation, mid_flight);
    assert_eq!(engine.active(), Some(Gesture::Wave));
}

#[test]
fn test_none_then_same_gesture_retriggers() {
    let mut rig = humanoid();
    let mut cache = PoseCache::new();
    let mut engine = GestureEngine::new(42);

    engine.set_action(&mut rig, &mut cache, Some(Gesture::Nod));
    run_to_completion(&mut engine, &mut rig, &mut cache);
    assert_eq!(engine.active(), None);

    engine.set_action(&mut rig, &mut cache, None);
    engine.set_action(&mut rig, &mut cache, Some(Gesture::Nod));
    assert_eq!(engine.active(), Some(Gesture::Nod));
}

#[test]
fn test_preemption_restores_previous_bones_first() {
    let mut rig = humanoid();
    let mut cache = PoseCache::new();
    let mut engine = GestureEngine::new(42);
    let rest_spine = *rig.bone(BoneRole::Spine).unwrap();

    // Run bow (spine + chest) to roughly half progress.
    engine.set_action(&mut rig, &mut cache, Some(Gesture::Bow));
    for _ in 0..30 {
        engine.update(&mut rig, &mut cache, DT);
    }
    assert_ne!(*rig.bone(BoneRole::Spine).unwrap(), rest_spine);

    // Preempt with a head-only gesture: the spine must be back at rest
    // before shake's first frame ever runs.
    engine.set_action(&mut rig, &mut cache, Some(Gesture::Shake));
    assert_eq!(engine.active(), Some(Gesture::Shake));
    assert_eq!(*rig.bone(BoneRole::Spine).unwrap(), rest_spine);
}

#[test]
fn test_unsupported_rig_drops_the_trigger() {
    // Bust rig has no hips or legs, so jump has nothing to animate.
    let mut rig = Rig::from_descriptor(&RigDescriptor::bust());
    let mut cache = PoseCache::new();
    let mut engine = GestureEngine::new(42);

    engine.set_action(&mut rig, &mut cache, Some(Gesture::Jump));
    assert_eq!(engine.active(), None);

    // A gesture the rig partially supports still plays.
    engine.set_action(&mut rig, &mut cache, Some(Gesture::Bow));
    assert_eq!(engine.active(), Some(Gesture::Bow));
}

#[test]
fn test_partial_rig_animates_only_present_bones() {
    // Head but no neck: tilt plays on the head alone.
    let descriptor = RigDescriptor {
        id: "headonly".to_string(),
        name: "Head Only".to_string(),
        bones: vec![BoneRole::Head],
        expressions: vec![Expression::Blink],
    };
    let mut rig = Rig::from_descriptor(&descriptor);
    let mut cache = PoseCache::new();
    let mut engine = GestureEngine::new(42);
    let rest = *rig.bone(BoneRole::Head).unwrap();

    engine.set_action(&mut rig, &mut cache, Some(Gesture::Tilt));
    for _ in 0..30 {
        engine.update(&mut rig, &mut cache, DT);
    }
    assert_ne!(*rig.bone(BoneRole::Head).unwrap(), rest);

    run_to_completion(&mut engine, &mut rig, &mut cache);
    assert_eq!(*rig.bone(BoneRole::Head).unwrap(), rest);
}

#[test]
fn test_variation_differs_between_invocations() {
    let mut rig = humanoid();
    let mut cache = PoseCache::new();
    let mut engine = GestureEngine::new(42);

    // Capture the pose at the same frame index across two invocations of
    // the same gesture; the variation draw must separate them.
    engine.set_action(&mut rig, &mut cache, Some(Gesture::Wave));
    for _ in 0..20 {
        engine.update(&mut rig, &mut cache, DT);
    }
    let first = rig.bone(BoneRole::RightUpperArm).unwrap().rotation;
    run_to_completion(&mut engine, &mut rig, &mut cache);

    engine.set_action(&mut rig, &mut cache, None);
    engine.set_action(&mut rig, &mut cache, Some(Gesture::Wave));
    for _ in 0..20 {
        engine.update(&mut rig, &mut cache, DT);
    }
    let second = rig.bone(BoneRole::RightUpperArm).unwrap().rotation;

    assert_ne!(first, second);
}

#[test]
fn test_same_seed_replays_identically() {
    let mut rig_a = humanoid();
    let mut rig_b = humanoid();
    let mut cache_a = PoseCache::new();
    let mut cache_b = PoseCache::new();
    let mut engine_a = GestureEngine::new(1234);
    let mut engine_b = GestureEngine::new(1234);

    for engine_rig in [
        (&mut engine_a, &mut rig_a, &mut cache_a),
        (&mut engine_b, &mut rig_b, &mut cache_b),
    ] {
        let (engine, rig, cache) = engine_rig;
        engine.set_action(rig, cache, Some(Gesture::Dance));
        for _ in 0..40 {
            engine.update(rig, cache, DT);
        }
    }

    for role in BoneRole::ALL {
        assert_eq!(
            rig_a.bone(role).map(|b| b.rotation),
            rig_b.bone(role).map(|b| b.rotation)
        );
    }
}

#[test]
fn test_reset_clears_slot_and_edge_state() {
    let mut rig = humanoid();
    let mut cache = PoseCache::new();
    let mut engine = GestureEngine::new(42);

    engine.set_action(&mut rig, &mut cache, Some(Gesture::Spin));
    assert_eq!(engine.active(), Some(Gesture::Spin));

    engine.reset();
    assert_eq!(engine.active(), None);

    // After reset the same gesture name is a fresh transition again.
    engine.set_action(&mut rig, &mut cache, Some(Gesture::Spin));
    assert_eq!(engine.active(), Some(Gesture::Spin));
}
