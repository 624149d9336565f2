//! Procedural animation functions, one per catalog entry.
//!
//! Every function receives normalized `progress` in [0, 1] and the
//! invocation's `variation` value `v` in [0, 1), and writes bone transforms
//! composed onto the rest snapshot (never onto the current transform, so
//! repeated triggers cannot drift). Missing bones are skipped per bone:
//! partial rigs get a partial gesture.

use std::f32::consts::PI;

use glam::{EulerRot, Quat, Vec3};
use mimika_rig::{BoneRole, PoseCache, Rig};

use crate::shaping::{ease_in_out_sine, ease_out_quad, envelope, vary};

use super::Gesture;

/// Runs one frame of the gesture's animation.
pub(crate) fn animate(gesture: Gesture, rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    match gesture {
        Gesture::Jump => jump(rig, cache, progress, v),
        Gesture::Spin => spin(rig, cache, progress, v),
        Gesture::Wave => wave(rig, cache, progress, v),
        Gesture::Nod => nod(rig, cache, progress, v),
        Gesture::Bow => bow(rig, cache, progress, v),
        Gesture::Shake => shake(rig, cache, progress, v),
        Gesture::Laugh => laugh(rig, cache, progress, v),
        Gesture::Surprise => surprise(rig, cache, progress, v),
        Gesture::Think => think(rig, cache, progress, v),
        Gesture::Dance => dance(rig, cache, progress, v),
        Gesture::Stretch => stretch(rig, cache, progress, v),
        Gesture::Tilt => tilt(rig, cache, progress, v),
        Gesture::LookLeft => look(rig, cache, progress, v, 1.0),
        Gesture::LookRight => look(rig, cache, progress, v, -1.0),
        Gesture::Cheer => cheer(rig, cache, progress, v),
        Gesture::Sway => sway(rig, cache, progress, v),
        Gesture::Shrug => shrug(rig, cache, progress, v),
        Gesture::Peek => peek(rig, cache, progress, v),
        Gesture::Sleep => sleep(rig, cache, progress, v),
        Gesture::Clap => clap(rig, cache, progress, v),
        Gesture::Shy => shy(rig, cache, progress, v),
        Gesture::Angry => angry(rig, cache, progress, v),
        Gesture::Pray => pray(rig, cache, progress, v),
        Gesture::Flex => flex(rig, cache, progress, v),
        Gesture::Sneak => sneak(rig, cache, progress, v),
    }
}

/// Sets the bone's rotation to the rest snapshot composed with an XYZ Euler
/// delta. Captures the snapshot on first touch; skips absent bones.
fn apply_rotation(rig: &mut Rig, cache: &mut PoseCache, role: BoneRole, x: f32, y: f32, z: f32) {
    cache.capture_if_absent(rig, role);
    let Some(snapshot) = cache.snapshot(role).copied() else {
        return;
    };
    if let Some(bone) = rig.bone_mut(role) {
        bone.rotation = snapshot.rotation * Quat::from_euler(EulerRot::XYZ, x, y, z);
    }
}

/// Sets the bone's position to the rest snapshot plus an offset.
fn apply_offset(rig: &mut Rig, cache: &mut PoseCache, role: BoneRole, offset: Vec3) {
    cache.capture_if_absent(rig, role);
    let Some(snapshot) = cache.snapshot(role).copied() else {
        return;
    };
    if let Some(bone) = rig.bone_mut(role) {
        bone.position = snapshot.position + offset;
    }
}

fn jump(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let height = (progress * PI).sin() * vary(0.15, 0.05, v);
    apply_offset(rig, cache, BoneRole::Hips, Vec3::new(0.0, height, 0.0));

    // Crouch into the takeoff and the landing, airborne in between.
    let leg_bend = if progress < 0.2 {
        ease_out_quad(progress / 0.2) * vary(0.3, 0.1, v)
    } else if progress > 0.8 {
        ease_out_quad((1.0 - progress) / 0.2) * vary(0.3, 0.1, v)
    } else {
        0.0
    };
    for role in [BoneRole::LeftUpperLeg, BoneRole::RightUpperLeg] {
        apply_rotation(rig, cache, role, -leg_bend, 0.0, 0.0);
    }
}

fn spin(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let turns = vary(1.0, 0.25, v);
    let angle = ease_in_out_sine(progress) * PI * 2.0 * turns;
    apply_rotation(rig, cache, BoneRole::Hips, 0.0, angle, 0.0);
}

fn wave(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.15, 0.15);
    let raise = vary(2.5, 0.3, v);
    let swing_speed = vary(4.0, 0.5, v);

    apply_rotation(rig, cache, BoneRole::RightUpperArm, 0.0, 0.0, -env * raise);
    let wave_angle = (progress * PI * swing_speed).sin() * vary(0.4, 0.1, v);
    apply_rotation(rig, cache, BoneRole::RightLowerArm, 0.0, wave_angle, 0.0);
}

fn nod(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let cycles = vary(2.0, 0.5, v);
    let amplitude = vary(0.3, 0.08, v);
    let angle = (progress * PI * cycles).sin() * amplitude;
    apply_rotation(rig, cache, BoneRole::Head, angle, 0.0, 0.0);
}

fn bow(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.3, 0.3);
    let depth = vary(0.4, 0.1, v);
    apply_rotation(rig, cache, BoneRole::Spine, env * depth, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::Chest, env * depth * 0.5, 0.0, 0.0);
}

fn shake(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let cycles = vary(3.0, 0.5, v);
    let amplitude = vary(0.35, 0.08, v);
    let angle = (progress * PI * cycles).sin() * amplitude;
    apply_rotation(rig, cache, BoneRole::Head, 0.0, angle, 0.0);
}

fn laugh(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.15, 0.2);
    let speed = vary(6.0, 1.0, v);
    let intensity = vary(0.08, 0.03, v);

    let bounce = (progress * PI * speed).sin() * intensity * env;
    apply_rotation(rig, cache, BoneRole::Spine, -bounce, 0.0, 0.0);

    let chest_bounce = (progress * PI * speed + 0.5).sin() * intensity * 0.7 * env;
    apply_rotation(rig, cache, BoneRole::Chest, -chest_bounce, 0.0, 0.0);

    let tilt_back = vary(0.15, 0.05, v) * env;
    apply_rotation(rig, cache, BoneRole::Head, -tilt_back, 0.0, 0.0);
}

fn surprise(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.1, 0.4);
    let lean_back = vary(0.2, 0.06, v) * env;
    apply_rotation(rig, cache, BoneRole::Spine, -lean_back, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::Head, -lean_back * 0.5, 0.0, 0.0);

    let arm_raise = vary(1.2, 0.3, v) * env;
    apply_rotation(rig, cache, BoneRole::LeftUpperArm, 0.0, 0.0, arm_raise);
    apply_rotation(rig, cache, BoneRole::RightUpperArm, 0.0, 0.0, -arm_raise);
}

fn think(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.2, 0.2);
    let tilt_angle = vary(0.2, 0.05, v);

    apply_rotation(
        rig,
        cache,
        BoneRole::Head,
        vary(0.08, 0.03, v) * env,
        0.0,
        tilt_angle * env,
    );
    apply_rotation(
        rig,
        cache,
        BoneRole::RightUpperArm,
        vary(0.8, 0.2, v) * env,
        0.0,
        -vary(1.0, 0.2, v) * env,
    );
    apply_rotation(
        rig,
        cache,
        BoneRole::RightLowerArm,
        -vary(1.2, 0.2, v) * env,
        0.0,
        0.0,
    );
}

fn dance(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let speed = vary(3.0, 0.5, v);
    let hip_sway = vary(0.15, 0.04, v);
    let spine_groove = vary(0.1, 0.03, v);
    let arm_swing = vary(0.8, 0.2, v);
    let phase = progress * PI * speed;

    let side_shift = phase.sin() * 0.03;
    let hop = (phase * 2.0).sin().abs() * 0.02;
    apply_offset(rig, cache, BoneRole::Hips, Vec3::new(side_shift, hop, 0.0));
    apply_rotation(rig, cache, BoneRole::Hips, 0.0, phase.sin() * hip_sway, 0.0);

    apply_rotation(
        rig,
        cache,
        BoneRole::Spine,
        (phase * 2.0).sin() * spine_groove * 0.5,
        0.0,
        phase.sin() * spine_groove,
    );

    apply_rotation(
        rig,
        cache,
        BoneRole::LeftUpperArm,
        phase.sin() * 0.3,
        0.0,
        arm_swing * (phase + PI).sin(),
    );
    apply_rotation(
        rig,
        cache,
        BoneRole::RightUpperArm,
        (phase + PI).sin() * 0.3,
        0.0,
        -arm_swing * phase.sin(),
    );
}

fn stretch(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.25, 0.25);
    let raise = vary(2.8, 0.3, v) * env;
    let back_bend = vary(0.15, 0.05, v) * env;

    apply_rotation(rig, cache, BoneRole::Spine, -back_bend, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::LeftUpperArm, 0.0, 0.0, raise);
    apply_rotation(rig, cache, BoneRole::RightUpperArm, 0.0, 0.0, -raise);
}

fn tilt(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.2, 0.3);
    let angle = vary(0.35, 0.1, v) * env;
    let direction = if v > 0.5 { 1.0 } else { -1.0 };

    apply_rotation(rig, cache, BoneRole::Head, 0.0, 0.0, angle * direction);
    apply_rotation(rig, cache, BoneRole::Neck, 0.0, 0.0, angle * 0.3 * direction);
}

fn look(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32, direction: f32) {
    let env = envelope(progress, 0.2, 0.3);
    let angle = vary(0.5, 0.1, v) * env * direction;

    apply_rotation(rig, cache, BoneRole::Head, 0.0, angle, 0.0);
    apply_rotation(rig, cache, BoneRole::Neck, 0.0, angle * 0.3, 0.0);
}

fn cheer(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.15, 0.15);
    let raise = vary(2.8, 0.3, v) * env;
    let pump_speed = vary(4.0, 1.0, v);
    let pump = (progress * PI * pump_speed).sin() * 0.2 * env;

    apply_rotation(rig, cache, BoneRole::LeftUpperArm, 0.0, 0.0, raise + pump);
    apply_rotation(rig, cache, BoneRole::RightUpperArm, 0.0, 0.0, -(raise + pump));

    let curl = -vary(0.5, 0.15, v) * env;
    apply_rotation(rig, cache, BoneRole::LeftLowerArm, curl, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::RightLowerArm, curl, 0.0, 0.0);

    apply_rotation(rig, cache, BoneRole::Spine, -vary(0.08, 0.03, v) * env, 0.0, 0.0);
}

fn sway(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let speed = vary(2.0, 0.5, v);
    let amplitude = vary(0.12, 0.04, v);
    let phase = progress * PI * speed;

    apply_offset(rig, cache, BoneRole::Hips, Vec3::new(phase.sin() * 0.02, 0.0, 0.0));
    apply_rotation(rig, cache, BoneRole::Hips, 0.0, 0.0, phase.sin() * amplitude);
    apply_rotation(
        rig,
        cache,
        BoneRole::Spine,
        0.0,
        0.0,
        (phase + 0.3).sin() * amplitude * 0.5,
    );
}

fn shrug(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.2, 0.3);
    let shoulder_raise = vary(0.5, 0.15, v) * env;

    apply_rotation(rig, cache, BoneRole::LeftUpperArm, 0.0, 0.0, shoulder_raise);
    apply_rotation(rig, cache, BoneRole::RightUpperArm, 0.0, 0.0, -shoulder_raise);

    let head_tilt = vary(0.15, 0.05, v) * env * if v > 0.5 { 1.0 } else { -1.0 };
    apply_rotation(rig, cache, BoneRole::Head, 0.0, 0.0, head_tilt);
}

fn peek(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.2, 0.3);
    let direction = if v > 0.5 { 1.0 } else { -1.0 };
    let lean = vary(0.25, 0.08, v) * env;

    apply_offset(
        rig,
        cache,
        BoneRole::Hips,
        Vec3::new(direction * 0.05 * env, 0.0, 0.0),
    );
    apply_rotation(rig, cache, BoneRole::Hips, 0.0, 0.0, lean * direction);
    apply_rotation(rig, cache, BoneRole::Spine, 0.0, 0.0, lean * 0.5 * direction);
    apply_rotation(
        rig,
        cache,
        BoneRole::Head,
        0.0,
        -direction * vary(0.2, 0.05, v) * env,
        0.0,
    );
}

fn sleep(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    // Slower settle than the shared envelope: long droop, late recovery.
    let fall_env = if progress < 0.2 {
        ease_out_quad(progress / 0.2)
    } else if progress > 0.85 {
        ease_out_quad((1.0 - progress) / 0.15)
    } else {
        1.0
    };

    let head_drop = vary(0.45, 0.1, v);
    let bob = (progress * PI * vary(1.5, 0.3, v)).sin() * 0.06;

    apply_rotation(rig, cache, BoneRole::Head, (head_drop + bob) * fall_env, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::Neck, head_drop * 0.3 * fall_env, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::Spine, vary(0.08, 0.03, v) * fall_env, 0.0, 0.0);
}

fn clap(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.1, 0.15);
    let speed = vary(5.0, 1.0, v);
    let arm_angle = vary(1.0, 0.2, v) * env;

    // Hands meet only on the inward half of each beat.
    let clap_phase = (progress * PI * speed).sin();
    let clap_offset = if clap_phase > 0.0 { clap_phase * 0.3 } else { 0.0 };

    apply_rotation(
        rig,
        cache,
        BoneRole::LeftUpperArm,
        arm_angle * 0.8,
        0.0,
        arm_angle - clap_offset * env,
    );
    apply_rotation(
        rig,
        cache,
        BoneRole::RightUpperArm,
        arm_angle * 0.8,
        0.0,
        -(arm_angle - clap_offset * env),
    );

    let curl = -vary(0.8, 0.15, v) * env;
    apply_rotation(rig, cache, BoneRole::LeftLowerArm, curl, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::RightLowerArm, curl, 0.0, 0.0);
}

fn shy(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.2, 0.3);
    let look_away = vary(0.35, 0.1, v) * env;
    let direction = if v > 0.5 { 1.0 } else { -1.0 };

    apply_rotation(
        rig,
        cache,
        BoneRole::Head,
        vary(0.15, 0.05, v) * env,
        look_away * direction,
        0.0,
    );
    apply_rotation(rig, cache, BoneRole::Spine, vary(0.1, 0.03, v) * env, 0.0, 0.0);

    let arm_pull = vary(0.3, 0.1, v) * env;
    apply_rotation(rig, cache, BoneRole::LeftUpperArm, arm_pull, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::RightUpperArm, arm_pull, 0.0, 0.0);
}

fn angry(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.15, 0.25);
    let lean_forward = vary(0.15, 0.05, v) * env;
    let tremble = (progress * PI * vary(8.0, 2.0, v)).sin() * 0.02 * env;

    apply_rotation(rig, cache, BoneRole::Spine, lean_forward + tremble, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::Head, lean_forward * 0.5, tremble, 0.0);

    let arm_tense = vary(0.6, 0.15, v) * env;
    apply_rotation(
        rig,
        cache,
        BoneRole::LeftUpperArm,
        arm_tense * 0.5,
        0.0,
        arm_tense * 0.3,
    );
    apply_rotation(
        rig,
        cache,
        BoneRole::RightUpperArm,
        arm_tense * 0.5,
        0.0,
        -arm_tense * 0.3,
    );
}

fn pray(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.2, 0.2);
    let arm_angle = vary(1.0, 0.15, v) * env;

    apply_rotation(rig, cache, BoneRole::LeftUpperArm, arm_angle, 0.0, arm_angle * 0.6);
    apply_rotation(rig, cache, BoneRole::RightUpperArm, arm_angle, 0.0, -arm_angle * 0.6);

    let curl = -vary(1.2, 0.2, v) * env;
    apply_rotation(rig, cache, BoneRole::LeftLowerArm, curl, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::RightLowerArm, curl, 0.0, 0.0);

    apply_rotation(rig, cache, BoneRole::Spine, vary(0.1, 0.03, v) * env, 0.0, 0.0);
}

fn flex(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.2, 0.2);
    let raise = vary(1.8, 0.3, v) * env;
    let pulse = (progress * PI * vary(3.0, 0.5, v)).sin() * 0.15 * env;

    apply_rotation(rig, cache, BoneRole::LeftUpperArm, 0.0, 0.0, raise + pulse);
    apply_rotation(rig, cache, BoneRole::RightUpperArm, 0.0, 0.0, -(raise + pulse));

    let curl = -vary(1.8, 0.3, v) * env;
    apply_rotation(rig, cache, BoneRole::LeftLowerArm, curl, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::RightLowerArm, curl, 0.0, 0.0);

    apply_rotation(rig, cache, BoneRole::Spine, -vary(0.08, 0.03, v) * env, 0.0, 0.0);
}

fn sneak(rig: &mut Rig, cache: &mut PoseCache, progress: f32, v: f32) {
    let env = envelope(progress, 0.15, 0.15);
    let crouch = vary(0.06, 0.02, v);
    let step_speed = vary(3.0, 0.5, v);

    apply_offset(rig, cache, BoneRole::Hips, Vec3::new(0.0, -crouch * env, 0.0));
    apply_rotation(rig, cache, BoneRole::Spine, vary(0.2, 0.05, v) * env, 0.0, 0.0);
    apply_rotation(rig, cache, BoneRole::Chest, vary(0.1, 0.03, v) * env, 0.0, 0.0);

    let leg_bend = vary(0.2, 0.05, v) * env;
    let step_phase = (progress * PI * step_speed).sin();
    apply_rotation(
        rig,
        cache,
        BoneRole::LeftUpperLeg,
        -(leg_bend + step_phase.max(0.0) * 0.1 * env),
        0.0,
        0.0,
    );
    apply_rotation(
        rig,
        cache,
        BoneRole::RightUpperLeg,
        -(leg_bend + (-step_phase).max(0.0) * 0.1 * env),
        0.0,
        0.0,
    );
}
