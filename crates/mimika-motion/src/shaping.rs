//! Easing, envelope, and variation primitives shared by the gesture catalog.
//!
//! Every catalog entry is a composition of these: an envelope window around
//! a held pose, a sinusoidal cycle for oscillating motions, and a seeded
//! perturbation so repeated plays of the same gesture differ.

use std::f32::consts::PI;

/// Quadratic ease-out: fast start, decelerating to 1.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// Sinusoidal ease-in-out over the full [0, 1] range.
pub fn ease_in_out_sine(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    -((PI * t).cos() - 1.0) / 2.0
}

/// Attack/release window: eases in over `fade_in`, holds at 1, eases out
/// over the final `fade_out` fraction. Both tails use quadratic ease-out.
pub fn envelope(progress: f32, fade_in: f32, fade_out: f32) -> f32 {
    if progress < fade_in {
        ease_out_quad(progress / fade_in)
    } else if progress > 1.0 - fade_out {
        ease_out_quad((1.0 - progress) / fade_out)
    } else {
        1.0
    }
}

/// Perturbs `base` by up to `range` using the invocation's variation value
/// `v` in [0, 1): `v = 0.5` yields `base`, the extremes yield `base ± range`.
pub fn vary(base: f32, range: f32, v: f32) -> f32 {
    base + (v * 2.0 - 1.0) * range
}
