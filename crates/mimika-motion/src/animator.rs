//! Frame scheduler owning the animation layers.
//!
//! One `update(dt)` call per render frame applies the layers in fixed
//! order: idle motion, then blink, then the active gesture. Ordering
//! matters - later layers compose onto (or for their owned bones,
//! overwrite from rest) what earlier layers wrote. Lip-sync expression
//! writes happen outside this scheduler on the audio clock.

use mimika_rig::{PoseCache, Rig};

use crate::blink::BlinkCycle;
use crate::gesture::{Gesture, GestureEngine};
use crate::idle::IdleLayer;
use crate::rng::derive_component_seed;

/// Drives a loaded rig: owns the rig state, the rest-pose cache, and the
/// three frame-clocked animation layers.
#[derive(Debug)]
pub struct Animator {
    rig: Rig,
    cache: PoseCache,
    idle: IdleLayer,
    blink: BlinkCycle,
    gestures: GestureEngine,
}

impl Animator {
    /// Creates an animator for a loaded rig.
    ///
    /// `seed` is the session's base seed; blink timing and gesture
    /// variation get independent streams derived from it, so the whole
    /// session replays deterministically.
    pub fn new(rig: Rig, seed: u32) -> Self {
        Self {
            rig,
            cache: PoseCache::new(),
            idle: IdleLayer::new(),
            blink: BlinkCycle::new(derive_component_seed(seed, "blink")),
            gestures: GestureEngine::new(derive_component_seed(seed, "gesture")),
        }
    }

    /// Advances one frame by `dt` seconds: idle, then blink, then gesture.
    pub fn update(&mut self, dt: f32) {
        self.idle.update(&mut self.rig, &mut self.cache, dt);
        self.blink.update(&mut self.rig, dt);
        self.gestures.update(&mut self.rig, &mut self.cache, dt);
    }

    /// Forwards an action request to the gesture engine (edge-triggered).
    pub fn set_action(&mut self, action: Option<Gesture>) {
        self.gestures
            .set_action(&mut self.rig, &mut self.cache, action);
    }

    /// The gesture currently playing, if any.
    pub fn active_gesture(&self) -> Option<Gesture> {
        self.gestures.active()
    }

    /// Swaps in a new model: discards all rest-pose snapshots, restarts the
    /// idle clock and blink cycle, and clears the gesture slot.
    pub fn replace_rig(&mut self, rig: Rig) {
        self.rig = rig;
        self.cache.reset();
        self.idle.reset();
        self.blink.reset(&mut self.rig);
        self.gestures.reset();
    }

    /// The live rig state (for lip-sync writes and rendering).
    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Mutable access to the live rig state.
    pub fn rig_mut(&mut self) -> &mut Rig {
        &mut self.rig
    }

    /// The rest-pose snapshot store.
    pub fn pose_cache(&self) -> &PoseCache {
        &self.cache
    }

    /// Seconds of idle phase since model load.
    pub fn idle_elapsed(&self) -> f32 {
        self.idle.elapsed()
    }
}
