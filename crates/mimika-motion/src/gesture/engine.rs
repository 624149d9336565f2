//! Single-slot gesture state machine.

use rand::Rng;
use rand_pcg::Pcg32;
use tracing::{debug, warn};

use mimika_rig::{PoseCache, Rig};

use crate::rng::create_rng;

use super::{catalog, Gesture};

/// The one in-flight gesture invocation.
#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    gesture: Gesture,
    elapsed_ms: f32,
    variation: f32,
}

/// Runs at most one gesture at a time.
///
/// Action requests are edge-triggered: a request only fires when its value
/// differs from the previous request, so repeating the same name does not
/// restart a gesture mid-flight. Triggering a new gesture synchronously
/// restores the previous one's bones before the new one's first frame.
#[derive(Debug)]
pub struct GestureEngine {
    active: Option<ActiveGesture>,
    last_request: Option<Gesture>,
    rng: Pcg32,
}

impl GestureEngine {
    /// Creates the engine with its variation RNG stream.
    pub fn new(seed: u32) -> Self {
        Self {
            active: None,
            last_request: None,
            rng: create_rng(seed),
        }
    }

    /// The gesture currently playing, if any.
    pub fn active(&self) -> Option<Gesture> {
        self.active.map(|a| a.gesture)
    }

    /// Requests an action. Only a value *transition* triggers: repeating
    /// the previous request (including `None`) is ignored.
    pub fn set_action(
        &mut self,
        rig: &mut Rig,
        cache: &mut PoseCache,
        action: Option<Gesture>,
    ) {
        if action == self.last_request {
            return;
        }
        self.last_request = action;
        if let Some(gesture) = action {
            self.trigger(rig, cache, gesture);
        }
    }

    /// Starts a gesture, preempting any in-flight one.
    ///
    /// Dropped (with a log, never an error) when the rig has none of the
    /// gesture's required bones; with some but not all bones present the
    /// gesture plays partially.
    fn trigger(&mut self, rig: &mut Rig, cache: &mut PoseCache, gesture: Gesture) {
        let spec = gesture.spec();
        if spec.bones.iter().all(|&role| !rig.has_bone(role)) {
            warn!(gesture = %gesture, "rig supports none of the gesture's bones; dropping");
            return;
        }

        if let Some(previous) = self.active.take() {
            restore_bones(rig, cache, previous.gesture);
        }

        let variation = self.rng.gen::<f32>();
        debug!(gesture = %gesture, variation, "starting gesture");
        self.active = Some(ActiveGesture {
            gesture,
            elapsed_ms: 0.0,
            variation,
        });
    }

    /// Advances the active gesture by `dt` seconds and applies its frame.
    /// On reaching full progress, restores the affected bones to their rest
    /// snapshots and clears the slot.
    pub fn update(&mut self, rig: &mut Rig, cache: &mut PoseCache, dt: f32) {
        let Some(mut active) = self.active else {
            return;
        };

        active.elapsed_ms += dt * 1000.0;
        let duration = active.gesture.spec().duration_ms as f32;
        let progress = (active.elapsed_ms / duration).clamp(0.0, 1.0);

        catalog::animate(active.gesture, rig, cache, progress, active.variation);

        if progress >= 1.0 {
            restore_bones(rig, cache, active.gesture);
            self.active = None;
        } else {
            self.active = Some(active);
        }
    }

    /// Forgets the active gesture and request history without touching
    /// bones. Called on model swap, where the old snapshots are gone.
    pub fn reset(&mut self) {
        self.active = None;
        self.last_request = None;
    }
}

/// Restores every bone in the gesture's set from its rest snapshot.
fn restore_bones(rig: &mut Rig, cache: &PoseCache, gesture: Gesture) {
    for &role in gesture.spec().bones {
        cache.restore(rig, role);
    }
}
