//! Blink cycle state machine.
//!
//! A three-phase one-shot: idle (eyes open, randomized wait) -> closing
//! (80 ms) -> opening (60 ms) -> idle. The countdown timer is decremented
//! by the frame delta; transitions happen when it crosses zero. If the rig
//! has no `blink` expression channel the set-value calls are no-ops and the
//! machine still advances.

use rand::Rng;
use rand_pcg::Pcg32;

use mimika_rig::{Expression, Rig};

use crate::rng::create_rng;

/// Eyelid closing time in seconds.
const CLOSING_SECS: f32 = 0.08;
/// Eyelid opening time in seconds.
const OPENING_SECS: f32 = 0.06;
/// Minimum open-eyed wait between blinks in seconds.
const IDLE_MIN_SECS: f32 = 2.0;
/// Width of the uniform random addition to the wait in seconds.
const IDLE_RANGE_SECS: f32 = 4.0;

/// Phase of the blink cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    /// Eyes open, waiting for the next blink.
    Idle,
    /// Eyelids held closed.
    Closing,
    /// Eyelids reopening.
    Opening,
}

/// Blink state machine with its own timing RNG stream.
#[derive(Debug)]
pub struct BlinkCycle {
    phase: BlinkPhase,
    timer: f32,
    rng: Pcg32,
}

impl BlinkCycle {
    /// Creates the cycle, drawing the first idle wait from `seed`.
    pub fn new(seed: u32) -> Self {
        let mut rng = create_rng(seed);
        let timer = IDLE_MIN_SECS + rng.gen::<f32>() * IDLE_RANGE_SECS;
        Self {
            phase: BlinkPhase::Idle,
            timer,
            rng,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Reopens the eyes and redraws the idle wait. Called on model swap.
    pub fn reset(&mut self, rig: &mut Rig) {
        rig.set_expression(Expression::Blink, 0.0);
        self.phase = BlinkPhase::Idle;
        self.timer = IDLE_MIN_SECS + self.rng.gen::<f32>() * IDLE_RANGE_SECS;
    }

    /// Decrements the timer by `dt` seconds and advances the machine when
    /// it runs out. At most one transition per frame.
    pub fn update(&mut self, rig: &mut Rig, dt: f32) {
        self.timer -= dt;
        if self.timer > 0.0 {
            return;
        }

        match self.phase {
            BlinkPhase::Idle => {
                rig.set_expression(Expression::Blink, 1.0);
                self.phase = BlinkPhase::Closing;
                self.timer = CLOSING_SECS;
            }
            BlinkPhase::Closing => {
                rig.set_expression(Expression::Blink, 0.0);
                self.phase = BlinkPhase::Opening;
                self.timer = OPENING_SECS;
            }
            BlinkPhase::Opening => {
                self.phase = BlinkPhase::Idle;
                self.timer = IDLE_MIN_SECS + self.rng.gen::<f32>() * IDLE_RANGE_SECS;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimika_rig::RigDescriptor;

    fn rig() -> Rig {
        Rig::from_descriptor(&RigDescriptor::humanoid())
    }

    /// Steps the cycle until it leaves `phase` or `max` frames elapse.
    fn step_until_leaves(blink: &mut BlinkCycle, rig: &mut Rig, phase: BlinkPhase, max: u32) {
        for _ in 0..max {
            if blink.phase() != phase {
                return;
            }
            blink.update(rig, 1.0 / 60.0);
        }
        panic!("still in {:?} after {} frames", phase, max);
    }

    #[test]
    fn test_cycle_walks_all_three_phases() {
        let mut rig = rig();
        let mut blink = BlinkCycle::new(7);
        assert_eq!(blink.phase(), BlinkPhase::Idle);

        // Idle wait is at most 6s = 360 frames.
        step_until_leaves(&mut blink, &mut rig, BlinkPhase::Idle, 400);
        assert_eq!(blink.phase(), BlinkPhase::Closing);
        assert_eq!(rig.expression(Expression::Blink), Some(1.0));

        // Closing lasts 80ms ~= 5 frames.
        step_until_leaves(&mut blink, &mut rig, BlinkPhase::Closing, 10);
        assert_eq!(blink.phase(), BlinkPhase::Opening);
        assert_eq!(rig.expression(Expression::Blink), Some(0.0));

        step_until_leaves(&mut blink, &mut rig, BlinkPhase::Opening, 10);
        assert_eq!(blink.phase(), BlinkPhase::Idle);
    }

    #[test]
    fn test_idle_wait_is_within_bounds() {
        // Drive several full cycles and confirm each idle wait lands in
        // [2s, 6s) by counting frames spent idle.
        let mut rig = rig();
        let mut blink = BlinkCycle::new(1234);

        for _ in 0..5 {
            let mut idle_frames = 0u32;
            while blink.phase() == BlinkPhase::Idle {
                blink.update(&mut rig, 1.0 / 60.0);
                idle_frames += 1;
                assert!(idle_frames <= 361, "idle wait exceeded 6s");
            }
            assert!(idle_frames >= 119, "idle wait shorter than 2s");
            step_until_leaves(&mut blink, &mut rig, BlinkPhase::Closing, 10);
            step_until_leaves(&mut blink, &mut rig, BlinkPhase::Opening, 10);
        }
    }

    #[test]
    fn test_missing_channel_still_advances() {
        let descriptor = RigDescriptor {
            id: "noblink".to_string(),
            name: "No Blink".to_string(),
            bones: vec![mimika_rig::BoneRole::Head],
            expressions: vec![Expression::Aa],
        };
        let mut rig = Rig::from_descriptor(&descriptor);
        let mut blink = BlinkCycle::new(7);

        step_until_leaves(&mut blink, &mut rig, BlinkPhase::Idle, 400);
        assert_eq!(blink.phase(), BlinkPhase::Closing);
        // The write went nowhere, but the machine moved on.
        assert_eq!(rig.expression(Expression::Blink), None);
    }

    #[test]
    fn test_same_seed_blinks_identically() {
        let mut rig_a = rig();
        let mut rig_b = rig();
        let mut blink_a = BlinkCycle::new(99);
        let mut blink_b = BlinkCycle::new(99);

        for _ in 0..2000 {
            blink_a.update(&mut rig_a, 1.0 / 60.0);
            blink_b.update(&mut rig_b, 1.0 / 60.0);
            assert_eq!(blink_a.phase(), blink_b.phase());
        }
    }

    #[test]
    fn test_reset_reopens_eyes() {
        let mut rig = rig();
        let mut blink = BlinkCycle::new(7);
        step_until_leaves(&mut blink, &mut rig, BlinkPhase::Idle, 400);
        assert_eq!(rig.expression(Expression::Blink), Some(1.0));

        blink.reset(&mut rig);
        assert_eq!(blink.phase(), BlinkPhase::Idle);
        assert_eq!(rig.expression(Expression::Blink), Some(0.0));
    }
}
