//! Mimika Animation Runtime
//!
//! This crate drives a loaded avatar rig frame by frame. Three layers write
//! into the shared bone/expression state in a fixed order each frame:
//!
//! - **Idle motion** - continuous breathing, sway, head wander and arm
//!   pendulum, built from incommensurate sinusoids so the loop never reads
//!   as repeating.
//! - **Blink cycle** - a three-phase one-shot state machine with randomized
//!   idle intervals.
//! - **Gestures** - a catalog of named one-shot body actions (wave, bow,
//!   dance, ...), at most one active at a time, each composing bone deltas
//!   onto the rest-pose snapshot and restoring it exactly on completion.
//!
//! Lip-sync runs outside this crate (it is clocked by audio playback, not
//! frame time); see `mimika-speech`.
//!
//! # Determinism
//!
//! All randomness flows through PCG32 streams derived from one base seed
//! with BLAKE3 key hashing. Two [`Animator`]s constructed with the same rig
//! and seed, stepped with the same deltas and actions, produce identical
//! bone transforms on every frame.
//!
//! # Example
//!
//! ```
//! use mimika_motion::{Animator, Gesture};
//! use mimika_rig::{Rig, RigDescriptor};
//!
//! let rig = Rig::from_descriptor(&RigDescriptor::humanoid());
//! let mut animator = Animator::new(rig, 42);
//!
//! animator.set_action(Some(Gesture::Wave));
//! for _ in 0..120 {
//!     animator.update(1.0 / 60.0);
//! }
//! ```
//!
//! # Modules
//!
//! - [`animator`] - frame scheduler owning all layers
//! - [`blink`] - blink state machine
//! - [`error`] - motion error types
//! - [`gesture`] - gesture engine and animation catalog
//! - [`idle`] - continuous idle motion layer
//! - [`rng`] - deterministic RNG with seed derivation
//! - [`shaping`] - easing/envelope/variation primitives shared by the catalog

pub mod animator;
pub mod blink;
pub mod error;
pub mod gesture;
pub mod idle;
pub mod rng;
pub mod shaping;

// Re-export main types at the crate root
pub use animator::Animator;
pub use blink::{BlinkCycle, BlinkPhase};
pub use error::{MotionError, MotionResult};
pub use gesture::{parse_action, Gesture, GestureEngine, GestureSpec};
pub use idle::IdleLayer;
