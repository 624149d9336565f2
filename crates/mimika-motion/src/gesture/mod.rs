//! Gesture engine and animation catalog.
//!
//! A gesture is a named one-shot body action. The catalog is table-driven:
//! [`Gesture::spec`] gives each name its affected bone set and duration,
//! and the [`catalog`] module maps each name to a procedural animation
//! function over `(progress, variation)`. Adding a gesture means adding a
//! row to both tables, not new control flow.

mod catalog;
mod engine;

#[cfg(test)]
mod tests_engine;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use mimika_rig::BoneRole;

use crate::error::MotionError;

pub use engine::GestureEngine;

/// The closed set of gesture names.
///
/// Wire names are camelCase (`"lookLeft"`); this is the vocabulary the chat
/// collaborator picks actions from, so parsing is the rejection boundary
/// for anything it invents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gesture {
    Jump,
    Spin,
    Wave,
    Nod,
    Bow,
    Shake,
    Laugh,
    Surprise,
    Think,
    Dance,
    Stretch,
    Tilt,
    LookLeft,
    LookRight,
    Cheer,
    Sway,
    Shrug,
    Peek,
    Sleep,
    Clap,
    Shy,
    Angry,
    Pray,
    Flex,
    Sneak,
}

/// Static per-gesture configuration: which bones it owns while active, and
/// how long one invocation runs.
#[derive(Debug, Clone, Copy)]
pub struct GestureSpec {
    /// Bones the gesture may touch; restored on completion/preemption.
    pub bones: &'static [BoneRole],
    /// Total duration of one invocation in milliseconds.
    pub duration_ms: u32,
}

use BoneRole::*;

impl Gesture {
    /// Every catalog entry.
    pub const ALL: [Gesture; 25] = [
        Gesture::Jump,
        Gesture::Spin,
        Gesture::Wave,
        Gesture::Nod,
        Gesture::Bow,
        Gesture::Shake,
        Gesture::Laugh,
        Gesture::Surprise,
        Gesture::Think,
        Gesture::Dance,
        Gesture::Stretch,
        Gesture::Tilt,
        Gesture::LookLeft,
        Gesture::LookRight,
        Gesture::Cheer,
        Gesture::Sway,
        Gesture::Shrug,
        Gesture::Peek,
        Gesture::Sleep,
        Gesture::Clap,
        Gesture::Shy,
        Gesture::Angry,
        Gesture::Pray,
        Gesture::Flex,
        Gesture::Sneak,
    ];

    /// Returns the static configuration for this gesture.
    pub fn spec(self) -> GestureSpec {
        match self {
            Gesture::Jump => GestureSpec {
                bones: &[Hips, LeftUpperLeg, RightUpperLeg],
                duration_ms: 800,
            },
            Gesture::Spin => GestureSpec {
                bones: &[Hips],
                duration_ms: 1000,
            },
            Gesture::Wave => GestureSpec {
                bones: &[RightUpperArm, RightLowerArm],
                duration_ms: 1200,
            },
            Gesture::Nod => GestureSpec {
                bones: &[Head],
                duration_ms: 800,
            },
            Gesture::Bow => GestureSpec {
                bones: &[Spine, Chest],
                duration_ms: 1000,
            },
            Gesture::Shake => GestureSpec {
                bones: &[Head],
                duration_ms: 1000,
            },
            Gesture::Laugh => GestureSpec {
                bones: &[Spine, Chest, Head],
                duration_ms: 1500,
            },
            Gesture::Surprise => GestureSpec {
                bones: &[Spine, Head, LeftUpperArm, RightUpperArm],
                duration_ms: 1000,
            },
            Gesture::Think => GestureSpec {
                bones: &[Head, RightUpperArm, RightLowerArm],
                duration_ms: 2000,
            },
            Gesture::Dance => GestureSpec {
                bones: &[Hips, Spine, LeftUpperArm, RightUpperArm],
                duration_ms: 2400,
            },
            Gesture::Stretch => GestureSpec {
                bones: &[Spine, LeftUpperArm, RightUpperArm],
                duration_ms: 2000,
            },
            Gesture::Tilt => GestureSpec {
                bones: &[Head, Neck],
                duration_ms: 1200,
            },
            Gesture::LookLeft => GestureSpec {
                bones: &[Head, Neck],
                duration_ms: 1200,
            },
            Gesture::LookRight => GestureSpec {
                bones: &[Head, Neck],
                duration_ms: 1200,
            },
            Gesture::Cheer => GestureSpec {
                bones: &[LeftUpperArm, RightUpperArm, LeftLowerArm, RightLowerArm, Spine],
                duration_ms: 1600,
            },
            Gesture::Sway => GestureSpec {
                bones: &[Hips, Spine],
                duration_ms: 2000,
            },
            Gesture::Shrug => GestureSpec {
                bones: &[LeftUpperArm, RightUpperArm, Head],
                duration_ms: 1200,
            },
            Gesture::Peek => GestureSpec {
                bones: &[Hips, Spine, Head],
                duration_ms: 1600,
            },
            Gesture::Sleep => GestureSpec {
                bones: &[Head, Neck, Spine],
                duration_ms: 2400,
            },
            Gesture::Clap => GestureSpec {
                bones: &[LeftUpperArm, RightUpperArm, LeftLowerArm, RightLowerArm],
                duration_ms: 1400,
            },
            Gesture::Shy => GestureSpec {
                bones: &[Head, Spine, LeftUpperArm, RightUpperArm],
                duration_ms: 1600,
            },
            Gesture::Angry => GestureSpec {
                bones: &[Spine, Head, LeftUpperArm, RightUpperArm],
                duration_ms: 1400,
            },
            Gesture::Pray => GestureSpec {
                bones: &[LeftUpperArm, RightUpperArm, LeftLowerArm, RightLowerArm, Spine],
                duration_ms: 1800,
            },
            Gesture::Flex => GestureSpec {
                bones: &[LeftUpperArm, RightUpperArm, LeftLowerArm, RightLowerArm, Spine],
                duration_ms: 1600,
            },
            Gesture::Sneak => GestureSpec {
                bones: &[Hips, Spine, Chest, LeftUpperLeg, RightUpperLeg],
                duration_ms: 2000,
            },
        }
    }

    /// Returns the wire name for this gesture.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Jump => "jump",
            Gesture::Spin => "spin",
            Gesture::Wave => "wave",
            Gesture::Nod => "nod",
            Gesture::Bow => "bow",
            Gesture::Shake => "shake",
            Gesture::Laugh => "laugh",
            Gesture::Surprise => "surprise",
            Gesture::Think => "think",
            Gesture::Dance => "dance",
            Gesture::Stretch => "stretch",
            Gesture::Tilt => "tilt",
            Gesture::LookLeft => "lookLeft",
            Gesture::LookRight => "lookRight",
            Gesture::Cheer => "cheer",
            Gesture::Sway => "sway",
            Gesture::Shrug => "shrug",
            Gesture::Peek => "peek",
            Gesture::Sleep => "sleep",
            Gesture::Clap => "clap",
            Gesture::Shy => "shy",
            Gesture::Angry => "angry",
            Gesture::Pray => "pray",
            Gesture::Flex => "flex",
            Gesture::Sneak => "sneak",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gesture {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gesture::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| MotionError::UnknownGesture {
                name: s.to_string(),
            })
    }
}

/// Boundary filter for action names arriving from the chat collaborator.
///
/// `None`, empty, and unknown names all resolve to "no gesture"; unknown
/// names are logged, never propagated as errors.
pub fn parse_action(action: Option<&str>) -> Option<Gesture> {
    let name = action?.trim();
    if name.is_empty() {
        return None;
    }
    match name.parse::<Gesture>() {
        Ok(gesture) => Some(gesture),
        Err(_) => {
            warn!(action = name, "dropping unrecognized action name");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_gesture_has_a_nonempty_bone_set() {
        for gesture in Gesture::ALL {
            let spec = gesture.spec();
            assert!(!spec.bones.is_empty(), "{} has no bones", gesture);
            assert!(spec.duration_ms > 0, "{} has zero duration", gesture);
        }
    }

    #[test]
    fn test_wire_names_round_trip() {
        for gesture in Gesture::ALL {
            assert_eq!(gesture.as_str().parse::<Gesture>().unwrap(), gesture);
        }
    }

    #[test]
    fn test_serde_matches_wire_names() {
        for gesture in Gesture::ALL {
            let json = serde_json::to_string(&gesture).unwrap();
            assert_eq!(json, format!("\"{}\"", gesture.as_str()));
        }
    }

    #[test]
    fn test_parse_action_boundary() {
        assert_eq!(parse_action(Some("wave")), Some(Gesture::Wave));
        assert_eq!(parse_action(Some("lookLeft")), Some(Gesture::LookLeft));
        assert_eq!(parse_action(Some("fly")), None);
        assert_eq!(parse_action(Some("")), None);
        assert_eq!(parse_action(Some("  ")), None);
        assert_eq!(parse_action(None), None);
    }
}
