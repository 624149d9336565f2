//! Facial expression channels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// The facial expression channels the runtime drives.
///
/// The five vowel channels (`aa`, `ih`, `ou`, `ee`, `oh`) are the lip-sync
/// targets; `blink` belongs to the blink cycle. A rig enables a subset of
/// these; writes to channels it does not enable are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    Aa,
    Ih,
    Ou,
    Ee,
    Oh,
    Blink,
}

impl Expression {
    /// The vowel (mouth-shape) channels, in wire order.
    pub const VOWELS: [Expression; 5] = [
        Expression::Aa,
        Expression::Ih,
        Expression::Ou,
        Expression::Ee,
        Expression::Oh,
    ];

    /// Every channel.
    pub const ALL: [Expression; 6] = [
        Expression::Aa,
        Expression::Ih,
        Expression::Ou,
        Expression::Ee,
        Expression::Oh,
        Expression::Blink,
    ];

    /// Returns the wire name for this channel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Expression::Aa => "aa",
            Expression::Ih => "ih",
            Expression::Ou => "ou",
            Expression::Ee => "ee",
            Expression::Oh => "oh",
            Expression::Blink => "blink",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Expression {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| RigError::UnknownExpression {
                name: s.to_string(),
            })
    }
}
