use serde::{Deserialize, Serialize};

use crate::model::hole::HoleRecord;

/// Name for a hole result relative to par.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ScoreDisplay {
    Condor,
    Albatross,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    TripleBogey,
    /// Four or more over.
    Other,
}

impl ScoreDisplay {
    #[must_use]
    pub fn from_relative(relative: i32) -> Self {
        match relative {
            i32::MIN..=-4 => Self::Condor,
            -3 => Self::Albatross,
            -2 => Self::Eagle,
            -1 => Self::Birdie,
            0 => Self::Par,
            1 => Self::Bogey,
            2 => Self::DoubleBogey,
            3 => Self::TripleBogey,
            _ => Self::Other,
        }
    }

    /// `None` for holes the player has not scored yet.
    #[must_use]
    pub fn for_hole(hole: &HoleRecord) -> Option<Self> {
        hole.is_scored()
            .then(|| Self::from_relative(hole.relative_to_par()))
    }
}

impl From<i32> for ScoreDisplay {
    fn from(value: i32) -> Self {
        Self::from_relative(value)
    }
}
