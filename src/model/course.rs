use serde::{Deserialize, Serialize};

use crate::model::hole::{HoleType, Tees, Yardages};

pub type CourseId = i64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HoleTemplate {
    pub hole_number: u8,
    pub par: u8,
    pub yardages: Yardages,
    #[serde(default)]
    pub hole_type: HoleType,
}

/// A course as listed in the catalog. Holes are kept sorted by number.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CourseTemplate {
    pub id: CourseId,
    pub name: String,
    pub address: String,
    pub yardages: Yardages,
    pub par: u32,
    pub holes: Vec<HoleTemplate>,
}

impl CourseTemplate {
    #[must_use]
    pub fn new(
        id: CourseId,
        name: impl Into<String>,
        address: impl Into<String>,
        yardages: Yardages,
        par: u32,
        mut holes: Vec<HoleTemplate>,
    ) -> Self {
        holes.sort_by_key(|h| h.hole_number);
        Self {
            id,
            name: name.into(),
            address: address.into(),
            yardages,
            par,
            holes,
        }
    }

    #[must_use]
    pub fn front_par(&self) -> u32 {
        self.holes.iter().take(9).map(|h| u32::from(h.par)).sum()
    }

    #[must_use]
    pub fn back_par(&self) -> u32 {
        let skip = self.holes.len().saturating_sub(9);
        self.holes.iter().skip(skip).map(|h| u32::from(h.par)).sum()
    }

    /// First hole number listed more than once, if any. Holes are sorted, so repeats are adjacent.
    #[must_use]
    pub fn repeated_hole_number(&self) -> Option<u8> {
        self.holes
            .windows(2)
            .find(|pair| pair[0].hole_number == pair[1].hole_number)
            .map(|pair| pair[0].hole_number)
    }

    /// Par summed from the holes, which may differ from the advertised `par`.
    #[must_use]
    pub fn holes_par(&self) -> u32 {
        self.holes.iter().map(|h| u32::from(h.par)).sum()
    }

    #[must_use]
    pub fn yardage(&self, tees: Tees) -> u16 {
        self.yardages.for_tees(tees)
    }
}
