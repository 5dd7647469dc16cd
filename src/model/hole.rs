use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::model::course::HoleTemplate;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 15;

/// Shape of the hole as seen from the tee.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HoleType {
    #[default]
    Straight,
    DogLeft,
    DogRight,
}

impl HoleType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::DogLeft => "dog_left",
            Self::DogRight => "dog_right",
        }
    }

    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "dog_left" => Self::DogLeft,
            "dog_right" => Self::DogRight,
            _ => Self::Straight,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tees {
    Blue,
    #[default]
    White,
    Red,
}

impl Tees {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::White => "white",
            Self::Red => "red",
        }
    }

    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "blue" => Self::Blue,
            "red" => Self::Red,
            _ => Self::White,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Yardages {
    pub blues: u16,
    pub whites: u16,
    pub reds: u16,
}

impl Yardages {
    #[must_use]
    pub fn new(blues: u16, whites: u16, reds: u16) -> Self {
        Self {
            blues,
            whites,
            reds,
        }
    }

    #[must_use]
    pub fn for_tees(&self, tees: Tees) -> u16 {
        match tees {
            Tees::Blue => self.blues,
            Tees::White => self.whites,
            Tees::Red => self.reds,
        }
    }
}

/// Detailed per-hole stats that switch on advanced tracking when touched.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DetailStat {
    Putts,
    SandShots,
    Penalties,
}

/// Achievements derived from the raw inputs of a hole.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoleFlags {
    pub green_in_regulation: bool,
    pub sand_save: bool,
    pub up_and_down: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HoleRecord {
    hole_number: u8,
    par: u8,
    pub yardages: Yardages,
    pub hole_type: HoleType,
    score: u8,
    is_scored: bool,
    advanced_tracking: bool,
    num_putts: u8,
    sand_shots: u8,
    penalties: u8,
}

impl HoleRecord {
    /// A fresh, unscored hole. The score starts at par.
    #[must_use]
    pub fn new(hole_number: u8, par: u8) -> Self {
        Self {
            hole_number,
            par,
            yardages: Yardages::default(),
            hole_type: HoleType::default(),
            score: par.clamp(MIN_SCORE, MAX_SCORE),
            is_scored: false,
            advanced_tracking: false,
            num_putts: 0,
            sand_shots: 0,
            penalties: 0,
        }
    }

    #[must_use]
    pub fn from_template(template: &HoleTemplate) -> Self {
        Self {
            yardages: template.yardages,
            hole_type: template.hole_type,
            ..Self::new(template.hole_number, template.par)
        }
    }

    /// Rebuilds a hole exactly as it was persisted, bypassing the input ranges.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        hole_number: u8,
        par: u8,
        yardages: Yardages,
        hole_type: HoleType,
        score: u8,
        is_scored: bool,
        advanced_tracking: bool,
        num_putts: u8,
        sand_shots: u8,
        penalties: u8,
    ) -> Self {
        Self {
            hole_number,
            par,
            yardages,
            hole_type,
            score,
            is_scored,
            advanced_tracking,
            num_putts,
            sand_shots,
            penalties,
        }
    }

    /// Fixed once the round starts; defines play order.
    #[must_use]
    pub fn hole_number(&self) -> u8 {
        self.hole_number
    }

    #[must_use]
    pub fn par(&self) -> u8 {
        self.par
    }

    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.is_scored
    }

    #[must_use]
    pub fn advanced_tracking(&self) -> bool {
        self.advanced_tracking
    }

    #[must_use]
    pub fn num_putts(&self) -> u8 {
        self.num_putts
    }

    #[must_use]
    pub fn sand_shots(&self) -> u8 {
        self.sand_shots
    }

    #[must_use]
    pub fn penalties(&self) -> u8 {
        self.penalties
    }

    #[must_use]
    pub fn stat(&self, stat: DetailStat) -> u8 {
        match stat {
            DetailStat::Putts => self.num_putts,
            DetailStat::SandShots => self.sand_shots,
            DetailStat::Penalties => self.penalties,
        }
    }

    #[must_use]
    pub fn yardage(&self, tees: Tees) -> u16 {
        self.yardages.for_tees(tees)
    }

    #[must_use]
    pub fn relative_to_par(&self) -> i32 {
        i32::from(self.score) - i32::from(self.par)
    }

    // Reaching the green in par - 2 or fewer non-putting strokes.
    #[must_use]
    pub fn green_in_regulation(&self) -> bool {
        i16::from(self.score) - i16::from(self.num_putts) <= i16::from(self.par) - 2
    }

    #[must_use]
    pub fn sand_save(&self) -> bool {
        self.score <= self.par && (1..=2).contains(&self.sand_shots) && self.num_putts < 3
    }

    #[must_use]
    pub fn up_and_down(&self) -> bool {
        !self.green_in_regulation() && self.num_putts == 1
    }

    #[must_use]
    pub fn flags(&self) -> HoleFlags {
        HoleFlags {
            green_in_regulation: self.green_in_regulation(),
            sand_save: self.sand_save(),
            up_and_down: self.up_and_down(),
        }
    }

    /// `0..=score - sand shots - penalties - 1`, never below zero.
    #[must_use]
    pub fn putts_range(&self) -> RangeInclusive<u8> {
        0..=Self::room(self.score, self.sand_shots, self.penalties)
    }

    #[must_use]
    pub fn sand_shots_range(&self) -> RangeInclusive<u8> {
        0..=Self::room(self.score, self.num_putts, self.penalties)
    }

    #[must_use]
    pub fn penalties_range(&self) -> RangeInclusive<u8> {
        0..=Self::room(self.score, self.num_putts, self.sand_shots)
    }

    #[must_use]
    pub fn stat_range(&self, stat: DetailStat) -> RangeInclusive<u8> {
        match stat {
            DetailStat::Putts => self.putts_range(),
            DetailStat::SandShots => self.sand_shots_range(),
            DetailStat::Penalties => self.penalties_range(),
        }
    }

    fn room(score: u8, a: u8, b: u8) -> u8 {
        // one stroke is always the tee shot
        score.saturating_sub(a).saturating_sub(b).saturating_sub(1)
    }

    /// Sets the score, clamped to `MIN_SCORE..=MAX_SCORE`, and marks the hole scored.
    ///
    /// Lowering the score trims penalties, then sand shots, then putts until the
    /// detailed stats fit in the new stroke count again.
    pub fn set_score(&mut self, score: u8) -> HoleFlags {
        self.score = score.clamp(MIN_SCORE, MAX_SCORE);
        self.is_scored = true;
        self.trim_to_score();
        self.flags()
    }

    /// Sets a detailed stat, clamped to its current range, and turns on advanced tracking.
    pub fn set_stat(&mut self, stat: DetailStat, value: u8) -> HoleFlags {
        let max = *self.stat_range(stat).end();
        let value = value.min(max);
        match stat {
            DetailStat::Putts => self.num_putts = value,
            DetailStat::SandShots => self.sand_shots = value,
            DetailStat::Penalties => self.penalties = value,
        }
        self.is_scored = true;
        self.advanced_tracking = true;
        self.flags()
    }

    pub fn set_putts(&mut self, putts: u8) -> HoleFlags {
        self.set_stat(DetailStat::Putts, putts)
    }

    pub fn set_sand_shots(&mut self, sand_shots: u8) -> HoleFlags {
        self.set_stat(DetailStat::SandShots, sand_shots)
    }

    pub fn set_penalties(&mut self, penalties: u8) -> HoleFlags {
        self.set_stat(DetailStat::Penalties, penalties)
    }

    fn trim_to_score(&mut self) {
        let budget = u16::from(self.score.saturating_sub(1));
        let used =
            u16::from(self.num_putts) + u16::from(self.sand_shots) + u16::from(self.penalties);
        let mut excess = used.saturating_sub(budget);
        for stat in [&mut self.penalties, &mut self.sand_shots, &mut self.num_putts] {
            if excess == 0 {
                break;
            }
            let cut = excess.min(u16::from(*stat));
            // cut <= *stat, so it fits in u8
            let cut_u8 = u8::try_from(cut).unwrap_or(*stat);
            *stat -= cut_u8;
            excess -= cut;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_hole_defaults_to_par_and_unscored() {
        let hole = HoleRecord::new(7, 4);
        assert_eq!(hole.score(), 4);
        assert!(!hole.is_scored());
        assert!(!hole.advanced_tracking());
        assert_eq!(hole.flags(), HoleFlags::default());
    }

    #[test]
    fn ranges_depend_on_each_other() {
        let mut hole = HoleRecord::new(1, 4);
        hole.set_score(6);
        assert_eq!(hole.putts_range(), 0..=5);
        hole.set_putts(2);
        assert_eq!(hole.sand_shots_range(), 0..=3);
        hole.set_sand_shots(1);
        assert_eq!(hole.penalties_range(), 0..=2);
        assert_eq!(hole.putts_range(), 0..=4);
    }

    #[test]
    fn stats_are_clamped_to_their_range() {
        let mut hole = HoleRecord::new(1, 3);
        hole.set_score(3);
        hole.set_putts(9);
        assert_eq!(hole.num_putts(), 2);
        hole.set_sand_shots(4);
        assert_eq!(hole.sand_shots(), 0);
    }

    #[test]
    fn score_is_clamped() {
        let mut hole = HoleRecord::new(1, 4);
        hole.set_score(0);
        assert_eq!(hole.score(), MIN_SCORE);
        hole.set_score(40);
        assert_eq!(hole.score(), MAX_SCORE);
    }

    #[test]
    fn lowering_score_trims_penalties_first() {
        let mut hole = HoleRecord::new(1, 5);
        hole.set_score(8);
        hole.set_putts(2);
        hole.set_sand_shots(2);
        hole.set_penalties(2);
        hole.set_score(5);
        // budget of 4 non-tee strokes: penalties go first
        assert_eq!(hole.penalties(), 0);
        assert_eq!(hole.sand_shots(), 2);
        assert_eq!(hole.num_putts(), 2);
        hole.set_score(2);
        assert_eq!(hole.sand_shots(), 0);
        assert_eq!(hole.num_putts(), 1);
    }

    #[test]
    fn touching_a_stat_marks_scored_and_tracked() {
        let mut hole = HoleRecord::new(3, 4);
        hole.set_penalties(0);
        assert!(hole.is_scored());
        assert!(hole.advanced_tracking());
    }
}
