use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::course::CourseId;
use crate::model::hole::{DetailStat, HoleRecord};
use crate::model::round::RoundAggregate;
use crate::model::utils::format_relative_score;

/// Which holes of a round a statistic covers. Front and back are positional:
/// the first and last nine holes in play order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Total,
    Front,
    Back,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    GreenInRegulation,
    SandSave,
    UpAndDown,
}

impl Achievement {
    #[must_use]
    pub fn achieved(self, hole: &HoleRecord) -> bool {
        match self {
            Self::GreenInRegulation => hole.green_in_regulation(),
            Self::SandSave => hole.sand_save(),
            Self::UpAndDown => hole.up_and_down(),
        }
    }
}

/// `num / den`, or 0 when there is nothing to divide by.
#[must_use]
pub fn ratio(num: f64, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num / den as f64 }
}

impl RoundAggregate {
    #[must_use]
    pub fn segment(&self, segment: Segment) -> &[HoleRecord] {
        let holes = self.holes();
        match segment {
            Segment::Total => holes,
            Segment::Front => &holes[..holes.len().min(9)],
            Segment::Back => &holes[holes.len().saturating_sub(9)..],
        }
    }

    fn scored(&self, segment: Segment) -> impl Iterator<Item = &HoleRecord> {
        self.segment(segment).iter().filter(|h| h.is_scored())
    }

    fn tracked(&self, segment: Segment) -> impl Iterator<Item = &HoleRecord> {
        self.segment(segment).iter().filter(|h| h.advanced_tracking())
    }

    #[must_use]
    pub fn num_holes_scored(&self) -> usize {
        self.scored(Segment::Total).count()
    }

    #[must_use]
    pub fn num_holes_tracked(&self, segment: Segment) -> usize {
        self.tracked(segment).count()
    }

    /// Strokes over the scored holes only; unscored holes are left out entirely.
    #[must_use]
    pub fn score(&self, segment: Segment) -> u32 {
        self.scored(segment).map(|h| u32::from(h.score())).sum()
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.score(Segment::Total)
    }

    #[must_use]
    pub fn front_score(&self) -> u32 {
        self.score(Segment::Front)
    }

    #[must_use]
    pub fn back_score(&self) -> u32 {
        self.score(Segment::Back)
    }

    /// Par over the scored holes, the denominator for a partial round's relative score.
    #[must_use]
    pub fn par_for_played_holes(&self, segment: Segment) -> u32 {
        self.scored(segment).map(|h| u32::from(h.par())).sum()
    }

    #[must_use]
    pub fn total_par_for_played_holes(&self) -> u32 {
        self.par_for_played_holes(Segment::Total)
    }

    #[must_use]
    pub fn front_par_for_played_holes(&self) -> u32 {
        self.par_for_played_holes(Segment::Front)
    }

    #[must_use]
    pub fn back_par_for_played_holes(&self) -> u32 {
        self.par_for_played_holes(Segment::Back)
    }

    #[must_use]
    pub fn relative_score(&self, segment: Segment) -> i64 {
        i64::from(self.score(segment)) - i64::from(self.par_for_played_holes(segment))
    }

    #[must_use]
    pub fn relative_score_label(&self, segment: Segment) -> String {
        format_relative_score(
            i64::from(self.score(segment)),
            i64::from(self.par_for_played_holes(segment)),
        )
    }

    /// Sum of a detailed stat over every hole, scored or not.
    #[must_use]
    pub fn stat_total(&self, segment: Segment, stat: DetailStat) -> u32 {
        self.segment(segment)
            .iter()
            .map(|h| u32::from(h.stat(stat)))
            .sum()
    }

    #[must_use]
    pub fn total_putts(&self) -> u32 {
        self.stat_total(Segment::Total, DetailStat::Putts)
    }

    #[must_use]
    pub fn total_sand_shots(&self) -> u32 {
        self.stat_total(Segment::Total, DetailStat::SandShots)
    }

    #[must_use]
    pub fn total_penalties(&self) -> u32 {
        self.stat_total(Segment::Total, DetailStat::Penalties)
    }

    #[must_use]
    pub fn achievement_count(&self, segment: Segment, achievement: Achievement) -> usize {
        self.segment(segment)
            .iter()
            .filter(|h| achievement.achieved(h))
            .count()
    }

    #[must_use]
    pub fn total_greens_in_regulation(&self) -> usize {
        self.achievement_count(Segment::Total, Achievement::GreenInRegulation)
    }

    #[must_use]
    pub fn total_sand_saves(&self) -> usize {
        self.achievement_count(Segment::Total, Achievement::SandSave)
    }

    #[must_use]
    pub fn total_up_and_downs(&self) -> usize {
        self.achievement_count(Segment::Total, Achievement::UpAndDown)
    }

    /// Share (0-100) of the advanced-tracked holes where the achievement was made.
    #[must_use]
    pub fn achievement_percentage(&self, segment: Segment, achievement: Achievement) -> f64 {
        let tracked = self.num_holes_tracked(segment);
        let hits = self
            .tracked(segment)
            .filter(|h| achievement.achieved(h))
            .count();
        ratio(hits as f64, tracked) * 100.0
    }

    #[must_use]
    pub fn gir_percentage(&self, segment: Segment) -> f64 {
        self.achievement_percentage(segment, Achievement::GreenInRegulation)
    }

    #[must_use]
    pub fn sand_save_percentage(&self, segment: Segment) -> f64 {
        self.achievement_percentage(segment, Achievement::SandSave)
    }

    #[must_use]
    pub fn up_and_down_percentage(&self, segment: Segment) -> f64 {
        self.achievement_percentage(segment, Achievement::UpAndDown)
    }

    #[must_use]
    pub fn average_putts_per_hole(&self, segment: Segment) -> f64 {
        ratio(
            f64::from(self.stat_total(segment, DetailStat::Putts)),
            self.num_holes_tracked(segment),
        )
    }

    #[must_use]
    pub fn segment_summary(&self, segment: Segment) -> SegmentSummary {
        SegmentSummary {
            score: self.score(segment),
            par_for_played_holes: self.par_for_played_holes(segment),
            relative_score: self.relative_score_label(segment),
            putts: self.stat_total(segment, DetailStat::Putts),
            sand_shots: self.stat_total(segment, DetailStat::SandShots),
            penalties: self.stat_total(segment, DetailStat::Penalties),
            greens_in_regulation: self.achievement_count(segment, Achievement::GreenInRegulation),
            sand_saves: self.achievement_count(segment, Achievement::SandSave),
            up_and_downs: self.achievement_count(segment, Achievement::UpAndDown),
            gir_percentage: self.gir_percentage(segment),
            sand_save_percentage: self.sand_save_percentage(segment),
            up_and_down_percentage: self.up_and_down_percentage(segment),
            average_putts_per_hole: self.average_putts_per_hole(segment),
        }
    }

    #[must_use]
    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            round_id: self.round_id,
            course_id: self.course_id,
            date: self.date,
            duration: self.formatted_duration(),
            is_complete: self.is_complete,
            holes_scored: self.num_holes_scored(),
            total: self.segment_summary(Segment::Total),
            front: self.segment_summary(Segment::Front),
            back: self.segment_summary(Segment::Back),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SegmentSummary {
    pub score: u32,
    pub par_for_played_holes: u32,
    pub relative_score: String,
    pub putts: u32,
    pub sand_shots: u32,
    pub penalties: u32,
    pub greens_in_regulation: usize,
    pub sand_saves: usize,
    pub up_and_downs: usize,
    pub gir_percentage: f64,
    pub sand_save_percentage: f64,
    pub up_and_down_percentage: f64,
    pub average_putts_per_hole: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundSummary {
    pub round_id: Uuid,
    pub course_id: CourseId,
    pub date: DateTime<Utc>,
    pub duration: String,
    pub is_complete: bool,
    pub holes_scored: usize,
    pub total: SegmentSummary,
    pub front: SegmentSummary,
    pub back: SegmentSummary,
}
