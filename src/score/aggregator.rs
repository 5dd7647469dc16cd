use serde::{Deserialize, Serialize};

use crate::model::{Achievement, CourseId, DetailStat, HoleRecord, RoundAggregate, Segment, ratio};

/// Which rounds a cross-round statistic folds over.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundFilter {
    pub course_id: Option<CourseId>,
    pub completed_only: bool,
}

impl RoundFilter {
    /// Every round at one course, finished or not.
    #[must_use]
    pub fn course(course_id: CourseId) -> Self {
        Self {
            course_id: Some(course_id),
            completed_only: false,
        }
    }

    /// Completed rounds at any course.
    #[must_use]
    pub fn career() -> Self {
        Self {
            course_id: None,
            completed_only: true,
        }
    }

    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn matches(&self, round: &RoundAggregate) -> bool {
        self.course_id.is_none_or(|id| round.course_id == id)
            && (!self.completed_only || round.is_complete)
    }
}

/// Folds many rounds into averages and percentages. Every statistic is 0 when
/// no round (or no hole) qualifies.
#[derive(Clone, Copy, Debug)]
pub struct StatisticsAggregator<'a> {
    rounds: &'a [RoundAggregate],
}

impl<'a> StatisticsAggregator<'a> {
    #[must_use]
    pub fn new(rounds: &'a [RoundAggregate]) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self, filter: RoundFilter) -> impl Iterator<Item = &'a RoundAggregate> {
        self.rounds.iter().filter(move |r| filter.matches(r))
    }

    #[must_use]
    pub fn rounds_played(&self, filter: RoundFilter) -> usize {
        self.rounds(filter).count()
    }

    /// Mean of each round's total, front or back score.
    #[must_use]
    pub fn average_score(&self, filter: RoundFilter, segment: Segment) -> f64 {
        let (sum, n) = self
            .rounds(filter)
            .fold((0u64, 0usize), |(sum, n), r| {
                (sum + u64::from(r.score(segment)), n + 1)
            });
        ratio(sum as f64, n)
    }

    /// Lowest total among rounds with every hole scored.
    #[must_use]
    pub fn best_score(&self, filter: RoundFilter) -> Option<u32> {
        self.rounds(filter)
            .filter(|r| !r.holes().is_empty() && r.num_holes_scored() == r.holes().len())
            .map(RoundAggregate::total_score)
            .min()
    }

    /// Holes-weighted: the stat summed over the rounds, divided by the holes they scored.
    #[must_use]
    pub fn average_per_hole(&self, filter: RoundFilter, stat: DetailStat) -> f64 {
        let (sum, holes) = self.rounds(filter).fold((0u64, 0usize), |(sum, holes), r| {
            (
                sum + u64::from(r.stat_total(Segment::Total, stat)),
                holes + r.num_holes_scored(),
            )
        });
        ratio(sum as f64, holes)
    }

    #[must_use]
    pub fn average_per_round(&self, filter: RoundFilter, stat: DetailStat) -> f64 {
        let (sum, n) = self.rounds(filter).fold((0u64, 0usize), |(sum, n), r| {
            (sum + u64::from(r.stat_total(Segment::Total, stat)), n + 1)
        });
        ratio(sum as f64, n)
    }

    /// Mean of the per-round percentages (0-100).
    #[must_use]
    pub fn average_percentage(
        &self,
        filter: RoundFilter,
        achievement: Achievement,
        segment: Segment,
    ) -> f64 {
        let (sum, n) = self.rounds(filter).fold((0.0, 0usize), |(sum, n), r| {
            (sum + r.achievement_percentage(segment, achievement), n + 1)
        });
        ratio(sum, n)
    }

    /// The hole at `hole_number`'s position in each round's play order.
    fn holes_at(
        &self,
        filter: RoundFilter,
        hole_number: u8,
    ) -> impl Iterator<Item = &'a HoleRecord> {
        let index = usize::from(hole_number).checked_sub(1);
        self.rounds(filter)
            .filter_map(move |r| index.and_then(|i| r.holes().get(i)))
    }

    /// Mean score on one hole over the rounds where it was scored.
    #[must_use]
    pub fn hole_average_score(&self, filter: RoundFilter, hole_number: u8) -> f64 {
        let (sum, n) = self
            .holes_at(filter, hole_number)
            .filter(|h| h.is_scored())
            .fold((0u64, 0usize), |(sum, n), h| (sum + u64::from(h.score()), n + 1));
        ratio(sum as f64, n)
    }

    /// Mean of a detailed stat on one hole over the rounds where it was tracked.
    #[must_use]
    pub fn hole_average_stat(&self, filter: RoundFilter, hole_number: u8, stat: DetailStat) -> f64 {
        let (sum, n) = self
            .holes_at(filter, hole_number)
            .filter(|h| h.advanced_tracking())
            .fold((0u64, 0usize), |(sum, n), h| (sum + u64::from(h.stat(stat)), n + 1));
        ratio(sum as f64, n)
    }

    /// Share (0-100) of tracked plays of one hole where the achievement was made.
    #[must_use]
    pub fn hole_percentage(
        &self,
        filter: RoundFilter,
        hole_number: u8,
        achievement: Achievement,
    ) -> f64 {
        let (hits, n) = self
            .holes_at(filter, hole_number)
            .filter(|h| h.advanced_tracking())
            .fold((0usize, 0usize), |(hits, n), h| {
                (hits + usize::from(achievement.achieved(h)), n + 1)
            });
        ratio(hits as f64, n) * 100.0
    }

    #[must_use]
    pub fn summary(&self, filter: RoundFilter) -> StatsSummary {
        StatsSummary {
            filter,
            rounds_played: self.rounds_played(filter),
            best_score: self.best_score(filter),
            average_score: self.average_score(filter, Segment::Total),
            average_front_score: self.average_score(filter, Segment::Front),
            average_back_score: self.average_score(filter, Segment::Back),
            putts_per_hole: self.average_per_hole(filter, DetailStat::Putts),
            sand_shots_per_hole: self.average_per_hole(filter, DetailStat::SandShots),
            penalties_per_hole: self.average_per_hole(filter, DetailStat::Penalties),
            putts_per_round: self.average_per_round(filter, DetailStat::Putts),
            gir_percentage: self.average_percentage(
                filter,
                Achievement::GreenInRegulation,
                Segment::Total,
            ),
            sand_save_percentage: self.average_percentage(
                filter,
                Achievement::SandSave,
                Segment::Total,
            ),
            up_and_down_percentage: self.average_percentage(
                filter,
                Achievement::UpAndDown,
                Segment::Total,
            ),
        }
    }

    #[must_use]
    pub fn hole_summary(&self, filter: RoundFilter, hole_number: u8) -> HoleStatsSummary {
        HoleStatsSummary {
            hole_number,
            average_score: self.hole_average_score(filter, hole_number),
            average_putts: self.hole_average_stat(filter, hole_number, DetailStat::Putts),
            average_sand_shots: self.hole_average_stat(filter, hole_number, DetailStat::SandShots),
            average_penalties: self.hole_average_stat(filter, hole_number, DetailStat::Penalties),
            gir_percentage: self.hole_percentage(
                filter,
                hole_number,
                Achievement::GreenInRegulation,
            ),
            sand_save_percentage: self.hole_percentage(filter, hole_number, Achievement::SandSave),
            up_and_down_percentage: self.hole_percentage(
                filter,
                hole_number,
                Achievement::UpAndDown,
            ),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StatsSummary {
    pub filter: RoundFilter,
    pub rounds_played: usize,
    pub best_score: Option<u32>,
    pub average_score: f64,
    pub average_front_score: f64,
    pub average_back_score: f64,
    pub putts_per_hole: f64,
    pub sand_shots_per_hole: f64,
    pub penalties_per_hole: f64,
    pub putts_per_round: f64,
    pub gir_percentage: f64,
    pub sand_save_percentage: f64,
    pub up_and_down_percentage: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HoleStatsSummary {
    pub hole_number: u8,
    pub average_score: f64,
    pub average_putts: f64,
    pub average_sand_shots: f64,
    pub average_penalties: f64,
    pub gir_percentage: f64,
    pub sand_save_percentage: f64,
    pub up_and_down_percentage: f64,
}
