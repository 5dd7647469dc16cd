use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::aggregator::{RoundFilter, StatisticsAggregator, StatsSummary};
use crate::catalog::CourseCatalog;
use crate::model::{CourseId, RoundAggregate};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CourseBreakdown {
    pub course_id: CourseId,
    pub course_name: String,
    pub stats: StatsSummary,
}

#[must_use]
pub fn group_by_course(rounds: &[RoundAggregate]) -> Vec<(CourseId, Vec<&RoundAggregate>)> {
    let mut grouped: HashMap<CourseId, Vec<&RoundAggregate>, RandomState> = HashMap::default();
    for round in rounds {
        grouped.entry(round.course_id).or_default().push(round);
    }

    let mut sorted: Vec<(CourseId, Vec<&RoundAggregate>)> = grouped.into_iter().collect();
    sorted.sort_by_key(|(course_id, _)| *course_id);
    sorted
}

/// One stats summary per course that has rounds, ordered by course id.
#[must_use]
pub fn breakdown_by_course(
    rounds: &[RoundAggregate],
    catalog: &CourseCatalog,
) -> Vec<CourseBreakdown> {
    let aggregator = StatisticsAggregator::new(rounds);
    group_by_course(rounds)
        .into_iter()
        .map(|(course_id, _)| CourseBreakdown {
            course_id,
            course_name: catalog.course_name(course_id).to_string(),
            stats: aggregator.summary(RoundFilter::course(course_id)),
        })
        .collect()
}
