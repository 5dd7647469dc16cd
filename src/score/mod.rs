pub mod aggregator;
pub mod breakdown;

pub use aggregator::{HoleStatsSummary, RoundFilter, StatisticsAggregator, StatsSummary};
pub use breakdown::{CourseBreakdown, breakdown_by_course, group_by_course};
