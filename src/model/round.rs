use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::model::course::{CourseId, CourseTemplate};
use crate::model::hole::{HoleRecord, Tees};

/// A round at one course: its holes, timing, and the scoring cursor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundAggregate {
    pub round_id: Uuid,
    pub course_id: CourseId,
    pub tees: Tees,
    pub date: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub holes_played: usize,
    pub is_complete: bool,
    holes: Vec<HoleRecord>,
    #[serde(skip)]
    current_hole_index: usize,
}

impl RoundAggregate {
    /// Starts a round by copying the course's holes with scoring reset.
    #[must_use]
    pub fn start(course: &CourseTemplate, tees: Tees) -> Self {
        let holes = course.holes.iter().map(HoleRecord::from_template).collect();
        Self::with_holes(course.id, tees, holes)
    }

    /// Holes are put in play order; a repeated hole number keeps its first occurrence.
    #[must_use]
    pub fn with_holes(course_id: CourseId, tees: Tees, mut holes: Vec<HoleRecord>) -> Self {
        order_holes(&mut holes);
        let now = Utc::now();
        Self {
            round_id: Uuid::new_v4(),
            course_id,
            tees,
            date: now,
            start_time: now,
            end_time: None,
            holes_played: 0,
            is_complete: false,
            holes,
            current_hole_index: 0,
        }
    }

    /// Rebuilds a persisted round. Holes are re-sorted and the cursor starts at the first hole.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        round_id: Uuid,
        course_id: CourseId,
        tees: Tees,
        date: DateTime<Utc>,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
        holes_played: usize,
        is_complete: bool,
        mut holes: Vec<HoleRecord>,
    ) -> Self {
        order_holes(&mut holes);
        Self {
            round_id,
            course_id,
            tees,
            date,
            start_time,
            end_time,
            holes_played,
            is_complete,
            holes,
            current_hole_index: 0,
        }
    }

    /// Holes in play order.
    #[must_use]
    pub fn holes(&self) -> &[HoleRecord] {
        &self.holes
    }

    #[must_use]
    pub fn hole_mut(&mut self, index: usize) -> Option<&mut HoleRecord> {
        self.holes.get_mut(index)
    }

    #[must_use]
    pub fn hole_by_number(&self, hole_number: u8) -> Option<&HoleRecord> {
        self.holes.iter().find(|h| h.hole_number() == hole_number)
    }

    // --- navigation ---

    #[must_use]
    pub fn current_hole_index(&self) -> usize {
        self.current_hole_index
    }

    #[must_use]
    pub fn current_hole(&self) -> Option<&HoleRecord> {
        self.holes.get(self.current_hole_index)
    }

    #[must_use]
    pub fn current_hole_mut(&mut self) -> Option<&mut HoleRecord> {
        self.holes.get_mut(self.current_hole_index)
    }

    #[must_use]
    pub fn is_first_hole(&self) -> bool {
        self.current_hole_index == 0
    }

    /// True on the last hole, and for a round with no holes.
    #[must_use]
    pub fn is_last_hole(&self) -> bool {
        self.current_hole_index + 1 >= self.holes.len()
    }

    /// Advances the cursor unless already on the last hole.
    ///
    /// `holes_played` follows the furthest index reached and never decreases.
    pub fn move_to_next_hole(&mut self) {
        if self.is_last_hole() {
            return;
        }
        self.current_hole_index += 1;
        if self.current_hole_index > self.holes_played {
            self.holes_played = self.current_hole_index;
        }
    }

    pub fn move_to_previous_hole(&mut self) {
        if !self.is_first_hole() {
            self.current_hole_index -= 1;
        }
    }

    /// Jumps to `index`, clamped into the hole range. Does not touch `holes_played`.
    pub fn go_to_hole(&mut self, index: usize) {
        self.current_hole_index = index.min(self.holes.len().saturating_sub(1));
    }

    // --- lifecycle ---

    /// Finalizes the round. Calling it again only refreshes `end_time`.
    pub fn complete(&mut self) {
        self.end_time = Some(Utc::now());
        self.is_complete = true;
    }

    /// Leaves scoring before the last hole. The round is finalized the same way as `complete`.
    pub fn end_early(&mut self) {
        self.complete();
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.end_time.is_none()
    }

    #[must_use]
    pub fn duration(&self) -> Option<TimeDelta> {
        self.end_time.map(|end| end - self.start_time)
    }

    #[must_use]
    pub fn formatted_duration(&self) -> String {
        match self.duration() {
            Some(d) => crate::model::utils::format_round_duration(d),
            None => "In Progress".to_string(),
        }
    }

    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.date.format("%b %-d, %Y").to_string()
    }
}

fn order_holes(holes: &mut Vec<HoleRecord>) {
    // stable sort, so dedup keeps the first of each number
    holes.sort_by_key(HoleRecord::hole_number);
    let before = holes.len();
    holes.dedup_by_key(|h| h.hole_number());
    if holes.len() < before {
        warn!(dropped = before - holes.len(), "duplicate hole numbers dropped");
    }
}
