use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;
use uuid::Uuid;

use super::autosave::SaveQueue;
use crate::error::CoreError;
use crate::model::{DetailStat, HoleFlags, HoleRecord, RoundAggregate, ScoreDisplay};

#[derive(Debug, Clone)]
pub struct ScoringModel {
    pub round: RoundAggregate,
    pub finished: bool,
    pub last_save_error: Option<String>,
}

impl ScoringModel {
    #[must_use]
    pub fn new(round: RoundAggregate) -> Self {
        Self {
            round,
            finished: false,
            last_save_error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    SetScore(u8),
    SetStat(DetailStat, u8),
    NextHole,
    PreviousHole,
    GoToHole(usize),
    /// "Next" on every hole but the last, where it finishes the round.
    Advance,
    Finish,
    EndEarly,
}

/// Result of a final save, fed back into the model by the runtime.
#[derive(Debug, Clone)]
pub(crate) enum Outcome {
    FinalSaved,
    SaveFailed(CoreError),
}

#[derive(Debug, Clone)]
pub enum Effect {
    AutoSave,
    FinalSave,
    Emit(RoundEvent),
}

/// Changes pushed to whoever is presenting the round.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    HoleUpdated {
        index: usize,
        hole: HoleRecord,
        flags: HoleFlags,
        result: Option<ScoreDisplay>,
    },
    Moved {
        index: usize,
        hole_number: u8,
        is_first: bool,
        is_last: bool,
    },
    Saved {
        round_id: Uuid,
    },
    SaveFailed {
        round_id: Uuid,
        reason: String,
    },
    Finished {
        round_id: Uuid,
        total_score: u32,
    },
}

pub fn update(model: &mut ScoringModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::SetScore(score) => edit_current_hole(model, |h| h.set_score(score)),
        Msg::SetStat(stat, value) => edit_current_hole(model, |h| h.set_stat(stat, value)),
        Msg::NextHole => navigate(model, RoundAggregate::move_to_next_hole),
        Msg::PreviousHole => navigate(model, RoundAggregate::move_to_previous_hole),
        Msg::GoToHole(index) => navigate(model, |r| r.go_to_hole(index)),
        Msg::Advance => {
            if model.round.is_last_hole() {
                update(model, Msg::Finish)
            } else {
                update(model, Msg::NextHole)
            }
        }
        Msg::Finish => {
            model.round.complete();
            vec![Effect::FinalSave]
        }
        Msg::EndEarly => {
            model.round.end_early();
            vec![Effect::FinalSave]
        }
    }
}

pub(crate) fn settle(model: &mut ScoringModel, outcome: Outcome) -> Vec<Effect> {
    match outcome {
        Outcome::FinalSaved => {
            model.finished = true;
            model.last_save_error = None;
            vec![Effect::Emit(RoundEvent::Finished {
                round_id: model.round.round_id,
                total_score: model.round.total_score(),
            })]
        }
        Outcome::SaveFailed(e) => {
            let reason = e.to_string();
            model.last_save_error = Some(reason.clone());
            vec![Effect::Emit(RoundEvent::SaveFailed {
                round_id: model.round.round_id,
                reason,
            })]
        }
    }
}

fn edit_current_hole(
    model: &mut ScoringModel,
    edit: impl FnOnce(&mut HoleRecord) -> HoleFlags,
) -> Vec<Effect> {
    let index = model.round.current_hole_index();
    let Some(hole) = model.round.current_hole_mut() else {
        return vec![];
    };
    let flags = edit(hole);
    let result = ScoreDisplay::for_hole(hole);
    let hole = hole.clone();
    vec![
        Effect::AutoSave,
        Effect::Emit(RoundEvent::HoleUpdated {
            index,
            hole,
            flags,
            result,
        }),
    ]
}

fn navigate(model: &mut ScoringModel, step: impl FnOnce(&mut RoundAggregate)) -> Vec<Effect> {
    let before = model.round.current_hole_index();
    step(&mut model.round);
    let round = &model.round;
    let index = round.current_hole_index();
    if index == before {
        return vec![];
    }
    let Some(hole) = round.current_hole() else {
        return vec![];
    };
    vec![
        Effect::AutoSave,
        Effect::Emit(RoundEvent::Moved {
            index,
            hole_number: hole.hole_number(),
            is_first: round.is_first_hole(),
            is_last: round.is_last_hole(),
        }),
    ]
}

#[derive(Clone, Copy)]
pub(crate) struct Deps<'a> {
    pub saver: &'a SaveQueue,
    pub events: &'a UnboundedSender<RoundEvent>,
}

/// Runs one effect. Only a final save reports back.
pub(crate) async fn run_effect(
    effect: Effect,
    model: &ScoringModel,
    deps: Deps<'_>,
) -> Option<Outcome> {
    match effect {
        Effect::AutoSave => {
            deps.saver.queue(model.round.clone());
            None
        }
        Effect::FinalSave => match deps.saver.save_now(model.round.clone()).await {
            Ok(()) => Some(Outcome::FinalSaved),
            Err(e) => Some(Outcome::SaveFailed(CoreError::from(e))),
        },
        Effect::Emit(event) => {
            if deps.events.send(event).is_err() {
                trace!("round event dropped, no listener");
            }
            None
        }
    }
}
