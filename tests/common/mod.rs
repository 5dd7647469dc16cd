#![allow(dead_code)]

use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use hole_out::model::{
    CourseTemplate, DetailStat, HoleRecord, HoleTemplate, HoleType, RoundAggregate, Tees,
    Yardages,
};
use hole_out::storage::{RoundStore, StorageError};
use uuid::Uuid;

pub const PARS: [u8; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 3, 5, 4, 4, 4, 3, 5, 4];

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    });
}

pub fn course(id: i64, name: &str) -> CourseTemplate {
    let holes = PARS
        .iter()
        .zip(1u8..)
        .map(|(&par, hole_number)| HoleTemplate {
            hole_number,
            par,
            yardages: Yardages::new(
                u16::from(par) * 100,
                u16::from(par) * 95,
                u16::from(par) * 85,
            ),
            hole_type: HoleType::Straight,
        })
        .collect();
    CourseTemplate::new(
        id,
        name,
        format!("{id} Fairway Road"),
        Yardages::new(7000, 6500, 5600),
        72,
        holes,
    )
}

/// `count` par-4 holes numbered from 1, none scored.
pub fn par_four_round(course_id: i64, count: u8) -> RoundAggregate {
    let holes = (1..=count).map(|n| HoleRecord::new(n, 4)).collect();
    RoundAggregate::with_holes(course_id, Tees::White, holes)
}

/// Scores the hole at `index`; `detail` is (putts, sand shots, penalties).
pub fn score_hole(
    round: &mut RoundAggregate,
    index: usize,
    score: u8,
    detail: Option<(u8, u8, u8)>,
) {
    let hole = round.hole_mut(index).expect("hole index in range");
    hole.set_score(score);
    if let Some((putts, sand, penalties)) = detail {
        hole.set_stat(DetailStat::SandShots, sand);
        hole.set_stat(DetailStat::Penalties, penalties);
        hole.set_stat(DetailStat::Putts, putts);
    }
}

/// 18 holes: every sixth hole unscored, even holes tracked in detail.
pub fn mixed_round(course_id: i64) -> RoundAggregate {
    let mut round = RoundAggregate::start(&course(course_id, "Mixed"), Tees::Blue);
    for (index, &par) in PARS.iter().enumerate() {
        if index % 6 == 5 {
            continue;
        }
        let offset = u8::try_from(index % 3).expect("small");
        let score = par + offset - 1;
        let detail = (index % 2 == 0).then(|| {
            let putts = 1 + offset % 2;
            let sand = u8::try_from(index % 4).expect("small") % 3;
            (putts, sand, u8::from(index == 8))
        });
        score_hole(&mut round, index, score, detail);
    }
    round
}

/// A store whose writes always fail, counting how often it was asked.
#[derive(Default)]
pub struct FailingStore {
    pub saves: AtomicUsize,
}

impl FailingStore {
    pub fn attempts(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoundStore for FailingStore {
    async fn save(&self, _round: &RoundAggregate) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::backend("disk full"))
    }

    async fn delete(&self, round_id: Uuid) -> Result<(), StorageError> {
        Err(StorageError::NotFound(round_id))
    }

    async fn fetch(&self, _round_id: Uuid) -> Result<Option<RoundAggregate>, StorageError> {
        Ok(None)
    }

    async fn fetch_all(&self) -> Result<Vec<RoundAggregate>, StorageError> {
        Ok(vec![])
    }
}
