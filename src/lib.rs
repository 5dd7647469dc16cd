pub mod args;
pub mod catalog;
pub mod controller;
pub mod error;
pub mod model;
pub mod mvu;
pub mod score;
pub mod storage;

pub use catalog::CourseCatalog;
pub use controller::RoundService;
pub use error::CoreError;
pub use model::{HoleFlags, HoleRecord, RoundAggregate};
pub use mvu::ScoringSession;
pub use storage::RoundStore;
