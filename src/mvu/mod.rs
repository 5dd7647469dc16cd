pub mod autosave;
pub mod runtime;
pub mod scoring;

pub use autosave::SaveQueue;
pub use runtime::ScoringSession;
pub use scoring::{Effect, Msg, RoundEvent, ScoringModel};
