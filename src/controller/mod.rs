pub mod rounds;

pub use rounds::RoundService;
