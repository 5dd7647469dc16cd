pub mod course;
pub mod hole;
pub mod round;
pub mod score;
pub mod stats;
pub mod utils;

pub use course::*;
pub use hole::*;
pub use round::*;
pub use score::*;
pub use stats::*;
pub use utils::*;
