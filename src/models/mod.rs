pub mod stats;
pub mod tier;
pub mod player;
pub mod error;

pub use stats::*;
pub use tier::*;
pub use player::*;
pub use error::*;
