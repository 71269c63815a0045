pub mod error;
pub mod games;
pub mod models;
pub mod sampler;
pub mod stats;

pub use error::LotteryError;
pub use games::GameTable;
pub use models::{DrawRecord, FrequencyEntry, GameConfig, Suggestion};
