use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LotteryError {
    #[error("unknown game: '{0}'")]
    UnknownGame(String),

    #[error("no frequencies to sample from")]
    NoFrequencies,

    #[error("invalid draw {contest} for {game}: {reason}")]
    InvalidDraw {
        game: String,
        contest: u32,
        reason: String,
    },

    #[error("invalid game table: {0}")]
    InvalidGameTable(String),
}
