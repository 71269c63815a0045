//! Draw history retrieval from the Caixa lottery results API.
//!
//! The fetch is best-effort: the latest draw is required to know where the
//! history starts, the preceding contests are requested concurrently and any
//! draw that fails or does not fit the game is dropped.
//!
//! # Example
//!
//! ```no_run
//! use sortefacil_core::GameTable;
//! use sortefacil_fetch::{CaixaClient, FetchConfig, fetch_history};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = FetchConfig::default();
//!     let client = CaixaClient::new(&config)?;
//!     let table = GameTable::builtin();
//!
//!     let records = fetch_history(&client, table.find("megasena")?, &config).await;
//!     println!("{} draws", records.len());
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod history;

pub use api::ApiDraw;
pub use client::{CaixaClient, FetchConfig, FetchError, HistorySource};
pub use history::{MAX_HISTORY_DEPTH, fetch_history};
