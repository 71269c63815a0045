mod config;
mod display;
mod interactive;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::display::{
    display_extremes, display_frequencies, display_games, display_history, display_no_results,
    display_suggestions,
};
use sortefacil_core::sampler::{rng_from_seed, suggest};
use sortefacil_core::stats::{extremes, tally};
use sortefacil_core::{DrawRecord, GameConfig, GameTable};
use sortefacil_fetch::{CaixaClient, FetchConfig, fetch_history};

#[derive(Parser)]
#[command(name = "sortefacil", about = "Brazilian lottery results, frequencies and suggested bets")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logs on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the supported games
    Games,

    /// Show the latest draws
    History {
        #[arg(short, long, default_value = "megasena")]
        game: String,
    },

    /// Number frequencies over the latest draws
    Stats {
        #[arg(short, long, default_value = "megasena")]
        game: String,
    },

    /// Suggest bets from the latest draw frequencies
    Suggest {
        #[arg(short, long, default_value = "megasena")]
        game: String,

        /// Number of bets
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Seed for reproducible bets
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Draws, frequencies and a suggested bet in one go
    Dashboard {
        #[arg(short, long, default_value = "megasena")]
        game: String,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Interactive mode (REPL)
    Interactive {
        #[arg(short, long, default_value = "megasena")]
        game: String,
    },
}

pub(crate) struct App {
    pub table: GameTable,
    pub fetch: FetchConfig,
    pub client: CaixaClient,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref())?;
    let app = App {
        table: config.game_table()?,
        client: CaixaClient::new(&config.fetch).context("Cannot create the HTTP client")?,
        fetch: config.fetch,
    };

    match cli.command {
        Command::Games => {
            display_games(&app.table);
            Ok(())
        }
        Command::History { game } => cmd_history(&app, &game).await,
        Command::Stats { game } => cmd_stats(&app, &game).await,
        Command::Suggest { game, count, seed } => cmd_suggest(&app, &game, count, seed).await,
        Command::Dashboard { game, seed } => cmd_dashboard(&app, &game, seed).await,
        Command::Interactive { game } => interactive::run_interactive(&app, &game).await,
    }
}

pub(crate) async fn load_history(app: &App, game: &GameConfig) -> Vec<DrawRecord> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Loading {} results...", game.name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let records = fetch_history(&app.client, game, &app.fetch).await;

    spinner.finish_and_clear();
    records
}

async fn cmd_history(app: &App, game_id: &str) -> Result<()> {
    let game = app.table.find(game_id)?;
    let records = load_history(app, game).await;
    if records.is_empty() {
        display_no_results(game);
        return Ok(());
    }
    let freqs = tally(&records);
    display_history(game, &records, &freqs);
    Ok(())
}

async fn cmd_stats(app: &App, game_id: &str) -> Result<()> {
    let game = app.table.find(game_id)?;
    let records = load_history(app, game).await;
    if records.is_empty() {
        display_no_results(game);
        return Ok(());
    }
    let freqs = tally(&records);
    display_frequencies(&freqs, records.len());
    if let Some(ext) = extremes(&freqs) {
        display_extremes(&ext);
    }
    Ok(())
}

async fn cmd_suggest(app: &App, game_id: &str, count: usize, seed: Option<u64>) -> Result<()> {
    if count == 0 {
        bail!("At least one bet must be requested");
    }
    let game = app.table.find(game_id)?;
    let records = load_history(app, game).await;
    if records.is_empty() {
        display_no_results(game);
        return Ok(());
    }
    let freqs = tally(&records);

    let mut rng = rng_from_seed(seed);
    let suggestions = (0..count)
        .map(|_| suggest(&app.table, &game.id, &freqs, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;

    display_suggestions(&suggestions);
    Ok(())
}

async fn cmd_dashboard(app: &App, game_id: &str, seed: Option<u64>) -> Result<()> {
    let game = app.table.find(game_id)?;
    let records = load_history(app, game).await;
    if records.is_empty() {
        display_no_results(game);
        return Ok(());
    }
    println!("{} draws loaded for {}", records.len(), game.name);

    let freqs = tally(&records);
    display_history(game, &records, &freqs);
    if let Some(ext) = extremes(&freqs) {
        display_extremes(&ext);
    }

    let mut rng = rng_from_seed(seed);
    let suggestion = suggest(&app.table, &game.id, &freqs, &mut rng)?;
    display_suggestions(&[suggestion]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_suggest() {
        let cli = Cli::try_parse_from(["sortefacil", "suggest", "-g", "quina", "-c", "3", "--seed", "42"])
            .unwrap();
        match cli.command {
            Command::Suggest { game, count, seed } => {
                assert_eq!(game, "quina");
                assert_eq!(count, 3);
                assert_eq!(seed, Some(42));
            }
            _ => panic!("expected suggest"),
        }
    }

    #[test]
    fn test_cli_defaults_to_megasena() {
        let cli = Cli::try_parse_from(["sortefacil", "dashboard"]).unwrap();
        match cli.command {
            Command::Dashboard { game, seed } => {
                assert_eq!(game, "megasena");
                assert_eq!(seed, None);
            }
            _ => panic!("expected dashboard"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["sortefacil", "games", "-vv", "--config", "cfg.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["sortefacil", "import"]).is_err());
    }
}
