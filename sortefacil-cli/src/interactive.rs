use std::io::{self, Write};

use anyhow::{Context, Result};
use sortefacil_core::FrequencyEntry;
use sortefacil_core::sampler::{rng_from_seed, suggest};
use sortefacil_core::stats::{extremes, tally};

use crate::App;
use crate::display::{
    display_extremes, display_games, display_history, display_no_results, display_suggestion,
};

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Game,
    Results,
    Suggest,
    Games,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "game" | "g" => Some(InteractiveCommand::Game),
        "2" | "results" | "load" | "r" => Some(InteractiveCommand::Results),
        "3" | "suggest" | "s" => Some(InteractiveCommand::Suggest),
        "4" | "games" | "list" | "ls" => Some(InteractiveCommand::Games),
        "5" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn display_menu(game_name: &str) {
    println!();
    println!("── Interactive mode ({game_name}) ──");
    println!("  1. game      Choose a game");
    println!("  2. results   Load the latest draws");
    println!("  3. suggest   New suggested bet");
    println!("  4. games     List games");
    println!("  5. quit      Quit");
    println!();
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin().read_line(&mut input).context("Read error")?;
    if read == 0 {
        anyhow::bail!("end of input");
    }
    Ok(input.trim().to_string())
}

/// Session state: the selected game and the frequencies of its last load.
struct Session {
    game_id: String,
    freqs: Vec<FrequencyEntry>,
}

impl Session {
    fn select(&mut self, app: &App, game_id: &str) -> Result<()> {
        let game = app.table.find(game_id)?;
        self.game_id = game.id.clone();
        self.freqs.clear();
        println!("Selected game: {}", game.name);
        Ok(())
    }

    async fn load(&mut self, app: &App) -> Result<()> {
        let game = app.table.find(&self.game_id)?;
        let records = crate::load_history(app, game).await;
        if records.is_empty() {
            display_no_results(game);
            return Ok(());
        }
        println!("{} draws loaded for {}", records.len(), game.name);

        self.freqs = tally(&records);
        display_history(game, &records, &self.freqs);
        if let Some(ext) = extremes(&self.freqs) {
            display_extremes(&ext);
        }
        self.suggest(app)
    }

    fn suggest(&self, app: &App) -> Result<()> {
        if self.freqs.is_empty() {
            println!("No results loaded yet. Use 'results' first.");
            return Ok(());
        }
        let mut rng = rng_from_seed(None);
        let suggestion = suggest(&app.table, &self.game_id, &self.freqs, &mut rng)?;
        display_suggestion(&suggestion);
        Ok(())
    }
}

pub async fn run_interactive(app: &App, initial_game: &str) -> Result<()> {
    let mut session = Session {
        game_id: String::new(),
        freqs: Vec::new(),
    };
    session.select(app, initial_game)?;
    if let Err(e) = session.load(app).await {
        println!("Error: {e:#}");
    }

    loop {
        let game_name = app
            .table
            .find(&session.game_id)
            .map(|g| g.name.clone())
            .unwrap_or_default();
        display_menu(&game_name);

        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break, // EOF / Ctrl+D
        };

        if input.is_empty() {
            continue;
        }

        match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Good luck!");
                break;
            }
            Some(InteractiveCommand::Game) => {
                let id = match prompt("Game id (see 'games'): ") {
                    Ok(id) => id,
                    Err(_) => break,
                };
                match session.select(app, &id) {
                    Ok(()) => {
                        if let Err(e) = session.load(app).await {
                            println!("Error: {e:#}");
                        }
                    }
                    Err(e) => println!("Error: {e:#}"),
                }
            }
            Some(InteractiveCommand::Results) => {
                if let Err(e) = session.load(app).await {
                    println!("Error: {e:#}");
                }
            }
            Some(InteractiveCommand::Suggest) => {
                if let Err(e) = session.suggest(app) {
                    println!("Error: {e:#}");
                }
            }
            Some(InteractiveCommand::Games) => display_games(&app.table),
            None => {
                println!("Unknown command: '{}'. Type a number (1-5) or a command name.", input);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_by_number() {
        assert_eq!(parse_command("1"), Some(InteractiveCommand::Game));
        assert_eq!(parse_command("2"), Some(InteractiveCommand::Results));
        assert_eq!(parse_command("3"), Some(InteractiveCommand::Suggest));
        assert_eq!(parse_command("4"), Some(InteractiveCommand::Games));
        assert_eq!(parse_command("5"), Some(InteractiveCommand::Quit));
    }

    #[test]
    fn test_parse_command_by_alias() {
        assert_eq!(parse_command("g"), Some(InteractiveCommand::Game));
        assert_eq!(parse_command("load"), Some(InteractiveCommand::Results));
        assert_eq!(parse_command("s"), Some(InteractiveCommand::Suggest));
        assert_eq!(parse_command("ls"), Some(InteractiveCommand::Games));
        assert_eq!(parse_command("q"), Some(InteractiveCommand::Quit));
        assert_eq!(parse_command("exit"), Some(InteractiveCommand::Quit));
    }

    #[test]
    fn test_parse_command_case_insensitive() {
        assert_eq!(parse_command("QUIT"), Some(InteractiveCommand::Quit));
        assert_eq!(parse_command("Suggest"), Some(InteractiveCommand::Suggest));
        assert_eq!(parse_command("  Results "), Some(InteractiveCommand::Results));
    }

    #[test]
    fn test_parse_command_unknown() {
        assert_eq!(parse_command("foo"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("6"), None);
    }
}
