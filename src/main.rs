// src/main.rs
use log::{info, warn};
use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::time::Instant;

use chess_core::config::EngineConfig;
use chess_core::error::CommandError;
use chess_core::search::search_within;
use chess_core::session::GameSession;
use chess_core::state::GameState;
use chess_core::types::Color;

// --- Input Parsing ---

#[derive(Debug)]
enum Command {
    Help,
    Moves,
    Fen,
    History,
    Save(String),
    Quit,
}

#[derive(Debug)]
enum UserInput {
    Move(String), // Coordinate or castling text, resolved by the session
    Command(Command),
}

/// Splits a line into a command or move text. Unknown words that cannot be a move are rejected.
fn parse_user_input(input: &str, history_file: &str) -> Result<UserInput, CommandError> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let word = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts.next().unwrap_or_default().trim();

    let command = match word.as_str() {
        "help" | "?" => Command::Help,
        "moves" => Command::Moves,
        "fen" => Command::Fen,
        "history" => Command::History,
        "save" => Command::Save(if argument.is_empty() { history_file } else { argument }.to_string()),
        "quit" | "exit" => Command::Quit,
        _ if argument.is_empty() && word.len() <= 5 => return Ok(UserInput::Move(word)),
        _ => return Err(CommandError::UnknownCommand(trimmed.to_string())),
    };
    Ok(UserInput::Command(command))
}

// --- Engine Turn ---

fn play_engine_turn(game: &mut GameSession, config: &EngineConfig) -> Result<(), CommandError> {
    println!("Engine ({:?}) is thinking...", game.turn());
    let started = Instant::now();
    match search_within(game.board(), game.turn(), config.search_config(), config.think_limit())? {
        Some(outcome) => {
            println!(
                "Engine plays {} (score {}, depth {}, {} nodes, {:.2?})",
                outcome.best_move, outcome.score, outcome.depth, outcome.nodes, started.elapsed()
            );
            game.play(outcome.best_move)?;
        }
        None => warn!("engine had no move to play in a {} position", game.state()),
    }
    Ok(())
}

fn save_history(game: &GameSession, filename: &str) {
    match game.save_history(filename) {
        Ok(()) => println!("Game history saved to '{}'.", filename),
        Err(e) => eprintln!("Error: failed to save game history: {}", e),
    }
}

fn print_game_over(game: &GameSession) {
    println!("------------------------------------------");
    println!("{}", game.board());
    match game.state() {
        GameState::Checkmate => println!("\n=== GAME OVER: {:?} wins by checkmate. ===", game.turn().opponent()),
        GameState::Stalemate => println!("\n=== GAME OVER: Draw by stalemate. ==="),
        GameState::Playing => {}
    }
}

// --- Main Game Loop ---

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match env::args().nth(1) {
        Some(path) => EngineConfig::load(&path)?,
        None => EngineConfig::default(),
    };
    info!("engine plays {:?} at {:?} strength", config.engine_color, config.strength);

    let mut game = GameSession::from_board(config.start_board()?, Color::White);

    println!("==============================");
    println!("|         Rust Chess         |");
    println!("==============================");
    print_help(&config.history_file);

    'game_loop: loop {
        if game.state().is_over() {
            print_game_over(&game);
            save_history(&game, &config.history_file);
            break 'game_loop;
        }

        println!("------------------------------------------");
        println!("{}", game.board());

        if game.turn() == config.engine_color {
            if let Err(e) = play_engine_turn(&mut game, &config) {
                eprintln!("Error: {}", e);
                break 'game_loop;
            }
            continue 'game_loop;
        }

        if game.in_check() {
            println!("{:?} is in check.", game.turn());
        }
        print!("\n{:?}'s turn. Enter move (e.g. e2e4, O-O) or command: ", game.turn());
        io::stdout().flush()?;

        let mut input_line = String::new();
        match io::stdin().read_line(&mut input_line) {
            Ok(0) => {
                println!("\nEnd of input detected. Quitting game.");
                save_history(&game, &config.history_file);
                break 'game_loop;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}. Try again or use 'quit'.", e);
                continue 'game_loop;
            }
        }
        if input_line.trim().is_empty() {
            continue 'game_loop;
        }

        match parse_user_input(&input_line, &config.history_file) {
            Ok(UserInput::Move(text)) => {
                if let Err(e) = game.play_text(&text) {
                    println!("Error making move: {}", e);
                }
            }
            Ok(UserInput::Command(command)) => match command {
                Command::Help => print_help(&config.history_file),
                Command::Moves => {
                    let moves: Vec<String> = game.legal_moves().iter().map(ToString::to_string).collect();
                    println!("{} legal moves: {}", moves.len(), moves.join(" "));
                }
                Command::Fen => println!("{}", game.board().to_fen()),
                Command::History => {
                    if game.history().is_empty() {
                        println!("No moves yet.");
                    } else {
                        print!("{}", game.history_text());
                    }
                }
                Command::Save(filename) => save_history(&game, &filename),
                Command::Quit => {
                    println!("Quit command received.");
                    save_history(&game, &config.history_file);
                    break 'game_loop;
                }
            },
            Err(e) => println!("Input Error: {}", e),
        }
    }

    println!("\nGame session finished.");
    Ok(())
}

/// Prints available commands.
fn print_help(history_file: &str) {
    println!("\nAvailable Commands:");
    println!("  <move>         Enter a move in coordinate notation (e.g., e2e4, a7a8q).");
    println!("                 Castling: O-O (kingside), O-O-O (queenside).");
    println!("                 Promotion letter (q, r, b, n) is optional and defaults to queen.");
    println!("  moves          List the legal moves for the side to move.");
    println!("  fen            Print the board placement in FEN.");
    println!("  history        Show the move history.");
    println!("  save [file]    Save the game history as JSON (default: {}).", history_file);
    println!("  help           Show this help message.");
    println!("  quit / exit    Exit the game (saves the history).");
    println!();
}
