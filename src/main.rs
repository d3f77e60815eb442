//! # Mazecrawl Main Entry Point
//!
//! Parses CLI arguments, wires up logging, loads any existing save, and runs
//! the terminal game loop.

use clap::Parser;
use log::info;
use mazecrawl::{
    config, InputHandler, MazeSession, MazecrawlResult, MoveOutcome, PlayerInput, SaveData,
    TerminalDisplay,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Command line arguments for Mazecrawl.
#[derive(Parser, Debug)]
#[command(name = "mazecrawl")]
#[command(about = "A terminal maze-crawling game with validated procedural mazes")]
#[command(version)]
struct Args {
    /// Random seed for maze generation (defaults to wall-clock time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start a fresh run at this level, ignoring any save file
    #[arg(long)]
    level: Option<u32>,

    /// Save file path
    #[arg(long, default_value = config::DEFAULT_SAVE_FILE)]
    save_file: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> MazecrawlResult<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    info!("Starting Mazecrawl v{}", mazecrawl::VERSION);

    let seed = args.seed.unwrap_or_else(time_seed);
    let mut save = resolve_save(&args)?;

    let session = MazeSession::new(save.level, save.move_count, save.total_score, seed)?;
    run_game(session, &mut save, &args.save_file)?;

    println!("Game saved to {}. Best score: {}", args.save_file.display(), save.best_score());
    Ok(())
}

/// Seeds from the wall clock when the player did not pick a seed.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Decides what run to start: a `--level` override, a resumed save (after
/// asking), or a fresh game. The prompt happens before the terminal enters
/// raw mode.
fn resolve_save(args: &Args) -> MazecrawlResult<SaveData> {
    let existing = SaveData::load(&args.save_file)?;

    if let Some(level) = args.level {
        let mut save = existing.unwrap_or_default();
        save.level = level.max(1);
        save.move_count = 0;
        save.total_score = 0;
        return Ok(save);
    }

    match existing {
        Some(save) if save.level > 1 || save.total_score > 0 => {
            print!(
                "Found a saved game (level {}, score {}). Load it? (y/n) ",
                save.level, save.total_score
            );
            io::stdout().flush()?;
            let mut answer = String::new();
            io::stdin().lock().read_line(&mut answer)?;
            if answer.trim().eq_ignore_ascii_case("y") {
                info!("resuming saved game at level {}", save.level);
                Ok(save)
            } else {
                // Keep the score history even when starting over.
                Ok(SaveData {
                    history: save.history,
                    ..SaveData::new_run()
                })
            }
        }
        Some(save) => Ok(save),
        None => Ok(SaveData::new_run()),
    }
}

/// The synchronous game loop: render, read one input, apply it.
fn run_game(
    mut session: MazeSession,
    save: &mut SaveData,
    save_path: &PathBuf,
) -> MazecrawlResult<()> {
    let mut display = TerminalDisplay::new()?;
    let input = InputHandler::new();
    let mut message: Option<String> = None;

    loop {
        display.render(&session, save.best_score(), message.as_deref())?;
        message = None;

        match input.read_input()? {
            PlayerInput::Quit => {
                save.level = session.level();
                save.move_count = session.move_count();
                save.total_score = session.total_score();
                save.save(save_path)?;
                info!("run saved at level {}", save.level);
                break;
            }
            PlayerInput::Help => {
                message = Some("WASD or arrows to move, Q to save and quit".to_string());
            }
            PlayerInput::Move(direction) => match session.move_player(direction) {
                MoveOutcome::Moved => {}
                MoveOutcome::Blocked => {
                    display.bell()?;
                }
                MoveOutcome::Won => {
                    display.bell()?;
                    message = Some(format!(
                        "Level {} cleared! Total score: {}",
                        session.level(),
                        session.total_score()
                    ));
                    save.record_score(session.total_score());
                    session.advance_level()?;
                }
            },
        }
    }

    Ok(())
}
