use anyhow::{bail, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, BufRead, Write};

use hex_ai::*;

mod terminal;

/// Reads one trimmed line, failing once the input is closed
fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut buffer = String::new();
    if input.read_line(&mut buffer)? == 0 {
        bail!("input closed");
    }
    Ok(buffer.trim().to_string())
}

/// Prints `prompt` and reads one trimmed line from stdin
fn ask(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    stdout().flush()?;
    read_answer(&mut stdin().lock())
}

fn ask_yes_no(prompt: &str) -> Result<bool> {
    loop {
        match ask(prompt)?.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_board_size() -> Result<Board> {
    loop {
        let answer = ask(&format!("Board size (1-{}) [{}]: ", MAX_SIZE, DEFAULT_SIZE))?;
        if answer.is_empty() {
            return Ok(Board::default());
        }
        match answer.parse::<usize>() {
            Ok(size) => match new_game(size) {
                Ok(board) => return Ok(board),
                Err(err) => println!("{}", err),
            },
            Err(_) => println!("Invalid number: {}", answer),
        }
    }
}

/// Reads a 1-indexed `row col` pair, returning it 0-indexed
fn parse_move(input: &str) -> Option<(usize, usize)> {
    let mut parts = input.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty());
    let row = parts.next()?.parse::<usize>().ok()?;
    let col = parts.next()?.parse::<usize>().ok()?;
    if parts.next().is_some() || row == 0 || col == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("Welcome to Hex\n");
    println!("X connects the left and right edges, O connects the top and bottom edges.");
    println!("Stones connect to all 8 neighbours, diagonals included.\n");

    let mut board = ask_board_size()?;

    let ai_x = ask_yes_no("Is player X AI controlled? y/n: ")?;
    let ai_o = ask_yes_no("Is player O AI controlled? y/n: ")?;
    let mut to_move = if ask_yes_no("Does player X move first? y/n: ")? {
        Player::A
    } else {
        Player::B
    };
    info!(size = board.size(), ai_x, ai_o, first = %to_move, "starting game");

    // game loop
    loop {
        terminal::display(&board)?;

        match board.state() {
            GameState::Playing => {
                let is_ai = match to_move {
                    Player::A => ai_x,
                    Player::B => ai_o,
                };

                let (row, col) = if is_ai {
                    println!("AI is thinking...");
                    stdout().flush()?;

                    // slow down play if both players are AI
                    if ai_x && ai_o {
                        std::thread::sleep(std::time::Duration::new(1, 0));
                    }

                    let mut searcher = Searcher::for_player(to_move);
                    let (score, best_move) = match searcher.search(&mut board) {
                        Some(result) => result,
                        // a full board is reported as a draw by `state`
                        None => continue,
                    };
                    let side = searcher.player();
                    if score >= WIN_SCORE {
                        println!("Player {} sees a forced win.", side);
                    } else if score <= -WIN_SCORE {
                        println!("Player {} cannot stop player {}.", side, side.other());
                    } else {
                        println!(
                            "Player {} rates the position at {} looking {} moves ahead.",
                            side,
                            score,
                            searcher.depth() + 1
                        );
                    }
                    println!("Best move: {} {}", best_move.row + 1, best_move.col + 1);
                    (best_move.row, best_move.col)

                // human player
                } else {
                    let input = ask(&format!("Player {} move input (row col) > ", to_move))?;
                    match parse_move(&input) {
                        Some(position) => position,
                        None => {
                            println!("Invalid move: {}", input);
                            continue;
                        }
                    }
                };

                if let Err(err) = board.play_checked(row, col, to_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
                to_move = to_move.other();
            }

            // end states
            GameState::Won(player) => {
                info!(winner = %player, "game over");
                println!("Player {} wins!", player);
                break;
            }
            GameState::Draw => {
                info!("game over, draw");
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
