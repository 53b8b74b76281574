//! A computer opponent for a small square-grid connection game in the spirit of 'Hex'
//!
//! Player `X` tries to connect the left and right edges of the board, player `O`
//! tries to connect the top and bottom edges. Stones link up with all 8 of their
//! neighbours, diagonals included. The computer picks its moves with a
//! depth-limited minimax search over the board.
//!
//! # Basic Usage
//!
//! ```
//! use hex_ai::{choose_best_move, Board, Move, Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::from_layout(
//!     "O...
//!      O...
//!      O...
//!      ....",
//! )?;
//!
//! let best_move = choose_best_move(&mut board);
//! assert_eq!(best_move, Some(Move::new(3, 0)));
//!
//! assert!(board.apply_move(3, 0, Player::B));
//! assert!(board.has_connected_path(Player::B));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod search;


pub use board::{Board, Cell, GameState, Move, Player};
pub use search::{choose_best_move, Searcher};

/// The side length of a board when none is given
pub const DEFAULT_SIZE: usize = 4;

/// The largest side length a board may have
pub const MAX_SIZE: usize = 8;

/// The number of plies searched below each candidate move
pub const SEARCH_DEPTH: u32 = 3;

/// The score of a position won by the searching side
pub const WIN_SCORE: i32 = 100;

const_assert!(DEFAULT_SIZE >= 1 && DEFAULT_SIZE <= MAX_SIZE);
const_assert!(SEARCH_DEPTH > 0);

/// Creates an empty board with sides of `size` cells
///
/// Fails for a size of 0 or anything above [`MAX_SIZE`].
pub fn new_game(size: usize) -> anyhow::Result<Board> {
    Board::new(size)
}
