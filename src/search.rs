//! An agent to pick the computer's move

use tracing::{debug, trace};

use crate::{board::*, SEARCH_DEPTH, WIN_SCORE};

/// Places `player`'s stone on `position`, runs `f` and lifts the stone again
fn with_stone<T>(
    board: &mut Board,
    position: Move,
    player: Player,
    f: impl FnOnce(&mut Board) -> T,
) -> T {
    board.place(position, player);
    let result = f(board);
    board.remove(position);
    result
}

/// An agent that chooses moves with a depth-limited minimax search
///
/// # Notes
/// The searching side is the maximizing side and its opponent the minimizing side.
/// Candidate moves are always tried in row-major order and a later move only
/// replaces an earlier one if it scores strictly better, so ties go to the
/// smallest row, then the smallest column.
///
/// # Position Scoring
/// A position where the searching side has a connected path scores [`WIN_SCORE`],
/// one where the opponent has a path scores `-WIN_SCORE` (the searching side is
/// checked first). When the search runs out of depth or empty cells, the position
/// scores the difference of the two sides' [`Board::static_evaluate`] values.
#[derive(Clone, Debug)]
pub struct Searcher {
    player: Player,
    depth: u32,

    /// The number of positions scored by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a `Searcher` playing [`Player::B`] at the default depth
    pub fn new() -> Self {
        Self::for_player(Player::B)
    }

    /// Creates a `Searcher` choosing moves for `player`
    pub fn for_player(player: Player) -> Self {
        Self {
            player,
            depth: SEARCH_DEPTH,
            node_count: 0,
        }
    }

    /// Changes the number of plies searched below each candidate move
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    fn evaluate(&self, board: &Board) -> i32 {
        board.static_evaluate(self.player) - board.static_evaluate(self.player.other())
    }

    /// Performs game tree search
    ///
    /// Returns the score of the position (see [Position Scoring])
    ///
    /// [Position Scoring]: #position-scoring
    fn minimax(&mut self, board: &mut Board, depth: u32, maximizing: bool) -> i32 {
        self.node_count += 1;

        let player = self.player;
        if board.has_connected_path(player) {
            return WIN_SCORE;
        }
        if board.has_connected_path(player.other()) {
            return -WIN_SCORE;
        }

        let empty_cells = board.list_empty_cells();
        if depth == 0 || empty_cells.is_empty() {
            return self.evaluate(board);
        }

        if maximizing {
            let mut best = i32::MIN;
            for position in empty_cells {
                let score = with_stone(board, position, player, |board| {
                    self.minimax(board, depth - 1, false)
                });
                best = best.max(score);
            }
            best
        } else {
            let mut best = i32::MAX;
            for position in empty_cells {
                let score = with_stone(board, position, player.other(), |board| {
                    self.minimax(board, depth - 1, true)
                });
                best = best.min(score);
            }
            best
        }
    }

    /// Finds the first empty cell, in row-major order, that connects the searching side
    fn immediate_win(&self, board: &mut Board) -> Option<Move> {
        let player = self.player;
        board.list_empty_cells().into_iter().find(|&position| {
            with_stone(board, position, player, |board| {
                board.has_connected_path(player)
            })
        })
    }

    /// Searches the board for the best move of the searching side
    ///
    /// Returns the score of the chosen move and the move itself, or `None` if the
    /// board is full. The board is left exactly as it was passed in.
    pub fn search(&mut self, board: &mut Board) -> Option<(i32, Move)> {
        let snapshot = if cfg!(debug_assertions) {
            Some(board.clone())
        } else {
            None
        };

        let result = self.top_level_search(board);

        if let Some(snapshot) = snapshot {
            debug_assert_eq!(*board, snapshot, "search left trial stones on the board");
        }
        result
    }

    fn top_level_search(&mut self, board: &mut Board) -> Option<(i32, Move)> {
        if let Some(position) = self.immediate_win(board) {
            debug!(player = %self.player, %position, "found an immediate win");
            return Some((WIN_SCORE, position));
        }

        let player = self.player;
        let depth = self.depth;
        let mut best: Option<(i32, Move)> = None;
        for position in board.list_empty_cells() {
            // the opponent replies next
            let score = with_stone(board, position, player, |board| {
                self.minimax(board, depth, false)
            });
            trace!(%position, score, "scored candidate move");
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, position));
            }
        }

        match best {
            Some((score, position)) => debug!(
                player = %player,
                %position,
                score,
                nodes = self.node_count,
                "chose move"
            ),
            None => debug!(player = %player, "no move available, the board is full"),
        }
        best
    }

    /// Picks the move to play, or `None` if the board is full
    pub fn choose_best_move(&mut self, board: &mut Board) -> Option<Move> {
        self.search(board).map(|(_, position)| position)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the move for [`Player::B`] at the default search depth
///
/// Returns `None` if the board is full, which the caller should treat as a draw.
pub fn choose_best_move(board: &mut Board) -> Option<Move> {
    Searcher::new().choose_best_move(board)
}
