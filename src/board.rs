use anyhow::{anyhow, Result};

use std::fmt;

use crate::{DEFAULT_SIZE, MAX_SIZE};

/// The 8 neighbouring offsets of a cell, diagonals included
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// One of the two sides of the game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    /// Connects the left column to the right column, drawn as `X`
    A,
    /// Connects the top row to the bottom row, drawn as `O`
    B,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::A => 'X',
            Player::B => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    PlayerA,
    PlayerB,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerA => Some(Player::A),
            Cell::PlayerB => Some(Player::B),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::A => Cell::PlayerA,
            Player::B => Cell::PlayerB,
        }
    }
}

/// A (row, column) coordinate on the board, 0-indexed from the top left
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Player),
    Draw,
}

/// A square game board
///
/// Cells are stored row by row, top to bottom. The board only ever gains stones
/// through [`Board::apply_move`]; the search places and lifts trial stones but
/// always leaves the board as it found it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board with sides of `size` cells
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_SIZE {
            return Err(anyhow!(
                "Invalid board size {}. Sizes must be between 1 and {}",
                size,
                MAX_SIZE
            ));
        }
        Ok(Self::empty(size))
    }

    // callers check `size` against `MAX_SIZE`
    fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Parses a board from rows of text
    ///
    /// `X` or `A` is a stone of [`Player::A`], `O` or `B` a stone of [`Player::B`]
    /// and `.` an empty cell. Whitespace and blank lines are ignored, so layouts
    /// can be indented freely.
    pub fn from_layout(layout: &str) -> Result<Self> {
        let rows: Vec<String> = layout
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<String>())
            .filter(|line| !line.is_empty())
            .collect();

        let mut board = Self::new(rows.len())?;
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != board.size {
                return Err(anyhow!(
                    "Invalid layout, row {} has {} cells but the board has {} rows",
                    row + 1,
                    line.chars().count(),
                    board.size
                ));
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = match symbol.to_ascii_uppercase() {
                    'X' | 'A' => Cell::PlayerA,
                    'O' | 'B' => Cell::PlayerB,
                    '.' => Cell::Empty,
                    _ => return Err(anyhow!("could not parse '{}' as a cell", symbol)),
                };
                board.cells[row * board.size + col] = cell;
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at a coordinate, or `None` if it is off the board
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    pub fn is_legal_move(&self, row: usize, col: usize) -> bool {
        self.get(row, col).map_or(false, Cell::is_empty)
    }

    /// Places a stone for `player` if the move is legal
    ///
    /// Returns `false` and leaves the board untouched otherwise.
    pub fn apply_move(&mut self, row: usize, col: usize, player: Player) -> bool {
        if !self.is_legal_move(row, col) {
            return false;
        }
        self.cells[row * self.size + col] = player.into();
        true
    }

    /// Places a stone for `player`, explaining why the move was rejected if it is illegal
    ///
    /// Returns the state of the game after the move.
    pub fn play_checked(&mut self, row: usize, col: usize, player: Player) -> Result<GameState> {
        match self.get(row, col) {
            None => Err(anyhow!(
                "Invalid move, ({}, {}) out of range. Rows and columns must be between 1 and {}",
                row + 1,
                col + 1,
                self.size
            )),
            Some(Cell::Empty) => {
                self.apply_move(row, col, player);
                Ok(self.state())
            }
            Some(_) => Err(anyhow!("Invalid move, ({}, {}) is taken", row + 1, col + 1)),
        }
    }

    // trial placement for the search, the move must come from `list_empty_cells`
    pub(crate) fn place(&mut self, position: Move, player: Player) {
        debug_assert!(
            self.is_legal_move(position.row, position.col),
            "trial stone placed on {} which is not empty",
            position
        );
        self.cells[position.row * self.size + position.col] = player.into();
    }

    // lift a trial stone placed with `place`
    pub(crate) fn remove(&mut self, position: Move) {
        let index = position.row * self.size + position.col;
        debug_assert!(
            !self.cells[index].is_empty(),
            "no trial stone to lift at {}",
            position
        );
        self.cells[index] = Cell::Empty;
    }

    /// All empty cells in row-major order
    pub fn list_empty_cells(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| Move::new(index / self.size, index % self.size))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    fn neighbours(&self, position: Move) -> impl Iterator<Item = Move> + '_ {
        let size = self.size as isize;
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let row = position.row as isize + dr;
            let col = position.col as isize + dc;
            if row < 0 || row >= size || col < 0 || col >= size {
                None
            } else {
                Some(Move::new(row as usize, col as usize))
            }
        })
    }

    fn on_goal_edge(&self, position: Move, player: Player) -> bool {
        match player {
            Player::A => position.col == self.size - 1,
            Player::B => position.row == self.size - 1,
        }
    }

    /// Checks whether `player` has a chain of stones joining their two edges
    ///
    /// [`Player::A`] needs to get from the left column to the right column and
    /// [`Player::B`] from the top row to the bottom row. Stones are linked to all
    /// 8 neighbours.
    pub fn has_connected_path(&self, player: Player) -> bool {
        let stone = Cell::from(player);
        // fresh for every call, no state is carried between win checks
        let mut visited = vec![false; self.cells.len()];

        let sources: Vec<Move> = match player {
            Player::A => (0..self.size).map(|row| Move::new(row, 0)).collect(),
            Player::B => (0..self.size).map(|col| Move::new(0, col)).collect(),
        };
        sources.into_iter().any(|source| {
            self.cells[source.row * self.size + source.col] == stone
                && self.reaches_goal(source, player, &mut visited)
        })
    }

    // depth first search through `player`'s stones from `start`
    fn reaches_goal(&self, start: Move, player: Player, visited: &mut [bool]) -> bool {
        let stone = Cell::from(player);
        let start_index = start.row * self.size + start.col;
        if visited[start_index] {
            return false;
        }
        visited[start_index] = true;

        let mut stack = vec![start];
        while let Some(position) = stack.pop() {
            if self.on_goal_edge(position, player) {
                return true;
            }
            for next in self.neighbours(position) {
                let index = next.row * self.size + next.col;
                if !visited[index] && self.cells[index] == stone {
                    visited[index] = true;
                    stack.push(next);
                }
            }
        }
        false
    }

    /// Scores how tightly `player`'s stones are clustered
    ///
    /// Every stone counts its same-coloured neighbours, so each adjacent pair
    /// contributes 2.
    pub fn static_evaluate(&self, player: Player) -> i32 {
        let stone = Cell::from(player);
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == stone)
            .map(|(index, _)| {
                let position = Move::new(index / self.size, index % self.size);
                self.neighbours(position)
                    .filter(|next| self.cells[next.row * self.size + next.col] == stone)
                    .count() as i32
            })
            .sum()
    }

    /// The state of the game, a win for [`Player::A`] is reported before one for [`Player::B`]
    pub fn state(&self) -> GameState {
        if self.has_connected_path(Player::A) {
            GameState::Won(Player::A)
        } else if self.has_connected_path(Player::B) {
            GameState::Won(Player::B)
        } else if self.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_SIZE)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                let symbol = cell.owner().map_or('.', Player::symbol);
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
