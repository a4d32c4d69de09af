use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn player(self) -> Option<Player> {
        match self {
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
            Mark::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Mark::Empty
    }
}

impl From<Player> for Mark {
    fn from(player: Player) -> Self {
        player.mark()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Steps `distance` cells along `(d_row, d_col)`; `None` when that leaves
    /// the `size`×`size` grid.
    pub fn offset(self, d_row: isize, d_col: isize, distance: isize, size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row * distance)?;
        let col = self.col.checked_add_signed(d_col * distance)?;
        (row < size && col < size).then_some(Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// The run that ended the game, from one end cell to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub player: Player,
    pub start: Position,
    pub end: Position,
}

impl WinningLine {
    pub fn new(player: Player, start: Position, end: Position) -> Self {
        Self { player, start, end }
    }
}

/// Horizontal, vertical, diagonal-down-right, diagonal-down-left as
/// `(d_row, d_col)`.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
