use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const MIN_BOARD_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 20;
pub const MIN_WIN_COUNT: usize = 3;

/// Boards with at most this many cells are searched to the end of the game.
const EXHAUSTIVE_CELL_LIMIT: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstPlayerMode {
    Human,
    Ai,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateStrategy {
    /// Every empty cell.
    AllEmpty,
    /// Empty cells within `radius` of an existing mark.
    Neighborhood { radius: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Plies below the root; `None` searches until the game ends.
    pub max_depth: Option<usize>,
    pub candidates: CandidateStrategy,
    pub pruning: bool,
}

impl SearchSettings {
    pub fn exhaustive() -> Self {
        Self {
            max_depth: None,
            candidates: CandidateStrategy::AllEmpty,
            pruning: true,
        }
    }

    pub fn bounded(max_depth: usize, radius: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            candidates: CandidateStrategy::Neighborhood { radius },
            pruning: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub board_size: usize,
    pub win_count: usize,
    pub first_player: FirstPlayerMode,
    /// Seed for `FirstPlayerMode::Random`; a fresh one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    pub search: SearchSettings,
}

impl GameSettings {
    pub fn tic_tac_toe() -> Self {
        Self {
            board_size: 3,
            win_count: 3,
            first_player: FirstPlayerMode::Human,
            seed: None,
            search: SearchSettings::exhaustive(),
        }
    }

    pub fn gomoku() -> Self {
        Self {
            board_size: 15,
            win_count: 5,
            first_player: FirstPlayerMode::Human,
            seed: None,
            search: SearchSettings::bounded(2, 1),
        }
    }

    /// Small boards are solved outright; larger ones get the bounded
    /// neighbourhood search.
    pub fn for_board(board_size: usize, win_count: usize) -> Self {
        let base = if board_size * board_size <= EXHAUSTIVE_CELL_LIMIT {
            Self::tic_tac_toe()
        } else {
            Self::gomoku()
        };
        Self {
            board_size,
            win_count,
            ..base
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::gomoku()
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(format!(
                "Board size must be between {} and {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE
            ));
        }
        if self.win_count < MIN_WIN_COUNT {
            return Err(format!("Win count must be at least {}", MIN_WIN_COUNT));
        }
        if self.win_count > self.board_size {
            return Err(format!(
                "Win count ({}) cannot exceed board size ({})",
                self.win_count, self.board_size
            ));
        }
        self.search.validate()
    }
}

impl Validate for SearchSettings {
    fn validate(&self) -> Result<(), String> {
        if self.max_depth == Some(0) {
            return Err("Search depth must be at least 1".to_string());
        }
        if let CandidateStrategy::Neighborhood { radius: 0 } = self.candidates {
            return Err("Neighbourhood radius must be at least 1".to_string());
        }
        Ok(())
    }
}
