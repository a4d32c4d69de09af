//! Errors reported by board, search and session operations.
//!
//! Every failure leaves the game state untouched; callers may retry.

use thiserror::Error;

use crate::games::line_game::{Player, Position};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("invalid move at {position}: {reason}")]
    InvalidMove {
        position: Position,
        reason: &'static str,
    },

    #[error("player {player} cannot move: {reason}")]
    OutOfTurn {
        player: Player,
        reason: &'static str,
    },

    #[error("no legal move available")]
    NoLegalMove,

    #[error("invalid game settings: {message}")]
    InvalidSettings { message: String },
}
