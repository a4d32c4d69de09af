use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use line_games_engine::GameSettings;
use line_games_engine::config::Validate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Variant {
    TicTacToe,
    Gomoku,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum OpponentType {
    Random,
    Minimax,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub games: u32,
    pub variant: Variant,
    pub opponent: OpponentType,
    pub tic_tac_toe: GameSettings,
    pub gomoku: GameSettings,
}

impl RunnerConfig {
    pub fn game_settings(&self) -> &GameSettings {
        match self.variant {
            Variant::TicTacToe => &self.tic_tac_toe,
            Variant::Gomoku => &self.gomoku,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            games: 10,
            variant: Variant::TicTacToe,
            opponent: OpponentType::Random,
            tic_tac_toe: GameSettings::tic_tac_toe(),
            gomoku: GameSettings::gomoku(),
        }
    }
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.games == 0 {
            return Err("At least one game must be played".to_string());
        }
        self.tic_tac_toe
            .validate()
            .map_err(|e| format!("tic_tac_toe: {}", e))?;
        self.gomoku.validate().map_err(|e| format!("gomoku: {}", e))
    }
}
