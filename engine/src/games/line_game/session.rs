use std::time::Instant;

use crate::config::Validate;
use crate::error::GameError;
use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::evaluator::Evaluator;
use super::search::choose_move;
use super::settings::{FirstPlayerMode, GameSettings};
use super::types::{GameStatus, Player, Position, WinningLine};

/// Builds a session with the default search for this board size.
pub fn new_game(board_size: usize, win_count: usize) -> Result<GameSession, GameError> {
    GameSession::new(GameSettings::for_board(board_size, win_count))
}

/// One game between a caller-driven player and the engine. X always moves
/// first; `FirstPlayerMode` decides which side the engine plays.
#[derive(Debug)]
pub struct GameSession {
    settings: GameSettings,
    board: Board,
    evaluator: Evaluator,
    rng: SessionRng,
    ai_player: Player,
    current_player: Player,
    status: GameStatus,
    last_move: Option<Position>,
    winning_line: Option<WinningLine>,
    history: Vec<(Position, Player)>,
}

impl GameSession {
    pub fn new(settings: GameSettings) -> Result<Self, GameError> {
        settings
            .validate()
            .map_err(|message| GameError::InvalidSettings { message })?;

        let mut rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        let ai_player = Self::pick_ai_player(settings.first_player, &mut rng);

        Ok(Self {
            board: Board::new(settings.board_size, settings.win_count),
            settings,
            evaluator: Evaluator::default(),
            rng,
            ai_player,
            current_player: Player::X,
            status: GameStatus::InProgress,
            last_move: None,
            winning_line: None,
            history: Vec::new(),
        })
    }

    fn pick_ai_player(mode: FirstPlayerMode, rng: &mut SessionRng) -> Player {
        match mode {
            FirstPlayerMode::Human => Player::O,
            FirstPlayerMode::Ai => Player::X,
            FirstPlayerMode::Random => {
                if rng.random_bool() {
                    Player::X
                } else {
                    Player::O
                }
            }
        }
    }

    pub fn apply_move(&mut self, pos: Position, player: Player) -> Result<GameStatus, GameError> {
        if self.status.is_over() {
            return Err(GameError::OutOfTurn {
                player,
                reason: "game is already over",
            });
        }
        if player != self.current_player {
            return Err(GameError::OutOfTurn {
                player,
                reason: "not this player's turn",
            });
        }

        self.board.place(pos, player)?;
        self.last_move = Some(pos);
        self.history.push((pos, player));

        if let Some(line) = self.board.winning_line(pos) {
            self.status = GameStatus::Won(player);
            self.winning_line = Some(line);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        } else {
            self.current_player = player.opponent();
        }

        Ok(self.status)
    }

    pub fn request_ai_move(&mut self) -> Result<(Position, GameStatus), GameError> {
        let ai = self.ai_player;
        if self.status.is_over() {
            return Err(GameError::OutOfTurn {
                player: ai,
                reason: "game is already over",
            });
        }
        if self.current_player != ai {
            return Err(GameError::OutOfTurn {
                player: ai,
                reason: "not the engine's turn",
            });
        }

        let started = Instant::now();
        let result = match choose_move(&mut self.board, ai, &self.settings.search, &self.evaluator) {
            Ok(result) => result,
            Err(err) => {
                log!(
                    "Search found no move for {} on a board with {} marks while in progress",
                    ai,
                    self.board.occupied_count()
                );
                return Err(err);
            }
        };
        let pos = result.best_move.ok_or(GameError::NoLegalMove)?;

        log!(
            "AI {} plays {} (score {}, {} nodes, {:.2?})",
            ai,
            pos,
            result.score,
            result.nodes,
            started.elapsed()
        );

        let status = self.apply_move(pos, ai)?;
        Ok((pos, status))
    }

    /// Starts over on a fresh board. With `FirstPlayerMode::Random` the sides
    /// are drawn again.
    pub fn reset(&mut self) {
        self.board = Board::new(self.settings.board_size, self.settings.win_count);
        self.ai_player = Self::pick_ai_player(self.settings.first_player, &mut self.rng);
        self.current_player = Player::X;
        self.status = GameStatus::InProgress;
        self.last_move = None;
        self.winning_line = None;
        self.history.clear();
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn ai_player(&self) -> Player {
        self.ai_player
    }

    pub fn human_player(&self) -> Player {
        self.ai_player.opponent()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.status.is_over() && self.current_player == self.ai_player
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn history(&self) -> &[(Position, Player)] {
        &self.history
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tic_tac_toe() -> GameSession {
        new_game(3, 3).unwrap()
    }

    #[test]
    fn test_new_game_defaults() {
        let session = tic_tac_toe();

        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.current_player(), Player::X);
        assert_eq!(session.human_player(), Player::X);
        assert_eq!(session.ai_player(), Player::O);
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_new_game_rejects_bad_dimensions() {
        assert!(matches!(new_game(2, 3), Err(GameError::InvalidSettings { .. })));
        assert!(matches!(new_game(15, 6).map(|s| s.status()), Ok(GameStatus::InProgress)));
        assert!(matches!(new_game(5, 6), Err(GameError::InvalidSettings { .. })));
    }

    #[test]
    fn test_apply_move_switches_turn() {
        let mut session = tic_tac_toe();

        let status = session.apply_move(Position::new(1, 1), Player::X).unwrap();

        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(session.current_player(), Player::O);
        assert!(session.is_ai_turn());
        assert_eq!(session.last_move(), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_out_of_turn_move_is_rejected() {
        let mut session = tic_tac_toe();

        let err = session.apply_move(Position::new(0, 0), Player::O).unwrap_err();

        assert!(matches!(err, GameError::OutOfTurn { player: Player::O, .. }));
        assert!(session.board().is_empty());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut session = tic_tac_toe();
        session.apply_move(Position::new(0, 0), Player::X).unwrap();
        session.apply_move(Position::new(1, 1), Player::O).unwrap();

        let occupied = session.apply_move(Position::new(1, 1), Player::X);
        let outside = session.apply_move(Position::new(0, 3), Player::X);

        assert!(matches!(occupied, Err(GameError::InvalidMove { .. })));
        assert!(matches!(outside, Err(GameError::InvalidMove { .. })));
        assert_eq!(session.current_player(), Player::X);
        assert_eq!(session.board().occupied_count(), 2);
    }

    #[test]
    fn test_win_ends_the_game() {
        let mut session = tic_tac_toe();
        for (pos, player) in [
            (Position::new(0, 0), Player::X),
            (Position::new(1, 0), Player::O),
            (Position::new(0, 1), Player::X),
            (Position::new(1, 1), Player::O),
        ] {
            session.apply_move(pos, player).unwrap();
        }

        let status = session.apply_move(Position::new(0, 2), Player::X).unwrap();

        assert_eq!(status, GameStatus::Won(Player::X));
        assert_eq!(
            session.winning_line(),
            Some(WinningLine::new(Player::X, Position::new(0, 0), Position::new(0, 2)))
        );
        assert!(matches!(
            session.apply_move(Position::new(2, 2), Player::O),
            Err(GameError::OutOfTurn { .. })
        ));
        assert!(matches!(session.request_ai_move(), Err(GameError::OutOfTurn { .. })));
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        let mut session = tic_tac_toe();
        let moves = [
            (0, 0, Player::X),
            (0, 1, Player::O),
            (0, 2, Player::X),
            (1, 1, Player::O),
            (1, 0, Player::X),
            (1, 2, Player::O),
            (2, 1, Player::X),
            (2, 0, Player::O),
        ];
        for (row, col, player) in moves {
            assert_eq!(
                session.apply_move(Position::new(row, col), player).unwrap(),
                GameStatus::InProgress
            );
        }

        let status = session.apply_move(Position::new(2, 2), Player::X).unwrap();

        assert_eq!(status, GameStatus::Draw);
        assert!(session.board().is_full());
        assert_eq!(session.winning_line(), None);
    }

    #[test]
    fn test_ai_cannot_move_on_human_turn() {
        let mut session = tic_tac_toe();

        assert!(matches!(session.request_ai_move(), Err(GameError::OutOfTurn { .. })));
    }

    #[test]
    fn test_ai_answers_center_with_corner() {
        let mut session = tic_tac_toe();
        session.apply_move(Position::new(1, 1), Player::X).unwrap();

        let (pos, status) = session.request_ai_move().unwrap();

        assert!([(0, 0), (0, 2), (2, 0), (2, 2)].contains(&(pos.row, pos.col)));
        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(session.current_player(), Player::X);
    }

    #[test]
    fn test_ai_opens_gomoku_in_the_center() {
        let settings = GameSettings {
            first_player: FirstPlayerMode::Ai,
            ..GameSettings::gomoku()
        };
        let mut session = GameSession::new(settings).unwrap();

        let (pos, _) = session.request_ai_move().unwrap();

        assert_eq!(pos, Position::new(7, 7));
        assert_eq!(session.current_player(), Player::O);
    }

    #[test]
    fn test_reset_restores_a_fresh_game() {
        let mut session = tic_tac_toe();
        session.apply_move(Position::new(0, 0), Player::X).unwrap();
        session.request_ai_move().unwrap();

        session.reset();

        assert!(session.board().is_empty());
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.current_player(), Player::X);
        assert_eq!(session.last_move(), None);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_random_first_player_follows_seed() {
        let settings = GameSettings {
            first_player: FirstPlayerMode::Random,
            seed: Some(1234),
            ..GameSettings::tic_tac_toe()
        };

        let first = GameSession::new(settings.clone()).unwrap();
        let second = GameSession::new(settings).unwrap();

        assert_eq!(first.ai_player(), second.ai_player());
        assert_eq!(first.rng_seed(), 1234);
    }
}
