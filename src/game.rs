use log::{info, warn};

use crate::ai::search::SearchEngine;
use crate::board::{BOARD_SIZE, BoardState};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::types::{Color, GameResult, GameState, Move, Position};

/// Anything that can pick a move for one side of the board.
pub trait MoveSelector: Send + Sync {
    fn select_move(&mut self, board: &BoardState) -> Move;

    /// The side this selector plays.
    fn color(&self) -> Color;
}

/// Plays the first legal square in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct FirstLegalMoveSelector {
    pub color: Color,
}

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, board: &BoardState) -> Move {
        board
            .legal_moves(self.color)
            .first()
            .map_or_else(Move::undefined, |&pos| Move::at(pos))
    }

    fn color(&self) -> Color {
        self.color
    }
}

/// A human-versus-engine game. Black moves first.
pub struct GameInstance {
    board: BoardState,
    human: Color,
    pub current_player: Color,
    pub is_game_over: bool,
    pub is_pass: bool,
    pub flipped: Vec<u8>,
    engine: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let engine_config = config.engine_config();
        engine_config.validate()?;

        info!(
            "new game: human plays {:?}, engine depth {}",
            config.human_color, engine_config.max_depth
        );
        Ok(Self::with_selector(Box::new(SearchEngine::new(
            &engine_config,
        ))))
    }

    /// The engine plays whichever color `engine` reports; the human the other.
    pub fn with_selector(engine: Box<dyn MoveSelector>) -> Self {
        Self {
            board: BoardState::new(),
            human: engine.color().opponent(),
            current_player: Color::Black,
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            engine,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn human_color(&self) -> Color {
        self.human
    }

    pub fn engine_color(&self) -> Color {
        self.human.opponent()
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_game_over && self.current_player == self.human
    }

    pub fn place(&mut self, row: u8, col: u8) -> Result<(), GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if self.current_player != self.human {
            return Err(GameError::NotYourTurn);
        }

        if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
            warn!("rejected off-board human move at row {row}, col {col}");
            return Err(GameError::IllegalMove(Position::new(row, col)));
        }

        let pos = Position::new(row, col);
        if !self.board.is_valid_move(row as usize, col as usize, self.human) {
            warn!("rejected human move {pos}");
            return Err(GameError::IllegalMove(pos));
        }

        self.apply_move(pos, self.human)
    }

    /// Human move given as letter+digit text, e.g. `"d3"`.
    pub fn place_notation(&mut self, text: &str) -> Result<(), GameError> {
        let pos: Position = text.parse()?;
        self.place(pos.row, pos.col)
    }

    /// Lets the engine move. Returns the square it played.
    pub fn do_ai_move(&mut self) -> Result<Position, GameError> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        let color = self.engine_color();
        if self.current_player != color {
            return Err(GameError::NotYourTurn);
        }

        let selected = self.engine.select_move(&self.board);
        let pos = selected.position.ok_or(GameError::EngineNoMove)?;
        if !self.board.is_valid_move(pos.row as usize, pos.col as usize, color) {
            return Err(GameError::IllegalMove(pos));
        }

        self.apply_move(pos, color)?;
        Ok(pos)
    }

    /// Legal squares for the side to move, sorted by column then row.
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_game_over {
            return Vec::new();
        }

        let mut moves = self.board.legal_moves(self.current_player);
        moves.sort_by_key(|pos| (pos.col, pos.row));
        moves
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player,
            human_color: self.human,
            black_count,
            white_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
            last_move: self.board.last_move(),
        }
    }

    pub fn to_game_result(&self) -> Result<GameResult, GameError> {
        if !self.is_game_over {
            return Err(GameError::GameNotOver);
        }
        let outcome = self.board.winner().ok_or(GameError::UnexpectedOutcome)?;

        let (black_count, white_count) = self.board.count();
        Ok(GameResult {
            outcome,
            black_count,
            white_count,
            human_score: self.board.score(self.human),
            engine_score: self.board.score(self.engine_color()),
        })
    }

    fn apply_move(&mut self, pos: Position, color: Color) -> Result<(), GameError> {
        let flips = self.board.make_move(pos.row as usize, pos.col as usize, color);
        if flips == 0 {
            return Err(GameError::IllegalMove(pos));
        }

        info!("{color:?} plays {pos}, flipping {}", flips.count_ones());
        self.flipped = bitmask_to_indices(flips);
        self.advance_turn(color);

        Ok(())
    }

    /// Hands the turn to the opponent, or back to `mover` when the opponent
    /// has no legal move.
    fn advance_turn(&mut self, mover: Color) {
        if self.board.is_terminal() {
            self.is_game_over = true;
            self.is_pass = false;
            let (black, white) = self.board.count();
            info!("game over: black {black}, white {white}");
            return;
        }

        let next = mover.opponent();
        if self.board.can_play(next) {
            self.current_player = next;
            self.is_pass = false;
        } else {
            info!("{next:?} has no legal move and passes");
            self.board.set_last_player(next);
            self.current_player = mover;
            self.is_pass = true;
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: BoardState, current_player: Color) {
        self.board = board;
        self.current_player = current_player;
        self.is_game_over = false;
        self.is_pass = false;
        self.flipped.clear();
    }
}

fn bitmask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        let idx = bits.trailing_zeros() as u8;
        debug_assert!((idx as usize) < BOARD_SIZE * BOARD_SIZE);
        out.push(idx);
        bits &= bits - 1;
    }

    out
}
