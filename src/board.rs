use crate::types::{Cell, Color, Outcome, Position};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// Reversi position: an 8x8 grid plus cached piece counts and the move that
/// produced it.
///
/// The struct is `Copy`; children are produced by copying and then applying
/// one move, so a state handed out to a caller is never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardState {
    grid: Grid,
    black_count: u8,
    white_count: u8,
    last_move: Option<Position>,
    last_player: Color,
}

impl BoardState {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        grid[3][3] = Cell::White;
        grid[4][4] = Cell::White;
        grid[3][4] = Cell::Black;
        grid[4][3] = Cell::Black;

        Self {
            grid,
            black_count: 2,
            white_count: 2,
            last_move: None,
            // Black plays first.
            last_player: Color::White,
        }
    }

    /// Builds a board from raw cells. Counts are recomputed from the grid.
    pub fn from_grid(grid: Grid, last_player: Color) -> Self {
        let mut black_count = 0;
        let mut white_count = 0;
        for cell in grid.iter().flatten() {
            match cell.color() {
                Some(Color::Black) => black_count += 1,
                Some(Color::White) => white_count += 1,
                None => {}
            }
        }

        Self {
            grid,
            black_count,
            white_count,
            last_move: None,
            last_player,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.grid.get(row)?.get(col).copied()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn last_player(&self) -> Color {
        self.last_player
    }

    /// Records a pass: `player` is treated as having acted without moving.
    pub fn set_last_player(&mut self, player: Color) {
        self.last_player = player;
    }

    /// Returns true when `player` may place a disc at `(row, col)`.
    ///
    /// The square must be on the board, empty, and flank at least one run of
    /// opponent discs in one of the eight directions.
    pub fn is_valid_move(&self, row: usize, col: usize, player: Color) -> bool {
        if self.cell(row, col) != Some(Cell::Empty) {
            return false;
        }

        DIRECTIONS
            .iter()
            .any(|&dir| self.flank_len(row, col, player, dir) > 0)
    }

    /// Places one disc and flips every flanked run.
    /// Returns the flipped squares as a bit mask (bit = row * 8 + col).
    /// Returns 0 and leaves the board unchanged when the move is illegal.
    pub fn make_move(&mut self, row: usize, col: usize, player: Color) -> u64 {
        if !self.is_valid_move(row, col, player) {
            return 0;
        }

        // Rays from one square are disjoint, so measuring them up front is
        // the same as measuring each right before flipping it.
        let runs = DIRECTIONS.map(|dir| (dir, self.flank_len(row, col, player, dir)));

        self.grid[row][col] = player.cell();
        *self.count_mut(player) += 1;

        let mut flips = 0u64;
        for ((dr, dc), len) in runs {
            for step in 1..=len as i32 {
                let r = (row as i32 + dr * step) as usize;
                let c = (col as i32 + dc * step) as usize;
                self.grid[r][c] = player.cell();
                flips |= bit(r * BOARD_SIZE + c);
            }
            *self.count_mut(player) += len as u8;
            *self.count_mut(player.opponent()) -= len as u8;
        }

        self.last_move = Some(Position::new(row as u8, col as u8));
        self.last_player = player;

        flips
    }

    /// Legal squares for `player` in row-major order.
    pub fn legal_moves(&self, player: Color) -> Vec<Position> {
        let mut moves = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.is_valid_move(row, col, player) {
                    moves.push(Position::new(row as u8, col as u8));
                }
            }
        }
        moves
    }

    /// One successor state per legal move of `player`, in row-major order.
    pub fn children(&self, player: Color) -> Vec<BoardState> {
        self.legal_moves(player)
            .into_iter()
            .map(|pos| {
                let mut child = *self;
                child.make_move(pos.row as usize, pos.col as usize, player);
                child
            })
            .collect()
    }

    /// True when `player` still has discs on the board and at least one legal move.
    pub fn can_play(&self, player: Color) -> bool {
        if self.score(player) == 0 {
            return false;
        }

        (0..NUM_SQUARES)
            .any(|idx| self.is_valid_move(idx / BOARD_SIZE, idx % BOARD_SIZE, player))
    }

    /// The game ends when a color has been wiped out, the board is full, or
    /// neither side can move.
    ///
    /// A wiped-out color ends the game even while the other side could still
    /// move into empty squares.
    pub fn is_terminal(&self) -> bool {
        if self.black_count == 0 || self.white_count == 0 || self.empty_count() == 0 {
            return true;
        }

        !self.can_play(Color::Black) && !self.can_play(Color::White)
    }

    pub fn score(&self, player: Color) -> u8 {
        match player {
            Color::Black => self.black_count,
            Color::White => self.white_count,
        }
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black_count, self.white_count)
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.black_count - self.white_count
    }

    /// `None` while the game is still running.
    pub fn winner(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }

        Some(match self.black_count.cmp(&self.white_count) {
            std::cmp::Ordering::Greater => Outcome::Win(Color::Black),
            std::cmp::Ordering::Less => Outcome::Win(Color::White),
            std::cmp::Ordering::Equal => Outcome::Tie,
        })
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = self.grid[pos / BOARD_SIZE][pos % BOARD_SIZE].code();
        }
        board
    }

    /// Length of the opponent run flanked from `(row, col)` along `(dr, dc)`,
    /// or 0 when the run is empty or not closed by one of `player`'s discs.
    fn flank_len(
        &self,
        row: usize,
        col: usize,
        player: Color,
        (dr, dc): (i32, i32),
    ) -> usize {
        let mine = player.cell();
        let theirs = player.opponent().cell();

        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        let mut len = 0;

        while in_bounds(r, c) {
            let cell = self.grid[r as usize][c as usize];
            if cell == theirs {
                len += 1;
            } else if cell == mine {
                return len;
            } else {
                return 0;
            }

            r += dr;
            c += dc;
        }

        0
    }

    fn count_mut(&mut self, player: Color) -> &mut u8 {
        match player {
            Color::Black => &mut self.black_count,
            Color::White => &mut self.white_count,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

/// Builds a grid from 8 strings of `B`, `W` and `.`.
#[cfg(test)]
pub(crate) fn grid_from(rows: [&str; BOARD_SIZE]) -> Grid {
    let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    for (r, line) in rows.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            grid[r][c] = match ch {
                'B' => Cell::Black,
                'W' => Cell::White,
                _ => Cell::Empty,
            };
        }
    }
    grid
}
