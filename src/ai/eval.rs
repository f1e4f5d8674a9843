use once_cell::sync::Lazy;

use crate::board::{BOARD_SIZE, BoardState};
use crate::types::{Color, Outcome, Position};

const LAST: u8 = BOARD_SIZE as u8 - 1;
const HALF: u8 = BOARD_SIZE as u8 / 2;

pub const CORNERS: [Position; 4] = [
    Position::new(0, 0),
    Position::new(0, LAST),
    Position::new(LAST, 0),
    Position::new(LAST, LAST),
];

/// Non-corner squares in a corner's quadrant whose Manhattan distance to
/// that corner is at most 2. Five per corner.
pub static DANGER_SQUARES: Lazy<Vec<Position>> = Lazy::new(|| {
    let mut squares = Vec::new();
    for corner in CORNERS {
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let same_quadrant = (row < HALF) == (corner.row < HALF)
                    && (col < HALF) == (corner.col < HALF);
                let distance = row.abs_diff(corner.row) + col.abs_diff(corner.col);
                if same_quadrant && (1..=2).contains(&distance) {
                    squares.push(Position::new(row, col));
                }
            }
        }
    }
    squares
});

/// Non-corner squares on the outer ring.
pub static EDGE_SQUARES: Lazy<Vec<Position>> = Lazy::new(|| {
    let mut squares = Vec::new();
    for row in 0..BOARD_SIZE as u8 {
        for col in 0..BOARD_SIZE as u8 {
            let on_edge = row == 0 || row == LAST || col == 0 || col == LAST;
            if on_edge && !CORNERS.contains(&Position::new(row, col)) {
                squares.push(Position::new(row, col));
            }
        }
    }
    squares
});

/// Weights of the heuristic terms. Positive scores favor Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    pub terminal: i32,
    pub mobility: i32,
    pub corner: i32,
    pub danger: i32,
    pub edge: i32,
    pub disc: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            terminal: 4000,
            mobility: 2000,
            corner: 285,
            danger: -85,
            edge: 70,
            disc: 35,
        }
    }
}

/// Unweighted heuristic signals, each in signed occupancy units
/// (+1 per Black disc, -1 per White disc).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalTerms {
    /// +1 Black won, -1 White won, 0 otherwise.
    pub terminal: i32,
    /// -1 when White cannot move, +1 when Black cannot move; both may apply.
    pub mobility: i32,
    pub corners: i32,
    pub danger: i32,
    pub edges: i32,
    pub discs: i32,
}

/// Static evaluation of a position from Black's (the maximizer's) side.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    pub fn evaluate(&self, board: &BoardState) -> i32 {
        let terms = Self::terms(board);
        let w = &self.weights;

        w.terminal * terms.terminal
            + w.mobility * terms.mobility
            + w.corner * terms.corners
            + w.danger * terms.danger
            + w.edge * terms.edges
            + w.disc * terms.discs
    }

    pub fn terms(board: &BoardState) -> EvalTerms {
        let terminal = match board.winner() {
            Some(Outcome::Win(Color::Black)) => 1,
            Some(Outcome::Win(Color::White)) => -1,
            _ => 0,
        };

        let mut mobility = 0;
        if !board.can_play(Color::White) {
            mobility -= 1;
        }
        if !board.can_play(Color::Black) {
            mobility += 1;
        }

        let discs = board.grid().iter().flatten().map(|cell| cell.sign()).sum();

        EvalTerms {
            terminal,
            mobility,
            corners: occupancy(board, &CORNERS),
            danger: occupancy(board, &DANGER_SQUARES),
            edges: occupancy(board, &EDGE_SQUARES),
            discs,
        }
    }
}

/// Evaluates with the default weights.
pub fn evaluate(board: &BoardState) -> i32 {
    Evaluator::default().evaluate(board)
}

fn occupancy(board: &BoardState, squares: &[Position]) -> i32 {
    squares
        .iter()
        .map(|pos| board.grid()[pos.row as usize][pos.col as usize].sign())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::grid_from;

    #[test]
    fn danger_squares_match_hand_drawn_diagram() {
        // x = danger square, C = corner
        // C x x . . x x C
        // x x . . . . x x
        // x . . . . . . x
        // . . . . . . . .
        // . . . . . . . .
        // x . . . . . . x
        // x x . . . . x x
        // C x x . . x x C
        let expected = [
            (0, 1), (0, 2), (1, 0), (1, 1), (2, 0),
            (0, 5), (0, 6), (1, 6), (1, 7), (2, 7),
            (5, 0), (6, 0), (6, 1), (7, 1), (7, 2),
            (5, 7), (6, 6), (6, 7), (7, 5), (7, 6),
        ];

        assert_eq!(DANGER_SQUARES.len(), 20);
        for (row, col) in expected {
            assert!(
                DANGER_SQUARES.contains(&Position::new(row, col)),
                "({row}, {col}) should be a danger square"
            );
        }
        assert!(CORNERS.iter().all(|corner| !DANGER_SQUARES.contains(corner)));
    }

    #[test]
    fn edge_squares_exclude_corners() {
        assert_eq!(EDGE_SQUARES.len(), 24);
        assert!(CORNERS.iter().all(|corner| !EDGE_SQUARES.contains(corner)));
        assert!(EDGE_SQUARES.contains(&Position::new(0, 3)));
        assert!(!EDGE_SQUARES.contains(&Position::new(1, 1)));
    }

    #[test]
    fn initial_board_is_balanced() {
        let board = BoardState::new();

        assert_eq!(Evaluator::terms(&board), EvalTerms::default());
        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn black_opening_move_scores_disc_differential_only() {
        let mut board = BoardState::new();
        board.make_move(2, 3, Color::Black);

        let terms = Evaluator::terms(&board);
        assert_eq!(terms.discs, 3);
        assert_eq!(evaluate(&board), 3 * 35);
    }

    #[test]
    fn wiped_out_white_gets_terminal_and_both_mobility_terms() {
        let board = BoardState::from_grid(
            grid_from([
                "B.......", "........", "........", "........", "........", "........",
                "........", "........",
            ]),
            Color::Black,
        );

        let terms = Evaluator::terms(&board);
        assert_eq!(terms.terminal, 1);
        // Neither side can move: the two mobility signals cancel out.
        assert_eq!(terms.mobility, 0);
        assert_eq!(terms.corners, 1);
        assert_eq!(terms.danger, 0);
        assert_eq!(terms.edges, 0);
        assert_eq!(terms.discs, 1);
        assert_eq!(evaluate(&board), 4000 + 285 + 35);
    }

    #[test]
    fn occupying_danger_squares_is_penalised() {
        // White owns the X-square next to an empty corner; black can still move.
        let board = BoardState::from_grid(
            grid_from([
                "........", ".W......", "..B.....", "...BW...", "...WB...", "........",
                "........", "........",
            ]),
            Color::Black,
        );

        let terms = Evaluator::terms(&board);
        assert_eq!(terms.danger, -1);
        assert_eq!(terms.mobility, 0);
        assert_eq!(terms.discs, 0);
        assert_eq!(evaluate(&board), 85);
    }

    #[test]
    fn white_without_moves_costs_black_mobility_weight() {
        // Black can flank at c1; white has nothing to flank.
        let board = BoardState::from_grid(
            grid_from([
                "BW......", "........", "........", "........", "........", "........",
                "........", "........",
            ]),
            Color::Black,
        );
        assert!(board.can_play(Color::Black));
        assert!(!board.can_play(Color::White));

        let terms = Evaluator::terms(&board);
        assert_eq!(terms.terminal, 0);
        assert_eq!(terms.mobility, -1);
        assert_eq!(terms.corners, 1);
        // b1 is both a danger square and an edge square.
        assert_eq!(terms.danger, -1);
        assert_eq!(terms.edges, -1);
        assert_eq!(terms.discs, 0);
        assert_eq!(evaluate(&board), -2000 + 285 + 85 - 70);
    }

    #[test]
    fn black_without_moves_adds_mobility_weight() {
        let board = BoardState::from_grid(
            grid_from([
                "WB......", "........", "........", "........", "........", "........",
                "........", "........",
            ]),
            Color::White,
        );
        assert!(!board.can_play(Color::Black));
        assert!(board.can_play(Color::White));

        let terms = Evaluator::terms(&board);
        assert_eq!(terms.mobility, 1);
        assert_eq!(terms.corners, -1);
        assert_eq!(terms.danger, 1);
        assert_eq!(terms.edges, 1);
        assert_eq!(evaluate(&board), 2000 - 285 - 85 + 70);
    }

    #[test]
    fn edge_squares_are_rewarded_and_danger_edges_weighted_twice() {
        // c1 is an edge and a danger square, d1 only an edge square.
        let board = BoardState::from_grid(
            grid_from([
                "..BB....", "........", "........", "...WB...", "...BW...", "........",
                "........", "........",
            ]),
            Color::White,
        );

        let terms = Evaluator::terms(&board);
        assert_eq!(terms.mobility, 0);
        assert_eq!(terms.corners, 0);
        assert_eq!(terms.danger, 1);
        assert_eq!(terms.edges, 2);
        assert_eq!(terms.discs, 2);
        assert_eq!(evaluate(&board), -85 + 2 * 70 + 2 * 35);
    }

    #[test]
    fn custom_weights_are_applied() {
        let weights = EvalWeights {
            disc: 1,
            ..EvalWeights::default()
        };
        let evaluator = Evaluator::new(weights);
        let mut board = BoardState::new();
        board.make_move(2, 3, Color::Black);

        assert_eq!(evaluator.weights().disc, 1);
        assert_eq!(evaluator.weights().corner, 285);
        assert_eq!(evaluator.evaluate(&board), 3);
        assert_eq!(Evaluator::default().weights(), &EvalWeights::default());
    }
}
