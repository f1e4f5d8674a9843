use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::Instant;

use crate::ai::eval::Evaluator;
use crate::board::BoardState;
use crate::config::EngineConfig;
use crate::game::MoveSelector;
use crate::types::{Color, Move, Position};

const MIN_SCORE: i32 = i32::MIN;
const MAX_SCORE: i32 = i32::MAX;

/// Backed-up value of a node together with the move reported for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scored {
    position: Option<Position>,
    value: i32,
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// Black is the maximizing side and White the minimizing side, matching the
/// sign of `Evaluator`. Among moves with equal backed-up value a coin flip
/// decides which one is reported; the flip never changes the value.
pub struct SearchEngine<R = StdRng> {
    evaluator: Evaluator,
    max_depth: u8,
    color: Color,
    rng: R,
    nodes: u64,
}

impl SearchEngine<StdRng> {
    /// Seeds the tie-break generator from `config.seed`, or from entropy.
    pub fn new(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SearchEngine<R> {
    pub fn with_rng(config: &EngineConfig, rng: R) -> Self {
        Self {
            evaluator: Evaluator::default(),
            max_depth: config.max_depth,
            color: config.color,
            rng,
            nodes: 0,
        }
    }

    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Nodes visited by the last call to `minimax`.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches the best move for the engine's color.
    ///
    /// The returned move carries the backed-up heuristic value. Its position
    /// is `None` only when the root itself is a leaf and has no originating
    /// move (e.g. the engine has no legal move on the initial board).
    pub fn minimax(&mut self, board: &BoardState) -> Move {
        let start = Instant::now();
        self.nodes = 0;

        let best = match self.color {
            Color::Black => self.max(board, 0, MIN_SCORE, MAX_SCORE),
            Color::White => self.min(board, 0, MIN_SCORE, MAX_SCORE),
        };

        debug!(
            "{:?} searched depth {}: best {} value {} ({} nodes in {:?})",
            self.color,
            self.max_depth,
            best.position
                .map_or_else(|| "-".to_string(), |pos| pos.to_string()),
            best.value,
            self.nodes,
            start.elapsed()
        );

        Move::scored(best.position, best.value)
    }

    fn max(&mut self, board: &BoardState, depth: u8, mut alpha: i32, beta: i32) -> Scored {
        self.nodes += 1;
        let Some(children) = self.expand(board, depth, Color::Black) else {
            return self.leaf(board);
        };

        let mut best = Scored {
            position: None,
            value: MIN_SCORE,
        };

        for child in &children {
            let value = self.min(child, depth + 1, alpha, beta).value;
            if value > best.value {
                best = Scored {
                    position: child.last_move(),
                    value,
                };
                if best.value >= beta {
                    return best;
                }
                alpha = alpha.max(best.value);
            } else if value == best.value && self.rng.gen_bool(0.5) {
                best.position = child.last_move();
            }
        }

        best
    }

    fn min(&mut self, board: &BoardState, depth: u8, alpha: i32, mut beta: i32) -> Scored {
        self.nodes += 1;
        let Some(children) = self.expand(board, depth, Color::White) else {
            return self.leaf(board);
        };

        let mut best = Scored {
            position: None,
            value: MAX_SCORE,
        };

        for child in &children {
            let value = self.max(child, depth + 1, alpha, beta).value;
            if value < best.value {
                best = Scored {
                    position: child.last_move(),
                    value,
                };
                if best.value <= alpha {
                    return best;
                }
                beta = beta.min(best.value);
            } else if value == best.value && self.rng.gen_bool(0.5) {
                best.position = child.last_move();
            }
        }

        best
    }

    /// Children of `board` for `player`, or `None` when the node is a leaf:
    /// ply limit reached, game over, or no legal move.
    ///
    /// The root is always expanded when possible, so a limit of 0 behaves
    /// like a one-ply greedy search.
    fn expand(&self, board: &BoardState, depth: u8, player: Color) -> Option<Vec<BoardState>> {
        if depth >= self.max_depth.max(1) || board.is_terminal() {
            return None;
        }

        let children = board.children(player);
        (!children.is_empty()).then_some(children)
    }

    fn leaf(&self, board: &BoardState) -> Scored {
        Scored {
            position: board.last_move(),
            value: self.evaluator.evaluate(board),
        }
    }
}

impl<R: Rng + Send + Sync> MoveSelector for SearchEngine<R> {
    fn select_move(&mut self, board: &BoardState) -> Move {
        self.minimax(board)
    }

    fn color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::ai::eval::EvalWeights;
    use crate::board::grid_from;

    fn engine(color: Color, max_depth: u8, seed: u64) -> SearchEngine {
        SearchEngine::new(&EngineConfig {
            max_depth,
            color,
            seed: Some(seed),
        })
    }

    /// Plain minimax over the same tree, without pruning.
    /// Returns `(value, nodes)`.
    fn unpruned(board: &BoardState, depth: u8, limit: u8, player: Color) -> (i32, u64) {
        let evaluator = Evaluator::default();
        if depth >= limit || board.is_terminal() {
            return (evaluator.evaluate(board), 1);
        }
        let children = board.children(player);
        if children.is_empty() {
            return (evaluator.evaluate(board), 1);
        }

        let mut nodes = 1;
        let mut values = Vec::with_capacity(children.len());
        for child in &children {
            let (value, child_nodes) = unpruned(child, depth + 1, limit, player.opponent());
            values.push(value);
            nodes += child_nodes;
        }

        let value = match player {
            Color::Black => values.iter().max(),
            Color::White => values.iter().min(),
        };
        (*value.expect("children is non-empty"), nodes)
    }

    fn midgame_board() -> BoardState {
        let mut board = BoardState::new();
        for (row, col, player) in [
            (2, 3, Color::Black),
            (2, 2, Color::White),
            (3, 2, Color::Black),
            (2, 4, Color::White),
            (1, 5, Color::Black),
            (4, 2, Color::White),
        ] {
            assert_ne!(board.make_move(row, col, player), 0, "setup move must be legal");
        }
        board
    }

    #[test]
    fn depth_zero_is_greedy_over_root_children() {
        let board = BoardState::new();
        let mut search = engine(Color::Black, 0, 1);

        let mv = search.minimax(&board);
        let best = board
            .children(Color::Black)
            .iter()
            .map(|child| Evaluator::default().evaluate(child))
            .max();

        assert_eq!(mv.value, best);
        assert_eq!(mv.value, Some(105));
        assert!(board.legal_moves(Color::Black).contains(&mv.position.unwrap()));
    }

    #[test]
    fn custom_evaluator_scores_the_leaves() {
        let edges_only = EvalWeights {
            terminal: 0,
            mobility: 0,
            corner: 0,
            danger: 0,
            edge: 10,
            disc: 0,
        };
        let board = BoardState::from_grid(
            grid_from([
                "BW......", "........", "........", "........", "........", "........",
                "........", "........",
            ]),
            Color::White,
        );
        let mut search = engine(Color::Black, 0, 1).with_evaluator(Evaluator::new(edges_only));
        assert_eq!(search.max_depth(), 0);

        let mv = search.minimax(&board);

        // c1 is the only move and leaves black on b1 and c1.
        assert_eq!(mv.position, Some(Position::new(0, 2)));
        assert_eq!(mv.value, Some(20));
    }

    #[test]
    fn depth_zero_white_minimizes_over_root_children() {
        let mut board = BoardState::new();
        board.make_move(2, 3, Color::Black);
        let mut search = engine(Color::White, 0, 1);

        let mv = search.minimax(&board);
        let children_best = board
            .children(Color::White)
            .iter()
            .map(|child| Evaluator::default().evaluate(child))
            .min();
        assert_eq!(mv.value, children_best);

        let pos = mv.position.unwrap();
        let mut after = board;
        assert_ne!(after.make_move(pos.row as usize, pos.col as usize, Color::White), 0);
        assert_eq!(Some(Evaluator::default().evaluate(&after)), children_best);
    }

    #[test]
    fn pruning_never_changes_the_backed_up_value() {
        for board in [BoardState::new(), midgame_board()] {
            for depth in 0..=4 {
                for color in [Color::Black, Color::White] {
                    let mut search = engine(color, depth, 11);
                    let mv = search.minimax(&board);
                    let (expected, full_nodes) = unpruned(&board, 0, depth.max(1), color);

                    assert_eq!(mv.value, Some(expected), "depth {depth}, {color:?}");
                    assert!(search.nodes() <= full_nodes);
                }
            }
        }
    }

    #[test]
    fn chosen_move_is_always_legal() {
        let board = midgame_board();
        let legal = board.legal_moves(Color::Black);

        for seed in 0..8 {
            let mv = engine(Color::Black, 3, seed).minimax(&board);
            assert!(legal.contains(&mv.position.unwrap()), "seed {seed} picked {mv:?}");
        }
    }

    #[test]
    fn same_seed_reports_same_move() {
        let board = BoardState::new();

        let first = engine(Color::Black, 2, 42).minimax(&board);
        let second = engine(Color::Black, 2, 42).minimax(&board);

        assert_eq!(first, second);
    }

    #[test]
    fn equal_valued_moves_are_tie_broken_randomly() {
        // All four opening moves are symmetric and score the same.
        let board = BoardState::new();

        let picked: HashSet<_> = (0..64)
            .map(|seed| engine(Color::Black, 0, seed).minimax(&board))
            .inspect(|mv| assert_eq!(mv.value, Some(105)))
            .map(|mv| mv.position)
            .collect();

        assert!(picked.len() > 1, "tie-break never left the first move");
    }

    #[test]
    fn terminal_root_reports_its_own_move_and_evaluation() {
        let mut board = BoardState::from_grid(
            grid_from([
                "BW......", "........", "........", "........", "........", "........",
                "........", "........",
            ]),
            Color::White,
        );
        board.make_move(0, 2, Color::Black);
        assert!(board.is_terminal());

        let mut search = engine(Color::White, 4, 3);
        let mv = search.minimax(&board);

        assert_eq!(mv.position, Some(Position::new(0, 2)));
        assert_eq!(mv.value, Some(Evaluator::default().evaluate(&board)));
        assert_eq!(search.nodes(), 1);
    }

    #[test]
    fn injected_rng_is_used_for_tie_breaks() {
        let config = EngineConfig {
            max_depth: 1,
            color: Color::Black,
            seed: None,
        };
        let rng = StdRng::seed_from_u64(5);
        let mut search = SearchEngine::with_rng(&config, rng);

        let mv = search.minimax(&BoardState::new());
        let again = SearchEngine::with_rng(&config, StdRng::seed_from_u64(5))
            .minimax(&BoardState::new());

        assert_eq!(mv, again);
    }
}
