// src/constants.rs

/// Scores are always from the perspective of the side to move.
pub type Score = i32;

// --- Piece values ---
pub const PAWN_VALUE: Score = 100;
pub const KNIGHT_VALUE: Score = 300;
pub const BISHOP_VALUE: Score = 300;
pub const ROOK_VALUE: Score = 500;
pub const QUEEN_VALUE: Score = 900;
// Only biases heuristic lines against dropping the king; never a terminal condition.
pub const KING_VALUE: Score = 2000;

// Evaluation
pub const DEFAULT_MOBILITY_WEIGHT: Score = 1;

// Search
pub const SCORE_INFINITY: Score = 1_000_000;
pub const MATE_SCORE: Score = 100_000;
pub const DRAW_SCORE: Score = 0;
pub const UNRESOLVED_CAPTURE_SCORE: Score = 900_000;
pub const DEFAULT_ASPIRATION_WINDOW: Score = 10;
pub const DEFAULT_QUIESCENCE_DEPTH: u8 = 8;
pub const DEFAULT_TIME_BUDGET_MS: u64 = 1000;
pub const NODE_POLL_INTERVAL: u64 = 2048;

// Self-play
pub const DEFAULT_SELF_PLAY_PLIES: u32 = 50;
