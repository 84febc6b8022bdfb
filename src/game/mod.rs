// game/mod.rs

pub mod evaluation;
pub mod oracle;
pub mod search;

use std::error::Error;

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, Color, Move, Outcome, Position};
use tracing::info;

use oracle::ChessOracle;
use search::{SearchConfig, SearchResult, Searcher};

/// How the engine spends its effort on each move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Iterative deepening within the configured time budget.
    Timed,
    /// A single search to exactly this depth.
    FixedDepth(u8),
}

/// The game loop around the search: the current position, the moves played
/// so far, and the searcher choosing the engine's moves.
pub struct GameState {
    pub chess: Chess,
    pgn: String,
    searcher: Searcher,
    mode: SearchMode,
}

impl GameState {
    pub fn new(config: SearchConfig, mode: SearchMode) -> Self {
        Self::from_position(Chess::default(), config, mode)
    }

    pub fn from_fen(
        fen: &str,
        config: SearchConfig,
        mode: SearchMode,
    ) -> Result<Self, Box<dyn Error>> {
        let fen: Fen = fen.parse()?;
        let chess: Chess = fen.into_position(CastlingMode::Standard)?;
        Ok(Self::from_position(chess, config, mode))
    }

    fn from_position(chess: Chess, config: SearchConfig, mode: SearchMode) -> Self {
        Self {
            chess,
            pgn: String::new(),
            searcher: Searcher::new(config),
            mode,
        }
    }

    /// Plays a legal move and records it in SAN. Returns `false` for an
    /// illegal move, leaving the game unchanged.
    pub fn play(&mut self, m: Move) -> bool {
        if !self.chess.is_legal(m) {
            return false;
        }
        let san = SanPlus::from_move(self.chess.clone(), m);
        if self.chess.turn() == Color::White {
            self.pgn.push_str(&format!("{}. ", self.chess.fullmoves()));
        } else if self.pgn.is_empty() {
            self.pgn.push_str(&format!("{}... ", self.chess.fullmoves()));
        }
        self.pgn.push_str(&san.to_string());
        self.pgn.push(' ');
        self.chess.play_unchecked(m);
        true
    }

    pub fn get_legal_moves(&self) -> Vec<Move> {
        self.chess.legal_moves().to_vec()
    }

    pub fn is_game_over(&self) -> bool {
        self.chess.is_game_over()
    }

    pub fn outcome(&self) -> Outcome {
        self.chess.outcome()
    }

    pub fn get_pgn(&self) -> &str {
        self.pgn.trim_end()
    }

    /// Asks the searcher for a move in the current position. `None` means
    /// the side to move has no legal moves.
    pub fn get_ai_move(&mut self) -> Option<SearchResult<Move>> {
        let mut oracle = ChessOracle::new(self.chess.clone());
        let result = match self.mode {
            SearchMode::Timed => {
                let budget = self.searcher.config().time_budget();
                self.searcher.get_move(&mut oracle, budget)
            }
            SearchMode::FixedDepth(depth) => self.searcher.search_depth(&mut oracle, depth),
        };
        debug_assert_eq!(oracle.ply(), 0);
        debug_assert_eq!(oracle.position().board(), self.chess.board());
        if let Some(result) = &result {
            let stats = self.searcher.stats();
            info!(
                mv = %SanPlus::from_move(self.chess.clone(), result.mv),
                score = result.score,
                depth = result.depth,
                nodes = stats.total_nodes(),
                "engine move chosen"
            );
        }
        result
    }
}
