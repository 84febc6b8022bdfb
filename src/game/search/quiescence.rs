// src/game/search/quiescence.rs

//! Capture-only search run at the leaves of the main search, so that a leaf
//! is never scored in the middle of an exchange.

use crate::constants::{Score, UNRESOLVED_CAPTURE_SCORE};
use crate::game::oracle::{Applied, Oracle};

use super::Searcher;

impl Searcher {
    /// Quiescence search with the configured capture-depth limit.
    ///
    /// The leaf of the main search always gets its stand-pat ply, so a limit
    /// of `Some(0)` behaves like `Some(1)` here.
    pub fn quiescence<O: Oracle>(&mut self, pos: &mut O, alpha: Score, beta: Score) -> Score {
        let limit = self.config.quiescence_depth.map(|l| l.max(1));
        self.quiescence_with_limit(pos, alpha, beta, limit)
    }

    /// Quiescence search that follows capture chains at most `limit` plies
    /// deep (`None` follows them to the end).
    ///
    /// A node reached with no depth left returns [`UNRESOLVED_CAPTURE_SCORE`]
    /// for its side to move. The capturing parent sees the negation, so an
    /// unresolved chain always loses to the parent's stand-pat.
    pub fn quiescence_with_limit<O: Oracle>(
        &mut self,
        pos: &mut O,
        mut alpha: Score,
        beta: Score,
        limit: Option<u8>,
    ) -> Score {
        if limit == Some(0) {
            return UNRESOLVED_CAPTURE_SCORE;
        }

        self.stats.qsearch_nodes += 1;
        if self.poll_deadline() {
            return alpha;
        }

        let standing_pat = self.evaluate(pos);
        if standing_pat >= beta {
            return beta;
        }
        if alpha < standing_pat {
            alpha = standing_pat;
        }

        let captures: Vec<O::Move> = pos
            .legal_moves()
            .into_iter()
            .filter(|m| pos.is_capture(m))
            .collect();
        let next_limit = limit.map(|l| l - 1);

        for m in captures {
            let mut child = Applied::new(pos, m);
            let score = -self.quiescence_with_limit(&mut *child, -beta, -alpha, next_limit);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}
