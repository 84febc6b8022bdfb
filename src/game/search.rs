// src/game/search.rs

pub mod deadline;
pub mod ordering;
pub mod quiescence;
pub mod stats;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{
    Score, DEFAULT_ASPIRATION_WINDOW, DEFAULT_MOBILITY_WEIGHT, DEFAULT_QUIESCENCE_DEPTH,
    DEFAULT_TIME_BUDGET_MS, DRAW_SCORE, MATE_SCORE, NODE_POLL_INTERVAL, SCORE_INFINITY,
};
use crate::game::evaluation::Evaluator;
use crate::game::oracle::{Applied, Oracle};
use deadline::Deadline;
use ordering::{RootMove, RootMoves};
pub use stats::SearchStats;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Weight of the mobility term in the static evaluation.
    pub mobility_weight: Score,
    /// Half width of the aspiration window around the previous iteration's score.
    pub aspiration_window: Score,
    pub use_quiescence_search: bool,
    /// Capture-chain limit for quiescence search; `None` is unbounded.
    pub quiescence_depth: Option<u8>,
    /// Last depth the deepening loop runs; `None` runs until the deadline.
    pub max_depth: Option<u8>,
    pub time_budget_ms: u64,
    /// Also poll the deadline inside the recursion, not only between root moves.
    pub check_deadline_in_tree: bool,
    /// Nodes between two in-tree deadline polls.
    pub node_poll_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mobility_weight: DEFAULT_MOBILITY_WEIGHT,
            aspiration_window: DEFAULT_ASPIRATION_WINDOW,
            use_quiescence_search: true,
            quiescence_depth: Some(DEFAULT_QUIESCENCE_DEPTH),
            max_depth: None,
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            check_deadline_in_tree: false,
            node_poll_interval: NODE_POLL_INTERVAL,
        }
    }
}

impl SearchConfig {
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

/// Best move of a search, its score and the depth that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult<M> {
    pub mv: M,
    pub score: Score,
    pub depth: u8,
}

/// Alpha-beta negamax searcher with an iterative deepening driver.
///
/// Holds no position. Every call borrows the caller's [`Oracle`] mutably and
/// leaves it as it found it.
#[derive(Clone, Debug)]
pub struct Searcher {
    config: SearchConfig,
    evaluator: Evaluator,
    stats: SearchStats,
    deadline: Option<Deadline>,
    poll_in_tree: bool,
    stopped: bool,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            evaluator: Evaluator::from_config(&config),
            config,
            stats: SearchStats::new(),
            deadline: None,
            poll_in_tree: false,
            stopped: false,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Picks a move within `time_budget` by iterative deepening.
    ///
    /// Returns `None` only when the side to move has no legal moves. The
    /// deadline is checked between root moves, so a single long subtree can
    /// overrun it unless `check_deadline_in_tree` is set. The result always
    /// comes from the deepest iteration that searched every root move.
    pub fn get_move<O: Oracle>(
        &mut self,
        pos: &mut O,
        time_budget: Duration,
    ) -> Option<SearchResult<O::Move>> {
        self.begin_search(Some(Deadline::after(time_budget)));

        let moves = pos.legal_moves();
        match moves.len() {
            0 => {
                debug!("no legal moves at the root");
                return None;
            }
            1 => {
                let score = self.evaluate(pos);
                return Some(SearchResult {
                    mv: moves[0],
                    score,
                    depth: 0,
                });
            }
            _ => {}
        }

        let mut root = RootMoves::new(moves);
        let mut completed: Option<SearchResult<O::Move>> = None;
        let mut depth = 1;

        loop {
            let window = match &completed {
                Some(prev) => (
                    prev.score - self.config.aspiration_window,
                    prev.score + self.config.aspiration_window,
                ),
                None => (-SCORE_INFINITY, SCORE_INFINITY),
            };

            match self.search_iteration(pos, &mut root, depth, window) {
                Some(result) => {
                    self.stats.completed_depth = depth;
                    info!(
                        depth,
                        score = result.score,
                        best = ?result.mv,
                        nodes = self.stats.total_nodes(),
                        nps = self.stats.nps(),
                        elapsed_ms = self.stats.elapsed().as_millis() as u64,
                        extended = self.deadline.is_some_and(|d| d.is_extended()),
                        "iteration complete"
                    );
                    completed = Some(result);
                }
                None => break,
            }

            if self.config.max_depth.is_some_and(|max| depth >= max) || depth == u8::MAX {
                break;
            }
            depth += 1;
        }

        completed
    }

    /// Searches every root move to exactly `depth` with an unbounded window
    /// and no deadline.
    pub fn search_depth<O: Oracle>(
        &mut self,
        pos: &mut O,
        depth: u8,
    ) -> Option<SearchResult<O::Move>> {
        self.begin_search(None);

        let moves = pos.legal_moves();
        if moves.is_empty() {
            return None;
        }

        let depth = depth.max(1);
        let mut root = RootMoves::new(moves);
        let result =
            self.search_iteration(pos, &mut root, depth, (-SCORE_INFINITY, SCORE_INFINITY));
        if result.is_some() {
            self.stats.completed_depth = depth;
        }
        result
    }

    /// Fail-soft alpha-beta negamax.
    ///
    /// The result may lie outside `(alpha, beta)`: at or above `beta` it is
    /// a lower bound, at or below `alpha` an upper bound, exact in between.
    pub fn negamax<O: Oracle>(
        &mut self,
        pos: &mut O,
        depth: u8,
        mut alpha: Score,
        beta: Score,
    ) -> Score {
        if depth == 0 {
            if self.config.use_quiescence_search {
                return self.quiescence(pos, alpha, beta);
            }
            return self.evaluate(pos);
        }

        self.stats.nodes += 1;
        if self.poll_deadline() {
            return alpha;
        }

        let moves = pos.legal_moves();
        if moves.is_empty() {
            return if pos.in_check() { -MATE_SCORE } else { DRAW_SCORE };
        }

        let mut best = -SCORE_INFINITY;
        for m in moves {
            let mut child = Applied::new(pos, m);
            let score = -self.negamax(&mut *child, depth - 1, -beta, -alpha);

            if score >= beta {
                self.stats.cutoffs += 1;
                return score;
            }
            if score > best {
                best = score;
                if score > alpha {
                    alpha = score;
                }
            }
        }

        best
    }

    fn begin_search(&mut self, deadline: Option<Deadline>) {
        self.stats.reset();
        self.deadline = deadline;
        self.poll_in_tree = false;
        self.stopped = false;
    }

    /// One root pass at `depth`. Returns `None` if the deadline interrupted
    /// it before every root move was searched.
    fn search_iteration<O: Oracle>(
        &mut self,
        pos: &mut O,
        root: &mut RootMoves<O::Move>,
        depth: u8,
        window: (Score, Score),
    ) -> Option<SearchResult<O::Move>> {
        let (mut alpha, mut beta) = window;
        self.poll_in_tree =
            self.config.check_deadline_in_tree && depth > 1 && self.deadline.is_some();

        let mut best: Option<RootMove<O::Move>> = None;

        for i in 0..root.len() {
            if self.root_deadline_reached(depth) {
                debug!(
                    depth,
                    searched = i,
                    total = root.len(),
                    "deadline reached, iteration abandoned"
                );
                return None;
            }

            let mv = root.get(i).mv;
            let mut score = self.search_root_move(pos, mv, depth, alpha, beta);

            let fail_high = score >= beta;
            let fail_low = best.is_none() && score <= alpha;
            if (fail_high || fail_low) && !self.stopped {
                self.stats.researches += 1;
                debug!(
                    depth,
                    ?mv,
                    score,
                    alpha,
                    beta,
                    fail_high,
                    "aspiration window miss, re-searching"
                );
                score = self.search_root_move(pos, mv, depth, -SCORE_INFINITY, SCORE_INFINITY);
                if fail_high {
                    beta = SCORE_INFINITY;
                }
            }

            if self.stopped {
                debug!(
                    depth,
                    searched = i,
                    "deadline reached inside the tree, iteration abandoned"
                );
                return None;
            }

            root.set_score(i, score);
            if best.map_or(true, |b| score > b.score) {
                best = Some(RootMove { mv, score });
            }
            if fail_low || score > alpha {
                alpha = score;
            }
        }

        root.sort_by_score();
        let order: Vec<O::Move> = root.iter().map(|m| m.mv).collect();
        debug!(depth, ?order, "root moves reordered");
        best.map(|b| SearchResult {
            mv: b.mv,
            score: b.score,
            depth,
        })
    }

    fn search_root_move<O: Oracle>(
        &mut self,
        pos: &mut O,
        mv: O::Move,
        depth: u8,
        alpha: Score,
        beta: Score,
    ) -> Score {
        self.stats.nodes += 1;
        let mut child = Applied::new(pos, mv);
        -self.negamax(&mut *child, depth - 1, -beta, -alpha)
    }

    fn root_deadline_reached(&mut self, depth: u8) -> bool {
        let Some(deadline) = self.deadline.as_mut() else {
            return false;
        };
        if !deadline.expired() {
            return false;
        }
        // The first iteration always completes.
        if depth == 1 {
            if deadline.extend_once() {
                debug!("deadline reached during depth 1, extended once");
            }
            return false;
        }
        true
    }

    fn poll_deadline(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        let interval = self.config.node_poll_interval.max(1);
        if !self.poll_in_tree || self.stats.total_nodes() % interval != 0 {
            return false;
        }
        if self.deadline.is_some_and(|deadline| deadline.expired()) {
            self.stopped = true;
        }
        self.stopped
    }

    fn evaluate<O: Oracle>(&mut self, pos: &mut O) -> Score {
        self.stats.evaluations += 1;
        self.evaluator.evaluate(pos)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
