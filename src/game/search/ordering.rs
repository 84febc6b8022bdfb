// src/game/search/ordering.rs

//! Root move ordering carried from one deepening iteration to the next.

use crate::constants::{Score, SCORE_INFINITY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RootMove<M> {
    pub mv: M,
    pub score: Score,
}

/// Root moves in the order the next iteration should search them.
#[derive(Clone, Debug)]
pub struct RootMoves<M> {
    moves: Vec<RootMove<M>>,
}

impl<M: Copy> RootMoves<M> {
    pub fn new(moves: Vec<M>) -> Self {
        Self {
            moves: moves
                .into_iter()
                .map(|mv| RootMove {
                    mv,
                    score: -SCORE_INFINITY,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn get(&self, index: usize) -> RootMove<M> {
        self.moves[index]
    }

    pub fn set_score(&mut self, index: usize, score: Score) {
        self.moves[index].score = score;
    }

    pub fn iter(&self) -> impl Iterator<Item = &RootMove<M>> {
        self.moves.iter()
    }

    /// Stable sort, best score first. Ties keep their previous order.
    pub fn sort_by_score(&mut self) {
        self.moves.sort_by(|a, b| b.score.cmp(&a.score));
    }
}
