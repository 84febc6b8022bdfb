// src/game/search/stats.rs

//! Counters collected during one search call.

use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Negamax nodes, root moves included
    pub nodes: u64,

    /// Quiescence nodes
    pub qsearch_nodes: u64,

    /// Static evaluations performed
    pub evaluations: u64,

    /// Beta cutoffs in negamax
    pub cutoffs: u64,

    /// Root moves re-searched after an aspiration window miss
    pub researches: u64,

    /// Deepest iteration that evaluated every root move
    pub completed_depth: u8,

    pub start_time: Option<Instant>,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|start| start.elapsed()).unwrap_or_default()
    }

    pub fn total_nodes(&self) -> u64 {
        self.nodes + self.qsearch_nodes
    }

    pub fn nps(&self) -> u64 {
        let elapsed_ms = self.elapsed().as_millis() as u64;
        if elapsed_ms == 0 {
            return 0;
        }
        self.total_nodes() * 1000 / elapsed_ms
    }
}
