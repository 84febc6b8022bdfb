// src/game/search/deadline.rs

use std::time::{Duration, Instant};

/// Wall-clock limit for starting new work.
///
/// The driver polls it before each root move. It can be pushed back exactly
/// once, which the driver uses to finish the first iteration.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
    extended: bool,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
            extended: false,
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.at
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Moves the deadline one budget past now. Returns `false` if it was
    /// already extended.
    pub fn extend_once(&mut self) -> bool {
        if self.extended {
            return false;
        }
        self.at = Instant::now() + self.budget;
        self.extended = true;
        true
    }
}
