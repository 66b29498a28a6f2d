//! City state: the single mutable record owned by an engine.

use crate::{
    scheduler::PendingEffect,
    stats::{CityStats, Stat},
    types::Year,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Most recent log messages kept in the history.
pub const HISTORY_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityState {
    pub year:    Year,
    pub stats:   CityStats,
    /// Newest first, never longer than HISTORY_LIMIT.
    history:     VecDeque<String>,
    pub pending: Vec<PendingEffect>,
}

impl CityState {
    pub fn new(year: Year, stats: CityStats) -> Self {
        Self {
            year,
            stats,
            history: VecDeque::with_capacity(HISTORY_LIMIT + 1),
            pending: Vec::new(),
        }
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.stats.get(stat)
    }

    /// Record a message at the front of the history, dropping the oldest.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("year={} log: {message}", self.year);
        self.history.push_front(message);
        self.history.truncate(HISTORY_LIMIT);
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }
}

impl Default for CityState {
    fn default() -> Self {
        Self::new(1, CityStats::default())
    }
}
