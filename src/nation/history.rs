//! Approval history and the recent-events log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::calendar::SimDate;

pub const EVENT_LOG_CAPACITY: usize = 5;

/// Direction of recent approval movement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

/// Append-only approval time series
///
/// Values and dates are parallel lists and always the same length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApprovalHistory {
    values: Vec<f64>,
    dates: Vec<SimDate>,
}

impl ApprovalHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, approval: f64, date: SimDate) {
        self.values.push(approval);
        self.dates.push(date);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn dates(&self) -> &[SimDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last(&self) -> Option<(f64, SimDate)> {
        Some((*self.values.last()?, *self.dates.last()?))
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, SimDate)> + '_ {
        self.values.iter().copied().zip(self.dates.iter().copied())
    }

    pub fn is_consistent(&self) -> bool {
        self.values.len() == self.dates.len() && self.dates.windows(2).all(|w| w[0] <= w[1])
    }

    /// Compare the latest value against the one `window` samples back
    ///
    /// Moves smaller than half a point count as flat.
    pub fn trend(&self, window: usize) -> Trend {
        let n = self.values.len();
        if n < 2 || window == 0 {
            return Trend::Flat;
        }
        let earlier = self.values[n.saturating_sub(window + 1)];
        let delta = self.values[n - 1] - earlier;
        if delta > 0.5 {
            Trend::Rising
        } else if delta < -0.5 {
            Trend::Falling
        } else {
            Trend::Flat
        }
    }
}

/// Most recent human-readable happenings, oldest first
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<String>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest beyond capacity
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_back(entry.into());
        while self.entries.len() > EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_evicts_oldest() {
        let mut log = EventLog::new();
        for i in 1..=6 {
            log.push(format!("event {}", i));
        }
        assert_eq!(log.len(), 5);
        assert_eq!(log.entries().first().map(String::as_str), Some("event 2"));
        assert_eq!(log.latest(), Some("event 6"));
    }

    #[test]
    fn test_history_stays_parallel() {
        let mut history = ApprovalHistory::new();
        history.push(50.0, SimDate::new(2025, 1, 1));
        history.push(52.0, SimDate::new(2025, 1, 2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.values().len(), history.dates().len());
        assert!(history.is_consistent());
        assert_eq!(history.last(), Some((52.0, SimDate::new(2025, 1, 2))));
    }

    #[test]
    fn test_trend() {
        let mut history = ApprovalHistory::new();
        assert_eq!(history.trend(3), Trend::Flat);

        for (i, v) in [50.0, 49.0, 47.0, 45.0].iter().enumerate() {
            history.push(*v, SimDate::new(2025, 1, i as u32 + 1));
        }
        assert_eq!(history.trend(3), Trend::Falling);
        assert_eq!(history.trend(100), Trend::Falling);

        history.push(48.0, SimDate::new(2025, 1, 5));
        assert_eq!(history.trend(1), Trend::Rising);
    }

    #[test]
    fn test_out_of_order_dates_detected() {
        let mut history = ApprovalHistory::new();
        history.push(50.0, SimDate::new(2025, 2, 1));
        history.push(50.0, SimDate::new(2025, 1, 1));
        assert!(!history.is_consistent());
    }
}
