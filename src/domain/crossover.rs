//! Moving-average crossover detection.

use crate::domain::moving_average::MovingAveragePair;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Bullish,
    Bearish,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Bullish => write!(f, "bullish"),
            Direction::Bearish => write!(f, "bearish"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub date: NaiveDate,
    pub code: String,
    pub direction: Direction,
}

/// Scan one instrument for short/long moving-average crossings.
///
/// A signal needs a prior comparable date: the first date where both
/// averages are defined never fires. Bullish when the difference moves
/// from <= 0 to > 0, bearish from >= 0 to < 0; a flat zero on both sides
/// emits nothing.
pub fn detect_crossovers(
    prices: &PriceSeries,
    short_window: usize,
    long_window: usize,
) -> Vec<Signal> {
    let pair = MovingAveragePair::compute(prices, short_window, long_window);

    let diffs: Vec<(NaiveDate, f64)> = pair
        .short
        .points
        .iter()
        .zip(pair.long.points.iter())
        .filter(|(s, l)| s.valid && l.valid)
        .map(|(s, l)| (s.date, s.value - l.value))
        .collect();

    let mut signals = Vec::new();
    for window in diffs.windows(2) {
        let (_, prev) = window[0];
        let (date, curr) = window[1];

        if prev <= 0.0 && curr > 0.0 {
            signals.push(Signal {
                date,
                code: prices.code().to_string(),
                direction: Direction::Bullish,
            });
        } else if prev >= 0.0 && curr < 0.0 {
            signals.push(Signal {
                date,
                code: prices.code().to_string(),
                direction: Direction::Bearish,
            });
        }
    }

    signals
}

/// (bullish, bearish) counts over a batch of signals.
pub fn count_directions(signals: &[Signal]) -> (usize, usize) {
    let bullish = signals
        .iter()
        .filter(|s| s.direction == Direction::Bullish)
        .count();
    (bullish, signals.len() - bullish)
}
