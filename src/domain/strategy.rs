//! Strategy configuration and signal-to-action mapping.
//!
//! The evaluator is a labeling step, not an execution simulator: each
//! bullish signal becomes a buy, each bearish signal a sell, with the
//! configured stop-loss and position-size percentages attached. No state
//! is carried between signals.

use crate::domain::crossover::{Direction, Signal};
use chrono::NaiveDate;
use std::fmt;

pub const DEFAULT_STOP_LOSS_PCT: f64 = 5.0;
pub const DEFAULT_POSITION_SIZE_PCT: f64 = 3.0;
pub const DEFAULT_SHORT_WINDOW: usize = 50;
pub const DEFAULT_LONG_WINDOW: usize = 200;

#[derive(Debug, Clone)]
pub struct StrategyConfig {
    pub name: String,
    pub short_window: usize,
    pub long_window: usize,
    pub stop_loss_pct: f64,
    pub position_size_pct: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            name: "Golden Cross".into(),
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
            stop_loss_pct: DEFAULT_STOP_LOSS_PCT,
            position_size_pct: DEFAULT_POSITION_SIZE_PCT,
        }
    }
}

impl StrategyConfig {
    /// One-line rule description for the report.
    pub fn describe(&self) -> String {
        format!(
            "Buy on bullish crossovers ({}-day MA > {}-day MA), sell on bearish crossovers. \
             Apply {:.0}% stop-loss and {:.0}% position sizing.",
            self.short_window, self.long_window, self.stop_loss_pct, self.position_size_pct
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Terminal artifact: reported, never executed.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeAction {
    pub date: NaiveDate,
    pub code: String,
    pub side: Side,
    pub stop_loss_pct: f64,
    pub position_size_pct: f64,
}

pub fn evaluate_signals(signals: &[Signal], config: &StrategyConfig) -> Vec<TradeAction> {
    signals
        .iter()
        .map(|signal| TradeAction {
            date: signal.date,
            code: signal.code.clone(),
            side: match signal.direction {
                Direction::Bullish => Side::Buy,
                Direction::Bearish => Side::Sell,
            },
            stop_loss_pct: config.stop_loss_pct,
            position_size_pct: config.position_size_pct,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn signal(d: u32, code: &str, direction: Direction) -> Signal {
        Signal {
            date: date(d),
            code: code.into(),
            direction,
        }
    }

    #[test]
    fn bullish_maps_to_buy_with_config_constants() {
        let config = StrategyConfig::default();
        let actions = evaluate_signals(&[signal(5, "AAPL", Direction::Bullish)], &config);

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].side, Side::Buy);
        assert_eq!(actions[0].code, "AAPL");
        assert_eq!(actions[0].date, date(5));
        assert_eq!(actions[0].stop_loss_pct, DEFAULT_STOP_LOSS_PCT);
        assert_eq!(actions[0].position_size_pct, DEFAULT_POSITION_SIZE_PCT);
    }

    #[test]
    fn bearish_maps_to_sell() {
        let config = StrategyConfig {
            stop_loss_pct: 8.0,
            position_size_pct: 2.0,
            ..StrategyConfig::default()
        };
        let actions = evaluate_signals(&[signal(7, "MSFT", Direction::Bearish)], &config);

        assert_eq!(actions[0].side, Side::Sell);
        assert_eq!(actions[0].stop_loss_pct, 8.0);
        assert_eq!(actions[0].position_size_pct, 2.0);
    }

    #[test]
    fn order_and_count_are_preserved() {
        let config = StrategyConfig::default();
        let signals = vec![
            signal(3, "A", Direction::Bullish),
            signal(4, "B", Direction::Bearish),
            signal(9, "A", Direction::Bearish),
        ];
        let actions = evaluate_signals(&signals, &config);

        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].side, Side::Buy);
        assert_eq!(actions[1].side, Side::Sell);
        assert_eq!(actions[2].side, Side::Sell);
        assert_eq!(actions[2].code, "A");
    }

    #[test]
    fn describe_mentions_windows_and_percentages() {
        let desc = StrategyConfig::default().describe();
        assert!(desc.contains("50-day"));
        assert!(desc.contains("200-day"));
        assert!(desc.contains("5% stop-loss"));
        assert!(desc.contains("3% position sizing"));
    }
}
