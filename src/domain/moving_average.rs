//! Simple moving averages with warmup validity flags.
//!
//! Warmup: the first (period - 1) points are invalid, the rest carry the
//! rolling mean of the trailing `period` closes.

use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy)]
pub struct MaPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct MaSeries {
    pub period: usize,
    pub points: Vec<MaPoint>,
}

/// Short (50) and long (200) averages aligned to one price series.
#[derive(Debug, Clone)]
pub struct MovingAveragePair {
    pub short: MaSeries,
    pub long: MaSeries,
}

impl MovingAveragePair {
    pub fn compute(prices: &PriceSeries, short_window: usize, long_window: usize) -> Self {
        Self {
            short: calc_sma(prices, short_window),
            long: calc_sma(prices, long_window),
        }
    }
}

pub fn calc_sma(prices: &PriceSeries, period: usize) -> MaSeries {
    if period == 0 {
        return MaSeries {
            period,
            points: Vec::new(),
        };
    }

    let bars = prices.points();
    let mut points = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += bar.close;
        if i >= period {
            sum -= bars[i - period].close;
        }

        if i < period - 1 {
            points.push(MaPoint {
                date: bar.date,
                valid: false,
                value: 0.0,
            });
        } else {
            points.push(MaPoint {
                date: bar.date,
                valid: true,
                value: sum / period as f64,
            });
        }
    }

    MaSeries { period, points }
}
