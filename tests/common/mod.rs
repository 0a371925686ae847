#![allow(dead_code)]

use chrono::NaiveDate;
use marketlens::domain::economic::IndicatorObservation;
use marketlens::domain::error::AnalyzerError;
use marketlens::domain::evaluation::CompanyMetrics;
use marketlens::domain::price_series::{PricePoint, PriceSeries};
use marketlens::domain::strategy::StrategyConfig;
use marketlens::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub prices: HashMap<String, Vec<PricePoint>>,
    pub indicators: HashMap<String, Vec<IndicatorObservation>>,
    pub fundamentals: Vec<CompanyMetrics>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            indicators: HashMap::new(),
            fundamentals: Vec::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, code: &str, points: Vec<PricePoint>) -> Self {
        self.prices.insert(code.to_string(), points);
        self
    }

    pub fn with_indicator(mut self, name: &str, obs: Vec<IndicatorObservation>) -> Self {
        self.indicators.insert(name.to_string(), obs);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, AnalyzerError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(AnalyzerError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .prices
            .get(code)
            .map(|points| {
                points
                    .iter()
                    .filter(|p| p.date >= start_date && p.date <= end_date)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn fetch_indicator(
        &self,
        name: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<Vec<IndicatorObservation>, AnalyzerError> {
        Ok(self.indicators.get(name).cloned().unwrap_or_default())
    }

    fn fetch_fundamentals(&self) -> Result<Vec<CompanyMetrics>, AnalyzerError> {
        Ok(self.fundamentals.clone())
    }

    fn list_instruments(&self) -> Result<Vec<String>, AnalyzerError> {
        let mut codes: Vec<String> = self.prices.keys().cloned().collect();
        codes.sort();
        Ok(codes)
    }

    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, AnalyzerError> {
        Ok(self.prices.get(code).and_then(|points| {
            points
                .first()
                .zip(points.last())
                .map(|(first, last)| (first.date, last.date, points.len()))
        }))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_points(start: NaiveDate, closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, c)| PricePoint {
            date: start + chrono::Days::new(i as u64),
            close: *c,
        })
        .collect()
}

pub fn make_series(code: &str, start: NaiveDate, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(code, make_points(start, closes)).unwrap()
}

pub fn sample_strategy() -> StrategyConfig {
    StrategyConfig::default()
}

/// 300 closes engineered around a 50/200 crossover: flat warmup, then a
/// sustained move in `direction` (+1.0 bullish, -1.0 bearish) starting at
/// day 220, large enough to drag the 50-day average through the 200-day
/// one exactly once.
pub fn engineered_closes(base: f64, direction: f64) -> Vec<f64> {
    let mut closes = Vec::with_capacity(300);
    for _ in 0..220 {
        closes.push(base);
    }
    for i in 0..80 {
        closes.push(base + direction * base * 0.005 * (i + 1) as f64);
    }
    closes
}

/// 300 closes that drift gently without ever crossing.
pub fn drifting_closes(base: f64) -> Vec<f64> {
    (0..300).map(|i| base + base * 0.0002 * i as f64).collect()
}
