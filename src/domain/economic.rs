//! Macro indicator series (policy rate, CPI).

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorObservation {
    pub date: NaiveDate,
    pub value: f64,
}

/// One macro time series, dates ascending.
#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub name: String,
    pub observations: Vec<IndicatorObservation>,
}

impl IndicatorSeries {
    pub fn latest(&self) -> Option<IndicatorObservation> {
        self.observations.last().copied()
    }
}

/// The two macro inputs the report summarizes.
#[derive(Debug, Clone)]
pub struct EconomicIndicators {
    pub policy_rate: IndicatorSeries,
    pub cpi: IndicatorSeries,
}
