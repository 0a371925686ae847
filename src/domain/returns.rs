//! Daily returns, cross-sectional alignment, and standardization.

use crate::domain::error::AnalyzerError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Per-instrument daily fractional returns: price(t)/price(t-1) - 1.
///
/// The first price date carries no return, so the series is one shorter
/// than the price history it was derived from.
#[derive(Debug, Clone)]
pub struct ReturnSeries {
    pub code: String,
    pub points: Vec<ReturnPoint>,
}

pub fn daily_returns(prices: &PriceSeries) -> ReturnSeries {
    let points = prices
        .points()
        .windows(2)
        .map(|pair| ReturnPoint {
            date: pair[1].date,
            value: pair[1].close / pair[0].close - 1.0,
        })
        .collect();

    ReturnSeries {
        code: prices.code().to_string(),
        points,
    }
}

/// Return matrix aligned across instruments: rows are dates, columns are
/// instruments in the order given at construction.
#[derive(Debug, Clone)]
pub struct ReturnMatrix {
    pub dates: Vec<NaiveDate>,
    pub codes: Vec<String>,
    /// Row-major: `rows[t][i]` is the return of instrument `i` on `dates[t]`.
    pub rows: Vec<Vec<f64>>,
}

impl ReturnMatrix {
    /// Align per-instrument returns over the union of all return dates.
    ///
    /// Decomposition needs a complete matrix, so an instrument missing any
    /// date in the union is a data error rather than a fill target.
    pub fn align(series: &[ReturnSeries]) -> Result<Self, AnalyzerError> {
        if series.is_empty() {
            return Err(AnalyzerError::data("no return series to align"));
        }

        let mut all_dates: BTreeSet<NaiveDate> = BTreeSet::new();
        for s in series {
            all_dates.extend(s.points.iter().map(|p| p.date));
        }
        let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

        let mut rows = vec![vec![0.0; series.len()]; dates.len()];
        for (col, s) in series.iter().enumerate() {
            let by_date: HashMap<NaiveDate, f64> =
                s.points.iter().map(|p| (p.date, p.value)).collect();
            for (row, date) in dates.iter().enumerate() {
                match by_date.get(date) {
                    Some(value) => rows[row][col] = *value,
                    None => {
                        return Err(AnalyzerError::data(format!(
                            "missing return for {} on {}",
                            s.code, date
                        )));
                    }
                }
            }
        }

        Ok(Self {
            dates,
            codes: series.iter().map(|s| s.code.clone()).collect(),
            rows,
        })
    }

    pub fn observations(&self) -> usize {
        self.dates.len()
    }

    pub fn instruments(&self) -> usize {
        self.codes.len()
    }
}

/// Return matrix with each column rescaled to zero mean and unit sample
/// variance. Required before decomposition since components are sensitive
/// to scale.
#[derive(Debug, Clone)]
pub struct StandardizedReturnMatrix {
    pub dates: Vec<NaiveDate>,
    pub codes: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl StandardizedReturnMatrix {
    pub fn from_returns(matrix: &ReturnMatrix) -> Result<Self, AnalyzerError> {
        let t = matrix.observations();
        if t < 2 {
            return Err(AnalyzerError::Dimension {
                observations: t,
                minimum: 2,
            });
        }

        let n = matrix.instruments();
        let tf = t as f64;
        let mut rows = matrix.rows.clone();

        for col in 0..n {
            let mean = matrix.rows.iter().map(|r| r[col]).sum::<f64>() / tf;
            let var = matrix
                .rows
                .iter()
                .map(|r| (r[col] - mean).powi(2))
                .sum::<f64>()
                / (tf - 1.0);

            if var <= f64::EPSILON {
                return Err(AnalyzerError::data(format!(
                    "zero return variance for {}",
                    matrix.codes[col]
                )));
            }

            let sd = var.sqrt();
            for row in rows.iter_mut() {
                row[col] = (row[col] - mean) / sd;
            }
        }

        Ok(Self {
            dates: matrix.dates.clone(),
            codes: matrix.codes.clone(),
            rows,
        })
    }

    pub fn observations(&self) -> usize {
        self.dates.len()
    }

    pub fn instruments(&self) -> usize {
        self.codes.len()
    }
}
