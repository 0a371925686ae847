//! Validated per-instrument price history.

use crate::domain::error::AnalyzerError;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Ordered close-price history for one instrument.
///
/// Dates are strictly increasing with one value per date; construction
/// fails on any violation and the series is immutable afterwards.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    code: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(code: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, AnalyzerError> {
        let code = code.into();
        if points.is_empty() {
            return Err(AnalyzerError::NoData { code });
        }

        for pair in points.windows(2) {
            if pair[1].date == pair[0].date {
                return Err(AnalyzerError::data(format!(
                    "duplicate date {} for {}",
                    pair[1].date, code
                )));
            }
            if pair[1].date < pair[0].date {
                return Err(AnalyzerError::data(format!(
                    "dates out of order for {}: {} after {}",
                    code, pair[1].date, pair[0].date
                )));
            }
        }

        for p in &points {
            if !p.close.is_finite() {
                return Err(AnalyzerError::data(format!(
                    "non-finite price for {} on {}",
                    code, p.date
                )));
            }
        }

        Ok(Self { code, points })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(d: NaiveDate, close: f64) -> PricePoint {
        PricePoint { date: d, close }
    }

    #[test]
    fn accepts_strictly_increasing_dates() {
        let series = PriceSeries::new(
            "AAPL",
            vec![
                point(date(2024, 1, 2), 100.0),
                point(date(2024, 1, 3), 101.0),
                point(date(2024, 1, 5), 99.5),
            ],
        )
        .unwrap();

        assert_eq!(series.code(), "AAPL");
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), date(2024, 1, 2));
        assert_eq!(series.last_date(), date(2024, 1, 5));
    }

    #[test]
    fn rejects_duplicate_date() {
        let err = PriceSeries::new(
            "AAPL",
            vec![
                point(date(2024, 1, 2), 100.0),
                point(date(2024, 1, 2), 101.0),
            ],
        )
        .unwrap_err();

        assert!(matches!(err, AnalyzerError::Data { .. }));
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let err = PriceSeries::new(
            "AAPL",
            vec![
                point(date(2024, 1, 3), 100.0),
                point(date(2024, 1, 2), 101.0),
            ],
        )
        .unwrap_err();

        assert!(matches!(err, AnalyzerError::Data { .. }));
    }

    #[test]
    fn rejects_empty_series() {
        let err = PriceSeries::new("AAPL", vec![]).unwrap_err();
        assert!(matches!(err, AnalyzerError::NoData { .. }));
    }

    #[test]
    fn rejects_non_finite_price() {
        let err = PriceSeries::new(
            "AAPL",
            vec![
                point(date(2024, 1, 2), 100.0),
                point(date(2024, 1, 3), f64::NAN),
            ],
        )
        .unwrap_err();

        assert!(matches!(err, AnalyzerError::Data { .. }));
    }
}
