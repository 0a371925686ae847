//! Data access port trait.

use crate::domain::economic::IndicatorObservation;
use crate::domain::error::AnalyzerError;
use crate::domain::evaluation::CompanyMetrics;
use crate::domain::price_series::PricePoint;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily close prices for one instrument, date-ordered, restricted to
    /// the inclusive range.
    fn fetch_prices(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, AnalyzerError>;

    /// One macro series (e.g. FEDFUNDS, CPIAUCSL) over the range.
    fn fetch_indicator(
        &self,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<IndicatorObservation>, AnalyzerError>;

    /// Fundamental metrics for every company the source knows about.
    fn fetch_fundamentals(&self) -> Result<Vec<CompanyMetrics>, AnalyzerError>;

    fn list_instruments(&self) -> Result<Vec<String>, AnalyzerError>;

    /// (first date, last date, observation count) for one instrument, or
    /// None when no data exists.
    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, AnalyzerError>;
}
