//! CSV file data adapter.
//!
//! Expects one `{CODE}.csv` per instrument under the base directory, a
//! `{NAME}.csv` per macro series, and a single `fundamentals.csv`. Price
//! files carry either `date,close` or `date,open,high,low,close[,volume]`
//! columns; all files have a header row.

use crate::domain::economic::IndicatorObservation;
use crate::domain::error::AnalyzerError;
use crate::domain::evaluation::CompanyMetrics;
use crate::domain::price_series::PricePoint;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", name))
    }

    fn read_file(&self, name: &str) -> Result<String, AnalyzerError> {
        let path = self.file_path(name);
        fs::read_to_string(&path).map_err(|e| {
            AnalyzerError::data(format!("failed to read {}: {}", path.display(), e))
        })
    }
}

fn parse_record_date(record: &csv::StringRecord) -> Result<NaiveDate, AnalyzerError> {
    let date_str = record
        .get(0)
        .ok_or_else(|| AnalyzerError::data("missing date column"))?;
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| AnalyzerError::data(format!("invalid date format: {}", e)))
}

fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, AnalyzerError> {
    record
        .get(index)
        .ok_or_else(|| AnalyzerError::data(format!("missing {} column", name)))?
        .parse()
        .map_err(|e| AnalyzerError::data(format!("invalid {} value: {}", name, e)))
}

fn parse_optional_field(record: &csv::StringRecord, index: usize) -> Option<f64> {
    record
        .get(index)
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| s.trim().parse().ok())
}

impl DataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, AnalyzerError> {
        let content = self.read_file(code)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result
                .map_err(|e| AnalyzerError::data(format!("CSV parse error: {}", e)))?;

            let date = parse_record_date(&record)?;
            if date < start_date || date > end_date {
                continue;
            }

            // Either date,close or full OHLC with close in the fifth column.
            let close = if record.len() >= 5 {
                parse_field(&record, 4, "close")?
            } else {
                parse_field(&record, 1, "close")?
            };

            points.push(PricePoint { date, close });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }

    fn fetch_indicator(
        &self,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<IndicatorObservation>, AnalyzerError> {
        let content = self.read_file(name)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut observations = Vec::new();

        for result in rdr.records() {
            let record = result
                .map_err(|e| AnalyzerError::data(format!("CSV parse error: {}", e)))?;

            let date = parse_record_date(&record)?;
            if date < start_date || date > end_date {
                continue;
            }

            let value = parse_field(&record, 1, "value")?;
            observations.push(IndicatorObservation { date, value });
        }

        observations.sort_by_key(|o| o.date);
        Ok(observations)
    }

    fn fetch_fundamentals(&self) -> Result<Vec<CompanyMetrics>, AnalyzerError> {
        // Fundamentals are supplementary; an absent file means no evaluations.
        if !self.file_path("fundamentals").exists() {
            return Ok(Vec::new());
        }

        let content = self.read_file("fundamentals")?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut metrics = Vec::new();

        for result in rdr.records() {
            let record = result
                .map_err(|e| AnalyzerError::data(format!("CSV parse error: {}", e)))?;

            let code = record
                .get(0)
                .ok_or_else(|| AnalyzerError::data("missing code column"))?
                .to_string();

            metrics.push(CompanyMetrics {
                code,
                pe_ratio: parse_optional_field(&record, 1),
                profit_margin: parse_optional_field(&record, 2),
                revenue_growth: parse_optional_field(&record, 3),
            });
        }

        Ok(metrics)
    }

    fn list_instruments(&self) -> Result<Vec<String>, AnalyzerError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            AnalyzerError::data(format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut codes = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| AnalyzerError::data(format!("directory entry error: {}", e)))?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(stem) = name_str.strip_suffix(".csv") {
                if stem != "fundamentals" {
                    codes.push(stem.to_string());
                }
            }
        }

        codes.sort();
        Ok(codes)
    }

    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, AnalyzerError> {
        if !self.file_path(code).exists() {
            return Ok(None);
        }

        let points = self.fetch_prices(code, NaiveDate::MIN, NaiveDate::MAX)?;
        Ok(points
            .first()
            .zip(points.last())
            .map(|(first, last)| (first.date, last.date, points.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) {
        let mut file = fs::File::create(dir.path().join(name)).unwrap();
        write!(file, "{}", content).unwrap();
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fetch_prices_two_column_format() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "AAPL.csv",
            "date,close\n2024-01-02,185.5\n2024-01-03,184.2\n",
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let points = adapter
            .fetch_prices("AAPL", date(2024, 1, 1), date(2024, 12, 31))
            .unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, date(2024, 1, 2));
        assert_eq!(points[0].close, 185.5);
    }

    #[test]
    fn fetch_prices_ohlcv_format_uses_close() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "MSFT.csv",
            "date,open,high,low,close,volume\n2024-01-02,370,375,368,372.5,1000\n",
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let points = adapter
            .fetch_prices("MSFT", date(2024, 1, 1), date(2024, 12, 31))
            .unwrap();
        assert_eq!(points[0].close, 372.5);
    }

    #[test]
    fn fetch_prices_filters_date_range_and_sorts() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "AAPL.csv",
            "date,close\n2024-01-05,3.0\n2024-01-03,1.0\n2024-01-04,2.0\n",
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let points = adapter
            .fetch_prices("AAPL", date(2024, 1, 3), date(2024, 1, 4))
            .unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].close, 1.0);
        assert_eq!(points[1].close, 2.0);
    }

    #[test]
    fn fetch_prices_missing_file_is_data_error() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter
            .fetch_prices("NOPE", date(2024, 1, 1), date(2024, 12, 31))
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Data { .. }));
    }

    #[test]
    fn fetch_prices_bad_date_is_data_error() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "AAPL.csv", "date,close\n02/01/2024,185.5\n");
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter
            .fetch_prices("AAPL", date(2024, 1, 1), date(2024, 12, 31))
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Data { .. }));
    }

    #[test]
    fn fetch_indicator_reads_date_value_pairs() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "FEDFUNDS.csv",
            "date,value\n2024-01-01,5.33\n2024-02-01,5.25\n",
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let obs = adapter
            .fetch_indicator("FEDFUNDS", date(2024, 1, 1), date(2024, 12, 31))
            .unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[1].value, 5.25);
    }

    #[test]
    fn fetch_fundamentals_with_missing_fields() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "fundamentals.csv",
            "code,pe_ratio,profit_margin,revenue_growth\nAAPL,28.5,0.25,0.08\nXYZ,,0.02,\n",
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let metrics = adapter.fetch_fundamentals().unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].pe_ratio, Some(28.5));
        assert_eq!(metrics[1].code, "XYZ");
        assert_eq!(metrics[1].pe_ratio, None);
        assert_eq!(metrics[1].profit_margin, Some(0.02));
        assert_eq!(metrics[1].revenue_growth, None);
    }

    #[test]
    fn absent_fundamentals_file_means_no_metrics() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        assert!(adapter.fetch_fundamentals().unwrap().is_empty());
    }

    #[test]
    fn list_instruments_excludes_fundamentals() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "AAPL.csv", "date,close\n");
        write_file(&dir, "MSFT.csv", "date,close\n");
        write_file(&dir, "fundamentals.csv", "code\n");
        write_file(&dir, "notes.txt", "ignore me\n");
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let codes = adapter.list_instruments().unwrap();
        assert_eq!(codes, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn data_range_reports_bounds_and_count() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "AAPL.csv",
            "date,close\n2024-01-02,1.0\n2024-01-03,2.0\n2024-01-04,3.0\n",
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let range = adapter.get_data_range("AAPL").unwrap().unwrap();
        assert_eq!(range, (date(2024, 1, 2), date(2024, 1, 4), 3));
        assert!(adapter.get_data_range("NOPE").unwrap().is_none());
    }
}
