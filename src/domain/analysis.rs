//! End-to-end analysis over a loaded universe.
//!
//! Single-threaded batch pipeline: returns, alignment, standardization,
//! decomposition, then per-instrument crossover scans and the signal to
//! trade-action mapping. Runs to completion or fails outright; no partial
//! results.

use crate::domain::crossover::{count_directions, detect_crossovers, Signal};
use crate::domain::decompose::{decompose, Decomposition};
use crate::domain::error::AnalyzerError;
use crate::domain::price_series::PriceSeries;
use crate::domain::returns::{daily_returns, ReturnMatrix, StandardizedReturnMatrix};
use crate::domain::strategy::{evaluate_signals, StrategyConfig, TradeAction};

#[derive(Debug)]
pub struct AnalysisResult {
    pub codes: Vec<String>,
    pub observations: usize,
    pub decomposition: Decomposition,
    pub signals: Vec<Signal>,
    pub actions: Vec<TradeAction>,
}

impl AnalysisResult {
    pub fn bullish_count(&self) -> usize {
        count_directions(&self.signals).0
    }

    pub fn bearish_count(&self) -> usize {
        count_directions(&self.signals).1
    }
}

pub fn run_analysis(
    universe: &[PriceSeries],
    strategy: &StrategyConfig,
) -> Result<AnalysisResult, AnalyzerError> {
    if universe.is_empty() {
        return Err(AnalyzerError::data("empty universe"));
    }

    let returns: Vec<_> = universe.iter().map(daily_returns).collect();
    let matrix = ReturnMatrix::align(&returns)?;
    let standardized = StandardizedReturnMatrix::from_returns(&matrix)?;
    let decomposition = decompose(&standardized)?;

    let mut signals = Vec::new();
    for prices in universe {
        signals.extend(detect_crossovers(
            prices,
            strategy.short_window,
            strategy.long_window,
        ));
    }

    let actions = evaluate_signals(&signals, strategy);

    Ok(AnalysisResult {
        codes: matrix.codes,
        observations: matrix.dates.len(),
        decomposition,
        signals,
        actions,
    })
}
