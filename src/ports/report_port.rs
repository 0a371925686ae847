//! Report generation port trait.

use crate::domain::analysis::AnalysisResult;
use crate::domain::economic::EconomicIndicators;
use crate::domain::error::AnalyzerError;
use crate::domain::evaluation::CompanyEvaluation;
use crate::domain::strategy::StrategyConfig;

/// Everything a report renderer needs.
pub struct ReportContext<'a> {
    pub result: &'a AnalysisResult,
    pub strategy: &'a StrategyConfig,
    pub economic: &'a EconomicIndicators,
    pub evaluations: &'a [CompanyEvaluation],
}

/// Port for writing analysis reports.
pub trait ReportPort {
    fn write(&self, ctx: &ReportContext, output_path: &str) -> Result<(), AnalyzerError>;
}
