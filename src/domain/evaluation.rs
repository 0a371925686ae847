//! Company evaluation from fundamental metrics.
//!
//! Simple threshold screens; a metric that is absent simply contributes
//! no tag.

#[derive(Debug, Clone, Default)]
pub struct CompanyMetrics {
    pub code: String,
    pub pe_ratio: Option<f64>,
    pub profit_margin: Option<f64>,
    pub revenue_growth: Option<f64>,
}

pub const LOW_PE_CUTOFF: f64 = 15.0;
pub const HEALTHY_MARGIN_CUTOFF: f64 = 0.10;
pub const STRONG_GROWTH_CUTOFF: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct CompanyEvaluation {
    pub code: String,
    pub tags: Vec<&'static str>,
}

pub fn evaluate_company(metrics: &CompanyMetrics) -> CompanyEvaluation {
    let mut tags = Vec::new();

    if let Some(pe) = metrics.pe_ratio {
        if pe < LOW_PE_CUTOFF {
            tags.push("Low P/E ratio");
        }
    }
    if let Some(margin) = metrics.profit_margin {
        if margin > HEALTHY_MARGIN_CUTOFF {
            tags.push("Healthy profit margin");
        }
    }
    if let Some(growth) = metrics.revenue_growth {
        if growth > STRONG_GROWTH_CUTOFF {
            tags.push("Strong revenue growth");
        }
    }

    CompanyEvaluation {
        code: metrics.code.clone(),
        tags,
    }
}

pub fn evaluate_companies(metrics: &[CompanyMetrics]) -> Vec<CompanyEvaluation> {
    metrics.iter().map(evaluate_company).collect()
}
