//! Variance decomposition of standardized returns.
//!
//! Builds the correlation matrix of the standardized return matrix and
//! diagonalizes it with cyclic Jacobi rotations. Components are ranked by
//! explained variance; the result also carries the elbow index and the
//! minimal component count reaching 95% cumulative variance.

use crate::domain::error::AnalyzerError;
use crate::domain::returns::StandardizedReturnMatrix;

/// Cumulative explained-variance target for the retained-component count.
pub const VARIANCE_THRESHOLD: f64 = 0.95;

/// Elbow rule: first index where the marginal ratio drop falls below this
/// fraction of the leading ratio.
pub const ELBOW_DROP_FRACTION: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct Component {
    /// Loadings over instruments, in matrix column order. Unit length.
    pub vector: Vec<f64>,
    pub explained_variance_ratio: f64,
}

/// Components sorted by descending explained variance. Ratios are
/// non-increasing and sum to at most 1.
#[derive(Debug, Clone)]
pub struct ComponentSet {
    pub components: Vec<Component>,
}

impl ComponentSet {
    pub fn ratios(&self) -> Vec<f64> {
        self.components
            .iter()
            .map(|c| c.explained_variance_ratio)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Decomposition {
    pub components: ComponentSet,
    /// Component index where the scree curve flattens.
    pub elbow_index: usize,
    /// Minimal count of components with cumulative ratio >= 95%.
    pub threshold_count: usize,
}

pub fn decompose(matrix: &StandardizedReturnMatrix) -> Result<Decomposition, AnalyzerError> {
    let t = matrix.observations();
    let n = matrix.instruments();
    if t < 2 {
        return Err(AnalyzerError::Dimension {
            observations: t,
            minimum: 2,
        });
    }

    for (row, values) in matrix.rows.iter().enumerate() {
        for (col, v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(AnalyzerError::data(format!(
                    "non-finite standardized return for {} on {}",
                    matrix.codes[col], matrix.dates[row]
                )));
            }
        }
    }

    let corr = correlation_matrix(matrix);
    let (mut values, vectors) = symmetric_eigen(&corr);

    // Rounding can push near-zero eigenvalues slightly negative.
    for v in values.iter_mut() {
        if *v < 0.0 {
            *v = 0.0;
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[b].partial_cmp(&values[a]).unwrap_or(std::cmp::Ordering::Equal));

    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Err(AnalyzerError::data("degenerate correlation matrix"));
    }

    let kept = n.min(t);
    let components = order
        .iter()
        .take(kept)
        .map(|&idx| Component {
            vector: (0..n).map(|row| vectors[row][idx]).collect(),
            explained_variance_ratio: values[idx] / total,
        })
        .collect();

    let set = ComponentSet { components };
    let ratios = set.ratios();

    Ok(Decomposition {
        elbow_index: elbow_index(&ratios),
        threshold_count: threshold_count(&ratios, VARIANCE_THRESHOLD),
        components: set,
    })
}

/// Sample correlation matrix of an already standardized matrix.
fn correlation_matrix(matrix: &StandardizedReturnMatrix) -> Vec<Vec<f64>> {
    let n = matrix.instruments();
    let t = matrix.observations() as f64;
    let mut corr = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in i..n {
            let sum: f64 = matrix.rows.iter().map(|row| row[i] * row[j]).sum();
            let c = sum / (t - 1.0);
            corr[i][j] = c;
            corr[j][i] = c;
        }
    }

    corr
}

/// Eigendecomposition of a symmetric matrix via cyclic Jacobi sweeps.
///
/// Returns (eigenvalues, eigenvectors); eigenvector `k` is column `k` of
/// the returned matrix. Unsorted.
fn symmetric_eigen(matrix: &[Vec<f64>]) -> (Vec<f64>, Vec<Vec<f64>>) {
    const MAX_SWEEPS: usize = 64;
    const TOLERANCE: f64 = 1e-12;

    let n = matrix.len();
    let mut a: Vec<Vec<f64>> = matrix.to_vec();
    let mut v = vec![vec![0.0; n]; n];
    for (i, row) in v.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .map(|(i, j)| a[i][j] * a[i][j])
            .sum();
        if off.sqrt() < TOLERANCE {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                if a[p][q].abs() < TOLERANCE {
                    continue;
                }

                let diff = a[q][q] - a[p][p];
                let t = if diff.abs() < TOLERANCE {
                    if a[p][q] > 0.0 { 1.0 } else { -1.0 }
                } else {
                    let phi = diff / (2.0 * a[p][q]);
                    1.0 / (phi + phi.signum() * (1.0 + phi * phi).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;

                let app = a[p][p];
                let aqq = a[q][q];
                let apq = a[p][q];
                a[p][p] = c * c * app - 2.0 * s * c * apq + s * s * aqq;
                a[q][q] = s * s * app + 2.0 * s * c * apq + c * c * aqq;
                a[p][q] = 0.0;
                a[q][p] = 0.0;

                for i in 0..n {
                    if i != p && i != q {
                        let aip = a[i][p];
                        let aiq = a[i][q];
                        a[i][p] = c * aip - s * aiq;
                        a[p][i] = a[i][p];
                        a[i][q] = s * aip + c * aiq;
                        a[q][i] = a[i][q];
                    }
                }

                for row in v.iter_mut() {
                    let vip = row[p];
                    let viq = row[q];
                    row[p] = c * vip - s * viq;
                    row[q] = s * vip + c * viq;
                }
            }
        }
    }

    let values = (0..n).map(|i| a[i][i]).collect();
    (values, v)
}

/// First index where the marginal explained-variance gain drops below
/// `ELBOW_DROP_FRACTION` of the leading ratio. Falls back to the full
/// component count when the curve never flattens.
fn elbow_index(ratios: &[f64]) -> usize {
    if ratios.is_empty() {
        return 0;
    }
    let cutoff = ELBOW_DROP_FRACTION * ratios[0];
    for i in 1..ratios.len() {
        if ratios[i - 1] - ratios[i] < cutoff {
            return i;
        }
    }
    ratios.len()
}

/// Minimal count of leading components whose cumulative ratio reaches the
/// threshold; the full count when the sum never gets there.
fn threshold_count(ratios: &[f64], threshold: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, r) in ratios.iter().enumerate() {
        cumulative += r;
        if cumulative >= threshold {
            return i + 1;
        }
    }
    ratios.len()
}
