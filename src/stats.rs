//! Descriptive statistics over frame columns
//!
//! Every statistic resolves its target column by name and requires the
//! Numeric kind, except [`DataFrame::table`] which requires Categorical.
//! `Missing` cells are excluded; pairwise statistics (covariance,
//! correlation) keep only rows where both columns are non-missing.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{FrameError, Result};
use crate::model::{Cell, ColumnKind, DataFrame};

/// Five-number summary (plus the mean) of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub mean: f64,
    pub q3: f64,
    pub max: f64,
}

// ---- pure kernels over non-missing values ----

fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance, divisor n - 1. Caller guarantees `values.len() >= 2`.
fn sample_variance(values: &[f64]) -> f64 {
    let m = mean_of(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Linear-interpolation quantile (R type 7) over an already sorted,
/// non-empty slice: `h = (n - 1) * q`, interpolate between the
/// neighbouring order statistics.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values
}

fn five_number(values: Vec<f64>) -> FiveNumber {
    let mean = mean_of(&values);
    let s = sorted(values);
    FiveNumber {
        min: s[0],
        q1: quantile_sorted(&s, 0.25),
        median: quantile_sorted(&s, 0.5),
        mean,
        q3: quantile_sorted(&s, 0.75),
        max: s[s.len() - 1],
    }
}

impl DataFrame {
    /// Non-missing values of a numeric column; `EmptyColumn` when none
    /// remain.
    fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        let col = self.column_of_kind(name, ColumnKind::Numeric)?;
        let values: Vec<f64> = col.values.iter().filter_map(Cell::as_number).collect();
        if values.is_empty() {
            return Err(FrameError::EmptyColumn(name.to_string()));
        }
        Ok(values)
    }

    /// Arithmetic mean of the non-missing values
    pub fn mean(&self, name: &str) -> Result<f64> {
        Ok(mean_of(&self.numeric_values(name)?))
    }

    /// Median (`quantile(name, 0.5)`)
    pub fn median(&self, name: &str) -> Result<f64> {
        self.quantile(name, 0.5)
    }

    /// Minimum of the non-missing values
    pub fn min(&self, name: &str) -> Result<f64> {
        Ok(min_of(&self.numeric_values(name)?))
    }

    /// Maximum of the non-missing values
    pub fn max(&self, name: &str) -> Result<f64> {
        Ok(max_of(&self.numeric_values(name)?))
    }

    /// Sample variance (divisor n − 1); needs at least 2 values
    pub fn var(&self, name: &str) -> Result<f64> {
        let values = self.numeric_values(name)?;
        if values.len() < 2 {
            return Err(FrameError::InsufficientData {
                needed: 2,
                actual: values.len(),
            });
        }
        Ok(sample_variance(&values))
    }

    /// Sample standard deviation
    pub fn sd(&self, name: &str) -> Result<f64> {
        Ok(self.var(name)?.sqrt())
    }

    /// Linear-interpolation quantile for probability `q` in `[0, 1]`
    pub fn quantile(&self, name: &str, q: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&q) {
            return Err(FrameError::QuantileOutOfRange(q));
        }
        let values = self.numeric_values(name)?;
        Ok(quantile_sorted(&sorted(values), q))
    }

    /// Rows where both named columns are non-missing, as value pairs
    fn joint_values(&self, name1: &str, name2: &str) -> Result<Vec<(f64, f64)>> {
        let a = self.column_of_kind(name1, ColumnKind::Numeric)?;
        let b = self.column_of_kind(name2, ColumnKind::Numeric)?;
        let pairs: Vec<(f64, f64)> = a
            .values
            .iter()
            .zip(&b.values)
            .filter_map(|(x, y)| Some((x.as_number()?, y.as_number()?)))
            .collect();
        if pairs.len() < 2 {
            return Err(FrameError::InsufficientData {
                needed: 2,
                actual: pairs.len(),
            });
        }
        Ok(pairs)
    }

    /// Sample covariance over the jointly valid rows of two columns
    pub fn covariance(&self, name1: &str, name2: &str) -> Result<f64> {
        let pairs = self.joint_values(name1, name2)?;
        let mx = mean_of(&pairs.iter().map(|p| p.0).collect::<Vec<_>>());
        let my = mean_of(&pairs.iter().map(|p| p.1).collect::<Vec<_>>());
        let sum: f64 = pairs.iter().map(|(x, y)| (x - mx) * (y - my)).sum();
        Ok(sum / (pairs.len() - 1) as f64)
    }

    /// Pearson correlation over the jointly valid rows of two columns.
    ///
    /// When either column is constant over the jointly valid rows its
    /// standard deviation is zero and the correlation is undefined;
    /// NaN is returned in that case (matching R's `cor`).
    pub fn correlation(&self, name1: &str, name2: &str) -> Result<f64> {
        let pairs = self.joint_values(name1, name2)?;
        let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let (mx, my) = (mean_of(&xs), mean_of(&ys));
        let cov = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (x - mx) * (y - my))
            .sum::<f64>()
            / (pairs.len() - 1) as f64;
        Ok(cov / (sample_variance(&xs).sqrt() * sample_variance(&ys).sqrt()))
    }

    /// Symmetric correlation matrix for the named columns, diagonal 1.0.
    /// Row order follows `names`; rows are computed in parallel.
    pub fn correlation_matrix(&self, names: &[&str]) -> Result<Vec<Vec<f64>>> {
        // Resolve every name up front so a bad name fails the whole call
        for name in names {
            self.column_of_kind(name, ColumnKind::Numeric)?;
        }
        names
            .par_iter()
            .enumerate()
            .map(|(i, &row_name)| {
                names
                    .iter()
                    .enumerate()
                    .map(|(j, &col_name)| {
                        if i == j {
                            Ok(1.0)
                        } else {
                            self.correlation(row_name, col_name)
                        }
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect()
    }

    /// Frequency table of a categorical column, keyed by display value
    /// in first-occurrence order. A `Missing` count appears under `"NA"`
    /// when the column has missing cells.
    pub fn table(&self, name: &str) -> Result<IndexMap<String, usize>> {
        let col = self.column_of_kind(name, ColumnKind::Categorical)?;
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for cell in &col.values {
            *counts.entry(cell.display().into_owned()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Equal-width histogram over `[min, max]` with `num_bins` bins.
    /// Bins are half-open with the last bin right-inclusive, so the
    /// maximum value lands in the final bin. A degenerate range
    /// (min == max) puts every value in bin 0.
    pub fn histogram(&self, name: &str, num_bins: usize) -> Result<Vec<usize>> {
        if num_bins == 0 {
            return Err(FrameError::BadBinCount(num_bins));
        }
        let values = self.numeric_values(name)?;
        let lo = min_of(&values);
        let span = max_of(&values) - lo;
        let mut counts = vec![0usize; num_bins];
        for v in values {
            let idx = if span == 0.0 {
                0
            } else {
                let raw = ((v - lo) / span * num_bins as f64).floor() as usize;
                raw.min(num_bins - 1)
            };
            counts[idx] += 1;
        }
        Ok(counts)
    }

    /// [`histogram`](Self::histogram) with the default 10 bins
    pub fn histogram10(&self, name: &str) -> Result<Vec<usize>> {
        self.histogram(name, 10)
    }

    /// Five-number summary (plus mean) for every numeric column, in
    /// column order. All-missing columns are skipped. Columns are
    /// summarized in parallel.
    pub fn summary(&self) -> IndexMap<String, FiveNumber> {
        self.columns()
            .par_iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .filter_map(|c| {
                let values: Vec<f64> = c.values.iter().filter_map(Cell::as_number).collect();
                if values.is_empty() {
                    None
                } else {
                    Some((c.name.clone(), five_number(values)))
                }
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }
}
