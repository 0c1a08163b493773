//! Grouped means, Pearson correlation and per-platform rankings over a
//! filtered table. Every function assumes a non-empty slice; the filter stage
//! guarantees it.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::model::{CategoricalColumn, NumericColumn, Record};

/// Round to two decimals, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// ---------------------------------------------------------------------------
// Grouped mean
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedMeanRow {
    /// One value per group column, same order.
    pub keys: Vec<String>,
    /// Rounded to two decimals.
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedMean {
    pub group_columns: Vec<CategoricalColumn>,
    pub value_column: NumericColumn,
    /// Ascending by key tuple.
    pub rows: Vec<GroupedMeanRow>,
}

pub fn grouped_mean(
    records: &[Record],
    group_columns: &[CategoricalColumn],
    value_column: NumericColumn,
) -> GroupedMean {
    let mut groups: BTreeMap<Vec<&str>, (f64, usize)> = BTreeMap::new();
    for r in records {
        let key: Vec<&str> = group_columns.iter().map(|c| c.value(r)).collect();
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += value_column.value(r);
        entry.1 += 1;
    }

    let rows = groups
        .into_iter()
        .map(|(key, (sum, count))| GroupedMeanRow {
            keys: key.into_iter().map(str::to_string).collect(),
            mean: round2(sum / count as f64),
        })
        .collect();

    GroupedMean {
        group_columns: group_columns.to_vec(),
        value_column,
        rows,
    }
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// A Pearson coefficient, or the marker for a zero-variance column.
/// Serializes as a number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Correlation {
    Value(f64),
    Undefined,
}

/// Qualitative band of |r|.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl Strength {
    fn of(r: f64) -> Self {
        match r.abs() {
            a if a < 0.2 => Strength::VeryWeak,
            a if a < 0.4 => Strength::Weak,
            a if a < 0.6 => Strength::Moderate,
            a if a < 0.8 => Strength::Strong,
            _ => Strength::VeryStrong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::VeryWeak => "very weak",
            Strength::Weak => "weak",
            Strength::Moderate => "moderate",
            Strength::Strong => "strong",
            Strength::VeryStrong => "very strong",
        }
    }
}

impl Correlation {
    pub fn value(self) -> Option<f64> {
        match self {
            Correlation::Value(v) => Some(v),
            Correlation::Undefined => None,
        }
    }

    /// Two decimals, or `n/a`.
    pub fn format(self) -> String {
        match self {
            Correlation::Value(v) => format!("{v:.2}"),
            Correlation::Undefined => "n/a".to_string(),
        }
    }

    /// e.g. "strong negative". `None` when undefined.
    pub fn strength(self) -> Option<String> {
        let r = self.value()?;
        let band = Strength::of(r);
        let direction = if r < 0.0 { "negative" } else { "positive" };
        Some(format!("{} {direction}", band.label()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Labels of both axes.
    pub columns: Vec<NumericColumn>,
    /// Row-major, `values[i][j]` is corr(columns[i], columns[j]).
    pub values: Vec<Vec<Correlation>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: NumericColumn, col: NumericColumn) -> Option<Correlation> {
        let i = self.columns.iter().position(|c| *c == row)?;
        let j = self.columns.iter().position(|c| *c == col)?;
        Some(self.values[i][j])
    }
}

pub fn correlation_matrix(records: &[Record], columns: [NumericColumn; 3]) -> CorrelationMatrix {
    let series: Vec<Vec<f64>> = columns
        .iter()
        .map(|c| records.iter().map(|r| c.value(r)).collect())
        .collect();

    let n = columns.len();
    let mut values = vec![vec![Correlation::Undefined; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i], &series[j]);
            let cell = match r {
                Some(_) if i == j => Correlation::Value(1.0),
                Some(v) => Correlation::Value(v),
                None => Correlation::Undefined,
            };
            values[i][j] = cell;
            values[j][i] = cell;
        }
    }

    CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    }
}

/// Pearson's r; `None` when either series has zero variance.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    // Checked on the raw values: the mean of a constant series is not always
    // exactly that constant, so the sums of squares below can miss it.
    if is_constant(xs) || is_constant(ys) {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// True for an empty series too.
fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

// ---------------------------------------------------------------------------
// Platform rankings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformMean {
    pub platform: String,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlatformMetric {
    pub value_column: NumericColumn,
    pub direction: SortDirection,
    pub rows: Vec<PlatformMean>,
}

impl RankedPlatformMetric {
    pub fn max_mean(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.mean).reduce(f64::max)
    }

    pub fn min_mean(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.mean).reduce(f64::min)
    }
}

/// Mean of `value_column` per platform, sorted by mean. Ties keep the order in
/// which platforms first appear in `records`.
pub fn ranked_platform_metric(
    records: &[Record],
    value_column: NumericColumn,
    direction: SortDirection,
) -> RankedPlatformMetric {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, f64, usize)> = Vec::new();
    for r in records {
        let platform = CategoricalColumn::MostUsedPlatform.value(r);
        let slot = *index.entry(platform).or_insert_with(|| {
            sums.push((platform, 0.0, 0));
            sums.len() - 1
        });
        sums[slot].1 += value_column.value(r);
        sums[slot].2 += 1;
    }

    let mut rows: Vec<PlatformMean> = sums
        .into_iter()
        .map(|(platform, sum, count)| PlatformMean {
            platform: platform.to_string(),
            mean: sum / count as f64,
        })
        .collect();

    // `sort_by` is stable.
    match direction {
        SortDirection::Ascending => rows.sort_by(|a, b| a.mean.total_cmp(&b.mean)),
        SortDirection::Descending => rows.sort_by(|a, b| b.mean.total_cmp(&a.mean)),
    }

    RankedPlatformMetric {
        value_column,
        direction,
        rows,
    }
}
