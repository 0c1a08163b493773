use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Canonical schema
// ---------------------------------------------------------------------------

/// Canonical column names, in the positional order the source file must follow.
/// The source header is discarded; these names replace it.
pub const COLUMN_NAMES: [&str; 12] = [
    "student_id",
    "age",
    "gender",
    "academic_level",
    "country",
    "avg_daily_usage_hours",
    "most_used_platform",
    "affects_academic_performance",
    "sleep_hours_per_night",
    "mental_health_score",
    "conflicts_over_social_media",
    "addicted_score",
];

// ---------------------------------------------------------------------------
// Record – one row of the survey
// ---------------------------------------------------------------------------

/// One respondent. Field order matches [`COLUMN_NAMES`]; the CSV reader
/// deserializes by position, so the order here is load-bearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub student_id: String,
    pub age: u32,
    pub gender: String,
    pub academic_level: String,
    pub country: String,
    pub avg_daily_usage_hours: f64,
    pub most_used_platform: String,
    pub affects_academic_performance: String,
    pub sleep_hours_per_night: f64,
    pub mental_health_score: f64,
    pub conflicts_over_social_media: i64,
    pub addicted_score: f64,
}

// ---------------------------------------------------------------------------
// Column handles
// ---------------------------------------------------------------------------

/// Columns that hold category labels (usable as group or filter keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    Gender,
    AcademicLevel,
    Country,
    MostUsedPlatform,
}

impl CategoricalColumn {
    pub fn name(self) -> &'static str {
        match self {
            CategoricalColumn::Gender => "gender",
            CategoricalColumn::AcademicLevel => "academic_level",
            CategoricalColumn::Country => "country",
            CategoricalColumn::MostUsedPlatform => "most_used_platform",
        }
    }

    /// Column heading for tables.
    pub fn title(self) -> &'static str {
        match self {
            CategoricalColumn::Gender => "Gender",
            CategoricalColumn::AcademicLevel => "Academic level",
            CategoricalColumn::Country => "Country",
            CategoricalColumn::MostUsedPlatform => "Platform",
        }
    }

    pub fn value(self, record: &Record) -> &str {
        match self {
            CategoricalColumn::Gender => &record.gender,
            CategoricalColumn::AcademicLevel => &record.academic_level,
            CategoricalColumn::Country => &record.country,
            CategoricalColumn::MostUsedPlatform => &record.most_used_platform,
        }
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Columns that hold numbers (usable as aggregate values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    AvgDailyUsageHours,
    SleepHoursPerNight,
    MentalHealthScore,
    AddictedScore,
}

impl NumericColumn {
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::AvgDailyUsageHours => "avg_daily_usage_hours",
            NumericColumn::SleepHoursPerNight => "sleep_hours_per_night",
            NumericColumn::MentalHealthScore => "mental_health_score",
            NumericColumn::AddictedScore => "addicted_score",
        }
    }

    /// Axis / legend label.
    pub fn label(self) -> &'static str {
        match self {
            NumericColumn::AvgDailyUsageHours => "Avg daily usage (hours)",
            NumericColumn::SleepHoursPerNight => "Sleep per night (hours)",
            NumericColumn::MentalHealthScore => "Mental health score",
            NumericColumn::AddictedScore => "Addicted score (1-10)",
        }
    }

    /// Compact label for heatmap axes.
    pub fn short_label(self) -> &'static str {
        match self {
            NumericColumn::AvgDailyUsageHours => "usage",
            NumericColumn::SleepHoursPerNight => "sleep",
            NumericColumn::MentalHealthScore => "mental health",
            NumericColumn::AddictedScore => "addiction",
        }
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            NumericColumn::AvgDailyUsageHours => record.avg_daily_usage_hours,
            NumericColumn::SleepHoursPerNight => record.sleep_hours_per_night,
            NumericColumn::MentalHealthScore => record.mental_health_score,
            NumericColumn::AddictedScore => record.addicted_score,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Distinct values of `column`, in order of first appearance.
pub fn distinct_values(records: &[Record], column: CategoricalColumn) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| column.value(r))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Dataset – the loaded, immutable table
// ---------------------------------------------------------------------------

/// Shape of the unfiltered table, shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub country_count: usize,
    pub columns: Vec<String>,
}

/// The full parsed dataset with pre-computed filter options.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Source identifier the table was loaded from.
    pub source: PathBuf,
    pub records: Vec<Record>,
    /// Sorted ascending.
    pub countries: Vec<String>,
    /// First-appearance order.
    pub academic_levels: Vec<String>,
    /// First-appearance order.
    pub genders: Vec<String>,
}

impl Dataset {
    pub fn new(source: impl Into<PathBuf>, records: Vec<Record>) -> Self {
        let countries: BTreeSet<String> = records.iter().map(|r| r.country.clone()).collect();
        let academic_levels = distinct_values(&records, CategoricalColumn::AcademicLevel);
        let genders = distinct_values(&records, CategoricalColumn::Gender);
        Dataset {
            source: source.into(),
            records,
            countries: countries.into_iter().collect(),
            academic_levels,
            genders,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            row_count: self.records.len(),
            column_count: COLUMN_NAMES.len(),
            country_count: self.countries.len(),
            columns: COLUMN_NAMES.iter().map(|c| c.to_string()).collect(),
        }
    }
}
