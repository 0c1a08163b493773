use serde::Serialize;

use super::aggregate::{
    correlation_matrix, grouped_mean, ranked_platform_metric, Correlation, CorrelationMatrix,
    GroupedMean, RankedPlatformMetric, SortDirection,
};
use super::filter::{filter, FilterError, FilterSelection, FilteredTable};
use super::model::{CategoricalColumn, Dataset, DatasetSummary, NumericColumn};

/// Numeric columns shown in the correlation heatmap, in axis order.
pub const CORRELATION_COLUMNS: [NumericColumn; 3] = [
    NumericColumn::AvgDailyUsageHours,
    NumericColumn::SleepHoursPerNight,
    NumericColumn::MentalHealthScore,
];

/// Everything the dashboard draws for one filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Shape of the unfiltered dataset.
    pub summary: DatasetSummary,
    #[serde(skip)]
    pub filtered: FilteredTable,
    pub filtered_count: usize,
    pub usage_by_level_gender: GroupedMean,
    pub correlation: CorrelationMatrix,
    pub usage_vs_sleep: Correlation,
    pub usage_vs_mental_health: Correlation,
    /// Highest usage first.
    pub usage_by_platform: RankedPlatformMetric,
    /// Lowest score first, so a horizontal chart puts the most addictive on top.
    pub addiction_by_platform: RankedPlatformMetric,
}

/// Run filter → aggregate for one selection. Pure; called again on every change.
pub fn render(
    dataset: &Dataset,
    selection: &FilterSelection,
) -> Result<DashboardView, FilterError> {
    let filtered = filter(&dataset.records, selection)?;
    let rows = filtered.records();

    let usage_by_level_gender = grouped_mean(
        rows,
        &[CategoricalColumn::AcademicLevel, CategoricalColumn::Gender],
        NumericColumn::AvgDailyUsageHours,
    );
    let correlation = correlation_matrix(rows, CORRELATION_COLUMNS);
    let usage_vs_sleep = correlation
        .get(NumericColumn::AvgDailyUsageHours, NumericColumn::SleepHoursPerNight)
        .unwrap_or(Correlation::Undefined);
    let usage_vs_mental_health = correlation
        .get(NumericColumn::AvgDailyUsageHours, NumericColumn::MentalHealthScore)
        .unwrap_or(Correlation::Undefined);

    let usage_by_platform = ranked_platform_metric(
        rows,
        NumericColumn::AvgDailyUsageHours,
        SortDirection::Descending,
    );
    let addiction_by_platform =
        ranked_platform_metric(rows, NumericColumn::AddictedScore, SortDirection::Ascending);

    Ok(DashboardView {
        summary: dataset.summary(),
        filtered_count: filtered.len(),
        filtered,
        usage_by_level_gender,
        correlation,
        usage_vs_sleep,
        usage_vs_mental_health,
        usage_by_platform,
        addiction_by_platform,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn dataset() -> Dataset {
        Dataset::new(
            "survey.csv",
            vec![
                record("1", "US", "High School", "Male", "TikTok", 2.0),
                record("2", "US", "High School", "Female", "Instagram", 4.0),
                record("3", "India", "Undergraduate", "Female", "TikTok", 6.0),
                record("4", "India", "Undergraduate", "Male", "YouTube", 5.0),
            ],
        )
    }

    #[test]
    fn render_with_no_restriction_covers_every_row() {
        let ds = dataset();
        let view = render(&ds, &FilterSelection::default()).unwrap();
        assert_eq!(view.filtered_count, 4);
        assert_eq!(view.summary.row_count, 4);
        assert_eq!(view.usage_by_level_gender.rows.len(), 4);

        let usage: Vec<(&str, f64)> = view
            .usage_by_platform
            .rows
            .iter()
            .map(|r| (r.platform.as_str(), r.mean))
            .collect();
        assert_eq!(usage, vec![("YouTube", 5.0), ("TikTok", 4.0), ("Instagram", 4.0)]);

        assert_eq!(view.addiction_by_platform.direction, SortDirection::Ascending);
        let addiction: Vec<&str> = view
            .addiction_by_platform
            .rows
            .iter()
            .map(|r| r.platform.as_str())
            .collect();
        assert_eq!(addiction, vec!["TikTok", "Instagram", "YouTube"]);
    }

    #[test]
    fn render_reads_correlations_out_of_the_matrix() {
        let ds = dataset();
        let view = render(&ds, &FilterSelection::default()).unwrap();
        assert_eq!(
            Some(view.usage_vs_sleep),
            view.correlation
                .get(NumericColumn::AvgDailyUsageHours, NumericColumn::SleepHoursPerNight)
        );
        // Fixture sleep and mental health fall linearly with usage.
        assert_eq!(view.usage_vs_sleep.format(), "-1.00");
        assert_eq!(view.usage_vs_mental_health.format(), "-1.00");
    }

    #[test]
    fn render_stops_on_empty_result() {
        let ds = dataset();
        let selection = FilterSelection {
            countries: ["India".to_string()].into(),
            academic_levels: ["High School".to_string()].into(),
            ..Default::default()
        };
        assert_eq!(render(&ds, &selection).unwrap_err(), FilterError::EmptyResult);
    }

    #[test]
    fn summary_ignores_the_filter() {
        let ds = dataset();
        let selection = FilterSelection {
            countries: ["US".to_string()].into(),
            ..Default::default()
        };
        let view = render(&ds, &selection).unwrap();
        assert_eq!(view.filtered_count, 2);
        assert_eq!(view.summary.row_count, 4);
        assert_eq!(view.summary.country_count, 2);
    }

    #[test]
    fn export_json_omits_rows_and_nulls_undefined() {
        let ds = Dataset::new(
            "flat.csv",
            vec![record("1", "US", "High School", "Male", "TikTok", 2.0)],
        );
        let view = render(&ds, &FilterSelection::default()).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("filtered").is_none());
        assert_eq!(json["filtered_count"], 1);
        assert!(json["usage_vs_sleep"].is_null());
        assert_eq!(json["usage_by_platform"]["direction"], "descending");
        assert_eq!(json["usage_by_level_gender"]["group_columns"][0], "academic_level");
    }
}
