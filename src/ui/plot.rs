use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Legend, Plot};

use crate::color::{reds, ColorMap};
use crate::data::aggregate::{GroupedMean, RankedPlatformMetric, SortDirection};

const CHART_HEIGHT: f32 = 320.0;
const USAGE_BLUE: Color32 = Color32::from_rgb(99, 110, 250);

// ---------------------------------------------------------------------------
// Grouped bars: academic level × gender
// ---------------------------------------------------------------------------

/// Academic level on the x axis, one bar series per gender.
pub fn usage_bar_chart(ui: &mut Ui, grouped: &GroupedMean, colors: &ColorMap) {
    let levels = unique_keys(grouped, 0);
    let genders = unique_keys(grouped, 1);
    let slot = 0.8 / genders.len().max(1) as f64;

    let charts: Vec<BarChart> = genders
        .iter()
        .enumerate()
        .map(|(gi, gender)| {
            let offset = (gi as f64 - (genders.len() as f64 - 1.0) / 2.0) * slot;
            let color = colors.color_for(gender);
            let bars = grouped
                .rows
                .iter()
                .filter(|row| row.keys.get(1) == Some(gender))
                .filter_map(|row| {
                    let li = levels.iter().position(|l| Some(l) == row.keys.first())?;
                    Some(
                        solid_bar(li as f64 + offset, row.mean, color)
                            .width(slot * 0.95)
                            .name(format!("{} / {gender}: {:.2} h", levels[li], row.mean)),
                    )
                })
                .collect();
            BarChart::new(bars).name(gender).color(color)
        })
        .collect();

    Plot::new("usage_by_level_gender")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| category_label(&levels, mark.value))
        .y_axis_label("Avg hours per day")
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Horizontal ranked bars per platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarFill {
    Solid,
    /// Sequential reds scaled over the chart's own range.
    Reds,
}

/// One horizontal bar per platform, highest mean drawn on top.
pub fn platform_bar_chart(ui: &mut Ui, id: &str, metric: &RankedPlatformMetric, fill: BarFill) {
    let (min, max) = (
        metric.min_mean().unwrap_or(0.0),
        metric.max_mean().unwrap_or(0.0),
    );
    let positions = vertical_positions(metric);

    let bars: Vec<Bar> = metric
        .rows
        .iter()
        .zip(&positions)
        .map(|(row, &y)| {
            let color = match fill {
                BarFill::Solid => USAGE_BLUE,
                BarFill::Reds => reds(row.mean, min, max),
            };
            solid_bar(y, row.mean, color)
                .width(0.7)
                .name(format!("{}: {:.2}", row.platform, row.mean))
        })
        .collect();

    let mut labels = vec![String::new(); metric.rows.len()];
    for (row, &y) in metric.rows.iter().zip(&positions) {
        labels[y as usize] = row.platform.clone();
    }

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .x_axis_label(metric.value_column.label())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn solid_bar(argument: f64, value: f64, color: Color32) -> Bar {
    Bar::new(argument, value)
        .fill(color)
        .stroke(Stroke::new(1.0, color))
}

/// Distinct values of the `idx`-th group key, in row order.
fn unique_keys(grouped: &GroupedMean, idx: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for key in grouped.rows.iter().filter_map(|r| r.keys.get(idx)) {
        if !out.contains(key) {
            out.push(key.clone());
        }
    }
    out
}

/// Axis label for an integer grid mark; blank between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Row index → y position so that the largest mean sits at the top.
fn vertical_positions(metric: &RankedPlatformMetric) -> Vec<f64> {
    let n = metric.rows.len();
    (0..n)
        .map(|i| match metric.direction {
            SortDirection::Ascending => i as f64,
            SortDirection::Descending => (n - 1 - i) as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{GroupedMeanRow, PlatformMean};
    use crate::data::model::{CategoricalColumn, NumericColumn};

    fn metric(direction: SortDirection) -> RankedPlatformMetric {
        RankedPlatformMetric {
            value_column: NumericColumn::AddictedScore,
            direction,
            rows: vec![
                PlatformMean { platform: "A".into(), mean: 1.0 },
                PlatformMean { platform: "B".into(), mean: 2.0 },
                PlatformMean { platform: "C".into(), mean: 3.0 },
            ],
        }
    }

    #[test]
    fn category_labels_only_on_integer_marks() {
        let labels = vec!["High School".to_string(), "Graduate".to_string()];
        assert_eq!(category_label(&labels, 0.0), "High School");
        assert_eq!(category_label(&labels, 1.0), "Graduate");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn first_row_of_descending_ranking_is_on_top() {
        assert_eq!(vertical_positions(&metric(SortDirection::Descending)), vec![2.0, 1.0, 0.0]);
        assert_eq!(vertical_positions(&metric(SortDirection::Ascending)), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn unique_keys_follow_row_order() {
        let grouped = GroupedMean {
            group_columns: vec![CategoricalColumn::AcademicLevel, CategoricalColumn::Gender],
            value_column: NumericColumn::AvgDailyUsageHours,
            rows: vec![
                GroupedMeanRow { keys: vec!["Graduate".into(), "Female".into()], mean: 4.0 },
                GroupedMeanRow { keys: vec!["Graduate".into(), "Male".into()], mean: 3.0 },
                GroupedMeanRow { keys: vec!["High School".into(), "Male".into()], mean: 5.0 },
            ],
        };
        assert_eq!(unique_keys(&grouped, 0), vec!["Graduate", "High School"]);
        assert_eq!(unique_keys(&grouped, 1), vec!["Female", "Male"]);
        assert!(unique_keys(&grouped, 2).is_empty());
    }
}
