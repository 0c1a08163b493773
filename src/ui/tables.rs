use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::GroupedMean;
use crate::data::model::{Record, COLUMN_NAMES};

const ROW_HEIGHT: f32 = 20.0;

/// Group keys followed by the rounded mean.
pub fn grouped_mean_table(ui: &mut Ui, grouped: &GroupedMean) {
    ui.push_id("grouped_mean_table", |ui: &mut Ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center));
        for _ in &grouped.group_columns {
            table = table.column(Column::auto().at_least(90.0));
        }
        table = table.column(Column::remainder());

        table
            .header(ROW_HEIGHT, |mut header| {
                for col in &grouped.group_columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col.title());
                    });
                }
                header.col(|ui: &mut Ui| {
                    ui.strong(grouped.value_column.label());
                });
            })
            .body(|mut body| {
                for row in &grouped.rows {
                    body.row(ROW_HEIGHT, |mut cells| {
                        for key in &row.keys {
                            cells.col(|ui: &mut Ui| {
                                ui.label(key);
                            });
                        }
                        cells.col(|ui: &mut Ui| {
                            ui.monospace(format!("{:.2}", row.mean));
                        });
                    });
                }
            });
    });
}

/// Scrollable preview of the filtered records, all twelve columns.
pub fn records_table(ui: &mut Ui, records: &[Record]) {
    ui.push_id("records_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(320.0)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(48.0), COLUMN_NAMES.len())
            .header(ROW_HEIGHT, |mut header| {
                for name in COLUMN_NAMES {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let record = &records[row.index()];
                    for cell in record_cells(record) {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

/// Display text for each column, in [`COLUMN_NAMES`] order.
fn record_cells(r: &Record) -> [String; 12] {
    [
        r.student_id.clone(),
        r.age.to_string(),
        r.gender.clone(),
        r.academic_level.clone(),
        r.country.clone(),
        format!("{:.1}", r.avg_daily_usage_hours),
        r.most_used_platform.clone(),
        r.affects_academic_performance.clone(),
        format!("{:.1}", r.sleep_hours_per_night),
        format!("{}", r.mental_health_score),
        r.conflicts_over_social_media.to_string(),
        format!("{}", r.addicted_score),
    ]
}
