use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::Dimension;
use crate::data::model::DatasetSummary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("⚙ Filters");
    ui.separator();

    // Shared handle so the loop below can mutate `state`.
    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                let options = dim.options(&dataset);
                let n_selected = state.selection.get(dim).len();
                let header_text = format!("{}  ({n_selected}/{})", dim.title(), options.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.title())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dim);
                            }
                        });

                        if state.selection.get(dim).is_empty() {
                            ui.weak("Nothing selected: showing all");
                        }

                        for value in options {
                            let mut checked = state.selection.get(dim).contains(value);
                            if ui.checkbox(&mut checked, value.as_str()).changed() {
                                state.toggle(dim, value);
                            }
                        }
                    });
            }

            ui.separator();
            dataset_info(ui, &dataset.summary());
        });
}

/// Shape of the unfiltered dataset.
fn dataset_info(ui: &mut Ui, summary: &DatasetSummary) {
    ui.heading("📄 Dataset");
    egui::Grid::new("dataset_info")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Rows");
            ui.monospace(summary.row_count.to_string());
            ui.end_row();
            ui.label("Columns");
            ui.monospace(summary.column_count.to_string());
            ui.end_row();
            ui.label("Countries");
            ui.monospace(summary.country_count.to_string());
            ui.end_row();
        });

    egui::CollapsingHeader::new("Column list")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            for col in &summary.columns {
                ui.monospace(col);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.view.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export view…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let visible = state.view.as_ref().map_or(0, |v| v.filtered_count);
            ui.label(format!("{} records loaded, {visible} visible", ds.len()));
            ui.separator();
        }
        let source = state.dataset.as_ref().map_or(&state.source, |ds| &ds.source);
        ui.weak(source.display().to_string());

        if let Some(msg) = &state.notice {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::LIGHT_GREEN));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.notice = None;
        state.open(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(view) = &state.view else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard view")
        .set_file_name("dashboard.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match crate::export::write_view(view, &path) {
            Ok(()) => state.notice = Some(format!("Exported to {}", path.display())),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.notice = Some(format!("Export failed: {e:#}"));
            }
        }
    }
}
