use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::color::ColorMap;
use crate::data::aggregate::Correlation;
use crate::data::view::DashboardView;
use crate::state::Status;
use crate::ui::heatmap::correlation_heatmap;
use crate::ui::plot::{platform_bar_chart, usage_bar_chart, BarFill};
use crate::ui::tables::{grouped_mean_table, records_table};

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Either the full dashboard or the reason there is none.
pub fn central(
    ui: &mut Ui,
    view: Option<&DashboardView>,
    status: Option<&Status>,
    colors: &ColorMap,
) {
    match (status, view) {
        (Some(Status::LoadFailed(msg)), _) => {
            ui.heading(RichText::new("Could not load data").color(Color32::RED));
            ui.label(RichText::new(msg).color(Color32::RED));
            ui.label("Use File → Open… to pick another file.");
        }
        (Some(Status::NoMatches), _) => {
            ui.heading(RichText::new("No matching records").color(Color32::YELLOW));
            ui.label("No rows match the selected filters. Adjust them in the side panel.");
        }
        (None, Some(view)) => dashboard(ui, view, colors),
        (None, None) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a survey file to begin  (File → Open…)");
            });
        }
    }
}

fn dashboard(ui: &mut Ui, view: &DashboardView, colors: &ColorMap) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("📊 Student Social-Media Addiction Dashboard").size(26.0));
            ui.separator();

            ui.collapsing("❓ Analysis goals", |ui: &mut Ui| {
                ui.label("• Demographics: daily usage by academic level and gender");
                ui.label("• Wellbeing: does usage track sleep and mental-health score?");
                ui.label("• Platforms: where the most time goes, and which are most addictive");
            });
            ui.add_space(12.0);

            // ---- Section 1: usage by level and gender ----
            ui.heading("⏳ Average daily usage");
            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].strong("By academic level and gender");
                grouped_mean_table(&mut cols[0], &view.usage_by_level_gender);
                cols[0].add_space(6.0);
                cols[0].label(
                    "Compare usage between genders within each academic level.",
                );
                usage_bar_chart(&mut cols[1], &view.usage_by_level_gender, colors);
            });
            ui.separator();

            // ---- Section 2: correlation ----
            ui.heading("🔗 Usage, sleep and mental health");
            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].strong("Correlation heatmap");
                correlation_heatmap(&mut cols[0], &view.correlation);

                cols[1].strong("Interpretation");
                cols[1].label("Pearson coefficients range from -1 to 1.");
                cols[1].add_space(6.0);
                cols[1].label(interpretation("Usage vs sleep", "sleep", view.usage_vs_sleep));
                cols[1].add_space(6.0);
                cols[1].label(interpretation(
                    "Usage vs mental health",
                    "mental-health score",
                    view.usage_vs_mental_health,
                ));
            });
            ui.separator();

            // ---- Section 3: platforms ----
            ui.heading("📱 Platforms");
            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].strong("Most time spent (avg hours per day)");
                platform_bar_chart(
                    &mut cols[0],
                    "usage_by_platform",
                    &view.usage_by_platform,
                    BarFill::Solid,
                );
                cols[1].strong("Addiction score (higher = more addictive)");
                platform_bar_chart(
                    &mut cols[1],
                    "addiction_by_platform",
                    &view.addiction_by_platform,
                    BarFill::Reds,
                );
            });
            ui.label(
                "Platforms near the top of both charts take the most time and carry the highest \
                 addiction scores.",
            );
            ui.separator();

            ui.collapsing(format!("Filtered records ({})", view.filtered_count), |ui: &mut Ui| {
                records_table(ui, view.filtered.records());
            });
        });
}

/// Narrative line for one coefficient, driven by its sign and size.
fn interpretation(title: &str, other: &str, r: Correlation) -> String {
    match (r.value(), r.strength()) {
        (Some(v), Some(strength)) => {
            let trend = if v < 0.0 { "lower" } else { "higher" };
            format!(
                "{title}: {} ({strength}). More time on social media goes with {trend} {other}.",
                r.format()
            )
        }
        _ => format!(
            "{title}: {}. One of the columns does not vary within the current selection.",
            r.format()
        ),
    }
}
