use eframe::egui::{pos2, vec2, Align2, Color32, FontId, Rect, Sense, Ui};

use crate::color::{coolwarm, text_on};
use crate::data::aggregate::{Correlation, CorrelationMatrix};

const LABEL_WIDTH: f32 = 110.0;
const AXIS_HEIGHT: f32 = 28.0;
const LEGEND_HEIGHT: f32 = 14.0;

/// Annotated correlation heatmap. Undefined cells are drawn dark grey with `n/a`.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.columns.len();
    if n == 0 {
        return;
    }
    let cell = ((ui.available_width() - LABEL_WIDTH) / n as f32).clamp(56.0, 110.0);
    let grid_size = cell * n as f32;
    let size = vec2(
        LABEL_WIDTH + grid_size,
        grid_size + AXIS_HEIGHT + LEGEND_HEIGHT + 20.0,
    );
    let (rect, _response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();
    let origin = rect.min + vec2(LABEL_WIDTH, 0.0);

    for (i, row_col) in matrix.columns.iter().enumerate() {
        painter.text(
            pos2(origin.x - 8.0, origin.y + cell * (i as f32 + 0.5)),
            Align2::RIGHT_CENTER,
            row_col.short_label(),
            FontId::proportional(13.0),
            text_color,
        );

        for (j, value) in matrix.values[i].iter().enumerate() {
            let cell_rect = Rect::from_min_size(
                pos2(origin.x + cell * j as f32, origin.y + cell * i as f32),
                vec2(cell, cell),
            )
            .shrink(1.0);
            let fill = cell_color(*value);
            painter.rect_filled(cell_rect, 2.0, fill);
            painter.text(
                cell_rect.center(),
                Align2::CENTER_CENTER,
                value.format(),
                FontId::monospace(14.0),
                text_on(fill),
            );
        }
    }

    for (j, col) in matrix.columns.iter().enumerate() {
        painter.text(
            pos2(origin.x + cell * (j as f32 + 0.5), origin.y + grid_size + 6.0),
            Align2::CENTER_TOP,
            col.short_label(),
            FontId::proportional(13.0),
            text_color,
        );
    }

    // Colour bar from -1 to 1.
    let legend_top = origin.y + grid_size + AXIS_HEIGHT;
    let steps = 40;
    let step_w = grid_size / steps as f32;
    for s in 0..steps {
        let r = -1.0 + 2.0 * (s as f64 + 0.5) / steps as f64;
        painter.rect_filled(
            Rect::from_min_size(
                pos2(origin.x + step_w * s as f32, legend_top),
                vec2(step_w + 0.5, LEGEND_HEIGHT),
            ),
            0.0,
            coolwarm(r),
        );
    }
    for (label, align, x) in [
        ("-1", Align2::LEFT_TOP, origin.x),
        ("0", Align2::CENTER_TOP, origin.x + grid_size / 2.0),
        ("1", Align2::RIGHT_TOP, origin.x + grid_size),
    ] {
        painter.text(
            pos2(x, legend_top + LEGEND_HEIGHT + 2.0),
            align,
            label,
            FontId::proportional(11.0),
            text_color,
        );
    }
}

fn cell_color(value: Correlation) -> Color32 {
    match value {
        Correlation::Value(r) => coolwarm(r),
        Correlation::Undefined => Color32::DARK_GRAY,
    }
}
