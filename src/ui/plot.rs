use eframe::egui::{Color32, Ui};
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, PlotUi, Points, Polygon};

use crate::data::select::Corner;
use crate::data::series::{self, SeriesPoint};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Series plot (central panel)
// ---------------------------------------------------------------------------

/// Render the time-series plot in the central panel.
pub fn series_plot(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = state.current_view() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV (File → Open…), pick columns, then Plot");
        });
        return;
    };

    let parameter = state.plotted_parameter.clone().unwrap_or_default();
    let armed = state.selector.is_armed();

    // While armed, the drag gesture belongs to the rectangle selection,
    // so the plot's own pan and boxed zoom are turned off.
    Plot::new("series_plot")
        .x_axis_formatter(|mark, _range| series::format_axis_timestamp(mark.value))
        .y_axis_label(parameter.clone())
        .allow_drag(!armed)
        .allow_boxed_zoom(!armed)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            draw_series(plot_ui, &view, &parameter);
            draw_selection_highlight(plot_ui, &view, state);
            if armed {
                handle_selection_drag(plot_ui, &view, state);
            }
        });
}

/// Line segments (split at gaps) plus markers for every present value.
fn draw_series(plot_ui: &mut PlotUi, view: &[SeriesPoint], parameter: &str) {
    let mut segment: Vec<[f64; 2]> = Vec::new();
    let mut markers: Vec<[f64; 2]> = Vec::new();

    let flush = |segment: &mut Vec<[f64; 2]>, plot_ui: &mut PlotUi| {
        if segment.len() > 1 {
            let line = Line::new(PlotPoints::from(std::mem::take(segment)))
                .color(Color32::LIGHT_BLUE)
                .width(1.5);
            plot_ui.line(line);
        } else {
            segment.clear();
        }
    };

    for point in view {
        match point.value {
            Some(v) => {
                let xy = [series::ts_to_axis(point.ts), v];
                segment.push(xy);
                markers.push(xy);
            }
            // Gap: missing values break the line.
            None => flush(&mut segment, plot_ui),
        }
    }
    flush(&mut segment, plot_ui);

    if !markers.is_empty() {
        plot_ui.points(
            Points::new(PlotPoints::from(markers))
                .name(parameter)
                .color(Color32::LIGHT_BLUE)
                .shape(MarkerShape::Circle)
                .radius(2.5),
        );
    }
}

/// Paint the pending selection red on top of the series.
fn draw_selection_highlight(plot_ui: &mut PlotUi, view: &[SeriesPoint], state: &AppState) {
    if state.selection.is_empty() {
        return;
    }
    let selected: Vec<[f64; 2]> = view
        .iter()
        .filter(|p| state.selection.contains(&p.ts))
        .filter_map(|p| p.value.map(|v| [series::ts_to_axis(p.ts), v]))
        .collect();

    if !selected.is_empty() {
        plot_ui.points(
            Points::new(PlotPoints::from(selected))
                .name("selected")
                .color(Color32::RED)
                .shape(MarkerShape::Circle)
                .radius(3.5),
        );
    }
}

/// Track an armed drag: anchor on drag start, rubber band while dragging,
/// compute the selection on release.  Each completed drag replaces the
/// pending selection.
fn handle_selection_drag(plot_ui: &mut PlotUi, view: &[SeriesPoint], state: &mut AppState) {
    let response = plot_ui.response().clone();
    let pointer = plot_ui.pointer_coordinate();

    if response.drag_started() {
        state.drag_start = pointer.map(|p| (p.x, p.y));
    }

    let (Some((x0, y0)), Some(cursor)) = (state.drag_start, pointer) else {
        if response.drag_stopped() {
            state.drag_start = None;
        }
        return;
    };

    if response.dragged() {
        let corners = vec![
            [x0, y0],
            [cursor.x, y0],
            [cursor.x, cursor.y],
            [x0, cursor.y],
        ];
        plot_ui.polygon(
            Polygon::new(PlotPoints::from(corners))
                .fill_color(Color32::from_rgba_unmultiplied(255, 255, 0, 24))
                .stroke((1.0, Color32::YELLOW)),
        );
    }

    if response.drag_stopped() {
        state.drag_start = None;
        let (Some(t0), Some(t1)) = (series::axis_to_ts(x0), series::axis_to_ts(cursor.x)) else {
            return;
        };
        let selection = state.selector.select(
            view,
            Corner { ts: t0, value: y0 },
            Corner { ts: t1, value: cursor.y },
        );
        log::info!("rectangle selected {} points", selection.len());
        state.selection = selection;
    }
}
