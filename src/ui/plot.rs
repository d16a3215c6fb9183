use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use ecosystem_charts::data::chart::Chart;
use ecosystem_charts::data::series::parse_period;

use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Chart area (central panel)
// ---------------------------------------------------------------------------

/// Render every chart, or only the fullscreen one when set.
pub fn chart_area(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() && state.barometer_chart.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to view charts  (File → Open dataset…)");
        });
        return;
    }

    // Charts are small; drawing from a copy lets the buttons mutate state.
    let charts: Vec<Chart> = state.visible_charts().cloned().collect();

    if let Some(title) = state.fullscreen.clone() {
        if let Some(chart) = charts.iter().find(|c| c.title == title) {
            let height = (ui.available_height() - 40.0).max(CHART_HEIGHT);
            chart_card(ui, state, chart, height);
            return;
        }
    }

    if charts.is_empty() {
        ui.label("No chart can be drawn from this dataset.");
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for chart in &charts {
                chart_card(ui, state, chart, CHART_HEIGHT);
                ui.separator();
            }
        });
}

/// Heading with the table / fullscreen toggles, the plot, and the table.
fn chart_card(ui: &mut Ui, state: &mut AppState, chart: &Chart, height: f32) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(&chart.title);
        let table_label = if state.table_shown(&chart.title) { "Hide table" } else { "Table" };
        if ui.small_button(table_label).clicked() {
            state.toggle_table(&chart.title);
        }
        let fs_label = if state.fullscreen.as_deref() == Some(chart.title.as_str()) {
            "Close"
        } else {
            "Fullscreen"
        };
        if ui.small_button(fs_label).clicked() {
            state.toggle_fullscreen(&chart.title);
        }
    });

    chart_plot(ui, state, chart, height);

    if state.table_shown(&chart.title) {
        ui.push_id(&chart.title, |ui: &mut Ui| chart_table(ui, chart));
    }
}

/// Render one chart: a line per series.
///
/// Integer periods are plotted at their value; other labels at their index
/// in the series.
fn chart_plot(ui: &mut Ui, state: &AppState, chart: &Chart, height: f32) {
    Plot::new(("chart_plot", &chart.title))
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Period")
        .y_axis_label(chart.unit.label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let x = parse_period(&p.period).map_or(i as f64, |n| n as f64);
                        [x, p.value]
                    })
                    .collect();

                let line = Line::new(points)
                    .name(&series.name)
                    .color(state.color_map.color_for(&series.name))
                    .width(2.0);

                plot_ui.line(line);
            }
        });
}

/// `(period, value)` table under a chart.
fn chart_table(ui: &mut Ui, chart: &Chart) {
    let rows = chart.table_rows();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Period");
            });
            header.col(|ui| {
                ui.strong(chart.unit.label());
            });
        })
        .body(|mut body| {
            for (period, value) in &rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(period);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
        });
}
