use std::fmt::Display;
use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use ecosystem_charts::data::filter::{
    EmployeesFilter, FirmsFilter, GenderShareView, ImmigrationShareView, RevenueFilter,
};
use ecosystem_charts::data::loader::load_file;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Edit a copy; the state is only replaced when something changed.
    let mut filters = state.filters;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            filter_combo(ui, "Revenue", &mut filters.revenue_filter, RevenueFilter::ALL);
            filter_combo(ui, "Employees", &mut filters.employees_filter, EmployeesFilter::ALL);
            filter_combo(ui, "Startups", &mut filters.firms_filter, FirmsFilter::ALL);
            filter_combo(ui, "Gender", &mut filters.gender_share_view, GenderShareView::ALL);
            filter_combo(
                ui,
                "Immigration",
                &mut filters.immigration_share_view,
                ImmigrationShareView::ALL,
            );
            ui.separator();

            // ---- Data tables ----
            ui.strong("Data tables");
            let titles: Vec<String> = state.visible_charts().map(|c| c.title.clone()).collect();
            for title in titles {
                let mut shown = state.table_shown(&title);
                if ui.checkbox(&mut shown, &title).changed() {
                    state.toggle_table(&title);
                }
            }
        });

    state.set_filters(filters);
}

/// A labelled combo box over every value of a filter.
fn filter_combo<T>(ui: &mut Ui, label: &str, value: &mut T, options: &[T])
where
    T: Copy + PartialEq + Display,
{
    ui.strong(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(value.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                ui.selectable_value(&mut *value, *option, option.to_string());
            }
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_file_dialog(state, Target::Dataset);
                ui.close_menu();
            }
            if ui.button("Open barometer…").clicked() {
                open_file_dialog(state, Target::Barometer);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows, {} columns, {} charts",
                ds.len(),
                ds.column_names.len(),
                state.charts.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Which slot a loaded file goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Dataset,
    Barometer,
}

pub fn open_file_dialog(state: &mut AppState, target: Target) {
    let title = match target {
        Target::Dataset => "Open ecosystem data",
        Target::Barometer => "Open barometer data",
    };
    let file = rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path, target);
    }
}

/// Load `path` into the state, reporting failures in the status bar.
pub fn load_into(state: &mut AppState, path: &Path, target: Target) {
    match load_file(path) {
        Ok(dataset) => match target {
            Target::Dataset => state.set_dataset(dataset),
            Target::Barometer => state.set_barometer(dataset),
        },
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
