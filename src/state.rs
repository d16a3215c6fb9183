use std::collections::BTreeSet;

use ecosystem_charts::data::barometer::build_barometer;
use ecosystem_charts::data::chart::{build_charts, Chart, ChartKind};
use ecosystem_charts::data::filter::ChartFilters;
use ecosystem_charts::data::model::Dataset;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded ecosystem dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Loaded barometer survey dataset.
    pub barometer: Option<Dataset>,

    /// Current filter selections. Replaced wholesale on change.
    pub filters: ChartFilters,

    /// Charts with data under the current filters (cached).
    pub charts: Vec<(ChartKind, Chart)>,

    /// Barometer chart, if the barometer dataset has outlook columns.
    pub barometer_chart: Option<Chart>,

    /// Colours for every series currently shown.
    pub color_map: ColorMap,

    /// Titles of charts whose data table is expanded.
    pub tables_shown: BTreeSet<String>,

    /// Title of the chart shown fullscreen.
    pub fullscreen: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded ecosystem dataset and rebuild its charts.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.fullscreen = None;
        self.status_message = None;
        self.rebuild_charts();
    }

    /// Ingest a newly loaded barometer dataset.
    pub fn set_barometer(&mut self, dataset: Dataset) {
        self.barometer_chart = build_barometer(&dataset);
        if self.barometer_chart.is_none() {
            self.status_message = Some("No barometer columns found in file".to_string());
        } else {
            self.status_message = None;
        }
        self.barometer = Some(dataset);
        self.rebuild_color_map();
    }

    /// Apply new filter selections.
    pub fn set_filters(&mut self, filters: ChartFilters) {
        if filters != self.filters {
            self.filters = filters;
            self.rebuild_charts();
        }
    }

    /// Recompute `charts` from the dataset and filters.
    pub fn rebuild_charts(&mut self) {
        self.charts = match &self.dataset {
            Some(ds) => build_charts(ds, &self.filters),
            None => Vec::new(),
        };
        // A fullscreen chart that disappeared under the new filters closes.
        if let Some(title) = &self.fullscreen {
            if !self.visible_charts().any(|c| &c.title == title) {
                self.fullscreen = None;
            }
        }
        self.rebuild_color_map();
    }

    fn rebuild_color_map(&mut self) {
        let names: Vec<String> = self
            .visible_charts()
            .flat_map(|c| c.series.iter().map(|s| s.name.clone()))
            .collect();
        self.color_map = ColorMap::new(names.iter().map(String::as_str));
    }

    /// Every chart to draw, barometer last.
    pub fn visible_charts(&self) -> impl Iterator<Item = &Chart> {
        self.charts
            .iter()
            .map(|(_, c)| c)
            .chain(self.barometer_chart.iter())
    }

    /// Show or hide the data table under a chart.
    pub fn toggle_table(&mut self, title: &str) {
        if !self.tables_shown.remove(title) {
            self.tables_shown.insert(title.to_string());
        }
    }

    pub fn table_shown(&self, title: &str) -> bool {
        self.tables_shown.contains(title)
    }

    /// Enter or leave fullscreen for a chart.
    pub fn toggle_fullscreen(&mut self, title: &str) {
        self.fullscreen = match &self.fullscreen {
            Some(current) if current == title => None,
            _ => Some(title.to_string()),
        };
    }
}
