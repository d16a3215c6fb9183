//! Headless export: print every chart that resolves from a dataset as JSON,
//! including the barometer when the file carries one.
//!
//! ```text
//! export-series <data file> [filters.json]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use ecosystem_charts::data::barometer::build_barometer;
use ecosystem_charts::data::chart::{build_charts, Chart, ChartKind};
use ecosystem_charts::data::filter::ChartFilters;
use ecosystem_charts::data::loader::load_file;
use ecosystem_charts::data::model::Dataset;
use ecosystem_charts::data::resolver::{resolve, Concept, ColumnKey};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    filters: ChartFilters,
    columns: Vec<(Concept, Option<ColumnKey>)>,
    charts: Vec<ExportedChart>,
}

#[derive(Serialize)]
struct ExportedChart {
    kind: Option<ChartKind>,
    #[serde(flatten)]
    chart: Chart,
}

fn export(dataset: &Dataset, filters: ChartFilters) -> Export {
    let columns = Concept::ALL
        .iter()
        .map(|&c| (c, resolve(dataset, c)))
        .collect();

    let mut charts: Vec<ExportedChart> = build_charts(dataset, &filters)
        .into_iter()
        .map(|(kind, chart)| ExportedChart {
            kind: Some(kind),
            chart,
        })
        .collect();
    charts.extend(build_barometer(dataset).map(|chart| ExportedChart { kind: None, chart }));

    Export {
        filters,
        columns,
        charts,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(data_path) = args.next().map(PathBuf::from) else {
        bail!("usage: export-series <data file> [filters.json]");
    };
    let filters = match args.next() {
        Some(path) => ChartFilters::from_json_file(&PathBuf::from(path))?,
        None => ChartFilters::default(),
    };

    let dataset = load_file(&data_path)
        .with_context(|| format!("loading {}", data_path.display()))?;

    let export = export(&dataset, filters);
    log::info!("Exporting {} charts", export.charts.len());
    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn barometer_is_exported_when_present() {
        let ds = Dataset::from_json_value(&json!([
            {"Period": "Q1 2024", "Past 3 months": -12, "Next 3 months": 8}
        ]))
        .unwrap();
        let out = export(&ds, ChartFilters::default());
        assert_eq!(out.charts.len(), 1);
        assert!(out.charts[0].kind.is_none());
        assert_eq!(out.charts[0].chart.series.len(), 2);
    }

    #[test]
    fn ecosystem_data_has_no_barometer_entry() {
        let ds = Dataset::from_json_value(&json!([
            {"Year": 2021, "Revenue": 4.1, "Employees": 60000}
        ]))
        .unwrap();
        let out = export(&ds, ChartFilters::default());
        assert!(out.charts.iter().all(|c| c.kind.is_some()));
        assert_eq!(out.charts.len(), 2);
    }
}
