//! Startup barometer: survey net balances for the past and the next three
//! months. Balances are signed, so these series keep negative values.

use super::chart::{Chart, NamedSeries};
use super::model::Dataset;
use super::resolver::{resolve, Concept};
use super::series::{period_label, sort_by_period, SeriesPoint, Unit};

pub const TITLE: &str = "Startup barometer";

/// Series of every finite number under `column`, negatives included.
pub fn build_balance_series(
    dataset: &Dataset,
    column: &str,
    period_column: Option<&str>,
) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = dataset
        .rows
        .iter()
        .filter_map(|row| {
            let raw = row.number(column)?;
            Some(SeriesPoint {
                period: period_label(period_column.and_then(|col| row.get(col))),
                value: raw,
                original_value: raw,
            })
        })
        .collect();
    sort_by_period(&mut points);
    points
}

/// The barometer chart, or `None` when neither outlook column resolves.
pub fn build_barometer(dataset: &Dataset) -> Option<Chart> {
    let period = resolve(dataset, Concept::Year);

    let series: Vec<NamedSeries> = [
        (Concept::BarometerPast, "Past 3 months"),
        (Concept::BarometerNext, "Next 3 months"),
    ]
    .into_iter()
    .filter_map(|(concept, name)| {
        let column = resolve(dataset, concept)?;
        let points = build_balance_series(dataset, &column, period.as_deref());
        Some(NamedSeries {
            name: name.to_string(),
            column,
            points,
        })
    })
    .collect();

    let chart = Chart {
        title: TITLE.to_string(),
        unit: Unit::Share,
        series,
    };
    if chart.is_empty() {
        log::warn!("Omitting barometer chart: no outlook columns");
        return None;
    }
    Some(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn balances_keep_negative_values() {
        let ds = Dataset::from_json_value(&json!([
            {"Period": "Q2 2024", "Past 3 months": -12, "Next 3 months": 8},
            {"Period": "Q1 2024", "Past 3 months": -20, "Next 3 months": -3.5}
        ]))
        .unwrap();

        let chart = build_barometer(&ds).unwrap();
        assert_eq!(chart.series.len(), 2);
        let past = &chart.series[0];
        assert_eq!(past.column, "Past 3 months");
        // Quarter labels do not parse as integers: source order is kept.
        assert_eq!(past.points[0].period, "Q2 2024");
        assert_eq!(past.points[0].value, -12.0);
        assert_eq!(chart.series[1].points[1].value, -3.5);
    }

    #[test]
    fn yearly_periods_sort() {
        let ds = Dataset::from_json_value(&json!([
            {"Vuosi": 2024, "Seuraavat 3 kuukautta": 4},
            {"Vuosi": 2023, "Seuraavat 3 kuukautta": -1}
        ]))
        .unwrap();
        let chart = build_barometer(&ds).unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points[0].period, "2023");
    }

    #[test]
    fn non_barometer_dataset_has_no_chart() {
        let ds = Dataset::from_json_value(&json!([{"Year": 2020, "Revenue": 1.0}])).unwrap();
        assert!(build_barometer(&ds).is_none());
    }
}
