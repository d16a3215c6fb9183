use serde::Serialize;

use super::filter::ChartFilters;
use super::model::Dataset;
use super::resolver::{resolve, Concept};
use super::series::{build_series, derive_share_series, SeriesPoint, Unit};

// ---------------------------------------------------------------------------
// Chart kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Revenue,
    Employees,
    Firms,
    Gender,
    Immigration,
    RdInvestment,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Revenue,
        ChartKind::Employees,
        ChartKind::Firms,
        ChartKind::Gender,
        ChartKind::Immigration,
        ChartKind::RdInvestment,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Revenue => "Startup revenue",
            ChartKind::Employees => "Employees",
            ChartKind::Firms => "Number of startups",
            ChartKind::Gender => "Gender distribution",
            ChartKind::Immigration => "Immigration background",
            ChartKind::RdInvestment => "R&D investment",
        }
    }
}

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

/// A resolved series with its legend name and source column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub name: String,
    /// Source column, or a description of the columns it was derived from.
    pub column: String,
    pub points: Vec<SeriesPoint>,
}

/// Everything a chart surface needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub unit: Unit,
    pub series: Vec<NamedSeries>,
}

impl Chart {
    /// `(period, formatted value)` pairs for the tabular view; one entry
    /// per point, series after series.
    pub fn table_rows(&self) -> Vec<(String, String)> {
        self.series
            .iter()
            .flat_map(|s| {
                s.points.iter().map(move |p| {
                    let label = if self.series.len() > 1 {
                        format!("{} ({})", p.period, s.name)
                    } else {
                        p.period.clone()
                    };
                    (label, self.unit.format(p.value))
                })
            })
            .collect()
    }

    /// True when no series has a point (including when there is no series).
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build `kind` under the current filters, or `None` when the chart has
/// nothing to show and should be omitted.
pub fn build_chart(dataset: &Dataset, kind: ChartKind, filters: &ChartFilters) -> Option<Chart> {
    let year = resolve(dataset, Concept::Year);
    let year = year.as_deref();

    let (unit, series) = match kind {
        ChartKind::Revenue => single(dataset, filters.revenue_filter.concept(), year),
        ChartKind::Employees => single(dataset, filters.employees_filter.concept(), year),
        ChartKind::Firms => single(dataset, filters.firms_filter.concept(), year),
        ChartKind::RdInvestment => single(dataset, Concept::RDInvestment, year),
        ChartKind::Gender => composition(
            dataset,
            filters.gender_share_view.concepts(),
            (Concept::GenderMale, Concept::GenderFemale),
            year,
        ),
        ChartKind::Immigration => composition(
            dataset,
            filters.immigration_share_view.concepts(),
            (Concept::BackgroundDomestic, Concept::BackgroundForeign),
            year,
        ),
    };

    let chart = Chart {
        title: kind.title().to_string(),
        unit,
        series,
    };

    if chart.is_empty() {
        log::warn!("Omitting {kind:?} chart: no data for the current filters");
        return None;
    }
    Some(chart)
}

/// Every chart that has data, in display order.
pub fn build_charts(dataset: &Dataset, filters: &ChartFilters) -> Vec<(ChartKind, Chart)> {
    ChartKind::ALL
        .iter()
        .filter_map(|&kind| build_chart(dataset, kind, filters).map(|c| (kind, c)))
        .collect()
}

fn concept_series(dataset: &Dataset, concept: Concept, year: Option<&str>) -> Option<NamedSeries> {
    let column = resolve(dataset, concept)?;
    let unit = concept.unit().unwrap_or(Unit::Count);
    let points = build_series(dataset, Some(&column), year, unit);
    Some(NamedSeries {
        name: column.trim().to_string(),
        column,
        points,
    })
}

fn single(dataset: &Dataset, concept: Concept, year: Option<&str>) -> (Unit, Vec<NamedSeries>) {
    let unit = concept.unit().unwrap_or(Unit::Count);
    (unit, concept_series(dataset, concept, year).into_iter().collect())
}

/// Two-sided composition chart (gender, background). Without a share view
/// both count series are shown; with one, the share column is used, or a
/// share derived from the two counts when no share column exists.
fn composition(
    dataset: &Dataset,
    share_view: Option<(Concept, Concept, Concept)>,
    counts: (Concept, Concept),
    year: Option<&str>,
) -> (Unit, Vec<NamedSeries>) {
    let Some((share, part, other)) = share_view else {
        let series = [counts.0, counts.1]
            .into_iter()
            .filter_map(|c| concept_series(dataset, c, year))
            .collect();
        return (Unit::Count, series);
    };

    if let Some(series) = concept_series(dataset, share, year) {
        return (Unit::Share, vec![series]);
    }

    let derived = resolve(dataset, part).zip(resolve(dataset, other)).map(|(p, o)| {
        log::debug!("Deriving {share:?} from {p:?} and {o:?}");
        NamedSeries {
            name: format!("Share of {}", p.trim()),
            column: format!("{p} / ({p} + {o})"),
            points: derive_share_series(dataset, &p, &o, year),
        }
    });
    (Unit::Share, derived.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FirmsFilter, GenderShareView, RevenueFilter};
    use serde_json::json;

    fn sample() -> Dataset {
        Dataset::from_json_value(&json!([
            {"Year": 2021, "Revenue": 4.1e9, "RevenueEarlyStage": 0.9, "Employees": 60000,
             "Firms": 4200, "Naiset": 18000, "Miehet": 42000, "Share of Finnish": 0.81},
            {"Year": 2020, "Revenue": 3.6e9, "RevenueEarlyStage": 0.7, "Employees": 55000,
             "Firms": 4000, "Naiset": 16000, "Miehet": 39000, "Share of Finnish": 0.83}
        ]))
        .unwrap()
    }

    #[test]
    fn revenue_follows_filter() {
        let ds = sample();
        let all = build_chart(&ds, ChartKind::Revenue, &ChartFilters::default()).unwrap();
        assert_eq!(all.unit, Unit::Currency);
        assert_eq!(all.series[0].column, "Revenue");
        assert_eq!(all.series[0].points[0].period, "2020");

        let filters = ChartFilters {
            revenue_filter: RevenueFilter::EarlyStage,
            ..Default::default()
        };
        let early = build_chart(&ds, ChartKind::Revenue, &filters).unwrap();
        assert_eq!(early.series[0].column, "RevenueEarlyStage");

        let filters = ChartFilters {
            revenue_filter: RevenueFilter::LaterStage,
            ..Default::default()
        };
        assert!(build_chart(&ds, ChartKind::Revenue, &filters).is_none());
    }

    #[test]
    fn unresolved_firms_in_country_omits_chart() {
        let ds = sample();
        let filters = ChartFilters {
            firms_filter: FirmsFilter::Finland,
            ..Default::default()
        };
        assert!(build_chart(&ds, ChartKind::Firms, &filters).is_none());
        assert!(build_chart(&ds, ChartKind::RdInvestment, &filters).is_none());
    }

    #[test]
    fn gender_counts_without_share_view() {
        let chart = build_chart(&sample(), ChartKind::Gender, &ChartFilters::default()).unwrap();
        let columns: Vec<&str> = chart.series.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(columns, vec!["Miehet", "Naiset"]);
        assert_eq!(chart.unit, Unit::Count);
    }

    #[test]
    fn gender_share_is_derived_from_counts() {
        let filters = ChartFilters {
            gender_share_view: GenderShareView::FemaleShare,
            ..Default::default()
        };
        let chart = build_chart(&sample(), ChartKind::Gender, &filters).unwrap();
        assert_eq!(chart.unit, Unit::Share);
        let last = chart.series[0].points.last().unwrap();
        assert_eq!(last.period, "2021");
        assert!((last.value - 30.0).abs() < 1e-9);
    }

    #[test]
    fn immigration_share_column_is_preferred() {
        let filters = ChartFilters {
            immigration_share_view: crate::data::filter::ImmigrationShareView::FinnishShare,
            ..Default::default()
        };
        let chart = build_chart(&sample(), ChartKind::Immigration, &filters).unwrap();
        assert_eq!(chart.series[0].column, "Share of Finnish");
        assert!((chart.series[0].points[0].value - 83.0).abs() < 1e-9);

        // No count columns for the plain view.
        assert!(build_chart(&sample(), ChartKind::Immigration, &ChartFilters::default()).is_none());
    }

    #[test]
    fn immigration_chart_ignores_revenue_by_background() {
        let ds = Dataset::from_json_value(&json!([
            {"Year": 2021, "Revenue of Finnish startups": 3.2, "Foreign startups": 140}
        ]))
        .unwrap();
        assert!(build_chart(&ds, ChartKind::Immigration, &ChartFilters::default()).is_none());
    }

    #[test]
    fn table_rows_are_formatted() {
        let chart = build_chart(&sample(), ChartKind::Revenue, &ChartFilters::default()).unwrap();
        assert_eq!(
            chart.table_rows(),
            vec![
                ("2020".to_string(), "3.60 B€".to_string()),
                ("2021".to_string(), "4.10 B€".to_string())
            ]
        );
    }

    #[test]
    fn all_charts_with_data_are_built() {
        let kinds: Vec<ChartKind> = build_charts(&sample(), &ChartFilters::default())
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            kinds,
            vec![ChartKind::Revenue, ChartKind::Employees, ChartKind::Firms, ChartKind::Gender]
        );
    }
}
