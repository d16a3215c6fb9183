//! Column resolution and series normalization for startup ecosystem
//! datasets, plus the chart models the viewer draws.

pub mod data;

pub use data::chart::{build_chart, build_charts, Chart, ChartKind, NamedSeries};
pub use data::filter::ChartFilters;
pub use data::loader::load_file;
pub use data::model::{CellValue, Dataset, Row};
pub use data::resolver::{resolve, resolve_with, ColumnKey, Concept, ResolveOptions};
pub use data::series::{build_series, SeriesPoint, Unit};
