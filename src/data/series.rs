use serde::{Deserialize, Serialize};

use super::model::{CellValue, Dataset};

/// Currency values above this are taken to be in base units (euros).
pub const CURRENCY_RAW_THRESHOLD: f64 = 1000.0;
const BILLION: f64 = 1e9;

/// Period label for rows without a usable year cell.
pub const MISSING_PERIOD: &str = "N/A";

// ---------------------------------------------------------------------------
// Unit – display conversion policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    /// Amounts shown in billions of euros.
    Currency,
    /// Percentages of a total.
    Share,
    /// Plain counts (firms, people).
    Count,
}

impl Unit {
    /// Convert a raw source value to its display value.
    ///
    /// Currency: values above 1000 are divided by 1e9, smaller values are
    /// already billions. Share: fractions up to 1 are scaled to percent.
    pub fn convert(self, raw: f64) -> f64 {
        match self {
            Unit::Currency if raw > CURRENCY_RAW_THRESHOLD => raw / BILLION,
            Unit::Share if raw <= 1.0 => raw * 100.0,
            _ => raw,
        }
    }

    /// Axis label.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Currency => "Billion €",
            Unit::Share => "%",
            Unit::Count => "Count",
        }
    }

    /// Text for the tabular view.
    pub fn format(self, value: f64) -> String {
        match self {
            Unit::Currency => format!("{value:.2} B€"),
            Unit::Share => format!("{value:.1} %"),
            Unit::Count => format!("{:.0}", value.round()),
        }
    }
}

// ---------------------------------------------------------------------------
// SeriesPoint
// ---------------------------------------------------------------------------

/// One plotted point. `value` is display-ready, `original_value` is the
/// number found in the source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub period: String,
    pub value: f64,
    pub original_value: f64,
}

/// Label of the period cell: its text form, or [`MISSING_PERIOD`].
pub fn period_label(cell: Option<&CellValue>) -> String {
    match cell {
        None | Some(CellValue::Null) => MISSING_PERIOD.to_string(),
        Some(CellValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Leading integer of a period label, parsed the way `parseInt` does:
/// optional whitespace and sign, then at least one digit. `"2020"` and
/// `"2020Q1"` yield 2020, `"Q1 2020"` yields nothing. Digit runs beyond
/// the range of `i64` saturate.
pub fn parse_period(period: &str) -> Option<i64> {
    let s = period.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let run = &digits[..end];
    if run.is_empty() {
        return None;
    }
    // Runs too long for i64 saturate so they still order after real years.
    let n = run.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -n } else { n })
}

/// Order points ascending by numeric period.
///
/// Points whose period parses are sorted among themselves (stably) within
/// the slots they occupy; points with unparseable periods keep their
/// position.
pub fn sort_by_period(points: &mut [SeriesPoint]) {
    let slots: Vec<usize> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| parse_period(&p.period).is_some())
        .map(|(i, _)| i)
        .collect();

    let mut keyed: Vec<(i64, SeriesPoint)> = slots
        .iter()
        .filter_map(|&i| parse_period(&points[i].period).map(|n| (n, points[i].clone())))
        .collect();
    keyed.sort_by_key(|(n, _)| *n);

    for (slot, (_, point)) in slots.into_iter().zip(keyed) {
        points[slot] = point;
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build the plotted series for `value_column`.
///
/// Rows without a finite, non-negative number are dropped. An unresolved
/// value column or an empty dataset gives an empty series. An unresolved
/// year column labels every point [`MISSING_PERIOD`].
pub fn build_series(
    dataset: &Dataset,
    value_column: Option<&str>,
    year_column: Option<&str>,
    unit: Unit,
) -> Vec<SeriesPoint> {
    let Some(value_column) = value_column else {
        return Vec::new();
    };

    let mut points: Vec<SeriesPoint> = dataset
        .rows
        .iter()
        .filter_map(|row| {
            let raw = row.number(value_column).filter(|v| *v >= 0.0)?;
            let period = period_label(year_column.and_then(|col| row.get(col)));
            Some(SeriesPoint {
                period,
                value: unit.convert(raw),
                original_value: raw,
            })
        })
        .collect();

    sort_by_period(&mut points);
    points
}

/// Percentage share of `part_column` in `part + other`, per row.
///
/// Used when a dataset carries counts but no share column. Rows missing
/// either count, holding a negative count, or summing to zero are skipped.
/// `original_value` keeps the part count.
pub fn derive_share_series(
    dataset: &Dataset,
    part_column: &str,
    other_column: &str,
    year_column: Option<&str>,
) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = dataset
        .rows
        .iter()
        .filter_map(|row| {
            let part = row.number(part_column).filter(|v| *v >= 0.0)?;
            let other = row.number(other_column).filter(|v| *v >= 0.0)?;
            let total = part + other;
            if total <= 0.0 {
                return None;
            }
            Some(SeriesPoint {
                period: period_label(year_column.and_then(|col| row.get(col))),
                value: part / total * 100.0,
                original_value: part,
            })
        })
        .collect();

    sort_by_period(&mut points);
    points
}
