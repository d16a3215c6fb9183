use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::resolver::Concept;

// ---------------------------------------------------------------------------
// Filter values: which variant of each chart is shown
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {filter} value {value:?} (expected one of: {expected})")]
pub struct FilterParseError {
    pub filter: &'static str,
    pub value: String,
    pub expected: String,
}

/// Generates the wire-name plumbing shared by every filter enum:
/// `ALL`, `as_str`, `Display` and `FromStr`.
macro_rules! filter_enum {
    ($name:ident, $label:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FilterParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(FilterParseError {
                        filter: $label,
                        value: s.to_string(),
                        expected: [$($wire),+].join(", "),
                    }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevenueFilter {
    #[default]
    All,
    EarlyStage,
    LaterStage,
}

filter_enum!(RevenueFilter, "revenueFilter", {
    All => "all",
    EarlyStage => "early-stage",
    LaterStage => "later-stage",
});

impl RevenueFilter {
    pub fn concept(self) -> Concept {
        match self {
            RevenueFilter::All => Concept::Revenue,
            RevenueFilter::EarlyStage => Concept::RevenueEarlyStage,
            RevenueFilter::LaterStage => Concept::RevenueLaterStage,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeesFilter {
    #[default]
    All,
    Finland,
}

filter_enum!(EmployeesFilter, "employeesFilter", {
    All => "all",
    Finland => "finland",
});

impl EmployeesFilter {
    pub fn concept(self) -> Concept {
        match self {
            EmployeesFilter::All => Concept::Employees,
            EmployeesFilter::Finland => Concept::EmployeesInCountry,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FirmsFilter {
    #[default]
    All,
    Finland,
    EarlyStage,
    LaterStage,
}

filter_enum!(FirmsFilter, "firmsFilter", {
    All => "all",
    Finland => "finland",
    EarlyStage => "early-stage",
    LaterStage => "later-stage",
});

impl FirmsFilter {
    pub fn concept(self) -> Concept {
        match self {
            FirmsFilter::All => Concept::Firms,
            FirmsFilter::Finland => Concept::FirmsInCountry,
            FirmsFilter::EarlyStage => Concept::FirmsEarlyStageCount,
            FirmsFilter::LaterStage => Concept::FirmsLaterStageCount,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenderShareView {
    #[default]
    None,
    MaleShare,
    FemaleShare,
}

filter_enum!(GenderShareView, "genderShareView", {
    None => "none",
    MaleShare => "male-share",
    FemaleShare => "female-share",
});

impl GenderShareView {
    /// Share concept of the view, with the count concepts it can be derived
    /// from (part first). `None` for the plain count view.
    pub fn concepts(self) -> Option<(Concept, Concept, Concept)> {
        match self {
            GenderShareView::None => None,
            GenderShareView::MaleShare => Some((
                Concept::GenderMaleShare,
                Concept::GenderMale,
                Concept::GenderFemale,
            )),
            GenderShareView::FemaleShare => Some((
                Concept::GenderFemaleShare,
                Concept::GenderFemale,
                Concept::GenderMale,
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImmigrationShareView {
    #[default]
    None,
    FinnishShare,
    ForeignShare,
}

filter_enum!(ImmigrationShareView, "immigrationShareView", {
    None => "none",
    FinnishShare => "finnish-share",
    ForeignShare => "foreign-share",
});

impl ImmigrationShareView {
    /// See [`GenderShareView::concepts`].
    pub fn concepts(self) -> Option<(Concept, Concept, Concept)> {
        match self {
            ImmigrationShareView::None => None,
            ImmigrationShareView::FinnishShare => Some((
                Concept::BackgroundDomesticShare,
                Concept::BackgroundDomestic,
                Concept::BackgroundForeign,
            )),
            ImmigrationShareView::ForeignShare => Some((
                Concept::BackgroundForeignShare,
                Concept::BackgroundForeign,
                Concept::BackgroundDomestic,
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// ChartFilters – the complete view configuration
// ---------------------------------------------------------------------------

/// The filter selections of every chart. Immutable per render: the UI
/// builds a new value on interaction and charts are rebuilt from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartFilters {
    pub revenue_filter: RevenueFilter,
    pub employees_filter: EmployeesFilter,
    pub firms_filter: FirmsFilter,
    pub gender_share_view: GenderShareView,
    pub immigration_share_view: ImmigrationShareView,
}

impl ChartFilters {
    /// Read filters from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading filters from {}", path.display()))?;
        serde_json::from_str(&text).context("parsing filters JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_parse() {
        assert_eq!("early-stage".parse::<RevenueFilter>(), Ok(RevenueFilter::EarlyStage));
        assert_eq!(" Finland ".parse::<EmployeesFilter>(), Ok(EmployeesFilter::Finland));
        assert_eq!("later-stage".parse::<FirmsFilter>(), Ok(FirmsFilter::LaterStage));
        assert_eq!("female-share".parse::<GenderShareView>(), Ok(GenderShareView::FemaleShare));
        assert_eq!("finnish-share".parse::<ImmigrationShareView>(), Ok(ImmigrationShareView::FinnishShare));
    }

    #[test]
    fn unknown_value_is_reported() {
        let err = "growth".parse::<FirmsFilter>().unwrap_err();
        assert_eq!(err.filter, "firmsFilter");
        assert!(err.to_string().contains("early-stage"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for f in FirmsFilter::ALL {
            assert_eq!(f.to_string().parse::<FirmsFilter>(), Ok(*f));
        }
    }

    #[test]
    fn filters_map_to_concepts() {
        assert_eq!(RevenueFilter::All.concept(), Concept::Revenue);
        assert_eq!(RevenueFilter::LaterStage.concept(), Concept::RevenueLaterStage);
        assert_eq!(EmployeesFilter::Finland.concept(), Concept::EmployeesInCountry);
        assert_eq!(FirmsFilter::EarlyStage.concept(), Concept::FirmsEarlyStageCount);
        assert_eq!(GenderShareView::None.concepts(), None);
        assert_eq!(
            ImmigrationShareView::ForeignShare.concepts().map(|c| c.0),
            Some(Concept::BackgroundForeignShare)
        );
    }

    #[test]
    fn json_config_fills_defaults() {
        let filters: ChartFilters =
            serde_json::from_str(r#"{"revenueFilter": "early-stage", "genderShareView": "male-share"}"#)
                .unwrap();
        assert_eq!(filters.revenue_filter, RevenueFilter::EarlyStage);
        assert_eq!(filters.gender_share_view, GenderShareView::MaleShare);
        assert_eq!(filters.firms_filter, FirmsFilter::All);
    }

    #[test]
    fn filters_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.json");
        std::fs::write(&path, r#"{"firmsFilter": "finland"}"#).unwrap();

        let filters = ChartFilters::from_json_file(&path).unwrap();
        assert_eq!(filters.firms_filter, FirmsFilter::Finland);
        assert!(ChartFilters::from_json_file(&dir.path().join("missing.json")).is_err());
    }
}
