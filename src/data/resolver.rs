use serde::{Deserialize, Serialize};

use super::model::Dataset;
use super::series::Unit;

/// A literal header string within a [`Dataset`].
pub type ColumnKey = String;

// ---------------------------------------------------------------------------
// Concepts – abstract metric identities
// ---------------------------------------------------------------------------

/// A metric identity, independent of the header it is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concept {
    Revenue,
    RevenueEarlyStage,
    RevenueLaterStage,
    Employees,
    EmployeesInCountry,
    Firms,
    FirmsInCountry,
    FirmsEarlyStageCount,
    FirmsLaterStageCount,
    Year,
    GenderMale,
    GenderFemale,
    GenderMaleShare,
    GenderFemaleShare,
    BackgroundDomestic,
    BackgroundForeign,
    BackgroundDomesticShare,
    BackgroundForeignShare,
    RDInvestment,
    BarometerPast,
    BarometerNext,
}

impl Concept {
    pub const ALL: [Concept; 21] = [
        Concept::Revenue,
        Concept::RevenueEarlyStage,
        Concept::RevenueLaterStage,
        Concept::Employees,
        Concept::EmployeesInCountry,
        Concept::Firms,
        Concept::FirmsInCountry,
        Concept::FirmsEarlyStageCount,
        Concept::FirmsLaterStageCount,
        Concept::Year,
        Concept::GenderMale,
        Concept::GenderFemale,
        Concept::GenderMaleShare,
        Concept::GenderFemaleShare,
        Concept::BackgroundDomestic,
        Concept::BackgroundForeign,
        Concept::BackgroundDomesticShare,
        Concept::BackgroundForeignShare,
        Concept::RDInvestment,
        Concept::BarometerPast,
        Concept::BarometerNext,
    ];

    /// The opposite polarity of a gender/background concept. A column that
    /// satisfies the opposite rule is never accepted.
    pub fn opposite(self) -> Option<Concept> {
        use Concept::*;
        match self {
            GenderMale => Some(GenderFemale),
            GenderFemale => Some(GenderMale),
            GenderMaleShare => Some(GenderFemaleShare),
            GenderFemaleShare => Some(GenderMaleShare),
            BackgroundDomestic => Some(BackgroundForeign),
            BackgroundForeign => Some(BackgroundDomestic),
            BackgroundDomesticShare => Some(BackgroundForeignShare),
            BackgroundForeignShare => Some(BackgroundDomesticShare),
            _ => None,
        }
    }

    /// Narrower concepts whose columns the broad concept must not claim.
    pub fn default_exclusions(self) -> &'static [Concept] {
        use Concept::*;
        match self {
            Revenue => &[RevenueEarlyStage, RevenueLaterStage],
            Employees => &[EmployeesInCountry],
            Firms => &[FirmsInCountry, FirmsEarlyStageCount, FirmsLaterStageCount],
            _ => &[],
        }
    }

    /// Display unit of the concept's values; `None` for label columns.
    pub fn unit(self) -> Option<Unit> {
        use Concept::*;
        match self {
            Revenue | RevenueEarlyStage | RevenueLaterStage | RDInvestment => Some(Unit::Currency),
            GenderMaleShare | GenderFemaleShare | BackgroundDomesticShare
            | BackgroundForeignShare => Some(Unit::Share),
            Year => None,
            _ => Some(Unit::Count),
        }
    }

    pub fn rule(self) -> &'static ConceptRule {
        use Concept::*;
        match self {
            Revenue => &REVENUE,
            RevenueEarlyStage => &REVENUE_EARLY_STAGE,
            RevenueLaterStage => &REVENUE_LATER_STAGE,
            Employees => &EMPLOYEES,
            EmployeesInCountry => &EMPLOYEES_IN_COUNTRY,
            Firms => &FIRMS,
            FirmsInCountry => &FIRMS_IN_COUNTRY,
            FirmsEarlyStageCount => &FIRMS_EARLY_STAGE,
            FirmsLaterStageCount => &FIRMS_LATER_STAGE,
            Year => &YEAR,
            GenderMale => &GENDER_MALE,
            GenderFemale => &GENDER_FEMALE,
            GenderMaleShare => &GENDER_MALE_SHARE,
            GenderFemaleShare => &GENDER_FEMALE_SHARE,
            BackgroundDomestic => &BACKGROUND_DOMESTIC,
            BackgroundForeign => &BACKGROUND_FOREIGN,
            BackgroundDomesticShare => &BACKGROUND_DOMESTIC_SHARE,
            BackgroundForeignShare => &BACKGROUND_FOREIGN_SHARE,
            RDInvestment => &RD_INVESTMENT,
            BarometerPast => &BAROMETER_PAST,
            BarometerNext => &BAROMETER_NEXT,
        }
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// How a column name satisfied a rule. Ordered by precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Exact,
    Legacy,
    Keyword,
}

/// Declarative matching rule for one concept. Keywords are lowercase and
/// matched as substrings of the trimmed, lowercased column name.
#[derive(Debug)]
pub struct ConceptRule {
    /// Canonical header names.
    pub exact: &'static [&'static str],
    /// Older header conventions still found in archived exports.
    pub legacy: &'static [&'static str],
    /// Every group must contribute at least one keyword.
    pub required: &'static [&'static [&'static str]],
    /// None of these may appear for a keyword match.
    pub excluded: &'static [&'static str],
    /// Only columns holding at least one number qualify.
    pub numeric: bool,
}

impl ConceptRule {
    /// The best tier at which `column` satisfies this rule.
    pub fn tier(&self, column: &str) -> Option<MatchTier> {
        let name = normalize(column);
        if name.is_empty() {
            return None;
        }
        if self.exact.iter().any(|e| normalize(e) == name) {
            return Some(MatchTier::Exact);
        }
        if self.legacy.iter().any(|l| normalize(l) == name) {
            return Some(MatchTier::Legacy);
        }
        let required = !self.required.is_empty()
            && self
                .required
                .iter()
                .all(|group| group.iter().any(|kw| name.contains(kw)));
        if required && !self.excluded.iter().any(|kw| name.contains(kw)) {
            return Some(MatchTier::Keyword);
        }
        None
    }

    pub fn matches(&self, column: &str) -> bool {
        self.tier(column).is_some()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

const REVENUE_WORDS: &[&str] = &["revenue", "turnover", "sales", "liikevaihto"];
const EARLY_WORDS: &[&str] = &["early", "alkuvaihe"];
const LATER_WORDS: &[&str] = &["later", "scaleup", "scale-up", "scale up", "kasvuvaihe"];
const EMPLOYEE_WORDS: &[&str] = &[
    "employ", "staff", "workforce", "headcount", "henkilö", "työnteki", "työllis",
];
const FINLAND_WORDS: &[&str] = &["finland", "suomi", "suomessa"];
const FIRM_WORDS: &[&str] = &["firm", "compan", "startup", "yritys", "yrityks"];
const SHARE_WORDS: &[&str] = &["share", "%", "percent", "proportion", "osuus"];
const MALE_WORDS: &[&str] = &["male", "mies", "miehet", "miehi"];
const FEMALE_WORDS: &[&str] = &["female", "women", "woman", "nais"];
const DOMESTIC_WORDS: &[&str] = &["finnish", "suomalai", "native", "domestic", "kotimai"];
const FOREIGN_WORDS: &[&str] = &[
    "foreign", "immigra", "non-finnish", "ulkomaa", "maahanmuut", "vieraskiel",
];
const RD_WORDS: &[&str] = &[
    "r&d", "r & d", "r and d", "research", "t&k", "tutkimus", "tuotekehit",
];

static REVENUE: ConceptRule = ConceptRule {
    exact: &["Revenue", "TotalRevenue", "Liikevaihto"],
    legacy: &["Total Revenue", "Startup Revenue", "Turnover"],
    required: &[REVENUE_WORDS],
    excluded: &[
        "early", "stage", "scaleup", "scale-up", "scale up", "later", "alkuvaihe", "kasvuvaihe",
        "share", "%",
    ],
    numeric: true,
};

static REVENUE_EARLY_STAGE: ConceptRule = ConceptRule {
    exact: &["RevenueEarlyStage", "EarlyStageRevenue"],
    legacy: &["Early Stage Startup Revenue", "Early Stage Revenue", "Early-stage revenue"],
    required: &[REVENUE_WORDS, EARLY_WORDS],
    excluded: &["scaleup", "scale-up", "scale up", "later", "share", "%"],
    numeric: true,
};

static REVENUE_LATER_STAGE: ConceptRule = ConceptRule {
    exact: &["RevenueLaterStage", "LaterStageRevenue", "RevenueScaleup"],
    legacy: &[
        "Scaleup Revenue",
        "Scale-up Revenue",
        "Later Stage Startup Revenue",
        "Later Stage Revenue",
    ],
    required: &[REVENUE_WORDS, LATER_WORDS],
    excluded: &["early", "alkuvaihe", "share", "%"],
    numeric: true,
};

static EMPLOYEES: ConceptRule = ConceptRule {
    exact: &["Employees", "NumberOfEmployees", "Henkilöstö"],
    legacy: &["Total Employees", "Number of employees", "Employment"],
    required: &[EMPLOYEE_WORDS],
    excluded: &[
        "finland", "suomi", "suomessa", "share", "%", "osuus", "male", "women", "nais", "mies",
        "miehet", "finnish", "foreign", "immigra", "ulkomaa", "maahanmuut", "suomalai",
    ],
    numeric: true,
};

static EMPLOYEES_IN_COUNTRY: ConceptRule = ConceptRule {
    exact: &["EmployeesInFinland", "EmployeesFinland"],
    legacy: &["Employees in Finland", "Henkilöstö Suomessa"],
    required: &[EMPLOYEE_WORDS, FINLAND_WORDS],
    excluded: &[
        "share", "%", "osuus", "male", "women", "nais", "mies", "miehet", "finnish", "foreign",
        "immigra", "ulkomaa", "maahanmuut", "suomalai",
    ],
    numeric: true,
};

static FIRMS: ConceptRule = ConceptRule {
    exact: &["Firms", "Companies", "Startups", "NumberOfFirms", "Yritykset"],
    legacy: &["Number of startups", "Number of firms", "Startup count"],
    required: &[FIRM_WORDS],
    excluded: &[
        "revenue", "turnover", "sales", "liikevaihto", "employ", "staff", "henkilö", "finland",
        "suomi", "suomessa", "early", "stage", "later", "scaleup", "scale-up", "alkuvaihe",
        "kasvuvaihe", "share", "%", "invest", "r&d",
    ],
    numeric: true,
};

static FIRMS_IN_COUNTRY: ConceptRule = ConceptRule {
    exact: &["FirmsInFinland", "FirmsFinland", "StartupsInFinland"],
    legacy: &["Firms in Finland", "Startups in Finland", "Yritykset Suomessa"],
    required: &[FIRM_WORDS, FINLAND_WORDS],
    excluded: &[
        "revenue", "turnover", "sales", "liikevaihto", "employ", "staff", "henkilö", "early",
        "stage", "later", "scaleup", "scale-up", "share", "%",
    ],
    numeric: true,
};

static FIRMS_EARLY_STAGE: ConceptRule = ConceptRule {
    exact: &["FirmsEarlyStage", "EarlyStageFirms"],
    legacy: &["Number of early stage startups", "Early Stage Startups"],
    required: &[FIRM_WORDS, EARLY_WORDS],
    excluded: &[
        "revenue", "turnover", "sales", "liikevaihto", "employ", "staff", "henkilö", "later",
        "scaleup", "scale-up", "share", "%",
    ],
    numeric: true,
};

static FIRMS_LATER_STAGE: ConceptRule = ConceptRule {
    exact: &["FirmsLaterStage", "LaterStageFirms", "Scaleups"],
    legacy: &["Number of scaleups", "Number of later stage startups", "Later Stage Startups"],
    required: &[
        &["firm", "compan", "startup", "yritys", "yrityks", "scaleup", "scale-up"],
        LATER_WORDS,
    ],
    excluded: &[
        "revenue", "turnover", "sales", "liikevaihto", "employ", "staff", "henkilö", "early",
        "alkuvaihe", "share", "%",
    ],
    numeric: true,
};

static YEAR: ConceptRule = ConceptRule {
    exact: &["Year", "Vuosi", "Period"],
    legacy: &["year_label", "Reporting Year", "Ajanjakso"],
    required: &[&["year", "vuosi", "period", "ajanjakso"]],
    excluded: &[],
    numeric: false,
};

static GENDER_MALE: ConceptRule = ConceptRule {
    exact: &["Male", "Males", "Men", "Miehet"],
    legacy: &["Male employees", "Number of males"],
    required: &[MALE_WORDS],
    excluded: &[
        "female", "women", "woman", "nais", "share", "%", "percent", "proportion", "osuus",
    ],
    numeric: true,
};

static GENDER_FEMALE: ConceptRule = ConceptRule {
    exact: &["Female", "Females", "Women", "Naiset"],
    legacy: &["Female employees", "Number of females"],
    required: &[FEMALE_WORDS],
    excluded: SHARE_WORDS,
    numeric: true,
};

static GENDER_MALE_SHARE: ConceptRule = ConceptRule {
    exact: &["ShareOfMales", "MaleShare", "Share of males"],
    legacy: &["Male %", "Miesten osuus"],
    required: &[MALE_WORDS, SHARE_WORDS],
    excluded: &["female", "women", "woman", "nais"],
    numeric: true,
};

static GENDER_FEMALE_SHARE: ConceptRule = ConceptRule {
    exact: &["ShareOfFemales", "FemaleShare", "Share of females"],
    legacy: &["Female %", "Naisten osuus"],
    required: &[FEMALE_WORDS, SHARE_WORDS],
    excluded: &[],
    numeric: true,
};

static BACKGROUND_DOMESTIC: ConceptRule = ConceptRule {
    exact: &["Finnish", "Finns", "Suomalaiset"],
    legacy: &["Finnish employees", "Finnish background"],
    required: &[DOMESTIC_WORDS],
    excluded: &[
        "foreign", "immigra", "non-finnish", "ulkomaa", "maahanmuut", "vieraskiel", "share",
        "%", "percent", "proportion", "osuus", "revenue", "turnover", "sales", "liikevaihto",
        "firm", "compan", "startup", "yritys", "yrityks", "r&d", "research", "invest", "(eur",
        "€",
    ],
    numeric: true,
};

static BACKGROUND_FOREIGN: ConceptRule = ConceptRule {
    exact: &["Foreign", "Immigrants", "Ulkomaalaiset"],
    legacy: &["Foreign employees", "Foreign background", "Immigrant background"],
    required: &[FOREIGN_WORDS],
    excluded: &[
        "share", "%", "percent", "proportion", "osuus", "revenue", "turnover", "sales",
        "liikevaihto", "firm", "compan", "startup", "yritys", "yrityks", "r&d", "research",
        "invest", "(eur", "€",
    ],
    numeric: true,
};

static BACKGROUND_DOMESTIC_SHARE: ConceptRule = ConceptRule {
    exact: &["ShareOfFinnish", "Share of Finnish", "FinnishShare"],
    legacy: &["Finnish %", "Suomalaisten osuus"],
    required: &[DOMESTIC_WORDS, SHARE_WORDS],
    excluded: &[
        "foreign", "immigra", "non-finnish", "ulkomaa", "maahanmuut", "vieraskiel", "revenue",
        "turnover", "sales", "liikevaihto", "r&d", "research", "invest",
    ],
    numeric: true,
};

static BACKGROUND_FOREIGN_SHARE: ConceptRule = ConceptRule {
    exact: &["ShareOfForeign", "Share of foreign", "ForeignShare"],
    legacy: &["Foreign %", "Share of immigrants", "Ulkomaalaisten osuus"],
    required: &[FOREIGN_WORDS, SHARE_WORDS],
    excluded: &[
        "revenue", "turnover", "sales", "liikevaihto", "r&d", "research", "invest",
    ],
    numeric: true,
};

static RD_INVESTMENT: ConceptRule = ConceptRule {
    exact: &["RDInvestment", "RandDInvestment", "R&D Investment"],
    legacy: &["R&D investments", "Research and development", "T&K-investoinnit"],
    required: &[RD_WORDS],
    excluded: &["share", "%", "osuus"],
    numeric: true,
};

static BAROMETER_PAST: ConceptRule = ConceptRule {
    exact: &["Past3Months", "BarometerPast"],
    legacy: &["Past 3 months", "Edelliset 3 kuukautta"],
    required: &[&["past", "previous", "edelli", "viime"]],
    excluded: &["next", "coming", "seuraav", "tuleva"],
    numeric: true,
};

static BAROMETER_NEXT: ConceptRule = ConceptRule {
    exact: &["Next3Months", "BarometerNext"],
    legacy: &["Next 3 months", "Seuraavat 3 kuukautta"],
    required: &[&["next", "coming", "seuraav", "tuleva"]],
    excluded: &["past", "previous", "edelli", "viime"],
    numeric: true,
};

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Per-call exclusion hints.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Columns satisfying any of these concepts are never returned.
    pub exclude: Vec<Concept>,
}

impl ResolveOptions {
    /// The default exclusion hints for `concept`.
    pub fn for_concept(concept: Concept) -> Self {
        Self {
            exclude: concept.default_exclusions().to_vec(),
        }
    }
}

/// Resolve `concept` with its default exclusion hints.
pub fn resolve(dataset: &Dataset, concept: Concept) -> Option<ColumnKey> {
    resolve_with(dataset, concept, &ResolveOptions::for_concept(concept))
}

/// Find the column holding `concept`, or `None` if no header qualifies.
///
/// Candidates are taken from the union of keys over all rows. Exact names
/// beat legacy names, which beat keyword matches; within a tier the first
/// column in union order wins.
pub fn resolve_with(
    dataset: &Dataset,
    concept: Concept,
    options: &ResolveOptions,
) -> Option<ColumnKey> {
    if dataset.is_empty() {
        return None;
    }

    let rule = concept.rule();
    let rejecting: Vec<&ConceptRule> = options
        .exclude
        .iter()
        .copied()
        .chain(concept.opposite())
        .map(Concept::rule)
        .collect();

    let found = dataset
        .column_names
        .iter()
        .filter_map(|col| rule.tier(col).map(|tier| (tier, col)))
        .filter(|(_, col)| !rejecting.iter().any(|r| r.matches(col)))
        .filter(|(_, col)| !rule.numeric || dataset.has_numeric(col))
        .min_by_key(|(tier, _)| *tier);

    match found {
        Some((tier, col)) => {
            log::debug!("Resolved {concept:?} -> {col:?} ({tier:?})");
            Some(col.clone())
        }
        None => {
            log::debug!("No column for {concept:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset(value: serde_json::Value) -> Dataset {
        Dataset::from_json_value(&value).unwrap()
    }

    #[test]
    fn exact_name_beats_fuzzy_match() {
        let ds = dataset(json!([
            {"Year": 2020, "Early Revenue for Stage-1 Firms": 3.0, "RevenueEarlyStage": 1.5}
        ]));
        assert_eq!(
            resolve(&ds, Concept::RevenueEarlyStage).as_deref(),
            Some("RevenueEarlyStage")
        );
    }

    #[test]
    fn legacy_name_beats_fuzzy_match() {
        let ds = dataset(json!([
            {"Revenue of scale-up firms": 2.0, "Scaleup Revenue": 4.0}
        ]));
        assert_eq!(
            resolve(&ds, Concept::RevenueLaterStage).as_deref(),
            Some("Scaleup Revenue")
        );
    }

    #[test]
    fn general_revenue_skips_stage_columns() {
        let ds = dataset(json!([
            {"Early Stage Startup Revenue": 1.0, "Scaleup Revenue": 2.0, "Startup revenue (EUR)": 3.0}
        ]));
        assert_eq!(
            resolve(&ds, Concept::Revenue).as_deref(),
            Some("Startup revenue (EUR)")
        );
    }

    #[test]
    fn revenue_is_unresolved_when_only_stage_columns_exist() {
        let ds = dataset(json!([{"RevenueEarlyStage": 1.0, "RevenueLaterStage": 2.0}]));
        assert_eq!(resolve(&ds, Concept::Revenue), None);
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let ds = dataset(json!([{"  employees in FINLAND ": 120, " EMPLOYEES": 300}]));
        assert_eq!(
            resolve(&ds, Concept::EmployeesInCountry).as_deref(),
            Some("  employees in FINLAND ")
        );
        assert_eq!(resolve(&ds, Concept::Employees).as_deref(), Some(" EMPLOYEES"));
    }

    #[test]
    fn candidates_come_from_every_row() {
        let ds = dataset(json!([
            {"Year": 2015, "Revenue": 1.0},
            {"Year": 2022, "Revenue": 2.0, "RDInvestment": 0.4}
        ]));
        assert_eq!(resolve(&ds, Concept::RDInvestment).as_deref(), Some("RDInvestment"));
    }

    #[test]
    fn label_columns_are_not_data_bearing() {
        let ds = dataset(json!([
            {"Revenue note": "preliminary", "Liikevaihto (mrd €)": 12.5}
        ]));
        assert_eq!(
            resolve(&ds, Concept::Revenue).as_deref(),
            Some("Liikevaihto (mrd €)")
        );
    }

    #[test]
    fn year_column_may_hold_labels() {
        let ds = dataset(json!([{"Vuosi": "2021", "Revenue": 1.0}]));
        assert_eq!(resolve(&ds, Concept::Year).as_deref(), Some("Vuosi"));
    }

    #[test]
    fn first_key_in_union_order_wins_within_a_tier() {
        let ds = dataset(json!([
            {"Sales total": 1.0},
            {"Sales total": 2.0, "Turnover total": 3.0}
        ]));
        assert_eq!(resolve(&ds, Concept::Revenue).as_deref(), Some("Sales total"));
    }

    #[test]
    fn female_columns_never_resolve_as_male() {
        let ds = dataset(json!([
            {"Share of females": 0.3, "Female employees": 30, "Number of females": 31}
        ]));
        assert_eq!(resolve(&ds, Concept::GenderMale), None);
        assert_eq!(resolve(&ds, Concept::GenderMaleShare), None);
        assert_eq!(
            resolve(&ds, Concept::GenderFemaleShare).as_deref(),
            Some("Share of females")
        );
        assert_eq!(
            resolve(&ds, Concept::GenderFemale).as_deref(),
            Some("Female employees")
        );
    }

    #[test]
    fn resolved_polarity_never_satisfies_the_opposite_rule() {
        let ds = dataset(json!([{
            "Naisten osuus": 0.31, "Miesten osuus": 0.69, "Naiset": 31, "Miehet": 69,
            "Share of non-Finnish": 0.2, "Share of Finnish": 0.8,
            "Foreign background": 20, "Finnish background": 80
        }]));
        for concept in Concept::ALL {
            let Some(opposite) = concept.opposite() else { continue };
            let key = resolve(&ds, concept).unwrap_or_else(|| panic!("{concept:?} unresolved"));
            assert!(!opposite.rule().matches(&key), "{concept:?} -> {key}");
        }
        assert_eq!(
            resolve(&ds, Concept::BackgroundForeignShare).as_deref(),
            Some("Share of non-Finnish")
        );
        assert_eq!(
            resolve(&ds, Concept::BackgroundDomesticShare).as_deref(),
            Some("Share of Finnish")
        );
    }

    #[test]
    fn missing_firms_in_country_is_none() {
        let ds = dataset(json!([{"Year": 2020, "Revenue": 1.0, "Employees": 10}]));
        assert_eq!(resolve(&ds, Concept::FirmsInCountry), None);
        assert_eq!(resolve(&ds, Concept::Firms), None);
    }

    #[test]
    fn firms_are_split_by_stage_and_country() {
        let ds = dataset(json!([{
            "Number of startups": 4000, "Startups in Finland": 3500,
            "Early Stage Startups": 2500, "Number of scaleups": 600,
            "Startup revenue": 20.0
        }]));
        assert_eq!(resolve(&ds, Concept::Firms).as_deref(), Some("Number of startups"));
        assert_eq!(
            resolve(&ds, Concept::FirmsInCountry).as_deref(),
            Some("Startups in Finland")
        );
        assert_eq!(
            resolve(&ds, Concept::FirmsEarlyStageCount).as_deref(),
            Some("Early Stage Startups")
        );
        assert_eq!(
            resolve(&ds, Concept::FirmsLaterStageCount).as_deref(),
            Some("Number of scaleups")
        );
    }

    #[test]
    fn explicit_exclusions_apply() {
        let ds = dataset(json!([{"Employees": 10, "Staff": 12}]));
        let options = ResolveOptions {
            exclude: vec![Concept::Employees],
        };
        assert_eq!(resolve_with(&ds, Concept::Employees, &options), None);
    }

    #[test]
    fn empty_dataset_resolves_nothing() {
        let ds = Dataset::default();
        for concept in Concept::ALL {
            assert_eq!(resolve(&ds, concept), None);
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let ds = dataset(json!([
            {"Year": 2020, "Revenue": 1.0, "RevenueEarlyStage": 0.2, "Employees": 5, "Naiset": 2}
        ]));
        for concept in Concept::ALL {
            assert_eq!(resolve(&ds, concept), resolve(&ds, concept));
        }
    }

    #[test]
    fn finance_columns_never_count_as_background() {
        let ds = dataset(json!([{
            "Year": 2021,
            "Revenue of Finnish startups": 3.2,
            "Foreign startups": 140,
            "Share of foreign investment": 0.4,
            "Finnish employees": 5200
        }]));
        assert_eq!(
            resolve(&ds, Concept::BackgroundDomestic).as_deref(),
            Some("Finnish employees")
        );
        assert_eq!(resolve(&ds, Concept::BackgroundForeign), None);
        assert_eq!(resolve(&ds, Concept::BackgroundForeignShare), None);

        let revenue_only = dataset(json!([{"Year": 2021, "Revenue of Finnish startups": 3.2}]));
        for concept in [
            Concept::BackgroundDomestic,
            Concept::BackgroundForeign,
            Concept::BackgroundDomesticShare,
            Concept::BackgroundForeignShare,
        ] {
            assert_eq!(resolve(&revenue_only, concept), None, "{concept:?}");
        }
    }
}
