//! Callback registry: which handler renders which output, and which
//! controls each output depends on.
//!
//! The page re-requests an output whenever one of its declared inputs
//! changes. [`dispatch`] resolves the relevant control values from the
//! request and calls the handler registered for the output.

use crate::figure::Figure;
use crate::handlers;
use crate::jitter::JitterConfig;
use gtd_db::{Database, Selection, YearRange};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dashboard control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputId {
    #[serde(rename = "countries")]
    Countries,
    #[serde(rename = "years_1")]
    Years1,
    #[serde(rename = "years_2")]
    Years2,
    #[serde(rename = "years_3")]
    Years3,
}

impl InputId {
    pub const ALL: [InputId; 4] = [
        InputId::Countries,
        InputId::Years1,
        InputId::Years2,
        InputId::Years3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputId::Countries => "countries",
            InputId::Years1 => "years_1",
            InputId::Years2 => "years_2",
            InputId::Years3 => "years_3",
        }
    }
}

/// A chart on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputId {
    Map,
    CountryByYear,
    CountryAttacks,
    Deaths,
    CountryDeaths,
    GName,
}

impl OutputId {
    pub const ALL: [OutputId; 6] = [
        OutputId::Map,
        OutputId::CountryByYear,
        OutputId::CountryAttacks,
        OutputId::Deaths,
        OutputId::CountryDeaths,
        OutputId::GName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputId::Map => "map",
            OutputId::CountryByYear => "country_by_year",
            OutputId::CountryAttacks => "country_attacks",
            OutputId::Deaths => "deaths",
            OutputId::CountryDeaths => "country_deaths",
            OutputId::GName => "g_name",
        }
    }

    /// Controls whose changes re-render this output.
    pub fn inputs(&self) -> &'static [InputId] {
        match self {
            OutputId::Map | OutputId::CountryByYear => &[InputId::Countries, InputId::Years1],
            OutputId::CountryAttacks => &[InputId::Countries, InputId::Years2],
            OutputId::CountryDeaths => &[InputId::Countries, InputId::Years3],
            OutputId::GName => &[InputId::Years3],
            OutputId::Deaths => &[InputId::Years2],
        }
    }

    /// The year slider this output reads.
    fn year_input(&self) -> InputId {
        self.inputs()
            .iter()
            .copied()
            .find(|input| *input != InputId::Countries)
            .unwrap_or(InputId::Years1)
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an output id names no chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOutput(pub String);

impl fmt::Display for UnknownOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown output id: {}", self.0)
    }
}

impl std::error::Error for UnknownOutput {}

impl FromStr for OutputId {
    type Err = UnknownOutput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputId::ALL
            .iter()
            .copied()
            .find(|output| output.as_str() == s)
            .ok_or_else(|| UnknownOutput(s.to_string()))
    }
}

/// Current control values as posted by the page.
///
/// Every field may be absent or `null`; an absent control reads as an
/// undefined selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackRequest {
    #[serde(default)]
    pub countries: Option<Vec<String>>,
    #[serde(default)]
    pub years_1: Option<Vec<i32>>,
    #[serde(default)]
    pub years_2: Option<Vec<i32>>,
    #[serde(default)]
    pub years_3: Option<Vec<i32>>,
}

impl CallbackRequest {
    /// Year range held by a slider, if it holds a well-formed one.
    pub fn years(&self, input: InputId) -> Option<YearRange> {
        let values = match input {
            InputId::Countries => None,
            InputId::Years1 => self.years_1.as_deref(),
            InputId::Years2 => self.years_2.as_deref(),
            InputId::Years3 => self.years_3.as_deref(),
        };
        values.and_then(YearRange::from_slider)
    }

    /// The selection an output sees: its year slider, plus the countries
    /// when the output depends on the dropdown.
    pub fn selection_for(&self, output: OutputId) -> Selection {
        let years = self.years(output.year_input());
        if output.inputs().contains(&InputId::Countries) {
            Selection::new(self.countries.as_deref().unwrap_or_default(), years)
        } else {
            Selection::years_only(years)
        }
    }
}

/// Render one output from the current control values.
pub fn dispatch(
    output: OutputId,
    db: &Database,
    request: &CallbackRequest,
    jitter: JitterConfig,
) -> anyhow::Result<Figure> {
    let selection = request.selection_for(output);
    log::debug!(
        "[GTD] callback: {} countries=[{}] years=[{}]",
        output,
        selection.countries_label(),
        selection.years_label()
    );
    match output {
        OutputId::Map => handlers::incident_map(db, &selection, jitter),
        OutputId::CountryByYear => handlers::country_by_year(db, &selection),
        OutputId::CountryAttacks => handlers::country_attacks(db, &selection),
        OutputId::CountryDeaths => handlers::country_targets(db, &selection),
        OutputId::GName => handlers::most_active_groups(db, &selection),
        OutputId::Deaths => handlers::deadliest_countries(db, &selection),
    }
}

/// One row of the output/input dependency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub output: OutputId,
    pub inputs: &'static [InputId],
}

/// The full dependency table, in page order.
pub fn dependency_table() -> Vec<Dependency> {
    OutputId::ALL
        .iter()
        .map(|output| Dependency {
            output: *output,
            inputs: output.inputs(),
        })
        .collect()
}

/// Outputs to re-render after `changed` inputs took new values.
pub fn affected_outputs(changed: &[InputId]) -> Vec<OutputId> {
    OutputId::ALL
        .iter()
        .copied()
        .filter(|output| output.inputs().iter().any(|input| changed.contains(input)))
        .collect()
}
