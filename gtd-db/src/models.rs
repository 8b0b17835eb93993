//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be returned as JSON or folded
//! into chart specifications.

use serde::Serialize;

/// One incident row, with the internal column names.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Incident {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Composite date derived at load time (`YYYY-MM-DD`).
    pub date: String,
    pub country: String,
    pub city: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Fatalities; `None` when the export leaves it blank.
    pub killed: Option<f64>,
    /// Injuries; `None` when the export leaves it blank.
    pub wounded: Option<f64>,
    pub summary: String,
    pub target: String,
    pub group_name: String,
    pub attack_type: String,
    pub region: String,
}

/// Number of incidents for one (year, country) pair.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearCountryCount {
    pub year: i32,
    pub country: String,
    pub count: i64,
}

/// Number of incidents for one category within one country, e.g. a
/// perpetrator group or a target.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountryKeyCount {
    pub country: String,
    pub key: String,
    pub count: i64,
}

/// Number of incidents for one category across all countries.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeyCount {
    pub key: String,
    pub count: i64,
}

/// Fatality total for one country.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountryDeaths {
    pub country: String,
    /// Sum of fatalities; blank fatality counts contribute nothing.
    pub deaths: f64,
    /// Incidents with a reported fatality count.
    pub reported_incidents: i64,
}

/// Earliest and latest incident year in the table.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}
