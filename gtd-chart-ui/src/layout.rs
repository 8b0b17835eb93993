//! Control metadata for the dashboard page.
//!
//! [`DashboardLayout`] is computed once from the loaded table. The page
//! renders from it and `/api/layout` serves it as JSON so the client script
//! knows each slider's defaults and which outputs depend on which controls.

use gtd_charts::{affected_outputs, dependency_table, Dependency, InputId, OutputId};
use gtd_db::models::YearBounds;
use gtd_db::Database;
use gtd_utils::marks::year_marks;
use serde::Serialize;

pub const PAGE_TITLE: &str = "Global Terrorist Attack Data Visualization Dashboard";
pub const COUNTRY_PLACEHOLDER: &str = "Select Countries from here";

/// Default start year of the map and yearly-attacks slider.
const YEARS_1_START: i32 = 2010;
/// Default start year of the left column slider.
const YEARS_2_START: i32 = 2012;
/// Default start year of the right column slider.
const YEARS_3_START: i32 = 2010;
/// Mark spacing on the column sliders.
const COLUMN_MARK_STEP: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliderMark {
    pub value: i32,
    pub label: String,
}

/// One year range slider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliderSpec {
    pub id: InputId,
    pub min: i32,
    pub max: i32,
    /// Initial `[start, end]`.
    pub value: [i32; 2],
    pub marks: Vec<SliderMark>,
}

impl SliderSpec {
    /// A slider spanning `bounds`, initially selecting `[default_start, max]`.
    /// The default start is clamped into the bounds.
    pub fn new(
        id: InputId,
        bounds: YearBounds,
        default_start: i32,
        mark_step: usize,
        short_labels: bool,
    ) -> Self {
        let start = default_start.max(bounds.min).min(bounds.max);
        let marks = year_marks(bounds.min, bounds.max, mark_step, short_labels)
            .into_iter()
            .map(|(value, label)| SliderMark { value, label })
            .collect();
        Self {
            id,
            min: bounds.min,
            max: bounds.max,
            value: [start, bounds.max],
            marks,
        }
    }
}

/// Outputs the page re-requests when `input` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trigger {
    pub input: InputId,
    pub outputs: Vec<OutputId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardLayout {
    pub title: &'static str,
    pub bounds: YearBounds,
    pub years_1: SliderSpec,
    pub years_2: SliderSpec,
    pub years_3: SliderSpec,
    /// Sorted unique country names.
    pub countries: Vec<String>,
    pub placeholder: &'static str,
    pub footer: String,
    pub dependencies: Vec<Dependency>,
    pub triggers: Vec<Trigger>,
}

impl DashboardLayout {
    pub fn new(bounds: YearBounds, countries: Vec<String>) -> Self {
        Self {
            title: PAGE_TITLE,
            bounds,
            years_1: SliderSpec::new(InputId::Years1, bounds, YEARS_1_START, 1, true),
            years_2: SliderSpec::new(
                InputId::Years2,
                bounds,
                YEARS_2_START,
                COLUMN_MARK_STEP,
                false,
            ),
            years_3: SliderSpec::new(
                InputId::Years3,
                bounds,
                YEARS_3_START,
                COLUMN_MARK_STEP,
                false,
            ),
            countries,
            placeholder: COUNTRY_PLACEHOLDER,
            footer: format!(
                "Global Terrorism Data from {} till {}",
                bounds.min, bounds.max
            ),
            dependencies: dependency_table(),
            triggers: InputId::ALL
                .iter()
                .map(|input| Trigger {
                    input: *input,
                    outputs: affected_outputs(&[*input]),
                })
                .collect(),
        }
    }

    /// Build the layout from the loaded table.
    pub fn from_database(db: &Database) -> anyhow::Result<Self> {
        let bounds = db.query_year_bounds()?;
        let countries = db.query_countries()?;
        log::info!(
            "[GTD] layout: years {}..={}, {} countries",
            bounds.min,
            bounds.max,
            countries.len()
        );
        Ok(Self::new(bounds, countries))
    }
}
