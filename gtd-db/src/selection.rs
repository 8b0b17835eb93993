//! Control values that parameterize a query.
//!
//! A [`Selection`] is the normalized form of what the dashboard controls
//! currently hold: a set of countries from the multi-select dropdown and an
//! inclusive year range from one of the range sliders.

use serde::{Deserialize, Serialize};

/// Inclusive range of incident years.
///
/// A range with `start > end` is valid and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Interpret a slider value. Only a two-element `[start, end]` list is a
    /// range; anything else leaves the range undefined.
    pub fn from_slider(values: &[i32]) -> Option<Self> {
        match values {
            [start, end] => Some(Self::new(*start, *end)),
            _ => None,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Label used in chart titles, e.g. `2014 - 2015`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

/// Normalized country set plus optional year range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    countries: Vec<String>,
    years: Option<YearRange>,
}

impl Selection {
    /// Build a selection from raw dropdown values.
    ///
    /// Country names are trimmed, the dropdown's empty placeholder value is
    /// dropped, and duplicates are removed keeping the first occurrence.
    pub fn new<I, S>(countries: I, years: Option<YearRange>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for country in countries {
            let country = country.as_ref().trim();
            if country.is_empty() || normalized.iter().any(|c| c == country) {
                continue;
            }
            normalized.push(country.to_string());
        }
        Self {
            countries: normalized,
            years,
        }
    }

    /// A selection that filters on years only.
    pub fn years_only(years: Option<YearRange>) -> Self {
        Self {
            countries: Vec::new(),
            years,
        }
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn years(&self) -> Option<YearRange> {
        self.years
    }

    /// `Iraq, Syria` style label for chart titles.
    pub fn countries_label(&self) -> String {
        self.countries.join(", ")
    }

    /// Year range label for chart titles; empty when the range is undefined.
    pub fn years_label(&self) -> String {
        self.years.map(|y| y.label()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_and_duplicates_are_dropped() {
        let selection = Selection::new(["", "Iraq", " Iraq ", "Nigeria", ""], None);
        assert_eq!(selection.countries(), ["Iraq", "Nigeria"]);
        assert_eq!(selection.countries_label(), "Iraq, Nigeria");
    }

    #[test]
    fn test_placeholder_only_is_empty() {
        let selection = Selection::new([""], Some(YearRange::new(2010, 2017)));
        assert!(selection.countries().is_empty());
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let range = YearRange::new(2014, 2015);
        assert!(!range.contains(2013));
        assert!(range.contains(2014));
        assert!(range.contains(2015));
        assert!(!range.contains(2016));
        assert!(!YearRange::new(2015, 2014).contains(2014));
    }

    #[test]
    fn test_from_slider() {
        assert_eq!(
            YearRange::from_slider(&[2010, 2017]),
            Some(YearRange::new(2010, 2017))
        );
        assert_eq!(YearRange::from_slider(&[]), None);
        assert_eq!(YearRange::from_slider(&[2010]), None);
        assert_eq!(YearRange::from_slider(&[2010, 2012, 2014]), None);
    }

    #[test]
    fn test_labels() {
        let selection = Selection::new(["Iraq"], Some(YearRange::new(2014, 2015)));
        assert_eq!(selection.years_label(), "2014 - 2015");
        assert_eq!(Selection::years_only(None).years_label(), "");
    }
}
