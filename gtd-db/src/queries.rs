//! Typed query methods backing the dashboard charts.
//!
//! Every aggregate follows the same shape: filter by the selection, group by
//! one or two categorical keys, count or sum a measure, then sort descending
//! by the measure. Ties are broken by ascending group key, which is the order
//! the grouped rows come out in, so results are deterministic.
//!
//! A selection that cannot match anything (no countries where countries are
//! required, or no year range) short-circuits to an empty result without
//! touching the database.

use crate::models::{CountryDeaths, CountryKeyCount, Incident, KeyCount, YearBounds, YearCountryCount};
use crate::{Database, Selection};
use rusqlite::params_from_iter;
use rusqlite::types::Value;

/// Categorical column ranked within each selected country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountryCategory {
    GroupName,
    Target,
}

impl CountryCategory {
    fn column(self) -> &'static str {
        match self {
            CountryCategory::GroupName => "group_name",
            CountryCategory::Target => "target",
        }
    }
}

/// WHERE clause and bound values for a country + year filter.
///
/// Returns `None` when the selection can match no rows.
fn country_year_filter(selection: &Selection) -> Option<(String, Vec<Value>)> {
    let years = selection.years()?;
    let countries = selection.countries();
    if countries.is_empty() {
        return None;
    }
    let placeholders = (0..countries.len())
        .map(|i| format!("?{}", i + 3))
        .collect::<Vec<_>>()
        .join(", ");
    let clause = format!("year BETWEEN ?1 AND ?2 AND country IN ({})", placeholders);

    let mut values = Vec::with_capacity(countries.len() + 2);
    values.push(Value::Integer(years.start.into()));
    values.push(Value::Integer(years.end.into()));
    values.extend(countries.iter().map(|c| Value::Text(c.clone())));
    Some((clause, values))
}

impl Database {
    /// Incidents per (year, country) for the selected countries and years.
    ///
    /// Ordered by year, then country.
    pub fn query_yearly_counts(
        &self,
        selection: &Selection,
    ) -> anyhow::Result<Vec<YearCountryCount>> {
        let Some((filter, values)) = country_year_filter(selection) else {
            return Ok(Vec::new());
        };
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT year, country, COUNT(*) FROM incidents
             WHERE {}
             GROUP BY year, country
             ORDER BY year, country",
            filter
        ))?;
        let rows = stmt
            .query_map(params_from_iter(values), |row| {
                Ok(YearCountryCount {
                    year: row.get(0)?,
                    country: row.get(1)?,
                    count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[GTD] query: query_yearly_counts returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Full incident rows for the selected countries and years, ordered by
    /// country then date.
    pub fn query_incident_points(&self, selection: &Selection) -> anyhow::Result<Vec<Incident>> {
        let Some((filter, values)) = country_year_filter(selection) else {
            return Ok(Vec::new());
        };
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT year, month, day, date, country, city, longitude, latitude, killed, wounded,
                    summary, target, group_name, attack_type, region
             FROM incidents
             WHERE {}
             ORDER BY country, date, id",
            filter
        ))?;
        let rows = stmt
            .query_map(params_from_iter(values), |row| {
                Ok(Incident {
                    year: row.get(0)?,
                    month: row.get(1)?,
                    day: row.get(2)?,
                    date: row.get(3)?,
                    country: row.get(4)?,
                    city: row.get(5)?,
                    longitude: row.get(6)?,
                    latitude: row.get(7)?,
                    killed: row.get(8)?,
                    wounded: row.get(9)?,
                    summary: row.get(10)?,
                    target: row.get(11)?,
                    group_name: row.get(12)?,
                    attack_type: row.get(13)?,
                    region: row.get(14)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[GTD] query: query_incident_points returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Most active perpetrator groups within each selected country.
    ///
    /// At most `limit` groups per country, ordered by country, then count
    /// descending.
    pub fn query_top_groups_by_country(
        &self,
        selection: &Selection,
        limit: usize,
    ) -> anyhow::Result<Vec<CountryKeyCount>> {
        self.query_top_by_country(selection, CountryCategory::GroupName, limit)
    }

    /// Most frequently attacked targets within each selected country.
    ///
    /// At most `limit` targets per country, ordered by country, then count
    /// descending. Rows without a target are not counted.
    pub fn query_top_targets_by_country(
        &self,
        selection: &Selection,
        limit: usize,
    ) -> anyhow::Result<Vec<CountryKeyCount>> {
        self.query_top_by_country(selection, CountryCategory::Target, limit)
    }

    fn query_top_by_country(
        &self,
        selection: &Selection,
        category: CountryCategory,
        limit: usize,
    ) -> anyhow::Result<Vec<CountryKeyCount>> {
        let Some((filter, values)) = country_year_filter(selection) else {
            return Ok(Vec::new());
        };
        let column = category.column();
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT country, {column}, COUNT(*) AS n FROM incidents
             WHERE {filter} AND {column} <> ''
             GROUP BY country, {column}
             ORDER BY country, n DESC, {column}",
        ))?;
        let grouped = stmt
            .query_map(params_from_iter(values), |row| {
                Ok(CountryKeyCount {
                    country: row.get(0)?,
                    key: row.get(1)?,
                    count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        // Rows arrive grouped by country; keep the first `limit` of each
        let mut rows = Vec::new();
        let mut taken = 0usize;
        for row in grouped {
            if rows
                .last()
                .map(|prev: &CountryKeyCount| prev.country != row.country)
                .unwrap_or(true)
            {
                taken = 0;
            }
            if taken < limit {
                taken += 1;
                rows.push(row);
            }
        }
        log::info!(
            "[GTD] query: query_top_by_country({}) returned {} records",
            column,
            rows.len()
        );
        Ok(rows)
    }

    /// Most active perpetrator groups across all countries.
    ///
    /// Only the selection's year range applies; its countries are ignored.
    pub fn query_top_groups(
        &self,
        selection: &Selection,
        limit: usize,
    ) -> anyhow::Result<Vec<KeyCount>> {
        let Some(years) = selection.years() else {
            return Ok(Vec::new());
        };
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT group_name, COUNT(*) AS n FROM incidents
             WHERE year BETWEEN ?1 AND ?2 AND group_name <> ''
             GROUP BY group_name
             ORDER BY n DESC, group_name
             LIMIT ?3",
        )?;
        let rows = stmt
            .query_map(
                rusqlite::params![years.start, years.end, limit as i64],
                |row| {
                    Ok(KeyCount {
                        key: row.get(0)?,
                        count: row.get(1)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[GTD] query: query_top_groups returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Countries with the most fatalities.
    ///
    /// Only the selection's year range applies; its countries are ignored.
    /// Blank fatality counts are skipped by the sum, so a country whose
    /// incidents all lack a count totals zero.
    pub fn query_top_countries_by_deaths(
        &self,
        selection: &Selection,
        limit: usize,
    ) -> anyhow::Result<Vec<CountryDeaths>> {
        let Some(years) = selection.years() else {
            return Ok(Vec::new());
        };
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT country, COALESCE(SUM(killed), 0.0) AS deaths, COUNT(killed)
             FROM incidents
             WHERE year BETWEEN ?1 AND ?2
             GROUP BY country
             ORDER BY deaths DESC, country
             LIMIT ?3",
        )?;
        let rows = stmt
            .query_map(
                rusqlite::params![years.start, years.end, limit as i64],
                |row| {
                    Ok(CountryDeaths {
                        country: row.get(0)?,
                        deaths: row.get(1)?,
                        reported_incidents: row.get(2)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[GTD] query: query_top_countries_by_deaths returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Sorted list of distinct countries (the dropdown options).
    pub fn query_countries(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT DISTINCT country FROM incidents ORDER BY country")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::info!(
            "[GTD] query: query_countries returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Earliest and latest incident year (the slider bounds).
    pub fn query_year_bounds(&self) -> anyhow::Result<YearBounds> {
        let conn = self.conn()?;
        let (min, max) = conn.query_row("SELECT MIN(year), MAX(year) FROM incidents", [], |row| {
            Ok((row.get::<_, Option<i32>>(0)?, row.get::<_, Option<i32>>(1)?))
        })?;
        match (min, max) {
            (Some(min), Some(max)) => {
                log::info!("[GTD] query: query_year_bounds returned ({}, {})", min, max);
                Ok(YearBounds { min, max })
            }
            _ => anyhow::bail!("incident table is empty"),
        }
    }

    /// Total number of loaded incidents.
    pub fn query_incident_count(&self) -> anyhow::Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM incidents", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::sample_db;
    use crate::{Database, Selection, YearRange};

    const ISIL: &str = "Islamic State of Iraq and the Levant (ISIL)";

    fn all_countries(db: &Database, years: YearRange) -> Selection {
        Selection::new(db.query_countries().unwrap(), Some(years))
    }

    #[test]
    fn iraq_2014_2015_has_two_yearly_points() {
        let db = sample_db();
        let selection = Selection::new(["Iraq"], Some(YearRange::new(2014, 2015)));
        let yearly = db.query_yearly_counts(&selection).unwrap();

        assert_eq!(yearly.len(), 2);
        assert_eq!((yearly[0].year, yearly[0].count), (2014, 3));
        assert_eq!((yearly[1].year, yearly[1].count), (2015, 2));

        // Each point equals the number of matching rows for that year
        let incidents = db.query_incident_points(&selection).unwrap();
        for point in &yearly {
            let expected = incidents.iter().filter(|i| i.year == point.year).count() as i64;
            assert_eq!(point.count, expected);
        }
    }

    #[test]
    fn empty_selection_yields_empty_results() {
        let db = sample_db();
        let years = Some(YearRange::new(1970, 2017));
        for selection in [
            Selection::new(Vec::<String>::new(), years),
            Selection::new([""], years),
        ] {
            assert!(db.query_yearly_counts(&selection).unwrap().is_empty());
            assert!(db.query_incident_points(&selection).unwrap().is_empty());
            assert!(db.query_top_groups_by_country(&selection, 5).unwrap().is_empty());
            assert!(db.query_top_targets_by_country(&selection, 5).unwrap().is_empty());
        }
    }

    #[test]
    fn undefined_years_yield_empty_results() {
        let db = sample_db();
        let selection = Selection::new(["Iraq"], None);
        assert!(db.query_yearly_counts(&selection).unwrap().is_empty());
        assert!(db.query_top_groups(&selection, 15).unwrap().is_empty());
        assert!(db.query_top_countries_by_deaths(&selection, 15).unwrap().is_empty());
    }

    #[test]
    fn year_filter_is_inclusive_for_every_range() {
        let db = sample_db();
        let bounds = db.query_year_bounds().unwrap();
        let everything = db
            .query_incident_points(&all_countries(&db, YearRange::new(bounds.min, bounds.max)))
            .unwrap();
        assert_eq!(everything.len(), 15);

        for start in (bounds.min - 1)..=(bounds.max + 1) {
            for end in start..=(bounds.max + 1) {
                let range = YearRange::new(start, end);
                let filtered = db.query_incident_points(&all_countries(&db, range)).unwrap();
                assert!(filtered.iter().all(|i| start <= i.year && i.year <= end));
                let expected = everything.iter().filter(|i| range.contains(i.year)).count();
                assert_eq!(filtered.len(), expected, "range {}", range.label());
            }
        }
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let db = sample_db();
        let selection = all_countries(&db, YearRange::new(2015, 2014));
        assert!(db.query_incident_points(&selection).unwrap().is_empty());
        assert!(db.query_top_groups(&selection, 15).unwrap().is_empty());
    }

    #[test]
    fn country_filter_is_subset_of_selection() {
        let db = sample_db();
        let selection = Selection::new(
            ["Nigeria", "Afghanistan", "Atlantis"],
            Some(YearRange::new(1970, 2017)),
        );
        let incidents = db.query_incident_points(&selection).unwrap();
        assert_eq!(incidents.len(), 5);
        assert!(incidents
            .iter()
            .all(|i| selection.countries().contains(&i.country)
                && selection.years().is_some_and(|r| r.contains(i.year))));
    }

    #[test]
    fn incident_points_are_ordered_by_country_then_date() {
        let db = sample_db();
        let incidents = db
            .query_incident_points(&all_countries(&db, YearRange::new(1970, 2017)))
            .unwrap();
        let keys: Vec<(&str, &str)> = incidents
            .iter()
            .map(|i| (i.country.as_str(), i.date.as_str()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn top_groups_by_country_counts_and_order() {
        let db = sample_db();
        let selection = Selection::new(["Iraq"], Some(YearRange::new(2013, 2016)));
        let rows = db.query_top_groups_by_country(&selection, 5).unwrap();
        let ranked: Vec<(&str, i64)> = rows.iter().map(|r| (r.key.as_str(), r.count)).collect();
        assert_eq!(
            ranked,
            vec![
                (ISIL, 5),
                ("Islamic State of Iraq (ISI)", 1),
                ("Unknown", 1),
            ]
        );
    }

    #[test]
    fn top_by_country_truncates_per_country() {
        let db = sample_db();
        let selection = Selection::new(["Iraq", "Afghanistan"], Some(YearRange::new(2014, 2015)));
        let rows = db.query_top_targets_by_country(&selection, 2).unwrap();

        let iraq: Vec<(&str, i64)> = rows
            .iter()
            .filter(|r| r.country == "Iraq")
            .map(|r| (r.key.as_str(), r.count))
            .collect();
        assert_eq!(iraq, vec![("Civilians", 2), ("Checkpoint", 1)]);

        let afghanistan: Vec<(&str, i64)> = rows
            .iter()
            .filter(|r| r.country == "Afghanistan")
            .map(|r| (r.key.as_str(), r.count))
            .collect();
        assert_eq!(afghanistan, vec![("Police", 2), ("Civilians", 1)]);
    }

    #[test]
    fn grouped_counts_match_filtered_rows() {
        let db = sample_db();
        let selection = Selection::new(
            ["Iraq", "Afghanistan", "Nigeria"],
            Some(YearRange::new(2014, 2015)),
        );
        let incidents = db.query_incident_points(&selection).unwrap();
        for row in db.query_top_groups_by_country(&selection, usize::MAX).unwrap() {
            let expected = incidents
                .iter()
                .filter(|i| i.country == row.country && i.group_name == row.key)
                .count() as i64;
            assert_eq!(row.count, expected, "{} / {}", row.country, row.key);
        }
    }

    #[test]
    fn top_groups_overall_breaks_ties_by_name() {
        let db = sample_db();
        let selection = Selection::years_only(Some(YearRange::new(2014, 2015)));
        let rows = db.query_top_groups(&selection, 15).unwrap();
        let ranked: Vec<(&str, i64)> = rows.iter().map(|r| (r.key.as_str(), r.count)).collect();
        assert_eq!(
            ranked,
            vec![(ISIL, 4), ("Boko Haram", 2), ("Taliban", 2), ("Unknown", 2)]
        );

        let top_two = db.query_top_groups(&selection, 2).unwrap();
        assert_eq!(top_two.len(), 2);
        assert!(top_two.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn top_groups_overall_skip_blank_group_names() {
        let csv = "iyear,imonth,iday,country_txt,city,longitude,latitude,nkill,nwound,summary,target1,gname,attacktype1_txt,region_txt\n\
                   2014,6,10,Iraq,Mosul,43.13,36.34,1,,,Civilians,,Bombing/Explosion,Middle East & North Africa\n\
                   2014,6,11,Iraq,Mosul,43.13,36.34,2,,,Police, ,Bombing/Explosion,Middle East & North Africa\n\
                   2014,6,12,Iraq,Tikrit,43.68,34.6,3,,,Military,ISIL,Armed Assault,Middle East & North Africa\n";
        let db = Database::from_csv_str(csv).unwrap();
        let years = Some(YearRange::new(2014, 2014));

        let overall = db.query_top_groups(&Selection::years_only(years), 15).unwrap();
        let keys: Vec<&str> = overall.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["ISIL"]);

        let per_country = db
            .query_top_groups_by_country(&Selection::new(["Iraq"], years), 5)
            .unwrap();
        assert_eq!(per_country.len(), 1);
        assert_eq!(per_country[0].key, overall[0].key);
    }

    #[test]
    fn deaths_sum_matches_filtered_rows() {
        let db = sample_db();
        let range = YearRange::new(2014, 2015);
        let rows = db
            .query_top_countries_by_deaths(&Selection::years_only(Some(range)), 15)
            .unwrap();
        let ranked: Vec<(&str, f64)> = rows.iter().map(|r| (r.country.as_str(), r.deaths)).collect();
        assert_eq!(
            ranked,
            vec![("Nigeria", 150.0), ("Iraq", 43.0), ("Afghanistan", 11.0)]
        );
        assert!(rows.windows(2).all(|w| w[0].deaths >= w[1].deaths));

        let incidents = db.query_incident_points(&all_countries(&db, range)).unwrap();
        for row in &rows {
            let expected: f64 = incidents
                .iter()
                .filter(|i| i.country == row.country)
                .filter_map(|i| i.killed)
                .sum();
            assert!((row.deaths - expected).abs() < 1e-9);
        }

        let iraq = rows.iter().find(|r| r.country == "Iraq").unwrap();
        assert_eq!(iraq.reported_incidents, 4, "Tikrit has no fatality count");
    }

    #[test]
    fn countries_and_bounds() {
        let db = sample_db();
        assert_eq!(
            db.query_countries().unwrap(),
            vec!["Afghanistan", "Iraq", "Nigeria", "Peru", "United Kingdom"]
        );
        let bounds = db.query_year_bounds().unwrap();
        assert_eq!((bounds.min, bounds.max), (1983, 2017));
    }
}
