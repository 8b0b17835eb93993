//! The six chart handlers.
//!
//! Each handler is a pure function of the shared incident table and the
//! current control values. It filters, aggregates through a
//! [`Database`] query, and shapes the result into a [`Figure`].
//!
//! Charts that plot one series per selected country draw nothing when no
//! country is selected or the year range is undefined; the ranking charts
//! draw nothing when their year range is undefined. Neither case is an
//! error.

use crate::figure::{BarTrace, Datum, Figure, GeoLayout, GeoTrace, Layout, Trace};
use crate::jitter::{Jitter, JitterConfig};
use gtd_db::models::{CountryKeyCount, Incident};
use gtd_db::{Database, Selection};
use gtd_utils::dates::{format_long_date, parse_date};
use gtd_utils::text::wrap_for_hover;

/// Bars per country on the per-country ranking charts.
pub const TOP_PER_COUNTRY: usize = 5;
/// Bars on the overall ranking charts.
pub const TOP_OVERALL: usize = 15;
/// Column width of the wrapped summary in map hover labels.
pub const SUMMARY_WRAP_WIDTH: usize = 40;
/// Padding around the plotted points when framing the map, in degrees.
pub const MAP_PADDING_DEGREES: f64 = 1.0;
pub const MAP_WIDTH: u32 = 1420;
pub const MAP_HEIGHT: u32 = 650;

/// `{prefix}{countries}  {start - end}`
fn filtered_title(prefix: &str, selection: &Selection) -> String {
    format!(
        "{}{}  {}",
        prefix,
        selection.countries_label(),
        selection.years_label()
    )
}

/// `{prefix} {start - end}`
fn period_title(prefix: &str, selection: &Selection) -> String {
    format!("{} {}", prefix, selection.years_label())
}

/// Countries that get a series of their own.
fn series_countries(selection: &Selection) -> &[String] {
    if selection.years().is_some() {
        selection.countries()
    } else {
        &[]
    }
}

/// One bar series per selected country from per-country rankings.
fn per_country_bars(selection: &Selection, rows: &[CountryKeyCount]) -> Vec<Trace> {
    series_countries(selection)
        .iter()
        .map(|country| {
            let (x, y) = rows
                .iter()
                .filter(|r| &r.country == country)
                .map(|r| (Datum::Text(r.key.clone()), Datum::Int(r.count)))
                .unzip();
            Trace::Bar(BarTrace::named(country.clone(), x, y))
        })
        .collect()
}

/// Yearly incident counts, one bar series per selected country.
pub fn country_by_year(db: &Database, selection: &Selection) -> anyhow::Result<Figure> {
    let counts = db.query_yearly_counts(selection)?;
    let data = series_countries(selection)
        .iter()
        .map(|country| {
            let (x, y) = counts
                .iter()
                .filter(|c| &c.country == country)
                .map(|c| (Datum::from(c.year), Datum::from(c.count)))
                .unzip();
            Trace::Bar(BarTrace::named(country.clone(), x, y))
        })
        .collect();
    Ok(Figure {
        data,
        layout: Layout::styled(filtered_title("Yearly Terrorist Attacks ", selection)),
    })
}

/// Every located incident of the selected countries on a world map.
///
/// Coordinates are jittered according to `jitter`; the map is framed on
/// the recorded (unjittered) coordinates. Incidents without coordinates
/// are left out.
pub fn incident_map(
    db: &Database,
    selection: &Selection,
    jitter: JitterConfig,
) -> anyhow::Result<Figure> {
    let incidents = db.query_incident_points(selection)?;
    let located: Vec<(&Incident, f64, f64)> = incidents
        .iter()
        .filter_map(|i| Some((i, i.longitude?, i.latitude?)))
        .collect();

    let mut noise = Jitter::new(jitter);
    let data = series_countries(selection)
        .iter()
        .map(|country| {
            let mut trace = GeoTrace::new(country.clone());
            for (incident, lon, lat) in located.iter().filter(|(i, _, _)| &i.country == country) {
                trace.lon.push(noise.apply(*lon));
                trace.lat.push(noise.apply(*lat));
                trace.hovertext.push(hover_text(incident));
            }
            Trace::Scattergeo(trace)
        })
        .collect();

    let lon_range = padded_range(located.iter().map(|(_, lon, _)| *lon));
    let lat_range = padded_range(located.iter().map(|(_, _, lat)| *lat));
    let layout = Layout::styled(filtered_title("Terrorist Attacks ", selection)).with_geo(
        GeoLayout::new(lon_range, lat_range),
        MAP_WIDTH,
        MAP_HEIGHT,
    );
    Ok(Figure { data, layout })
}

/// Min/max of the values widened by [`MAP_PADDING_DEGREES`]; `None` when
/// there are no values.
fn padded_range(values: impl Iterator<Item = f64>) -> Option<[f64; 2]> {
    values
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .map(|(lo, hi)| [lo - MAP_PADDING_DEGREES, hi + MAP_PADDING_DEGREES])
}

/// Multi-line hover label for one map marker.
fn hover_text(incident: &Incident) -> String {
    let date = parse_date(&incident.date)
        .map(|d| format_long_date(&d))
        .unwrap_or_else(|_| incident.date.clone());
    format!(
        "{}, {}<br>{}<br>Perpetrator: {}<br>Killed: {}<br>Wounded: {}<br>Target: {}<br>{}",
        incident.city,
        incident.country,
        date,
        incident.group_name,
        casualty_label(incident.killed),
        casualty_label(incident.wounded),
        incident.target,
        wrap_for_hover(&incident.summary, SUMMARY_WRAP_WIDTH)
    )
}

fn casualty_label(count: Option<f64>) -> String {
    match count {
        Some(n) if n.fract() == 0.0 => format!("{:.0}", n),
        Some(n) => n.to_string(),
        None => "Unknown".to_string(),
    }
}

/// Top perpetrator groups in each selected country.
pub fn country_attacks(db: &Database, selection: &Selection) -> anyhow::Result<Figure> {
    let rows = db.query_top_groups_by_country(selection, TOP_PER_COUNTRY)?;
    Ok(Figure {
        data: per_country_bars(selection, &rows),
        layout: Layout::styled(filtered_title(
            "Top 5 Active Terrorist Group in ",
            selection,
        )),
    })
}

/// Top targets in each selected country.
pub fn country_targets(db: &Database, selection: &Selection) -> anyhow::Result<Figure> {
    let rows = db.query_top_targets_by_country(selection, TOP_PER_COUNTRY)?;
    Ok(Figure {
        data: per_country_bars(selection, &rows),
        layout: Layout::styled(filtered_title(
            "Top 5 Targets by Terrorist Groups in ",
            selection,
        )),
    })
}

/// Most active groups worldwide in the year range.
pub fn most_active_groups(db: &Database, selection: &Selection) -> anyhow::Result<Figure> {
    let layout =
        Layout::styled(period_title("Most Active Terrorist Groups during", selection)).without_yaxis();
    if selection.years().is_none() {
        return Ok(Figure {
            data: Vec::new(),
            layout,
        });
    }
    let rows = db.query_top_groups(selection, TOP_OVERALL)?;
    let (values, labels) = rows
        .into_iter()
        .map(|r| (Datum::from(r.count), r.key))
        .unzip();
    Ok(Figure {
        data: vec![Trace::Bar(BarTrace::ranking(values, labels))],
        layout,
    })
}

/// Countries with the most fatalities in the year range.
pub fn deadliest_countries(db: &Database, selection: &Selection) -> anyhow::Result<Figure> {
    let layout =
        Layout::styled(period_title("Top 15 Countries by Deaths during", selection)).without_yaxis();
    if selection.years().is_none() {
        return Ok(Figure {
            data: Vec::new(),
            layout,
        });
    }
    let rows = db.query_top_countries_by_deaths(selection, TOP_OVERALL)?;
    let (values, labels) = rows
        .into_iter()
        .map(|r| (Datum::from(r.deaths), r.country))
        .unzip();
    Ok(Figure {
        data: vec![Trace::Bar(BarTrace::ranking(values, labels))],
        layout,
    })
}
