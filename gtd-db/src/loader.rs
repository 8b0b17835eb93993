//! CSV loading for the incident table.
//!
//! The source is the Global Terrorism Database CSV export (optionally
//! gzip-compressed). Only the columns in [`SOURCE_COLUMNS`] are read; they
//! are located by header name, so column order and any additional columns
//! in the export do not matter.
//!
//! Rows whose month or day is `0` (the export's encoding for "unknown") are
//! discarded, as are rows whose year/month/day is not a real calendar date.
//! Text fields are decoded lossily because parts of the export are not valid
//! UTF-8.

use crate::{schema, Database, LoadError};
use csv::ByteRecord;
use flate2::read::GzDecoder;
use gtd_utils::dates::{compose_date, format_date};
use rusqlite::{params, Connection};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Export column name and the internal column it is renamed to.
pub const SOURCE_COLUMNS: [(&str, &str); 14] = [
    ("iyear", "year"),
    ("imonth", "month"),
    ("iday", "day"),
    ("country_txt", "country"),
    ("city", "city"),
    ("longitude", "longitude"),
    ("latitude", "latitude"),
    ("nkill", "killed"),
    ("nwound", "wounded"),
    ("summary", "summary"),
    ("target1", "target"),
    ("gname", "group_name"),
    ("attacktype1_txt", "attack_type"),
    ("region_txt", "region"),
];

/// Row counts logged after a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LoadSummary {
    /// Rows inserted into the table
    pub loaded: u64,
    /// Rows dropped because month or day was `0`
    pub skipped_unknown_date: u64,
    /// Rows dropped because year/month/day is not a calendar date
    pub skipped_invalid_date: u64,
}

/// Header positions of the consumed columns.
struct Columns {
    year: usize,
    month: usize,
    day: usize,
    country: usize,
    city: usize,
    longitude: usize,
    latitude: usize,
    killed: usize,
    wounded: usize,
    summary: usize,
    target: usize,
    group_name: usize,
    attack_type: usize,
    region: usize,
}

impl Columns {
    fn locate(headers: &ByteRecord) -> Result<Self, LoadError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string()
            })
            .collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| name == column)
                .ok_or(LoadError::MissingColumn(column))
        };

        // Report the first missing column in export order
        let [year, month, day, country, city, longitude, latitude, killed, wounded, summary, target, group_name, attack_type, region] =
            SOURCE_COLUMNS.map(|(source, _)| source);

        Ok(Self {
            year: find(year)?,
            month: find(month)?,
            day: find(day)?,
            country: find(country)?,
            city: find(city)?,
            longitude: find(longitude)?,
            latitude: find(latitude)?,
            killed: find(killed)?,
            wounded: find(wounded)?,
            summary: find(summary)?,
            target: find(target)?,
            group_name: find(group_name)?,
            attack_type: find(attack_type)?,
            region: find(region)?,
        })
    }
}

impl Database {
    /// Load the incident table from a file on disk.
    ///
    /// Files ending in `.gz` are decompressed on the fly.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        log::info!("[GTD] loader: Reading incidents from {}", path.display());
        let file = BufReader::new(File::open(path)?);
        let is_gzip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);
        if is_gzip {
            Self::from_reader(GzDecoder::new(file))
        } else {
            Self::from_reader(file)
        }
    }

    /// Load the incident table from CSV text (header row required).
    pub fn from_csv_str(csv_data: &str) -> Result<Self, LoadError> {
        Self::from_reader(csv_data.as_bytes())
    }

    /// Load the incident table from any CSV byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        let summary = load_incidents(&mut conn, reader)?;
        log::info!(
            "[GTD] loader: Loaded {} incidents, skipped {} with unknown month/day, {} with impossible dates",
            summary.loaded,
            summary.skipped_unknown_date,
            summary.skipped_invalid_date
        );
        if summary.loaded == 0 {
            return Err(LoadError::NoIncidents);
        }
        Ok(Self::from_connection(conn))
    }
}

/// Parse every row of the export and insert the usable ones in a single
/// transaction.
fn load_incidents<R: Read>(conn: &mut Connection, reader: R) -> Result<LoadSummary, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::locate(rdr.byte_headers()?)?;

    let mut summary = LoadSummary::default();
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(&insert_sql())?;

        let mut record = ByteRecord::new();
        while rdr.read_byte_record(&mut record)? {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let year: i32 = integer(&record, columns.year, "iyear", line)?;
            let month: u32 = integer(&record, columns.month, "imonth", line)?;
            let day: u32 = integer(&record, columns.day, "iday", line)?;

            if month == 0 || day == 0 {
                summary.skipped_unknown_date += 1;
                continue;
            }
            let date = match compose_date(year, month, day) {
                Ok(date) => date,
                Err(e) => {
                    log::debug!("[GTD] loader: Skipping line {}: {}", line, e);
                    summary.skipped_invalid_date += 1;
                    continue;
                }
            };

            stmt.execute(params![
                year,
                month,
                day,
                text(&record, columns.country),
                text(&record, columns.city),
                number(&record, columns.longitude),
                number(&record, columns.latitude),
                number(&record, columns.killed),
                number(&record, columns.wounded),
                text(&record, columns.summary),
                text(&record, columns.target),
                text(&record, columns.group_name),
                text(&record, columns.attack_type),
                text(&record, columns.region),
                format_date(&date),
            ])?;
            summary.loaded += 1;
        }
    }
    tx.commit()?;
    Ok(summary)
}

/// Insert statement over the internal names in [`SOURCE_COLUMNS`] order,
/// with the derived `date` last.
fn insert_sql() -> String {
    let columns: Vec<&str> = SOURCE_COLUMNS
        .iter()
        .map(|(_, internal)| *internal)
        .chain(["date"])
        .collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO incidents ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Trimmed, lossily decoded text of a field; missing fields read as empty.
fn text(record: &ByteRecord, idx: usize) -> String {
    String::from_utf8_lossy(record.get(idx).unwrap_or(b""))
        .trim()
        .to_string()
}

/// Optional numeric field: blank or non-numeric values are NULL.
fn number(record: &ByteRecord, idx: usize) -> Option<f64> {
    let value = text(record, idx);
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Required integer field used to build the incident date.
fn integer<T: std::str::FromStr>(
    record: &ByteRecord,
    idx: usize,
    column: &'static str,
    line: u64,
) -> Result<T, LoadError> {
    let value = text(record, idx);
    value.parse::<T>().map_err(|_| LoadError::InvalidField {
        line,
        column,
        value,
    })
}
