//! SQL schema for the in-memory incident table.
//!
//! The schema is applied as a single batch when the database is created.

/// Returns the full SQL schema as a single batch string.
///
/// Creates the `incidents` table with the internal column vocabulary
/// (see [`crate::SOURCE_COLUMNS`] for the mapping from the export's column
/// names). `id` preserves input order. Fatality, injury and coordinate
/// columns are nullable because the export leaves them blank when unknown.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS incidents (
        id INTEGER PRIMARY KEY,
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        day INTEGER NOT NULL,
        date TEXT NOT NULL,
        country TEXT NOT NULL,
        city TEXT NOT NULL,
        longitude REAL,
        latitude REAL,
        killed REAL,
        wounded REAL,
        summary TEXT NOT NULL,
        target TEXT NOT NULL,
        group_name TEXT NOT NULL,
        attack_type TEXT NOT NULL,
        region TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_incidents_year ON incidents(year);
    CREATE INDEX IF NOT EXISTS idx_incidents_country_year ON incidents(country, year);
    "#
}
