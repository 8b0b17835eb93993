//! In-memory SQLite incident table for the Global Terrorism dashboard.
//!
//! This crate loads the Global Terrorism Database CSV export into an
//! in-memory SQLite database once at startup and exposes typed, read-only
//! query methods for the chart handlers.
//!
//! # Architecture
//!
//! - `Arc<Mutex<Connection>>` wrapper so the table can be shared by every
//!   request task of the HTTP server (a connection is `Send` but not `Sync`)
//! - In-memory SQLite via `rusqlite`
//! - The only way to build a [`Database`] is to load it from a source, so a
//!   value in hand is always fully populated; there are no public write
//!   methods
//! - Typed query methods returning serializable structs from [`models`]
//!
//! # Usage
//!
//! ```rust
//! use gtd_db::{Database, Selection, YearRange};
//!
//! let csv = "iyear,imonth,iday,country_txt,city,longitude,latitude,nkill,nwound,summary,target1,gname,attacktype1_txt,region_txt\n\
//!            2014,6,10,Iraq,Mosul,43.13,36.34,20,5,,Civilians,ISIL,Armed Assault,Middle East & North Africa\n";
//! let db = Database::from_csv_str(csv).unwrap();
//!
//! let selection = Selection::new(["Iraq"], Some(YearRange::new(2014, 2015)));
//! let yearly = db.query_yearly_counts(&selection).unwrap();
//! assert_eq!(yearly.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the SQL schema. There is a single
//! `incidents` table; every chart aggregate is derived on the fly with
//! `GROUP BY` queries against it.

pub mod schema;
pub mod error;
mod loader;
mod queries;
pub mod models;
pub mod selection;

pub use error::LoadError;
pub use loader::SOURCE_COLUMNS;
pub use selection::{Selection, YearRange};

use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory SQLite database holding the incident table.
///
/// This struct is cheaply cloneable (via `Arc`) and can be shared across
/// request handlers. After construction it is only ever read.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Wrap a fully loaded connection.
    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Lock the underlying connection for a query.
    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("incident database lock poisoned"))
    }
}
