//! SQLite storage layer for the station climate observations dataset.
//!
//! This crate owns the fixed schema contract for the two dataset tables and
//! exposes typed query methods that the reporting service and CLI build on.
//!
//! # Architecture
//!
//! - `Arc<Mutex<Connection>>` wrapper so one handle can be created at startup
//!   and cloned into every request handler
//! - File-backed SQLite via `rusqlite`, opened read-only for serving
//! - CSV loaders for building a dataset file from its source CSVs
//! - Typed query methods returning serializable structs
//!
//! # Usage
//!
//! ```rust
//! use climate_db::Database;
//!
//! let db = Database::new().unwrap();
//!
//! db.load_stations("station,name,latitude,longitude,elevation\nUSC00519397,WAIKIKI 717.2,21.2716,-157.8168,3.0\n").unwrap();
//! db.load_measurements("station,date,prcp,tobs\nUSC00519397,2017-08-23,0.0,81.0\n").unwrap();
//!
//! let max_date = db.query_max_date().unwrap();
//! assert_eq!(max_date.as_deref(), Some("2017-08-23"));
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `measurement` - One row per station per date: precipitation and temperature observation
//! - `station` - Station metadata

pub mod schema;
mod loader;
mod queries;
pub mod models;

use anyhow::Context;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to the climate dataset.
///
/// Cheaply cloneable (via `Arc`). All clones use the same underlying
/// connection; access is serialized through a mutex because a rusqlite
/// `Connection` is `Send` but not `Sync`.
///
/// # Example
///
/// ```rust
/// use climate_db::Database;
///
/// let db = Database::new().unwrap();
/// db.load_stations("station,name,latitude,longitude,elevation\nUSC00519397,WAIKIKI 717.2,21.2716,-157.8168,3.0\n").unwrap();
/// let stations = db.query_stations().unwrap();
/// assert_eq!(stations.len(), 1);
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self::from_connection(conn))
    }

    /// Open an existing dataset file read-only.
    ///
    /// Fails if the file does not exist or does not contain both the
    /// `measurement` and `station` tables.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("failed to open dataset {}", path.display()))?;
        schema::verify_schema(&conn)
            .with_context(|| format!("{} is not a climate dataset", path.display()))?;
        log::info!("db: opened {} read-only", path.display());
        Ok(Self::from_connection(conn))
    }

    /// Open (creating if needed) a dataset file read-write and apply the schema.
    pub fn create<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("failed to create dataset {}", path.display()))?;
        conn.execute_batch(schema::create_schema())?;
        log::info!("db: opened {} read-write", path.display());
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Lock the shared connection.
    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection mutex poisoned"))
    }
}
