//! Opening the store, bootstrapping it when it is new or empty.

use std::fs;
use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info, warn};

use super::schema::{bootstrap, create_tables, missing_tables, SchemaReport, Table};
use crate::errors::{LibraryError, Result};

/// How `open` obtained its connection.
#[derive(Debug)]
pub enum StoreOrigin {
    Existing,
    /// No store (or a store without any library tables) was found, so the
    /// schema was laid down from scratch.
    Bootstrapped(SchemaReport),
    /// The store held some library tables; only the missing ones were created.
    Repaired(SchemaReport),
}

/// Open the store at `location`, bootstrapping a fresh one when nothing exists
/// there yet.
///
/// The first attempt opens without `SQLITE_OPEN_CREATE` so that an existing
/// store is never mistaken for a new one. Failing that, the parent directory is
/// created and the store is opened with creation enabled. Any failure on that
/// second path is fatal (`StoreUnavailable`). `PRAGMA foreign_keys = ON` is set
/// on every connection so reference rules are enforced.
///
/// An existing file with none of the library tables (a zero-byte file, or one
/// left behind before the schema was written) is bootstrapped as well. One
/// with only some of the tables gets the missing ones created; existing rows
/// are left alone.
pub fn open(location: &Path) -> Result<(Connection, StoreOrigin)> {
    match Connection::open_with_flags(location, existing_store_flags()) {
        Ok(conn) => {
            enable_foreign_keys(&conn, location)?;
            let missing = missing_tables(&conn)
                .map_err(|err| LibraryError::store_unavailable(location, err))?;

            if missing.len() == Table::CREATION_ORDER.len() {
                info!(path = %location.display(), "existing store has no schema");
                let report = logged_bootstrap(&conn, location);
                Ok((conn, StoreOrigin::Bootstrapped(report)))
            } else if !missing.is_empty() {
                warn!(path = %location.display(), ?missing, "creating missing tables");
                let report = create_tables(&conn, &missing);
                Ok((conn, StoreOrigin::Repaired(report)))
            } else {
                info!(path = %location.display(), "opened existing store");
                Ok((conn, StoreOrigin::Existing))
            }
        }
        Err(err) => {
            debug!(path = %location.display(), error = %err, "no existing store");
            let conn = create_store(location)?;
            let report = logged_bootstrap(&conn, location);
            Ok((conn, StoreOrigin::Bootstrapped(report)))
        }
    }
}

fn logged_bootstrap(conn: &Connection, location: &Path) -> SchemaReport {
    let report = bootstrap(conn);
    if report.is_complete() {
        info!(path = %location.display(), "bootstrapped store");
    } else {
        warn!(
            path = %location.display(),
            failed = report.failed.len(),
            "bootstrapped store with an incomplete schema"
        );
    }
    report
}

fn create_store(location: &Path) -> Result<Connection> {
    if let Some(parent) = location.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| LibraryError::store_unavailable(location, err))?;
    }

    let conn = Connection::open_with_flags(
        location,
        existing_store_flags() | OpenFlags::SQLITE_OPEN_CREATE,
    )
    .map_err(|err| LibraryError::store_unavailable(location, err))?;
    enable_foreign_keys(&conn, location)?;
    Ok(conn)
}

fn existing_store_flags() -> OpenFlags {
    OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

fn enable_foreign_keys(conn: &Connection, location: &Path) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(|err| LibraryError::store_unavailable(location, err))?;
    Ok(())
}
