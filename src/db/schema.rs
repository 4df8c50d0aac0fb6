//! Table definitions and whole-schema create/drop operations.

use std::fmt;

use rusqlite::Connection;
use tracing::{debug, error, info};

use crate::errors::{classify, LibraryError, Result};

/// The four library tables, listed in creation order. Each table only
/// references tables that come before it, so foreign keys can be declared
/// inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Department,
    Student,
    Book,
    Checkout,
}

impl Table {
    pub const CREATION_ORDER: [Table; 4] =
        [Table::Department, Table::Student, Table::Book, Table::Checkout];

    /// Table name as used in SQL.
    pub fn name(self) -> &'static str {
        match self {
            Table::Department => "department",
            Table::Student => "student",
            Table::Book => "book",
            Table::Checkout => "checkout",
        }
    }

    /// Reverse of `CREATION_ORDER`: children before parents.
    pub fn drop_order() -> impl Iterator<Item = Table> {
        Self::CREATION_ORDER.into_iter().rev()
    }

    // Referencing columns are nullable so ON DELETE SET NULL can take effect.
    fn create_sql(self) -> &'static str {
        match self {
            Table::Department => {
                "CREATE TABLE department (
                    id INTEGER PRIMARY KEY,
                    name VARCHAR(10) NOT NULL,
                    location VARCHAR(10) NOT NULL
                )"
            }
            Table::Student => {
                "CREATE TABLE student (
                    id INTEGER PRIMARY KEY,
                    name VARCHAR(100) NOT NULL,
                    email VARCHAR(100) NOT NULL,
                    phone VARCHAR(12) NOT NULL
                )"
            }
            Table::Book => {
                "CREATE TABLE book (
                    isbn INTEGER PRIMARY KEY,
                    title VARCHAR(150) NOT NULL,
                    author VARCHAR(100) NOT NULL,
                    department_id INTEGER
                        REFERENCES department(id) ON DELETE SET NULL
                )"
            }
            Table::Checkout => {
                "CREATE TABLE checkout (
                    id INTEGER PRIMARY KEY,
                    student_id INTEGER
                        REFERENCES student(id) ON DELETE SET NULL,
                    book_isbn INTEGER
                        REFERENCES book(isbn) ON DELETE SET NULL,
                    is_returned BOOLEAN NOT NULL CHECK (is_returned IN (0, 1))
                )"
            }
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of `create_all`. A failed table is skipped rather than aborting the
/// rest of the schema.
#[derive(Debug, Default)]
pub struct SchemaReport {
    pub created: Vec<Table>,
    pub failed: Vec<LibraryError>,
}

impl SchemaReport {
    /// True when every requested table was created.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Confirmation lines, one per created table.
    pub fn messages(&self) -> Vec<String> {
        self.created
            .iter()
            .map(|table| format!("Table {table} created."))
            .collect()
    }
}

/// Lay down a fresh schema: drop whatever exists, then create every table.
pub fn bootstrap(conn: &Connection) -> SchemaReport {
    drop_all(conn);
    create_all(conn)
}

/// Create all four tables in dependency order. A table that fails is logged
/// and skipped; the remaining tables are still attempted.
pub fn create_all(conn: &Connection) -> SchemaReport {
    create_tables(conn, &Table::CREATION_ORDER)
}

/// Create only `tables`, which must be given in creation order.
pub fn create_tables(conn: &Connection, tables: &[Table]) -> SchemaReport {
    let mut report = SchemaReport::default();

    for &table in tables {
        match conn.execute(table.create_sql(), []) {
            Ok(_) => {
                info!(%table, "table created");
                report.created.push(table);
            }
            Err(source) => {
                error!(%table, error = %source, "failed to create table, skipping");
                report.failed.push(LibraryError::SchemaOperationFailed {
                    table,
                    action: "create",
                    source,
                });
            }
        }
    }

    report
}

/// Drop every table, children first. Failures are expected when the store is
/// new, so they are only logged at debug level.
pub fn drop_all(conn: &Connection) -> Vec<Table> {
    let mut dropped = Vec::new();

    for table in Table::drop_order() {
        match conn.execute(&format!("DROP TABLE {table}"), []) {
            Ok(_) => {
                info!(%table, "table dropped");
                dropped.push(table);
            }
            Err(err) => debug!(%table, error = %err, "drop skipped"),
        }
    }

    dropped
}

/// Library tables not present in the store, in creation order.
pub fn missing_tables(conn: &Connection) -> rusqlite::Result<Vec<Table>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Table::CREATION_ORDER
        .into_iter()
        .filter(|table| !present.iter().any(|name| name == table.name()))
        .collect())
}

/// Count every row in `table`.
pub fn count_rows(conn: &Connection, table: Table) -> Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .map_err(|err| classify(err, "failed to count rows"))
}
