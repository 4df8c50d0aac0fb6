//! Book listing, department filter and book insertion.

use rusqlite::{params, Connection, Row};

use crate::errors::{classify, LibraryError, Result};
use crate::models::{BookRow, NewBook};

// `returned` is derived: a book counts as returned while none of its checkouts
// are outstanding.
const BOOK_COLUMNS: &str = "SELECT b.isbn, b.title, b.author, b.department_id,
            NOT EXISTS (
                SELECT 1 FROM checkout c WHERE c.book_isbn = b.isbn AND c.is_returned = 0
            ) AS returned
     FROM book b";

fn book_row(row: &Row<'_>) -> rusqlite::Result<BookRow> {
    Ok(BookRow {
        isbn: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        department_id: row.get(3)?,
        returned: row.get(4)?,
    })
}

/// Every book, ordered by ISBN.
pub fn list_books(conn: &Connection) -> Result<Vec<BookRow>> {
    let mut stmt = conn
        .prepare(&format!("{BOOK_COLUMNS} ORDER BY b.isbn"))
        .map_err(|err| classify(err, "failed to prepare book query"))?;

    let books = stmt
        .query_map([], book_row)
        .map_err(|err| classify(err, "failed to load books"))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| classify(err, "failed to collect books"))?;

    Ok(books)
}

/// Books filed under `department_id`, ordered by ISBN. An unknown department
/// simply yields no rows.
pub fn list_by_department(conn: &Connection, department_id: i64) -> Result<Vec<BookRow>> {
    let mut stmt = conn
        .prepare(&format!(
            "{BOOK_COLUMNS} WHERE b.department_id = ?1 ORDER BY b.isbn"
        ))
        .map_err(|err| classify(err, "failed to prepare department query"))?;

    let books = stmt
        .query_map(params![department_id], book_row)
        .map_err(|err| classify(err, "failed to load department books"))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| classify(err, "failed to collect department books"))?;

    Ok(books)
}

/// Insert one book and return the number of rows inserted.
///
/// When a department is given, the insert selects from `department` so that an
/// unknown id inserts nothing; that case is reported as a
/// `ConstraintViolation` rather than a silent zero.
pub fn add_book(conn: &Connection, book: &NewBook) -> Result<usize> {
    let inserted = match book.department_id {
        Some(department_id) => conn
            .execute(
                "INSERT INTO book (isbn, title, author, department_id)
                 SELECT ?1, ?2, ?3, d.id FROM department d WHERE d.id = ?4",
                params![book.isbn, book.title, book.author, department_id],
            )
            .map_err(|err| classify(err, "failed to insert book"))?,
        None => conn
            .execute(
                "INSERT INTO book (isbn, title, author, department_id)
                 VALUES (?1, ?2, ?3, NULL)",
                params![book.isbn, book.title, book.author],
            )
            .map_err(|err| classify(err, "failed to insert book"))?,
    };

    if inserted == 0 {
        if let Some(department_id) = book.department_id {
            return Err(LibraryError::ConstraintViolation {
                message: format!("department {department_id} does not exist"),
                affected: 0,
            });
        }
    }

    Ok(inserted)
}
