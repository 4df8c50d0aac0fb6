//! One handler per menu entry. Handlers prompt for their fields, call into
//! `db`, and print the outcome. Store errors are returned to the dispatcher,
//! which reports them and keeps the session alive.

use std::io::{BufRead, Write};

use rusqlite::Connection;

use super::console::Console;
use super::format::{book_table, checkout_table};
use crate::db;
use crate::errors::{LibraryError, Result};
use crate::models::{NewBook, NewStudent};

pub(crate) fn reset_tables<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<()> {
    let summary = db::reset(conn)?;
    for message in summary.messages() {
        console.success(&message)?;
    }
    Ok(())
}

pub(crate) fn list_books<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<()> {
    let books = db::list_books(conn)?;
    for line in book_table(&books) {
        console.line(&line)?;
    }
    Ok(())
}

pub(crate) fn show_books_rented<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<()> {
    let name = ask(console, "Student name? ", "student name")?;
    let rows = db::find_checkouts_by_student(conn, &name)?;
    for line in checkout_table(&rows) {
        console.line(&line)?;
    }
    Ok(())
}

pub(crate) fn add_student<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<()> {
    let id = parse_id("id number", &ask(console, "Id number? ", "id number")?)?;
    let name = ask(console, "Student name? ", "student name")?;
    let email = ask(console, "Student email? ", "student email")?;
    let phone = ask(console, "Phone number? ", "phone number")?;

    let student = NewStudent {
        id,
        name,
        email,
        phone,
    };
    report_inserted(console, db::add_student(conn, &student), "student(s)")
}

pub(crate) fn add_book<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<()> {
    let isbn = parse_id("ISBN", &ask(console, "ISBN? ", "ISBN")?)?;
    let title = ask(console, "Title? ", "title")?;
    let author = ask(console, "Author? ", "author")?;
    let department = ask(console, "Department ID? ", "department id")?;
    let department_id = if department.trim().is_empty() {
        None
    } else {
        Some(parse_id("department id", &department)?)
    };

    let book = NewBook {
        isbn,
        title,
        author,
        department_id,
    };
    report_inserted(console, db::add_book(conn, &book), "record(s)")
}

pub(crate) fn list_by_department<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<()> {
    let department_id = parse_id(
        "department id",
        &ask(console, "Department #? ", "department id")?,
    )?;
    let books = db::list_by_department(conn, department_id)?;
    for line in book_table(&books) {
        console.line(&line)?;
    }
    console.line(&format!("{} record(s) found", books.len()))?;
    Ok(())
}

/// Print the affected-row count for an insert. A constraint violation still
/// prints its (zero) count before the error goes back to the dispatcher.
fn report_inserted<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    outcome: Result<usize>,
    noun: &str,
) -> Result<()> {
    match outcome {
        Ok(count) => {
            console.success(&format!("{count} {noun} inserted"))?;
            Ok(())
        }
        Err(err) => {
            if let LibraryError::ConstraintViolation { affected, .. } = &err {
                console.line(&format!("{affected} {noun} inserted"))?;
            }
            Err(err)
        }
    }
}

fn ask<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    field: &'static str,
) -> Result<String> {
    console
        .prompt(prompt)?
        .ok_or_else(|| LibraryError::InvalidInput {
            field,
            reason: "input ended".to_string(),
        })
}

fn parse_id(field: &'static str, text: &str) -> Result<i64> {
    text.trim()
        .parse()
        .map_err(|_| LibraryError::InvalidInput {
            field,
            reason: format!("expected a whole number, got {:?}", text.trim()),
        })
}
