use std::io::Cursor;
use std::path::Path;

use library_db::db::{self, count_rows, Table};
use library_db::{open, Console, Dispatcher, StoreOrigin};
use rusqlite::Connection;
use tempfile::TempDir;

// Helper to open a throwaway store inside `dir`.
fn fresh_store(dir: &TempDir) -> Connection {
    let (conn, origin) = open(&dir.path().join("library.sqlite")).unwrap();
    assert!(matches!(origin, StoreOrigin::Bootstrapped(_)));
    conn
}

// Run a full scripted session and return everything printed.
fn run_session(conn: &Connection, script: &str) -> String {
    run_session_bytes(conn, script.as_bytes())
}

fn run_session_bytes(conn: &Connection, script: &[u8]) -> String {
    let console = Console::new(Cursor::new(script.to_vec()), Vec::new(), false);
    let mut dispatcher = Dispatcher::new(conn, console);
    dispatcher.run().unwrap();
    String::from_utf8(dispatcher.into_console().into_output()).unwrap()
}

fn counts(conn: &Connection) -> [i64; 4] {
    Table::CREATION_ORDER.map(|table| count_rows(conn, table).unwrap())
}

#[test]
fn reset_from_the_menu_seeds_canonical_rows() {
    let dir = TempDir::new().unwrap();
    let conn = fresh_store(&dir);

    let output = run_session(&conn, "1\n0\n");

    assert!(output.contains("0 records deleted"));
    assert!(output.contains("3 department records inserted."));
    assert!(output.contains("2 checkout records inserted."));
    assert_eq!(counts(&conn), [3, 3, 2, 2]);
}

#[test]
fn list_books_after_reset() {
    let dir = TempDir::new().unwrap();
    let conn = fresh_store(&dir);

    let output = run_session(&conn, "1\n2\n0\n");

    let harry = output
        .lines()
        .find(|line| line.starts_with("5564"))
        .expect("Harry potter row");
    assert!(harry.contains("Harry potter"));
    assert!(harry.contains("jk rowling"));
    assert!(harry.contains("30"));
    assert!(harry.ends_with("yes"));

    let python = output
        .lines()
        .find(|line| line.starts_with("5563"))
        .expect("python row");
    assert!(python.ends_with("no"));
}

#[test]
fn books_rented_by_joe() {
    let dir = TempDir::new().unwrap();
    let conn = fresh_store(&dir);

    let output = run_session(&conn, "1\n3\njoe\n0\n");

    let rows: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("joe_2024@depauw.edu"))
        .collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains("Harry potter"));
    assert!(rows[0].contains("5564"));
}

#[test]
fn duplicate_student_is_reported_and_session_continues() {
    let dir = TempDir::new().unwrap();
    let conn = fresh_store(&dir);
    db::reset(&conn).unwrap();

    let output = run_session(
        &conn,
        "4\n1\nimpostor\nimp@x.edu\n5550000\n4\n4\nkim\nkim@x.edu\n5551111\n0\n",
    );

    assert!(output.contains("0 student(s) inserted"));
    assert!(output.contains("error: failed to insert student"));
    assert!(output.contains("1 student(s) inserted"));
    assert!(output.ends_with("Done\n"));
    assert_eq!(count_rows(&conn, Table::Student).unwrap(), 4);
}

#[test]
fn book_for_missing_department_is_rejected() {
    let dir = TempDir::new().unwrap();
    let conn = fresh_store(&dir);
    db::reset(&conn).unwrap();

    let output = run_session(&conn, "5\n7777\nDune\nHerbert\n99\n0\n");

    assert!(output.contains("0 record(s) inserted"));
    assert!(output.contains("error: department 99 does not exist"));
    assert_eq!(count_rows(&conn, Table::Book).unwrap(), 2);
}

#[test]
fn added_book_shows_up_in_department_listing() {
    let dir = TempDir::new().unwrap();
    let conn = fresh_store(&dir);
    db::reset(&conn).unwrap();

    let output = run_session(&conn, "5\n7777\nDune\nHerbert\n20\n6\n20\n0\n");

    assert!(output.contains("1 record(s) inserted"));
    assert!(output.lines().any(|line| line.starts_with("7777")
        && line.contains("Dune")));
    assert!(output.contains("1 record(s) found"));
}

#[test]
fn non_numeric_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let conn = fresh_store(&dir);

    let output = run_session(&conn, "6\nten\n0\n");

    assert!(output.contains("error: invalid department id"));
    assert!(output.ends_with("Done\n"));
}

#[test]
fn non_utf8_student_name_does_not_end_session() {
    let dir = TempDir::new().unwrap();
    let conn = fresh_store(&dir);
    db::reset(&conn).unwrap();

    let output = run_session_bytes(&conn, b"3\njos\xe9\n2\n0\n");

    assert!(output.contains("error: invalid line: input is not valid UTF-8"));
    assert!(output.lines().any(|line| line.starts_with("5564")));
    assert!(output.ends_with("Done\n"));
}

#[test]
fn unrecognised_input_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let conn = fresh_store(&dir);
    db::reset(&conn).unwrap();
    let before = counts(&conn);

    let output = run_session(&conn, "42\nhello\n9\n0\n");

    assert_eq!(output.matches("0: Quit").count(), 4);
    assert_eq!(counts(&conn), before);
}

#[test]
fn rebootstrap_clears_previous_rows() {
    let dir = TempDir::new().unwrap();
    let conn = fresh_store(&dir);
    db::reset(&conn).unwrap();

    let dropped = db::drop_all(&conn);
    assert_eq!(dropped.len(), 4);
    let report = db::bootstrap(&conn);

    assert!(report.is_complete());
    assert_eq!(counts(&conn), [0, 0, 0, 0]);
}

#[test]
fn store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library.sqlite");
    {
        let conn = fresh_store(&dir);
        run_session(&conn, "1\n0\n");
    }

    let (conn, origin) = open(Path::new(&path)).unwrap();
    assert!(matches!(origin, StoreOrigin::Existing));
    assert_eq!(counts(&conn), [3, 3, 2, 2]);
}
