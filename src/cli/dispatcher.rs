//! Selection loop modelled as a three-state machine.

use std::io::{BufRead, Write};

use rusqlite::Connection;
use tracing::{error, warn};

use super::commands;
use super::console::Console;
use crate::errors::{LibraryError, Result};

pub const MENU: [&str; 7] = [
    "0: Quit",
    "1: Reset tables",
    "2: list of books",
    "3: Show books rented by a student",
    "4: Add student",
    "5: Add book",
    "6: List Books by department",
];

pub const SELECTION_PROMPT: &str = "Selection (0 to quit, 9 for menu)? ";
pub const COMPLETION_MESSAGE: &str = "Done";

/// The operations reachable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reset,
    ListBooks,
    FindCheckouts,
    AddStudent,
    AddBook,
    ListByDepartment,
}

/// What a selection token asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Quit,
    Run(Command),
    /// Anything unrecognised, including `9`, redisplays the menu.
    ShowMenu,
}

impl Selection {
    /// Map a typed token to a selection. Surrounding whitespace is ignored.
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "0" => Selection::Quit,
            "1" => Selection::Run(Command::Reset),
            "2" => Selection::Run(Command::ListBooks),
            "3" => Selection::Run(Command::FindCheckouts),
            "4" => Selection::Run(Command::AddStudent),
            "5" => Selection::Run(Command::AddBook),
            "6" => Selection::Run(Command::ListByDepartment),
            _ => Selection::ShowMenu,
        }
    }
}

/// `AwaitingSelection` is the initial state and `Terminated` is final; every
/// `Executing` step returns to `AwaitingSelection` whether or not the command
/// succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    AwaitingSelection,
    Executing(Command),
    Terminated,
}

/// Menu loop over one open store. Every transition goes through `step`, so
/// tests can drive the machine one state at a time.
pub struct Dispatcher<'c, R, W> {
    conn: &'c Connection,
    console: Console<R, W>,
    state: DispatcherState,
}

impl<'c, R: BufRead, W: Write> Dispatcher<'c, R, W> {
    /// Start in `AwaitingSelection` over an already opened store.
    pub fn new(conn: &'c Connection, console: Console<R, W>) -> Self {
        Self {
            conn,
            console,
            state: DispatcherState::AwaitingSelection,
        }
    }

    /// Current state, without advancing.
    pub fn state(&self) -> DispatcherState {
        self.state
    }

    /// Print the menu, then step until the quit token (or end of input).
    /// Only terminal failures escape; command failures are reported inline.
    pub fn run(&mut self) -> Result<()> {
        self.display_menu()?;
        while self.step()? != DispatcherState::Terminated {}
        Ok(())
    }

    /// Perform one transition and return the new state.
    pub fn step(&mut self) -> Result<DispatcherState> {
        self.state = match self.state {
            DispatcherState::AwaitingSelection => {
                match self.console.prompt(SELECTION_PROMPT) {
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(err) => {
                        self.report(None, &err)?;
                        DispatcherState::AwaitingSelection
                    }
                    Ok(None) => self.terminate()?,
                    Ok(Some(token)) => match Selection::parse(&token) {
                        Selection::Quit => self.terminate()?,
                        Selection::Run(command) => DispatcherState::Executing(command),
                        Selection::ShowMenu => {
                            self.display_menu()?;
                            DispatcherState::AwaitingSelection
                        }
                    },
                }
            }
            DispatcherState::Executing(command) => {
                self.execute(command)?;
                DispatcherState::AwaitingSelection
            }
            DispatcherState::Terminated => DispatcherState::Terminated,
        };
        Ok(self.state)
    }

    /// Hand back the console, typically to inspect captured output.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn terminate(&mut self) -> Result<DispatcherState> {
        self.console.line(COMPLETION_MESSAGE)?;
        Ok(DispatcherState::Terminated)
    }

    fn display_menu(&mut self) -> Result<()> {
        for entry in MENU {
            self.console.heading(entry)?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        let outcome = match command {
            Command::Reset => commands::reset_tables(self.conn, &mut self.console),
            Command::ListBooks => commands::list_books(self.conn, &mut self.console),
            Command::FindCheckouts => commands::show_books_rented(self.conn, &mut self.console),
            Command::AddStudent => commands::add_student(self.conn, &mut self.console),
            Command::AddBook => commands::add_book(self.conn, &mut self.console),
            Command::ListByDepartment => {
                commands::list_by_department(self.conn, &mut self.console)
            }
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => self.report(Some(command), &err),
        }
    }

    fn report(&mut self, command: Option<Command>, err: &LibraryError) -> Result<()> {
        match err {
            LibraryError::QueryExecutionFailed { .. } => {
                error!(?command, error = %err, "command failed");
            }
            _ => {
                warn!(?command, error = %err, "command rejected");
            }
        }
        self.console.error(&err.to_string())?;
        Ok(())
    }
}
