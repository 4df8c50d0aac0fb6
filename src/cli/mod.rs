//! Line-oriented menu front end.

mod commands;
mod console;
mod dispatcher;
mod format;
mod startup;

pub use console::Console;
pub use dispatcher::{
    Command, Dispatcher, DispatcherState, Selection, COMPLETION_MESSAGE, MENU, SELECTION_PROMPT,
};
pub use format::{book_table, checkout_table};
pub use startup::announce_store;
