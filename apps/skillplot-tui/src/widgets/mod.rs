//! TUI widgets

mod query_input;

pub use query_input::QueryInput;
