//! skillplot-io - Rating table I/O
//!
//! This crate loads the team rating table that drives both skillplot charts:
//!
//! - **Reader**: the `TableSource` trait and the `IoError` taxonomy
//! - **Schema**: raw, untyped text tables with header lookup
//! - **CSV**: comma/tab separated reader built on the `csv` crate
//! - **Records**: typed `RatingRecord`s keyed by row index
//!
//! # Design
//!
//! Sources produce a `RawTable` of text cells. Conversion into records is a
//! separate step so that numeric coercion is identical for every format:
//! malformed numbers become NaN instead of rejecting the row.

pub mod reader;
pub mod record;
pub mod schema;

#[cfg(feature = "csv")]
pub mod csv_reader;

pub use reader::*;
pub use record::*;
pub use schema::*;
