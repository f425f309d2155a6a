//! skillplot-stats - Statistical functions for rating charts
//!
//! This crate provides the numeric core behind the skillplot charts:
//!
//! - **Gaussian**: closed-form normal density and bounded curve sampling
//! - **Summary**: count/min/max/mean/median over columns that may hold NaN
//! - **Matchup**: TrueSkill-style win probability and match quality
//!
//! Everything here is pure and allocation-light; no I/O, no logging.

pub mod gaussian;
pub mod matchup;
pub mod summary;

pub use gaussian::*;
pub use matchup::*;
pub use summary::*;
