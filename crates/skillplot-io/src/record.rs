//! Typed rating records
//!
//! A `RatingTable` is built once from a `RawTable` and never mutated. Numeric
//! cells are coerced leniently: anything that does not parse as a real number
//! becomes NaN, and the row is kept.

use crate::reader::{IoError, IoResult};
use crate::schema::RawTable;
use serde::{Deserialize, Serialize};

/// Header names accepted for each required column
const TEAM_COLUMNS: &[&str] = &["Team", "team"];
const MU_COLUMNS: &[&str] = &["mu"];
const SIGMA_COLUMNS: &[&str] = &["sigma"];
const RANK_COLUMNS: &[&str] = &["Rank", "rank"];

/// Row index of a record within its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub usize);

/// One team's rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    /// Team identifier, the lookup key
    pub team: String,
    /// Rating mean
    pub mu: f64,
    /// Rating spread, as stored in the source table
    pub sigma: f64,
    /// Display-only ordinal
    pub rank: f64,
}

impl RatingRecord {
    pub fn new(team: impl Into<String>, mu: f64, sigma: f64, rank: f64) -> Self {
        Self {
            team: team.into(),
            mu,
            sigma,
            rank,
        }
    }

    /// True when `mu` and `sigma` can be plotted
    pub fn is_plottable(&self) -> bool {
        self.mu.is_finite() && self.sigma.is_finite()
    }
}

/// Coerce a text cell to a real number, NaN when malformed
pub fn coerce_number(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Immutable table of rating records indexed by row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingTable {
    records: Vec<RatingRecord>,
}

impl RatingTable {
    /// Build a table directly from records
    pub fn new(records: Vec<RatingRecord>) -> Self {
        Self { records }
    }

    /// Convert a raw text table into records
    ///
    /// Fails only when a required column is missing from the header.
    pub fn from_raw(raw: &RawTable) -> IoResult<Self> {
        let team = required(raw, TEAM_COLUMNS)?;
        let mu = required(raw, MU_COLUMNS)?;
        let sigma = required(raw, SIGMA_COLUMNS)?;
        let rank = required(raw, RANK_COLUMNS)?;

        let number = |row: usize, col: usize| raw.cell(row, col).map_or(f64::NAN, coerce_number);

        let records: Vec<RatingRecord> = (0..raw.num_rows())
            .map(|row| RatingRecord {
                team: raw.cell(row, team).unwrap_or_default().trim().to_string(),
                mu: number(row, mu),
                sigma: number(row, sigma),
                rank: number(row, rank),
            })
            .collect();

        let malformed = records.iter().filter(|r| !r.is_plottable()).count();
        if malformed > 0 {
            tracing::warn!("{} rating rows have non-numeric mu or sigma", malformed);
        }

        Ok(Self { records })
    }

    /// Look up a team by exact, case-sensitive name; first match wins
    pub fn find(&self, team: &str) -> Option<(RecordId, &RatingRecord)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| r.team == team)
            .map(|(i, r)| (RecordId(i), r))
    }

    /// Get a record by row index
    pub fn get(&self, id: RecordId) -> Option<&RatingRecord> {
        self.records.get(id.0)
    }

    /// Iterate records with their row index
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &RatingRecord)> {
        self.records.iter().enumerate().map(|(i, r)| (RecordId(i), r))
    }

    /// All records in row order
    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    /// Column of `mu` values
    pub fn mus(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.mu).collect()
    }

    /// Column of `sigma` values
    pub fn sigmas(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.sigma).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn required(raw: &RawTable, names: &[&str]) -> IoResult<usize> {
    raw.find_column(names)
        .ok_or_else(|| IoError::ColumnNotFound(names[0].to_string()))
}
