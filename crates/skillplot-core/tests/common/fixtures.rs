//! Test fixture loading utilities

use std::path::PathBuf;
use std::sync::Arc;

use skillplot_core::{ChartSession, RatingTable, SkillplotConfig, SkillplotResult};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a rating table fixture the way the binary does
pub fn load_fixture(name: &str) -> SkillplotResult<Arc<RatingTable>> {
    let path = fixture_path(name);
    let table = skillplot_io::load_ratings(&path.to_string_lossy())?;
    Ok(Arc::new(table))
}

/// A session with `ratings.csv` loaded
#[allow(dead_code)]
pub fn loaded_session() -> ChartSession {
    let mut session = ChartSession::new(&SkillplotConfig::default());
    session.load(load_fixture("ratings.csv"));
    session
}
