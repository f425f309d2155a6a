//! One-shot dataset loading off the UI thread

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use skillplot_core::{RatingTable, SkillplotResult};

pub type LoadResult = SkillplotResult<Arc<RatingTable>>;

/// Read and parse the rating table at `path`
pub fn load(path: &Path) -> LoadResult {
    let table = skillplot_io::load_ratings(&path.to_string_lossy())?;
    Ok(Arc::new(table))
}

/// Load on a background thread; the result arrives exactly once
pub fn spawn(path: PathBuf) -> Receiver<LoadResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // the receiver is gone only if the app already quit
        let _ = tx.send(load(&path));
    });
    rx
}
