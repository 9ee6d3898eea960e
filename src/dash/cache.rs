//! In-memory cache of the parsed tables.
//!
//! A table is parsed again only when its file changed on disk (modification
//! time or length), or when it was computed for another day.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use crate::dash::*;

struct CacheEntry<T> {
    modified: SystemTime,
    len: u64,
    day: Option<NaiveDate>,
    table: Arc<Vec<T>>,
}

/// Parsed tables, keyed by the path of their file.
pub struct TableCache<T> {
    entries: HashMap<PathBuf, CacheEntry<T>>,
    hits: usize,
    misses: usize,
}

impl<T> Default for TableCache<T> {
    fn default() -> Self {
        TableCache {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<T> TableCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached table of `path`, or the result of `load` if the file
    /// changed since it was cached. `day` is part of the key for the tables
    /// that depend on the date of the load.
    pub fn get_or_load<F>(
        &mut self,
        path: &Path,
        day: Option<NaiveDate>,
        load: F,
    ) -> BDashResult<Arc<Vec<T>>>
    where
        F: FnOnce(&Path) -> BDashResult<Vec<T>>,
    {
        let path_s = path.display().to_string();
        let metadata = fs::metadata(path).context(FileMetadataSnafu {
            path: path_s.clone(),
        })?;
        let modified = metadata
            .modified()
            .context(FileMetadataSnafu { path: path_s })?;
        let len = metadata.len();

        if let Some(entry) = self.entries.get(path) {
            if entry.modified == modified && entry.len == len && entry.day == day {
                self.hits += 1;
                debug!("TableCache: hit for {}", path.display());
                return Ok(entry.table.clone());
            }
            debug!("TableCache: {} changed, reloading", path.display());
        }

        self.misses += 1;
        let table = match load(path) {
            Ok(t) => Arc::new(t),
            Err(e) => {
                self.invalidate(path);
                return Err(e);
            }
        };
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                len,
                day,
                table: table.clone(),
            },
        );
        Ok(table)
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
