use std::fs;
use std::path::{Path, PathBuf};

use quakecore::feed::parse_feed;
use quakecore::prelude::{EventSource, SourceError, SourceResult};
use quakecore::EventRecord;

/// Reads a previously saved GeoJSON feed from disk.
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl EventSource for FileFeedSource {
    fn fetch_events(&self) -> SourceResult<Vec<EventRecord>> {
        let bytes = fs::read(&self.path).map_err(|e| {
            SourceError::Unreachable(format!("reading feed file {}: {}", self.path.display(), e))
        })?;
        parse_feed(&bytes)
    }

    fn describe(&self) -> String {
        format!("feed file {}", self.path.display())
    }
}
