//! Filesystem utilities

use std::path::{Path, PathBuf};

use log::debug;

/// Check if a path is a regular file
pub fn is_file(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Return the first candidate that exists on disk
pub fn first_existing<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    candidates.into_iter().find(|candidate| {
        let found = candidate.exists();
        debug!("probing {}: {}", candidate.display(), found);
        found
    })
}
