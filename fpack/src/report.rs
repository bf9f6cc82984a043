use std::path::PathBuf;

use crate::EntryError;

/// One entry that made it into (or out of) a container
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntrySummary {
    /// Name as stored in the header, or the path it was extracted to
    pub name: PathBuf,
    pub size: u64,
}

/// Outcome of a `pack` or `unpack` call that ran to completion
#[derive(Debug, Default)]
pub struct Report {
    /// Processed entries, in container order
    pub entries: Vec<EntrySummary>,
    pub skipped: Vec<EntryError>,
}

impl Report {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
