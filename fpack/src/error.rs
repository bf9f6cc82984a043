use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Reason a `pack` call stopped before writing the whole container
#[derive(thiserror::Error)]
pub enum PackError {
    #[error("Unable to create container {}", .path.display())]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} changed while packing: expected {expected} bytes, got {actual}", .path.display())]
    LengthMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("{context}: {}", .path.display())]
    Io {
        #[source]
        source: io::Error,
        path: PathBuf,
        context: &'static str,
    },

    #[error(transparent)]
    Core(#[from] fpack_core::Error),
}

/// Reason an `unpack` or `list` call stopped before reaching the end of the
/// container
#[derive(thiserror::Error)]
pub enum UnpackError {
    #[error("Unable to open container {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Container truncated in {}: expected {expected} bytes, got {actual}", .name.display())]
    TruncatedContainer {
        name: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("{context}{}", .path.as_ref().map(|p| format!(": {}", p.display())).unwrap_or_default())]
    Io {
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
        context: &'static str,
    },

    #[error(transparent)]
    Core(#[from] fpack_core::Error),
}

/// A single entry that was left out. These never abort the operation; they
/// are collected in the [`Report`](crate::Report) instead.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("Skipped {}: unable to open source", .path.display())]
    SourceOpenSkipped {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Skipped {}: unable to create destination", .path.display())]
    DestinationOpenSkipped {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EntryError {
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceOpenSkipped { path, .. } | Self::DestinationOpenSkipped { path, .. } => path,
        }
    }
}

fn fmt_chain(err: &dyn std::error::Error, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{err}")?;

    let mut source = err.source();
    while let Some(err) = source {
        writeln!(f, "\tCaused by: {err}")?;
        source = err.source();
    }

    Ok(())
}

impl fmt::Debug for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_chain(self, f)
    }
}

impl fmt::Debug for UnpackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_chain(self, f)
    }
}
