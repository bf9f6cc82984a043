//! Pack a list of files into one flat container and split it back out.
//!
//! A container is nothing more than back to back entries, each a
//! [`Header`](fpack_core::Header) (payload size and NUL-terminated name)
//! followed by the payload bytes. Single files that can't be read or written
//! are skipped and reported instead of failing the whole run.
mod archive;
mod container;
mod error;
pub mod ext;
mod extract;
mod report;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logger;

pub use archive::*;
pub use container::*;
pub use error::*;
pub use extract::*;
pub use report::*;

pub use fpack_core::{Header, HEADER_SIZE, NAME_MAX};

/// Size of the transfer buffer used to stream payloads
pub const COPY_BUF_SIZE: usize = 4096;
