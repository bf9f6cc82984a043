#![no_std]
extern crate alloc;

use core::mem;

pub use crate::error::Error;
pub use crate::header::Header;

mod error;
mod header;

pub const HEADER_SIZE: usize = mem::size_of::<Header>();

/// Bytes reserved for the name field, including the NUL terminator
pub const NAME_CAPACITY: usize = 256;

/// Longest name that fits in a header
pub const NAME_MAX: usize = NAME_CAPACITY - 1;
