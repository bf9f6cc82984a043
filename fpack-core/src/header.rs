//! The packed struct represents the on-disk format of an fpack entry header
use core::fmt::{self, Display};

use bytemuck::{Pod, Zeroable};

use crate::{Error, HEADER_SIZE, NAME_CAPACITY, NAME_MAX};

/// Written immediately before each payload in a container. The field order
/// and `repr(packed, C)` fix the wire layout: 8 bytes of size in native byte
/// order, then the 256 byte name.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(packed, C)]
pub struct Header {
    /// Size in bytes of the payload which immediately follows
    pub size: i64,
    /// NUL-terminated path the payload was packed from
    pub name: [u8; NAME_CAPACITY],
}

impl Header {
    /// Create a header for a payload of `size` bytes. Names longer than
    /// [`NAME_MAX`] are cut short so the terminator always fits.
    pub fn new(size: u64, name: &[u8]) -> Result<Header, Error> {
        let size = i64::try_from(size).map_err(|_| Error::Overflow)?;
        let len = name.len().min(NAME_MAX);

        let mut header = Header::zeroed();
        header.size = size;
        header.name[..len].copy_from_slice(&name[..len]);
        Ok(header)
    }

    /// Parse header from raw header data. Only the first [`HEADER_SIZE`]
    /// bytes are looked at.
    pub fn from_bytes(data: &[u8]) -> Result<Header, Error> {
        let data = data
            .get(..HEADER_SIZE)
            .ok_or(Error::Cast(bytemuck::PodCastError::SizeMismatch))?;
        let header: Header = bytemuck::try_pod_read_unaligned(data)?;
        header.size()?;
        Ok(header)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn size(&self) -> Result<u64, Error> {
        let size = self.size;
        u64::try_from(size).map_err(|_| Error::InvalidSize(size))
    }

    /// Retrieve the name, ending at the first NUL. A name field without any
    /// NUL is returned whole.
    pub fn name_bytes(&self) -> &[u8] {
        let end = self
            .name
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(self.name.len());
        &self.name[..end]
    }

    /// Whether `name` would lose bytes when stored in a header
    pub fn is_truncated(name: &[u8]) -> bool {
        name.len() > NAME_MAX
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size;
        write!(
            f,
            "name={:?} size={}",
            alloc::string::String::from_utf8_lossy(self.name_bytes()),
            size
        )
    }
}
