//! Stream helpers and extension traits for base types defined in `fpack-core`.
use std::ffi::OsStr;
use std::io::{self, Read, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use fpack_core::Header;

pub trait HeaderExt {
    /// The stored name as a path, taken verbatim
    fn name_path(&self) -> &Path;
}

impl HeaderExt for Header {
    fn name_path(&self) -> &Path {
        Path::new(OsStr::from_bytes(self.name_bytes()))
    }
}

/// Copy at most `len` bytes from `read` to `write`, one `buf` sized chunk at a
/// time. Returns the count copied, which is only short of `len` when `read`
/// reached EOF first.
pub fn copy_exact<R, W>(mut read: R, mut write: W, len: u64, buf: &mut [u8]) -> io::Result<u64>
where
    R: Read,
    W: Write,
{
    let mut total = 0;
    while total < len {
        let want = usize::try_from(len - total).map_or(buf.len(), |left| left.min(buf.len()));
        let count = match read.read(&mut buf[..want]) {
            Ok(0) => break,
            Ok(count) => count,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        write.write_all(&buf[..count])?;
        total += count as u64;
    }
    Ok(total)
}

/// Fill as much of `buf` as `read` has left. Unlike `read_exact`, EOF is not
/// an error; the short count is returned.
pub fn read_full<R: Read>(mut read: R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match read.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(count) => filled += count,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use super::{copy_exact, read_full};

    /// Hands out at most three bytes per read
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let count = self.0.len().min(buf.len()).min(3);
            buf[..count].copy_from_slice(&self.0[..count]);
            self.0 = &self.0[count..];
            Ok(count)
        }
    }

    #[test]
    fn copy_stops_at_len() {
        let mut out = Vec::new();
        let mut buf = [0; 4];
        let copied = copy_exact(&b"some file contents"[..], &mut out, 9, &mut buf).unwrap();

        assert_eq!(copied, 9);
        assert_eq!(out, b"some file");
    }

    #[test]
    fn copy_reports_early_eof() {
        let mut out = Vec::new();
        let mut buf = [0; 4];
        let copied = copy_exact(&b"short"[..], &mut out, 100, &mut buf).unwrap();

        assert_eq!(copied, 5);
        assert_eq!(out, b"short");
    }

    #[test]
    fn copy_handles_partial_reads() {
        let data = b"some random string file contents\n";
        let mut out = Vec::new();
        let mut buf = [0; 8];
        let copied = copy_exact(Trickle(data), &mut out, data.len() as u64, &mut buf).unwrap();

        assert_eq!(copied, data.len() as u64);
        assert_eq!(out, data);
    }

    #[test]
    fn read_full_across_partial_reads() {
        let mut buf = [0; 10];
        assert_eq!(read_full(Trickle(b"0123456789abc"), &mut buf).unwrap(), 10);
        assert_eq!(&buf, b"0123456789");

        let mut buf = [0; 10];
        assert_eq!(read_full(Trickle(b"0123"), &mut buf).unwrap(), 4);
    }
}
