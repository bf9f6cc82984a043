use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use fpack_core::{Header, HEADER_SIZE};

use crate::ext::{copy_exact, read_full, HeaderExt};
use crate::{UnpackError, COPY_BUF_SIZE};

/// Appends (header, payload) pairs to any writer. There is nothing to write
/// up front or at the end, so an empty container is zero bytes long.
pub struct ContainerWriter<W: Write> {
    write: W,
}

impl<W: Write> ContainerWriter<W> {
    pub fn new(write: W) -> ContainerWriter<W> {
        ContainerWriter { write }
    }

    /// Write `header` followed by up to `header.size` bytes of `source`.
    /// Returns the number of payload bytes copied; anything short of the
    /// declared size leaves the container misaligned and is for the caller
    /// to treat as fatal.
    pub fn append<R: Read>(&mut self, header: &Header, source: R, buf: &mut [u8]) -> io::Result<u64> {
        let size = header
            .size()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        self.write.write_all(header.as_bytes())?;
        copy_exact(source, &mut self.write, size, buf)
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.write.flush()?;
        Ok(self.write)
    }
}

/// Reads a container front to back. Headers are only valid when read in
/// turn: after every [`next_header`](Self::next_header) the caller must
/// consume the payload with either `copy_payload` or `skip_payload`.
pub struct ContainerReader<R: Read> {
    read: R,
    path: Option<PathBuf>,
}

impl ContainerReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, UnpackError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| UnpackError::SourceUnavailable {
            path: path.clone(),
            source,
        })?;
        Ok(ContainerReader {
            read: BufReader::new(file),
            path: Some(path),
        })
    }
}

impl<R: Read> ContainerReader<R> {
    pub fn new(read: R) -> ContainerReader<R> {
        ContainerReader { read, path: None }
    }

    /// Read the next header. Fewer than [`HEADER_SIZE`] bytes left in the
    /// stream means the container has ended.
    pub fn next_header(&mut self) -> Result<Option<Header>, UnpackError> {
        let mut data = [0; HEADER_SIZE];
        let count = read_full(&mut self.read, &mut data).map_err(|source| UnpackError::Io {
            source,
            path: self.path.clone(),
            context: "Read header",
        })?;

        if count < HEADER_SIZE {
            if count > 0 {
                log::warn!("Ignoring {} trailing bytes after the last entry", count);
            }
            return Ok(None);
        }

        Ok(Some(Header::from_bytes(&data)?))
    }

    /// Copy the payload belonging to `header` into `write`
    pub fn copy_payload<W: Write>(
        &mut self,
        header: &Header,
        write: W,
        buf: &mut [u8],
    ) -> Result<u64, UnpackError> {
        let expected = header.size()?;
        let actual = copy_exact(&mut self.read, write, expected, buf).map_err(|source| {
            UnpackError::Io {
                source,
                path: self.path.clone(),
                context: "Copy entry payload",
            }
        })?;

        if actual != expected {
            return Err(UnpackError::TruncatedContainer {
                name: header.name_path().to_path_buf(),
                expected,
                actual,
            });
        }
        Ok(actual)
    }

    /// Read past the payload belonging to `header` without keeping it
    pub fn skip_payload(&mut self, header: &Header, buf: &mut [u8]) -> Result<u64, UnpackError> {
        self.copy_payload(header, io::sink(), buf)
    }

    /// Iterate the headers, discarding every payload
    pub fn entries(self) -> Entries<R> {
        Entries {
            reader: self,
            buf: vec![0; COPY_BUF_SIZE],
            done: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.read
    }
}

pub struct Entries<R: Read> {
    reader: ContainerReader<R>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: Read> Iterator for Entries<R> {
    type Item = Result<Header, UnpackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let res = match self.reader.next_header() {
            Ok(Some(header)) => self
                .reader
                .skip_payload(&header, &mut self.buf)
                .map(|_| header),
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(err) => Err(err),
        };

        // A container can't be resynchronised after a bad entry
        if res.is_err() {
            self.done = true;
        }
        Some(res)
    }
}

/// Read every header of the container at `path`, in the order they were
/// packed
pub fn list(path: impl AsRef<Path>) -> Result<Vec<Header>, UnpackError> {
    ContainerReader::open(path)?.entries().collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use fpack_core::{Header, HEADER_SIZE};

    use super::{ContainerReader, ContainerWriter};
    use crate::UnpackError;

    const PACKAGE_ENTRY1: &[u8] = b"some random string file contents\n";
    const PACKAGE_ENTRY1_PATH: &[u8] = b"var/db/fun";

    const PACKAGE_ENTRY2: &[u8] = b"{\"__comment\":\"Some json data\", \"my_float\":92.17364}";
    const PACKAGE_ENTRY2_PATH: &[u8] = b"lib/extra/randomjson.json";

    fn container() -> Vec<u8> {
        let mut buf = [0; 16];
        let mut writer = ContainerWriter::new(Vec::new());
        for (path, data) in [
            (PACKAGE_ENTRY1_PATH, PACKAGE_ENTRY1),
            (PACKAGE_ENTRY2_PATH, PACKAGE_ENTRY2),
        ] {
            let header = Header::new(data.len() as u64, path).unwrap();
            assert_eq!(writer.append(&header, data, &mut buf).unwrap(), data.len() as u64);
        }
        writer.finish().unwrap()
    }

    #[test]
    fn writer_layout() {
        let data = container();
        assert_eq!(
            data.len(),
            2 * HEADER_SIZE + PACKAGE_ENTRY1.len() + PACKAGE_ENTRY2.len()
        );

        let first = Header::from_bytes(&data).unwrap();
        assert_eq!(first.name_bytes(), PACKAGE_ENTRY1_PATH);
        assert_eq!(
            &data[HEADER_SIZE..HEADER_SIZE + PACKAGE_ENTRY1.len()],
            PACKAGE_ENTRY1
        );

        let second = Header::from_bytes(&data[HEADER_SIZE + PACKAGE_ENTRY1.len()..]).unwrap();
        assert_eq!(second.name_bytes(), PACKAGE_ENTRY2_PATH);
        assert_eq!(second.size().unwrap(), PACKAGE_ENTRY2.len() as u64);
    }

    #[test]
    fn writer_copies_declared_size_only() {
        let mut buf = [0; 16];
        let mut writer = ContainerWriter::new(Vec::new());
        let header = Header::new(4, b"grown").unwrap();
        assert_eq!(writer.append(&header, &b"0123456789"[..], &mut buf).unwrap(), 4);
        assert_eq!(writer.finish().unwrap().len(), HEADER_SIZE + 4);
    }

    #[test]
    fn reader_copies_in_order() {
        let data = container();
        let len = data.len() as u64;
        let mut reader = ContainerReader::new(Cursor::new(data));
        let mut buf = [0; 16];

        let header = reader.next_header().unwrap().unwrap();
        let mut out = Vec::new();
        reader.copy_payload(&header, &mut out, &mut buf).unwrap();
        assert_eq!(header.name_bytes(), PACKAGE_ENTRY1_PATH);
        assert_eq!(out, PACKAGE_ENTRY1);

        let header = reader.next_header().unwrap().unwrap();
        let mut out = Vec::new();
        reader.copy_payload(&header, &mut out, &mut buf).unwrap();
        assert_eq!(header.name_bytes(), PACKAGE_ENTRY2_PATH);
        assert_eq!(out, PACKAGE_ENTRY2);

        assert!(reader.next_header().unwrap().is_none());
        assert_eq!(reader.into_inner().position(), len);
    }

    #[test]
    fn skip_keeps_alignment() {
        let mut reader = ContainerReader::new(Cursor::new(container()));
        let mut buf = [0; 16];

        let header = reader.next_header().unwrap().unwrap();
        assert_eq!(
            reader.skip_payload(&header, &mut buf).unwrap(),
            PACKAGE_ENTRY1.len() as u64
        );

        let header = reader.next_header().unwrap().unwrap();
        assert_eq!(header.name_bytes(), PACKAGE_ENTRY2_PATH);
    }

    #[test]
    fn entries_lists_headers() {
        let names = ContainerReader::new(Cursor::new(container()))
            .entries()
            .map(|res| res.map(|header| header.name_bytes().to_vec()))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(names, [PACKAGE_ENTRY1_PATH, PACKAGE_ENTRY2_PATH]);
    }

    #[test]
    fn empty_container() {
        let mut reader = ContainerReader::new(Cursor::new(Vec::new()));
        assert!(reader.next_header().unwrap().is_none());
        assert_eq!(ContainerReader::new(Cursor::new(Vec::new())).entries().count(), 0);
    }

    #[test]
    fn trailing_partial_header_ends_container() {
        let mut data = container();
        data.extend_from_slice(&[0xff; HEADER_SIZE - 1]);
        assert_eq!(ContainerReader::new(Cursor::new(data)).entries().count(), 2);
    }

    #[test]
    fn truncated_payload() {
        let mut data = container();
        data.truncate(data.len() - 10);

        let mut entries = ContainerReader::new(Cursor::new(data)).entries();
        assert!(entries.next().unwrap().is_ok());
        match entries.next().unwrap() {
            Err(UnpackError::TruncatedContainer { name, expected, actual }) => {
                assert_eq!(name.as_os_str().len(), PACKAGE_ENTRY2_PATH.len());
                assert_eq!(expected, PACKAGE_ENTRY2.len() as u64);
                assert_eq!(actual, PACKAGE_ENTRY2.len() as u64 - 10);
            }
            other => panic!("expected truncated container, got {:?}", other),
        }
        assert!(entries.next().is_none());
    }

    #[test]
    fn negative_size_is_rejected() {
        let mut data = vec![0; HEADER_SIZE];
        data[..8].copy_from_slice(&(-5i64).to_ne_bytes());

        let mut reader = ContainerReader::new(Cursor::new(data));
        assert!(matches!(
            reader.next_header(),
            Err(UnpackError::Core(fpack_core::Error::InvalidSize(-5)))
        ));
    }
}
