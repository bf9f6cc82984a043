use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Seek, SeekFrom};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use fpack_core::Header;

use crate::container::ContainerWriter;
use crate::ext::HeaderExt;
use crate::{EntryError, EntrySummary, PackError, Report, COPY_BUF_SIZE};

/// Open a source and measure it by seeking to the end and back. Only regular
/// files have a length that reading will actually produce.
fn open_source(path: &Path) -> io::Result<(File, u64)> {
    let mut file = File::open(path)?;
    if !file.metadata()?.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    let size = file.seek(SeekFrom::End(0))?;
    file.seek(SeekFrom::Start(0))?;
    Ok((file, size))
}

/// Write every source in `sources` into a new container at `destination`,
/// in order. Sources which can't be opened are left out and listed in the
/// returned [`Report`]; only failing to write the container is an error.
///
/// Each source is stored under its path as given, cut to 255 bytes.
pub fn pack<I, P>(sources: I, destination: impl AsRef<Path>) -> Result<Report, PackError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let destination = destination.as_ref();
    let container_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(destination)
        .map_err(|source| PackError::DestinationUnavailable {
            path: destination.to_path_buf(),
            source,
        })?;
    let mut container = ContainerWriter::new(BufWriter::new(container_file));

    let mut report = Report::default();
    let mut buf = vec![0; COPY_BUF_SIZE];
    for source in sources {
        let source = source.as_ref();

        let (source_file, size) = match open_source(source) {
            Ok(opened) => opened,
            Err(err) => {
                log::warn!("Failed to open {}: {}", source.display(), err);
                report.skipped.push(EntryError::SourceOpenSkipped {
                    path: source.to_path_buf(),
                    source: err,
                });
                continue;
            }
        };
        log::info!("Opened {}", source.display());
        log::debug!("{}: {} bytes", source.display(), size);

        let name = source.as_os_str().as_bytes();
        let header = Header::new(size, name)?;
        if Header::is_truncated(name) {
            log::warn!(
                "Name of {} truncated to {}",
                source.display(),
                header.name_path().display()
            );
        }

        let copied = container
            .append(&header, source_file, &mut buf)
            .map_err(|err| PackError::Io {
                source: err,
                path: source.to_path_buf(),
                context: "Pack file",
            })?;
        if copied != size {
            return Err(PackError::LengthMismatch {
                path: source.to_path_buf(),
                expected: size,
                actual: copied,
            });
        }

        log::info!("Packed {}", source.display());
        report.entries.push(EntrySummary {
            name: header.name_path().to_path_buf(),
            size,
        });
    }

    container.finish().map_err(|err| PackError::Io {
        source: err,
        path: destination.to_path_buf(),
        context: "Flush container",
    })?;

    Ok(report)
}
