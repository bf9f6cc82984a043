use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::container::ContainerReader;
use crate::ext::HeaderExt;
use crate::{EntryError, EntrySummary, Report, UnpackError, COPY_BUF_SIZE};

/// Split the container at `container` back into files, each written to its
/// stored name relative to the current directory.
pub fn unpack(container: impl AsRef<Path>) -> Result<Report, UnpackError> {
    extract(container.as_ref(), None)
}

/// Like [`unpack`], but relative stored names are resolved against
/// `base_dir`. Absolute names are written where they point.
pub fn unpack_into(
    container: impl AsRef<Path>,
    base_dir: impl AsRef<Path>,
) -> Result<Report, UnpackError> {
    extract(container.as_ref(), Some(base_dir.as_ref()))
}

fn extract(container: &Path, base_dir: Option<&Path>) -> Result<Report, UnpackError> {
    let mut reader = ContainerReader::open(container)?;

    let mut report = Report::default();
    let mut buf = vec![0; COPY_BUF_SIZE];
    while let Some(header) = reader.next_header()? {
        let name = header.name_path();
        let target = match base_dir {
            Some(base_dir) => base_dir.join(name),
            None => name.to_path_buf(),
        };

        let file = match File::create(&target) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("Failed to create {}: {}", target.display(), err);
                reader.skip_payload(&header, &mut buf)?;
                report.skipped.push(EntryError::DestinationOpenSkipped {
                    path: target,
                    source: err,
                });
                continue;
            }
        };

        let mut write = BufWriter::new(file);
        let size = reader.copy_payload(&header, &mut write, &mut buf)?;
        write.flush().map_err(|source| UnpackError::Io {
            source,
            path: Some(target.clone()),
            context: "Flush file",
        })?;

        log::info!("Extracted {} ({} bytes)", target.display(), size);
        report.entries.push(EntrySummary { name: target, size });
    }

    Ok(report)
}
