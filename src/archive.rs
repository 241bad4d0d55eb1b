//! Extraction of gzip-compressed tar archives.

use crate::error::{Result, SiteOpsError};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use tar::Archive;
use tracing::debug;

/// Unpack a gzip-compressed tar stream under `dest`, preserving the
/// relative paths recorded in the archive. Directories are created
/// recursively and regular files written verbatim.
///
/// The first failing entry aborts extraction; entries already written stay
/// on disk.
pub fn extract_tarball<R: Read>(reader: R, dest: &Path) -> Result<()> {
    let decoder = GzDecoder::new(reader);
    let mut archive = Archive::new(decoder);

    let entries = archive.entries().map_err(|e| SiteOpsError::Extraction {
        path: dest.display().to_string(),
        message: format!("could not read the archive: {e}"),
    })?;

    for entry in entries {
        let mut entry = entry.map_err(|e| SiteOpsError::Extraction {
            path: dest.display().to_string(),
            message: format!("could not read an entry header: {e}"),
        })?;

        let entry_path = entry
            .path()
            .map_err(|e| SiteOpsError::Extraction {
                path: dest.display().to_string(),
                message: format!("entry has an unusable path: {e}"),
            })?
            .into_owned();

        debug!("extracting {}", entry_path.display());
        entry
            .unpack_in(dest)
            .map_err(|e| SiteOpsError::Extraction {
                path: entry_path.display().to_string(),
                message: e.to_string(),
            })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Cursor;

    fn gzipped_tar(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for (path, contents) in entries {
            let mut header = tar::Header::new_gnu();
            match contents {
                Some(data) => {
                    header.set_size(data.len() as u64);
                    header.set_mode(0o644);
                    header.set_cksum();
                    builder.append_data(&mut header, path, *data).unwrap();
                }
                None => {
                    header.set_entry_type(tar::EntryType::Directory);
                    header.set_size(0);
                    header.set_mode(0o755);
                    header.set_cksum();
                    builder
                        .append_data(&mut header, path, std::io::empty())
                        .unwrap();
                }
            }
        }

        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn nested_files_keep_their_relative_paths_and_bytes() {
        let archive = gzipped_tar(&[
            ("a/b/c.txt", Some(b"hello archive")),
            ("top.txt", Some(b"root level")),
        ]);
        let dir = tempfile::tempdir().unwrap();

        extract_tarball(Cursor::new(archive), dir.path()).unwrap();

        let nested = std::fs::read(dir.path().join("a/b/c.txt")).unwrap();
        assert_eq!(nested, b"hello archive");
        let top = std::fs::read(dir.path().join("top.txt")).unwrap();
        assert_eq!(top, b"root level");
    }

    #[test]
    fn directory_entries_are_created_when_absent() {
        let archive = gzipped_tar(&[("config/sync/", None)]);
        let dir = tempfile::tempdir().unwrap();

        extract_tarball(Cursor::new(archive), dir.path()).unwrap();

        assert!(dir.path().join("config/sync").is_dir());
    }

    #[test]
    fn garbage_input_reports_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = extract_tarball(Cursor::new(b"definitely not gzip".to_vec()), dir.path());

        assert!(matches!(result, Err(SiteOpsError::Extraction { .. })));
    }
}
