// netscrub/src/utils/archive.rs
//! Zip bundle traversal: every entry of the input archive is run through the
//! anonymizer and written under the same name into a new archive.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::write::{FileOptions, ZipWriter};
use zip::{CompressionMethod, ZipArchive};

use netscrub_core::Anonymizer;

/// Suffix appended to the input file stem for the default output path.
pub const ANONYMIZED_SUFFIX: &str = "_anonymized";

/// `dir/name.ext` becomes `dir/name<suffix>.ext`.
pub fn output_filename(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    path.with_file_name(name)
}

/// Anonymizes every entry of `input` into a fresh archive at `output`.
///
/// Entries are processed in archive order. Directory entries are recreated.
/// The first failing entry aborts the whole run. The archive is built in a
/// temporary file next to `output` and only moved into place once complete,
/// so a failed run leaves nothing behind. Returns the number of file entries
/// written.
pub fn filter_zip(anonymizer: &mut Anonymizer, input: &Path, output: &Path) -> Result<usize> {
    let source = File::open(input).with_context(|| format!("failed to open zip file {}", input.display()))?;
    let mut archive =
        ZipArchive::new(source).with_context(|| format!("failed to read zip file {}", input.display()))?;

    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let target = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create zip file {}", output.display()))?;
    let mut writer = ZipWriter::new(target);
    let options: FileOptions<'_, ()> = FileOptions::default().compression_method(CompressionMethod::Deflated);

    info!("Processing {} entries from {}.", archive.len(), input.display());
    let mut written = 0;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("failed to open entry #{} from zip", index))?;
        let name = entry.name().to_string();

        if entry.is_dir() {
            debug!("Recreating directory entry {}.", name);
            writer
                .add_directory(name.as_str(), options)
                .with_context(|| format!("failed to create directory {} in zip", name))?;
            continue;
        }

        debug!("Anonymizing entry {}.", name);
        writer
            .start_file(name.as_str(), options)
            .with_context(|| format!("failed to create file {} in zip", name))?;
        anonymizer
            .process(&mut writer, &mut entry)
            .with_context(|| format!("failed to anonymize {}", name))?;
        written += 1;
    }

    let target = writer.finish().context("failed to finalize output zip")?;
    target
        .persist(output)
        .with_context(|| format!("failed to write zip file {}", output.display()))?;
    info!("Wrote {} anonymized entries to {}.", written, output.display());
    Ok(written)
}
