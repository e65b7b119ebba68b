use std::fs::{self, File};
use std::io;
use std::path::Path;

use zip::ZipArchive;

use crate::error::Result;

/// Extract every file entry of a year archive into `dest`, flattened.
///
/// INMET archives for some years nest the exports under a `{year}/`
/// folder; entries are extracted by file name only so the staging folder
/// is always flat. Returns the number of files extracted.
pub fn extract_archive(zip_path: &Path, dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest)?;

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut extracted = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        // enclosed_name rejects entries that would escape the target
        let Some(name) = entry.enclosed_name().and_then(|p| {
            p.file_name().map(|n| n.to_os_string())
        }) else {
            continue;
        };

        let out_path = dest.join(name);
        let mut out_file = File::create(&out_path)?;
        io::copy(&mut entry, &mut out_file)?;
        extracted += 1;
    }

    tracing::debug!(archive = %zip_path.display(), files = extracted, "archive extracted");
    Ok(extracted)
}

/// Remove everything inside a staging folder, keeping the folder itself.
///
/// Errors if the folder does not exist.
pub fn clear_folder(path: &Path) -> Result<()> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
