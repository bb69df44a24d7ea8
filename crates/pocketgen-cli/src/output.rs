use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

pub fn write_text_atomic(path: &Path, text: &str) -> CliResult<()> {
    write_bytes_atomic(path, text.as_bytes())
}

/// Write through a sibling temp file and rename, so readers never see a
/// partially written output.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> CliResult<()> {
    let write_err = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = temp_path(path)?;
    let staged = write_temp(&tmp_path, data).and_then(|()| std::fs::rename(&tmp_path, path));
    if let Err(source) = staged {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }
    if let Some(parent) = parent {
        sync_dir(parent).map_err(write_err)?;
    }

    Ok(())
}

fn write_temp(tmp_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> CliResult<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        CliError::InvalidArgument(format!("invalid output path {}", path.display()))
    })?;
    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
