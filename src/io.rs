use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;

/// Reject `-` where a real file path is required.
pub fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    Ok(())
}

/// Write-then-rename output file. Nothing appears at the target until [`PendingWrite::commit`].
#[derive(Debug)]
pub struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

/// Open a temp file next to `target`. Fails if `target` exists and `force` is off.
pub fn open_for_write(target: &Path, force: bool) -> Result<PendingWrite> {
    assert_not_stdout(target)?;
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("[io] Failed to create directory {}", parent.display()))?;
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }
    let tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("[io] Failed to create temp file in {}", parent.display()))?;
    Ok(PendingWrite { target: target.to_path_buf(), tmp })
}

impl PendingWrite {
    /// Flush, fsync and rename into place.
    pub fn commit(mut self) -> Result<()> {
        self.tmp.flush().context("[io] Failed to flush output")?;
        self.tmp.as_file().sync_all().ok(); // best-effort
        let Self { target, tmp } = self;
        tmp.persist(&target)
            .with_context(|| format!("[io] Failed to rename output to {}", target.display()))?;
        if let Some(dir) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
        tracing::info!(path = %target.display(), "wrote output");
        Ok(())
    }
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.tmp.write(buf) }

    fn flush(&mut self) -> io::Result<()> { self.tmp.flush() }
}

/// Atomically write `target` with `fill`. A failed `fill` leaves any existing file untouched.
pub fn write_atomic<F>(target: &Path, force: bool, fill: F) -> Result<()>
where F: FnOnce(&mut PendingWrite) -> Result<()> {
    let mut pending = open_for_write(target, force)?;
    fill(&mut pending)?;
    pending.commit()
}
