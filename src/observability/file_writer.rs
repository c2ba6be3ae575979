//! Append-only line writer with size-based rotation.
//!
//! Before each write the current file's size is checked; once it is over the
//! limit the file is renamed to `<file name>.<UTC timestamp>` and a fresh one
//! is started. Only the newest backups are kept.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size and retention limits for a [`FileWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for Rotation {
    /// 10 MB per file, 3 backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Thread-safe rotating writer. The file is opened lazily on first write.
pub struct FileWriter {
    path: PathBuf,
    rotation: Rotation,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(path: PathBuf, rotation: Rotation) -> Self {
        Self {
            path,
            rotation,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails if the lock is poisoned or if rotating, opening or writing the
    /// file fails.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("trace file lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let Some(file) = guard.as_mut() else {
            return Err(io::Error::other("trace file is not open"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.rotation.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let Some(name) = self.path.file_name().and_then(|name| name.to_str()) else {
            return Err(io::Error::other("trace file path has no file name"));
        };

        fs::rename(&self.path, self.path.with_file_name(format!("{name}.{stamp}")))?;
        self.prune_backups(name)
    }

    /// Deletes all but the newest `max_backups` rotated files.
    fn prune_backups(&self, name: &str) -> io::Result<()> {
        let dir = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let prefix = format!("{name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|file| file.to_str())
                    .is_some_and(|file| file.starts_with(&prefix))
            })
            .collect();

        // Timestamps sort lexically, newest last.
        backups.sort();
        let excess = backups.len().saturating_sub(self.rotation.max_backups);
        for stale in backups.iter().take(excess) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("rotation", &self.rotation)
            .finish_non_exhaustive()
    }
}
