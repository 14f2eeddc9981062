//! Size-rotated log file
//!
//! `<app>.log` is the active file. When it would grow past the size limit
//! it is renamed to `<app>.<timestamp>.log` and a fresh file is opened;
//! rotated files beyond the retention count are removed oldest first.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub(crate) struct RollingFile {
    dir: PathBuf,
    app_name: String,
    file: File,
    written: u64,
    max_bytes: u64,
    max_files: usize,
}

impl RollingFile {
    pub(crate) fn open(dir: &Path, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let file = open_append(&active_path(dir, app_name))?;
        let written = file.metadata()?.len();

        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            file,
            written,
            max_bytes,
            max_files,
        })
    }

    pub(crate) fn active_path(&self) -> PathBuf {
        active_path(&self.dir, &self.app_name)
    }

    pub(crate) fn write_chunk(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + bytes.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();
        let mut rotated = self.dir.join(format!("{}.{}.log", self.app_name, stamp));
        let mut n = 1;
        while rotated.exists() {
            rotated = self.dir.join(format!("{}.{}-{}.log", self.app_name, stamp, n));
            n += 1;
        }

        fs::rename(self.active_path(), &rotated)?;
        self.file = open_append(&self.active_path())?;
        self.written = 0;
        self.prune()
    }

    /// Keep at most `max_files` files in total, the active one included
    fn prune(&self) -> io::Result<()> {
        let prefix = format!("{}.", self.app_name);
        let active = format!("{}.log", self.app_name);

        let mut rotated: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.starts_with(&prefix) && name.ends_with(".log") && name != active)
                    .unwrap_or(false)
            })
            .collect();
        rotated.sort();

        let keep = self.max_files.saturating_sub(1);
        let excess = rotated.len().saturating_sub(keep);
        for path in rotated.into_iter().take(excess) {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn active_path(dir: &Path, app_name: &str) -> PathBuf {
    dir.join(format!("{}.log", app_name))
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
