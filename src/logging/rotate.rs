//! Log file rotated on demand.
//!
//! Rotating shifts `bot.log.1` to `bot.log.2` and so on, dropping the oldest backup beyond
//! the configured count, moves the live file to `bot.log.1` and reopens an empty live file.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    keep: usize,
    file: File,
}

/// Shared handle to an append-only log file.
#[derive(Debug, Clone)]
pub struct RotatingFile {
    inner: Arc<Mutex<Inner>>,
}

impl RotatingFile {
    /// Opens `path` for appending, creating missing parent directories.
    ///
    /// # Arguments
    /// - `path` - Live log file
    /// - `keep` - Number of rotated backups kept next to it
    pub fn open(path: &Path, keep: usize) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = append(path)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                path: path.to_path_buf(),
                keep,
                file,
            })),
        })
    }

    /// Moves the live file to the first backup slot and starts a new one.
    ///
    /// With no backups kept the live file is only truncated.
    pub fn rotate(&self) -> io::Result<()> {
        let mut inner = self.lock()?;
        inner.file.flush()?;

        if inner.keep == 0 {
            inner.file = File::create(&inner.path)?;
            return Ok(());
        }

        let oldest = backup(&inner.path, inner.keep);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..inner.keep).rev() {
            let from = backup(&inner.path, index);
            if from.exists() {
                fs::rename(&from, backup(&inner.path, index + 1))?;
            }
        }

        fs::rename(&inner.path, backup(&inner.path, 1))?;
        inner.file = append(&inner.path)?;

        Ok(())
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn backup(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{}", index));
    PathBuf::from(name)
}
