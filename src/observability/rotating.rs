//! Size-rotated append-only files for logs and exported spans.
//!
//! When a write would push the file past `max_bytes`, the file is shifted to
//! `<name>.1`, older backups move up by one and the oldest beyond `backups`
//! is removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            backups: 3,
        }
    }
}

/// Thread-safe rotating file, opened lazily on first write.
///
/// `&RotatingFile` implements [`Write`], so an `Arc<RotatingFile>` can be
/// handed to `tracing_subscriber::fmt` as a writer.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline as one write.
    ///
    /// # Errors
    ///
    /// Any I/O error from rotating, opening or writing the file.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        self.append(&bytes)
    }

    fn append(&self, bytes: &[u8]) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|_| io::Error::other("rotating file lock poisoned"))?;

        if self.needs_rotation(bytes.len()) {
            *handle = None;
            self.rotate()?;
        }

        let file = match handle.as_mut() {
            Some(file) => file,
            None => handle.insert(OpenOptions::new().create(true).append(true).open(&self.path)?),
        };
        file.write_all(bytes)?;
        file.flush()
    }

    fn needs_rotation(&self, incoming: usize) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| {
            meta.len() > 0 && meta.len() + incoming as u64 > self.policy.max_bytes
        })
    }

    fn backup(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.backups == 0 {
            return remove_if_present(&self.path);
        }
        remove_if_present(&self.backup(self.policy.backups))?;
        for n in (1..self.policy.backups).rev() {
            let from = self.backup(n);
            if from.exists() {
                fs::rename(&from, self.backup(n + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup(1))?;
        }
        Ok(())
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl Write for &RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(backups: usize) -> RotationPolicy {
        RotationPolicy {
            max_bytes: 16,
            backups,
        }
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("a.log"), RotationPolicy::default());
        file.write_line("one").unwrap();
        file.write_line("two").unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.json");
        let file = RotatingFile::new(path.clone(), small(2));

        for i in 0..5 {
            file.write_line(&format!("line-{i}-padding")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line-4-padding\n");
        assert_eq!(fs::read_to_string(dir.path().join("spans.json.1")).unwrap(), "line-3-padding\n");
        assert_eq!(fs::read_to_string(dir.path().join("spans.json.2")).unwrap(), "line-2-padding\n");
        assert!(!dir.path().join("spans.json.3").exists());
    }

    #[test]
    fn zero_backups_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.log");
        let file = RotatingFile::new(path.clone(), small(0));
        file.write_line("first-long-line").unwrap();
        file.write_line("second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert!(!dir.path().join("x.log.1").exists());
    }

    #[test]
    fn usable_as_io_write() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("w.log"), RotationPolicy::default());
        let mut writer = &file;
        write!(writer, "hello {}", 42).unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "hello 42");
    }
}
