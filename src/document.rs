use crate::error::{EngineError, EngineResult};
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A file opened read-write and held in memory as a fixed-length byte image.
///
/// Writes land in the image and are remembered as dirty offsets. `flush`
/// writes those offsets back in place; the file is never resized.
pub struct ByteDocument {
    path: PathBuf,
    file: File,
    bytes: Vec<u8>,
    dirty: BTreeSet<usize>,
}

impl ByteDocument {
    pub fn open(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new().read(true).write(true).open(&path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        tracing::info!(target: "document", file = %path.display(), len = bytes.len(), "opened");
        Ok(Self {
            path,
            file,
            bytes,
            dirty: BTreeSet::new(),
        })
    }

    /// Opens over a read-only handle so flushes fail with an I/O error.
    #[cfg(test)]
    pub(crate) fn open_read_only(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(Self {
            path,
            file,
            bytes,
            dirty: BTreeSet::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn read(&self, offset: usize, count: usize) -> EngineResult<&[u8]> {
        let end = offset
            .checked_add(count)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(EngineError::OutOfRange {
                offset,
                len: self.bytes.len(),
            })?;
        Ok(&self.bytes[offset..end])
    }

    /// Overwrites one byte. `value` is taken wide so callers can hand over
    /// whatever they parsed and let the document reject it.
    pub fn write(&mut self, offset: usize, value: u32) -> EngineResult<()> {
        if offset >= self.bytes.len() {
            return Err(EngineError::OutOfRange {
                offset,
                len: self.bytes.len(),
            });
        }
        let byte = u8::try_from(value)
            .map_err(|_| EngineError::InvalidValue(format!("{value} is outside 0-255")))?;
        self.bytes[offset] = byte;
        self.dirty.insert(offset);
        Ok(())
    }

    pub fn flush(&mut self) -> EngineResult<()> {
        if self.dirty.is_empty() {
            return Ok(());
        }
        let runs = dirty_runs(&self.dirty);
        for (start, end) in &runs {
            self.file.seek(SeekFrom::Start(*start as u64))?;
            self.file.write_all(&self.bytes[*start..*end])?;
        }
        self.file.sync_data()?;
        tracing::info!(
            target: "document",
            file = %self.path.display(),
            bytes = self.dirty.len(),
            runs = runs.len(),
            "flushed"
        );
        self.dirty.clear();
        Ok(())
    }
}

impl Drop for ByteDocument {
    fn drop(&mut self) {
        if !self.is_dirty() {
            return;
        }
        if let Err(err) = self.flush() {
            tracing::error!(
                target: "document",
                file = %self.path.display(),
                %err,
                "flush on drop failed"
            );
        }
    }
}

/// Collapses sorted dirty offsets into half-open `[start, end)` runs.
fn dirty_runs(dirty: &BTreeSet<usize>) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for &offset in dirty {
        match runs.last_mut() {
            Some((_, end)) if *end == offset => *end += 1,
            _ => runs.push((offset, offset + 1)),
        }
    }
    runs
}
