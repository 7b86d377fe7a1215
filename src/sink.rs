//! Destinations for encoded text.
//!
//! An [`Encoder`](crate::Encoder) only ever appends to an in-memory buffer. A
//! [`Sink`] receives a snapshot of that buffer when the encoder is closed, or
//! when it is dropped with `save_on_destroy` set.

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Receives the full encoded content, once per close.
pub trait Sink {
    fn write(&mut self, text: &str) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&mut self, text: &str) -> Result<()> {
        (**self).write(text)
    }
}

/// Writes the content to a file, replacing whatever was there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&mut self, text: &str) -> Result<()> {
        fs::write(&self.path, text)
            .map_err(|e| Error::io(&format!("{}: {}", self.path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("out.txt"));
        sink.write("a: 1\n").unwrap();
        sink.write("b: 2\n").unwrap();
        assert_eq!(fs::read_to_string(sink.path()).unwrap(), "b: 2\n");
    }

    #[test]
    fn test_boxed_sink_forwards() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxed.txt");
        let mut sink: Box<dyn Sink> = Box::new(FileSink::new(&path));
        sink.write("k: v\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "k: v\n");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("no/such/dir/out.txt"));
        assert!(matches!(sink.write("x"), Err(Error::Io(_))));
    }
}
