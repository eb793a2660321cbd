//! Output destinations for generated lines.
//!
//! Patterns writing to the same path share one writer so lines from
//! different patterns never interleave mid-line.

use anyhow::Context;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

/// A writer shared between pattern tasks.
pub type Sink = Arc<Mutex<Box<dyn AsyncWrite + Send + Unpin>>>;

/// Where a pattern's lines go.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn from_path(path: Option<&PathBuf>) -> Self {
        match path {
            Some(path) => Destination::File(path.clone()),
            None => Destination::Stdout,
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Stdout => f.write_str("stdout"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Open writers, one per distinct destination.
#[derive(Default)]
pub struct Outputs {
    sinks: HashMap<Destination, Sink>,
}

impl Outputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the writer for `destination`, opening it on first use.
    ///
    /// Files are created when missing and always appended to.
    pub async fn open(&mut self, destination: &Destination) -> anyhow::Result<Sink> {
        if let Some(sink) = self.sinks.get(destination) {
            return Ok(Arc::clone(sink));
        }

        let writer: Box<dyn AsyncWrite + Send + Unpin> = match destination {
            Destination::Stdout => Box::new(BufWriter::new(tokio::io::stdout())),
            Destination::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .with_context(|| format!("Failed to create directory {parent:?}"))?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .await
                    .with_context(|| format!("Failed to open output file {path:?}"))?;
                Box::new(BufWriter::new(file))
            }
        };

        tracing::debug!(%destination, "output opened");
        let sink = Arc::new(Mutex::new(writer));
        self.sinks.insert(destination.clone(), Arc::clone(&sink));
        Ok(sink)
    }

    /// Flush every open writer.
    pub async fn flush_all(&self) -> anyhow::Result<()> {
        for (destination, sink) in &self.sinks {
            sink.lock()
                .await
                .flush()
                .await
                .with_context(|| format!("Failed to flush {destination}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_destination_shares_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.log");
        let destination = Destination::from_path(Some(&path));

        let mut outputs = Outputs::new();
        let first = outputs.open(&destination).await.unwrap();
        let second = outputs.open(&destination).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        first.lock().await.write_all(b"one\n").await.unwrap();
        outputs.flush_all().await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\n");
    }

    #[tokio::test]
    async fn test_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        std::fs::write(&path, "existing\n").unwrap();

        let mut outputs = Outputs::new();
        let sink = outputs.open(&Destination::File(path.clone())).await.unwrap();
        sink.lock().await.write_all(b"new\n").await.unwrap();
        outputs.flush_all().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing\nnew\n");
    }

    #[test]
    fn test_destination_display() {
        assert_eq!(Destination::from_path(None).to_string(), "stdout");
        assert_eq!(
            Destination::from_path(Some(&PathBuf::from("/tmp/a.log"))).to_string(),
            "/tmp/a.log"
        );
    }
}
