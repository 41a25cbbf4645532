//! Record sinks and serialization
//!
//! Global invariants enforced:
//! - One open/write/close per record; the destination handle is never held
//!   across records
//! - The destination is never truncated mid-run; truncation happens only at
//!   sink construction when explicitly requested

use crate::ast::FunctionRecord;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default destination file name, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "function_scopes.txt";

/// Serialization format for records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    /// Four-line human-readable block (the compatibility surface)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Render a record as the four-line text block
///
/// This layout is the compatibility surface consumed by downstream tooling;
/// it must stay byte-for-byte stable:
///
/// ```text
/// Function: <name>
/// Start Line: <startLine>
/// End Line: <endLine>
/// <blank line>
/// ```
pub fn render_text(record: &FunctionRecord) -> String {
    format!(
        "Function: {}\nStart Line: {}\nEnd Line: {}\n\n",
        record.name, record.start_line, record.end_line
    )
}

/// Render a record as one JSON line
pub fn render_json(record: &FunctionRecord) -> Result<String> {
    let mut line = serde_json::to_string(record).context("Failed to serialize record")?;
    line.push('\n');
    Ok(line)
}

fn render(record: &FunctionRecord, format: RecordFormat) -> Result<String> {
    match format {
        RecordFormat::Text => Ok(render_text(record)),
        RecordFormat::Json => render_json(record),
    }
}

/// Destination for extracted records
///
/// Accepts one record at a time; the extractor pushes records as it visits
/// declarations, so a sink must be safe to call repeatedly with no batching.
pub trait RecordSink {
    /// Persist a single record
    fn append(&mut self, record: &FunctionRecord) -> Result<()>;
}

/// File-backed sink
///
/// Each `append` opens the destination in append mode, writes one rendered
/// record, and releases the handle before returning. A crash between calls
/// loses at most the in-flight record and never corrupts records already
/// written. Whether the destination starts empty is the caller's choice at
/// construction time; `append` itself never truncates.
pub struct FileSink {
    path: PathBuf,
    format: RecordFormat,
}

impl FileSink {
    /// Sink that appends to an existing destination (creating it if absent)
    pub fn appending(path: impl Into<PathBuf>, format: RecordFormat) -> Self {
        FileSink {
            path: path.into(),
            format,
        }
    }

    /// Sink that resets the destination once, then appends
    pub fn truncating(path: impl Into<PathBuf>, format: RecordFormat) -> Result<Self> {
        let path = path.into();
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to truncate output file: {}", path.display()))?;
        Ok(FileSink { path, format })
    }

    /// Destination path this sink writes to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for FileSink {
    fn append(&mut self, record: &FunctionRecord) -> Result<()> {
        let rendered = render(record, self.format)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open output file: {}", self.path.display()))?;
        file.write_all(rendered.as_bytes())
            .with_context(|| format!("Failed to write record to {}", self.path.display()))?;
        Ok(())
    }
}

/// Sink wrapping any writer (tests, stdout)
pub struct WriterSink<W: Write> {
    writer: W,
    format: RecordFormat,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer in a sink
    pub fn new(writer: W, format: RecordFormat) -> Self {
        WriterSink { writer, format }
    }

    /// Unwrap the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for WriterSink<W> {
    fn append(&mut self, record: &FunctionRecord) -> Result<()> {
        let rendered = render(record, self.format)?;
        self.writer
            .write_all(rendered.as_bytes())
            .context("Failed to write record")?;
        Ok(())
    }
}

/// Decorator that drops records already seen during this run
///
/// Keyed on (name, start_line, end_line), so a header-defined function
/// visited once per including translation unit collapses to one record.
/// Scope is a single run; records persisted by earlier runs are never
/// consulted.
pub struct DedupSink<'a> {
    inner: &'a mut dyn RecordSink,
    seen: HashSet<(String, u32, u32)>,
    dropped: usize,
}

impl<'a> DedupSink<'a> {
    /// Wrap an inner sink with per-run deduplication
    pub fn new(inner: &'a mut dyn RecordSink) -> Self {
        DedupSink {
            inner,
            seen: HashSet::new(),
            dropped: 0,
        }
    }

    /// Number of duplicate records dropped so far
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl RecordSink for DedupSink<'_> {
    fn append(&mut self, record: &FunctionRecord) -> Result<()> {
        let key = (record.name.clone(), record.start_line, record.end_line);
        if self.seen.insert(key) {
            self.inner.append(record)?;
        } else {
            self.dropped += 1;
        }
        Ok(())
    }
}
