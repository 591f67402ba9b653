//! Output sinks for generated G-Code.
//!
//! A sink decides how each rendered record is terminated. The console sink
//! receives bare records and separates them itself, one per line. The file
//! sink receives records that already carry their newline and writes them
//! verbatim through a buffer. Both produce identical text.

use lipcut_core::LineEnding;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Stdout, StdoutLock, Write};
use std::path::{Path, PathBuf};

/// Where a program is written
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Standard output
    #[default]
    Stdout,
    /// A named file, created or truncated
    File(PathBuf),
}

impl OutputTarget {
    /// Target for an optional path; `None` means standard output
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Destination for rendered G-Code records
pub trait GcodeSink {
    /// Termination the sink expects on each record it receives
    fn line_ending(&self) -> LineEnding;

    /// Write one rendered record
    fn write_record(&mut self, record: &str) -> io::Result<()>;

    /// Flush anything buffered
    fn finish(&mut self) -> io::Result<()>;
}

/// Console-style sink: writes each bare record followed by a line break
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    /// Wrap any writer as a console
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the wrapped writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleSink<StdoutLock<'static>> {
    /// Console sink over a locked standard output
    pub fn stdout() -> Self {
        let out: Stdout = io::stdout();
        Self::new(out.lock())
    }
}

impl<W: Write> GcodeSink for ConsoleSink<W> {
    fn line_ending(&self) -> LineEnding {
        LineEnding::Bare
    }

    fn write_record(&mut self, record: &str) -> io::Result<()> {
        writeln!(self.out, "{}", record)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// File sink: records carry their own newline
///
/// The file handle is owned by the sink and closed when the sink is
/// dropped, whether generation finished or failed part-way.
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create (or truncate) the file at `path`
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Path of the file being written
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GcodeSink for FileSink {
    fn line_ending(&self) -> LineEnding {
        LineEnding::Newline
    }

    fn write_record(&mut self, record: &str) -> io::Result<()> {
        self.writer.write_all(record.as_bytes())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
