//! Outline conversion service
//!
//! Streams an outline file through the classifier and the hierarchy builder,
//! then writes the resulting taxonomy as JSON.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::json;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{HierarchyBuilder, LineClassifier, Taxonomy};
use crate::infrastructure::traits::FileSystem;

/// Result of parsing one outline.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub taxonomy: Taxonomy,
    /// Physical lines read, blank ones included
    pub lines: usize,
    /// Lines that produced an entry
    pub entries: usize,
}

/// Summary of a completed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub lines: usize,
    pub entries: usize,
    pub roots: usize,
    pub depth: usize,
}

/// Service converting outline files into taxonomy trees.
pub struct ConversionService {
    fs: Arc<dyn FileSystem>,
    classifier: LineClassifier,
}

impl ConversionService {
    /// Create a new conversion service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            classifier: LineClassifier::new(),
        }
    }

    /// Parse the outline at `input` into a taxonomy.
    #[instrument(level = "debug", skip(self))]
    pub fn parse(&self, input: &Path) -> ApplicationResult<ParseOutcome> {
        if !self.fs.exists(input) {
            return Err(ApplicationError::InputNotFound(input.to_path_buf()));
        }
        let reader = self
            .fs
            .open_read(input)
            .with_path_context("open input", input)?;
        self.parse_reader(reader, input)
    }

    /// Parse outline lines from any buffered reader, one line at a time.
    ///
    /// `source` is only used for error messages.
    pub fn parse_reader<R: BufRead>(
        &self,
        reader: R,
        source: &Path,
    ) -> ApplicationResult<ParseOutcome> {
        let mut builder = HierarchyBuilder::new();
        let mut lines = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => ApplicationError::InvalidEncoding {
                    path: source.to_path_buf(),
                    line: idx + 1,
                },
                _ => ApplicationError::OperationFailed {
                    context: format!("read line {}: {}", idx + 1, source.display()),
                    source: Box::new(e),
                },
            })?;
            lines += 1;
            if let Some(entry) = self.classifier.classify(&line) {
                builder.push(entry);
            }
        }

        let entries = builder.len();
        debug!("parse: {} lines, {} entries", lines, entries);
        Ok(ParseOutcome {
            taxonomy: builder.finish(),
            lines,
            entries,
        })
    }

    /// Load a taxonomy from either a JSON file written earlier or an outline.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Taxonomy> {
        if is_json(path) {
            if !self.fs.exists(path) {
                return Err(ApplicationError::InputNotFound(path.to_path_buf()));
            }
            let content = self
                .fs
                .read_to_string(path)
                .with_path_context("read taxonomy", path)?;
            json::from_str(&content)
        } else {
            Ok(self.parse(path)?.taxonomy)
        }
    }

    /// Write `taxonomy` as pretty-printed JSON to `output`.
    #[instrument(level = "debug", skip(self, taxonomy))]
    pub fn write(&self, taxonomy: &Taxonomy, output: &Path, indent: usize) -> ApplicationResult<()> {
        let not_writable = |source| ApplicationError::OutputNotWritable {
            path: output.to_path_buf(),
            source,
        };
        self.fs.ensure_parent(output).map_err(not_writable)?;
        let mut writer = self.fs.create(output).map_err(not_writable)?;
        json::write_pretty(taxonomy, &mut writer, indent)?;
        writer
            .flush()
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("write output: {}", output.display()),
                source: Box::new(e),
            })
    }

    /// Convert the outline at `input` into JSON at `output`.
    ///
    /// The output file is only created once the whole input has been parsed.
    #[instrument(level = "debug", skip(self))]
    pub fn convert(
        &self,
        input: &Path,
        output: &Path,
        indent: usize,
    ) -> ApplicationResult<ConversionReport> {
        let outcome = self.parse(input)?;
        self.write(&outcome.taxonomy, output, indent)?;

        let report = ConversionReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            lines: outcome.lines,
            entries: outcome.entries,
            roots: outcome.taxonomy.roots().len(),
            depth: outcome.taxonomy.depth(),
        };
        info!(
            "converted {} -> {} ({} entries)",
            input.display(),
            output.display(),
            report.entries
        );
        Ok(report)
    }
}

/// Whether `path` names a saved JSON tree rather than an outline.
pub fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
