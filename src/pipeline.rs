//! Per-file processing and the parallel batch driver.
//!
//! A file named `dirt.*` is a dirt volume: its outline is closed against the
//! world and emitted whole. Anything else is a building; when it carries
//! enough outline points, a copy is closed and emitted again as the dirt
//! surrounding it.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::Settings;
use crate::emit::{AggregateIndex, ConfigDocument, Variant};
use crate::errors::{
    FootprintError, Header, InputError, MissingHeaderError, SettingsError, SourceContext,
};
use crate::log::{debug, info, warn};
use crate::parse::{parse_coordinate, parse_height_header, parse_volume_header};
use crate::resolve::Collection;
use crate::source::{self, SourceLine};
use crate::viewer::{ExtrudedVolume, RenderRequest};
use crate::world::WorldRectangle;

/// Everything one input file produced
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub file: String,
    pub documents: Vec<ConfigDocument>,
    pub volumes: Vec<ExtrudedVolume>,
}

impl FileOutcome {
    fn new(file: &str) -> Self {
        FileOutcome {
            file: file.to_string(),
            documents: Vec::new(),
            volumes: Vec::new(),
        }
    }

    fn emit(&mut self, collection: &Collection, variant: Variant, settings: &Settings) {
        let document = ConfigDocument::from_collection(collection, variant, settings);
        debug!(
            file = %self.file,
            document = %document.file_name(),
            vertices = document.vertices.len(),
            "emitted document"
        );
        self.documents.push(document);
        self.volumes.push(ExtrudedVolume::from_collection(collection, variant));
    }

    /// This file's share of the master index
    pub fn index(&self) -> AggregateIndex {
        let mut index = AggregateIndex::new();
        for document in &self.documents {
            index.register(document);
        }
        index
    }
}

/// Attaches file name, source text and the offending row to row errors.
struct FileContext<'a> {
    ctx: SourceContext,
    rows: Vec<SourceLine<'a>>,
}

impl<'a> FileContext<'a> {
    fn new(name: &str, text: &'a str) -> Self {
        FileContext {
            ctx: SourceContext::new(name, text),
            rows: source::lines(text),
        }
    }

    fn error(&self, row: Option<&SourceLine<'_>>, cause: impl Into<InputError>) -> FootprintError {
        FootprintError::Input {
            file: self.ctx.name.clone(),
            line: row.map(|r| r.number),
            src: self.ctx.named_source(),
            span: row.map(|r| r.span),
            cause: cause.into(),
        }
    }

    fn error_at_line(&self, line: Option<usize>, cause: impl Into<InputError>) -> FootprintError {
        let row = line.and_then(|n| self.rows.iter().find(|r| r.number == n));
        self.error(row, cause)
    }
}

/// Read the header rows and resolve every coordinate row.
pub fn load_collection(name: &str, text: &str) -> Result<Collection, FootprintError> {
    let file = FileContext::new(name, text);
    let mut rows = file.rows.iter();

    let volume_row = rows
        .next()
        .ok_or_else(|| file.error(None, MissingHeaderError::new(Header::VolumeName)))?;
    let volume_name =
        parse_volume_header(volume_row.text).map_err(|e| file.error(Some(volume_row), e))?;

    let height_row = rows
        .next()
        .ok_or_else(|| file.error(None, MissingHeaderError::new(Header::Height)))?;
    let height =
        parse_height_header(height_row.text).map_err(|e| file.error(Some(height_row), e))?;

    let mut collection = Collection::new(volume_name, height, name);
    for row in rows {
        let parsed = parse_coordinate(row.text).map_err(|e| file.error(Some(row), e))?;
        collection
            .add_point(parsed, Some(row.number))
            .map_err(|e| file.error(Some(row), e))?;
    }

    info!(
        file = name,
        volume = %collection.name(),
        points = collection.len(),
        "loaded footprint"
    );
    Ok(collection)
}

/// Run one file's text through the whole pipeline.
pub fn process_source(
    name: &str,
    text: &str,
    settings: &Settings,
    world: &WorldRectangle,
) -> Result<FileOutcome, FootprintError> {
    let mut collection = load_collection(name, text)?;
    let mut outcome = FileOutcome::new(name);

    let close = |collection: &mut Collection| {
        collection.close_boundary(world).map_err(|e| {
            let line = collection.get(&e.second).and_then(|p| p.line);
            FileContext::new(name, text).error_at_line(line, e)
        })
    };

    if collection.is_dirt() {
        close(&mut collection)?;
        outcome.emit(&collection, Variant::Full, settings);
        return Ok(outcome);
    }

    outcome.emit(&collection, Variant::Full, settings);

    if collection.has_outline_points() {
        let mut dirt = collection.clone();
        if close(&mut dirt)? {
            dirt.rename(format!("dirt.{}", collection.name()));
            outcome.emit(&dirt, Variant::Outline, settings);
        }
    }

    Ok(outcome)
}

/// Read and process one file.
pub fn process_file(
    path: &Path,
    settings: &Settings,
    world: &WorldRectangle,
) -> Result<FileOutcome, FootprintError> {
    let name = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|cause| FootprintError::Io {
        path: name.clone(),
        cause,
    })?;
    process_source(&name, &text, settings, world)
}

/// Result of a batch run
#[derive(Debug)]
pub struct BatchReport {
    /// Successful files, in input order
    pub outcomes: Vec<FileOutcome>,
    /// Failed files, in input order
    pub failures: Vec<FootprintError>,
    pub index: AggregateIndex,
    pub render: RenderRequest,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn documents(&self) -> impl Iterator<Item = &ConfigDocument> + '_ {
        self.outcomes.iter().flat_map(|o| o.documents.iter())
    }

    /// Write every document and the master index into `dir`.
    pub fn write_to(&self, dir: &Path, settings: &Settings) -> Result<Vec<PathBuf>, FootprintError> {
        let io_error = |path: &Path, cause| FootprintError::Io {
            path: path.display().to_string(),
            cause,
        };

        std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

        let mut written = Vec::new();
        for document in self.documents() {
            let path = dir.join(document.file_name());
            std::fs::write(&path, document.to_string()).map_err(|e| io_error(&path, e))?;
            written.push(path);
        }

        let path = dir.join(&settings.index_file_name);
        std::fs::write(&path, self.index.document(settings).to_string())
            .map_err(|e| io_error(&path, e))?;
        written.push(path);

        info!(dir = %dir.display(), files = written.len(), "wrote output");
        Ok(written)
    }
}

/// Process files in parallel, then merge their results in input order.
///
/// A failed file contributes nothing to the index.
pub fn run_batch<P: AsRef<Path> + Sync>(
    paths: &[P],
    settings: &Settings,
) -> Result<BatchReport, SettingsError> {
    let world = settings.world()?;

    let results: Vec<Result<FileOutcome, FootprintError>> = paths
        .par_iter()
        .map(|path| process_file(path.as_ref(), settings, &world))
        .collect();

    let mut report = BatchReport {
        outcomes: Vec::new(),
        failures: Vec::new(),
        index: AggregateIndex::new(),
        render: RenderRequest::new(world),
    };

    for result in results {
        match result {
            Ok(outcome) => {
                report.index.merge(outcome.index());
                for volume in &outcome.volumes {
                    report.render.push(volume.clone());
                }
                report.outcomes.push(outcome);
            }
            Err(err) => {
                warn!(file = %err.file(), "skipping file: {err}");
                report.failures.push(err);
            }
        }
    }

    Ok(report)
}
