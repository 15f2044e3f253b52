//! Resolve hand-authored building footprints into closed polygons and
//! SimpleConfig geometry files.
//!
//! A footprint file looks like this:
//!
//! ```text
//! VolName)foundation.east
//! Height)-10:0,0:0
//! A)0:0,0:0
//! b[N]<A>0:0,10:0
//! c)10:0,10:0
//! d[E]<>10:0,0:0
//! ```
//!
//! Every coordinate row is placed relative to an earlier point, optionally
//! rotated. Points tagged with a wall (`[N]`, `[E]`, `[S]`, `[W]`) are open
//! ends of the outline; they get projected onto the world boundary so the
//! surrounding dirt can be closed off.

use pest_derive::Parser;

pub mod boundary;
pub mod config;
pub mod coordinate;
pub mod defaults;
pub mod emit;
pub mod errors;
pub mod log;
pub mod parse;
pub mod pipeline;
pub mod resolve;
pub mod source;
pub mod types;
pub mod units;
pub mod viewer;
pub mod world;

pub use config::Settings;
pub use coordinate::{ParsedCoordinate, Point, PointKind};
pub use emit::{AggregateIndex, ConfigDocument, Variant};
pub use errors::{FootprintError, InputError};
pub use pipeline::{BatchReport, FileOutcome, process_file, process_source, run_batch};
pub use resolve::Collection;
pub use world::{Corner, Wall, WorldRectangle};

#[derive(Parser)]
#[grammar = "footprint.pest"]
pub struct FootprintParser;

/// Process one footprint with default settings.
///
/// Returns the generated documents on success, or an error with diagnostics.
pub fn footprint(name: &str, source: &str) -> Result<FileOutcome, miette::Report> {
    let settings = Settings::default();
    let world = settings.world()?;
    Ok(process_source(name, source, &settings, &world)?)
}
