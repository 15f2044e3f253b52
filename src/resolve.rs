//! Frame resolution: turn parsed rows into points with absolute positions.
//!
//! Points are appended in file order. Each one is placed relative to an
//! earlier point (or the origin `*`), rotated by its frame angle. Anything the
//! row leaves unspecified is inherited from the previous point.

use std::collections::HashSet;

use crate::coordinate::{ORIGIN_LABEL, ParsedCoordinate, Point, PointKind};
use crate::errors::{
    ClosedCollectionError, DuplicateLabelError, ResolveError, UnresolvedReferenceError,
};
use crate::log::debug;
use crate::types::{Angle, HeightRange, Position};

/// All points of one footprint file, in winding order.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    height: HeightRange,
    source: String,
    pub(crate) points: Vec<Point>,
    pub(crate) labels: HashSet<String>,
    /// Indices into `points` of the wall-tagged points, in encounter order
    pub(crate) boundary: Vec<usize>,
    /// Set once `close_boundary` has appended its chain
    pub(crate) closed: bool,
}

impl Collection {
    pub fn new(name: impl Into<String>, height: HeightRange, source: impl Into<String>) -> Self {
        let mut labels = HashSet::new();
        labels.insert(ORIGIN_LABEL.to_string());
        Collection {
            name: name.into(),
            height,
            source: source.into(),
            points: Vec::new(),
            labels,
            boundary: Vec::new(),
            closed: false,
        }
    }

    /// Resolve a parsed row and append it.
    ///
    /// `line` is the 1-based source row, if the point came from a file.
    pub fn add_point(
        &mut self,
        parsed: ParsedCoordinate,
        line: Option<usize>,
    ) -> Result<&Point, ResolveError> {
        if self.closed {
            return Err(ClosedCollectionError { label: parsed.label }.into());
        }
        if self.labels.contains(&parsed.label) {
            return Err(DuplicateLabelError { label: parsed.label }.into());
        }

        let (reference, rotation) = match self.points.last() {
            None => (ORIGIN_LABEL.to_string(), Angle::ZERO),
            Some(prev) => (
                parsed.reference.unwrap_or_else(|| prev.reference.clone()),
                parsed.rotation.unwrap_or(prev.rotation),
            ),
        };

        let origin = self
            .reference_position(&reference)
            .ok_or_else(|| UnresolvedReferenceError {
                label: parsed.label.clone(),
                reference: reference.clone(),
            })?;

        let position = origin + parsed.offset.rotated(rotation);

        debug!(
            label = %parsed.label,
            reference = %reference,
            rotation = rotation.degrees(),
            x = %parsed.written[0],
            y = %parsed.written[1],
            %position,
            "resolved point"
        );

        let point = Point {
            label: parsed.label,
            reference,
            rotation,
            offset: parsed.offset,
            position,
            draw: parsed.draw,
            outline: parsed.outline,
            wall: parsed.wall,
            kind: PointKind::Surveyed,
            line,
        };

        let index = self.points.len();
        if point.wall.is_some() {
            self.boundary.push(index);
        }
        self.labels.insert(point.label.clone());
        self.points.push(point);
        Ok(&self.points[index])
    }

    /// Absolute position of an already-known label.
    fn reference_position(&self, reference: &str) -> Option<Position> {
        if reference == ORIGIN_LABEL {
            return Some(Position::ORIGIN);
        }
        if !self.labels.contains(reference) {
            return None;
        }
        self.points
            .iter()
            .find(|p| p.label == reference)
            .map(|p| p.position)
    }

    /// True once the outline has been closed against the world.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mark the points appended by the closer as part of the collection.
    pub(crate) fn seal(&mut self, chain: Vec<Point>) {
        for point in &chain {
            self.labels.insert(point.label.clone());
        }
        self.points.extend(chain);
        self.closed = true;
    }

    /// Look up a point by label.
    pub fn get(&self, label: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.label == label)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> HeightRange {
        self.height
    }

    /// The file the collection was read from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Wall-tagged points in the order they were written.
    pub fn boundary_points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.boundary.iter().map(|&i| &self.points[i])
    }

    /// More than one outline point means a surrounding dirt volume can be
    /// inferred.
    pub fn has_outline_points(&self) -> bool {
        self.points.iter().filter(|p| p.outline).count() > 1
    }

    /// Whether the volume name marks a dirt volume
    pub fn is_dirt(&self) -> bool {
        self.name.contains("dirt.")
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
