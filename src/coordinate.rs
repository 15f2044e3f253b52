//! Point types: what a coordinate row says, and what it resolves to.

use std::fmt;

use crate::types::{Angle, FtIn, Offset, Position};
use crate::world::{Corner, Wall};

/// Reference label of the first point and of anything measured from the
/// world origin.
pub const ORIGIN_LABEL: &str = "*";

/// One parsed coordinate row. The absolute position is not known yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCoordinate {
    pub label: String,
    /// False when the label was marked `//`
    pub draw: bool,
    /// True when the label starts with a lowercase character
    pub outline: bool,
    pub wall: Option<Wall>,
    /// `None` inherits the previous point's reference
    pub reference: Option<String>,
    /// `None` inherits the previous point's rotation
    pub rotation: Option<Angle>,
    /// Offset from the reference, in the reference's rotated frame
    pub offset: Offset,
    /// The offset as written
    pub written: [FtIn; 2],
}

impl ParsedCoordinate {
    /// Whether a label marks an outline point
    pub fn is_outline_label(label: &str) -> bool {
        label.chars().next().is_some_and(char::is_lowercase)
    }
}

/// Where a resolved point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// Written in the input file
    Surveyed,
    /// A boundary point moved onto its world wall
    WallProjection,
    /// A world corner inserted where the wall changes
    WorldCorner(Corner),
}

/// A point with its final, absolute position. Never changes once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub label: String,
    pub reference: String,
    pub rotation: Angle,
    pub offset: Offset,
    pub position: Position,
    pub draw: bool,
    pub outline: bool,
    pub wall: Option<Wall>,
    pub kind: PointKind,
    /// 1-based source row, for surveyed points read from a file
    pub line: Option<usize>,
}

impl Point {
    /// Projection of a boundary point onto its wall
    pub(crate) fn wall_projection(of: &Point, wall: Wall, position: Position) -> Point {
        Point {
            label: format!("{}_to_{}", of.label, wall),
            reference: ORIGIN_LABEL.to_string(),
            rotation: Angle::ZERO,
            offset: Offset::default(),
            position,
            draw: true,
            outline: true,
            wall: Some(wall),
            kind: PointKind::WallProjection,
            line: None,
        }
    }

    pub(crate) fn world_corner(corner: Corner, position: Position) -> Point {
        Point {
            label: corner.label().to_string(),
            reference: ORIGIN_LABEL.to_string(),
            rotation: Angle::ZERO,
            offset: Offset::default(),
            position,
            draw: true,
            outline: true,
            wall: None,
            kind: PointKind::WorldCorner(corner),
            line: None,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x.raw()
    }

    pub fn y(&self) -> f64 {
        self.position.y.raw()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<< {:<3} >> at {} wrt << {:<3} >> at a rotation of {}",
            self.label, self.position, self.reference, self.rotation
        )?;
        if let Some(wall) = self.wall {
            write!(f, " [{wall}]")?;
        }
        if !self.draw {
            f.write_str(" (hidden)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Millimeters;

    #[test]
    fn outline_labels_start_lowercase() {
        assert!(ParsedCoordinate::is_outline_label("a1"));
        assert!(!ParsedCoordinate::is_outline_label("A1"));
        assert!(!ParsedCoordinate::is_outline_label("1a"));
        assert!(!ParsedCoordinate::is_outline_label(""));
    }

    #[test]
    fn wall_projection_label_and_flags() {
        let surveyed = Point {
            label: "q".into(),
            reference: "p".into(),
            rotation: Angle(30.0),
            offset: Offset::default(),
            position: Position::mm(1.0, 2.0),
            draw: false,
            outline: false,
            wall: Some(Wall::North),
            kind: PointKind::Surveyed,
            line: Some(4),
        };
        let projected = Point::wall_projection(&surveyed, Wall::North, Position::mm(1.0, 50.0));
        assert_eq!(projected.label, "q_to_N");
        assert_eq!(projected.reference, ORIGIN_LABEL);
        assert!(projected.draw && projected.outline);
        assert_eq!(projected.wall, Some(Wall::North));
        assert_eq!(projected.kind, PointKind::WallProjection);
        assert_eq!(projected.position.y, Millimeters(50.0));
    }

    #[test]
    fn world_corner_has_no_wall() {
        let corner = Point::world_corner(Corner::SouthWest, Position::mm(-5.0, -5.0));
        assert_eq!(corner.label, "SWcorner");
        assert_eq!(corner.wall, None);
        assert_eq!(corner.kind, PointKind::WorldCorner(Corner::SouthWest));
    }
}
