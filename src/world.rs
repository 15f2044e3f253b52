//! The fixed rectangular world boundary and the walls points can be pinned to.

use std::fmt;

use crate::types::{Millimeters, Position};

/// One side of the world rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Wall {
    North,
    East,
    South,
    West,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::North, Wall::East, Wall::South, Wall::West];

    /// Parse the single-letter tag used inside `[...]`.
    pub fn from_tag(tag: &str) -> Option<Wall> {
        match tag {
            "N" => Some(Wall::North),
            "E" => Some(Wall::East),
            "S" => Some(Wall::South),
            "W" => Some(Wall::West),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Wall::North => 'N',
            Wall::East => 'E',
            Wall::South => 'S',
            Wall::West => 'W',
        }
    }

    /// The wall 180° away.
    pub fn opposite(self) -> Wall {
        match self {
            Wall::North => Wall::South,
            Wall::East => Wall::West,
            Wall::South => Wall::North,
            Wall::West => Wall::East,
        }
    }

    /// Two walls are congruent unless they face each other across the world.
    /// A single inferred edge can only join points on congruent walls.
    pub fn is_congruent_with(self, other: Wall) -> bool {
        other != self.opposite()
    }

    /// The world corner shared by two adjacent walls (order does not matter).
    pub fn corner_with(self, other: Wall) -> Option<Corner> {
        Corner::ALL
            .into_iter()
            .find(|corner| {
                let (a, b) = corner.walls();
                (a, b) == (self, other) || (b, a) == (self, other)
            })
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A corner of the world rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthEast,
    SouthWest,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::SouthEast,
        Corner::SouthWest,
    ];

    /// The two walls meeting at this corner
    pub fn walls(self) -> (Wall, Wall) {
        match self {
            Corner::NorthWest => (Wall::North, Wall::West),
            Corner::NorthEast => (Wall::North, Wall::East),
            Corner::SouthEast => (Wall::East, Wall::South),
            Corner::SouthWest => (Wall::South, Wall::West),
        }
    }

    /// Label given to synthesized corner vertices
    pub fn label(self) -> &'static str {
        match self {
            Corner::NorthWest => "NWcorner",
            Corner::NorthEast => "NEcorner",
            Corner::SouthEast => "SEcorner",
            Corner::SouthWest => "SWcorner",
        }
    }
}

/// Axis-aligned world rectangle. Built once per run, shared read-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRectangle {
    min: Position,
    max: Position,
}

impl WorldRectangle {
    /// Rectangle spanning two opposite corners, in any order.
    pub fn from_corners(a: Position, b: Position) -> Self {
        WorldRectangle {
            min: Position::mm(a.x.0.min(b.x.0), a.y.0.min(b.y.0)),
            max: Position::mm(a.x.0.max(b.x.0), a.y.0.max(b.y.0)),
        }
    }

    /// Rectangle centred on the origin
    pub fn from_half_extents(dx: Millimeters, dy: Millimeters) -> Self {
        Self::from_corners(Position::new(-dx, -dy), Position::new(dx, dy))
    }

    pub fn corner(&self, corner: Corner) -> Position {
        match corner {
            Corner::NorthWest => Position::new(self.min.x, self.max.y),
            Corner::NorthEast => self.max,
            Corner::SouthEast => Position::new(self.max.x, self.min.y),
            Corner::SouthWest => self.min,
        }
    }

    /// Move `p` onto `wall` by replacing the coordinate orthogonal to it.
    /// North and East read the NE corner, South and West the SW corner.
    pub fn project(&self, p: Position, wall: Wall) -> Position {
        let ne = self.corner(Corner::NorthEast);
        let sw = self.corner(Corner::SouthWest);
        match wall {
            Wall::North => p.with_y(ne.y),
            Wall::East => p.with_x(ne.x),
            Wall::South => p.with_y(sw.y),
            Wall::West => p.with_x(sw.x),
        }
    }
}
