//! SimpleConfig output: one geometry document per volume plus the master
//! index that includes them all.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::Settings;
use crate::coordinate::{Point, PointKind};
use crate::defaults::{BUILDING_MATERIAL, DIRT_MATERIAL};
use crate::resolve::Collection;
use crate::types::{Millimeters, Position};
use crate::world::Wall;

const EMACS_FOOTER: &str = "// Local Variables:\n// mode:c++\n// End:\n";

/// Which points of a collection become vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Every drawable point after the first
    Full,
    /// Drawable outline points after the first
    Outline,
}

impl Variant {
    pub(crate) fn admits(self, point: &Point) -> bool {
        point.draw && (self == Variant::Full || point.outline)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub label: String,
    pub position: Position,
}

/// The geometry document of one extruded volume, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    pub volume_name: String,
    /// `foundation.east` becomes `foundationEast`
    pub name: String,
    pub source: String,
    pub prefix: String,
    pub material: &'static str,
    pub include_path: String,
    pub offset_x: Millimeters,
    pub offset_z: Millimeters,
    /// Centre of the slab above the floor surface
    pub offset_y: Millimeters,
    pub half_thickness: Millimeters,
    pub vertices: Vec<Vertex>,
    /// Vertex indices whose x the geometry service replaces with the real
    /// world boundary
    pub x_replace: Vec<usize>,
    pub y_replace: Vec<usize>,
}

impl ConfigDocument {
    pub fn from_collection(collection: &Collection, variant: Variant, settings: &Settings) -> Self {
        let volume_name = collection.name().to_string();
        let name = camel_case_name(&volume_name);
        let dirt = collection.is_dirt();

        let mut vertices = Vec::new();
        let mut x_replace = Vec::new();
        let mut y_replace = Vec::new();

        for point in collection.points().iter().skip(1) {
            if !variant.admits(point) {
                continue;
            }
            let index = vertices.len();
            match (point.kind, point.wall) {
                (PointKind::WorldCorner(_), _) => {
                    x_replace.push(index);
                    y_replace.push(index);
                }
                (PointKind::WallProjection, Some(Wall::North | Wall::South)) => {
                    y_replace.push(index);
                }
                (PointKind::WallProjection, Some(Wall::East | Wall::West)) => {
                    x_replace.push(index);
                }
                _ => {}
            }
            vertices.push(Vertex {
                label: point.label.clone(),
                position: point.position,
            });
        }

        let height = collection.height();

        ConfigDocument {
            prefix: if dirt {
                volume_name.clone()
            } else {
                format!("building.{volume_name}")
            },
            material: if dirt { DIRT_MATERIAL } else { BUILDING_MATERIAL },
            include_path: format!("{}{}.txt", settings.include_prefix, name),
            source: collection.source().to_string(),
            offset_x: settings.origin_offset_x(),
            offset_z: settings.origin_offset_z(),
            offset_y: height.center(),
            half_thickness: height.half_thickness(),
            volume_name,
            name,
            vertices,
            x_replace,
            y_replace,
        }
    }

    /// File name of the document inside the output directory
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.name)
    }

    pub fn is_dirt(&self) -> bool {
        self.volume_name.contains("dirt.")
    }

    fn write_replace(&self, f: &mut fmt::Formatter<'_>, axis: char, indices: &[usize]) -> fmt::Result {
        if indices.is_empty() {
            return Ok(());
        }
        let list = indices
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "vector<int>    {}.{axis}replace   = {{ {list} }};", self.prefix)
    }

    fn write_positions(
        &self,
        f: &mut fmt::Formatter<'_>,
        axis: char,
        coord: impl Fn(&Position) -> Millimeters,
    ) -> fmt::Result {
        writeln!(f, "vector<double> {}.{axis}Positions = {{", self.prefix)?;
        let last = self.vertices.len().saturating_sub(1);
        for (i, vertex) in self.vertices.iter().enumerate() {
            let comma = if i == last { "" } else { "," };
            writeln!(f, "  {}{comma}   // {}", coord(&vertex.position), vertex.label)?;
        }
        writeln!(f, "}};")
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.prefix;
        writeln!(f, "// SimpleConfig geometry file automatically produced for original file:")?;
        writeln!(f, "//")?;
        writeln!(f, "//   {}", self.source)?;
        writeln!(f)?;
        writeln!(f, "string {p}.name     = \"{}\";", self.name)?;
        writeln!(f)?;
        writeln!(f, "string {p}.material = \"{}\";", self.material)?;
        writeln!(f)?;
        writeln!(f, "double {p}.offsetFromMu2eOrigin.x   = {};", self.offset_x)?;
        writeln!(f, "double {p}.offsetFromFloorSurface.y = {};", self.offset_y)?;
        writeln!(f, "double {p}.offsetFromMu2eOrigin.z   = {};", self.offset_z)?;
        writeln!(f)?;
        writeln!(f, "double {p}.yHalfThickness           = {};", self.half_thickness)?;
        writeln!(f)?;
        self.write_replace(f, 'x', &self.x_replace)?;
        self.write_positions(f, 'x', |pos| pos.x)?;
        writeln!(f)?;
        self.write_replace(f, 'y', &self.y_replace)?;
        self.write_positions(f, 'y', |pos| pos.y)?;
        writeln!(f)?;
        f.write_str(EMACS_FOOTER)
    }
}

/// Split on `.`, capitalize every token after the first, concatenate.
pub fn camel_case_name(volume_name: &str) -> String {
    volume_name
        .split('.')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            if i == 0 {
                return token.to_string();
            }
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Include lines and variable prefixes of one class of volume
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexBucket {
    pub files: BTreeSet<String>,
    pub prefixes: BTreeSet<String>,
}

impl IndexBucket {
    fn merge(&mut self, other: IndexBucket) {
        self.files.extend(other.files);
        self.prefixes.extend(other.prefixes);
    }
}

/// Every document produced in a run, split into buildings and dirt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateIndex {
    pub building: IndexBucket,
    pub dirt: IndexBucket,
}

impl AggregateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// File the document under dirt or building. Registering twice is a no-op.
    pub fn register(&mut self, document: &ConfigDocument) {
        let bucket = if document.is_dirt() {
            &mut self.dirt
        } else {
            &mut self.building
        };
        bucket.files.insert(document.include_path.clone());
        bucket.prefixes.insert(document.prefix.clone());
    }

    pub fn merge(&mut self, other: AggregateIndex) {
        self.building.merge(other.building);
        self.dirt.merge(other.dirt);
    }

    pub fn is_empty(&self) -> bool {
        self.building.files.is_empty() && self.dirt.files.is_empty()
    }

    pub fn document<'a>(&'a self, settings: &Settings) -> IndexDocument<'a> {
        IndexDocument {
            index: self,
            floor_surface_y: settings.floor_surface_y(),
        }
    }
}

/// The master index text
#[derive(Debug, Clone, Copy)]
pub struct IndexDocument<'a> {
    index: &'a AggregateIndex,
    floor_surface_y: Millimeters,
}

impl IndexDocument<'_> {
    fn write_bucket(f: &mut fmt::Formatter<'_>, list: &str, bucket: &IndexBucket) -> fmt::Result {
        for file in &bucket.files {
            writeln!(f, "#include \"{file}\"")?;
        }
        writeln!(f)?;
        writeln!(f, "vector<string> {list}.prefix.list = {{")?;
        let last = bucket.prefixes.len().saturating_sub(1);
        for (i, prefix) in bucket.prefixes.iter().enumerate() {
            let comma = if i == last { "" } else { "," };
            writeln!(f, "  \"{prefix}\"{comma}")?;
        }
        writeln!(f, "}};")?;
        writeln!(f)
    }
}

impl fmt::Display for IndexDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Automatically produced by footprint")?;
        writeln!(f)?;
        writeln!(f, "// This defines the vertical position of the hall air volume")?;
        writeln!(f, "double yOfFloorSurface.below.mu2eOrigin = {}; // mm", self.floor_surface_y)?;
        writeln!(f)?;
        Self::write_bucket(f, "bldg", &self.index.building)?;
        Self::write_bucket(f, "dirt", &self.index.dirt)?;
        f.write_str(EMACS_FOOTER)
    }
}
