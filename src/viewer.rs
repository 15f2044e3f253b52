//! What an external viewer needs to draw a run: the world box and every
//! extruded polygon, in mm.

use crate::emit::Variant;
use crate::resolve::Collection;
use crate::types::{HeightRange, Position};
use crate::world::WorldRectangle;

/// Drawing class of a volume, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeClass {
    /// Foundations and trenches
    Foundation,
    Floor,
    Dirt,
    Building,
}

impl VolumeClass {
    pub fn from_name(name: &str) -> Self {
        if name.contains("dirt.") {
            VolumeClass::Dirt
        } else if name.contains("oundation") || name.contains("rench") {
            VolumeClass::Foundation
        } else if name.contains("floor.") {
            VolumeClass::Floor
        } else {
            VolumeClass::Building
        }
    }
}

/// A polygon extruded between two heights
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudedVolume {
    pub name: String,
    pub class: VolumeClass,
    pub vertices: Vec<Position>,
    pub height: HeightRange,
}

impl ExtrudedVolume {
    /// Same vertex selection as the config document of `variant`.
    pub fn from_collection(collection: &Collection, variant: Variant) -> Self {
        ExtrudedVolume {
            name: collection.name().to_string(),
            class: VolumeClass::from_name(collection.name()),
            vertices: collection
                .points()
                .iter()
                .skip(1)
                .filter(|p| variant.admits(p))
                .map(|p| p.position)
                .collect(),
            height: collection.height(),
        }
    }
}

/// Everything produced by one run, ready to hand to a viewer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub world: WorldRectangle,
    pub volumes: Vec<ExtrudedVolume>,
}

impl RenderRequest {
    pub fn new(world: WorldRectangle) -> Self {
        RenderRequest {
            world,
            volumes: Vec::new(),
        }
    }

    pub fn push(&mut self, volume: ExtrudedVolume) {
        self.volumes.push(volume);
    }

    pub fn of_class(&self, class: VolumeClass) -> impl Iterator<Item = &ExtrudedVolume> + '_ {
        self.volumes.iter().filter(move |v| v.class == class)
    }
}
