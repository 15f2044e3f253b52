//! Default world and output settings (all lengths in millimetres)

use crate::types::Millimeters;

/// Half width of the world rectangle, east-west
pub const WORLD_HALF_EXTENT_X: Millimeters = Millimeters(50_000.0);
/// Half depth of the world rectangle, north-south
pub const WORLD_HALF_EXTENT_Y: Millimeters = Millimeters(50_000.0);

pub const ORIGIN_OFFSET_X: Millimeters = Millimeters(-3581.4);
pub const ORIGIN_OFFSET_Z: Millimeters = Millimeters(947.4);

/// Floor surface below the experiment origin, -(728.58684' - 721')
pub const FLOOR_SURFACE_Y: Millimeters = Millimeters(-2312.0);

pub const INCLUDE_PREFIX: &str = "Mu2eG4/geom/bldg/";
pub const INDEX_FILE_NAME: &str = "mu2eBuilding.txt";

pub const BUILDING_MATERIAL: &str = "CONCRETE_MARS";
pub const DIRT_MATERIAL: &str = "MBOverburden";
