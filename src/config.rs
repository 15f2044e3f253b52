//! Run settings, loadable from TOML.
//!
//! ```toml
//! world_half_extent_x = 50000.0
//! world_half_extent_y = 50000.0
//! include_prefix = "Mu2eG4/geom/bldg/"
//! ```
//!
//! Every field is optional; missing fields keep their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::defaults;
use crate::errors::SettingsError;
use crate::types::Millimeters;
use crate::world::WorldRectangle;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub world_half_extent_x: f64,
    pub world_half_extent_y: f64,
    /// x offset of every volume from the experiment origin
    pub origin_offset_x: f64,
    /// z offset of every volume from the experiment origin
    pub origin_offset_z: f64,
    /// Written to the master index as `yOfFloorSurface.below.mu2eOrigin`
    pub floor_surface_y: f64,
    /// Directory prefix of `#include` lines in the master index
    pub include_prefix: String,
    pub index_file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_half_extent_x: defaults::WORLD_HALF_EXTENT_X.raw(),
            world_half_extent_y: defaults::WORLD_HALF_EXTENT_Y.raw(),
            origin_offset_x: defaults::ORIGIN_OFFSET_X.raw(),
            origin_offset_z: defaults::ORIGIN_OFFSET_Z.raw(),
            floor_surface_y: defaults::FLOOR_SURFACE_Y.raw(),
            include_prefix: defaults::INCLUDE_PREFIX.to_string(),
            index_file_name: defaults::INDEX_FILE_NAME.to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(text)?;
        settings.world()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|cause| SettingsError::Io {
            path: path.display().to_string(),
            cause,
        })?;
        Self::from_toml_str(&text)
    }

    /// The world rectangle described by the half extents.
    pub fn world(&self) -> Result<WorldRectangle, SettingsError> {
        let x = Millimeters(self.world_half_extent_x);
        let y = Millimeters(self.world_half_extent_y);
        let usable = |half: Millimeters| half.is_finite() && half > Millimeters::ZERO;
        if !(usable(x) && usable(y)) {
            return Err(SettingsError::WorldExtent { x: x.raw(), y: y.raw() });
        }
        Ok(WorldRectangle::from_half_extents(x, y))
    }

    pub fn origin_offset_x(&self) -> Millimeters {
        Millimeters(self.origin_offset_x)
    }

    pub fn origin_offset_z(&self) -> Millimeters {
        Millimeters(self.origin_offset_z)
    }

    pub fn floor_surface_y(&self) -> Millimeters {
        Millimeters(self.floor_surface_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use crate::world::Corner;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn default_world_is_fifty_metres_each_way() {
        let world = Settings::default().world().unwrap();
        assert_eq!(world.corner(Corner::NorthEast), Position::mm(50000.0, 50000.0));
        assert_eq!(world.corner(Corner::SouthWest), Position::mm(-50000.0, -50000.0));
    }

    #[test]
    fn partial_override() {
        let s = Settings::from_toml_str("world_half_extent_x = 1000.0\ninclude_prefix = \"geom/\"").unwrap();
        assert_eq!(s.world_half_extent_x, 1000.0);
        assert_eq!(s.world_half_extent_y, 50000.0);
        assert_eq!(s.include_prefix, "geom/");
        assert_eq!(s.index_file_name, "mu2eBuilding.txt");
    }

    #[test]
    fn non_positive_extent_fails() {
        assert!(matches!(
            Settings::from_toml_str("world_half_extent_y = 0.0"),
            Err(SettingsError::WorldExtent { .. })
        ));
    }

    #[test]
    fn non_finite_extent_fails() {
        for text in ["world_half_extent_x = inf", "world_half_extent_y = nan"] {
            assert!(
                matches!(Settings::from_toml_str(text), Err(SettingsError::WorldExtent { .. })),
                "{text}"
            );
        }
    }

    #[test]
    fn unknown_key_fails() {
        assert!(matches!(
            Settings::from_toml_str("world_size = 3"),
            Err(SettingsError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_fails() {
        assert!(matches!(
            Settings::load("/nonexistent/footprint.toml"),
            Err(SettingsError::Io { .. })
        ));
    }
}
