//! Close an open outline against the world rectangle.
//!
//! A footprint that only traces part of a building marks its open ends with
//! wall tags. Each tagged point is projected onto its wall, and where two
//! consecutive tagged points sit on different walls the world corner between
//! them is inserted, so the outline plus the appended chain forms a closed
//! polygon.

use crate::coordinate::Point;
use crate::errors::CongruencyError;
use crate::log::{debug, info};
use crate::resolve::Collection;
use crate::world::{Wall, WorldRectangle};

impl Collection {
    /// Append wall projections and world corners for the boundary points.
    ///
    /// Returns `Ok(false)` without touching the collection when fewer than
    /// two points carry a wall tag, or when it is already closed. A closed
    /// collection accepts no further points.
    pub fn close_boundary(&mut self, world: &WorldRectangle) -> Result<bool, CongruencyError> {
        if self.closed {
            debug!(volume = %self.name(), "outline already closed");
            return Ok(false);
        }
        if self.boundary.len() < 2 {
            info!(volume = %self.name(), "not enough boundary points present");
            return Ok(false);
        }

        let tagged: Vec<(&Point, Wall)> = self
            .boundary
            .iter()
            .filter_map(|&i| {
                let point = &self.points[i];
                point.wall.map(|wall| (point, wall))
            })
            .collect();

        for pair in tagged.windows(2) {
            let (first, first_wall) = pair[0];
            let (second, second_wall) = pair[1];
            if !first_wall.is_congruent_with(second_wall) {
                return Err(CongruencyError {
                    first: first.label.clone(),
                    first_wall,
                    second: second.label.clone(),
                    second_wall,
                });
            }
        }

        let mut chain: Vec<Point> = tagged
            .iter()
            .rev()
            .map(|&(point, wall)| {
                Point::wall_projection(point, wall, world.project(point.position, wall))
            })
            .collect();

        // Walk the tagged points backwards; `later` is the one written after
        // `earlier`. A wall that turns back (N, E, N) gets its corner twice,
        // each copy placed before the first projection onto that wall.
        for pair in tagged.windows(2).rev() {
            let (_, earlier) = pair[0];
            let (_, later) = pair[1];
            let Some(corner) = later.corner_with(earlier) else {
                continue;
            };
            let at = chain
                .iter()
                .position(|p| p.wall == Some(earlier))
                .unwrap_or(chain.len());
            chain.insert(at, Point::world_corner(corner, world.corner(corner)));
        }

        debug!(
            volume = %self.name(),
            added = chain.len(),
            "closed outline against world boundary"
        );

        self.seal(chain);
        Ok(true)
    }
}
