use crate::map::{Cell, GridMap};
use glam::{IVec2, Vec2};

/// Which kind of grid line the ray crossed to reach the wall.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    /// a vertical line (constant x)
    X,
    /// a horizontal line (constant y)
    Y,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Hit {
    /// euclidean distance from the origin, in world units
    pub length: f32,
    pub side: Side,
    pub cell: IVec2,
    pub point: Vec2,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Ray {
    pub origin: Vec2,
    /// degrees, clockwise from +x
    pub angle: f32,
}

impl Ray {
    pub fn new(origin: Vec2, angle: f32) -> Self {
        Self { origin, angle }
    }

    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle.to_radians())
    }

    /// Walk the grid cell by cell until a wall is found.
    ///
    /// Returns `None` if the ray leaves the map or runs out of steps first.
    /// The cell holding the origin is never tested.
    pub fn cast(&self, map: &GridMap) -> Option<Hit> {
        let dir = self.direction();
        // work in cell units
        let pos = self.origin / map.block;
        let mut cell = pos.floor().as_ivec2();

        let delta = Vec2::new(delta_dist(dir.x), delta_dist(dir.y));
        let step = IVec2::new(
            if dir.x < 0. { -1 } else { 1 },
            if dir.y < 0. { -1 } else { 1 },
        );
        let mut side_dist = Vec2::new(
            if dir.x < 0. {
                (pos.x - cell.x as f32) * delta.x
            } else {
                (cell.x as f32 + 1. - pos.x) * delta.x
            },
            if dir.y < 0. {
                (pos.y - cell.y as f32) * delta.y
            } else {
                (cell.y as f32 + 1. - pos.y) * delta.y
            },
        );

        for _ in 0..map.max_steps() {
            let side = if side_dist.x < side_dist.y {
                side_dist.x += delta.x;
                cell.x += step.x;
                Side::X
            } else {
                side_dist.y += delta.y;
                cell.y += step.y;
                Side::Y
            };

            match map.cell_at(cell.x, cell.y) {
                Some(Cell::Open) => {}
                Some(Cell::Wall) => {
                    // distance along the ray to the crossed grid line
                    let t = match side {
                        Side::X => (cell.x as f32 - pos.x + (1 - step.x) as f32 / 2.) / dir.x,
                        Side::Y => (cell.y as f32 - pos.y + (1 - step.y) as f32 / 2.) / dir.y,
                    };
                    let length = t * map.block;

                    return Some(Hit {
                        length,
                        side,
                        cell,
                        point: self.origin + dir * length,
                    });
                }
                None => {
                    log::trace!("ray at {}° left the map at {cell}", self.angle);
                    return None;
                }
            }
        }

        log::trace!("ray at {}° ran out of steps", self.angle);
        None
    }
}

/// Distance along the ray between two grid lines of one axis, for a unit
/// direction whose component on that axis is `d`.
fn delta_dist(d: f32) -> f32 {
    if d == 0. {
        f32::INFINITY
    } else {
        (1. / d).abs()
    }
}
