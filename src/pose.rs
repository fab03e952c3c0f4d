use crate::map::{Cell, GridMap};
use glam::Vec2;

/// world units per forward/back key press
pub const MOVE_STEP: f32 = 5.;
/// degrees per turn key press
pub const TURN_STEP: f32 = 5.;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Pose {
    pub pos: Vec2,
    /// degrees in `[0, 360)`, clockwise from +x
    pub angle: f32,
}

impl Pose {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle: angle.rem_euclid(360.),
        }
    }

    /// unit vector the camera faces
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle.to_radians())
    }

    pub fn turn(&mut self, degrees: f32) {
        self.angle = (self.angle + degrees).rem_euclid(360.);
    }

    /// Move along the facing direction, or backwards for a negative amount.
    ///
    /// Each axis is tried on its own so the camera slides along walls. A
    /// component is dropped when it would enter a wall or leave the map. A
    /// camera standing inside a wall may still move within that cell or out
    /// into an open one.
    pub fn advance(&mut self, map: &GridMap, amount: f32) {
        let step = self.direction() * amount;

        if self.can_enter(map, self.pos + Vec2::new(step.x, 0.)) {
            self.pos.x += step.x;
        }
        if self.can_enter(map, self.pos + Vec2::new(0., step.y)) {
            self.pos.y += step.y;
        }
    }

    fn can_enter(&self, map: &GridMap, target: Vec2) -> bool {
        let from = map.cell_of(self.pos);
        let to = map.cell_of(target);

        match map.cell_at(to.0, to.1) {
            Some(Cell::Open) => true,
            // already stuck in a wall, let it walk out
            Some(Cell::Wall) => from == to,
            None => false,
        }
    }
}
