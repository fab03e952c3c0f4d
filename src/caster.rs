use crate::map::GridMap;
use crate::pose::Pose;
use crate::ray::{Hit, Ray, Side};
use std::ops::Range;

pub const FOV: f32 = 60.;

/// One screen column's result.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RayCast {
    pub column: usize,
    /// absolute angle of the ray, degrees
    pub angle: f32,
    /// distance to the wall perpendicular to the camera plane, or infinity
    pub distance: f32,
    pub hit: Option<Hit>,
}

impl RayCast {
    pub fn side(&self) -> Option<Side> {
        self.hit.map(|hit| hit.side)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RayCaster {
    pub fov: f32,
    pub screen_width: usize,
}

impl RayCaster {
    pub fn new(fov: f32, screen_width: usize) -> anyhow::Result<Self> {
        if screen_width == 0 {
            anyhow::bail!("screen width must be non-zero");
        }
        if !(fov > 0. && fov < 180.) {
            anyhow::bail!("field of view must be between 0 and 180 degrees, got {fov}");
        }

        Ok(Self { fov, screen_width })
    }

    /// angle of the ray through `column`, fanned out around the facing angle
    pub fn column_angle(&self, pose: &Pose, column: usize) -> f32 {
        let offset = column as f32 - (self.screen_width / 2) as f32;
        pose.angle + offset * (self.fov / self.screen_width as f32)
    }

    pub fn cast_column(&self, map: &GridMap, pose: &Pose, column: usize) -> RayCast {
        let angle = self.column_angle(pose, column);
        let hit = Ray::new(pose.pos, angle).cast(map);

        // project onto the facing direction so flat walls stay flat
        let distance = hit.map_or(f32::INFINITY, |hit| {
            hit.length * (angle - pose.angle).to_radians().cos()
        });

        RayCast {
            column,
            angle,
            distance,
            hit,
        }
    }

    /// Cast every column, left to right.
    pub fn cast<'map>(&self, map: &'map GridMap, pose: Pose) -> Columns<'map> {
        Columns {
            caster: *self,
            map,
            pose,
            columns: 0..self.screen_width,
        }
    }
}

/// Lazy iterator over the columns of one frame.
#[derive(Clone)]
pub struct Columns<'map> {
    caster: RayCaster,
    map: &'map GridMap,
    pose: Pose,
    columns: Range<usize>,
}

impl Iterator for Columns<'_> {
    type Item = RayCast;

    fn next(&mut self) -> Option<RayCast> {
        let column = self.columns.next()?;
        Some(self.caster.cast_column(self.map, &self.pose, column))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.columns.size_hint()
    }
}

impl DoubleEndedIterator for Columns<'_> {
    fn next_back(&mut self) -> Option<RayCast> {
        let column = self.columns.next_back()?;
        Some(self.caster.cast_column(self.map, &self.pose, column))
    }
}

impl ExactSizeIterator for Columns<'_> {}
