/// Default wall height multiplier.
pub const WALL_SCALE: u32 = 2;
/// Smallest distance used when projecting, so a camera flush against a wall
/// does not divide by zero.
pub const EPSILON: f32 = 1e-3;

/// Vertical run of pixels for one column, `top..=bottom`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Span {
    pub line_height: i32,
    pub top: i32,
    pub bottom: i32,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Projection {
    pub screen_height: u32,
    pub wall_scale: u32,
    /// distance that counts as one unit when projecting
    pub unit: f32,
}

impl Projection {
    pub fn new(screen_height: u32) -> Self {
        Self {
            screen_height,
            wall_scale: WALL_SCALE,
            unit: 1.,
        }
    }

    pub fn with_wall_scale(self, wall_scale: u32) -> Self {
        Self { wall_scale, ..self }
    }

    /// Ignored unless `unit` is positive and finite.
    pub fn with_unit(self, unit: f32) -> Self {
        if !(unit > 0. && unit.is_finite()) {
            log::warn!("ignoring projection unit {unit}, keeping {}", self.unit);
            return self;
        }
        Self { unit, ..self }
    }

    /// Height of the wall strip before clamping. Saturates instead of
    /// overflowing for tiny distances.
    pub fn line_height(&self, distance: f32) -> i32 {
        let distance = (distance / self.unit).max(EPSILON);
        let base = (self.screen_height as f32 / distance).floor() as i32;
        base.saturating_mul(i32::try_from(self.wall_scale).unwrap_or(i32::MAX))
    }

    /// `None` when there is nothing to draw (no hit or an empty screen).
    pub fn span(&self, distance: f32) -> Option<Span> {
        if !distance.is_finite() || self.screen_height == 0 {
            return None;
        }

        let height = self.screen_height as i32;
        let line_height = self.line_height(distance);
        let top = (height / 2)
            .saturating_sub(line_height / 2)
            .clamp(0, height - 1);
        let bottom = (height / 2)
            .saturating_add(line_height / 2)
            .clamp(0, height - 1);

        Some(Span {
            line_height,
            top,
            bottom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_height_distance() {
        let proj = Projection::new(480);
        assert_eq!(proj.line_height(240.), 4);
        assert_eq!(
            proj.span(240.),
            Some(Span {
                line_height: 4,
                top: 238,
                bottom: 242,
            })
        );
    }

    #[test]
    fn close_walls_are_clamped() {
        let proj = Projection::new(480);
        for distance in [0., 1e-9, 0.5, 1., 2.] {
            let span = proj.span(distance).unwrap();
            assert_eq!((span.top, span.bottom), (0, 479), "distance {distance}");
        }
        assert!(proj.line_height(0.) > 0);
    }

    #[test]
    fn spans_stay_on_screen() {
        let proj = Projection::new(480).with_wall_scale(3);
        let mut distance = 0.01;
        while distance < 10_000. {
            let span = proj.span(distance).unwrap();
            assert!(0 <= span.top && span.top <= span.bottom && span.bottom <= 479);
            distance *= 1.7;
        }
    }

    #[test]
    fn huge_wall_scale_saturates() {
        let proj = Projection::new(480).with_wall_scale(u32::MAX);
        assert_eq!(proj.line_height(1.), i32::MAX);
        assert_eq!(
            proj.span(1.),
            Some(Span {
                line_height: i32::MAX,
                top: 0,
                bottom: 479,
            })
        );

        let far = proj.span(1e9).unwrap();
        assert!(0 <= far.top && far.top <= far.bottom && far.bottom <= 479);
    }

    #[test]
    fn invalid_unit_is_ignored() {
        for unit in [0., -24., f32::NAN, f32::INFINITY] {
            let proj = Projection::new(480).with_unit(unit);
            assert_eq!(proj.unit, 1., "unit {unit}");
        }
        assert_eq!(Projection::new(480).with_unit(24.).with_unit(0.).unit, 24.);
    }

    #[test]
    fn no_hit_draws_nothing() {
        let proj = Projection::new(480);
        assert_eq!(proj.span(f32::INFINITY), None);
        assert_eq!(proj.span(f32::NAN), None);
        assert_eq!(Projection::new(0).span(10.), None);
    }

    #[test]
    fn unit_scales_distance() {
        let proj = Projection::new(480).with_unit(24.);
        // five cells away
        assert_eq!(proj.line_height(120.), 192);
        assert_eq!(proj.with_wall_scale(1).line_height(120.), 96);
    }
}
