//! Grid ray casting: a DDA walk per screen column over a tile map, and the
//! projection from wall distance to a vertical screen span.

pub mod caster;
pub mod map;
pub mod pose;
pub mod projection;
pub mod ray;

pub use caster::{Columns, RayCast, RayCaster, FOV};
pub use map::{Cell, GridMap, BLOCK};
pub use pose::{Pose, MOVE_STEP, TURN_STEP};
pub use projection::{Projection, Span, WALL_SCALE};
pub use ray::{Hit, Ray, Side};
