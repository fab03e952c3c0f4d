use crate::{StringToAnyhow, HEIGHT, WIDTH};
use raycast::{Cell, GridMap, Pose, Projection, RayCast, RayCaster, FOV, MOVE_STEP, TURN_STEP};
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum GameState {
    Playing,
    Minimap,
    Paused,
}

// minimap cell edge in pixels
const MINIMAP_TILE: i32 = 16;

pub(crate) struct Game {
    map: GridMap,
    pose: Pose,
    pub game_state: GameState,
    caster: RayCaster,
    projection: Projection,
    slices: Vec<RayCast>,
    pub canvas: Canvas<Window>,
    pub update: bool,
}

impl Game {
    /// initialize game
    pub fn new(canvas: Canvas<Window>, map: GridMap, pose: Pose) -> anyhow::Result<Self> {
        let caster = RayCaster::new(FOV, WIDTH)?;
        let projection = Projection::new(HEIGHT as u32).with_unit(map.block);

        Ok(Self {
            map,
            pose,
            game_state: GameState::Playing,
            caster,
            projection,
            slices: Vec::with_capacity(WIDTH),
            canvas,
            update: true,
        })
    }

    /// handle key presses for while in "playing" state
    pub fn playing_key_once(&mut self, key: Keycode) {
        match key {
            // minimap toggle
            Keycode::M => {
                if self.game_state == GameState::Minimap {
                    self.game_state = GameState::Playing
                } else {
                    self.game_state = GameState::Minimap;
                }
            }
            // pause game
            Keycode::Escape => self.game_state = GameState::Paused,
            _ => {}
        }
    }

    /// handle key repeating for while in "playing" state
    pub fn playing_key(&mut self, key: Keycode) {
        match key {
            Keycode::W | Keycode::Z | Keycode::Up => self.pose.advance(&self.map, MOVE_STEP),
            Keycode::S | Keycode::Down => self.pose.advance(&self.map, -MOVE_STEP),
            Keycode::Q | Keycode::Left => self.pose.turn(-TURN_STEP),
            Keycode::D | Keycode::Right => self.pose.turn(TURN_STEP),
            _ => {}
        }
    }

    // draw while in "playing" state
    pub fn playing_draw(&mut self) -> anyhow::Result<()> {
        self.slices.clear();
        self.slices.extend(self.caster.cast(&self.map, self.pose));
        log::trace!(
            "cast {} columns from {} at {}°",
            self.slices.len(),
            self.pose.pos,
            self.pose.angle
        );

        self.canvas.set_draw_color(Color::BLACK);
        self.canvas.clear();

        // DRAW WALLS
        self.canvas.set_draw_color(Color::WHITE);
        for slice in self.slices.iter() {
            let Some(span) = self.projection.span(slice.distance) else {
                continue;
            };
            let x = slice.column as i32;
            self.canvas
                .draw_line(Point::new(x, span.top), Point::new(x, span.bottom))
                .ah()?;
        }

        // DRAW MINIMAP
        if self.game_state == GameState::Minimap {
            self.minimap_draw()?;
        }

        Ok(())
    }

    fn minimap_draw(&mut self) -> anyhow::Result<()> {
        self.canvas.set_blend_mode(BlendMode::Blend);
        self.canvas.set_draw_color(Color::RGBA(0, 0, 0, 0x77));
        self.canvas.fill_rect(None).ah()?;
        self.canvas.set_blend_mode(BlendMode::None);

        let offset = Point::new(WIDTH as i32 / 2, HEIGHT as i32 / 2)
            - Point::new(
                (self.map.width as i32 * MINIMAP_TILE) / 2,
                (self.map.height as i32 * MINIMAP_TILE) / 2,
            );
        let scale = MINIMAP_TILE as f32 / self.map.block;
        let to_screen =
            |x: f32, y: f32| Point::new((x * scale) as i32, (y * scale) as i32) + offset;

        self.canvas.set_draw_color(Color::RGB(0, 0xDD, 0));
        for (col, row, cell) in self.map.cells() {
            if cell == Cell::Wall {
                self.canvas
                    .fill_rect(Rect::new(
                        col * MINIMAP_TILE + offset.x(),
                        row * MINIMAP_TILE + offset.y(),
                        MINIMAP_TILE as u32,
                        MINIMAP_TILE as u32,
                    ))
                    .ah()?;
            }
        }

        let eye = to_screen(self.pose.pos.x, self.pose.pos.y);
        self.canvas.set_draw_color(Color::GREEN);
        for hit in self.slices.iter().filter_map(|slice| slice.hit) {
            self.canvas
                .draw_line(eye, to_screen(hit.point.x, hit.point.y))
                .ah()?;
        }

        // the camera itself
        self.canvas.set_draw_color(Color::RED);
        self.canvas.fill_rect(Rect::from_center(eye, 4, 4)).ah()?;

        Ok(())
    }

    // draw pause screen
    pub fn pause_draw(&mut self) -> anyhow::Result<()> {
        self.canvas.set_blend_mode(BlendMode::Blend);
        self.canvas.set_draw_color(Color::RGBA(0, 0, 0, 0xDD));
        self.canvas.fill_rect(None).ah()?;
        self.canvas.set_blend_mode(BlendMode::None);

        Ok(())
    }
}
