use anyhow::Context;
use glam::Vec2;
use std::fs::read_to_string;
use std::path::Path;

/// world units per cell edge
pub const BLOCK: f32 = 24.;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Open,
    Wall,
}

/// Rectangular grid of cells, stored row-major.
#[derive(Clone, PartialEq, Debug)]
pub struct GridMap {
    pub width: usize,
    pub height: usize,
    pub block: f32,
    cells: Vec<Cell>,
    spawn: Option<(usize, usize)>,
}

impl GridMap {
    pub fn new(width: usize, height: usize, block: f32, cells: Vec<Cell>) -> anyhow::Result<Self> {
        if width == 0 || height == 0 {
            anyhow::bail!("map must have at least one cell, got {width}x{height}");
        }
        if cells.len() != width * height {
            anyhow::bail!(
                "map is {width}x{height} but {} cells were given",
                cells.len()
            );
        }
        if !(block > 0.) || !block.is_finite() {
            anyhow::bail!("block size must be positive, got {block}");
        }

        let this = Self {
            width,
            height,
            block,
            cells,
            spawn: None,
        };
        if !this.is_closed() {
            log::warn!("map border is not fully walled; rays may leave the grid");
        }

        Ok(this)
    }

    /// The 10 column by 8 row closed box.
    pub fn reference() -> Self {
        const ROWS: [[u8; 10]; 8] = [
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 1, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 1, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ];

        Self {
            width: 10,
            height: 8,
            block: BLOCK,
            cells: ROWS
                .iter()
                .flatten()
                .map(|&c| if c == 1 { Cell::Wall } else { Cell::Open })
                .collect(),
            spawn: None,
        }
    }

    pub fn load(path: impl AsRef<Path>, block: f32) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("loading map at {}", path.display());
        let file =
            read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
        Self::parse(&file, block).with_context(|| format!("invalid map {}", path.display()))
    }

    /// Parse the text map format: `#` is a wall, `.` or ` ` is open and `*`
    /// is the open spawn cell.
    pub fn parse(text: &str, block: f32) -> anyhow::Result<Self> {
        let lines = text
            .trim_end_matches(['\n', '\r'])
            .lines()
            .collect::<Vec<_>>();

        let width = lines.first().map_or(0, |line| line.chars().count());
        let mut cells = Vec::with_capacity(width * lines.len());
        let mut spawn = None;

        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != width {
                anyhow::bail!("row {row} has {len} cells, expected {width}");
            }

            for (col, tile) in line.chars().enumerate() {
                cells.push(match tile {
                    '#' => Cell::Wall,
                    '.' | ' ' => Cell::Open,
                    '*' => {
                        if spawn.replace((col, row)).is_some() {
                            anyhow::bail!("second spawn at column {col}, row {row}");
                        }
                        Cell::Open
                    }
                    other => anyhow::bail!("invalid tile {other:?} at column {col}, row {row}"),
                });
            }
        }
        log::debug!("parsed {width}x{} map", lines.len());

        let mut this = Self::new(width, lines.len(), block, cells)?;
        this.spawn = spawn;
        Ok(this)
    }

    /// Bounds-checked cell lookup.
    pub fn cell_at(&self, col: i32, row: i32) -> Option<Cell> {
        let col = usize::try_from(col).ok().filter(|&c| c < self.width)?;
        let row = usize::try_from(row).ok().filter(|&r| r < self.height)?;
        self.cells.get(row * self.width + col).copied()
    }

    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        self.cell_at(col, row) == Some(Cell::Wall)
    }

    /// Whether every border cell is a wall.
    pub fn is_closed(&self) -> bool {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w).all(|col| self.is_wall(col, 0) && self.is_wall(col, h - 1))
            && (0..h).all(|row| self.is_wall(0, row) && self.is_wall(w - 1, row))
    }

    /// Upper bound on the grid lines a straight ray can cross inside the map.
    pub fn max_steps(&self) -> usize {
        self.width + self.height
    }

    pub fn cell_of(&self, pos: Vec2) -> (i32, i32) {
        let cell = (pos / self.block).floor();
        (cell.x as i32, cell.y as i32)
    }

    pub fn cell_center(&self, col: i32, row: i32) -> Vec2 {
        (Vec2::new(col as f32, row as f32) + 0.5) * self.block
    }

    pub fn spawn(&self) -> Option<Vec2> {
        let (col, row) = self.spawn?;
        Some(self.cell_center(col as i32, row as i32))
    }

    /// Center of the first open cell in row-major order.
    pub fn first_open(&self) -> Option<Vec2> {
        let (col, row, _) = self.cells().find(|&(_, _, cell)| cell == Cell::Open)?;
        Some(self.cell_center(col, row))
    }

    /// Iterate over `(col, row, cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(idx, &cell)| {
            (
                (idx % self.width) as i32,
                (idx / self.width) as i32,
                cell,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_map_is_closed() {
        let map = GridMap::reference();
        assert_eq!((map.width, map.height), (10, 8));
        assert!(map.is_closed());
        assert_eq!(map.cell_at(2, 2), Some(Cell::Wall));
        assert_eq!(map.cell_at(3, 2), Some(Cell::Open));
        assert_eq!(map.cell_at(8, 5), Some(Cell::Wall));
    }

    #[test]
    fn out_of_bounds_is_none() {
        let map = GridMap::reference();
        assert_eq!(map.cell_at(-1, 0), None);
        assert_eq!(map.cell_at(0, -1), None);
        assert_eq!(map.cell_at(10, 0), None);
        assert_eq!(map.cell_at(0, 8), None);
        assert!(!map.is_wall(100, 100));
    }

    #[test]
    fn parse_with_spawn() {
        let map = GridMap::parse("#####\n#*..#\n#####\n", 10.).unwrap();
        assert_eq!((map.width, map.height), (5, 3));
        assert!(map.is_closed());
        assert_eq!(map.cell_at(1, 1), Some(Cell::Open));
        assert_eq!(map.spawn(), Some(Vec2::new(15., 15.)));
    }

    #[test]
    fn first_open_cell() {
        assert_eq!(GridMap::reference().first_open(), Some(Vec2::new(36., 36.)));
        let map = GridMap::parse("####\n##.#\n####", 10.).unwrap();
        assert_eq!(map.first_open(), Some(Vec2::new(25., 15.)));
        assert_eq!(GridMap::parse("##\n##", 10.).unwrap().first_open(), None);
    }

    #[test]
    fn parse_open_border() {
        let map = GridMap::parse("###\n#..\n###", BLOCK).unwrap();
        assert!(!map.is_closed());
        assert_eq!(map.spawn(), None);
    }

    #[test]
    fn parse_errors() {
        assert!(GridMap::parse("###\n##\n###", BLOCK).is_err());
        assert!(GridMap::parse("###\n#x#\n###", BLOCK).is_err());
        assert!(GridMap::parse("####\n#**#\n####", BLOCK).is_err());
        assert!(GridMap::parse("", BLOCK).is_err());
        assert!(GridMap::parse("#", 0.).is_err());
    }

    #[test]
    fn new_checks_cell_count() {
        assert!(GridMap::new(2, 2, BLOCK, vec![Cell::Wall; 3]).is_err());
        assert!(GridMap::new(2, 2, BLOCK, vec![Cell::Wall; 4]).is_ok());
    }

    #[test]
    fn cell_of_floors_negative_positions() {
        let map = GridMap::reference();
        assert_eq!(map.cell_of(Vec2::new(60., 60.)), (2, 2));
        assert_eq!(map.cell_of(Vec2::new(-1., 23.9)), (-1, 0));
        assert_eq!(map.cell_center(2, 2), Vec2::new(60., 60.));
    }
}
