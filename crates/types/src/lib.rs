//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, terminal host, tests).
//!
//! # Grid Dimensions
//!
//! The playfield is a 12x22 grid whose outer ring is a permanent wall:
//!
//! - **Width**: 12 columns (indexed 0-11, walls at 0 and 11)
//! - **Height**: 22 rows (indexed 0-21, walls at 0 and 21, `y` grows downward)
//! - **Interior**: columns 1-10, rows 1-20
//! - **Spawn anchor**: column 5, row taken from the shape's spawn offset
//!
//! # Pacing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_THROTTLE` | 6 | Raw engine ticks per active tick |
//! | `INITIAL_SPEED` | 6 | Active ticks between forced drops at session start |
//! | `SPEED_STEP_PIECES` | 15 | Spawns per speed increase |
//! | `MIN_SPEED` | 1 | Floor of the speed curve |
//!
//! # Examples
//!
//! ```
//! use crate_tetris_types::{Command, ShapeKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let shape = ShapeKind::from_str("t").unwrap();
//! assert_eq!(shape, ShapeKind::T);
//!
//! let command = Command::from_str("hardDrop").unwrap();
//! assert_eq!(command, Command::HardDrop);
//!
//! assert_eq!(GRID_WIDTH, 12);
//! assert_eq!(GRID_HEIGHT, 22);
//! ```

/// Grid width in cells, walls included (12 columns)
pub const GRID_WIDTH: i8 = 12;

/// Grid height in cells, walls included (22 rows)
pub const GRID_HEIGHT: i8 = 22;

/// Number of cells in the grid
pub const GRID_CELLS: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// First and last interior column
pub const INTERIOR_LEFT: i8 = 1;
pub const INTERIOR_RIGHT: i8 = GRID_WIDTH - 2;

/// First and last interior row
pub const INTERIOR_TOP: i8 = 1;
pub const INTERIOR_BOTTOM: i8 = GRID_HEIGHT - 2;

/// Number of interior rows (the most rows a single sweep can clear)
pub const INTERIOR_ROWS: usize = (INTERIOR_BOTTOM - INTERIOR_TOP + 1) as usize;

/// Column of the anchor for every freshly spawned piece
pub const SPAWN_COLUMN: i8 = 5;

/// Raw engine ticks per active tick
pub const TICK_THROTTLE: u32 = 6;

/// Active ticks between forced drops at session start
pub const INITIAL_SPEED: u32 = 6;

/// Spawned pieces per speed-curve step
pub const SPEED_STEP_PIECES: u32 = 15;

/// Lowest possible interval between forced drops
pub const MIN_SPEED: u32 = 1;

/// Width of the zero-padded score text
pub const SCORE_DIGITS: usize = 8;

/// Fixed raw tick interval used by the terminal host (~60 FPS)
pub const RAW_TICK_MS: u32 = 16;

/// Seconds before the first clear effect of a sweep fires
pub const CLEAR_EFFECT_BASE_DELAY_SECS: f32 = 0.1;

/// Extra seconds added per cell already cleared in the same sweep
pub const CLEAR_EFFECT_STEP_SECS: f32 = 1.0 / 32.0;

/// Line clear scoring table
///
/// Points for clearing N rows with a single lock:
/// - 0 rows: 0 points
/// - 1 row: 40 points
/// - 2 rows: 100 points
/// - 3 rows: 300 points
/// - 4 rows: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Tile id of every wall cell
pub const WALL_ID: TileId = 0;

/// Tile id of a single block. Pieces own four consecutive ids.
pub type TileId = u32;

/// The seven tetromino shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All kinds, in picker order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use crate_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::T => "T",
            ShapeKind::Z => "Z",
        }
    }

    /// Display color of falling and locked tiles of this kind
    pub fn color(&self) -> TileColor {
        match self {
            ShapeKind::I => TileColor::Red,
            ShapeKind::J => TileColor::Green,
            ShapeKind::L => TileColor::Blue,
            ShapeKind::O => TileColor::Orange,
            ShapeKind::S => TileColor::Pink,
            ShapeKind::T => TileColor::Purple,
            ShapeKind::Z => TileColor::Yellow,
        }
    }
}

/// Palette shared by the rules engine and its presentation sinks
///
/// Walls are always `Grey`; every shape kind has its own color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileColor {
    Red,
    Green,
    Blue,
    Orange,
    Pink,
    Purple,
    Yellow,
    Grey,
}

impl TileColor {
    /// 24-bit RGB triple for hosts that need concrete colors
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            TileColor::Red => (255, 0, 0),
            TileColor::Green => (0, 255, 0),
            TileColor::Blue => (0, 0, 255),
            TileColor::Orange => (255, 165, 0),
            TileColor::Pink => (255, 105, 180),
            TileColor::Purple => (160, 32, 240),
            TileColor::Yellow => (255, 255, 0),
            TileColor::Grey => (128, 128, 128),
        }
    }
}

/// Content of a single grid cell
///
/// - `Empty`: free cell
/// - `Wall`: permanent border (tile id 0), never cleared
/// - `Tile(id)`: one block of a falling or locked piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Wall,
    Tile(TileId),
}

impl Occupant {
    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    /// Tile id of a piece block, `None` for empty cells and walls
    pub fn tile_id(&self) -> Option<TileId> {
        match self {
            Occupant::Tile(id) => Some(*id),
            _ => None,
        }
    }
}

/// Grid coordinate: `x` is the column (left to right), `y` the row (top to bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i8,
    pub y: i8,
}

impl Cell {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Whether the coordinate lies inside the 12x22 grid (walls included)
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < GRID_WIDTH && self.y >= 0 && self.y < GRID_HEIGHT
    }

    /// Whether the coordinate lies on the permanent wall ring
    pub fn is_border(&self) -> bool {
        self.x == 0 || self.x == GRID_WIDTH - 1 || self.y == 0 || self.y == GRID_HEIGHT - 1
    }

    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Direction of a single-step shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Anchor delta applied by a shift in this direction
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Player commands accepted into the single-slot mailbox
///
/// An empty mailbox is represented as `Option::<Command>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Shift the piece one column left
    MoveLeft,
    /// Shift the piece one column right
    MoveRight,
    /// Drop the piece to its lowest legal row and lock it
    HardDrop,
    /// Advance to the next rotation variant
    Rotate,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::HardDrop,
        Command::Rotate,
    ];

    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use crate_tetris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(Command::MoveLeft),
            "moveright" | "right" => Some(Command::MoveRight),
            "harddrop" | "down" => Some(Command::HardDrop),
            "rotate" | "up" => Some(Command::Rotate),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::HardDrop => "hardDrop",
            Command::Rotate => "rotate",
        }
    }
}
