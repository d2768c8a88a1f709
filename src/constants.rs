// --- File: constants.rs ---
use glam::Vec4;

// --- Grid ---
pub const GRID_WIDTH: usize = 200;
pub const GRID_HEIGHT: usize = 10;
pub const DEFAULT_SEED_DENSITY: f64 = 0.3;
pub const DENSITY_ADJUST_STEP: f64 = 0.05;
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 100;

// --- View ---
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 800;
pub const DEFAULT_CELL_SIZE: u32 = 20;
pub const MIN_CELL_SIZE: u32 = 5;
pub const MAX_CELL_SIZE: u32 = 50;
pub const CELL_SIZE_STEP: u32 = 2;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const FPS_UPDATE_INTERVAL_SECS: f64 = 1.0;

// --- Palette (linear RGBA) ---
pub const BACKGROUND_COLOR: Vec4 = Vec4::new(0.05, 0.05, 0.05, 1.0);
pub const CANVAS_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
pub const ALIVE_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
pub const FOOD_COLOR: Vec4 = Vec4::new(0.6, 0.98, 0.6, 1.0); // Pale green
pub const GRID_LINE_COLOR: Vec4 = Vec4::new(0.83, 0.83, 0.83, 1.0);

// --- End of File: constants.rs ---
