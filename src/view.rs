use crate::constants::{CELL_SIZE_STEP, MAX_CELL_SIZE, MIN_CELL_SIZE};
use glam::Vec2;
use winit::dpi::PhysicalSize;

/// Maps between window pixels and grid cells. The grid canvas is centered in the window.
#[derive(Debug, Clone)]
pub struct Viewport {
    cell_size: u32,
    window_size: PhysicalSize<u32>,
    grid_width: usize,
    grid_height: usize,
}

impl Viewport {
    pub fn new(
        cell_size: u32,
        window_size: PhysicalSize<u32>,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        Self {
            cell_size: cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE),
            window_size,
            grid_width,
            grid_height,
        }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn window_size(&self) -> PhysicalSize<u32> {
        self.window_size
    }

    pub fn resize(&mut self, window_size: PhysicalSize<u32>) {
        self.window_size = window_size;
    }

    /// Grows or shrinks cells by one zoom step. Returns whether the size changed.
    pub fn zoom(&mut self, zoom_in: bool) -> bool {
        let new_size = if zoom_in {
            (self.cell_size + CELL_SIZE_STEP).min(MAX_CELL_SIZE)
        } else {
            self.cell_size.saturating_sub(CELL_SIZE_STEP).max(MIN_CELL_SIZE)
        };
        let changed = new_size != self.cell_size;
        self.cell_size = new_size;
        if changed {
            log::info!("Cell size: {}px", self.cell_size);
        }
        changed
    }

    /// Size of the drawn grid in pixels.
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(
            (self.grid_width as u32 * self.cell_size) as f32,
            (self.grid_height as u32 * self.cell_size) as f32,
        )
    }

    /// Top-left corner of the canvas in window pixels. Negative when the canvas overflows.
    pub fn canvas_origin(&self) -> Vec2 {
        let window = Vec2::new(self.window_size.width as f32, self.window_size.height as f32);
        ((window - self.canvas_size()) * 0.5).floor()
    }

    /// Grid cell under a window position, or `None` when outside the canvas.
    pub fn screen_to_cell(&self, position: Vec2) -> Option<(i32, i32)> {
        let local = (position - self.canvas_origin()) / self.cell_size as f32;
        let (x, y) = (local.x.floor(), local.y.floor());
        if x < 0.0 || y < 0.0 || x >= self.grid_width as f32 || y >= self.grid_height as f32 {
            return None;
        }
        Some((x as i32, y as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(20, PhysicalSize::new(800, 800), 200, 10)
    }

    #[test]
    fn test_canvas_origin_centered() {
        let vp = viewport();
        // 200 * 20 = 4000 px wide, overflowing an 800 px window.
        assert_eq!(vp.canvas_origin(), Vec2::new(-1600.0, 300.0));

        let vp = Viewport::new(10, PhysicalSize::new(100, 100), 4, 2);
        assert_eq!(vp.canvas_origin(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_screen_to_cell() {
        let vp = Viewport::new(10, PhysicalSize::new(100, 100), 4, 2);
        assert_eq!(vp.screen_to_cell(Vec2::new(30.0, 40.0)), Some((0, 0)));
        assert_eq!(vp.screen_to_cell(Vec2::new(69.9, 59.9)), Some((3, 1)));
        assert_eq!(vp.screen_to_cell(Vec2::new(29.5, 45.0)), None);
        assert_eq!(vp.screen_to_cell(Vec2::new(70.0, 45.0)), None);
        assert_eq!(vp.screen_to_cell(Vec2::new(35.0, 60.0)), None);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut vp = viewport();
        for _ in 0..100 {
            vp.zoom(true);
        }
        assert_eq!(vp.cell_size(), MAX_CELL_SIZE);
        assert!(!vp.zoom(true));
        for _ in 0..100 {
            vp.zoom(false);
        }
        assert_eq!(vp.cell_size(), MIN_CELL_SIZE);
        assert!(!vp.zoom(false));
    }

    #[test]
    fn test_zoom_step() {
        let mut vp = viewport();
        assert!(vp.zoom(true));
        assert_eq!(vp.cell_size(), 22);
        vp.zoom(false);
        vp.zoom(false);
        assert_eq!(vp.cell_size(), 18);
    }

    #[test]
    fn test_new_clamps_cell_size() {
        let vp = Viewport::new(1, PhysicalSize::new(10, 10), 1, 1);
        assert_eq!(vp.cell_size(), MIN_CELL_SIZE);
    }
}
