// --- File: simulation.rs ---
use crate::config::WormConfig;
use crate::constants::DENSITY_ADJUST_STEP;
use crate::fps::FpsCounter;
use crate::grid::{Cell, Grid};
use crate::rule::{self, Neighborhood};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

pub type SimRng = StdRng;

/// What happened during one frame callback.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TickOutcome {
    pub stepped: bool,
    /// Fresh FPS figure, present once per reporting interval.
    pub fps: Option<f64>,
}

/// All mutable session state: the grid, its back buffer and the controls acting on it.
pub struct SimulationState {
    grid: Grid,
    next: Grid,
    rng: SimRng,
    seed_density: f64,
    is_paused: bool,
    neighborhood: Neighborhood,
    update_interval: Duration,
    last_step: Option<Instant>,
    generation: u64,
    fps: FpsCounter,
}

impl SimulationState {
    pub fn new(config: &WormConfig, now: Instant) -> Self {
        let config = config.validated();
        let rng = match config.rng_seed {
            Some(seed) => SimRng::seed_from_u64(seed),
            None => SimRng::from_entropy(),
        };
        let mut state = Self {
            grid: Grid::new(config.grid_width, config.grid_height),
            next: Grid::new(config.grid_width, config.grid_height),
            rng,
            seed_density: config.seed_density,
            is_paused: false,
            neighborhood: config.neighborhood,
            update_interval: config.update_interval,
            last_step: None,
            generation: 0,
            fps: FpsCounter::new(now),
        };
        state.grid.seed(&mut state.rng, state.seed_density);
        log::info!(
            "Seeded {}x{} grid at density {:.2} ({} alive)",
            state.grid.width(),
            state.grid.height(),
            state.seed_density,
            state.grid.count(Cell::Alive)
        );
        state
    }

    /// One frame callback: FPS bookkeeping, then at most one step if running and due.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let fps = self.fps.record_frame(now);
        if let Some(fps) = fps {
            log::debug!("FPS: {:.1}", fps);
        }
        if self.is_paused {
            return TickOutcome {
                stepped: false,
                fps,
            };
        }
        let due = match self.last_step {
            Some(last) => now.saturating_duration_since(last) >= self.update_interval,
            None => true,
        };
        if due {
            self.step();
            self.last_step = Some(now);
        }
        TickOutcome { stepped: due, fps }
    }

    /// Advances exactly one generation, regardless of pause state.
    pub fn step(&mut self) {
        rule::step_into(&self.grid, &mut self.next, self.neighborhood);
        std::mem::swap(&mut self.grid, &mut self.next);
        self.generation += 1;
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        log::info!(
            "Simulation {}",
            if self.is_paused { "Paused" } else { "Resumed" }
        );
    }

    /// Re-seeds the grid at the current density.
    pub fn reset(&mut self) {
        self.grid.seed(&mut self.rng, self.seed_density);
        self.generation = 0;
        log::info!(
            "Reset grid at density {:.2} ({} alive)",
            self.seed_density,
            self.grid.count(Cell::Alive)
        );
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
        log::info!("Cleared grid");
    }

    pub fn set_density(&mut self, density: f64) {
        if density.is_nan() {
            return;
        }
        self.seed_density = density.clamp(0.0, 1.0);
    }

    pub fn adjust_density(&mut self, increase: bool) {
        let delta = if increase {
            DENSITY_ADJUST_STEP
        } else {
            -DENSITY_ADJUST_STEP
        };
        self.set_density(self.seed_density + delta);
        log::info!("Seed density: {:.2}", self.seed_density);
    }

    pub fn toggle_neighborhood(&mut self) {
        self.neighborhood = self.neighborhood.toggled();
        log::info!("Neighborhood: {}", self.neighborhood);
    }

    /// Writes a cell directly, bypassing the update rule. Out-of-range coordinates are ignored.
    pub fn paint(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        let painted = self.grid.set(x, y, cell);
        if painted {
            log::trace!("Painted ({}, {}) as {:?}", x, y, cell);
        }
        painted
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.grid.get(x, y)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed_density(&self) -> f64 {
        self.seed_density
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fps(&self) -> f64 {
        self.fps.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(density: f64) -> WormConfig {
        WormConfig {
            grid_width: 20,
            grid_height: 4,
            seed_density: density,
            rng_seed: Some(99),
            ..WormConfig::default()
        }
    }

    #[test]
    fn test_new_seeds_with_density() {
        let now = Instant::now();
        let sim = SimulationState::new(&config(0.0), now);
        assert_eq!(sim.grid().count(Cell::Empty), 80);
        let sim = SimulationState::new(&config(1.0), now);
        assert_eq!(sim.grid().count(Cell::Alive), 80);
        assert_eq!(sim.generation(), 0);
        assert!(!sim.is_paused());
    }

    #[test]
    fn test_tick_respects_interval() {
        let start = Instant::now();
        let mut sim = SimulationState::new(&config(0.3), start);
        assert!(sim.tick(start).stepped);
        assert!(!sim.tick(start + Duration::from_millis(50)).stepped);
        assert!(sim.tick(start + Duration::from_millis(100)).stepped);
        assert!(!sim.tick(start + Duration::from_millis(150)).stepped);
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn test_tick_does_not_step_while_paused() {
        let start = Instant::now();
        let mut sim = SimulationState::new(&config(0.3), start);
        sim.toggle_pause();
        let before = sim.grid().clone();
        let outcome = sim.tick(start + Duration::from_secs(2));
        assert!(!outcome.stepped);
        // FPS bookkeeping still runs while paused.
        assert!(outcome.fps.is_some());
        assert_eq!(sim.grid(), &before);

        sim.toggle_pause();
        assert!(sim.tick(start + Duration::from_secs(3)).stepped);
    }

    #[test]
    fn test_step_while_paused() {
        let start = Instant::now();
        let mut sim = SimulationState::new(&config(0.0), start);
        sim.toggle_pause();
        sim.paint(0, 0, Cell::Empty);
        sim.paint(1, 0, Cell::Alive);
        sim.step();
        assert_eq!(sim.cell(0, 0), Some(Cell::Alive));
        assert_eq!(sim.cell(1, 0), Some(Cell::Empty));
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_paint_then_read() {
        let start = Instant::now();
        let mut sim = SimulationState::new(&config(0.5), start);
        // Step is due, but painting takes effect immediately.
        assert!(sim.paint(3, 2, Cell::Food));
        assert_eq!(sim.cell(3, 2), Some(Cell::Food));
        assert!(sim.paint(3, 2, Cell::Empty));
        assert_eq!(sim.cell(3, 2), Some(Cell::Empty));
        assert!(!sim.paint(20, 0, Cell::Food));
        assert!(!sim.paint(-1, 0, Cell::Food));
        assert_eq!(sim.cell(20, 0), None);
    }

    #[test]
    fn test_states_stay_valid_after_steps() {
        let start = Instant::now();
        let mut sim = SimulationState::new(&config(0.5), start);
        sim.paint(0, 1, Cell::Food);
        sim.paint(7, 2, Cell::Food);
        for _ in 0..25 {
            sim.step();
            assert!(
                sim.grid()
                    .cells()
                    .iter()
                    .all(|c| Cell::try_from(c.as_u32()).is_ok())
            );
            assert_eq!(sim.grid().cells().len(), 80);
        }
    }

    #[test]
    fn test_density_is_clamped() {
        let mut sim = SimulationState::new(&config(0.3), Instant::now());
        sim.set_density(4.0);
        assert!((sim.seed_density() - 1.0).abs() < f64::EPSILON);
        sim.set_density(-1.0);
        assert!(sim.seed_density().abs() < f64::EPSILON);
        sim.adjust_density(false);
        assert!(sim.seed_density().abs() < f64::EPSILON);
        sim.adjust_density(true);
        assert!((sim.seed_density() - DENSITY_ADJUST_STEP).abs() < 1e-12);
        sim.set_density(f64::NAN);
        assert!((sim.seed_density() - DENSITY_ADJUST_STEP).abs() < 1e-12);
    }

    #[test]
    fn test_reset_uses_current_density() {
        let mut sim = SimulationState::new(&config(0.0), Instant::now());
        sim.step();
        sim.set_density(1.0);
        sim.reset();
        assert_eq!(sim.grid().count(Cell::Alive), 80);
        assert_eq!(sim.generation(), 0);
        sim.clear();
        assert_eq!(sim.grid().count(Cell::Empty), 80);
    }

    #[test]
    fn test_toggle_neighborhood() {
        let mut sim = SimulationState::new(&config(0.3), Instant::now());
        assert_eq!(sim.neighborhood(), Neighborhood::RightOnly);
        sim.toggle_neighborhood();
        assert_eq!(sim.neighborhood(), Neighborhood::Moore);
    }
}
// --- End of File: simulation.rs ---
