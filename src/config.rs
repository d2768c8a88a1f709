// --- File: config.rs ---
use crate::constants::*;
use crate::rule::Neighborhood;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WormConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Probability that a cell starts Alive when the grid is seeded.
    pub seed_density: f64,
    /// Minimum time between two simulation steps.
    pub update_interval: Duration,
    pub cell_size: u32,
    pub neighborhood: Neighborhood,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for WormConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            seed_density: DEFAULT_SEED_DENSITY,
            update_interval: Duration::from_millis(DEFAULT_UPDATE_INTERVAL_MS),
            cell_size: DEFAULT_CELL_SIZE,
            neighborhood: Neighborhood::default(),
            rng_seed: None,
        }
    }
}

impl WormConfig {
    /// Returns a copy with every field pulled back into its legal range.
    pub fn validated(&self) -> Self {
        let density = if self.seed_density.is_nan() {
            DEFAULT_SEED_DENSITY
        } else {
            self.seed_density.clamp(0.0, 1.0)
        };
        Self {
            grid_width: self.grid_width.max(1),
            grid_height: self.grid_height.max(1),
            seed_density: density,
            update_interval: self.update_interval,
            cell_size: self.cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE),
            neighborhood: self.neighborhood,
            rng_seed: self.rng_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = WormConfig::default();
        assert_eq!(config.grid_width, 200);
        assert_eq!(config.grid_height, 10);
        assert!((config.seed_density - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.update_interval, Duration::from_millis(100));
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.neighborhood, Neighborhood::RightOnly);
    }

    #[test]
    fn test_validated_clamps() {
        let config = WormConfig {
            grid_width: 0,
            grid_height: 0,
            seed_density: 1.7,
            cell_size: 500,
            ..WormConfig::default()
        }
        .validated();
        assert_eq!(config.grid_width, 1);
        assert_eq!(config.grid_height, 1);
        assert!((config.seed_density - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.cell_size, MAX_CELL_SIZE);

        let config = WormConfig {
            seed_density: f64::NAN,
            cell_size: 1,
            ..WormConfig::default()
        }
        .validated();
        assert!((config.seed_density - DEFAULT_SEED_DENSITY).abs() < f64::EPSILON);
        assert_eq!(config.cell_size, MIN_CELL_SIZE);
    }
}
// --- End of File: config.rs ---
