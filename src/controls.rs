use crate::grid::Cell;
use crate::simulation::SimulationState;
use crate::view::Viewport;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Reset,
    Clear,
    Step,
    DensityUp,
    DensityDown,
    ZoomIn,
    ZoomOut,
    ToggleNeighborhood,
    Quit,
}

impl Command {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        let command = match key {
            KeyCode::Space => Command::TogglePause,
            KeyCode::KeyR => Command::Reset,
            KeyCode::KeyC => Command::Clear,
            KeyCode::ArrowRight => Command::Step,
            KeyCode::ArrowUp => Command::DensityUp,
            KeyCode::ArrowDown => Command::DensityDown,
            KeyCode::Equal | KeyCode::NumpadAdd => Command::ZoomIn,
            KeyCode::Minus | KeyCode::NumpadSubtract => Command::ZoomOut,
            KeyCode::KeyN => Command::ToggleNeighborhood,
            KeyCode::Escape => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Applies a command. Returns `false` when the application should exit.
pub fn apply(command: Command, sim: &mut SimulationState, viewport: &mut Viewport) -> bool {
    match command {
        Command::TogglePause => sim.toggle_pause(),
        Command::Reset => sim.reset(),
        Command::Clear => sim.clear(),
        Command::Step => {
            // Single stepping only makes sense while the clock is stopped.
            if sim.is_paused() {
                sim.step();
            }
        }
        Command::DensityUp => sim.adjust_density(true),
        Command::DensityDown => sim.adjust_density(false),
        Command::ZoomIn => {
            viewport.zoom(true);
        }
        Command::ZoomOut => {
            viewport.zoom(false);
        }
        Command::ToggleNeighborhood => sim.toggle_neighborhood(),
        Command::Quit => return false,
    }
    true
}

/// Cell painted while a pointer button is held.
pub fn brush_for(button: MouseButton) -> Option<Cell> {
    match button {
        MouseButton::Left => Some(Cell::Food),
        MouseButton::Middle => Some(Cell::Alive),
        MouseButton::Right => Some(Cell::Empty),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WormConfig;
    use std::time::Instant;
    use winit::dpi::PhysicalSize;

    fn setup() -> (SimulationState, Viewport) {
        let config = WormConfig {
            grid_width: 8,
            grid_height: 2,
            rng_seed: Some(5),
            ..WormConfig::default()
        };
        let sim = SimulationState::new(&config, Instant::now());
        let viewport = Viewport::new(20, PhysicalSize::new(800, 800), 8, 2);
        (sim, viewport)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key(KeyCode::Space), Some(Command::TogglePause));
        assert_eq!(Command::from_key(KeyCode::KeyR), Some(Command::Reset));
        assert_eq!(Command::from_key(KeyCode::Escape), Some(Command::Quit));
        assert_eq!(Command::from_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_apply_pause_and_step() {
        let (mut sim, mut vp) = setup();
        // Running: a step request is ignored.
        assert!(apply(Command::Step, &mut sim, &mut vp));
        assert_eq!(sim.generation(), 0);

        apply(Command::TogglePause, &mut sim, &mut vp);
        assert!(sim.is_paused());
        apply(Command::Step, &mut sim, &mut vp);
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_apply_zoom_and_quit() {
        let (mut sim, mut vp) = setup();
        apply(Command::ZoomIn, &mut sim, &mut vp);
        assert_eq!(vp.cell_size(), 22);
        apply(Command::ZoomOut, &mut sim, &mut vp);
        assert_eq!(vp.cell_size(), 20);
        assert!(!apply(Command::Quit, &mut sim, &mut vp));
    }

    #[test]
    fn test_apply_density() {
        let (mut sim, mut vp) = setup();
        let before = sim.seed_density();
        apply(Command::DensityUp, &mut sim, &mut vp);
        assert!(sim.seed_density() > before);
        apply(Command::DensityDown, &mut sim, &mut vp);
        assert!((sim.seed_density() - before).abs() < 1e-12);
    }

    #[test]
    fn test_brush() {
        assert_eq!(brush_for(MouseButton::Left), Some(Cell::Food));
        assert_eq!(brush_for(MouseButton::Middle), Some(Cell::Alive));
        assert_eq!(brush_for(MouseButton::Right), Some(Cell::Empty));
        assert_eq!(brush_for(MouseButton::Back), None);
    }
}
