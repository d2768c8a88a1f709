use glam::Vec2;
use std::{sync::Arc, time::Instant};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::PhysicalKey,
    window::{Window, WindowBuilder},
};
use worm::config::WormConfig;
use worm::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use worm::controls::{self, Command, brush_for};
use worm::grid::Cell;
use worm::renderer::Renderer;
use worm::simulation::SimulationState;
use worm::view::Viewport;

fn window_title(sim: &SimulationState) -> String {
    let paused_text = if sim.is_paused() { " [PAUSED]" } else { "" };
    format!(
        "Worm - Gen: {} - Density: {:.2} - Rule: {} - FPS: {:.1}{}",
        sim.generation(),
        sim.seed_density(),
        sim.neighborhood(),
        sim.fps(),
        paused_text
    )
}

/// Paints the cell under `cursor` with `brush`, if any.
fn paint_at(sim: &mut SimulationState, viewport: &Viewport, cursor: Vec2, brush: Option<Cell>) {
    let Some(brush) = brush else {
        return;
    };
    if let Some((x, y)) = viewport.screen_to_cell(cursor) {
        sim.paint(x, y, brush);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    log::info!("Worm cellular automaton");
    log::info!("Controls:");
    log::info!("  Space       - Pause / Resume");
    log::info!("  Right Arrow - Step (when paused)");
    log::info!("  Up/Down     - Seed density");
    log::info!("  R / C       - Reset / Clear grid");
    log::info!("  N           - Toggle neighborhood");
    log::info!("  Scroll, +/- - Zoom");
    log::info!("  Mouse       - Left: food, Middle: alive, Right: erase");
    log::info!("  Escape      - Quit");

    let config = WormConfig::default().validated();
    let event_loop = EventLoop::new()?;
    let window: Arc<Window> = Arc::new(
        WindowBuilder::new()
            .with_title("Worm cellular automata")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .build(&event_loop)?,
    );
    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        config.grid_width,
        config.grid_height,
    ))?;
    let mut viewport = Viewport::new(
        config.cell_size,
        renderer.size,
        config.grid_width,
        config.grid_height,
    );
    let mut simulation_state = SimulationState::new(&config, Instant::now());
    let mut cursor = Vec2::ZERO;
    let mut brush: Option<Cell> = None;

    event_loop.run(move |event, elwt: &EventLoopWindowTarget<()>| {
        elwt.set_control_flow(ControlFlow::Poll);
        match event {
            Event::AboutToWait => window.request_redraw(),
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    viewport.resize(renderer.size);
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    renderer.resize(window.inner_size());
                    viewport.resize(renderer.size);
                }
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    if key_event.state != ElementState::Pressed {
                        return;
                    }
                    let PhysicalKey::Code(code) = key_event.physical_key else {
                        return;
                    };
                    // Held keys repeat only for stepping and zooming.
                    let command = Command::from_key(code).filter(|c| {
                        !key_event.repeat
                            || matches!(c, Command::Step | Command::ZoomIn | Command::ZoomOut)
                    });
                    if let Some(command) = command {
                        if !controls::apply(command, &mut simulation_state, &mut viewport) {
                            elwt.exit();
                        }
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = Vec2::new(position.x as f32, position.y as f32);
                    paint_at(&mut simulation_state, &viewport, cursor, brush);
                }
                WindowEvent::MouseInput { state, button, .. } => match state {
                    ElementState::Pressed => {
                        brush = brush_for(button);
                        paint_at(&mut simulation_state, &viewport, cursor, brush);
                    }
                    ElementState::Released => {
                        if brush_for(button) == brush {
                            brush = None;
                        }
                    }
                },
                WindowEvent::CursorLeft { .. } => brush = None,
                WindowEvent::MouseWheel { delta, .. } => {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                    };
                    if scroll != 0.0 {
                        viewport.zoom(scroll > 0.0);
                    }
                }
                WindowEvent::RedrawRequested => {
                    let outcome = simulation_state.tick(Instant::now());
                    match renderer.render(simulation_state.grid(), &viewport) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure()
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("WGPU Error: OutOfMemory");
                            elwt.exit();
                        }
                        Err(e) => log::warn!("WGPU Error: {:?}", e),
                    }
                    if outcome.fps.is_some() {
                        window.set_title(&window_title(&simulation_state));
                    }
                }
                _ => {}
            },
            _ => {}
        }
    })?;
    Ok(())
}
