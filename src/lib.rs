//! Worm: a three-state cellular automaton on a small fixed grid.
//!
//! The simulation core ([`grid`], [`rule`], [`simulation`]) is independent of the
//! window; [`renderer`] and [`controls`] connect it to winit and wgpu.

pub mod config;
pub mod constants;
pub mod controls;
pub mod fps;
pub mod grid;
pub mod renderer;
pub mod rule;
pub mod simulation;
pub mod view;
