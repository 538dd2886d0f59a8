// Engine modules: renderer, physics, input, simulation loop

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
