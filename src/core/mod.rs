// Core utilities shared by the engine and the game layer

pub mod math;
