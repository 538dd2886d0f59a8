// Playground configuration
//
// Everything tunable about the demo lives here with the values the scene was
// authored against as defaults. The configuration is validated once at
// startup; nothing re-reads it afterwards.

use glam::Vec2;

use crate::core::math::DEFAULT_SCALE;
use crate::engine::physics::DebugDrawSettings;

/// Errors raised when a configuration cannot drive the simulation
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Scale must be positive, got {0}")]
    InvalidScale(f32),

    #[error("Canvas must not be empty, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Timestep must be positive, got {0}")]
    InvalidTimestep(f32),

    #[error("Solver needs at least one {0} iteration")]
    NoIterations(&'static str),

    #[error("Debug line thickness must be positive, got {0}")]
    InvalidLineThickness(f32),
}

/// Drawing surface and the mapping from screen to simulation space
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Window title
    pub title: String,
    /// Canvas width in logical pixels
    pub width: u32,
    /// Canvas height in logical pixels
    pub height: u32,
    /// Display pixels per simulation metre
    pub scale: f32,
    /// Position of the canvas' top-left corner in pointer coordinates
    pub offset: Vec2,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            title: "Dirtbox".to_string(),
            width: 640,
            height: 480,
            scale: DEFAULT_SCALE,
            // winit reports cursor positions relative to the client area
            offset: Vec2::ZERO,
        }
    }
}

/// Fixed-step solver settings
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    /// Gravity in metres per second squared (positive y points down)
    pub gravity: Vec2,
    /// Seconds advanced per tick
    pub timestep: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 10.0),
            timestep: 1.0 / 60.0,
            velocity_iterations: 10,
            position_iterations: 10,
        }
    }
}

/// Static container, in display units
#[derive(Debug, Clone, Copy)]
pub struct BoundaryConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Grid of dynamic particles, in display units
#[derive(Debug, Clone, Copy)]
pub struct DirtConfig {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    /// Particles per grid side; the grid is `count * count`
    pub count: usize,
    pub spacing: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct SceneConfig {
    pub boundary: BoundaryConfig,
    pub dirt: DirtConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            boundary: BoundaryConfig {
                x: 320.0,
                y: 450.0,
                width: 500.0,
                height: 30.0,
            },
            dirt: DirtConfig {
                center_x: 320.0,
                center_y: 300.0,
                radius: 25.0,
                count: 40,
                spacing: 10.0,
            },
        }
    }
}

/// Mouse drag constraint tuning
#[derive(Debug, Clone, Copy)]
pub struct DragConfig {
    /// Half extent of the hit-test box, in simulation units
    pub query_epsilon: f32,
    /// Maximum drag force per unit of body mass
    pub max_force_per_mass: f32,
    /// Spring frequency of the drag constraint in hertz
    pub frequency_hz: f32,
    /// Damping ratio of the drag spring
    pub damping_ratio: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            query_epsilon: 0.001,
            max_force_per_mass: 300.0,
            frequency_hz: 5.0,
            damping_ratio: 0.7,
        }
    }
}

/// Complete configuration of the playground
#[derive(Debug, Clone, Default)]
pub struct PlaygroundConfig {
    pub canvas: CanvasConfig,
    pub simulation: SimulationConfig,
    pub scene: SceneConfig,
    pub debug_draw: DebugDrawSettings,
    pub drag: DragConfig,
}

impl PlaygroundConfig {
    /// Check that the configuration can drive the simulation and renderer
    pub fn validate(&self) -> Result<(), ConfigError> {
        let canvas = &self.canvas;
        if !(canvas.scale > 0.0) {
            return Err(ConfigError::InvalidScale(canvas.scale));
        }
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }

        let simulation = &self.simulation;
        if !(simulation.timestep > 0.0) {
            return Err(ConfigError::InvalidTimestep(simulation.timestep));
        }
        if simulation.velocity_iterations == 0 {
            return Err(ConfigError::NoIterations("velocity"));
        }
        if simulation.position_iterations == 0 {
            return Err(ConfigError::NoIterations("position"));
        }

        if !(self.debug_draw.line_thickness > 0.0) {
            return Err(ConfigError::InvalidLineThickness(
                self.debug_draw.line_thickness,
            ));
        }

        Ok(())
    }
}
