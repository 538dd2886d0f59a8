// Playground context: owns the world, the loop and the pointer controller

use crate::config::PlaygroundConfig;
use crate::engine::game_loop::SimulationLoop;
use crate::engine::input::{PointerController, PointerEvent};
use crate::engine::physics::{
    DebugDraw, DebugDrawSettings, DebugSurface, PhysicsWorld, SolverIterations,
};
use crate::engine::renderer::Camera;
use rapier2d::prelude::Vector;

use super::Scene;

/// The running demo
///
/// Everything shared between the simulation loop and pointer handling lives
/// here and is driven from a single thread.
pub struct Playground {
    world: PhysicsWorld,
    simulation: SimulationLoop,
    pointer: PointerController,
    debug_draw: DebugDraw,
    scene: Scene,
}

impl Playground {
    /// Create the world and build the configured scene into it
    pub fn new(config: &PlaygroundConfig) -> Self {
        let gravity = config.simulation.gravity;
        let mut world = PhysicsWorld::with_gravity(Vector::new(gravity.x, gravity.y));

        let canvas = &config.canvas;
        let scene = Scene::build(&mut world, &config.scene, canvas.scale);
        log::debug!(
            "World ready: {} bodies, {} dynamic",
            world.body_count(),
            world.dynamic_body_count()
        );

        let iterations = SolverIterations {
            velocity: config.simulation.velocity_iterations,
            position: config.simulation.position_iterations,
        };
        let simulation = SimulationLoop::new(config.simulation.timestep, iterations);

        let pointer = PointerController::new(Self::camera_for(config), config.drag);

        // Shapes are drawn at the same scale the scene was built with
        let debug_draw = DebugDraw::new(DebugDrawSettings {
            scale: canvas.scale,
            ..config.debug_draw
        });

        Self {
            world,
            simulation,
            pointer,
            debug_draw,
            scene,
        }
    }

    /// Camera matching the configured canvas
    pub fn camera_for(config: &PlaygroundConfig) -> Camera {
        let canvas = &config.canvas;
        Camera::new(
            canvas.offset,
            canvas.scale,
            canvas.width as f32,
            canvas.height as f32,
        )
    }

    /// Run one simulation tick, drawing the debug view onto `surface`
    pub fn tick(&mut self, surface: &mut impl DebugSurface) {
        self.simulation
            .tick(&mut self.world, &self.debug_draw, surface);
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.pointer.handle(&mut self.world, event);
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn simulation(&self) -> &SimulationLoop {
        &self.simulation
    }

    pub fn pointer(&self) -> &PointerController {
        &self.pointer
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoundaryConfig, DirtConfig, SceneConfig};
    use crate::engine::physics::{DebugDrawFlags, DebugGeometry};
    use approx::assert_relative_eq;
    use glam::Vec2;

    /// One particle at display (150, 150) above a wide floor
    fn single_particle_config() -> PlaygroundConfig {
        PlaygroundConfig {
            scene: SceneConfig {
                boundary: BoundaryConfig {
                    x: 320.0,
                    y: 450.0,
                    width: 500.0,
                    height: 30.0,
                },
                dirt: DirtConfig {
                    center_x: 150.0,
                    center_y: 150.0,
                    radius: 15.0,
                    count: 1,
                    spacing: 10.0,
                },
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_new_builds_scene() {
        let playground = Playground::new(&single_particle_config());
        assert_eq!(playground.scene().particles.len(), 1);
        assert_eq!(playground.world().body_count(), 2);
        assert_eq!(playground.simulation().tick_count(), 0);
    }

    #[test]
    fn test_tick_accelerates_particle_downwards() {
        let mut playground = Playground::new(&single_particle_config());
        let particle = playground.scene().particles[0];
        let mut geometry = DebugGeometry::new();

        playground.tick(&mut geometry);
        let v1 = playground.world().get_rigid_body(particle).unwrap().linvel().y;
        playground.tick(&mut geometry);
        let v2 = playground.world().get_rigid_body(particle).unwrap().linvel().y;

        assert!(v1 > 0.0);
        assert!(v2 > v1);
        assert_eq!(playground.simulation().tick_count(), 2);
    }

    #[test]
    fn test_configured_gravity_reaches_world() {
        let mut config = single_particle_config();
        config.simulation.gravity = Vec2::new(4.0, 0.0);
        let mut playground = Playground::new(&config);
        let particle = playground.scene().particles[0];

        assert_eq!(playground.world().gravity(), Vector::new(4.0, 0.0));
        playground.tick(&mut DebugGeometry::new());
        let v = *playground.world().get_rigid_body(particle).unwrap().linvel();
        assert!(v.x > 0.0);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_drag_scenario() {
        let mut playground = Playground::new(&single_particle_config());
        let particle = playground.scene().particles[0];
        let mut geometry = DebugGeometry::new();
        playground.tick(&mut geometry);

        // Grab the particle where it now is
        let t = *playground.world().get_rigid_body(particle).unwrap().translation();
        let grab = Vec2::new(t.x * 30.0, t.y * 30.0);
        playground.handle_pointer(PointerEvent::Down(grab));
        let constraint = playground.pointer().constraint().expect("particle grabbed");
        assert_eq!(constraint.body, particle);

        playground.handle_pointer(PointerEvent::Move(Vec2::new(300.0, 90.0)));
        let target = playground.world().drag_target(constraint.joint).unwrap();
        assert_relative_eq!(target.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(target.y, 3.0, epsilon = 1e-5);

        playground.handle_pointer(PointerEvent::Up);
        assert!(playground.pointer().constraint().is_none());
        assert_eq!(playground.world().joint_count(), 0);
    }

    #[test]
    fn test_joint_drawn_only_while_dragging() {
        let mut config = single_particle_config();
        config.debug_draw.flags = DebugDrawFlags::JOINTS;
        let mut playground = Playground::new(&config);
        let particle = playground.scene().particles[0];

        let mut geometry = DebugGeometry::new();
        playground.tick(&mut geometry);
        assert!(geometry.is_empty());

        let t = *playground.world().get_rigid_body(particle).unwrap().translation();
        playground.handle_pointer(PointerEvent::Down(Vec2::new(t.x * 30.0, t.y * 30.0)));
        geometry.clear();
        playground.tick(&mut geometry);
        assert!(!geometry.is_empty());

        playground.handle_pointer(PointerEvent::Up);
        geometry.clear();
        playground.tick(&mut geometry);
        assert!(geometry.is_empty());
    }
}
