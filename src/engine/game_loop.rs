// Simulation loop timing and control
//
// Runs exactly one fixed physics step per display frame. There is no time
// accumulator, so a slow frame still advances the world by a single step.

use std::time::{Duration, Instant};

use crate::engine::physics::{DebugDraw, DebugSurface, PhysicsWorld, SolverIterations};

/// Target physics/update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frames between two frame-rate log lines
const STATS_LOG_INTERVAL: u64 = 60;

/// Drives the physics world, one tick per display refresh
pub struct SimulationLoop {
    /// Seconds advanced per tick
    timestep: f32,

    /// Solver iterations per tick
    iterations: SolverIterations,

    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the loop started
    start_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Ticks executed so far
    tick_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl SimulationLoop {
    /// Create a new simulation loop
    pub fn new(timestep: f32, iterations: SolverIterations) -> Self {
        let now = Instant::now();
        Self {
            timestep,
            iterations,
            last_frame_time: now,
            start_time: now,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            tick_count: 0,
            current_fps: 0.0,
        }
    }

    /// Run one tick: step, debug-draw, then clear forces
    pub fn tick(
        &mut self,
        world: &mut PhysicsWorld,
        debug_draw: &DebugDraw,
        surface: &mut impl DebugSurface,
    ) {
        self.record_frame();

        world.step(self.timestep, self.iterations);
        world.draw_debug_data(debug_draw, surface);
        world.clear_forces();
    }

    /// Record frame timing statistics for the tick about to run
    fn record_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.tick_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.tick_count % 10 == 0 {
            self.update_fps();
        }

        if self.tick_count % STATS_LOG_INTERVAL == 0 {
            log::debug!(
                "tick {}: {:.1} fps, {:.1}s elapsed",
                self.tick_count,
                self.current_fps,
                self.elapsed_secs()
            );
        }
    }

    /// Get the fixed timestep for physics updates (in seconds)
    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Get the solver iterations used per tick
    pub fn iterations(&self) -> SolverIterations {
        self.iterations
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total elapsed time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Get total number of ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        // Calculate average frame time
        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        // Convert to FPS
        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for SimulationLoop {
    fn default() -> Self {
        Self::new(FIXED_TIMESTEP, SolverIterations::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;
    use crate::engine::physics::{DebugDrawFlags, DebugDrawSettings, DebugGeometry};
    use rapier2d::prelude::Vector;
    use std::thread;

    #[test]
    fn test_loop_creation() {
        let sim = SimulationLoop::default();
        assert_eq!(sim.tick_count(), 0);
        assert_eq!(sim.iterations(), SolverIterations { velocity: 10, position: 10 });
    }

    #[test]
    fn test_fixed_timestep() {
        let sim = SimulationLoop::default();
        assert_eq!(sim.timestep(), FIXED_TIMESTEP);
        assert!((sim.timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_tick_counting() {
        let mut sim = SimulationLoop::default();
        let mut world = PhysicsWorld::new();
        let mut geometry = DebugGeometry::new();

        sim.tick(&mut world, &DebugDraw::default(), &mut geometry);
        assert_eq!(sim.tick_count(), 1);

        sim.tick(&mut world, &DebugDraw::default(), &mut geometry);
        assert_eq!(sim.tick_count(), 2);
    }

    #[test]
    fn test_slow_frame_still_runs_one_step() {
        let mut sim = SimulationLoop::default();
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::dirt_body(0.0, 0.0));
        world.add_collider(presets::dirt_collider(0.5), body);

        thread::sleep(Duration::from_millis(50));
        sim.tick(&mut world, &DebugDraw::default(), &mut DebugGeometry::new());

        // One step of gravity, not three
        let vy = world.get_rigid_body(body).unwrap().linvel().y;
        assert!(vy > 0.0);
        assert!(vy < 2.0 * 10.0 * FIXED_TIMESTEP);
    }

    #[test]
    fn test_tick_draws_then_clears_forces() {
        let mut sim = SimulationLoop::default();
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::dirt_body(0.0, 0.0));
        world.add_collider(presets::dirt_collider(0.5), body);
        world
            .get_rigid_body_mut(body)
            .unwrap()
            .add_force(Vector::new(5.0, 0.0), true);

        let debug_draw = DebugDraw::new(DebugDrawSettings {
            flags: DebugDrawFlags::SHAPES,
            ..Default::default()
        });
        let mut geometry = DebugGeometry::new();
        sim.tick(&mut world, &debug_draw, &mut geometry);

        assert!(!geometry.is_empty());
        let body = world.get_rigid_body(body).unwrap();
        assert!(body.linvel().x > 0.0, "force applied during the step");
        assert_eq!(body.user_force().x, 0.0, "force cleared after the step");
    }

    #[test]
    fn test_elapsed_time() {
        let sim = SimulationLoop::default();
        thread::sleep(Duration::from_millis(10));
        assert!(sim.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_fps_updates_every_ten_ticks() {
        let mut sim = SimulationLoop::default();
        let mut world = PhysicsWorld::new();
        let mut geometry = DebugGeometry::new();

        for _ in 0..10 {
            thread::sleep(Duration::from_millis(1));
            sim.tick(&mut world, &DebugDraw::default(), &mut geometry);
        }
        assert!(sim.fps() > 0.0);
    }
}
