// Scene construction: the static container and the dirt grid

use crate::config::SceneConfig;
use crate::core::math::to_sim_units;
use crate::engine::physics::{body::presets, PhysicsWorld, RigidBodyHandle};

/// Places bodies given in display units into a physics world
pub struct SceneBuilder<'a> {
    world: &'a mut PhysicsWorld,
    /// Display pixels per simulation metre
    scale: f32,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(world: &'a mut PhysicsWorld, scale: f32) -> Self {
        Self { world, scale }
    }

    /// Create a static box centred at `(x, y)` with the given size
    pub fn create_boundary(&mut self, x: f32, y: f32, width: f32, height: f32) -> RigidBodyHandle {
        let body = presets::container_body(self.sim(x), self.sim(y));
        let handle = self.world.add_rigid_body(body);

        let collider = presets::container_collider(self.sim(width / 2.0), self.sim(height / 2.0));
        self.world.add_collider(collider, handle);
        handle
    }

    /// Fill a `count * count` grid of dynamic circles centred at `(center_x, center_y)`
    ///
    /// Bodies are returned in creation order, column by column.
    pub fn fill_region(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius: f32,
        count: usize,
        spacing: f32,
    ) -> Vec<RigidBodyHandle> {
        let half = count as f32 / 2.0;
        let mut handles = Vec::with_capacity(count * count);
        for i in 0..count {
            for j in 0..count {
                let x = center_x + spacing * (i as f32 - half);
                let y = center_y + spacing * (j as f32 - half);
                handles.push(self.create_circle(x, y, radius));
            }
        }
        handles
    }

    /// Create one dynamic circle at a display position
    pub fn create_circle(&mut self, x: f32, y: f32, radius: f32) -> RigidBodyHandle {
        let body = presets::dirt_body(self.sim(x), self.sim(y));
        let handle = self.world.add_rigid_body(body);
        self.world
            .add_collider(presets::dirt_collider(self.sim(radius)), handle);
        handle
    }

    fn sim(&self, display: f32) -> f32 {
        to_sim_units(display, self.scale)
    }
}

/// Handles of the bodies making up the demo scene
#[derive(Debug, Clone)]
pub struct Scene {
    pub boundary: RigidBodyHandle,
    pub particles: Vec<RigidBodyHandle>,
}

impl Scene {
    /// Build the configured scene into `world`
    pub fn build(world: &mut PhysicsWorld, config: &SceneConfig, scale: f32) -> Self {
        let mut builder = SceneBuilder::new(world, scale);

        let b = &config.boundary;
        let boundary = builder.create_boundary(b.x, b.y, b.width, b.height);

        let d = &config.dirt;
        let particles = builder.fill_region(d.center_x, d.center_y, d.radius, d.count, d.spacing);

        log::info!(
            "Scene built: 1 boundary, {} particles ({}x{})",
            particles.len(),
            d.count,
            d.count
        );

        Self {
            boundary,
            particles,
        }
    }
}
