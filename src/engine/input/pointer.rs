// Pointer interaction: hit-testing and the mouse drag constraint

use glam::Vec2;
use rapier2d::parry::bounding_volume::Aabb;
use rapier2d::prelude::*;

use super::manager::PointerEvent;
use crate::config::DragConfig;
use crate::engine::physics::{DragJointDef, JointHandle, PhysicsWorld, RigidBodyHandle};
use crate::engine::renderer::Camera;

/// The live drag constraint and the body it holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseConstraint {
    pub joint: JointHandle,
    pub body: RigidBodyHandle,
}

/// Translates pointer events into drag-joint operations on the world
///
/// Owns the pointer state (held flag, cached simulation-space position) and
/// the single drag constraint. At most one constraint exists at any time and
/// it never outlives the pointer-down state.
pub struct PointerController {
    camera: Camera,
    drag: DragConfig,
    held: bool,
    position: Option<Point<Real>>,
    constraint: Option<MouseConstraint>,
}

impl PointerController {
    pub fn new(camera: Camera, drag: DragConfig) -> Self {
        Self {
            camera,
            drag,
            held: false,
            position: None,
            constraint: None,
        }
    }

    /// Dispatch a pointer event to the matching handler
    pub fn handle(&mut self, world: &mut PhysicsWorld, event: PointerEvent) {
        match event {
            PointerEvent::Down(pos) => self.on_pointer_down(world, pos),
            PointerEvent::Move(pos) => self.on_pointer_move(world, pos),
            PointerEvent::Up => self.on_pointer_up(world),
        }
    }

    /// Pointer pressed at `screen_pos`
    pub fn on_pointer_down(&mut self, world: &mut PhysicsWorld, screen_pos: Vec2) {
        self.held = true;
        self.on_pointer_move(world, screen_pos);
    }

    /// Pointer moved to `screen_pos`
    pub fn on_pointer_move(&mut self, world: &mut PhysicsWorld, screen_pos: Vec2) {
        let pos = self.camera.screen_to_world(screen_pos);
        let target = point![pos.x, pos.y];
        self.position = Some(target);

        if self.held && self.constraint.is_none() {
            self.hit_test_and_attach(world);
        }

        if let Some(constraint) = self.constraint {
            world.set_drag_target(constraint.joint, target);
        }
    }

    /// Pointer released
    pub fn on_pointer_up(&mut self, world: &mut PhysicsWorld) {
        self.held = false;
        self.position = None;
        if let Some(constraint) = self.constraint.take() {
            world.destroy_joint(constraint.joint);
            log::debug!("Released body {:?}", constraint.body);
        }
    }

    /// Attach a drag constraint to the first dynamic body under the pointer
    ///
    /// Returns the grabbed body, or `None` if nothing was grabbed.
    pub fn hit_test_and_attach(&mut self, world: &mut PhysicsWorld) -> Option<RigidBodyHandle> {
        if self.constraint.is_some() {
            return None;
        }
        let target = self.position?;
        let body = self.body_at(world, target)?;

        let (mass, local_anchor) = {
            let rb = world.get_rigid_body(body)?;
            (rb.mass(), rb.position().inverse_transform_point(&target))
        };
        let def = DragJointDef {
            target,
            local_anchor,
            max_force: self.drag.max_force_per_mass * mass,
            frequency_hz: self.drag.frequency_hz,
            damping_ratio: self.drag.damping_ratio,
            collide_connected: true,
        };

        let joint = world.create_drag_joint(body, &def)?;
        world.wake_body(body);
        self.constraint = Some(MouseConstraint { joint, body });
        log::debug!("Grabbed body {:?} at ({:.2}, {:.2})", body, target.x, target.y);
        Some(body)
    }

    /// First dynamic body whose shape contains `point`
    fn body_at(&self, world: &PhysicsWorld, point: Point<Real>) -> Option<RigidBodyHandle> {
        let eps = vector![self.drag.query_epsilon, self.drag.query_epsilon];
        let aabb = Aabb::new(point - eps, point + eps);

        let mut selected = None;
        world.query_aabb(&aabb, |_handle, collider| {
            let Some(parent) = collider.parent() else {
                return true;
            };
            let is_static = world
                .get_rigid_body(parent)
                .map_or(true, |body| body.is_fixed());
            if is_static {
                return true;
            }
            if world.collider_contains_point(collider, &point) {
                selected = Some(parent);
                return false;
            }
            true
        });
        selected
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Cached pointer position in simulation units
    pub fn position(&self) -> Option<Point<Real>> {
        self.position
    }

    pub fn constraint(&self) -> Option<MouseConstraint> {
        self.constraint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;
    use crate::engine::physics::SolverIterations;
    use approx::assert_relative_eq;

    const SCALE: f32 = 30.0;

    /// World with a floor and two particles at (5, 5) and (10, 5) metres
    fn playground() -> (PhysicsWorld, RigidBodyHandle, RigidBodyHandle, RigidBodyHandle) {
        let mut world = PhysicsWorld::with_gravity(vector![0.0, 0.0]);
        let floor = world.add_rigid_body(presets::container_body(7.0, 12.0));
        world.add_collider(presets::container_collider(6.0, 0.5), floor);

        let a = world.add_rigid_body(presets::dirt_body(5.0, 5.0));
        world.add_collider(presets::dirt_collider(0.5), a);
        let b = world.add_rigid_body(presets::dirt_body(10.0, 5.0));
        world.add_collider(presets::dirt_collider(0.5), b);

        // Refresh the query pipeline
        world.step(1.0 / 60.0, SolverIterations::default());
        (world, floor, a, b)
    }

    fn controller() -> PointerController {
        let camera = Camera::new(Vec2::ZERO, SCALE, 640.0, 480.0);
        PointerController::new(camera, DragConfig::default())
    }

    fn screen(x: f32, y: f32) -> Vec2 {
        Vec2::new(x * SCALE, y * SCALE)
    }

    #[test]
    fn test_pointer_up_without_constraint_is_noop() {
        let (mut world, ..) = playground();
        let mut pointer = controller();

        pointer.on_pointer_up(&mut world);

        assert!(!pointer.is_held());
        assert!(pointer.position().is_none());
        assert!(pointer.constraint().is_none());
        assert_eq!(world.joint_count(), 0);
    }

    #[test]
    fn test_grab_move_release() {
        let (mut world, _floor, a, _b) = playground();
        let mut pointer = controller();

        pointer.on_pointer_down(&mut world, screen(5.0, 5.0));
        let constraint = pointer.constraint().expect("particle under the pointer");
        assert_eq!(constraint.body, a);
        assert_eq!(world.joint_count(), 1);
        assert_eq!(world.joint_body(constraint.joint), Some(a));

        pointer.on_pointer_move(&mut world, Vec2::new(210.0, 120.0));
        let target = world.drag_target(constraint.joint).unwrap();
        assert_relative_eq!(target.x, 7.0, epsilon = 1e-5);
        assert_relative_eq!(target.y, 4.0, epsilon = 1e-5);

        pointer.on_pointer_up(&mut world);
        assert!(pointer.constraint().is_none());
        assert_eq!(world.joint_count(), 0);
        assert_eq!(world.drag_target(constraint.joint), None);
    }

    #[test]
    fn test_max_force_scales_with_mass() {
        let (mut world, _floor, a, _b) = playground();
        let mut pointer = controller();
        pointer.on_pointer_down(&mut world, screen(5.0, 5.0));

        let mass = world.get_rigid_body(a).unwrap().mass();
        assert!(mass > 0.0);
        let constraint = pointer.constraint().unwrap();
        let max_force = world.drag_max_force(constraint.joint).unwrap();
        assert_relative_eq!(max_force, 300.0 * mass, epsilon = 1e-3);
        assert!(!world.get_rigid_body(a).unwrap().is_sleeping());
    }

    #[test]
    fn test_pointer_down_over_empty_space_keeps_seeking() {
        let (mut world, _floor, _a, b) = playground();
        let mut pointer = controller();

        pointer.on_pointer_down(&mut world, screen(1.0, 1.0));
        assert!(pointer.is_held());
        assert!(pointer.constraint().is_none());
        assert_eq!(world.joint_count(), 0);

        pointer.on_pointer_move(&mut world, screen(10.1, 5.1));
        assert_eq!(pointer.constraint().map(|c| c.body), Some(b));
        assert_eq!(world.joint_count(), 1);
    }

    #[test]
    fn test_static_body_is_never_grabbed() {
        let (mut world, ..) = playground();
        let mut pointer = controller();

        pointer.on_pointer_down(&mut world, screen(7.0, 12.0));
        assert!(pointer.constraint().is_none());
        assert_eq!(world.joint_count(), 0);
    }

    #[test]
    fn test_aabb_overlap_without_containment_misses() {
        let (mut world, ..) = playground();
        let mut pointer = controller();

        // Inside the ball's bounding box corner but outside the circle
        pointer.on_pointer_down(&mut world, screen(5.45, 5.45));
        assert!(pointer.constraint().is_none());
    }

    #[test]
    fn test_moving_over_another_body_keeps_single_constraint() {
        let (mut world, _floor, a, _b) = playground();
        let mut pointer = controller();

        pointer.on_pointer_down(&mut world, screen(5.0, 5.0));
        pointer.on_pointer_move(&mut world, screen(10.0, 5.0));
        pointer.on_pointer_down(&mut world, screen(10.0, 5.0));

        assert_eq!(pointer.constraint().map(|c| c.body), Some(a));
        assert_eq!(world.joint_count(), 1);
        assert!(pointer.hit_test_and_attach(&mut world).is_none());
        assert_eq!(world.joint_count(), 1);
    }

    #[test]
    fn test_release_then_regrab() {
        let (mut world, _floor, a, _b) = playground();
        let mut pointer = controller();

        for _ in 0..3 {
            pointer.on_pointer_down(&mut world, screen(5.0, 5.0));
            assert_eq!(pointer.constraint().map(|c| c.body), Some(a));
            pointer.on_pointer_up(&mut world);
            assert_eq!(world.joint_count(), 0);
        }
    }

    #[test]
    fn test_handle_dispatches_events() {
        let (mut world, _floor, a, _b) = playground();
        let mut pointer = controller();

        pointer.handle(&mut world, PointerEvent::Down(screen(5.0, 5.0)));
        assert_eq!(pointer.constraint().map(|c| c.body), Some(a));
        pointer.handle(&mut world, PointerEvent::Move(screen(6.0, 5.0)));
        assert!(pointer.is_held());
        pointer.handle(&mut world, PointerEvent::Up);
        assert!(pointer.constraint().is_none());
        assert_eq!(world.joint_count(), 0);
    }

    #[test]
    fn test_move_without_press_only_caches_position() {
        let (mut world, ..) = playground();
        let mut pointer = controller();

        pointer.on_pointer_move(&mut world, screen(5.0, 5.0));
        assert!(pointer.constraint().is_none());
        let cached = pointer.position().unwrap();
        assert_relative_eq!(cached.x, 5.0, epsilon = 1e-5);
    }
}
