use rapier2d::parry::bounding_volume::Aabb;
use rapier2d::prelude::*;
use std::num::NonZeroUsize;

use super::debug_draw::{DebugDraw, DebugSurface};
use super::joint::{DragJointDef, JointHandle};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Solver iteration counts used for one fixed step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverIterations {
    /// Velocity solver iterations
    pub velocity: usize,
    /// Position correction iterations
    pub position: usize,
}

impl Default for SolverIterations {
    fn default() -> Self {
        Self {
            velocity: 10,
            position: 10,
        }
    }
}

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (y points down the screen)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for region and point queries
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Fixed body at the origin that anchors drag joints
    ground: RigidBodyHandle,
}

impl PhysicsWorld {
    /// Create a new physics world with the playground's downward gravity
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, 10.0])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        let mut rigid_body_set = RigidBodySet::new();
        let ground = rigid_body_set.insert(RigidBodyBuilder::fixed().build());

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set,
            collider_set: ColliderSet::new(),
            ground,
        }
    }

    /// Step the physics simulation forward by `dt` seconds
    pub fn step(&mut self, dt: Real, iterations: SolverIterations) {
        self.integration_parameters.dt = dt;
        if let Some(velocity) = NonZeroUsize::new(iterations.velocity) {
            self.integration_parameters.num_solver_iterations = velocity;
        }
        self.integration_parameters.num_internal_pgs_iterations = iterations.position.max(1);

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Reset the user forces and torques accumulated on every body
    pub fn clear_forces(&mut self) {
        for (_handle, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// The fixed body drag joints are anchored to
    pub fn ground_body(&self) -> RigidBodyHandle {
        self.ground
    }

    /// Number of bodies, the ground body excluded
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len() - 1
    }

    /// Number of dynamic bodies
    pub fn dynamic_body_count(&self) -> usize {
        self.rigid_body_set
            .iter()
            .filter(|(_, body)| body.is_dynamic())
            .count()
    }

    /// Visit every collider whose bounding box overlaps `aabb`.
    ///
    /// The visitor returns `true` to keep searching and `false` to stop.
    /// Results reflect collider positions as of the last step.
    pub fn query_aabb(&self, aabb: &Aabb, mut visitor: impl FnMut(ColliderHandle, &Collider) -> bool) {
        self.query_pipeline
            .colliders_with_aabb_intersecting_aabb(aabb, |handle| {
                match self.collider_set.get(*handle) {
                    Some(collider) => visitor(*handle, collider),
                    None => true,
                }
            });
    }

    /// Test a world-space point against a collider's shape at its current transform
    pub fn collider_contains_point(&self, collider: &Collider, point: &Point<Real>) -> bool {
        collider.shape().contains_point(collider.position(), point)
    }

    /// Wake a sleeping body
    pub fn wake_body(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.wake_up(true);
        }
    }

    /// Attach a drag joint between the ground body and `body`
    ///
    /// Returns `None` if the body no longer exists.
    pub fn create_drag_joint(
        &mut self,
        body: RigidBodyHandle,
        def: &DragJointDef,
    ) -> Option<JointHandle> {
        self.rigid_body_set.get(body)?;
        let handle = self
            .impulse_joint_set
            .insert(self.ground, body, def.build(), true);
        Some(handle)
    }

    /// Move the point a drag joint pulls its body towards
    pub fn set_drag_target(&mut self, handle: JointHandle, target: Point<Real>) {
        let Some(joint) = self.impulse_joint_set.get_mut(handle) else {
            return;
        };
        // The ground body sits at the origin, so its local frame is the world frame
        joint.data.set_local_anchor1(target);
        let body = joint.body2;
        self.wake_body(body);
    }

    /// Current target of a drag joint, in world coordinates
    pub fn drag_target(&self, handle: JointHandle) -> Option<Point<Real>> {
        self.impulse_joint_set
            .get(handle)
            .map(|joint| joint.data.local_anchor1())
    }

    /// Force limit of a drag joint's motors
    pub fn drag_max_force(&self, handle: JointHandle) -> Option<Real> {
        self.impulse_joint_set
            .get(handle)
            .map(|joint| joint.data.motors[JointAxis::X as usize].max_force)
    }

    /// Remove a joint from the simulation
    pub fn destroy_joint(&mut self, handle: JointHandle) {
        self.impulse_joint_set.remove(handle, true);
    }

    /// Number of joints in the simulation
    pub fn joint_count(&self) -> usize {
        self.impulse_joint_set.len()
    }

    /// Get the body pulled by a joint
    pub fn joint_body(&self, handle: JointHandle) -> Option<RigidBodyHandle> {
        self.impulse_joint_set.get(handle).map(|joint| joint.body2)
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Get the timestep used by the last step
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }

    /// Run a debug-draw pass over the current state
    pub fn draw_debug_data(&self, debug_draw: &DebugDraw, surface: &mut impl DebugSurface) {
        debug_draw.draw(&self.debug_data(), surface);
    }

    /// Get references to internal components for debug rendering
    pub fn debug_data(&self) -> DebugData<'_> {
        DebugData {
            rigid_bodies: &self.rigid_body_set,
            colliders: &self.collider_set,
            joints: &self.impulse_joint_set,
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Data structure for debug rendering
pub struct DebugData<'a> {
    pub rigid_bodies: &'a RigidBodySet,
    pub colliders: &'a ColliderSet,
    pub joints: &'a ImpulseJointSet,
}
