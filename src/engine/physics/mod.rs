// Physics system using rapier2d

pub mod body;
mod debug;
mod debug_draw;
mod joint;
mod world;

pub use body::RigidBodyHandle;
pub use debug::DebugRenderer;
pub use debug_draw::{DebugDraw, DebugDrawFlags, DebugDrawSettings, DebugGeometry, DebugSurface};
pub use joint::{DragJointDef, JointHandle};
pub use world::{PhysicsWorld, SolverIterations};
