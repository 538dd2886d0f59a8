use rapier2d::prelude::*;

pub use rapier2d::prelude::RigidBodyHandle;

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    can_sleep: bool,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            can_sleep: true,
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            can_sleep: false,
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .can_sleep(self.can_sleep)
            .build()
    }
}

/// Builder for creating colliders (fixtures) with material properties
pub struct ColliderBuilder2D {
    shape: SharedShape,
    friction: Real,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder2D {
    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self {
            shape: SharedShape::cuboid(half_width, half_height),
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Create a circle-shaped collider
    pub fn circle(radius: Real) -> Self {
        Self {
            shape: SharedShape::ball(radius),
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set density (mass will be calculated from shape area)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .build()
    }
}

/// Body and fixture configurations used by the playground scene
pub mod presets {
    use super::*;

    /// Create the container body (fixed/static)
    pub fn container_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create the container fixture (box shape)
    pub fn container_collider(half_width: Real, half_height: Real) -> Collider {
        ColliderBuilder2D::box_shape(half_width, half_height)
            .density(1.0)
            .friction(0.5)
            .restitution(0.2)
            .build()
    }

    /// Create a dirt particle body (dynamic)
    pub fn dirt_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic().position(x, y).build()
    }

    /// Create a dirt particle fixture (circle shape)
    pub fn dirt_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .density(1.0)
            .friction(0.5)
            .restitution(0.3)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic().position(10.0, 20.0).build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
    }

    #[test]
    fn test_body_builder_fixed() {
        let body = BodyBuilder::new_fixed().position(-1.0, 3.0).build();

        assert!(body.is_fixed());
        assert_eq!(body.translation().y, 3.0);
    }

    #[test]
    fn test_collider_builder_box() {
        let collider = ColliderBuilder2D::box_shape(1.0, 2.0).friction(0.3).build();

        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.3);
        let cuboid = collider.shape().as_cuboid().unwrap();
        assert_eq!(cuboid.half_extents.x, 1.0);
        assert_eq!(cuboid.half_extents.y, 2.0);
    }

    #[test]
    fn test_container_preset() {
        let body = presets::container_body(5.0, 15.0);
        let collider = presets::container_collider(8.0, 0.5);

        assert!(body.is_fixed());
        assert_eq!(collider.friction(), 0.5);
        assert_eq!(collider.restitution(), 0.2);
        assert_eq!(collider.density(), 1.0);
    }

    #[test]
    fn test_dirt_preset() {
        let body = presets::dirt_body(0.0, 0.0);
        let collider = presets::dirt_collider(0.5);

        assert!(body.is_dynamic());
        assert_eq!(collider.restitution(), 0.3);
        assert_eq!(collider.shape().as_ball().unwrap().radius, 0.5);
    }
}
