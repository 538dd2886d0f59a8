use rapier2d::prelude::*;

/// Handle to identify joints
pub type JointHandle = ImpulseJointHandle;

/// Description of a pointer drag constraint
///
/// The constraint pulls a point fixed on the dragged body towards a target
/// expressed in world coordinates. It is a pair of force-limited position
/// motors on the world X and Y axes, so the body stays free to rotate.
#[derive(Debug, Clone, Copy)]
pub struct DragJointDef {
    /// World-space point the body is pulled towards
    pub target: Point<Real>,
    /// Grab point in the dragged body's local frame
    pub local_anchor: Point<Real>,
    /// Upper bound on the force the motors may apply
    pub max_force: Real,
    /// Spring frequency in hertz
    pub frequency_hz: Real,
    /// Spring damping ratio, 1.0 is critical damping
    pub damping_ratio: Real,
    /// Keep contacts between the two jointed bodies
    pub collide_connected: bool,
}

impl DragJointDef {
    /// Motor stiffness derived from the spring frequency
    pub fn stiffness(&self) -> Real {
        let omega = std::f32::consts::TAU * self.frequency_hz;
        omega * omega
    }

    /// Motor damping derived from the damping ratio
    pub fn damping(&self) -> Real {
        let omega = std::f32::consts::TAU * self.frequency_hz;
        2.0 * self.damping_ratio * omega
    }

    /// Build the joint; the first body must sit at the world origin
    pub fn build(&self) -> GenericJoint {
        let stiffness = self.stiffness();
        let damping = self.damping();

        GenericJointBuilder::new(JointAxesMask::empty())
            .local_anchor1(self.target)
            .local_anchor2(self.local_anchor)
            .motor_position(JointAxis::X, 0.0, stiffness, damping)
            .motor_position(JointAxis::Y, 0.0, stiffness, damping)
            .motor_max_force(JointAxis::X, self.max_force)
            .motor_max_force(JointAxis::Y, self.max_force)
            .contacts_enabled(self.collide_connected)
            .build()
    }
}
