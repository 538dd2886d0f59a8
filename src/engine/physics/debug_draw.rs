// Debug-draw pass: turns the physics state into wireframe geometry
//
// The pass works in display pixels. It reads colliders and joints through
// `DebugData`, applies the draw scale, and emits primitives into a
// `DebugSurface`. The GPU side lives in `debug.rs`.

use glam::Vec2;
use rapier2d::prelude::*;

use super::world::DebugData;
use super::debug::DebugVertex;

/// Segments used to approximate a circle
const CIRCLE_SEGMENTS: usize = 16;

const STATIC_COLOR: [f32; 3] = [0.5, 0.9, 0.5];
const DYNAMIC_COLOR: [f32; 3] = [0.9, 0.7, 0.7];
const SLEEPING_COLOR: [f32; 3] = [0.6, 0.6, 0.6];
const JOINT_COLOR: [f32; 3] = [0.5, 0.8, 0.8];

/// Selects which primitive categories the pass draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugDrawFlags(u32);

impl DebugDrawFlags {
    pub const NONE: Self = Self(0);
    /// Collider shapes
    pub const SHAPES: Self = Self(0b0001);
    /// Joints
    pub const JOINTS: Self = Self(0b0010);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for DebugDrawFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Parameters of the debug-draw pass
#[derive(Debug, Clone, Copy)]
pub struct DebugDrawSettings {
    /// Display pixels per simulation metre
    pub scale: f32,
    /// Opacity of shape interiors
    pub fill_alpha: f32,
    /// Outline width in display pixels
    pub line_thickness: f32,
    pub flags: DebugDrawFlags,
}

impl Default for DebugDrawSettings {
    fn default() -> Self {
        Self {
            scale: crate::core::math::DEFAULT_SCALE,
            fill_alpha: 0.3,
            line_thickness: 1.0,
            flags: DebugDrawFlags::SHAPES | DebugDrawFlags::JOINTS,
        }
    }
}

/// Something the debug-draw pass can draw onto
pub trait DebugSurface {
    /// Fill a convex polygon given in display pixels
    fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]);

    /// Draw a line segment of the given width in display pixels
    fn stroke_segment(&mut self, a: Vec2, b: Vec2, thickness: f32, color: [f32; 4]);
}

/// The debug-draw pass
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugDraw {
    settings: DebugDrawSettings,
}

impl DebugDraw {
    pub fn new(settings: DebugDrawSettings) -> Self {
        Self { settings }
    }

    /// Draw the selected categories of `data` onto `surface`
    pub fn draw(&self, data: &DebugData<'_>, surface: &mut impl DebugSurface) {
        if self.settings.flags.contains(DebugDrawFlags::SHAPES) {
            for (_handle, collider) in data.colliders.iter() {
                let body = collider.parent().and_then(|h| data.rigid_bodies.get(h));
                let color = match body {
                    Some(body) if body.is_fixed() => STATIC_COLOR,
                    Some(body) if body.is_sleeping() => SLEEPING_COLOR,
                    Some(_) => DYNAMIC_COLOR,
                    None => STATIC_COLOR,
                };
                self.draw_collider(collider, color, surface);
            }
        }

        if self.settings.flags.contains(DebugDrawFlags::JOINTS) {
            for (_handle, joint) in data.joints.iter() {
                let (Some(body1), Some(body2)) = (
                    data.rigid_bodies.get(joint.body1),
                    data.rigid_bodies.get(joint.body2),
                ) else {
                    continue;
                };
                let anchor1 = body1.position() * joint.data.local_anchor1();
                let anchor2 = body2.position() * joint.data.local_anchor2();
                surface.stroke_segment(
                    self.to_display(&anchor1),
                    self.to_display(&anchor2),
                    self.settings.line_thickness,
                    opaque(JOINT_COLOR),
                );
            }
        }
    }

    fn draw_collider(&self, collider: &Collider, color: [f32; 3], surface: &mut impl DebugSurface) {
        let transform = collider.position();
        let shape = collider.shape();

        if let Some(ball) = shape.as_ball() {
            let outline: Vec<Vec2> = (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
                    let local = point![angle.cos() * ball.radius, angle.sin() * ball.radius];
                    self.to_display(&(transform * local))
                })
                .collect();
            self.draw_polygon(&outline, color, surface);

            // Radius line shows the body's orientation
            let center = self.to_display(&(transform * point![0.0, 0.0]));
            let rim = self.to_display(&(transform * point![ball.radius, 0.0]));
            surface.stroke_segment(center, rim, self.settings.line_thickness, opaque(color));
        } else if let Some(cuboid) = shape.as_cuboid() {
            let he = cuboid.half_extents;
            let outline: Vec<Vec2> = [
                point![-he.x, -he.y],
                point![he.x, -he.y],
                point![he.x, he.y],
                point![-he.x, he.y],
            ]
            .iter()
            .map(|corner| self.to_display(&(transform * corner)))
            .collect();
            self.draw_polygon(&outline, color, surface);
        } else {
            log::trace!("Skipping unsupported shape {:?}", shape.shape_type());
        }
    }

    fn draw_polygon(&self, outline: &[Vec2], color: [f32; 3], surface: &mut impl DebugSurface) {
        let fill = [
            color[0] * 0.5,
            color[1] * 0.5,
            color[2] * 0.5,
            self.settings.fill_alpha,
        ];
        surface.fill_polygon(outline, fill);

        for (i, a) in outline.iter().enumerate() {
            let b = outline[(i + 1) % outline.len()];
            surface.stroke_segment(*a, b, self.settings.line_thickness, opaque(color));
        }
    }

    fn to_display(&self, point: &Point<Real>) -> Vec2 {
        Vec2::new(point.x, point.y) * self.settings.scale
    }
}

fn opaque(color: [f32; 3]) -> [f32; 4] {
    [color[0], color[1], color[2], 1.0]
}

/// Triangle geometry collected by a debug-draw pass, ready for upload
#[derive(Debug, Default)]
pub struct DebugGeometry {
    vertices: Vec<DebugVertex>,
    indices: Vec<u32>,
}

impl DebugGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame's geometry, keeping the allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn vertices(&self) -> &[DebugVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn push_vertex(&mut self, position: Vec2, color: [f32; 4]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(DebugVertex {
            position: position.to_array(),
            color,
        });
        index
    }
}

impl DebugSurface for DebugGeometry {
    fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]) {
        if points.len() < 3 {
            return;
        }

        // Triangle fan around the first vertex
        let start = self.push_vertex(points[0], color);
        for point in &points[1..] {
            self.push_vertex(*point, color);
        }
        for i in 1..(points.len() as u32 - 1) {
            self.indices.extend_from_slice(&[start, start + i, start + i + 1]);
        }
    }

    fn stroke_segment(&mut self, a: Vec2, b: Vec2, thickness: f32, color: [f32; 4]) {
        let dir = b - a;
        if dir.length_squared() <= f32::EPSILON {
            return;
        }
        let offset = dir.normalize().perp() * (thickness * 0.5);

        let start = self.push_vertex(a + offset, color);
        self.push_vertex(b + offset, color);
        self.push_vertex(b - offset, color);
        self.push_vertex(a - offset, color);
        self.indices.extend_from_slice(&[
            start,
            start + 1,
            start + 2,
            start,
            start + 2,
            start + 3,
        ]);
    }
}
