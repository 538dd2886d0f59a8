// Canvas camera: maps display pixels and pointer coordinates

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::core::math::{to_display_units, to_sim_units};

/// Fixed 2D camera over the drawing canvas
///
/// Display space has its origin at the canvas' top-left corner with y
/// pointing down. Simulation space is display space divided by `scale`.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Canvas position in pointer coordinates
    offset: Vec2,
    /// Display pixels per simulation metre
    scale: f32,
    /// Viewport width
    viewport_width: f32,
    /// Viewport height
    viewport_height: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a new camera
    pub fn new(offset: Vec2, scale: f32, viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            offset,
            scale,
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        // Top edge maps to y = 0 so that y grows down the screen
        self.view_proj = Mat4::orthographic_rh(
            0.0,
            self.viewport_width,
            self.viewport_height,
            0.0,
            -1.0, // Near plane
            1.0,  // Far plane
        );
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Convert pointer coordinates to simulation coordinates
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        let canvas_pos = screen_pos - self.offset;
        Vec2::new(
            to_sim_units(canvas_pos.x, self.scale),
            to_sim_units(canvas_pos.y, self.scale),
        )
    }

    /// Convert simulation coordinates to pointer coordinates
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        Vec2::new(
            to_display_units(world_pos.x, self.scale),
            to_display_units(world_pos.y, self.scale),
        ) + self.offset
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    #[test]
    fn test_screen_to_world_subtracts_offset_then_scales() {
        let camera = Camera::new(Vec2::new(8.0, 20.0), 30.0, 640.0, 480.0);
        let world = camera.screen_to_world(Vec2::new(338.0, 320.0));
        assert_relative_eq!(world.x, 11.0, epsilon = 1e-5);
        assert_relative_eq!(world.y, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_world_to_screen_inverts_screen_to_world() {
        let camera = Camera::new(Vec2::new(8.0, 20.0), 30.0, 640.0, 480.0);
        let screen = camera.world_to_screen(Vec2::new(11.0, 10.0));
        assert_relative_eq!(screen.x, 338.0, epsilon = 1e-3);
        assert_relative_eq!(screen.y, 320.0, epsilon = 1e-3);
    }

    #[test]
    fn test_projection_maps_canvas_corners() {
        let camera = Camera::new(Vec2::ZERO, 30.0, 640.0, 480.0);
        let proj = camera.view_proj_matrix();

        let top_left = proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(top_left.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(top_left.y, 1.0, epsilon = 1e-5);

        let bottom_right = proj * Vec4::new(640.0, 480.0, 0.0, 1.0);
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bottom_right.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_camera_uniform_layout() {
        let camera = Camera::new(Vec2::ZERO, 30.0, 640.0, 480.0);
        let uniform = CameraUniform::new(&camera);
        assert_eq!(uniform.view_proj, camera.view_proj_matrix().to_cols_array_2d());
    }
}
