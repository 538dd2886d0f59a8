// Pointer input manager - turns window events into pointer events

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Pointer actions understood by the drag controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed at a position in logical pixels
    Down(Vec2),
    /// Pointer moved while the button is held
    Move(Vec2),
    /// Button released
    Up,
}

/// Tracks the cursor and the drag button across window events
///
/// Winit reports button changes without a position, so the last cursor
/// position is remembered. Moves are only forwarded while the button is
/// held.
pub struct PointerInput {
    /// Button that drags bodies
    button: MouseButton,
    /// Last cursor position in logical pixels
    cursor: Vec2,
    held: bool,
}

impl PointerInput {
    /// Create a pointer input dragging with the left mouse button
    pub fn new() -> Self {
        Self::with_button(MouseButton::Left)
    }

    pub fn with_button(button: MouseButton) -> Self {
        Self {
            button,
            cursor: Vec2::ZERO,
            held: false,
        }
    }

    /// Process a window event from winit
    pub fn process_window_event(
        &mut self,
        event: &WindowEvent,
        scale_factor: f64,
    ) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(logical_position(*position, scale_factor))
            }
            WindowEvent::MouseInput { state, button, .. } => self.button_changed(*button, *state),
            WindowEvent::Focused(false) => self.focus_lost(),
            _ => None,
        }
    }

    /// Record the cursor position; a move is reported only while held
    fn cursor_moved(&mut self, position: Vec2) -> Option<PointerEvent> {
        self.cursor = position;
        self.held.then_some(PointerEvent::Move(self.cursor))
    }

    fn button_changed(&mut self, button: MouseButton, state: ElementState) -> Option<PointerEvent> {
        if button != self.button {
            return None;
        }
        match state {
            ElementState::Pressed if !self.held => {
                self.held = true;
                Some(PointerEvent::Down(self.cursor))
            }
            ElementState::Released if self.held => {
                self.held = false;
                Some(PointerEvent::Up)
            }
            _ => None,
        }
    }

    /// Losing the cursor mid-drag must not leave the constraint behind
    fn focus_lost(&mut self) -> Option<PointerEvent> {
        if !self.held {
            return None;
        }
        self.held = false;
        Some(PointerEvent::Up)
    }

    /// Check if the drag button is held
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Last cursor position in logical pixels
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }
}

/// Convert a physical cursor position to logical pixels
fn logical_position(position: PhysicalPosition<f64>, scale_factor: f64) -> Vec2 {
    let logical = position.to_logical::<f32>(scale_factor);
    Vec2::new(logical.x, logical.y)
}

impl Default for PointerInput {
    fn default() -> Self {
        Self::new()
    }
}
