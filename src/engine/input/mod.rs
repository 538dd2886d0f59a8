// Input handling system
//
// Pointer input drives the mouse drag constraint. Two layers:
//
// - `manager`: translates raw winit window events into `PointerEvent`s
// - `pointer`: the controller that hit-tests and owns the drag constraint
//
// ## Usage Example
//
// ```rust
// let mut input = PointerInput::new();
// let mut pointer = PointerController::new(camera, DragConfig::default());
//
// // In your event loop
// if let Some(event) = input.process_window_event(&window_event, window.scale_factor()) {
//     pointer.handle(&mut world, event);
// }
// ```

pub mod manager;
pub mod pointer;

// Re-export commonly used types
pub use manager::{PointerEvent, PointerInput};
pub use pointer::PointerController;
