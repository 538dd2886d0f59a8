// Demo layer
//
// Everything specific to the dirt box scene:
// - Scene construction (static boundary and the particle grid)
// - The playground context tying world, loop and pointer together

pub mod playground;
pub mod scene;

// Re-export commonly used types
pub use playground::Playground;
pub use scene::Scene;
