use anyhow::Result;
use log::{error, info, warn};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use config::PlaygroundConfig;
use engine::input::PointerInput;
use engine::physics::DebugGeometry;
use engine::renderer::Renderer;
use game::Playground;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Dirtbox...");

    let config = PlaygroundConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.canvas.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.canvas.width,
                config.canvas.height,
            ))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        Playground::camera_for(&config),
    ))?;
    let mut playground = Playground::new(&config);
    let mut pointer_input = PointerInput::new();
    let mut geometry = DebugGeometry::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => {
                if let Some(pointer_event) =
                    pointer_input.process_window_event(&event, window.scale_factor())
                {
                    playground.handle_pointer(pointer_event);
                }

                match event {
                    WindowEvent::CloseRequested => {
                        info!("Close requested, shutting down...");
                        elwt.exit();
                    }
                    WindowEvent::Resized(physical_size) => {
                        renderer.resize(physical_size);
                    }
                    WindowEvent::RedrawRequested => {
                        geometry.clear();
                        playground.tick(&mut geometry);

                        match renderer.render(&geometry) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                warn!("Surface lost, reconfiguring");
                                renderer.reconfigure();
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                error!("Out of GPU memory, shutting down");
                                elwt.exit();
                            }
                            Err(e) => warn!("Dropped frame: {:?}", e),
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                // One tick per display refresh
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
