//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use crate::{config::GL_VERSION, error::AppError};

/// Core entry point used to check that the GL function loader works.
const PROBE_FUNCTION: &str = "glCreateShader";

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Dropping it destroys the window and shuts SDL down, so every GPU object
/// created from [`App::gl`] must be dropped first.
pub struct App {
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl: sdl2::Sdl,
}

impl App {
    /// Creates a new non-fullscreen [`App`] with the given title and size and makes its
    /// OpenGL context current.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Sdl)?;
        let video_subsystem = sdl.video().map_err(AppError::Video)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(GL_VERSION.0, GL_VERSION.1);

        let window = video_subsystem
            .window(title, width, height)
            .opengl()
            .resizable()
            .build()?;
        let gl_context = window.gl_create_context().map_err(AppError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(AppError::Context)?;

        if video_subsystem.gl_get_proc_address(PROBE_FUNCTION).is_null() {
            return Err(AppError::Loader(PROBE_FUNCTION));
        }
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(AppError::EventPump)?;

        log::info!(
            "Created {width}x{height} window with OpenGL {}.{} core context",
            GL_VERSION.0,
            GL_VERSION.1
        );

        Ok(Self {
            gl: Arc::new(gl),
            event_pump,
            window,
            gl_context,
            video_subsystem,
            sdl,
        })
    }
}
