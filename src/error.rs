//! Startup failures.

/// Errors that abort the demo before or while setting up the render loop.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to initialize SDL: {0}")]
    Sdl(String),
    #[error("failed to initialize the video subsystem: {0}")]
    Video(String),
    #[error("failed to create window: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error("failed to create OpenGL context: {0}")]
    Context(String),
    #[error("failed to load OpenGL function `{0}`")]
    Loader(&'static str),
    #[error("failed to create event pump: {0}")]
    EventPump(String),
    #[error("failed to create GPU object: {0}")]
    Gpu(String),
    #[error("failed to build shader program: {0}")]
    Shader(String),
}
