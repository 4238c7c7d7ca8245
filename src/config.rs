//! Fixed settings of the demo.

/// Title of the window.
pub const WINDOW_TITLE: &str = "Textured Triangles";

/// Initial window width in pixels.
pub const WINDOW_WIDTH: u32 = 800;

/// Initial window height in pixels.
pub const WINDOW_HEIGHT: u32 = 600;

/// Requested OpenGL context version (major, minor). Always a core profile.
pub const GL_VERSION: (u8, u8) = (3, 3);

/// Image sampled by both triangles, relative to the working directory.
pub const TEXTURE_PATH: &str = "image.jpg";

/// Color the framebuffer is cleared to every frame.
pub const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.2, 1.0];

/// Name of the per-draw position offset uniform.
pub const OFFSET_UNIFORM: &str = "offset";

/// Name of the texture sampler uniform.
pub const SAMPLER_UNIFORM: &str = "ourTexture";

/// Texture unit the image is bound to.
pub const TEXTURE_UNIT: u32 = 0;
