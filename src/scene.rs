//! The two textured triangles and everything needed to draw them.

use std::{ops::Range, path::Path, sync::Arc};

use glam::{Vec2, Vec3};
use glow::HasContext;

use crate::{
    abs::*,
    config::{OFFSET_UNIFORM, SAMPLER_UNIFORM, TEXTURE_UNIT},
    error::AppError,
};

const VERTEX_SHADER: &str = include_str!("shaders/textured/vert.glsl");
const FRAGMENT_SHADER: &str = include_str!("shaders/textured/frag.glsl");

/// A vertex with a position and a texture coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct TexturedVertex {
    pub position: Vec3,
    pub uv: Vec2,
}

impl TexturedVertex {
    const fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            uv: Vec2::new(u, v),
        }
    }
}

impl Vertex for TexturedVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<TexturedVertex>() as i32;

            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);

            gl.vertex_attrib_pointer_f32(
                1,
                2,
                glow::FLOAT,
                false,
                stride,
                std::mem::size_of::<Vec3>() as i32,
            );
            gl.enable_vertex_attrib_array(1);
        }
    }
}

/// Both triangles, one after the other.
#[rustfmt::skip]
pub const VERTICES: [TexturedVertex; 6] = [
    // first triangle
    TexturedVertex::new( 0.0,  0.5, 0.0, 0.5, 1.0),
    TexturedVertex::new(-0.5, -0.5, 0.0, 0.0, 0.0),
    TexturedVertex::new( 0.5, -0.5, 0.0, 1.0, 0.0),
    // second triangle
    TexturedVertex::new(-0.5,  0.5, 0.0, 0.0, 1.0),
    TexturedVertex::new(-1.0, -0.5, 0.0, 0.0, 0.0),
    TexturedVertex::new( 0.0, -0.5, 0.0, 1.0, 0.0),
];

/// Vertex ranges of the moving and the static triangle.
pub const MOVING_TRIANGLE: Range<usize> = 0..3;
pub const STATIC_TRIANGLE: Range<usize> = 3..6;

/// Offset of the static triangle, the same every frame.
pub const STATIC_OFFSET: Vec3 = Vec3::new(-0.5, 0.0, 0.0);

/// Offset of the moving triangle `time` seconds after startup. `x` swings within `[0, 1]`.
pub fn moving_offset(time: f32) -> Vec3 {
    Vec3::new(0.5 + time.sin() * 0.5, 0.0, 0.0)
}

/// Decodes the texture image, logging instead of failing if it cannot be read.
pub fn load_texture_image(path: impl AsRef<Path>) -> Option<TextureImage> {
    let path = path.as_ref();
    match TextureImage::load(path) {
        Ok(image) => {
            log::info!(
                "Loaded texture {} ({}x{}, {:?})",
                path.display(),
                image.width,
                image.height,
                image.format
            );
            Some(image)
        }
        Err(e) => {
            log::error!("Failed to load texture {}: {e}", path.display());
            None
        }
    }
}

/// Uniform locations, resolved once after linking.
struct UniformLocations {
    offset: Option<glow::UniformLocation>,
    sampler: Option<glow::UniformLocation>,
}

/// GPU resources of the demo. Dropping it deletes the vertex array, the vertex buffer, the
/// program and the texture.
pub struct Scene {
    gl: Arc<glow::Context>,
    mesh: Mesh,
    program: ShaderProgram,
    texture: Texture,
    uniforms: UniformLocations,
}

impl Scene {
    /// Uploads the triangles, the texture at `texture_path` and builds the shader program.
    ///
    /// A texture that fails to decode is logged and left empty.
    pub fn new(gl: &Arc<glow::Context>, texture_path: impl AsRef<Path>) -> Result<Self, AppError> {
        let mesh = Mesh::new(gl, &VERTICES, glow::TRIANGLES).map_err(AppError::Gpu)?;

        let image = load_texture_image(texture_path);
        let texture = Texture::new(gl, image.as_ref()).map_err(AppError::Gpu)?;

        let program = build_program(gl, VERTEX_SHADER, FRAGMENT_SHADER).map_err(AppError::Shader)?;
        let uniforms = UniformLocations {
            offset: program.uniform_location(OFFSET_UNIFORM),
            sampler: program.uniform_location(SAMPLER_UNIFORM),
        };

        Ok(Self {
            gl: Arc::clone(gl),
            mesh,
            program,
            texture,
            uniforms,
        })
    }

    /// Clears the screen and draws both triangles for the given time in seconds.
    pub fn render(&self, clear_color: [f32; 4], time: f32) {
        let [r, g, b, a] = clear_color;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.program.use_program();
        self.mesh.bind();
        self.texture.bind_to_unit(TEXTURE_UNIT);
        self.program
            .set_uniform(self.uniforms.sampler.as_ref(), TEXTURE_UNIT as i32);

        self.program
            .set_uniform(self.uniforms.offset.as_ref(), moving_offset(time));
        self.mesh.draw_range(MOVING_TRIANGLE);

        self.program
            .set_uniform(self.uniforms.offset.as_ref(), STATIC_OFFSET);
        self.mesh.draw_range(STATIC_TRIANGLE);
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        log::debug!(
            "Releasing scene ({} vertices, 1 program, 1 texture)",
            self.mesh.vertex_count()
        );
    }
}

/// Compiles both stages and links them. The stage objects are deleted once linked.
fn build_program(
    gl: &Arc<glow::Context>,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram, String> {
    let vert = Shader::new(gl, glow::VERTEX_SHADER, vertex_source)
        .map_err(|log| format!("vertex shader: {log}"))?;
    let frag = Shader::new(gl, glow::FRAGMENT_SHADER, fragment_source)
        .map_err(|log| format!("fragment shader: {log}"))?;
    ShaderProgram::new(gl, &[&vert, &frag]).map_err(|log| format!("link: {log}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_five_floats() {
        assert_eq!(std::mem::size_of::<TexturedVertex>(), 5 * std::mem::size_of::<f32>());
        assert_eq!(std::mem::offset_of!(TexturedVertex, position), 0);
        assert_eq!(
            std::mem::offset_of!(TexturedVertex, uv),
            3 * std::mem::size_of::<f32>()
        );
    }

    #[test]
    fn test_vertex_buffer_contents() {
        let floats: Vec<f32> = VERTICES
            .iter()
            .flat_map(|v| [v.position.x, v.position.y, v.position.z, v.uv.x, v.uv.y])
            .collect();
        #[rustfmt::skip]
        let expected = [
             0.0,  0.5, 0.0, 0.5, 1.0,
            -0.5, -0.5, 0.0, 0.0, 0.0,
             0.5, -0.5, 0.0, 1.0, 0.0,
            -0.5,  0.5, 0.0, 0.0, 1.0,
            -1.0, -0.5, 0.0, 0.0, 0.0,
             0.0, -0.5, 0.0, 1.0, 0.0,
        ];
        assert_eq!(floats, expected);
        assert_eq!(std::mem::size_of_val(&VERTICES), 6 * 5 * 4);
    }

    #[test]
    fn test_draw_ranges_cover_buffer() {
        assert_eq!(MOVING_TRIANGLE, 0..3);
        assert_eq!(STATIC_TRIANGLE, 3..6);
        assert_eq!(MOVING_TRIANGLE.end, STATIC_TRIANGLE.start);
        assert_eq!(STATIC_TRIANGLE.end, VERTICES.len());
    }

    #[test]
    fn test_moving_offset_stays_in_unit_range() {
        for i in -2000..2000 {
            let t = i as f32 * 0.0137;
            let offset = moving_offset(t);
            assert!((0.0..=1.0).contains(&offset.x), "x = {} at t = {t}", offset.x);
            assert!((offset.x - (0.5 + 0.5 * t.sin())).abs() < 1e-6);
            assert_eq!(offset.y, 0.0);
            assert_eq!(offset.z, 0.0);
        }
    }

    #[test]
    fn test_moving_offset_extremes() {
        use std::f32::consts::FRAC_PI_2;

        assert_eq!(moving_offset(0.0), Vec3::new(0.5, 0.0, 0.0));
        assert!((moving_offset(FRAC_PI_2).x - 1.0).abs() < 1e-6);
        assert!(moving_offset(-FRAC_PI_2).x.abs() < 1e-6);
    }

    #[test]
    fn test_static_offset() {
        assert_eq!(STATIC_OFFSET, Vec3::new(-0.5, 0.0, 0.0));
    }

    #[test]
    fn test_shader_sources_declare_uniforms() {
        assert!(VERTEX_SHADER.contains(&format!("uniform vec3 {OFFSET_UNIFORM};")));
        assert!(FRAGMENT_SHADER.contains(&format!("uniform sampler2D {SAMPLER_UNIFORM};")));
        assert!(VERTEX_SHADER.contains("layout(location = 0) in vec3"));
        assert!(VERTEX_SHADER.contains("layout(location = 1) in vec2"));
    }

    #[test]
    fn test_missing_texture_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_texture_image(dir.path().join("image.jpg")).is_none());
    }
}
