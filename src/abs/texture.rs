//! Structs and functions for handling textures.
//!
//! The module provides the [`TextureImage`] struct holding decoded pixels on the CPU side and
//! the [`Texture`] struct which is a CPU representation of a GPU texture.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::GenericImageView;

/// Layout of the pixels handed to the GPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    /// Picks the upload format for an image with `channels` color channels.
    /// Only four-channel images keep their alpha.
    pub fn from_channel_count(channels: u8) -> Self {
        if channels == 4 {
            PixelFormat::Rgba
        } else {
            PixelFormat::Rgb
        }
    }

    /// The matching OpenGL format enum.
    pub fn gl_format(self) -> u32 {
        match self {
            PixelFormat::Rgb => glow::RGB,
            PixelFormat::Rgba => glow::RGBA,
        }
    }
}

/// A decoded image with 8 bits per channel, ready for upload.
#[derive(Debug)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl TextureImage {
    /// Decodes the image file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, image::ImageError> {
        let image = image::open(path)?;
        let (width, height) = image.dimensions();
        let format = PixelFormat::from_channel_count(image.color().channel_count());
        let data = match format {
            PixelFormat::Rgba => image.into_rgba8().into_raw(),
            PixelFormat::Rgb => image.into_rgb8().into_raw(),
        };

        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
}

impl Texture {
    /// Creates a linearly filtered, repeating 2D texture.
    ///
    /// With `Some(image)` the pixels are uploaded and mipmaps generated. With `None` the texture
    /// object exists but has no storage, so sampling it yields black.
    pub fn new(gl: &Arc<glow::Context>, image: Option<&TextureImage>) -> Result<Self, String> {
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );

            if let Some(image) = image {
                let format = image.format.gl_format();
                // RGB rows are not necessarily 4-byte aligned.
                gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    format as i32,
                    image.width as i32,
                    image.height as i32,
                    0,
                    format,
                    glow::UNSIGNED_BYTE,
                    glow::PixelUnpackData::Slice(Some(image.data.as_slice())),
                );
                gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
                gl.generate_mipmap(glow::TEXTURE_2D);
            }

            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
            })
        }
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind_to_unit(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{ImageBuffer, Luma, Rgb, Rgba};

    #[test]
    fn test_only_four_channels_keep_alpha() {
        assert_eq!(PixelFormat::from_channel_count(4), PixelFormat::Rgba);
        for channels in [1, 2, 3] {
            assert_eq!(PixelFormat::from_channel_count(channels), PixelFormat::Rgb);
        }
    }

    #[test]
    fn test_rgba_png_loads_as_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        ImageBuffer::from_pixel(3, 2, Rgba([10u8, 20, 30, 40]))
            .save(&path)
            .unwrap();

        let image = TextureImage::load(&path).unwrap();
        assert_eq!(image.format, PixelFormat::Rgba);
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.data.len(), 3 * 2 * 4);
        assert_eq!(&image.data[..4], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_rgb_png_loads_as_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        ImageBuffer::from_pixel(5, 3, Rgb([1u8, 2, 3])).save(&path).unwrap();

        let image = TextureImage::load(&path).unwrap();
        assert_eq!(image.format, PixelFormat::Rgb);
        assert_eq!(image.data.len(), 5 * 3 * 3);
    }

    #[test]
    fn test_grayscale_is_expanded_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        ImageBuffer::from_pixel(2, 2, Luma([200u8])).save(&path).unwrap();

        let image = TextureImage::load(&path).unwrap();
        assert_eq!(image.format, PixelFormat::Rgb);
        assert_eq!(&image.data[..3], &[200, 200, 200]);
    }

    #[test]
    fn test_jpeg_loads_as_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.jpg");
        ImageBuffer::from_pixel(8, 8, Rgb([255u8, 0, 0])).save(&path).unwrap();

        let image = TextureImage::load(&path).unwrap();
        assert_eq!(image.format, PixelFormat::Rgb);
        assert_eq!(image.data.len(), 8 * 8 * 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TextureImage::load(dir.path().join("image.jpg")).is_err());
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();
        assert!(TextureImage::load(&path).is_err());
    }
}
