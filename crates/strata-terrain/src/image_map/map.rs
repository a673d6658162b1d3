//! The raw pixel grid.

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, Rgba, RgbaImage};
use thiserror::Error;

/// Colour returned for every lookup outside the grid.
pub const OUT_OF_BOUNDS: Rgb<u8> = Rgb([0, 0, 0]);

/// Errors from explicit image map file operations.
#[derive(Debug, Error)]
pub enum ImageMapError {
    /// The file is missing, unreadable, or not a decodable image.
    #[error("failed to load image map {path}: {source}")]
    Load {
        /// File that failed.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Encoding or writing the PNG failed.
    #[error("failed to save image map {path}: {source}")]
    Save {
        /// File that failed.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },

    /// Creating the output directory failed.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A 2D colour grid addressed by pixel or by world coordinate.
///
/// World `(x, z)` maps to pixel `(x - x_offset, z - z_offset)`. Pixel rows
/// run along world Z.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageMap {
    image: RgbaImage,
    x_offset: i32,
    z_offset: i32,
}

impl ImageMap {
    /// A fully transparent map, used for debug capture.
    pub fn blank(width: u32, height: u32, x_offset: i32, z_offset: i32) -> Self {
        Self::from_image(RgbaImage::new(width, height), x_offset, z_offset)
    }

    /// Wrap an in-memory image.
    pub fn from_image(image: RgbaImage, x_offset: i32, z_offset: i32) -> Self {
        Self {
            image,
            x_offset,
            z_offset,
        }
    }

    /// Decode an image file in any supported format.
    pub fn load(path: &Path, x_offset: i32, z_offset: i32) -> Result<Self, ImageMapError> {
        let image = image::open(path)
            .map_err(|source| ImageMapError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        Ok(Self::from_image(image, x_offset, z_offset))
    }

    /// Write the map as a PNG, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ImageMapError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| ImageMapError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| ImageMapError::Save {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(x_offset, z_offset)`.
    pub fn offset(&self) -> (i32, i32) {
        (self.x_offset, self.z_offset)
    }

    fn index(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        (x < self.image.width() && y < self.image.height()).then_some((x, y))
    }

    /// Colour at a pixel, ignoring alpha. [`OUT_OF_BOUNDS`] outside the grid.
    pub fn pixel(&self, x: i32, y: i32) -> Rgb<u8> {
        match self.index(x, y) {
            Some((x, y)) => {
                let Rgba([r, g, b, _]) = *self.image.get_pixel(x, y);
                Rgb([r, g, b])
            }
            None => OUT_OF_BOUNDS,
        }
    }

    /// Whether a pixel has been written (non-zero alpha).
    pub fn is_written(&self, x: i32, y: i32) -> bool {
        self.index(x, y)
            .is_some_and(|(x, y)| self.image.get_pixel(x, y)[3] != 0)
    }

    /// Set an opaque pixel. Writes outside the grid are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb<u8>) {
        if let Some((x, y)) = self.index(x, y) {
            let Rgb([r, g, b]) = color;
            self.image.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }

    /// Colour at a world column.
    pub fn pixel_at_world(&self, world_x: i32, world_z: i32) -> Rgb<u8> {
        self.pixel(
            world_x.wrapping_sub(self.x_offset),
            world_z.wrapping_sub(self.z_offset),
        )
    }

    /// Set the pixel covering a world column.
    pub fn set_pixel_at_world(&mut self, world_x: i32, world_z: i32, color: Rgb<u8>) {
        self.set_pixel(
            world_x.wrapping_sub(self.x_offset),
            world_z.wrapping_sub(self.z_offset),
            color,
        );
    }

    /// World `(x, z)` of a pixel.
    pub fn world_from_pixel(&self, x: i32, y: i32) -> (i32, i32) {
        (x.wrapping_add(self.x_offset), y.wrapping_add(self.z_offset))
    }

    /// Copy every written pixel of `other` into this map.
    ///
    /// Pixels are matched by world coordinate, so maps with different
    /// offsets or sizes merge over their overlap.
    pub fn merge(&mut self, other: &ImageMap) {
        for (x, y, pixel) in other.image.enumerate_pixels() {
            if pixel[3] == 0 {
                continue;
            }
            let (world_x, world_z) = other.world_from_pixel(x as i32, y as i32);
            let (tx, ty) = (
                world_x.wrapping_sub(self.x_offset),
                world_z.wrapping_sub(self.z_offset),
            );
            if let Some((tx, ty)) = self.index(tx, ty) {
                self.image.put_pixel(tx, ty, *pixel);
            }
        }
    }
}
