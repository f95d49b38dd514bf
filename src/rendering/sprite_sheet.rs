use crate::animation::DirectionSet;
use crate::data::{FrameRect, SheetDescriptor, SheetGeometry};
use crate::error::{SheetError, SheetResult};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// A decoded sprite sheet and the grid it is cut along.
pub struct SpriteSheet {
    pub image: RgbaImage,
    pub geometry: SheetGeometry,
}

impl SpriteSheet {
    /// Load sprite sheet image from the path in `descriptor`
    pub fn load(descriptor: &SheetDescriptor) -> SheetResult<Self> {
        let image = image::open(&descriptor.path)
            .map_err(|source| SheetError::Decode {
                path: descriptor.path.clone(),
                source,
            })?
            .to_rgba8();

        let (width, height) = image.dimensions();
        let geometry = descriptor.geometry(width, height)?;

        log::info!(
            "Loaded sprite sheet '{}': {}x{} px, {}x{} cells from {:?}",
            descriptor.name,
            width,
            height,
            geometry.columns(),
            geometry.rows(),
            descriptor.path
        );

        Ok(Self { image, geometry })
    }

    pub fn from_image(image: RgbaImage, columns: u32, rows: u32) -> SheetResult<Self> {
        let geometry = SheetGeometry::new(columns, rows, image.width(), image.height())?;
        Ok(Self { image, geometry })
    }

    /// One track per row, one frame per column.
    pub fn directions(&self) -> SheetResult<DirectionSet> {
        DirectionSet::from_rows(&self.geometry)
    }

    /// Draw one cell scaled to a `size` x `size` square centred on `center`,
    /// alpha blended, nearest-neighbour. Parts off the canvas are clipped.
    pub fn draw_frame(&self, canvas: &mut RgbaImage, rect: FrameRect, center: [f32; 2], size: u32) {
        let cell = imageops::crop_imm(&self.image, rect.x, rect.y, rect.width, rect.height).to_image();
        let scaled = imageops::resize(&cell, size, size, FilterType::Nearest);

        let half = size as f32 * 0.5;
        let x = (center[0] - half).round() as i64;
        let y = (center[1] - half).round() as i64;
        imageops::overlay(canvas, &scaled, x, y);
    }
}
