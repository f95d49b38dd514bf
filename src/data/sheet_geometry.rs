use crate::error::{SheetError, SheetResult};

/// Grid layout of a sprite sheet: how many cells it holds and how big the
/// source image is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGeometry {
    columns: u32,
    rows: u32,
    width: u32,
    height: u32,
}

/// A cell of a sprite sheet in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SheetGeometry {
    pub fn new(columns: u32, rows: u32, width: u32, height: u32) -> SheetResult<Self> {
        let geometry = Self {
            columns,
            rows,
            width,
            height,
        };

        // Cells narrower than a pixel can't be drawn, so they count as invalid too.
        if columns == 0 || rows == 0 || geometry.cell_width() == 0 || geometry.cell_height() == 0 {
            return Err(SheetError::InvalidGeometry {
                columns,
                rows,
                width,
                height,
            });
        }

        Ok(geometry)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn invalid(&self) -> SheetError {
        SheetError::InvalidGeometry {
            columns: self.columns,
            rows: self.rows,
            width: self.width,
            height: self.height,
        }
    }

    /// Cell width; any remainder pixels on the right edge are ignored.
    pub fn cell_width(&self) -> u32 {
        self.width.checked_div(self.columns).unwrap_or(0)
    }

    /// Cell height; any remainder pixels on the bottom edge are ignored.
    pub fn cell_height(&self) -> u32 {
        self.height.checked_div(self.rows).unwrap_or(0)
    }

    pub fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Resolve a linear frame index (shifted by `offset`) to its cell.
    ///
    /// Cells are numbered row-major. Fails with [`SheetError::OutOfRange`]
    /// when the index runs past the last row instead of reading outside the
    /// image.
    pub fn rect_for(&self, index: u32, offset: u32) -> SheetResult<FrameRect> {
        let effective = index.checked_add(offset).ok_or(SheetError::OutOfRange {
            index,
            row: u32::MAX,
            rows: self.rows,
        })?;

        let column = effective.checked_rem(self.columns).ok_or_else(|| self.invalid())?;
        let row = effective.checked_div(self.columns).ok_or_else(|| self.invalid())?;

        if row >= self.rows {
            return Err(SheetError::OutOfRange {
                index: effective,
                row,
                rows: self.rows,
            });
        }

        let width = self.cell_width();
        let height = self.cell_height();
        if width == 0 || height == 0 {
            return Err(self.invalid());
        }

        Ok(FrameRect {
            x: column * width,
            y: row * height,
            width,
            height,
        })
    }
}

/// Free-function form of [`SheetGeometry::rect_for`].
pub fn rect_for(index: u32, geometry: &SheetGeometry, offset: u32) -> SheetResult<FrameRect> {
    geometry.rect_for(index, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_sheet_offset() {
        // Walk sheet: 18 columns x 8 rows of 128px cells
        let geometry = SheetGeometry::new(18, 8, 18 * 128, 8 * 128).unwrap();

        let rect = rect_for(0, &geometry, 8).unwrap();
        assert_eq!(rect.x / geometry.cell_width(), 8);
        assert_eq!(rect.y / geometry.cell_height(), 0);
        assert_eq!(rect, FrameRect { x: 1024, y: 0, width: 128, height: 128 });

        // Second direction starts one full row down
        let rect = geometry.rect_for(0, 18).unwrap();
        assert_eq!(rect, FrameRect { x: 0, y: 128, width: 128, height: 128 });
    }

    #[test]
    fn test_rects_stay_inside_image() {
        let geometries = [
            SheetGeometry::new(18, 8, 2304, 1024).unwrap(),
            SheetGeometry::new(1, 8, 64, 512).unwrap(),
            // Truncated cells: 100 / 3 = 33
            SheetGeometry::new(3, 7, 100, 50).unwrap(),
        ];

        for geometry in geometries {
            for index in 0..geometry.cell_count() {
                let rect = geometry.rect_for(index, 0).unwrap();
                assert!(rect.x + rect.width <= geometry.width());
                assert!(rect.y + rect.height <= geometry.height());
            }
        }
    }

    #[test]
    fn test_truncated_cell_size() {
        let geometry = SheetGeometry::new(3, 2, 100, 51).unwrap();
        assert_eq!(geometry.cell_width(), 33);
        assert_eq!(geometry.cell_height(), 25);

        let rect = geometry.rect_for(5, 0).unwrap();
        assert_eq!(rect, FrameRect { x: 66, y: 25, width: 33, height: 25 });
    }

    #[test]
    fn test_row_past_end_is_out_of_range() {
        let geometry = SheetGeometry::new(18, 8, 2304, 1024).unwrap();

        assert!(geometry.rect_for(143, 0).is_ok());
        match geometry.rect_for(0, 144) {
            Err(SheetError::OutOfRange { row, rows, .. }) => {
                assert_eq!(row, 8);
                assert_eq!(rows, 8);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
        assert!(geometry.rect_for(u32::MAX, 1).is_err());
    }

    #[test]
    fn test_unchecked_geometry_errors_instead_of_panicking() {
        let zero_columns = SheetGeometry {
            columns: 0,
            rows: 8,
            width: 64,
            height: 64,
        };
        assert!(matches!(
            zero_columns.rect_for(0, 0),
            Err(SheetError::InvalidGeometry { columns: 0, .. })
        ));
        assert_eq!(zero_columns.cell_width(), 0);

        let zero_width = SheetGeometry {
            columns: 4,
            rows: 1,
            width: 2,
            height: 16,
        };
        assert!(matches!(
            zero_width.rect_for(1, 0),
            Err(SheetError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let geometry = SheetGeometry::new(18, 8, 2304, 1024).unwrap();
        assert_eq!(
            (geometry.columns(), geometry.rows(), geometry.width(), geometry.height()),
            (18, 8, 2304, 1024)
        );
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(SheetGeometry::new(0, 8, 100, 100).is_err());
        assert!(SheetGeometry::new(8, 0, 100, 100).is_err());
        assert!(SheetGeometry::new(8, 8, 0, 100).is_err());
        // 4px wide image cannot hold 8 columns
        assert!(SheetGeometry::new(8, 1, 4, 100).is_err());
    }
}
