use crate::data::SheetDescriptor;
use crate::error::{SheetError, SheetResult};
use image::{imageops, ImageFormat, RgbaImage};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// A decoded input frame and the name it is sorted by.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    pub image: RgbaImage,
}

impl SourceImage {
    /// Decode an image file and convert it to RGBA8.
    pub fn load<P: AsRef<Path>>(path: P) -> SheetResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| SheetError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(Self { name, image })
    }
}

/// Cell grid of a composed sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridLayout {
    /// Enough rows to hold `image_count` cells, the last one possibly partial.
    pub fn new(image_count: usize, columns: u32, cell_width: u32, cell_height: u32) -> SheetResult<Self> {
        if columns == 0 {
            return Err(SheetError::InvalidColumns);
        }

        let too_many = SheetError::InvalidGeometry {
            columns,
            rows: u32::MAX,
            width: cell_width,
            height: cell_height,
        };
        let rows = u32::try_from(image_count.div_ceil(columns as usize)).map_err(|_| too_many)?;
        let layout = Self {
            columns,
            rows,
            cell_width,
            cell_height,
        };

        layout.canvas_size().ok_or(SheetError::InvalidGeometry {
            columns,
            rows,
            width: cell_width,
            height: cell_height,
        })?;

        Ok(layout)
    }

    /// Output canvas dimensions, or `None` if they overflow.
    pub fn canvas_size(&self) -> Option<(u32, u32)> {
        Some((
            self.columns.checked_mul(self.cell_width)?,
            self.rows.checked_mul(self.cell_height)?,
        ))
    }

    /// Top-left pixel of the cell for image `index`, row-major.
    pub fn cell_origin(&self, index: u32) -> (u32, u32) {
        let column = index % self.columns;
        let row = index / self.columns;
        (column * self.cell_width, row * self.cell_height)
    }
}

/// A finished sheet plus the order its frames were placed in.
#[derive(Debug)]
pub struct ComposedSheet {
    pub layout: GridLayout,
    pub canvas: RgbaImage,
    pub frames: Vec<String>,
}

impl ComposedSheet {
    /// Describe this sheet for a manifest sidecar.
    pub fn descriptor(&self, name: &str, path: &Path) -> SheetDescriptor {
        let mut descriptor = SheetDescriptor::new(name, path, self.layout.columns, self.layout.rows);
        descriptor.cell_width = Some(self.layout.cell_width);
        descriptor.cell_height = Some(self.layout.cell_height);
        descriptor.frames = self.frames.clone();
        descriptor
    }
}

/// Tile same-sized images into a grid, ordered by name.
///
/// The first image (after sorting) sets the cell size; any image of a
/// different size fails the whole composition. Unused cells stay transparent.
/// `frames` lists the source names in the order they were placed.
pub fn compose(images: &[SourceImage], columns: u32) -> SheetResult<ComposedSheet> {
    let mut ordered: Vec<&SourceImage> = images.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));

    let first = ordered.first().ok_or_else(|| SheetError::NoImages(PathBuf::new()))?;
    let (cell_width, cell_height) = first.image.dimensions();

    for source in &ordered {
        let found = source.image.dimensions();
        if found != (cell_width, cell_height) {
            return Err(SheetError::SizeMismatch {
                name: source.name.clone(),
                expected: (cell_width, cell_height),
                found,
            });
        }
    }

    let layout = GridLayout::new(ordered.len(), columns, cell_width, cell_height)?;
    let (width, height) = layout.canvas_size().unwrap_or_default();
    log::info!(
        "Composing {} images into {}x{} cells ({}x{} px)",
        ordered.len(),
        layout.columns,
        layout.rows,
        width,
        height
    );

    let mut canvas = RgbaImage::new(width, height);
    let mut frames = Vec::with_capacity(ordered.len());
    for (index, source) in ordered.iter().enumerate() {
        let (x, y) = layout.cell_origin(index as u32);
        log::debug!("Placing {} at ({}, {})", source.name, x, y);
        imageops::replace(&mut canvas, &source.image, i64::from(x), i64::from(y));
        frames.push(source.name.clone());
    }

    Ok(ComposedSheet {
        layout,
        canvas,
        frames,
    })
}

/// Regular files directly inside `dir`, sorted by file name. Subdirectories
/// are skipped, and with a `filter` only matching names are kept.
pub fn list_sources(dir: &Path, filter: Option<&Regex>) -> SheetResult<Vec<PathBuf>> {
    let io_error = |source: std::io::Error| SheetError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        let metadata_error = |source: std::io::Error| SheetError::Io {
            path: path.clone(),
            source,
        };

        let mut file_type = entry.file_type().map_err(metadata_error)?;
        if file_type.is_symlink() {
            file_type = fs::metadata(&path).map_err(metadata_error)?.file_type();
        }
        if !file_type.is_file() {
            log::warn!("Skipping {:?}: not a regular file", path);
            continue;
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if filter.map_or(true, |regex| regex.is_match(&name)) {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Write the canvas as PNG, replacing whatever is at `path`.
pub fn save_png(canvas: &RgbaImage, path: &Path) -> SheetResult<()> {
    canvas
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| SheetError::Encode {
            path: path.to_path_buf(),
            source,
        })
}

/// Batch tool: every image in a directory tiled into one sheet.
pub struct GridComposer {
    columns: u32,
    filter: Option<Regex>,
}

impl GridComposer {
    pub fn new(columns: u32) -> SheetResult<Self> {
        if columns == 0 {
            return Err(SheetError::InvalidColumns);
        }
        Ok(Self { columns, filter: None })
    }

    pub fn with_filter(mut self, filter: Regex) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Decode every source image up front, then compose them in memory.
    pub fn compose_directory(&self, dir: &Path) -> SheetResult<ComposedSheet> {
        let paths = list_sources(dir, self.filter.as_ref())?;
        if paths.is_empty() {
            return Err(SheetError::NoImages(dir.to_path_buf()));
        }
        log::info!("Found {} source images in {:?}", paths.len(), dir);

        let images = paths
            .iter()
            .map(SourceImage::load)
            .collect::<SheetResult<Vec<_>>>()?;

        compose(&images, self.columns)
    }

    /// Compose `dir` and write the result to `output` as PNG.
    pub fn run(&self, dir: &Path, output: &Path) -> SheetResult<ComposedSheet> {
        let sheet = self.compose_directory(dir)?;
        save_png(&sheet.canvas, output)?;
        log::info!(
            "Wrote {}x{} sheet to {:?}",
            sheet.canvas.width(),
            sheet.canvas.height(),
            output
        );
        Ok(sheet)
    }
}
