use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by sheet indexing, animation lookup and sheet composition.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("invalid sheet geometry: {columns}x{rows} cells over a {width}x{height} image")]
    InvalidGeometry {
        columns: u32,
        rows: u32,
        width: u32,
        height: u32,
    },

    #[error("frame {index} lands on row {row} but the sheet only has {rows} rows")]
    OutOfRange { index: u32, row: u32, rows: u32 },

    #[error("index {index} is outside 0..{len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("an animation track needs at least one frame")]
    EmptyTrack,

    #[error("column count must be positive")]
    InvalidColumns,

    #[error("no source images found in {0:?}")]
    NoImages(PathBuf),

    #[error("{name} is {found:?} but the first image is {expected:?}")]
    SizeMismatch {
        name: String,
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("I/O failure on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image {path:?}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("bad sheet manifest {path:?}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bad key script entry {0:?}")]
    InvalidScript(String),
}

pub type SheetResult<T> = Result<T, SheetError>;
