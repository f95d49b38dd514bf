use crate::animation::AnimationTrack;
use crate::data::SheetGeometry;
use crate::error::{SheetError, SheetResult};

/// Number of facing sectors, 45 degrees each.
pub const DIRECTION_COUNT: usize = 8;

/// One animation track per facing direction, cut from a single sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionSet {
    tracks: Vec<AnimationTrack>,
}

impl DirectionSet {
    /// Split the sheet into `direction_count` tracks of `frames_per_track`
    /// cells each; track `i` starts at cell `i * frames_per_track`.
    pub fn build(
        geometry: &SheetGeometry,
        frames_per_track: u32,
        direction_count: usize,
    ) -> SheetResult<Self> {
        let tracks = (0..direction_count)
            .map(|direction| {
                let offset = (direction as u32).checked_mul(frames_per_track).ok_or(
                    SheetError::IndexOutOfRange {
                        index: direction,
                        len: direction_count,
                    },
                )?;
                AnimationTrack::build(geometry, offset, frames_per_track)
            })
            .collect::<SheetResult<Vec<_>>>()?;

        Ok(Self { tracks })
    }

    /// The usual layout: one row per direction, every column a frame.
    pub fn from_rows(geometry: &SheetGeometry) -> SheetResult<Self> {
        Self::build(geometry, geometry.columns(), geometry.rows() as usize)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track_for(&self, direction: usize) -> SheetResult<&AnimationTrack> {
        self.tracks.get(direction).ok_or(SheetError::IndexOutOfRange {
            index: direction,
            len: self.tracks.len(),
        })
    }
}
