use crate::data::{FrameRect, SheetGeometry};
use crate::error::{SheetError, SheetResult};

/// Looping sequence of sheet cells, sampled by time.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTrack {
    frames: Vec<FrameRect>,
}

impl AnimationTrack {
    /// Take `frame_count` consecutive cells of the sheet starting at `offset`.
    pub fn build(geometry: &SheetGeometry, offset: u32, frame_count: u32) -> SheetResult<Self> {
        let frames = (0..frame_count)
            .map(|index| geometry.rect_for(index, offset))
            .collect::<SheetResult<Vec<_>>>()?;

        Self::from_frames(frames)
    }

    pub fn from_frames(frames: Vec<FrameRect>) -> SheetResult<Self> {
        if frames.is_empty() {
            return Err(SheetError::EmptyTrack);
        }
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[FrameRect] {
        &self.frames
    }

    /// Index of the frame shown at `time`.
    ///
    /// `time` is in track lengths: one unit plays every frame once. Values
    /// above one wrap around, negative values (and NaN) stick to frame 0.
    pub fn frame_index(&self, time: f32) -> usize {
        let len = self.frames.len();
        let scaled = (len as f32 * time).max(0.0);
        scaled as usize % len
    }

    /// Frame shown at `time`; a step function, no blending between frames.
    pub fn sample(&self, time: f32) -> FrameRect {
        self.frames[self.frame_index(time)]
    }
}
