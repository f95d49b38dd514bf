pub mod clock;
pub mod directional;
pub mod player;
pub mod track;

pub use clock::FrameClock;
pub use directional::{DirectionSet, DIRECTION_COUNT};
pub use player::{PlayerAnimator, PlayerFrame, SheetKind};
pub use track::AnimationTrack;
