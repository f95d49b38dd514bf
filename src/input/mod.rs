pub mod motion;

pub use motion::{
    facing_bucket, integrate_position, sector_bucket, update, FacingConvention, HeldKeys, Key,
    Motion, MotionState, DEFAULT_SPEED,
};
