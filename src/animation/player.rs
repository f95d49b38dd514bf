use crate::animation::DirectionSet;
use crate::data::FrameRect;
use crate::error::SheetResult;
use crate::input::{FacingConvention, HeldKeys, MotionState, DEFAULT_SPEED};

/// Which of the player's sheets a frame was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Walk,
    Idle,
}

/// Everything a renderer needs to draw the player for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerFrame {
    pub sheet: SheetKind,
    pub rect: FrameRect,
    pub position: [f32; 2],
    pub facing: usize,
}

/// Drives the player each tick: keys -> motion -> facing track -> frame.
pub struct PlayerAnimator {
    walk: DirectionSet,
    idle: DirectionSet,
    convention: FacingConvention,
    speed: f32,
    state: MotionState,
}

impl PlayerAnimator {
    pub fn new(walk: DirectionSet, idle: DirectionSet) -> Self {
        Self {
            walk,
            idle,
            convention: FacingConvention::default(),
            speed: DEFAULT_SPEED,
            state: MotionState::default(),
        }
    }

    pub fn with_convention(mut self, convention: FacingConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Advance one tick. `time` is the raw elapsed time in seconds used to
    /// sample the looping track, `dt` the time since the previous tick.
    pub fn tick(&mut self, keys: &HeldKeys, time: f32, dt: f32) -> SheetResult<PlayerFrame> {
        self.state.advance(keys, self.convention, self.speed, dt);

        let (sheet, set) = if self.state.is_moving {
            (SheetKind::Walk, &self.walk)
        } else {
            (SheetKind::Idle, &self.idle)
        };

        let rect = set.track_for(self.state.facing)?.sample(time);
        log::debug!(
            "tick t={:.3} sheet={:?} facing={} rect={:?} pos={:?}",
            time,
            sheet,
            self.state.facing,
            rect,
            self.state.position
        );

        Ok(PlayerFrame {
            sheet,
            rect,
            position: self.state.position,
            facing: self.state.facing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SheetGeometry;
    use crate::input::Key;

    const CELL: u32 = 10;

    fn animator() -> PlayerAnimator {
        let walk = SheetGeometry::new(18, 8, 18 * CELL, 8 * CELL).unwrap();
        let idle = SheetGeometry::new(1, 8, CELL, 8 * CELL).unwrap();
        PlayerAnimator::new(
            DirectionSet::from_rows(&walk).unwrap(),
            DirectionSet::from_rows(&idle).unwrap(),
        )
    }

    #[test]
    fn test_idle_at_start() {
        let mut player = animator();
        let frame = player.tick(&HeldKeys::default(), 0.0, 0.0).unwrap();

        assert_eq!(frame.sheet, SheetKind::Idle);
        assert_eq!(frame.facing, 0);
        assert_eq!(frame.rect, FrameRect { x: 0, y: 0, width: CELL, height: CELL });
        assert_eq!(frame.position, [0.0, 0.0]);
    }

    #[test]
    fn test_walking_uses_facing_row() {
        let mut player = animator();
        let down = HeldKeys::from_keys([Key::Down]);

        // 18 frames loop once per second; 0.5s is frame 9
        let frame = player.tick(&down, 0.5, 0.1).unwrap();
        assert_eq!(frame.sheet, SheetKind::Walk);
        assert_eq!(frame.facing, 1);
        assert_eq!(frame.rect.x, 9 * CELL);
        assert_eq!(frame.rect.y, CELL);
        assert!((frame.position[1] - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_stopping_keeps_facing() {
        let mut player = animator();

        player.tick(&HeldKeys::from_keys([Key::Up]), 0.0, 0.1).unwrap();
        let frame = player.tick(&HeldKeys::default(), 3.7, 0.1).unwrap();

        assert_eq!(frame.sheet, SheetKind::Idle);
        assert_eq!(frame.facing, 5);
        assert_eq!(frame.rect.y, 5 * CELL);
        assert!(!player.state().is_moving);
    }

    #[test]
    fn test_sector_convention_and_speed() {
        let mut player = animator()
            .with_convention(FacingConvention::Sector)
            .with_speed(100.0);

        let frame = player.tick(&HeldKeys::from_keys([Key::Right]), 0.0, 1.0).unwrap();
        assert_eq!(frame.facing, 0);
        assert_eq!(frame.position, [100.0, 0.0]);
    }
}
