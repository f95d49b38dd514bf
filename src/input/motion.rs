use crate::error::{SheetError, SheetResult};

/// Walking speed in pixels per second.
pub const DEFAULT_SPEED: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// W/A/S/D mapping, case-insensitive.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Key::Up),
            'a' => Some(Key::Left),
            's' => Some(Key::Down),
            'd' => Some(Key::Right),
            _ => None,
        }
    }
}

/// Which directional keys are currently down. Owned by the update loop and
/// flipped by key press/release events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl HeldKeys {
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut held = Self::default();
        for key in keys {
            held.press(key);
        }
        held
    }

    /// Parse a run of W/A/S/D characters, e.g. `"wd"` for up-right.
    pub fn parse(keys: &str) -> SheetResult<Self> {
        keys.chars()
            .map(|c| Key::from_char(c).ok_or_else(|| SheetError::InvalidScript(keys.to_string())))
            .collect::<SheetResult<Vec<_>>>()
            .map(Self::from_keys)
    }

    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Result of reading the keys for one tick. `direction` is y-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub direction: [f32; 2],
    pub is_moving: bool,
}

/// Turn held keys into a unit (or zero) direction vector.
pub fn update(keys: &HeldKeys) -> Motion {
    let axis = |positive: Key, negative: Key| -> f32 {
        let mut value = 0.0;
        if keys.is_held(positive) {
            value += 1.0;
        }
        if keys.is_held(negative) {
            value -= 1.0;
        }
        value
    };

    let x = axis(Key::Right, Key::Left);
    let y = axis(Key::Up, Key::Down);
    let len = (x * x + y * y).sqrt();

    if len == 0.0 {
        return Motion {
            direction: [0.0, 0.0],
            is_moving: false,
        };
    }

    Motion {
        direction: [x / len, y / len],
        is_moving: true,
    }
}

/// How a direction vector is bucketed into one of eight facings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FacingConvention {
    /// Row order of the stock walk/idle sheets: 0 = down-right, then
    /// clockwise, so down = 1, left = 3, up = 5, right = 7.
    #[default]
    Legacy,
    /// 0 = right, then counter-clockwise in 45 degree steps; each sector is
    /// centred on its direction.
    Sector,
}

impl FacingConvention {
    pub fn bucket(&self, direction: [f32; 2]) -> usize {
        match self {
            FacingConvention::Legacy => facing_bucket(direction),
            FacingConvention::Sector => sector_bucket(direction),
        }
    }
}

/// Facing bucket matching the stock sheets, computed exactly in
/// f32: an acos angle in degrees (negated when y points up), truncated,
/// wrapped into [0, 360), divided into 45 degree sectors and rotated by 7.
pub fn facing_bucket(direction: [f32; 2]) -> usize {
    let [x, y] = direction;
    let sign = if y > 0.0 { -1.0_f32 } else { 1.0 };
    let angle = (f64::from(x).acos() as f32) * sign * 180.0 / std::f64::consts::PI as f32;
    let degrees = angle as i32;

    (((degrees + 360).rem_euclid(360) / 45 + 7) % 8) as usize
}

/// atan2 facing: 0 = right, counter-clockwise, sectors centred on the axes
/// and diagonals.
pub fn sector_bucket(direction: [f32; 2]) -> usize {
    let [x, y] = direction;
    let sector = (y.atan2(x) / std::f32::consts::FRAC_PI_4).round() as i32;
    sector.rem_euclid(8) as usize
}

/// Move `position` along `direction`. Screen y grows downward, so the y-up
/// input vector is flipped on the way in.
pub fn integrate_position(position: [f32; 2], direction: [f32; 2], speed: f32, dt: f32) -> [f32; 2] {
    [
        position[0] + direction[0] * speed * dt,
        position[1] - direction[1] * speed * dt,
    ]
}

/// Per-tick player state. Facing is kept while standing still.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    pub position: [f32; 2],
    pub facing: usize,
    pub is_moving: bool,
}

impl MotionState {
    /// Read the keys, then turn and move if any direction is held.
    pub fn advance(
        &mut self,
        keys: &HeldKeys,
        convention: FacingConvention,
        speed: f32,
        dt: f32,
    ) -> Motion {
        let motion = update(keys);
        self.is_moving = motion.is_moving;

        if motion.is_moving {
            self.facing = convention.bucket(motion.direction);
            self.position = integrate_position(self.position, motion.direction, speed, dt);
        }

        motion
    }
}
