use crate::error::{SheetError, SheetResult};
use crate::input::HeldKeys;
use once_cell::sync::Lazy;
use regex::Regex;

/// `<keys>:<seconds>`, keys being any run of W/A/S/D (possibly empty)
static STEP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([wasdWASD]*)\s*:\s*([0-9]+(?:\.[0-9]*)?|\.[0-9]+)\s*$")
        .expect("key script pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub keys: HeldKeys,
    pub duration: f32,
}

/// Timed sequence of held keys that stands in for a live keyboard,
/// e.g. `"d:0.5,wd:1,:0.5"` walks right, then up-right, then stands still.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyScript {
    steps: Vec<ScriptStep>,
}

impl KeyScript {
    pub fn parse(script: &str) -> SheetResult<Self> {
        let steps = script
            .split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| {
                let captures = STEP_PATTERN
                    .captures(entry)
                    .ok_or_else(|| SheetError::InvalidScript(entry.to_string()))?;

                let keys = HeldKeys::parse(&captures[1])?;
                let duration = captures[2]
                    .parse::<f32>()
                    .map_err(|_| SheetError::InvalidScript(entry.to_string()))?;

                Ok(ScriptStep { keys, duration })
            })
            .collect::<SheetResult<Vec<_>>>()?;

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Total length of the script in seconds
    pub fn duration(&self) -> f32 {
        self.steps.iter().map(|step| step.duration).sum()
    }

    /// Keys held at `time` seconds; nothing is held once the script ends.
    pub fn keys_at(&self, time: f32) -> HeldKeys {
        let mut start = 0.0;
        for step in &self.steps {
            let end = start + step.duration;
            if time >= start && time < end {
                return step.keys;
            }
            start = end;
        }
        HeldKeys::default()
    }
}
