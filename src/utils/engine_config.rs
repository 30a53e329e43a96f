use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::utils::{DEFAULT_SIMULATION_PARAMS, DEFAULT_TARGET_FPS, SimulationError};

/// Runtime settings for the headless runner, read from a `key = value` file.
///
/// Recognised keys are `target_fps`, `threads` and `grid_resolution`; each takes a
/// non-negative integer. Lines starting with `#` and blank lines are ignored.
///
/// # Example
/// ```
/// use particle_life::utils::EngineConfig;
///
/// let config: EngineConfig = "# tuned for a laptop\ntarget_fps = 30\nthreads=4\n".parse().unwrap();
/// assert_eq!(config.target_fps, 30);
/// assert_eq!(config.threads, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub target_fps: u32,
    pub threads: usize,
    pub grid_resolution: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            threads: DEFAULT_SIMULATION_PARAMS.workers,
            grid_resolution: DEFAULT_SIMULATION_PARAMS.grid_resolution,
        }
    }
}

impl EngineConfig {
    /// Reads and parses a config file.
    ///
    /// # Errors
    /// Returns `SimulationError::Io` if the file cannot be read and
    /// `SimulationError::InvalidConfig` listing every bad line otherwise.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let text = fs::read_to_string(path)?;
        text.parse()
    }

    /// Frame budget in milliseconds for the configured target rate.
    pub fn frame_budget_ms(&self) -> f64 {
        if self.target_fps == 0 {
            return 0.0;
        }
        1000.0 / self.target_fps as f64
    }
}

/// Splits a line into key and value, dropping every space.
fn line_to_key_value(line: &str) -> (String, String) {
    let mut key = String::new();
    let mut value = String::new();
    let mut reading_key = true;
    for ch in line.chars().filter(|c| !c.is_whitespace()) {
        if ch == '=' && reading_key {
            reading_key = false;
        } else if reading_key {
            key.push(ch);
        } else {
            value.push(ch);
        }
    }
    (key, value)
}

impl FromStr for EngineConfig {
    type Err = SimulationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut config = EngineConfig::default();
        let mut errors = Vec::new();

        for (number, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (key, value) = line_to_key_value(trimmed);
            if key.is_empty() || value.is_empty() {
                errors.push(format!("line {}: can't parse \"{}\"", number + 1, trimmed));
                continue;
            }

            let Ok(parsed) = value.parse::<u32>() else {
                errors.push(format!(
                    "line {}: must be a non-negative integer: \"{}\"",
                    number + 1,
                    value
                ));
                continue;
            };

            match key.as_str() {
                "target_fps" => config.target_fps = parsed,
                "threads" => config.threads = parsed as usize,
                "grid_resolution" => config.grid_resolution = parsed as usize,
                _ => errors.push(format!("line {}: unknown key \"{}\"", number + 1, key)),
            }
        }

        if errors.is_empty() {
            Ok(config)
        } else {
            Err(SimulationError::InvalidConfig(errors))
        }
    }
}
