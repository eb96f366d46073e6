use std::{env, ops::RangeInclusive, str::FromStr, time::Duration};

use thiserror::Error;

pub const DEFAULT_WIDTH: usize = 16;
pub const DEFAULT_HEIGHT: usize = 12;
pub const DEFAULT_STEPS_PER_SECOND: u32 = 20;

const SIZE_RANGE: RangeInclusive<u64> = 1..=64;
const SPEED_RANGE: RangeInclusive<u64> = 1..=1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid number")]
    NotANumber { var: &'static str, value: String },
    #[error("{var}={value} is out of range (expected {min}..={max})")]
    OutOfRange {
        var: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub steps_per_second: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            steps_per_second: DEFAULT_STEPS_PER_SECOND,
        }
    }
}

impl Config {
    /// Reads `MAZE_*` variables from the environment, after loading a `.env`
    /// file from the working directory if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let width = read(&lookup, "MAZE_WIDTH")?.unwrap_or(defaults.width);
        check_range("MAZE_WIDTH", width as u64, &SIZE_RANGE)?;

        let height = read(&lookup, "MAZE_HEIGHT")?.unwrap_or(defaults.height);
        check_range("MAZE_HEIGHT", height as u64, &SIZE_RANGE)?;

        let seed = read(&lookup, "MAZE_SEED")?;

        let steps_per_second =
            read(&lookup, "MAZE_STEPS_PER_SECOND")?.unwrap_or(defaults.steps_per_second);
        check_range("MAZE_STEPS_PER_SECOND", steps_per_second.into(), &SPEED_RANGE)?;

        Ok(Self {
            width,
            height,
            seed,
            steps_per_second,
        })
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_secs(1) / self.steps_per_second
    }
}

fn read<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::NotANumber { var, value })
}

fn check_range(
    var: &'static str,
    value: u64,
    range: &RangeInclusive<u64>,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            var,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
