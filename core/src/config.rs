use failure::{Error, Fail};

use serde_derive::Deserialize;

use std::time::Duration;

#[derive(Debug, Fail)]
pub enum ConfigError {
  #[fail(display = "Invalid configuration: {}", cause)]
  Invalid { cause: String },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Grid {
  pub cols: i32,
  pub rows: i32,
  pub status_rows: i32,
  pub left_margin: i32,
  pub pitch_offset: i32,
}

impl Default for Grid {
  fn default() -> Grid {
    Grid {
      cols: 66,
      rows: 40,
      status_rows: 3,
      left_margin: 2,
      pitch_offset: 44,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Display {
  pub width: f32,
  pub height: f32,
  pub blink_interval_ms: u64,
  pub move_reset_ms: u64,
}

impl Default for Display {
  fn default() -> Display {
    Display {
      width: 1920.0,
      height: 1080.0,
      blink_interval_ms: 500,
      move_reset_ms: 500,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Buffer {
  pub time_bucket_width: i32,
  pub pitch_bucket_height: i32,
  pub lookahead_steps: i32,
}

impl Default for Buffer {
  fn default() -> Buffer {
    Buffer {
      time_bucket_width: 16,
      pitch_bucket_height: 127,
      lookahead_steps: 2,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Playback {
  pub tempo: u16,
  pub steps_per_beat: u16,
  pub tick_interval_ms: u64,
  /// Number of steps after which playback wraps around, the grid width when unset
  pub loop_steps: Option<i32>,
}

impl Default for Playback {
  fn default() -> Playback {
    Playback {
      tempo: 120,
      steps_per_beat: 4,
      tick_interval_ms: 5,
      loop_steps: None,
    }
  }
}

impl Playback {
  pub fn tick_interval(&self) -> Duration {
    Duration::from_millis(self.tick_interval_ms.max(1))
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
  pub grid: Grid,
  pub display: Display,
  pub buffer: Buffer,
  pub playback: Playback,
}

impl Default for Config {
  fn default() -> Config {
    Config {
      grid: Grid::default(),
      display: Display::default(),
      buffer: Buffer::default(),
      playback: Playback::default(),
    }
  }
}

impl Config {
  /// Parses and validates a toml document. Sections and keys left out keep their defaults.
  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    config.validate()?;
    Ok(config)
  }

  /// Checks that the grid leaves room for at least one note cell, and that the
  /// buffer and playback settings are usable
  pub fn validate(&self) -> Result<(), ConfigError> {
    let grid = &self.grid;
    let checks = [
      (grid.left_margin >= 0, "grid.left_margin must not be negative"),
      (grid.status_rows >= 0, "grid.status_rows must not be negative"),
      (
        grid.cols > grid.left_margin,
        "grid.cols must be greater than grid.left_margin",
      ),
      (
        grid.rows > grid.status_rows,
        "grid.rows must be greater than grid.status_rows",
      ),
      (self.display.width > 0.0, "display.width must be positive"),
      (self.display.height > 0.0, "display.height must be positive"),
      (
        self.buffer.time_bucket_width > 0,
        "buffer.time_bucket_width must be positive",
      ),
      (
        self.buffer.pitch_bucket_height > 0,
        "buffer.pitch_bucket_height must be positive",
      ),
      (
        self.buffer.lookahead_steps >= 0,
        "buffer.lookahead_steps must not be negative",
      ),
      (self.playback.tempo > 0, "playback.tempo must be positive"),
      (self.playback.steps_per_beat > 0, "playback.steps_per_beat must be positive"),
      (
        self.playback.loop_steps.map_or(true, |steps| steps > 0),
        "playback.loop_steps must be positive",
      ),
    ];

    match checks.iter().find(|(valid, _)| !valid) {
      Some((_, cause)) => Err(ConfigError::Invalid {
        cause: (*cause).to_string(),
      }),
      None => Ok(()),
    }
  }

  pub fn loop_steps(&self) -> i32 {
    self
      .playback
      .loop_steps
      .unwrap_or(self.grid.cols - self.grid.left_margin)
  }
}

#[cfg(test)]
mod test {

  use super::Config;

  #[test]
  /// An empty document should produce the defaults
  pub fn config_from_empty_str() {
    let config = Config::from_str("").unwrap();
    assert_eq!(config.grid.cols, 66);
    assert_eq!(config.grid.rows, 40);
    assert_eq!(config.grid.pitch_offset, 44);
    assert_eq!(config.buffer.time_bucket_width, 16);
    assert_eq!(config.playback.tempo, 120);
    assert_eq!(config.loop_steps(), 64);
  }

  #[test]
  /// Partial sections should keep the defaults for the missing keys
  pub fn config_from_partial_str() {
    let content = r#"
      [grid]
      cols = 34
      rows = 20

      [playback]
      tempo = 90
      loop_steps = 16
    "#;
    let config = Config::from_str(content).unwrap();
    assert_eq!(config.grid.cols, 34);
    assert_eq!(config.grid.rows, 20);
    assert_eq!(config.grid.left_margin, 2);
    assert_eq!(config.playback.tempo, 90);
    assert_eq!(config.playback.steps_per_beat, 4);
    assert_eq!(config.loop_steps(), 16);
  }

  #[test]
  pub fn config_from_invalid_str() {
    assert!(Config::from_str("[grid]\ncols = \"wide\"").is_err());
  }

  #[test]
  /// A grid without a single note cell is rejected
  pub fn config_without_note_cells() {
    assert!(Config::from_str("[grid]\nrows = 3\ncols = 2").is_err());
    assert!(Config::from_str("[grid]\nrows = 3").is_err());
    assert!(Config::from_str("[grid]\ncols = 2").is_err());
    assert!(Config::from_str("[grid]\nrows = 4\ncols = 3").is_ok());
  }

  #[test]
  pub fn config_with_unusable_settings() {
    assert!(Config::from_str("[buffer]\ntime_bucket_width = 0").is_err());
    assert!(Config::from_str("[buffer]\npitch_bucket_height = -1").is_err());
    assert!(Config::from_str("[playback]\ntempo = 0").is_err());
    assert!(Config::from_str("[playback]\nloop_steps = 0").is_err());
    assert!(Config::default().validate().is_ok());
  }
}
