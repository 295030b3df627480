use failure::Error;

use serde_derive::Deserialize;

use std::time::Duration;

/// Settings of the process shell, read from the same file as the core settings
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
  pub frame: Frame,
}

impl Config {
  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Frame {
  pub interval_ms: u64,
  pub input_capacity: usize,
}

impl Frame {
  pub fn interval(&self) -> Duration {
    Duration::from_millis(self.interval_ms.max(1))
  }
}

impl Default for Frame {
  fn default() -> Frame {
    Frame {
      interval_ms: 16,
      input_capacity: 1024,
    }
  }
}

#[cfg(test)]
mod test {

  use super::Config;

  #[test]
  /// Core sections in the same file are ignored here
  pub fn frame_section() {
    let config = Config::from_str(
      r#"
      [grid]
      cols = 80

      [frame]
      interval_ms = 20
      "#,
    )
    .unwrap();
    assert_eq!(config.frame.interval_ms, 20);
    assert_eq!(config.frame.input_capacity, 1024);
  }

  #[test]
  pub fn zero_interval_is_clamped() {
    let config = Config::from_str("[frame]\ninterval_ms = 0").unwrap();
    assert_eq!(config.frame.interval().as_millis(), 1);
  }
}
