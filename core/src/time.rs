use crate::config::Playback as PlaybackConfig;
use crate::grid::Step;

pub type Seconds = f64;

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Beats per minute
#[derive(Debug, Clone, Copy)]
pub struct Tempo(u16);

impl Tempo {
  pub fn new(value: u16) -> Tempo {
    Tempo(value)
  }

  pub fn get_value(&self) -> u16 {
    self.0
  }
}

impl From<Tempo> for f64 {
  fn from(item: Tempo) -> Self {
    f64::from(item.0)
  }
}

/// Converts between seconds and grid steps at a fixed tempo
#[derive(Debug, Clone, Copy)]
pub struct StepClock {
  tempo: Tempo,
  steps_per_beat: u16,
  steps_per_second: f64,
}

impl StepClock {
  pub fn new(tempo: Tempo, steps_per_beat: u16) -> StepClock {
    let steps_per_beat = steps_per_beat.max(1);
    let steps_per_second = f64::from(tempo) / SECONDS_PER_MINUTE * f64::from(steps_per_beat);
    StepClock {
      tempo,
      steps_per_beat,
      steps_per_second,
    }
  }

  pub fn from_config(config: &PlaybackConfig) -> StepClock {
    StepClock::new(Tempo::new(config.tempo), config.steps_per_beat)
  }

  pub fn tempo(&self) -> Tempo {
    self.tempo
  }

  pub fn steps_per_beat(&self) -> u16 {
    self.steps_per_beat
  }

  pub fn steps_per_second(&self) -> f64 {
    self.steps_per_second
  }

  pub fn to_steps(&self, seconds: Seconds) -> f64 {
    seconds * self.steps_per_second
  }

  /// The step being played at `seconds`
  pub fn step_at(&self, seconds: Seconds) -> Step {
    self.to_steps(seconds).floor() as Step
  }

  pub fn to_seconds(&self, step: Step) -> Seconds {
    if self.steps_per_second > 0.0 {
      f64::from(step) / self.steps_per_second
    } else {
      0.0
    }
  }
}
