use log::trace;

use crate::config::Config;
use crate::grid::Step;
use crate::song::{notes::Note, Song};
use crate::time::{Seconds, StepClock};

/// The engine that actually makes the sound
pub trait NoteSink {
  fn note_on(&mut self, note: &Note);
  fn note_off(&mut self, note: &Note);
}

/// Decides which notes start and stop as the playback time moves forward.
///
/// Notes are looked up through the song buffers around the next step to be played,
/// and triggered when their start falls between that step and the current one.
/// A note added ahead of the playhead is therefore picked up when the playhead
/// reaches it, no matter when it was added.
pub struct Sequencer {
  clock: StepClock,
  lookahead: Step,
  loop_steps: Step,
  next_step: Step,
  lap: u64,
  active: Vec<Note>,
}

impl Sequencer {
  pub fn new(clock: StepClock, lookahead: Step, loop_steps: Step) -> Sequencer {
    Sequencer {
      clock,
      lookahead: lookahead.max(0),
      loop_steps: loop_steps.max(0),
      next_step: 0,
      lap: 0,
      active: Vec::new(),
    }
  }

  pub fn from_config(config: &Config) -> Sequencer {
    Sequencer::new(
      StepClock::from_config(&config.playback),
      config.buffer.lookahead_steps,
      config.loop_steps(),
    )
  }

  pub fn clock(&self) -> &StepClock {
    &self.clock
  }

  pub fn next_step(&self) -> Step {
    self.next_step
  }

  pub fn active_notes(&self) -> &[Note] {
    &self.active
  }

  pub fn loop_duration(&self) -> Seconds {
    self.clock.to_seconds(self.loop_steps)
  }

  /// Plays the song up to `elapsed` seconds since playback started, wrapping around
  /// at the loop end. Returns the position within the loop.
  pub fn advance<S: NoteSink>(&mut self, song: &Song, elapsed: Seconds, sink: &mut S) -> Seconds {
    let loop_duration = self.loop_duration();
    let (lap, position) = if loop_duration > 0.0 {
      ((elapsed / loop_duration).floor() as u64, elapsed % loop_duration)
    } else {
      (0, elapsed)
    };

    if lap != self.lap {
      trace!("Loop {} starts", lap);
      if self.loop_steps > 0 {
        self.play_to(song, self.loop_steps - 1, sink);
      }
      self.reset(sink);
      self.lap = lap;
    }

    self.tick(song, position, sink);
    position
  }

  /// Releases the notes that ended and triggers the ones due at `time`.
  /// Returns the current step.
  pub fn tick<S: NoteSink>(&mut self, song: &Song, time: Seconds, sink: &mut S) -> Step {
    let now = self.clock.step_at(time);
    self.play_to(song, now, sink);
    now
  }

  /// Releases the notes ended by step `now` and triggers every note starting
  /// from the next step up to `now`, inclusive
  fn play_to<S: NoteSink>(&mut self, song: &Song, now: Step, sink: &mut S) {
    self.active.retain(|note| {
      if note.end() <= now {
        sink.note_off(note);
        false
      } else {
        true
      }
    });

    if now >= self.next_step {
      let window = self.lookahead.max(now - self.next_step);
      let from = self.next_step;
      let due = song
        .fetch(from, window)
        .into_iter()
        .filter(|note| from <= note.start() && note.start() <= now);

      for note in due {
        trace!("Note on {:?} at step {}", note, now);
        sink.note_on(&note);
        self.active.push(note);
      }
      self.next_step = now + 1;
    }
  }

  /// Releases every active note and rewinds to the first step
  pub fn reset<S: NoteSink>(&mut self, sink: &mut S) {
    self.release(sink);
    self.next_step = 0;
    self.lap = 0;
  }

  /// Releases every active note, keeping the position
  pub fn release<S: NoteSink>(&mut self, sink: &mut S) {
    for note in self.active.drain(..) {
      sink.note_off(&note);
    }
  }
}
