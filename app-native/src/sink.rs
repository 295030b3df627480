use log::info;

use vimdaw_core::playback::NoteSink;
use vimdaw_core::song::notes::Note;
use vimdaw_core::view::pitch_label;

/// Stands in for a synthesizer by logging what it would play
#[derive(Default)]
pub struct LogSink {
  sounding: usize,
}

impl LogSink {
  pub fn new() -> LogSink {
    LogSink::default()
  }
}

impl NoteSink for LogSink {
  fn note_on(&mut self, note: &Note) {
    self.sounding += 1;
    info!(
      "Note on  {} steps {}..{} ({} sounding)",
      pitch_label(note.pitch()),
      note.start(),
      note.end(),
      self.sounding
    );
  }

  fn note_off(&mut self, note: &Note) {
    self.sounding = self.sounding.saturating_sub(1);
    info!(
      "Note off {} steps {}..{} ({} sounding)",
      pitch_label(note.pitch()),
      note.start(),
      note.end(),
      self.sounding
    );
  }
}
