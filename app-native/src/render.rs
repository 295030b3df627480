use log::debug;

use vimdaw_core::view::Frame;

pub trait Renderer {
  fn render(&mut self, frame: &Frame);
}

/// Logs a frame whenever it differs from the previous one
#[derive(Default)]
pub struct LogRenderer {
  last: Option<Frame>,
  logged: usize,
}

impl LogRenderer {
  pub fn new() -> LogRenderer {
    LogRenderer::default()
  }

  pub fn frames_logged(&self) -> usize {
    self.logged
  }
}

impl Renderer for LogRenderer {
  fn render(&mut self, frame: &Frame) {
    if self.last.as_ref() == Some(frame) {
      return;
    }

    debug!("{}", frame.tabs);
    debug!(
      "{} notes, cursor {:?}, playback at x={:.1}{}",
      frame.notes.len(),
      frame.cursor,
      frame.playback_x,
      if frame.playing { " (playing)" } else { "" }
    );
    debug!("{}", frame.status);
    if !frame.mode.is_empty() {
      debug!("{}", frame.mode);
    }

    self.logged += 1;
    self.last = Some(frame.clone());
  }
}
