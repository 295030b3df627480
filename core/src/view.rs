use crate::config::Display as DisplayConfig;
use crate::editor::{Editor, Mode};
use crate::grid::{Pitch, Rect, Row};
use crate::time::{Seconds, StepClock};

pub const NOTE_NAMES: [&str; 12] = [
  "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const ROLL_NAME: &str = "roll1";
const TABS: &str = "[project1] 1:roll1*";
const VISUAL_MODE: &str = "-- VISUAL --";

/// Scientific pitch notation, 60 is C4
pub fn pitch_label(pitch: Pitch) -> String {
  let name = NOTE_NAMES[pitch.rem_euclid(12) as usize];
  format!("{}{}", name, pitch.div_euclid(12) - 1)
}

pub fn is_black_key(pitch: Pitch) -> bool {
  NOTE_NAMES[pitch.rem_euclid(12) as usize].ends_with('#')
}

/// Keeps the cursor steady while it moves, and blinking once it rests
pub struct CursorBlink {
  blink_interval: u64,
  move_reset: u64,
  visible: bool,
  last_toggle: u64,
  last_moved: u64,
}

impl CursorBlink {
  pub fn new(config: &DisplayConfig) -> CursorBlink {
    CursorBlink {
      blink_interval: config.blink_interval_ms,
      move_reset: config.move_reset_ms,
      visible: true,
      last_toggle: 0,
      last_moved: 0,
    }
  }

  pub fn moved(&mut self, now_ms: u64) {
    self.visible = true;
    self.last_moved = now_ms;
  }

  /// Visibility at `now_ms`
  pub fn update(&mut self, now_ms: u64) -> bool {
    if now_ms.saturating_sub(self.last_moved) >= self.move_reset {
      if now_ms.saturating_sub(self.last_toggle) >= self.blink_interval {
        self.visible = !self.visible;
        self.last_toggle = now_ms;
      }
    } else {
      self.visible = true;
    }
    self.visible
  }
}

#[derive(Debug, PartialEq, Clone)]
pub struct PitchLabel {
  pub row: Row,
  pub pitch: Pitch,
  pub text: String,
  pub black: bool,
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, PartialEq, Clone)]
pub struct Frame {
  pub notes: Vec<Rect>,
  pub cursor: Option<Rect>,
  pub labels: Vec<PitchLabel>,
  pub status: String,
  pub mode: String,
  pub tabs: String,
  pub playing: bool,
  pub playback_x: f32,
}

impl Frame {
  pub fn new(
    editor: &Editor,
    cursor_visible: bool,
    playing: bool,
    position: Seconds,
    clock: &StepClock,
  ) -> Frame {
    let grid = editor.grid();
    let cursor = editor.cursor();

    let cursor_rect = match editor.mode() {
      Mode::Normal => grid.cell_rect(cursor.col, cursor.row),
      Mode::Visual { anchor } => grid.span_rect(anchor.col, anchor.row, cursor.col, cursor.row),
    };

    let labels = (0..=grid.max_row())
      .map(|row| {
        let pitch = grid.domain_pitch(row);
        PitchLabel {
          row,
          pitch,
          text: pitch_label(pitch),
          black: is_black_key(pitch),
        }
      })
      .collect();

    let padding = (grid.cols() as usize).saturating_sub(ROLL_NAME.len());
    let status = format!(
      "{}{}{},{}",
      ROLL_NAME,
      " ".repeat(padding),
      cursor.row + 1,
      grid.domain_start(cursor.col) + 1
    );

    let mode = if editor.mode().is_visual() {
      VISUAL_MODE.to_string()
    } else {
      String::new()
    };

    Frame {
      notes: editor.dirty_regions().iter().map(|region| region.rect).collect(),
      cursor: if cursor_visible { Some(cursor_rect) } else { None },
      labels,
      status,
      mode,
      tabs: TABS.to_string(),
      playing,
      playback_x: grid.step_x(clock.to_steps(position)),
    }
  }
}

#[cfg(test)]
mod test {

  use super::{is_black_key, pitch_label, CursorBlink, Frame};
  use crate::config::{Buffer, Display, Grid};
  use crate::editor::{Command, Editor, Motion};
  use crate::grid::{GridMapper, Rect};
  use crate::song::Song;
  use crate::time::{StepClock, Tempo};

  #[test]
  pub fn pitch_labels() {
    assert_eq!(pitch_label(60), "C4");
    assert_eq!(pitch_label(80), "G#5");
    assert_eq!(pitch_label(44), "G#2");
    assert_eq!(pitch_label(21), "A0");
    assert!(is_black_key(80));
    assert!(!is_black_key(60));
  }

  #[test]
  /// The cursor stays visible right after a move, then blinks at a steady pace
  pub fn cursor_blink() {
    let mut blink = CursorBlink::new(&Display::default());
    blink.moved(1000);
    assert!(blink.update(1200));
    assert!(blink.update(1499));
    assert!(!blink.update(1500));
    assert!(!blink.update(1900));
    assert!(blink.update(2000));
    blink.moved(2100);
    assert!(blink.update(2200));
  }

  #[test]
  pub fn frame_contents() {
    let display = Display {
      width: 660.0,
      height: 400.0,
      ..Display::default()
    };
    let grid = GridMapper::new(&Grid::default(), &display);
    let mut editor = Editor::new(grid, Song::new_lock(&Buffer::default()));
    let clock = StepClock::new(Tempo::new(120), 4);

    editor.apply(Command::Commit).unwrap();
    editor.apply(Command::Move(Motion::Down)).unwrap();
    editor.apply(Command::ToggleVisual).unwrap();
    editor.apply(Command::Move(Motion::Right)).unwrap();

    let frame = Frame::new(&editor, true, true, 0.5, &clock);
    assert_eq!(frame.notes, vec![Rect::new(21.0, 1.0, 8.0, 8.0)]);
    assert_eq!(frame.cursor, Some(Rect::new(20.0, 10.0, 20.0, 10.0)));
    assert_eq!(frame.mode, "-- VISUAL --");
    assert!(frame.status.starts_with("roll1 "));
    assert!(frame.status.ends_with("2,2"));
    assert_eq!(frame.status.len(), 66 + 3);
    assert_eq!(frame.labels.len(), 37);
    assert_eq!(frame.labels[0].text, "G#5");
    assert_eq!(frame.playback_x, 60.0);

    let hidden = Frame::new(&editor, false, false, 0.0, &clock);
    assert_eq!(hidden.cursor, None);
    assert_eq!(hidden.playback_x, 20.0);
  }
}
