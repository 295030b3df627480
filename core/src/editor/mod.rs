pub mod cursor;

use failure::Fail;
use log::debug;

use crate::dirty::DirtyRegions;
use crate::grid::{GridMapper, Pitch, Step};
use crate::song::{notes::Note, Song, SongLock};

pub use self::cursor::{Cursor, Mode, Motion};

#[derive(Debug, Fail)]
pub enum EditorError {
  #[fail(display = "Unable to lock the song")]
  SongLock,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
  Move(Motion),
  ToggleVisual,
  ExitVisual,
  Commit,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Outcome {
  Moved(Cursor),
  ModeChanged(Mode),
  Inserted(Note),
  Removed(Note),

  /// A visual span would have overlapped an existing note
  Aborted,

  Unchanged,
}

/// An editing session: the cursor, the mode and the regions to repaint,
/// working on a song shared with the playback worker.
pub struct Editor {
  grid: GridMapper,
  song: SongLock,
  cursor: Cursor,
  mode: Mode,
  dirty: DirtyRegions,
}

impl Editor {
  pub fn new(grid: GridMapper, song: SongLock) -> Editor {
    let cursor = Cursor::new(grid.left_margin(), 0);
    Editor {
      grid,
      song,
      cursor,
      mode: Mode::Normal,
      dirty: DirtyRegions::new(),
    }
  }

  pub fn grid(&self) -> &GridMapper {
    &self.grid
  }

  pub fn song(&self) -> &SongLock {
    &self.song
  }

  pub fn cursor(&self) -> Cursor {
    self.cursor
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn dirty_regions(&self) -> &DirtyRegions {
    &self.dirty
  }

  pub fn apply(&mut self, command: Command) -> Result<Outcome, EditorError> {
    let outcome = match command {
      Command::Move(motion) => self.move_cursor(motion),
      Command::ToggleVisual => self.toggle_visual(),
      Command::ExitVisual => self.exit_visual(),
      Command::Commit => self.commit()?,
    };
    debug!("{:?} => {:?}", command, outcome);
    Ok(outcome)
  }

  fn move_cursor(&mut self, motion: Motion) -> Outcome {
    let cursor = self.cursor.moved(motion, &self.grid);
    if cursor == self.cursor {
      return Outcome::Unchanged;
    }
    self.cursor = cursor;
    Outcome::Moved(cursor)
  }

  fn toggle_visual(&mut self) -> Outcome {
    self.mode = match self.mode {
      Mode::Normal => Mode::Visual {
        anchor: self.cursor,
      },
      Mode::Visual { .. } => Mode::Normal,
    };
    Outcome::ModeChanged(self.mode)
  }

  fn exit_visual(&mut self) -> Outcome {
    if !self.mode.is_visual() {
      return Outcome::Unchanged;
    }
    self.mode = Mode::Normal;
    Outcome::ModeChanged(self.mode)
  }

  /// Removes or inserts a note at the cursor, in this order of precedence:
  /// a note starting under the cursor, a longer note covering the cursor,
  /// a single step note in normal mode, the selected span in visual mode.
  ///
  /// The song stays locked for the whole resolution, and the dirty regions are
  /// updated while it is held.
  fn commit(&mut self) -> Result<Outcome, EditorError> {
    let cursor = self.cursor;
    let mode = self.mode;

    let outcome = {
      let mut song = self.song.lock().map_err(|_err| EditorError::SongLock)?;
      let mut edit = Edit {
        grid: &self.grid,
        song: &mut *song,
        dirty: &mut self.dirty,
      };

      if let Some(note) = edit.remove_starting_at(cursor) {
        Outcome::Removed(note)
      } else if let Some(note) = edit.remove_covering(cursor) {
        Outcome::Removed(note)
      } else {
        match mode {
          Mode::Normal => edit.insert_step(cursor),
          Mode::Visual { anchor } => edit.insert_span(anchor, cursor),
        }
      }
    };

    match outcome {
      Outcome::Inserted(_) | Outcome::Removed(_) => self.mode = Mode::Normal,
      _ => {}
    }

    Ok(outcome)
  }
}

/// One commit in progress, borrowing the locked song
struct Edit<'a> {
  grid: &'a GridMapper,
  song: &'a mut Song,
  dirty: &'a mut DirtyRegions,
}

impl<'a> Edit<'a> {
  fn domain(&self, cursor: Cursor) -> (Step, Pitch) {
    (
      self.grid.domain_start(cursor.col),
      self.grid.domain_pitch(cursor.row),
    )
  }

  fn remove_starting_at(&mut self, cursor: Cursor) -> Option<Note> {
    let (start, pitch) = self.domain(cursor);
    self.remove(start, pitch)
  }

  fn remove_covering(&mut self, cursor: Cursor) -> Option<Note> {
    let (position, pitch) = self.domain(cursor);
    let key = self.song.notes().covering(pitch, position)?.key();
    self.remove(key.start, key.pitch)
  }

  fn insert_step(&mut self, cursor: Cursor) -> Outcome {
    let (start, pitch) = self.domain(cursor);
    self.insert(start, start + 1, pitch)
  }

  fn insert_span(&mut self, anchor: Cursor, cursor: Cursor) -> Outcome {
    let left = anchor.col.min(cursor.col);
    let length = (anchor.col - cursor.col).abs() + 1;
    let start = self.grid.domain_start(left);
    let end = start + length;
    let pitch = self.grid.domain_pitch(cursor.row);

    let notes = self.song.notes();
    let collides = (start..end).any(|step| notes.exists(step, pitch))
      || notes.intersecting(pitch, start, end).is_some();
    if collides {
      return Outcome::Aborted;
    }

    self.insert(start, end, pitch)
  }

  fn insert(&mut self, start: Step, end: Step, pitch: Pitch) -> Outcome {
    match self.song.insert(start, end, pitch) {
      Some(note) => {
        let rect = self.grid.note_rect(
          self.grid.screen_col(start),
          self.grid.screen_row(pitch),
          note.duration(),
        );
        self.dirty.append(note.key(), rect);
        Outcome::Inserted(note)
      }
      None => Outcome::Unchanged,
    }
  }

  fn remove(&mut self, start: Step, pitch: Pitch) -> Option<Note> {
    let note = self.song.remove(start, pitch)?;
    self.dirty.remove(note.key());
    Some(note)
  }
}
