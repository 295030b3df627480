use std::collections::{BTreeMap, HashMap};

use crate::grid::{Pitch, Step};

/// Identity of a note: no two notes share a start and a pitch
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct NoteKey {
  pub start: Step,
  pub pitch: Pitch,
}

impl NoteKey {
  pub fn new(start: Step, pitch: Pitch) -> NoteKey {
    NoteKey { start, pitch }
  }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Note {
  start: Step,
  end: Step,
  pitch: Pitch,
}

impl Note {
  pub fn new(start: Step, end: Step, pitch: Pitch) -> Note {
    Note { start, end, pitch }
  }

  pub fn start(&self) -> Step {
    self.start
  }

  /// Exclusive
  pub fn end(&self) -> Step {
    self.end
  }

  pub fn pitch(&self) -> Pitch {
    self.pitch
  }

  pub fn duration(&self) -> Step {
    self.end - self.start
  }

  pub fn key(&self) -> NoteKey {
    NoteKey::new(self.start, self.pitch)
  }

  pub fn covers(&self, step: Step) -> bool {
    self.start <= step && step < self.end
  }

  pub fn intersects(&self, start: Step, end: Step) -> bool {
    self.start < end && start < self.end
  }
}

/// Notes in insertion order, plus a per-pitch index sorted by start.
///
/// The set only guarantees uniqueness of (start, pitch). Keeping notes on the
/// same pitch from overlapping is up to the caller.
pub struct NoteSet {
  notes: Vec<Note>,
  rows: HashMap<Pitch, BTreeMap<Step, Step>>,
}

impl Default for NoteSet {
  fn default() -> Self {
    NoteSet {
      notes: Vec::new(),
      rows: HashMap::new(),
    }
  }
}

impl NoteSet {
  pub fn new() -> NoteSet {
    NoteSet::default()
  }

  pub fn len(&self) -> usize {
    self.notes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.notes.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Note> {
    self.notes.iter()
  }

  pub fn exists(&self, start: Step, pitch: Pitch) -> bool {
    self
      .rows
      .get(&pitch)
      .map_or(false, |row| row.contains_key(&start))
  }

  /// Appends a new note unless one already starts at (start, pitch).
  /// Returns the inserted note.
  pub fn insert(&mut self, start: Step, end: Step, pitch: Pitch) -> Option<Note> {
    if end <= start || self.exists(start, pitch) {
      return None;
    }

    let note = Note::new(start, end, pitch);
    self.notes.push(note);
    self
      .rows
      .entry(pitch)
      .or_insert_with(BTreeMap::new)
      .insert(start, end);
    Some(note)
  }

  pub fn find(&self, start: Step, pitch: Pitch) -> Option<&Note> {
    if !self.exists(start, pitch) {
      return None;
    }
    self
      .notes
      .iter()
      .find(|note| note.start == start && note.pitch == pitch)
  }

  /// Removes the note starting at (start, pitch), if any, and returns it
  pub fn remove(&mut self, start: Step, pitch: Pitch) -> Option<Note> {
    let row = self.rows.get_mut(&pitch)?;
    row.remove(&start)?;
    if row.is_empty() {
      self.rows.remove(&pitch);
    }

    self
      .notes
      .iter()
      .position(|note| note.start == start && note.pitch == pitch)
      .map(|index| self.notes.remove(index))
  }

  /// Nearest note on `pitch` starting strictly before `position` whose span covers it.
  /// Closer notes that end before `position` are skipped.
  pub fn covering(&self, pitch: Pitch, position: Step) -> Option<&Note> {
    let row = self.rows.get(&pitch)?;
    let (start, _end) = row
      .range(..position)
      .rev()
      .find(|(_start, end)| **end > position)?;
    self.find(*start, pitch)
  }

  /// Any note on `pitch` sharing at least one step with [start, end)
  pub fn intersecting(&self, pitch: Pitch, start: Step, end: Step) -> Option<&Note> {
    let row = self.rows.get(&pitch)?;
    let (note_start, _end) = row
      .range(..end)
      .rev()
      .find(|(_start, note_end)| **note_end > start)?;
    self.find(*note_start, pitch)
  }
}
