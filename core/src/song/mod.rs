pub mod buffer;
pub mod notes;

use std::sync::{Arc, Mutex};

use crate::config::Buffer as BufferConfig;
use crate::grid::{Pitch, Step};

use self::{
  buffer::BufferMap,
  notes::{Note, NoteSet},
};

/// Shared between the editor and the playback worker
pub type SongLock = Arc<Mutex<Song>>;

/// The notes being edited, together with the playback buckets derived from them.
/// Every mutation goes through here so both stay in sync.
pub struct Song {
  notes: NoteSet,
  buffers: BufferMap,
}

impl Song {
  pub fn new(config: &BufferConfig) -> Song {
    Song {
      notes: NoteSet::new(),
      buffers: BufferMap::new(config),
    }
  }

  pub fn new_lock(config: &BufferConfig) -> SongLock {
    Arc::new(Mutex::new(Song::new(config)))
  }

  pub fn notes(&self) -> &NoteSet {
    &self.notes
  }

  pub fn buffers(&self) -> &BufferMap {
    &self.buffers
  }

  pub fn insert(&mut self, start: Step, end: Step, pitch: Pitch) -> Option<Note> {
    let note = self.notes.insert(start, end, pitch)?;
    self.buffers.insert(note);
    Some(note)
  }

  pub fn remove(&mut self, start: Step, pitch: Pitch) -> Option<Note> {
    let note = self.notes.remove(start, pitch)?;
    self.buffers.remove(note.key());
    Some(note)
  }

  pub fn fetch(&self, current_time: Step, lookahead: Step) -> Vec<Note> {
    self.buffers.fetch(current_time, lookahead)
  }
}

#[cfg(test)]
mod test {

  use super::Song;
  use crate::config::Buffer as BufferConfig;

  #[test]
  /// The playback buckets should follow every insertion and removal
  pub fn song_keeps_buffers_in_sync() {
    let mut song = Song::new(&BufferConfig::default());
    assert!(song.insert(0, 1, 60).is_some());
    assert!(song.insert(4, 8, 62).is_some());
    assert!(song.insert(4, 5, 62).is_none());
    assert_eq!(song.notes().len(), 2);
    assert_eq!(song.buffers().len(), 2);

    assert!(song.remove(0, 60).is_some());
    assert!(song.remove(0, 60).is_none());
    assert_eq!(song.notes().len(), 1);
    assert_eq!(song.buffers().len(), 1);
    assert_eq!(song.fetch(0, 8).len(), 1);
  }
}
