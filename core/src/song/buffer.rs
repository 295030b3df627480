use std::collections::BTreeMap;

use crate::config::Buffer as BufferConfig;
use crate::grid::{Pitch, Step};
use crate::song::notes::{Note, NoteKey};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct BucketKey {
  pub time: i32,
  pub pitch: i32,
}

/// Notes partitioned in (time, pitch) buckets by their start, so the playback side only
/// looks at the buckets around the current position.
pub struct BufferMap {
  time_bucket_width: Step,
  pitch_bucket_height: Pitch,
  bucket_capacity: usize,
  buckets: BTreeMap<BucketKey, Vec<Note>>,
}

impl BufferMap {
  pub fn new(config: &BufferConfig) -> BufferMap {
    let time_bucket_width = config.time_bucket_width.max(1);
    let pitch_bucket_height = config.pitch_bucket_height.max(1);

    // (start, pitch) is unique, so a bucket never holds more than one note per cell
    let bucket_capacity = (time_bucket_width as usize) * (pitch_bucket_height as usize);

    BufferMap {
      time_bucket_width,
      pitch_bucket_height,
      bucket_capacity,
      buckets: BTreeMap::new(),
    }
  }

  pub fn bucket_key(&self, start: Step, pitch: Pitch) -> BucketKey {
    BucketKey {
      time: start.div_euclid(self.time_bucket_width),
      pitch: pitch.div_euclid(self.pitch_bucket_height),
    }
  }

  pub fn bucket_capacity(&self) -> usize {
    self.bucket_capacity
  }

  pub fn num_buckets(&self) -> usize {
    self.buckets.len()
  }

  pub fn len(&self) -> usize {
    self.buckets.values().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.buckets.is_empty()
  }

  pub fn bucket(&self, key: BucketKey) -> &[Note] {
    self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn insert(&mut self, note: Note) {
    let key = self.bucket_key(note.start(), note.pitch());
    let capacity = self.bucket_capacity;
    let bucket = self
      .buckets
      .entry(key)
      .or_insert_with(|| Vec::with_capacity(capacity));
    debug_assert!(bucket.len() < capacity);
    bucket.push(note);
  }

  pub fn remove(&mut self, note_key: NoteKey) {
    let key = self.bucket_key(note_key.start, note_key.pitch);
    if let Some(bucket) = self.buckets.get_mut(&key) {
      bucket.retain(|note| note.key() != note_key);
      if bucket.is_empty() {
        self.buckets.remove(&key);
      }
    }
  }

  /// Notes from every bucket overlapping [current_time, current_time + lookahead],
  /// ordered by start and pitch
  pub fn fetch(&self, current_time: Step, lookahead: Step) -> Vec<Note> {
    let window_end = current_time.saturating_add(lookahead.max(0));
    let first = BucketKey {
      time: current_time.div_euclid(self.time_bucket_width),
      pitch: i32::MIN,
    };
    let last = BucketKey {
      time: window_end.div_euclid(self.time_bucket_width),
      pitch: i32::MAX,
    };

    let mut notes: Vec<Note> = self
      .buckets
      .range(first..=last)
      .flat_map(|(_key, bucket)| bucket.iter().cloned())
      .collect();

    notes.sort_by_key(|note| (note.start(), note.pitch()));
    notes
  }
}
