use crate::grid::Rect;
use crate::song::notes::NoteKey;

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DirtyRegion {
  pub owner: NoteKey,
  pub rect: Rect,
}

/// Screen rectangles to repaint, one per note on the grid.
/// Regions are never merged nor expired, they go away only when their note does.
pub struct DirtyRegions {
  regions: Vec<DirtyRegion>,
}

impl Default for DirtyRegions {
  fn default() -> Self {
    DirtyRegions {
      regions: Vec::new(),
    }
  }
}

impl DirtyRegions {
  pub fn new() -> DirtyRegions {
    DirtyRegions::default()
  }

  pub fn len(&self) -> usize {
    self.regions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.regions.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &DirtyRegion> {
    self.regions.iter()
  }

  pub fn get(&self, owner: NoteKey) -> Option<&Rect> {
    self
      .regions
      .iter()
      .find(|region| region.owner == owner)
      .map(|region| &region.rect)
  }

  pub fn append(&mut self, owner: NoteKey, rect: Rect) {
    self.regions.push(DirtyRegion { owner, rect });
  }

  pub fn remove(&mut self, owner: NoteKey) -> Option<Rect> {
    self
      .regions
      .iter()
      .position(|region| region.owner == owner)
      .map(|index| self.regions.remove(index).rect)
  }

  /// Removes every region whose top-left corner is exactly (x, y)
  #[allow(clippy::float_cmp)]
  pub fn remove_at(&mut self, x: f32, y: f32) -> usize {
    let len = self.regions.len();
    self
      .regions
      .retain(|region| !(region.rect.x == x && region.rect.y == y));
    len - self.regions.len()
  }
}

#[cfg(test)]
mod test {

  use super::DirtyRegions;
  use crate::grid::Rect;
  use crate::song::notes::NoteKey;

  #[test]
  /// Regions should go away by owner, leaving the others untouched
  pub fn remove_by_owner() {
    let mut regions = DirtyRegions::new();
    regions.append(NoteKey::new(0, 60), Rect::new(21.0, 1.0, 8.0, 8.0));
    regions.append(NoteKey::new(1, 60), Rect::new(31.0, 1.0, 8.0, 8.0));

    assert_eq!(
      regions.remove(NoteKey::new(0, 60)),
      Some(Rect::new(21.0, 1.0, 8.0, 8.0))
    );
    assert_eq!(regions.remove(NoteKey::new(0, 60)), None);
    assert_eq!(regions.len(), 1);
    assert!(regions.get(NoteKey::new(1, 60)).is_some());
  }

  #[test]
  /// Removing by pixel position needs an exact match of the top-left corner
  pub fn remove_at_position() {
    let mut regions = DirtyRegions::new();
    regions.append(NoteKey::new(0, 60), Rect::new(21.0, 1.0, 8.0, 8.0));

    assert_eq!(regions.remove_at(21.5, 1.0), 0);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions.remove_at(21.0, 1.0), 1);
    assert!(regions.is_empty());
  }
}
