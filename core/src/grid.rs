use std::ops::RangeInclusive;

use crate::config::{Display as DisplayConfig, Grid as GridConfig};

pub type Col = i32;
pub type Row = i32;

pub type Step = i32;
pub type Pitch = i32;

/// Pixel rectangle in window coordinates
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Rect {
  pub x: f32,
  pub y: f32,
  pub w: f32,
  pub h: f32,
}

impl Rect {
  pub fn new(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect { x, y, w, h }
  }
}

/// Maps screen cells (col, row) to domain coordinates (step, pitch) and back.
///
/// The first `left_margin` columns hold the piano keys and the last `status_rows`
/// rows hold the status bars, so neither of them maps to a domain coordinate.
/// Row 0 is the highest pitch.
#[derive(Debug, Clone)]
pub struct GridMapper {
  cols: Col,
  rows: Row,
  status_rows: Row,
  left_margin: Col,
  pitch_offset: Pitch,
  cell_width: f32,
  cell_height: f32,
}

impl GridMapper {
  pub fn new(grid: &GridConfig, display: &DisplayConfig) -> GridMapper {
    GridMapper {
      cols: grid.cols,
      rows: grid.rows,
      status_rows: grid.status_rows,
      left_margin: grid.left_margin,
      pitch_offset: grid.pitch_offset,
      cell_width: display.width / grid.cols as f32,
      cell_height: display.height / grid.rows as f32,
    }
  }

  pub fn cols(&self) -> Col {
    self.cols
  }

  pub fn rows(&self) -> Row {
    self.rows
  }

  pub fn note_rows(&self) -> Row {
    self.rows - self.status_rows
  }

  pub fn left_margin(&self) -> Col {
    self.left_margin
  }

  pub fn max_col(&self) -> Col {
    self.cols - 1
  }

  pub fn max_row(&self) -> Row {
    self.note_rows() - 1
  }

  pub fn cell_width(&self) -> f32 {
    self.cell_width
  }

  pub fn cell_height(&self) -> f32 {
    self.cell_height
  }

  pub fn domain_start(&self, col: Col) -> Step {
    col - self.left_margin
  }

  pub fn domain_pitch(&self, row: Row) -> Pitch {
    (self.max_row() - row) + self.pitch_offset
  }

  pub fn screen_col(&self, start: Step) -> Col {
    start + self.left_margin
  }

  pub fn screen_row(&self, pitch: Pitch) -> Row {
    self.max_row() - (pitch - self.pitch_offset)
  }

  pub fn pitch_range(&self) -> RangeInclusive<Pitch> {
    self.domain_pitch(self.max_row())..=self.domain_pitch(0)
  }

  pub fn clamp_col(&self, col: Col) -> Col {
    col.max(self.left_margin).min(self.max_col())
  }

  pub fn clamp_row(&self, row: Row) -> Row {
    row.max(0).min(self.max_row())
  }

  pub fn contains(&self, col: Col, row: Row) -> bool {
    col >= self.left_margin && col <= self.max_col() && row >= 0 && row <= self.max_row()
  }

  /// Full cell at (col, row), used for the cursor
  pub fn cell_rect(&self, col: Col, row: Row) -> Rect {
    Rect::new(
      col as f32 * self.cell_width,
      row as f32 * self.cell_height,
      self.cell_width,
      self.cell_height,
    )
  }

  /// Inner rectangle of a note spanning `len` cells from (col, row), inset by one pixel
  pub fn note_rect(&self, col: Col, row: Row, len: Step) -> Rect {
    Rect::new(
      col as f32 * self.cell_width + 1.0,
      row as f32 * self.cell_height + 1.0,
      self.cell_width * len as f32 - 2.0,
      self.cell_height - 2.0,
    )
  }

  /// Rectangle covering every cell between two opposite corners, inclusive
  pub fn span_rect(&self, col1: Col, row1: Row, col2: Col, row2: Row) -> Rect {
    let (left, right) = (col1.min(col2), col1.max(col2));
    let (top, bottom) = (row1.min(row2), row1.max(row2));
    Rect::new(
      left as f32 * self.cell_width,
      top as f32 * self.cell_height,
      (right - left + 1) as f32 * self.cell_width,
      (bottom - top + 1) as f32 * self.cell_height,
    )
  }

  /// Horizontal pixel position of a (fractional) step
  pub fn step_x(&self, step: f64) -> f32 {
    (f64::from(self.left_margin) + step) as f32 * self.cell_width
  }
}
