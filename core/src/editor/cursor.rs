use crate::grid::{Col, GridMapper, Row};

pub const JUMP: i32 = 3;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Cursor {
  pub col: Col,
  pub row: Row,
}

impl Cursor {
  pub fn new(col: Col, row: Row) -> Cursor {
    Cursor { col, row }
  }

  /// Cursor after applying a motion, always inside the grid
  pub fn moved(self, motion: Motion, grid: &GridMapper) -> Cursor {
    let Cursor { col, row } = self;
    let (col, row) = match motion {
      Motion::Left => (col - 1, row),
      Motion::Down => (col, row + 1),
      Motion::Up => (col, row - 1),
      Motion::Right => (col + 1, row),
      Motion::JumpLeft => (col - JUMP, row),
      Motion::JumpDown => (col, row + JUMP),
      Motion::JumpUp => (col, row - JUMP),
      Motion::JumpRight => (col + JUMP, row),
      Motion::RowStart => (grid.left_margin(), row),
      Motion::RowEnd => (grid.max_col(), row),
      Motion::FirstRow => (col, 0),
      Motion::LastRow => (col, grid.max_row()),
    };
    Cursor::new(grid.clamp_col(col), grid.clamp_row(row))
  }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Motion {
  Left,
  Down,
  Up,
  Right,
  JumpLeft,
  JumpDown,
  JumpUp,
  JumpRight,
  RowStart,
  RowEnd,
  FirstRow,
  LastRow,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
  Normal,

  /// Selecting a span, `anchor` is where the cursor was when the selection started
  Visual { anchor: Cursor },
}

impl Mode {
  pub fn is_visual(&self) -> bool {
    match self {
      Mode::Visual { .. } => true,
      Mode::Normal => false,
    }
  }
}

#[cfg(test)]
mod test {

  use super::{Cursor, Motion};
  use crate::config::{Display, Grid};
  use crate::grid::GridMapper;

  fn grid() -> GridMapper {
    GridMapper::new(&Grid::default(), &Display::default())
  }

  #[test]
  /// Motions should clamp at the grid edges without wrapping around
  pub fn moves_are_clamped() {
    let grid = grid();
    let origin = Cursor::new(2, 0);
    assert_eq!(origin.moved(Motion::Left, &grid), origin);
    assert_eq!(origin.moved(Motion::Up, &grid), origin);
    assert_eq!(origin.moved(Motion::JumpUp, &grid), origin);
    assert_eq!(origin.moved(Motion::JumpLeft, &grid), origin);

    let corner = Cursor::new(65, 36);
    assert_eq!(corner.moved(Motion::Right, &grid), corner);
    assert_eq!(corner.moved(Motion::Down, &grid), corner);
    assert_eq!(Cursor::new(64, 35).moved(Motion::JumpRight, &grid), Cursor::new(65, 35));
    assert_eq!(Cursor::new(64, 35).moved(Motion::JumpDown, &grid), Cursor::new(64, 36));
  }

  #[test]
  pub fn jumps() {
    let grid = grid();
    let cursor = Cursor::new(10, 10);
    assert_eq!(cursor.moved(Motion::JumpRight, &grid), Cursor::new(13, 10));
    assert_eq!(cursor.moved(Motion::JumpLeft, &grid), Cursor::new(7, 10));
    assert_eq!(cursor.moved(Motion::JumpDown, &grid), Cursor::new(10, 13));
    assert_eq!(cursor.moved(Motion::JumpUp, &grid), Cursor::new(10, 7));
    assert_eq!(cursor.moved(Motion::RowStart, &grid), Cursor::new(2, 10));
    assert_eq!(cursor.moved(Motion::RowEnd, &grid), Cursor::new(65, 10));
    assert_eq!(cursor.moved(Motion::FirstRow, &grid), Cursor::new(10, 0));
    assert_eq!(cursor.moved(Motion::LastRow, &grid), Cursor::new(10, 36));
  }
}
