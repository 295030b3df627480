use crate::editor::{Command, Motion};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Key {
  H,
  J,
  K,
  L,
  D,
  U,
  G,
  V,
  X,
  Num0,
  Num4,
  Return,
  Escape,
  Space,
}

/// Modifier keys held down, sampled once per frame
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Modifiers {
  pub shift: bool,
  pub ctrl: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputEvent {
  KeyDown(Key),
  Close,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
  Edit(Command),

  /// Leaves visual mode, or quits from normal mode
  Escape,

  TogglePlayback,
  Quit,
}

pub fn resolve(event: InputEvent, modifiers: Modifiers) -> Option<Action> {
  let key = match event {
    InputEvent::Close => return Some(Action::Quit),
    InputEvent::KeyDown(key) => key,
  };

  if modifiers.ctrl {
    let jump = match key {
      Key::J | Key::D => Some(Motion::JumpDown),
      Key::K | Key::U => Some(Motion::JumpUp),
      Key::L => Some(Motion::JumpRight),
      Key::H => Some(Motion::JumpLeft),
      _ => None,
    };
    if let Some(motion) = jump {
      return Some(Action::Edit(Command::Move(motion)));
    }
  }

  if modifiers.shift {
    match key {
      Key::Num4 => return Some(Action::Edit(Command::Move(Motion::RowEnd))),
      Key::G => return Some(Action::Edit(Command::Move(Motion::LastRow))),
      _ => {}
    }
  }

  let action = match key {
    Key::H => Action::Edit(Command::Move(Motion::Left)),
    Key::J => Action::Edit(Command::Move(Motion::Down)),
    Key::K => Action::Edit(Command::Move(Motion::Up)),
    Key::L => Action::Edit(Command::Move(Motion::Right)),
    Key::Num0 => Action::Edit(Command::Move(Motion::RowStart)),
    Key::G => Action::Edit(Command::Move(Motion::FirstRow)),
    Key::V => Action::Edit(Command::ToggleVisual),
    Key::X | Key::Return => Action::Edit(Command::Commit),
    Key::Escape => Action::Escape,
    Key::Space => Action::TogglePlayback,
    Key::D | Key::U | Key::Num4 => return None,
  };
  Some(action)
}

#[cfg(test)]
mod test {

  use super::{resolve, Action, InputEvent, Key, Modifiers};
  use crate::editor::{Command, Motion};

  const NONE: Modifiers = Modifiers {
    shift: false,
    ctrl: false,
  };
  const SHIFT: Modifiers = Modifiers {
    shift: true,
    ctrl: false,
  };
  const CTRL: Modifiers = Modifiers {
    shift: false,
    ctrl: true,
  };

  fn motion(key: Key, modifiers: Modifiers) -> Option<Motion> {
    match resolve(InputEvent::KeyDown(key), modifiers) {
      Some(Action::Edit(Command::Move(motion))) => Some(motion),
      _ => None,
    }
  }

  #[test]
  pub fn plain_motions() {
    assert_eq!(motion(Key::H, NONE), Some(Motion::Left));
    assert_eq!(motion(Key::J, NONE), Some(Motion::Down));
    assert_eq!(motion(Key::K, NONE), Some(Motion::Up));
    assert_eq!(motion(Key::L, NONE), Some(Motion::Right));
    assert_eq!(motion(Key::Num0, NONE), Some(Motion::RowStart));
    assert_eq!(motion(Key::G, NONE), Some(Motion::FirstRow));
    assert_eq!(motion(Key::D, NONE), None);
    assert_eq!(motion(Key::Num4, NONE), None);
  }

  #[test]
  /// Holding ctrl turns hjkl (and d/u) into jumps
  pub fn ctrl_jumps() {
    assert_eq!(motion(Key::H, CTRL), Some(Motion::JumpLeft));
    assert_eq!(motion(Key::J, CTRL), Some(Motion::JumpDown));
    assert_eq!(motion(Key::D, CTRL), Some(Motion::JumpDown));
    assert_eq!(motion(Key::K, CTRL), Some(Motion::JumpUp));
    assert_eq!(motion(Key::U, CTRL), Some(Motion::JumpUp));
    assert_eq!(motion(Key::L, CTRL), Some(Motion::JumpRight));
  }

  #[test]
  pub fn shifted_motions() {
    assert_eq!(motion(Key::Num4, SHIFT), Some(Motion::RowEnd));
    assert_eq!(motion(Key::G, SHIFT), Some(Motion::LastRow));
    assert_eq!(motion(Key::L, SHIFT), Some(Motion::Right));
  }

  #[test]
  pub fn other_actions() {
    let key = |key| resolve(InputEvent::KeyDown(key), NONE);
    assert_eq!(key(Key::X), Some(Action::Edit(Command::Commit)));
    assert_eq!(key(Key::Return), Some(Action::Edit(Command::Commit)));
    assert_eq!(key(Key::V), Some(Action::Edit(Command::ToggleVisual)));
    assert_eq!(key(Key::Escape), Some(Action::Escape));
    assert_eq!(key(Key::Space), Some(Action::TogglePlayback));
    assert_eq!(resolve(InputEvent::Close, CTRL), Some(Action::Quit));
  }
}
