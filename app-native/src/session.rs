use log::debug;

use vimdaw_core::editor::{Command, Editor, EditorError};
use vimdaw_core::keymap::{self, Action};
use vimdaw_core::time::StepClock;
use vimdaw_core::transport::TransportLock;
use vimdaw_core::view::{CursorBlink, Frame};

use crate::input::KeyPress;

/// Glue between the input, the editor, the transport and the view, run on the frame loop
pub struct Session {
  editor: Editor,
  transport: TransportLock,
  clock: StepClock,
  blink: CursorBlink,
}

impl Session {
  pub fn new(
    editor: Editor,
    transport: TransportLock,
    clock: StepClock,
    blink: CursorBlink,
  ) -> Session {
    Session {
      editor,
      transport,
      clock,
      blink,
    }
  }

  pub fn editor(&self) -> &Editor {
    &self.editor
  }

  /// Returns false when the session should end
  pub fn handle(&mut self, key: KeyPress, now_ms: u64) -> Result<bool, EditorError> {
    let action = match keymap::resolve(key.event, key.modifiers) {
      Some(action) => action,
      None => {
        debug!("Unmapped {:?}", key);
        return Ok(true);
      }
    };

    match action {
      Action::Quit => return Ok(false),
      Action::Escape if !self.editor.mode().is_visual() => return Ok(false),
      Action::Escape => self.edit(Command::ExitVisual, now_ms)?,
      Action::TogglePlayback => {
        self.transport.toggle_play();
      }
      Action::Edit(command) => self.edit(command, now_ms)?,
    }
    Ok(true)
  }

  fn edit(&mut self, command: Command, now_ms: u64) -> Result<(), EditorError> {
    self.editor.apply(command)?;
    self.blink.moved(now_ms);
    Ok(())
  }

  pub fn frame(&mut self, now_ms: u64) -> Frame {
    if self.editor.mode().is_visual() {
      self.blink.moved(now_ms);
    }
    let cursor_visible = self.blink.update(now_ms);

    Frame::new(
      &self.editor,
      cursor_visible,
      self.transport.is_playing(),
      self.transport.position(),
      &self.clock,
    )
  }
}
