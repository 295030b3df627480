use std::io::BufRead;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use failure::Fail;
use log::{debug, info, warn};

use vimdaw_core::keymap::{InputEvent, Key, Modifiers};

#[derive(Debug, Fail)]
pub enum InputError {
  #[fail(display = "Failed to create the input thread: {}", cause)]
  Start { cause: String },
}

/// A key-down event with the modifiers held when it happened
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct KeyPress {
  pub event: InputEvent,
  pub modifiers: Modifiers,
}

impl KeyPress {
  pub fn new(event: InputEvent, modifiers: Modifiers) -> KeyPress {
    KeyPress { event, modifiers }
  }

  fn key(key: Key, shift: bool, ctrl: bool) -> KeyPress {
    KeyPress::new(InputEvent::KeyDown(key), Modifiers { shift, ctrl })
  }
}

pub trait InputSource {
  /// Everything pressed since the last call. Never blocks.
  fn poll(&mut self) -> Vec<KeyPress>;
}

/// Reads keys typed on stdin, one line at a time.
///
/// Every character is a key: uppercase letters and `$` are shifted, `^h` is ctrl+h.
/// `<esc>`, `<space>`, `<cr>` and `<quit>` name the keys that can't be typed,
/// and an empty line is a return.
pub struct StdinInput {
  keys_rx: Receiver<KeyPress>,
}

impl StdinInput {
  pub fn new(capacity: usize) -> Result<StdinInput, InputError> {
    let (keys_tx, keys_rx) = crossbeam_channel::bounded::<KeyPress>(capacity.max(1));

    info!("Reading keys from stdin ...");

    thread::Builder::new()
      .name("stdin".into())
      .spawn(move || read_lines(keys_tx))
      .map_err(|err| InputError::Start {
        cause: err.to_string(),
      })
      .map(|_handler| StdinInput { keys_rx })
  }
}

impl InputSource for StdinInput {
  fn poll(&mut self) -> Vec<KeyPress> {
    let mut keys = Vec::new();
    while let Ok(key) = self.keys_rx.try_recv() {
      keys.push(key);
    }
    keys
  }
}

fn read_lines(keys_tx: Sender<KeyPress>) {
  let stdin = std::io::stdin();
  for line in stdin.lock().lines() {
    let line = match line {
      Ok(line) => line,
      Err(err) => {
        warn!("Failed to read from stdin: {}", err);
        break;
      }
    };

    for key in parse_keys(&line) {
      if keys_tx.send(key).is_err() {
        return;
      }
    }
  }

  debug!("No more input, closing");
  drop(keys_tx.send(KeyPress::new(InputEvent::Close, Modifiers::default())));
}

pub fn parse_keys(line: &str) -> Vec<KeyPress> {
  if line.is_empty() {
    return vec![KeyPress::key(Key::Return, false, false)];
  }

  let mut keys = Vec::new();
  let mut chars = line.chars();
  while let Some(c) = chars.next() {
    match c {
      '<' => {
        let name: String = chars.by_ref().take_while(|c| *c != '>').collect();
        match named_key(&name) {
          Some(key) => keys.push(key),
          None => warn!("Unknown key <{}>", name),
        }
      }
      '^' => match chars.next().and_then(char_key) {
        Some((key, shift)) => keys.push(KeyPress::key(key, shift, true)),
        None => warn!("Missing key after ^"),
      },
      c => match char_key(c) {
        Some((key, shift)) => keys.push(KeyPress::key(key, shift, false)),
        None => debug!("Ignoring {:?}", c),
      },
    }
  }
  keys
}

fn named_key(name: &str) -> Option<KeyPress> {
  let key = match name.to_lowercase().as_str() {
    "esc" => Key::Escape,
    "space" => Key::Space,
    "cr" | "enter" => Key::Return,
    "quit" => return Some(KeyPress::new(InputEvent::Close, Modifiers::default())),
    _ => return None,
  };
  Some(KeyPress::key(key, false, false))
}

fn char_key(c: char) -> Option<(Key, bool)> {
  let key = match c.to_ascii_lowercase() {
    'h' => Key::H,
    'j' => Key::J,
    'k' => Key::K,
    'l' => Key::L,
    'd' => Key::D,
    'u' => Key::U,
    'g' => Key::G,
    'v' => Key::V,
    'x' => Key::X,
    '0' => Key::Num0,
    '4' => Key::Num4,
    '$' => return Some((Key::Num4, true)),
    ' ' => Key::Space,
    _ => return None,
  };
  Some((key, c.is_ascii_uppercase()))
}
