pub mod config;
pub mod dirty;
pub mod editor;
pub mod grid;
pub mod keymap;
pub mod playback;
pub mod song;
pub mod time;
pub mod transport;
pub mod view;
