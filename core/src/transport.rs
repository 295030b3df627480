use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::info;

use crate::time::Seconds;

pub type TransportLock = Arc<Transport>;

/// Playback state shared by the frame loop and the playback worker.
///
/// The frame loop toggles `playing` and reads the published position for the
/// playback marker. The worker publishes the position and sleeps on the condition
/// variable while paused. Clearing `running` asks the worker to exit.
pub struct Transport {
  playing: AtomicBool,
  running: AtomicBool,
  position: AtomicU64,
  wake_lock: Mutex<()>,
  wake: Condvar,
}

impl Default for Transport {
  fn default() -> Self {
    Transport {
      playing: AtomicBool::new(false),
      running: AtomicBool::new(true),
      position: AtomicU64::new(0f64.to_bits()),
      wake_lock: Mutex::new(()),
      wake: Condvar::new(),
    }
  }
}

impl Transport {
  pub fn new() -> Transport {
    Transport::default()
  }

  pub fn new_lock() -> TransportLock {
    Arc::new(Transport::new())
  }

  pub fn is_playing(&self) -> bool {
    self.playing.load(Ordering::SeqCst)
  }

  pub fn is_running(&self) -> bool {
    self.running.load(Ordering::SeqCst)
  }

  /// Returns whether it is playing after the toggle
  pub fn toggle_play(&self) -> bool {
    let playing = !self.playing.fetch_xor(true, Ordering::SeqCst);
    info!("Playback {}", if playing { "started" } else { "paused" });
    self.notify();
    playing
  }

  pub fn play(&self) {
    self.playing.store(true, Ordering::SeqCst);
    self.notify();
  }

  pub fn stop(&self) {
    self.playing.store(false, Ordering::SeqCst);
    self.notify();
  }

  pub fn shutdown(&self) {
    self.running.store(false, Ordering::SeqCst);
    self.playing.store(false, Ordering::SeqCst);
    self.notify();
  }

  /// Latest playback time published by the worker
  pub fn position(&self) -> Seconds {
    f64::from_bits(self.position.load(Ordering::Relaxed))
  }

  pub fn set_position(&self, seconds: Seconds) {
    self.position.store(seconds.to_bits(), Ordering::Relaxed);
  }

  /// Blocks until playing or shut down. Returns whether it is still running.
  pub fn wait_for_play(&self) -> bool {
    let mut guard = self.lock_wake();
    while self.is_running() && !self.is_playing() {
      guard = self.wake.wait(guard).unwrap_or_else(PoisonError::into_inner);
    }
    self.is_running()
  }

  /// Sleeps for `duration` unless woken up by a toggle or a shutdown first.
  /// Returns whether it is still running.
  pub fn sleep(&self, duration: Duration) -> bool {
    let guard = self.lock_wake();
    if self.is_running() {
      drop(
        self
          .wake
          .wait_timeout(guard, duration)
          .unwrap_or_else(PoisonError::into_inner),
      );
    }
    self.is_running()
  }

  fn notify(&self) {
    let _guard = self.lock_wake();
    self.wake.notify_all();
  }

  fn lock_wake(&self) -> MutexGuard<()> {
    self.wake_lock.lock().unwrap_or_else(PoisonError::into_inner)
  }
}
