use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use failure::Fail;
use log::{info, warn};

use vimdaw_core::playback::{NoteSink, Sequencer};
use vimdaw_core::song::SongLock;
use vimdaw_core::time::Seconds;
use vimdaw_core::transport::TransportLock;

#[derive(Debug, Fail)]
pub enum PlaybackError {
  #[fail(display = "Failed to create the playback thread: {}", cause)]
  Start { cause: String },

  #[fail(display = "Failed to join the playback thread")]
  Stop,
}

struct PlaybackThread<S: NoteSink> {
  song: SongLock,
  transport: TransportLock,
  sequencer: Sequencer,
  sink: S,
  tick_interval: Duration,
  elapsed: Seconds,
}

impl<S: NoteSink> PlaybackThread<S> {
  fn run(&mut self) {
    while self.transport.wait_for_play() {
      let mut last_tick = Instant::now();

      while self.transport.is_playing() {
        let now = Instant::now();
        self.elapsed += now.duration_since(last_tick).as_secs_f64();
        last_tick = now;

        if !self.tick() {
          self.transport.stop();
          break;
        }

        if !self.transport.sleep(self.tick_interval) {
          break;
        }
      }

      self.sequencer.release(&mut self.sink);
    }
  }

  fn tick(&mut self) -> bool {
    match self.song.lock() {
      Ok(song) => {
        let position = self.sequencer.advance(&song, self.elapsed, &mut self.sink);
        self.transport.set_position(position);
        true
      }
      Err(_) => {
        warn!("The song lock is poisoned, pausing playback");
        false
      }
    }
  }
}

pub struct PlaybackWorker {
  handler: JoinHandle<()>,
  transport: TransportLock,
}

impl PlaybackWorker {
  pub fn new<S>(
    song: SongLock,
    transport: TransportLock,
    sequencer: Sequencer,
    sink: S,
    tick_interval: Duration,
  ) -> Result<PlaybackWorker, PlaybackError>
  where
    S: NoteSink + Send + 'static,
  {
    info!("Starting the playback worker ...");

    let mut playback = PlaybackThread {
      song,
      transport: transport.clone(),
      sequencer,
      sink,
      tick_interval,
      elapsed: 0.0,
    };

    thread::Builder::new()
      .name("playback".into())
      .spawn(move || playback.run())
      .map_err(|err| PlaybackError::Start {
        cause: err.to_string(),
      })
      .map(|handler| PlaybackWorker { handler, transport })
  }

  pub fn stop(self) -> Result<(), PlaybackError> {
    info!("Stopping the playback worker ...");

    self.transport.shutdown();
    self.handler.join().map_err(|_| PlaybackError::Stop)
  }
}

#[cfg(test)]
mod test {

  use std::sync::{Arc, Mutex};
  use std::thread;
  use std::time::Duration;

  use super::PlaybackWorker;
  use vimdaw_core::config::Buffer as BufferConfig;
  use vimdaw_core::playback::{NoteSink, Sequencer};
  use vimdaw_core::song::{notes::Note, Song};
  use vimdaw_core::time::{StepClock, Tempo};
  use vimdaw_core::transport::Transport;

  #[derive(Clone, Default)]
  struct SharedRecorder {
    events: Arc<Mutex<Vec<(bool, Note)>>>,
  }

  impl NoteSink for SharedRecorder {
    fn note_on(&mut self, note: &Note) {
      self.events.lock().unwrap().push((true, *note));
    }

    fn note_off(&mut self, note: &Note) {
      self.events.lock().unwrap().push((false, *note));
    }
  }

  #[test]
  /// Playing triggers the first note, and stopping the worker releases it
  pub fn plays_and_stops() {
    let song = Song::new_lock(&BufferConfig::default());
    song.lock().unwrap().insert(0, 1, 60);
    let transport = Transport::new_lock();
    let sink = SharedRecorder::default();
    let sequencer = Sequencer::new(StepClock::new(Tempo::new(120), 4), 2, 64);

    let worker = PlaybackWorker::new(
      song,
      transport.clone(),
      sequencer,
      sink.clone(),
      Duration::from_millis(5),
    )
    .unwrap();

    transport.toggle_play();
    thread::sleep(Duration::from_millis(50));
    worker.stop().unwrap();

    let note = Note::new(0, 1, 60);
    let events = sink.events.lock().unwrap();
    assert_eq!(*events, vec![(true, note), (false, note)]);
    assert!(!transport.is_running());
  }

  #[test]
  /// A paused worker keeps its position and can still be stopped
  pub fn pause_keeps_position() {
    let song = Song::new_lock(&BufferConfig::default());
    let transport = Transport::new_lock();
    let sequencer = Sequencer::new(StepClock::new(Tempo::new(120), 4), 2, 64);
    let worker = PlaybackWorker::new(
      song,
      transport.clone(),
      sequencer,
      SharedRecorder::default(),
      Duration::from_millis(5),
    )
    .unwrap();

    transport.toggle_play();
    thread::sleep(Duration::from_millis(50));
    transport.toggle_play();
    thread::sleep(Duration::from_millis(20));
    let paused_at = transport.position();
    assert!(paused_at > 0.0);

    thread::sleep(Duration::from_millis(30));
    assert_eq!(transport.position(), paused_at);
    worker.stop().unwrap();
  }
}
