use std::path::Path;
use std::thread;
use std::time::Instant;

use failure::{Error, Fail};
use log::{debug, info, warn};

use vimdaw_core::config::Config;
use vimdaw_core::editor::Editor;
use vimdaw_core::grid::GridMapper;
use vimdaw_core::playback::Sequencer;
use vimdaw_core::song::{Song, SongLock};
use vimdaw_core::time::StepClock;
use vimdaw_core::transport::{Transport, TransportLock};
use vimdaw_core::view::CursorBlink;

mod config;
use crate::config::Config as AppConfig;

mod input;
use crate::input::{InputSource, StdinInput};

mod render;
use crate::render::{LogRenderer, Renderer};

mod session;
use crate::session::Session;

mod sink;
use crate::sink::LogSink;

mod worker;
use crate::worker::PlaybackWorker;

const VIMDAW_CONFIG: &str = "VIMDAW_CONFIG";
const DEFAULT_VIMDAW_CONFIG: &str = "vimdaw.toml";

const VIMDAW_LOG_CONFIG: &str = "VIMDAW_LOG_CONFIG";
const DEFAULT_VIMDAW_LOG_CONFIG: &str = "log4rs.yaml";

#[derive(Debug, Fail)]
enum MainError {
  #[fail(display = "Failed to init logging: {}", cause)]
  LoggingInit { cause: String },
}

fn main() -> Result<(), Error> {
  init_logging()?;

  let (config, app_config) = init_config()?;

  let song = Song::new_lock(&config.buffer);
  let transport = Transport::new_lock();

  let worker = init_worker(&config, song.clone(), transport.clone())?;

  let mut input = StdinInput::new(app_config.frame.input_capacity)?;
  let mut renderer = LogRenderer::new();
  let mut session = init_session(&config, song, transport);

  let result = run_frames(&app_config, &mut session, &mut input, &mut renderer);

  worker.stop()?;

  info!("Bye");
  result
}

fn init_logging() -> Result<(), Error> {
  let log_config_path =
    std::env::var(VIMDAW_LOG_CONFIG).unwrap_or_else(|_| DEFAULT_VIMDAW_LOG_CONFIG.to_string());

  log4rs::init_file(log_config_path.as_str(), Default::default()).map_err(|err| {
    MainError::LoggingInit {
      cause: err.to_string(),
    }
  })?;

  Ok(())
}

fn init_config() -> Result<(Config, AppConfig), Error> {
  let config_path = match std::env::var(VIMDAW_CONFIG) {
    Ok(path) => path,
    Err(_) if !Path::new(DEFAULT_VIMDAW_CONFIG).exists() => {
      warn!(
        "No configuration found at {}, using the defaults",
        DEFAULT_VIMDAW_CONFIG
      );
      return Ok((Config::default(), AppConfig::default()));
    }
    Err(_) => DEFAULT_VIMDAW_CONFIG.to_string(),
  };

  info!("Loading configuration from {} ...", config_path);
  let content = std::fs::read_to_string(config_path.as_str())?;
  let config = Config::from_str(content.as_str())?;
  let app_config = AppConfig::from_str(content.as_str())?;
  debug!("{:#?}", config);
  debug!("{:#?}", app_config);

  Ok((config, app_config))
}

fn init_worker(
  config: &Config,
  song: SongLock,
  transport: TransportLock,
) -> Result<PlaybackWorker, Error> {
  let worker = PlaybackWorker::new(
    song,
    transport,
    Sequencer::from_config(config),
    LogSink::new(),
    config.playback.tick_interval(),
  )?;

  Ok(worker)
}

fn init_session(config: &Config, song: SongLock, transport: TransportLock) -> Session {
  info!("Initialising the editor ...");

  let grid = GridMapper::new(&config.grid, &config.display);
  Session::new(
    Editor::new(grid, song),
    transport,
    StepClock::from_config(&config.playback),
    CursorBlink::new(&config.display),
  )
}

fn run_frames<I: InputSource, R: Renderer>(
  app_config: &AppConfig,
  session: &mut Session,
  input: &mut I,
  renderer: &mut R,
) -> Result<(), Error> {
  info!("Running, type keys followed by return");

  let started = Instant::now();
  let interval = app_config.frame.interval();

  loop {
    let now_ms = started.elapsed().as_millis() as u64;

    for key in input.poll() {
      if !session.handle(key, now_ms)? {
        return Ok(());
      }
    }

    renderer.render(&session.frame(now_ms));

    thread::sleep(interval);
  }
}
