//! Where grids come from, and the worker that fetches them off the UI thread.

pub mod demo;
pub mod sheets;

use crate::config::SourceConfig;
use crate::config::SourceKind;
use crate::error::FetchError;
use log::debug;
use log::info;
use log::warn;
use sheetgrid_core::grid::Grid;
use std::sync::Arc;
use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::Sender;
use std::sync::mpsc::TryRecvError;
use std::thread;
use std::time::Duration;
use std::time::Instant;

/// A complete snapshot of rows. Implementations block; [`Loader`] runs them on a worker thread.
pub trait GridSource: Send + Sync {
    fn fetch(&self) -> Result<Grid, FetchError>;

    /// Short label for the status line.
    fn describe(&self) -> String;
}

pub fn from_config(config: &SourceConfig) -> Result<Box<dyn GridSource>, FetchError> {
    Ok(match config.kind {
        SourceKind::Demo => Box::new(demo::DemoSource::new(
            config.demo_rows,
            Duration::from_millis(config.demo_latency_ms),
        )),
        SourceKind::Sheets => Box::new(sheets::SheetsSource::new(config)?),
    })
}

#[derive(Debug)]
pub enum LoadEvent {
    Loaded { generation: u64, grid: Grid },
    Failed { generation: u64, error: FetchError },
}

/// What the dashboard shows about the most recent fetch.
#[derive(Debug, Default)]
pub struct LoadState {
    pub is_loading: bool,
    pub error: Option<FetchError>,
}

/// Runs one fetch per [`Loader::request`] on its own thread and hands back the result.
///
/// Each request bumps a generation counter; a result tagged with an older generation is
/// dropped, so a slow refresh can never overwrite a newer one.
pub struct Loader {
    source: Arc<dyn GridSource>,
    tx: Sender<LoadEvent>,
    rx: Receiver<LoadEvent>,
    generation: u64,
    started: Option<Instant>,
    state: LoadState,
}

impl Loader {
    pub fn new(source: Box<dyn GridSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source: Arc::from(source),
            tx,
            rx,
            generation: 0,
            started: None,
            state: LoadState::default(),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    pub fn request(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        self.state.is_loading = true;
        self.started = Some(Instant::now());
        info!("fetch #{generation} from {}", self.source.describe());

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let event = match source.fetch() {
                Ok(grid) => LoadEvent::Loaded { generation, grid },
                Err(error) => LoadEvent::Failed { generation, error },
            };
            // The loader may be gone by now; nobody is left to tell.
            let _ = tx.send(event);
        });
    }

    /// Drains finished fetches. Returns the newest grid delivered for the current generation.
    pub fn poll(&mut self) -> Option<Grid> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if let Some(grid) = self.apply(event) {
                        latest = Some(grid);
                    }
                }
                Err(TryRecvError::Empty) => break,
                // We hold a sender ourselves, so this only happens during teardown.
                Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }

    fn apply(&mut self, event: LoadEvent) -> Option<Grid> {
        let elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();
        match event {
            LoadEvent::Loaded { generation, grid } if generation == self.generation => {
                info!(
                    "fetch #{generation} done in {elapsed:?}: {} rows",
                    grid.row_count()
                );
                self.state.is_loading = false;
                self.state.error = None;
                Some(grid)
            }
            LoadEvent::Failed { generation, error } if generation == self.generation => {
                warn!("fetch #{generation} failed after {elapsed:?}: {error}");
                self.state.is_loading = false;
                self.state.error = Some(error);
                None
            }
            LoadEvent::Loaded { generation, .. } | LoadEvent::Failed { generation, .. } => {
                debug!(
                    "dropping stale fetch #{generation} (current #{})",
                    self.generation
                );
                None
            }
        }
    }
}
