use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::api::SettingsEndpoint;
use crate::settings::Settings;

/// Lifecycle of the committed snapshot. `Idle` only exists before the first
/// successful round trip; afterwards the machine rests in `Ready` between
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Idle,
    Loading,
    Ready,
    Saving,
}

/// Outcome of a finished endpoint operation, surfaced once per `poll`.
#[derive(Debug)]
pub enum StoreEvent {
    Loaded(Settings),
    LoadFailed(String),
    Saved(Settings),
    SaveFailed(String),
    ResetDone(Settings),
    ResetFailed(String),
}

enum WorkerResult {
    Load(anyhow::Result<Settings>),
    Save(Settings, anyhow::Result<()>),
    Reset(anyhow::Result<Settings>),
}

/// Owner of the committed settings snapshot.
///
/// Endpoint calls run on short-lived worker threads; results come back over
/// a channel and are applied inside `poll`, so the committed snapshot is
/// only ever mutated on the UI thread, on confirmed success. Drafts live in
/// the panel and are invisible here until a save lands.
pub struct SettingsStore {
    endpoint: Arc<dyn SettingsEndpoint>,
    committed: Settings,
    state: StoreState,
    synced: bool,
    tx: Sender<WorkerResult>,
    rx: Receiver<WorkerResult>,
}

impl SettingsStore {
    pub fn new(endpoint: Arc<dyn SettingsEndpoint>) -> Self {
        let (tx, rx) = channel();
        Self {
            endpoint,
            committed: Settings::default(),
            state: StoreState::Idle,
            synced: false,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// True while an endpoint call is in flight.
    pub fn busy(&self) -> bool {
        matches!(self.state, StoreState::Loading | StoreState::Saving)
    }

    /// Clone of the committed snapshot.
    pub fn snapshot(&self) -> Settings {
        self.committed.clone()
    }

    pub fn ma_months(&self) -> u32 {
        self.committed.ma_months
    }

    pub fn thresholds(&self) -> (u32, u32) {
        (self.committed.threshold_low, self.committed.threshold_high)
    }

    pub fn runway_threshold(&self) -> f32 {
        self.committed.runway_threshold
    }

    /// Fetch the remote snapshot. Refused while another operation is in
    /// flight; returns whether the load was started.
    pub fn begin_load(&mut self) -> bool {
        if self.busy() {
            tracing::debug!("settings load skipped, store is busy");
            return false;
        }
        self.state = StoreState::Loading;
        let endpoint = Arc::clone(&self.endpoint);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(WorkerResult::Load(endpoint.load()));
        });
        true
    }

    /// Push a draft to the service. Refused while another operation is in
    /// flight so a stale draft can never overtake a pending save.
    pub fn begin_save(&mut self, draft: Settings) -> bool {
        if self.busy() {
            tracing::debug!("settings save skipped, store is busy");
            return false;
        }
        self.state = StoreState::Saving;
        let endpoint = Arc::clone(&self.endpoint);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = endpoint.save(&draft);
            let _ = tx.send(WorkerResult::Save(draft, outcome));
        });
        true
    }

    /// Ask the service to restore its defaults. Callers confirm with the
    /// user first; a cancelled confirmation must never reach this method.
    pub fn begin_reset(&mut self) -> bool {
        if self.busy() {
            tracing::debug!("settings reset skipped, store is busy");
            return false;
        }
        self.state = StoreState::Saving;
        let endpoint = Arc::clone(&self.endpoint);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(WorkerResult::Reset(endpoint.reset()));
        });
        true
    }

    /// Drain finished operations, applying committed-state changes.
    ///
    /// Called once per frame by the app; it keeps working after the panel
    /// closes, so a save that outlives its panel still lands.
    pub fn poll(&mut self) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            match result {
                WorkerResult::Load(Ok(settings)) => {
                    self.committed = settings.clone();
                    self.settle(true);
                    events.push(StoreEvent::Loaded(settings));
                }
                WorkerResult::Load(Err(err)) => {
                    tracing::warn!("settings load failed: {err:#}");
                    self.settle(false);
                    events.push(StoreEvent::LoadFailed(err.to_string()));
                }
                WorkerResult::Save(draft, Ok(())) => {
                    self.committed = draft.clone();
                    self.settle(true);
                    events.push(StoreEvent::Saved(draft));
                }
                WorkerResult::Save(_, Err(err)) => {
                    tracing::warn!("settings save failed: {err:#}");
                    self.settle(false);
                    events.push(StoreEvent::SaveFailed(err.to_string()));
                }
                WorkerResult::Reset(Ok(defaults)) => {
                    self.committed = defaults.clone();
                    self.settle(true);
                    events.push(StoreEvent::ResetDone(defaults));
                }
                WorkerResult::Reset(Err(err)) => {
                    tracing::warn!("settings reset failed: {err:#}");
                    self.settle(false);
                    events.push(StoreEvent::ResetFailed(err.to_string()));
                }
            }
        }
        events
    }

    fn settle(&mut self, succeeded: bool) {
        if succeeded {
            self.synced = true;
        }
        // A failure before the first sync falls back to Idle; afterwards the
        // committed snapshot is still valid, so the store stays Ready.
        self.state = if self.synced {
            StoreState::Ready
        } else {
            StoreState::Idle
        };
    }
}
