use std::fmt;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use gatherer_core::{
    Collector, FilterCriteria, Flow, Harvest, Normalizer, RetrievalBounds, SessionState,
    SessionStats, StopReason,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::{GateSettings, Pager, RequestGate, RetrievalError, SeenStore, StoreError, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSettings {
    pub gate: GateSettings,
    /// Save the seen set after every page instead of only at the end.
    pub checkpoint_each_page: bool,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A session that stopped on an error. Contacts accepted before the error
/// are still handed back, and the seen set was saved on a best-effort basis.
#[derive(Debug)]
pub struct SessionFailure {
    pub error: SessionError,
    pub partial: Harvest,
    /// Set when saving the seen set during finalization also failed.
    pub finalize_error: Option<StoreError>,
}

impl fmt::Display for SessionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (after {} pages and {} contacts)",
            self.error, self.partial.stats.pages_fetched, self.partial.stats.accepted
        )?;
        if let Some(err) = &self.finalize_error {
            write!(f, "; additionally {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SessionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// One retrieval run: load the seen set, page through results until a stop
/// condition, then save the seen set on every exit path.
pub struct Session<'a> {
    transport: &'a dyn Transport,
    store: &'a dyn SeenStore,
    normalizer: Normalizer,
    settings: SessionSettings,
    state: SessionState,
}

impl<'a> Session<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        store: &'a dyn SeenStore,
        normalizer: Normalizer,
        settings: SessionSettings,
    ) -> Self {
        Self {
            transport,
            store,
            normalizer,
            settings,
            state: SessionState::Init,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub async fn run(
        &mut self,
        criteria: &FilterCriteria,
        bounds: RetrievalBounds,
        cancel: &CancellationToken,
    ) -> Result<Harvest, SessionFailure> {
        let seen = match self.store.load() {
            Ok(seen) => seen,
            Err(err) => {
                self.transition(SessionState::Failed);
                return Err(SessionFailure {
                    error: err.into(),
                    partial: Harvest {
                        contacts: Vec::new(),
                        stats: SessionStats::default(),
                        stop: None,
                    },
                    finalize_error: None,
                });
            }
        };

        let mut collector = Collector::new(self.normalizer.clone(), seen, bounds);
        let mut gate = RequestGate::new(self.settings.gate);
        self.transition(SessionState::Fetching);

        let outcome = self
            .fetch(&mut collector, &mut gate, criteria, bounds, cancel)
            .await;

        match outcome {
            Ok(stop) => {
                let (harvest, seen) = collector.into_parts(Some(stop));
                match self.store.save(&seen) {
                    Ok(()) => {
                        self.transition(SessionState::Done(stop));
                        engine_info!("Session finished ({}): {}", stop, harvest.stats);
                        Ok(harvest)
                    }
                    Err(err) => {
                        self.transition(SessionState::Failed);
                        engine_error!("Failed to persist seen emails: {}", err);
                        Err(SessionFailure {
                            error: err.into(),
                            partial: harvest,
                            finalize_error: None,
                        })
                    }
                }
            }
            Err(error) => {
                self.transition(SessionState::Failed);
                let (partial, seen) = collector.into_parts(None);
                engine_error!("Session failed: {} ({})", error, partial.stats);
                let finalize_error = self.store.save(&seen).err();
                if let Some(err) = &finalize_error {
                    engine_error!("Failed to persist seen emails after failure: {}", err);
                }
                Err(SessionFailure {
                    error,
                    partial,
                    finalize_error,
                })
            }
        }
    }

    async fn fetch(
        &self,
        collector: &mut Collector,
        gate: &mut RequestGate,
        criteria: &FilterCriteria,
        bounds: RetrievalBounds,
        cancel: &CancellationToken,
    ) -> Result<StopReason, SessionError> {
        let mut pager = Pager::new(self.transport, gate, criteria, bounds);
        loop {
            let page = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    engine_warn!("Interrupted; finalizing with {} contacts", collector.stats().accepted);
                    return Ok(StopReason::Interrupted);
                }
                page = pager.next_page() => page?,
            };

            let Some(page) = page else {
                return Ok(if pager.is_exhausted() {
                    StopReason::Exhausted
                } else {
                    StopReason::PageBound
                });
            };

            let flow = collector.offer_page(page);
            engine_debug!("After page {}: {}", pager.pages_fetched(), collector.stats());
            if self.settings.checkpoint_each_page {
                self.store.save(collector.seen())?;
            }
            if let Flow::Stop(reason) = flow {
                return Ok(reason);
            }
        }
    }

    fn transition(&mut self, next: SessionState) {
        engine_debug!("Session {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
