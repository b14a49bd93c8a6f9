use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use engine_logging::{engine_debug, engine_info};
use gatherer_core::SeenSet;
use thiserror::Error;

use crate::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read seen emails from {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write seen emails: {0}")]
    Persist(#[from] PersistError),
}

/// Durable home of the seen set. Loaded once per session and saved on every
/// exit path.
pub trait SeenStore: Send + Sync {
    fn load(&self) -> Result<SeenSet, StoreError>;
    fn save(&self, seen: &SeenSet) -> Result<(), StoreError>;
}

/// Newline-delimited email file. A missing file is an empty set; any other
/// read failure is an error so an unreadable history is never overwritten.
#[derive(Debug, Clone)]
pub struct FileSeenStore {
    path: PathBuf,
}

impl FileSeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeenStore for FileSeenStore {
    fn load(&self) -> Result<SeenSet, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let seen = SeenSet::parse(&content);
                engine_info!("Loaded {} seen emails from {:?}", seen.len(), self.path);
                Ok(seen)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                engine_debug!("No seen-email file at {:?}; starting empty", self.path);
                Ok(SeenSet::new())
            }
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        AtomicFileWriter::new(&self.path).write(seen.to_lines().as_bytes())?;
        engine_debug!("Wrote {} seen emails to {:?}", seen.len(), self.path);
        Ok(())
    }
}

/// In-process stand-in for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySeenStore {
    seen: Mutex<SeenSet>,
    saves: AtomicUsize,
}

impl MemorySeenStore {
    pub fn new(seed: SeenSet) -> Self {
        Self {
            seen: Mutex::new(seed),
            saves: AtomicUsize::new(0),
        }
    }

    /// The last saved (or seeded) set.
    pub fn snapshot(&self) -> SeenSet {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SeenStore for MemorySeenStore {
    fn load(&self) -> Result<SeenSet, StoreError> {
        // Reload semantics: inserts made before the save no longer count as new.
        Ok(SeenSet::from_iter(self.snapshot().iter()))
    }

    fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        *self.seen.lock().unwrap_or_else(PoisonError::into_inner) = seen.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
