// Persistence of the session store
// The store talks to storage only through the SessionPersistence trait, so the
// backing medium can be swapped (file on disk, in memory for tests)

pub mod file;

use serde::{Deserialize, Serialize};

use crate::errors::LiberoError;
use crate::session::TrainingSession;

pub use file::FileBasedStorage;

/// Everything the store persists: the session list and the current session
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub sessions: Vec<TrainingSession>,
    #[serde(default)]
    pub current_session: Option<TrainingSession>,
}

/// Trait defining the interface for session store persistence
pub trait SessionPersistence {
    /// Load the last saved state, `None` when nothing was saved yet
    fn load(&self) -> Result<Option<PersistedState>, LiberoError>;

    /// Replace the saved state
    fn save(&mut self, state: &PersistedState) -> Result<(), LiberoError>;

    /// Remove the saved state entirely
    fn clear(&mut self) -> Result<(), LiberoError>;
}

/// Keeps the state in memory only. Used by tests and when persistence is
/// not wanted.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    state: Option<PersistedState>,
    saves: usize,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: Some(state),
            saves: 0,
        }
    }

    /// Number of successful `save` calls
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn state(&self) -> Option<&PersistedState> {
        self.state.as_ref()
    }
}

impl SessionPersistence for InMemoryStorage {
    fn load(&self) -> Result<Option<PersistedState>, LiberoError> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), LiberoError> {
        self.state = Some(state.clone());
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), LiberoError> {
        self.state = None;
        Ok(())
    }
}

impl<T: SessionPersistence + ?Sized> SessionPersistence for Box<T> {
    fn load(&self) -> Result<Option<PersistedState>, LiberoError> {
        (**self).load()
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), LiberoError> {
        (**self).save(state)
    }

    fn clear(&mut self) -> Result<(), LiberoError> {
        (**self).clear()
    }
}
