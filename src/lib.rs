// Library interface for libero
// This allows integration tests to access internal modules

pub mod config;
pub mod errors;
pub mod session;
pub mod statistics;
pub mod storage;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::LiberoError;
pub use session::{
    Action, ActionResult, ActionType, ActionUpdate, NewAction, Player, Score, Set, SessionStore,
    Team, TrainingSession, Zone,
};
pub use statistics::{SessionStatistics, SessionSummary};
pub use storage::{FileBasedStorage, InMemoryStorage, PersistedState, SessionPersistence};
