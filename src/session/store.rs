// Session store: single source of truth for training sessions

use chrono::Utc;
use log::{debug, error, info, warn};

use super::types::{Action, ActionUpdate, NewAction, Player, Score, Set, TrainingSession};
use crate::errors::LiberoError;
use crate::statistics::SessionStatistics;
use crate::storage::{PersistedState, SessionPersistence};

/// Hands out time-derived ids that keep increasing even when two are
/// requested within the same millisecond.
#[derive(Debug, Default)]
struct IdGenerator {
    last: i64,
}

/// Ids further ahead of the clock than this were not generated from it
const MAX_ID_CLOCK_LEAD_MS: i64 = 24 * 60 * 60 * 1000;

impl IdGenerator {
    fn next(&mut self, now_ms: i64) -> String {
        self.last = now_ms.max(self.last.saturating_add(1));
        self.last.to_string()
    }

    /// Make sure ids never go back below ids already in use. Numeric ids far
    /// in the future are ignored; they cannot collide with clock-derived ones.
    fn observe(&mut self, id: &str, now_ms: i64) {
        if let Ok(value) = id.parse::<i64>() {
            if value <= now_ms.saturating_add(MAX_ID_CLOCK_LEAD_MS) {
                self.last = self.last.max(value);
            }
        }
    }

    fn observe_session(&mut self, session: &TrainingSession, now_ms: i64) {
        self.observe(&session.id, now_ms);
        for action in session.actions() {
            self.observe(&action.id, now_ms);
        }
    }
}

/// Owns the session list and the current session.
///
/// Mutations only touch the current session; `save_session` copies it back
/// into the list. After every mutating call the whole state is handed to the
/// persistence port. A failed write is logged and never rolls back the
/// in-memory change; `flush` surfaces it when the caller needs to know.
///
/// Operations that need a current session (or an existing id) come in two
/// flavors: `try_*` returns the reason as a `LiberoError`, the plain variant
/// treats a missing target as a silent no-op.
pub struct SessionStore<S: SessionPersistence> {
    sessions: Vec<TrainingSession>,
    current_session: Option<TrainingSession>,
    storage: S,
    ids: IdGenerator,
}

impl<S: SessionPersistence> SessionStore<S> {
    /// Open the store with whatever state the storage holds
    pub fn open(storage: S) -> Result<Self, LiberoError> {
        let state = storage.load()?.unwrap_or_default();
        info!(
            "Opened session store with {} session(s)",
            state.sessions.len()
        );

        let now_ms = Utc::now().timestamp_millis();
        let mut ids = IdGenerator::default();
        for session in state.sessions.iter().chain(state.current_session.iter()) {
            ids.observe_session(session, now_ms);
        }

        Ok(Self {
            sessions: state.sessions,
            current_session: state.current_session,
            storage,
            ids,
        })
    }

    pub fn sessions(&self) -> &[TrainingSession] {
        &self.sessions
    }

    pub fn current_session(&self) -> Option<&TrainingSession> {
        self.current_session.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn create_new_session(&mut self, team1: Vec<Player>, team2: Vec<Player>) -> String {
        let now = Utc::now();
        let id = self.ids.next(now.timestamp_millis());
        let session = TrainingSession::new(id.clone(), now.date_naive(), team1, team2);
        info!("Created training session {}", id);

        self.sessions.insert(0, session.clone());
        self.current_session = Some(session);
        self.commit();
        id
    }

    pub fn try_load_session(&mut self, id: &str) -> Result<(), LiberoError> {
        let session = self
            .sessions
            .iter()
            .find(|session| session.id == id)
            .cloned()
            .ok_or_else(|| LiberoError::SessionNotFound { id: id.to_string() })?;

        info!("Loaded training session {}", id);
        self.current_session = Some(session);
        self.commit();
        Ok(())
    }

    pub fn load_session(&mut self, id: &str) {
        absorb("load_session", self.try_load_session(id));
    }

    /// Record an action in the current set and return its id
    pub fn try_add_action(&mut self, new_action: NewAction) -> Result<String, LiberoError> {
        let now_ms = Utc::now().timestamp_millis();
        let session = self
            .current_session
            .as_mut()
            .ok_or(LiberoError::NoActiveSession)?;
        let set_number = session.current_set;
        let set = session
            .current_set_mut()
            .ok_or_else(|| LiberoError::InvalidUserInput {
                field: "currentSet".to_string(),
                reason: format!("set {} does not exist in this session", set_number),
            })?;

        let id = self.ids.next(now_ms);
        set.record(Action::from_new(new_action, id.clone(), now_ms));
        debug!("Recorded action {} in set {}", id, set_number);

        self.commit();
        Ok(id)
    }

    pub fn add_action(&mut self, new_action: NewAction) -> Option<String> {
        absorb("add_action", self.try_add_action(new_action))
    }

    /// Merge `update` into the action with `id`, wherever it lives in the
    /// current session. The owning set's score is rebuilt from its actions.
    pub fn try_update_action(&mut self, id: &str, update: ActionUpdate) -> Result<(), LiberoError> {
        let session = self
            .current_session
            .as_mut()
            .ok_or(LiberoError::NoActiveSession)?;

        let set = find_set_with_action(&mut session.sets, id)
            .ok_or_else(|| LiberoError::ActionNotFound { id: id.to_string() })?;
        if let Some(action) = set.actions.iter_mut().find(|action| action.id == id) {
            action.apply(update);
        }
        set.recompute_scores();
        debug!("Updated action {} in set {}", id, set.set_number);

        self.commit();
        Ok(())
    }

    pub fn update_action(&mut self, id: &str, update: ActionUpdate) {
        absorb("update_action", self.try_update_action(id, update));
    }

    pub fn try_delete_action(&mut self, id: &str) -> Result<(), LiberoError> {
        let session = self
            .current_session
            .as_mut()
            .ok_or(LiberoError::NoActiveSession)?;

        let set = find_set_with_action(&mut session.sets, id)
            .ok_or_else(|| LiberoError::ActionNotFound { id: id.to_string() })?;
        set.actions.retain(|action| action.id != id);
        set.recompute_scores();
        debug!("Deleted action {} from set {}", id, set.set_number);

        self.commit();
        Ok(())
    }

    pub fn delete_action(&mut self, id: &str) {
        absorb("delete_action", self.try_delete_action(id));
    }

    /// Open a new set and make it current. Returns its number.
    pub fn try_start_new_set(&mut self) -> Result<u32, LiberoError> {
        let session = self
            .current_session
            .as_mut()
            .ok_or(LiberoError::NoActiveSession)?;

        let set_number = session.sets.len() as u32 + 1;
        session.sets.push(Set::new(set_number));
        session.current_set = set_number;
        info!("Started set {} of session {}", set_number, session.id);

        self.commit();
        Ok(set_number)
    }

    pub fn start_new_set(&mut self) -> Option<u32> {
        absorb("start_new_set", self.try_start_new_set())
    }

    /// Flag the current set as completed. The current set does not change
    /// and the set keeps accepting actions.
    pub fn try_complete_current_set(&mut self) -> Result<(), LiberoError> {
        let session = self
            .current_session
            .as_mut()
            .ok_or(LiberoError::NoActiveSession)?;

        if let Some(set) = session.current_set_mut() {
            set.is_completed = true;
            info!("Completed set {}", set.set_number);
        }

        self.commit();
        Ok(())
    }

    pub fn complete_current_set(&mut self) {
        absorb("complete_current_set", self.try_complete_current_set());
    }

    /// Complete the current set when it has any action, then start a new one
    pub fn try_advance_set(&mut self) -> Result<u32, LiberoError> {
        let has_actions = self
            .current_set()
            .map(|set| !set.actions.is_empty())
            .ok_or(LiberoError::NoActiveSession)?;
        if has_actions {
            self.try_complete_current_set()?;
        }
        self.try_start_new_set()
    }

    pub fn advance_set(&mut self) -> Option<u32> {
        absorb("advance_set", self.try_advance_set())
    }

    /// Pretty JSON of the current session, or an empty string without one
    pub fn export_session(&self) -> String {
        match &self.current_session {
            Some(session) => export_json(session).unwrap_or_else(|e| {
                error!("Error exporting session {}: {}", session.id, e);
                String::new()
            }),
            None => String::new(),
        }
    }

    /// Pretty JSON of any session in the list
    pub fn export_session_by_id(&self, id: &str) -> Option<String> {
        let session = self.sessions.iter().find(|session| session.id == id)?;
        export_json(session)
            .map_err(|e| error!("Error exporting session {}: {}", id, e))
            .ok()
    }

    /// Parse `json` as a session, make it current and prepend it to the list.
    /// On failure nothing changes and the parse error is returned.
    pub fn import_session(&mut self, json: &str) -> Result<(), LiberoError> {
        let session: TrainingSession = serde_json::from_str(json).map_err(|e| {
            error!("Error importing session: {}", e);
            LiberoError::InvalidSessionJson { source: e }
        })?;

        if self.sessions.iter().any(|existing| existing.id == session.id) {
            warn!(
                "Imported session {} shares its id with a stored session",
                session.id
            );
        }
        self.ids.observe_session(&session, Utc::now().timestamp_millis());

        info!("Imported training session {}", session.id);
        self.sessions.insert(0, session.clone());
        self.current_session = Some(session);
        self.commit();
        Ok(())
    }

    /// Copy the current session back over its entries in the list
    pub fn try_save_session(&mut self) -> Result<(), LiberoError> {
        let current = self
            .current_session
            .as_ref()
            .ok_or(LiberoError::NoActiveSession)?;

        let mut replaced = 0;
        for session in self.sessions.iter_mut().filter(|s| s.id == current.id) {
            *session = current.clone();
            replaced += 1;
        }
        if replaced == 0 {
            debug!("Session {} is not in the session list", current.id);
        }

        self.commit();
        Ok(())
    }

    pub fn save_session(&mut self) {
        absorb("save_session", self.try_save_session());
    }

    /// Remove the first list entry with `id`, clearing the current session
    /// when it carries the same id
    pub fn try_delete_session(&mut self, id: &str) -> Result<(), LiberoError> {
        let position = self.sessions.iter().position(|session| session.id == id);
        let is_current = self
            .current_session
            .as_ref()
            .is_some_and(|session| session.id == id);

        if position.is_none() && !is_current {
            return Err(LiberoError::SessionNotFound { id: id.to_string() });
        }
        if let Some(position) = position {
            self.sessions.remove(position);
        }
        if is_current {
            self.current_session = None;
        }
        info!("Deleted training session {}", id);

        self.commit();
        Ok(())
    }

    pub fn delete_session(&mut self, id: &str) {
        absorb("delete_session", self.try_delete_session(id));
    }

    /// Forget every session and wipe the persisted record
    pub fn clear(&mut self) -> Result<(), LiberoError> {
        self.sessions.clear();
        self.current_session = None;
        self.storage.clear()
    }

    pub fn current_set(&self) -> Option<&Set> {
        self.current_session.as_ref()?.current_set()
    }

    pub fn current_score(&self) -> Score {
        self.current_set().map(Set::score).unwrap_or_default()
    }

    pub fn session_statistics(&self) -> Option<SessionStatistics> {
        self.current_session
            .as_ref()
            .map(SessionStatistics::from_session)
    }

    /// Write the current state through the persistence port
    pub fn flush(&mut self) -> Result<(), LiberoError> {
        let state = self.snapshot();
        self.storage.save(&state)
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            sessions: self.sessions.clone(),
            current_session: self.current_session.clone(),
        }
    }

    fn commit(&mut self) {
        if let Err(e) = self.flush() {
            warn!("Failed to persist session store: {}", e);
        }
    }
}

fn find_set_with_action<'a>(sets: &'a mut [Set], action_id: &str) -> Option<&'a mut Set> {
    sets.iter_mut()
        .find(|set| set.actions.iter().any(|action| action.id == action_id))
}

fn export_json(session: &TrainingSession) -> Result<String, LiberoError> {
    serde_json::to_string_pretty(session)
        .map_err(|e| LiberoError::StorageSerializeError { source: e })
}

/// Turn a missing-target error into a silent no-op; anything else is logged
fn absorb<T>(operation: &str, result: Result<T, LiberoError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_missing_target() => {
            debug!("{} skipped: {}", operation, e);
            None
        }
        Err(e) => {
            warn!("{} failed: {}", operation, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ActionResult, ActionType, Team, Zone};
    use crate::storage::InMemoryStorage;

    fn open_store() -> SessionStore<InMemoryStorage> {
        SessionStore::open(InMemoryStorage::new()).unwrap()
    }

    fn store_with_session() -> SessionStore<InMemoryStorage> {
        let mut store = open_store();
        store.create_new_session(
            vec![Player::new("1", "A"), Player::new("2", "B")],
            vec![Player::new("3", "C")],
        );
        store
    }

    fn attack_point(player: &str, team: Team) -> NewAction {
        NewAction::new(player, team, ActionType::Attack, ActionResult::Point)
    }

    #[test]
    fn test_id_generator_is_strictly_increasing() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next(100), "100");
        assert_eq!(ids.next(100), "101");
        assert_eq!(ids.next(50), "102");
        assert_eq!(ids.next(500), "500");

        ids.observe("9000", 600);
        ids.observe("not-a-number", 600);
        assert_eq!(ids.next(600), "9001");
    }

    #[test]
    fn test_id_generator_ignores_ids_far_ahead_of_clock() {
        let mut ids = IdGenerator::default();
        ids.observe(&i64::MAX.to_string(), 1_000);
        assert_eq!(ids.next(1_000), "1000");

        ids.last = i64::MAX;
        assert_eq!(ids.next(1_000), i64::MAX.to_string());
    }

    #[test]
    fn test_add_action_after_importing_maximal_ids() {
        let mut store = store_with_session();
        let mut session = store.current_session().unwrap().clone();
        session.id = i64::MAX.to_string();
        session.sets[0].actions.push(Action::from_new(
            attack_point("A", Team::Team1),
            i64::MAX.to_string(),
            0,
        ));
        store
            .import_session(&serde_json::to_string(&session).unwrap())
            .unwrap();

        let first = store.add_action(attack_point("A", Team::Team1)).unwrap();
        let second = store.add_action(attack_point("A", Team::Team1)).unwrap();
        assert!(second.parse::<i64>().unwrap() > first.parse::<i64>().unwrap());
        assert_ne!(first, i64::MAX.to_string());

        let new_session = store.create_new_session(vec![Player::new("1", "A")], vec![]);
        assert!(new_session.parse::<i64>().unwrap() > second.parse::<i64>().unwrap());
    }

    #[test]
    fn test_create_new_session() {
        let store = store_with_session();
        let session = store.current_session().unwrap();

        assert_eq!(session.date, Utc::now().date_naive());
        assert_eq!(session.duration, 0);
        assert_eq!(session.sets.len(), 1);
        assert_eq!(session.sets[0], Set::new(1));
        assert_eq!(session.current_set, 1);
        assert!(session.is_active);
        assert_eq!(store.sessions().len(), 1);
        assert_eq!(store.sessions()[0].id, session.id);
    }

    #[test]
    fn test_new_sessions_go_first_with_unique_ids() {
        let mut store = open_store();
        let first = store.create_new_session(vec![Player::new("1", "A")], vec![]);
        let second = store.create_new_session(vec![Player::new("1", "A")], vec![]);

        assert_ne!(first, second);
        assert_eq!(store.sessions()[0].id, second);
        assert_eq!(store.sessions()[1].id, first);
        assert_eq!(store.current_session().unwrap().id, second);
    }

    #[test]
    fn test_add_action_scores_point() {
        let mut store = store_with_session();
        let id = store.add_action(attack_point("A", Team::Team1));

        assert!(id.is_some());
        assert_eq!(store.current_score(), Score { team1: 1, team2: 0 });

        store.add_action(NewAction::new(
            "C",
            Team::Team2,
            ActionType::Serve,
            ActionResult::Error,
        ));
        assert_eq!(store.current_score(), Score { team1: 1, team2: 0 });
        assert_eq!(store.current_set().unwrap().actions.len(), 2);
    }

    #[test]
    fn test_add_action_assigns_fresh_ids() {
        let mut store = store_with_session();
        let first = store.add_action(attack_point("A", Team::Team1)).unwrap();
        let second = store.add_action(attack_point("A", Team::Team1)).unwrap();
        assert_ne!(first, second);

        let set = store.current_set().unwrap();
        assert_eq!(set.actions[0].id, first);
        assert!(set.actions[0].timestamp > 0);
    }

    #[test]
    fn test_operations_without_session_are_noops() {
        let mut store = open_store();

        assert!(store.add_action(attack_point("A", Team::Team1)).is_none());
        assert!(store.start_new_set().is_none());
        store.complete_current_set();
        store.update_action("1", ActionUpdate::default());
        store.delete_action("1");
        store.save_session();
        store.load_session("missing");

        assert!(store.current_session().is_none());
        assert!(store.sessions().is_empty());
        assert_eq!(store.current_score(), Score::default());
        assert!(store.current_set().is_none());
        assert!(store.session_statistics().is_none());
        assert_eq!(store.export_session(), "");

        assert!(matches!(
            store.try_add_action(attack_point("A", Team::Team1)),
            Err(LiberoError::NoActiveSession)
        ));
        assert!(matches!(
            store.try_load_session("missing"),
            Err(LiberoError::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_actions_go_to_current_set_only() {
        let mut store = store_with_session();
        store.add_action(attack_point("A", Team::Team1));
        assert_eq!(store.start_new_set(), Some(2));
        store.add_action(attack_point("C", Team::Team2));

        let session = store.current_session().unwrap();
        assert_eq!(session.sets[0].actions.len(), 1);
        assert_eq!(session.sets[0].score(), Score { team1: 1, team2: 0 });
        assert_eq!(session.sets[1].actions.len(), 1);
        assert_eq!(store.current_score(), Score { team1: 0, team2: 1 });
    }

    #[test]
    fn test_update_action_searches_all_sets_and_rescores() {
        let mut store = store_with_session();
        let id = store.add_action(attack_point("A", Team::Team1)).unwrap();
        store.start_new_set();

        store
            .try_update_action(
                &id,
                ActionUpdate {
                    result: Some(ActionResult::Negative),
                    notes: Some(Some("out".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();

        let session = store.current_session().unwrap();
        let action = &session.sets[0].actions[0];
        assert_eq!(action.result, ActionResult::Negative);
        assert_eq!(action.notes.as_deref(), Some("out"));
        assert_eq!(action.id, id);
        assert_eq!(session.sets[0].score(), Score::default());

        assert!(matches!(
            store.try_update_action("nope", ActionUpdate::default()),
            Err(LiberoError::ActionNotFound { .. })
        ));
    }

    #[test]
    fn test_delete_action_rescores() {
        let mut store = store_with_session();
        let id = store.add_action(attack_point("A", Team::Team1)).unwrap();
        store.add_action(attack_point("C", Team::Team2));

        store.delete_action(&id);
        let set = store.current_set().unwrap();
        assert_eq!(set.actions.len(), 1);
        assert_eq!(set.score(), Score { team1: 0, team2: 1 });

        // Unknown ids change nothing
        store.delete_action(&id);
        assert_eq!(store.current_set().unwrap().actions.len(), 1);
    }

    #[test]
    fn test_start_new_set() {
        let mut store = store_with_session();
        store.start_new_set();
        store.start_new_set();

        let session = store.current_session().unwrap();
        assert_eq!(session.sets.len(), 3);
        assert_eq!(session.current_set, 3);
        assert_eq!(session.sets[2], Set::new(3));
        assert!(!session.sets[0].is_completed);
    }

    #[test]
    fn test_completed_set_still_accepts_actions() {
        let mut store = store_with_session();
        store.complete_current_set();
        assert!(store.current_set().unwrap().is_completed);
        assert_eq!(store.current_session().unwrap().current_set, 1);

        store.add_action(attack_point("A", Team::Team1));
        assert_eq!(store.current_score(), Score { team1: 1, team2: 0 });
    }

    #[test]
    fn test_advance_set() {
        let mut store = store_with_session();
        // Empty set is left open
        assert_eq!(store.advance_set(), Some(2));
        assert!(!store.current_session().unwrap().sets[0].is_completed);

        store.add_action(attack_point("A", Team::Team1));
        assert_eq!(store.advance_set(), Some(3));
        assert!(store.current_session().unwrap().sets[1].is_completed);
        assert!(open_store().advance_set().is_none());
    }

    #[test]
    fn test_mutations_stay_on_current_until_saved() {
        let mut store = store_with_session();
        let session_id = store.current_session().unwrap().id.clone();
        store.add_action(attack_point("A", Team::Team1));

        assert!(store.sessions()[0].sets[0].actions.is_empty());
        store.save_session();
        assert_eq!(store.sessions()[0].sets[0].actions.len(), 1);
        assert_eq!(store.sessions()[0].id, session_id);
    }

    #[test]
    fn test_load_session_replaces_current_without_reordering() {
        let mut store = open_store();
        let first = store.create_new_session(vec![Player::new("1", "A")], vec![]);
        let second = store.create_new_session(vec![Player::new("1", "A")], vec![]);

        store.load_session(&first);
        assert_eq!(store.current_session().unwrap().id, first);
        assert_eq!(store.sessions()[0].id, second);

        store.load_session("missing");
        assert_eq!(store.current_session().unwrap().id, first);
    }

    #[test]
    fn test_delete_session() {
        let mut store = open_store();
        let first = store.create_new_session(vec![Player::new("1", "A")], vec![]);
        let second = store.create_new_session(vec![Player::new("1", "A")], vec![]);

        store.delete_session(&first);
        assert_eq!(store.sessions().len(), 1);
        assert_eq!(store.current_session().unwrap().id, second);

        store.delete_session(&second);
        assert!(store.sessions().is_empty());
        assert!(store.current_session().is_none());

        store.delete_session("missing");
        assert!(matches!(
            store.try_delete_session("missing"),
            Err(LiberoError::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_save_session_overwrites_every_duplicate_entry() {
        let mut store = store_with_session();
        let exported = store.export_session();
        store.import_session(&exported).unwrap();
        assert_eq!(store.sessions().len(), 2);

        store.add_action(attack_point("A", Team::Team1));
        store.save_session();

        let current = store.current_session().unwrap().clone();
        assert_eq!(current.sets[0].actions.len(), 1);
        assert!(store.sessions().iter().all(|session| *session == current));
    }

    #[test]
    fn test_export_and_import_round_trip() {
        let mut store = store_with_session();
        store.add_action(attack_point("A", Team::Team1).with_zone(Zone::new(4).unwrap()));
        let exported = store.export_session();
        let original = store.current_session().unwrap().clone();

        store.import_session(&exported).unwrap();
        assert_eq!(store.current_session(), Some(&original));
        assert_eq!(store.sessions().len(), 2);
        assert_eq!(store.sessions()[0], original);
    }

    #[test]
    fn test_import_invalid_json_keeps_state() {
        let mut store = store_with_session();
        let before = store.snapshot();

        let result = store.import_session("{not json");
        assert!(matches!(result, Err(LiberoError::InvalidSessionJson { .. })));
        assert_eq!(store.snapshot(), before);

        // Valid JSON with the wrong shape is rejected the same way
        assert!(store.import_session("{\"id\": 3}").is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_export_session_by_id() {
        let mut store = store_with_session();
        let id = store.current_session().unwrap().id.clone();

        let exported = store.export_session_by_id(&id).unwrap();
        assert!(exported.contains("\"setNumber\": 1"));
        assert!(store.export_session_by_id("missing").is_none());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = store_with_session();
        let saves = store.storage().save_count();

        store.add_action(attack_point("A", Team::Team1));
        store.start_new_set();
        store.complete_current_set();
        assert_eq!(store.storage().save_count(), saves + 3);

        let persisted = store.storage().state().unwrap();
        assert_eq!(persisted.current_session.as_ref().unwrap().sets.len(), 2);
    }

    #[test]
    fn test_reopen_restores_state_and_id_floor() {
        let mut store = store_with_session();
        let action_id = store.add_action(attack_point("A", Team::Team1)).unwrap();
        store.save_session();

        let state = store.snapshot();
        let mut reopened = SessionStore::open(InMemoryStorage::with_state(state.clone())).unwrap();
        assert_eq!(reopened.snapshot(), state);

        let next_id = reopened.add_action(attack_point("A", Team::Team1)).unwrap();
        assert!(next_id.parse::<i64>().unwrap() > action_id.parse::<i64>().unwrap());
    }

    #[test]
    fn test_clear() {
        let mut store = store_with_session();
        store.clear().unwrap();
        assert!(store.sessions().is_empty());
        assert!(store.current_session().is_none());
        assert!(store.storage().state().is_none());
    }

    #[test]
    fn test_statistics_scenario() {
        let mut store = store_with_session();
        store.add_action(NewAction::new(
            "A",
            Team::Team1,
            ActionType::Attack,
            ActionResult::Positive,
        ));
        store.add_action(NewAction::new(
            "A",
            Team::Team1,
            ActionType::Serve,
            ActionResult::Point,
        ));

        let stats = store.session_statistics().unwrap();
        assert_eq!(stats.total_actions, 2);
        assert_eq!(stats.player_actions("A", ActionType::Attack), 1);
        assert_eq!(stats.player_actions("A", ActionType::Serve), 1);
        assert_eq!(stats.player_actions("A", ActionType::Defense), 0);
        assert_eq!(stats.player_points("A"), 1);
    }
}
