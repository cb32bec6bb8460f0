// Core data structures for training sessions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::court::Zone;

/// A player on one of the two rosters
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Shirt number, when the coach recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number: None,
        }
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Team1,
    Team2,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Team1, Team::Team2];
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Team1 => write!(f, "team1"),
            Team::Team2 => write!(f, "team2"),
        }
    }
}

/// Kind of rally event. The Portuguese aliases keep files written by the
/// web version of the tracker importable.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[serde(alias = "saque")]
    Serve,
    #[serde(alias = "ataque")]
    Attack,
    #[serde(alias = "bloqueio")]
    Block,
    #[serde(alias = "recepção")]
    Reception,
    #[serde(alias = "defesa")]
    Defense,
    #[serde(alias = "erro")]
    Error,
    #[serde(alias = "ponto")]
    Point,
}

impl ActionType {
    pub const ALL: [ActionType; 7] = [
        ActionType::Serve,
        ActionType::Attack,
        ActionType::Block,
        ActionType::Reception,
        ActionType::Defense,
        ActionType::Error,
        ActionType::Point,
    ];
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Serve => write!(f, "serve"),
            ActionType::Attack => write!(f, "attack"),
            ActionType::Block => write!(f, "block"),
            ActionType::Reception => write!(f, "reception"),
            ActionType::Defense => write!(f, "defense"),
            ActionType::Error => write!(f, "error"),
            ActionType::Point => write!(f, "point"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActionResult {
    #[serde(alias = "positivo")]
    Positive,
    #[serde(alias = "negativo")]
    Negative,
    #[serde(alias = "ponto")]
    Point,
    #[serde(alias = "erro")]
    Error,
}

impl ActionResult {
    pub const ALL: [ActionResult; 4] = [
        ActionResult::Positive,
        ActionResult::Negative,
        ActionResult::Point,
        ActionResult::Error,
    ];

    pub fn is_point(&self) -> bool {
        matches!(self, ActionResult::Point)
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionResult::Positive => write!(f, "positive"),
            ActionResult::Negative => write!(f, "negative"),
            ActionResult::Point => write!(f, "point"),
            ActionResult::Error => write!(f, "error"),
        }
    }
}

/// One recorded rally event
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Display name of the player, not the roster id
    pub player: String,
    pub team: Team,
    pub action: ActionType,
    pub result: ActionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Action {
    pub(crate) fn from_new(new_action: NewAction, id: String, timestamp: i64) -> Self {
        Self {
            id,
            timestamp,
            player: new_action.player,
            team: new_action.team,
            action: new_action.action,
            result: new_action.result,
            zone: new_action.zone,
            notes: new_action.notes,
        }
    }

    /// Merge a partial update into this action. Id and timestamp never change.
    pub fn apply(&mut self, update: ActionUpdate) {
        if let Some(player) = update.player {
            self.player = player;
        }
        if let Some(team) = update.team {
            self.team = team;
        }
        if let Some(action) = update.action {
            self.action = action;
        }
        if let Some(result) = update.result {
            self.result = result;
        }
        if let Some(zone) = update.zone {
            self.zone = zone;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
    }
}

/// An action as entered by the coach, before the store stamps it
#[derive(Clone, Debug, PartialEq)]
pub struct NewAction {
    pub player: String,
    pub team: Team,
    pub action: ActionType,
    pub result: ActionResult,
    pub zone: Option<Zone>,
    pub notes: Option<String>,
}

impl NewAction {
    pub fn new(
        player: impl Into<String>,
        team: Team,
        action: ActionType,
        result: ActionResult,
    ) -> Self {
        Self {
            player: player.into(),
            team,
            action,
            result,
            zone: None,
            notes: None,
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update for an existing action. `None` leaves a field untouched;
/// for the optional fields `Some(None)` clears the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionUpdate {
    pub player: Option<String>,
    pub team: Option<Team>,
    pub action: Option<ActionType>,
    pub result: Option<ActionResult>,
    pub zone: Option<Option<Zone>>,
    pub notes: Option<Option<String>>,
}

impl ActionUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ActionUpdate::default()
    }
}

/// One scored period of play
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub set_number: u32,
    pub actions: Vec<Action>,
    pub team1_score: u32,
    pub team2_score: u32,
    pub is_completed: bool,
}

impl Set {
    pub fn new(set_number: u32) -> Self {
        Self {
            set_number,
            actions: Vec::new(),
            team1_score: 0,
            team2_score: 0,
            is_completed: false,
        }
    }

    pub fn score(&self) -> Score {
        Score {
            team1: self.team1_score,
            team2: self.team2_score,
        }
    }

    /// Append an action, crediting a point to its team when it scored
    pub(crate) fn record(&mut self, action: Action) {
        if action.result.is_point() {
            self.credit(action.team);
        }
        self.actions.push(action);
    }

    /// Rebuild the cached scores from the action log
    pub fn recompute_scores(&mut self) {
        self.team1_score = self.points_for(Team::Team1);
        self.team2_score = self.points_for(Team::Team2);
    }

    /// Points scored by `team` according to the action log
    pub fn points_for(&self, team: Team) -> u32 {
        self.actions
            .iter()
            .filter(|action| action.team == team && action.result.is_point())
            .count() as u32
    }

    fn credit(&mut self, team: Team) {
        match team {
            Team::Team1 => self.team1_score = self.team1_score.saturating_add(1),
            Team::Team2 => self.team2_score = self.team2_score.saturating_add(1),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub team1: u32,
    pub team2: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Teams {
    pub team1: Vec<Player>,
    pub team2: Vec<Player>,
}

impl Teams {
    pub fn roster(&self, team: Team) -> &[Player] {
        match team {
            Team::Team1 => &self.team1,
            Team::Team2 => &self.team2,
        }
    }

    pub fn player_count(&self) -> usize {
        self.team1.len() + self.team2.len()
    }
}

/// One training occasion with its rosters and sets
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    pub id: String,
    pub date: NaiveDate,
    /// Minutes; kept for file compatibility and always 0
    pub duration: u32,
    pub teams: Teams,
    pub sets: Vec<Set>,
    /// 1-based index into `sets` of the set under edit
    pub current_set: u32,
    pub is_active: bool,
}

impl TrainingSession {
    pub fn new(id: String, date: NaiveDate, team1: Vec<Player>, team2: Vec<Player>) -> Self {
        Self {
            id,
            date,
            duration: 0,
            teams: Teams { team1, team2 },
            sets: vec![Set::new(1)],
            current_set: 1,
            is_active: true,
        }
    }

    pub fn current_set(&self) -> Option<&Set> {
        self.set_index().and_then(|idx| self.sets.get(idx))
    }

    pub fn current_set_mut(&mut self) -> Option<&mut Set> {
        self.set_index().and_then(|idx| self.sets.get_mut(idx))
    }

    fn set_index(&self) -> Option<usize> {
        (self.current_set as usize).checked_sub(1)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.sets.iter().flat_map(|set| set.actions.iter())
    }

    pub fn total_actions(&self) -> usize {
        self.sets.iter().map(|set| set.actions.len()).sum()
    }

    pub fn find_action(&self, action_id: &str) -> Option<&Action> {
        self.actions().find(|action| action.id == action_id)
    }

    /// File name used when exporting this session
    pub fn export_file_name(&self) -> String {
        format!("treino-{}.json", self.date.format("%Y-%m-%d"))
    }
}
