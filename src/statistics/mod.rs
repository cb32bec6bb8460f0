// Derived statistics over training sessions

use serde::Serialize;
use std::collections::BTreeMap;

use crate::session::{ActionType, Team, TrainingSession};

/// Count of actions for every action type. All seven types are always present.
pub type ActionCounts = BTreeMap<ActionType, usize>;

fn empty_counts() -> ActionCounts {
    ActionType::ALL.iter().map(|action| (*action, 0)).collect()
}

/// Aggregates over every set of a session.
///
/// Players are keyed by display name, the same string stored on each action,
/// so two roster entries sharing a name share one bucket.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatistics {
    pub total_actions: usize,
    pub actions_by_player: BTreeMap<String, ActionCounts>,
    pub points_by_player: BTreeMap<String, usize>,
    pub actions_by_team: BTreeMap<Team, ActionCounts>,
    pub points_by_team: BTreeMap<Team, usize>,
}

impl SessionStatistics {
    pub fn from_session(session: &TrainingSession) -> Self {
        let mut stats = Self {
            total_actions: 0,
            actions_by_player: BTreeMap::new(),
            points_by_player: BTreeMap::new(),
            actions_by_team: Team::ALL.iter().map(|team| (*team, empty_counts())).collect(),
            points_by_team: Team::ALL.iter().map(|team| (*team, 0)).collect(),
        };

        for action in session.actions() {
            stats.total_actions += 1;

            *stats
                .actions_by_player
                .entry(action.player.clone())
                .or_insert_with(empty_counts)
                .entry(action.action)
                .or_insert(0) += 1;
            *stats
                .actions_by_team
                .entry(action.team)
                .or_insert_with(empty_counts)
                .entry(action.action)
                .or_insert(0) += 1;

            if action.result.is_point() {
                *stats
                    .points_by_player
                    .entry(action.player.clone())
                    .or_insert(0) += 1;
                *stats.points_by_team.entry(action.team).or_insert(0) += 1;
            }
        }

        stats
    }

    pub fn player_actions(&self, player: &str, action: ActionType) -> usize {
        self.actions_by_player
            .get(player)
            .and_then(|counts| counts.get(&action))
            .copied()
            .unwrap_or(0)
    }

    pub fn player_points(&self, player: &str) -> usize {
        self.points_by_player.get(player).copied().unwrap_or(0)
    }
}

/// Overview of a stored session for the history listing
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub date: String,
    pub set_count: usize,
    pub player_count: usize,
    pub total_actions: usize,
    /// Minutes between the first recorded action and the last one
    pub elapsed_minutes: i64,
}

impl SessionSummary {
    pub fn from_session(session: &TrainingSession) -> Self {
        Self {
            id: session.id.clone(),
            date: session.date.format("%Y-%m-%d").to_string(),
            set_count: session.sets.len(),
            player_count: session.teams.player_count(),
            total_actions: session.total_actions(),
            elapsed_minutes: elapsed_minutes(session),
        }
    }
}

/// Time from the first action of the first set to the last action of the
/// last set, rounded to whole minutes. 0 when either set has no actions.
pub fn elapsed_minutes(session: &TrainingSession) -> i64 {
    let first = session.sets.first().and_then(|set| set.actions.first());
    let last = session.sets.last().and_then(|set| set.actions.last());

    match (first, last) {
        (Some(first), Some(last)) => {
            let elapsed_ms = (last.timestamp - first.timestamp) as f64;
            (elapsed_ms / 60_000.0).round() as i64
        }
        _ => 0,
    }
}
