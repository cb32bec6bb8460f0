// Training session data model and the store that mutates it

pub mod court;
pub mod roster;
pub mod store;
pub mod types;

pub use court::{COURT_ZONES, CourtRow, CourtSide, CourtZone, Zone};
pub use roster::{default_roster, parse_player, prepare_roster};
pub use store::SessionStore;
pub use types::{
    Action, ActionResult, ActionType, ActionUpdate, NewAction, Player, Score, Set, Team, Teams,
    TrainingSession,
};
