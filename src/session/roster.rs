// Roster preparation for new sessions

use crate::errors::LiberoError;

use super::types::{Player, Team};

const DEFAULT_TEAM1: [(&str, &str); 6] = [
    ("1", "Kel"),
    ("2", "Luís"),
    ("3", "Pedro"),
    ("4", "João"),
    ("5", "Mateus"),
    ("6", "Rafael"),
];

const DEFAULT_TEAM2: [(&str, &str); 6] = [
    ("7", "Carlos"),
    ("8", "Bruno"),
    ("9", "André"),
    ("10", "Felipe"),
    ("11", "Hugo"),
    ("12", "Tiago"),
];

/// Roster offered when the coach does not enter any names
pub fn default_roster(team: Team) -> Vec<Player> {
    let players = match team {
        Team::Team1 => &DEFAULT_TEAM1,
        Team::Team2 => &DEFAULT_TEAM2,
    };
    players
        .iter()
        .map(|(id, name)| Player::new(*id, *name))
        .collect()
}

/// Drop players without a name and reject a roster that ends up empty.
/// Names are trimmed.
pub fn prepare_roster(team: Team, players: Vec<Player>) -> Result<Vec<Player>, LiberoError> {
    let roster: Vec<Player> = players
        .into_iter()
        .filter_map(|mut player| {
            let name = player.name.trim();
            if name.is_empty() {
                return None;
            }
            player.name = name.to_string();
            Some(player)
        })
        .collect();

    if roster.is_empty() {
        return Err(LiberoError::InvalidUserInput {
            field: team.to_string(),
            reason: "a team needs at least one named player".to_string(),
        });
    }
    Ok(roster)
}

/// Parse a player given as `name` or `number:name`
pub fn parse_player(id: impl Into<String>, spec: &str) -> Result<Player, LiberoError> {
    match spec.split_once(':') {
        Some((number, name)) => {
            let number = number
                .trim()
                .parse::<u32>()
                .map_err(|e| LiberoError::InvalidUserInput {
                    field: "player".to_string(),
                    reason: format!("invalid shirt number in '{}': {}", spec, e),
                })?;
            Ok(Player::new(id, name.trim()).with_number(number))
        }
        None => Ok(Player::new(id, spec.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let team1 = default_roster(Team::Team1);
        let team2 = default_roster(Team::Team2);

        assert_eq!(team1.len(), 6);
        assert_eq!(team2.len(), 6);
        assert_eq!(team1[0].name, "Kel");
        assert_eq!(team2[5].id, "12");
    }

    #[test]
    fn test_prepare_roster_drops_blank_names() {
        let players = vec![
            Player::new("1", "  Ana "),
            Player::new("2", "   "),
            Player::new("3", ""),
        ];
        let roster = prepare_roster(Team::Team1, players).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "Ana");
    }

    #[test]
    fn test_prepare_roster_rejects_empty_team() {
        let result = prepare_roster(Team::Team2, vec![Player::new("1", " ")]);
        assert!(matches!(
            result,
            Err(LiberoError::InvalidUserInput { field, .. }) if field == "team2"
        ));
    }

    #[test]
    fn test_parse_player() {
        let player = parse_player("p1", "7:Kel").unwrap();
        assert_eq!(player.name, "Kel");
        assert_eq!(player.number, Some(7));

        let player = parse_player("p2", "Bruno").unwrap();
        assert_eq!(player.name, "Bruno");
        assert!(player.number.is_none());

        assert!(parse_player("p3", "x:Hugo").is_err());
    }
}
