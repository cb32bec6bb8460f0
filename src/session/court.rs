// Court zones an action can be tagged with

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::LiberoError;

/// One of the six numbered court zones (1-6).
///
/// Zones are validated on construction and on deserialization, so an
/// imported session can never carry a zone outside the court.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Zone(u8);

impl Zone {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(zone: u8) -> Result<Self, LiberoError> {
        if (Self::MIN..=Self::MAX).contains(&zone) {
            Ok(Self(zone))
        } else {
            Err(LiberoError::InvalidZone { zone })
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Layout details of this zone on the court diagram
    pub fn court_zone(&self) -> &'static CourtZone {
        // Zones are validated, so the lookup cannot miss
        &COURT_ZONES[(self.0 - Self::MIN) as usize]
    }
}

impl TryFrom<u8> for Zone {
    type Error = LiberoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Zone::new(value)
    }
}

impl From<Zone> for u8 {
    fn from(value: Zone) -> Self {
        value.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourtRow {
    Front,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourtSide {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CourtZone {
    pub id: u8,
    pub row: CourtRow,
    pub side: CourtSide,
}

/// Standard volleyball rotation numbering, counter-clockwise from the server
pub const COURT_ZONES: [CourtZone; 6] = [
    CourtZone {
        id: 1,
        row: CourtRow::Back,
        side: CourtSide::Right,
    },
    CourtZone {
        id: 2,
        row: CourtRow::Front,
        side: CourtSide::Right,
    },
    CourtZone {
        id: 3,
        row: CourtRow::Front,
        side: CourtSide::Center,
    },
    CourtZone {
        id: 4,
        row: CourtRow::Front,
        side: CourtSide::Left,
    },
    CourtZone {
        id: 5,
        row: CourtRow::Back,
        side: CourtSide::Left,
    },
    CourtZone {
        id: 6,
        row: CourtRow::Back,
        side: CourtSide::Center,
    },
];
