//! Player, Position, and per-role proficiency ratings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role categories a player can be rated in. `natural_position` picks which
/// proficiency feeds the team rating.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Position {
    /// Goalkeeper
    GK,
    /// Defender
    DF,
    /// Midfielder
    MD,
    /// Attacker
    AT,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::GK, Position::DF, Position::MD, Position::AT];
}

/// Proficiency per role, 0..=100.
pub type Ratings = BTreeMap<Position, u32>;

/// A squad member. Created at autofill time; ratings stay mutable afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub natural_position: Position,
    pub ratings: Ratings,
    pub is_captain: bool,
    /// None while unattached to a team.
    pub team_id: Option<String>,
}

impl Player {
    pub fn new(
        id: String,
        name: impl Into<String>,
        natural_position: Position,
        ratings: Ratings,
        is_captain: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            natural_position,
            ratings,
            is_captain,
            team_id: None,
        }
    }

    /// Proficiency at the player's own natural role, if rated there.
    pub fn natural_rating(&self) -> Option<u32> {
        self.ratings.get(&self.natural_position).copied()
    }

    /// Proficiency at a given role; absent entries count as 0 (used by scorer weighting).
    pub fn rating_at(&self, pos: Position) -> u32 {
        self.ratings.get(&pos).copied().unwrap_or(0)
    }
}

/// Partial update for a player; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdatePlayer {
    pub name: Option<String>,
    pub natural_position: Option<Position>,
    pub ratings: Option<Ratings>,
    pub is_captain: Option<bool>,
}
