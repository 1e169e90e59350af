//! Tournament record: bracket, alive teams, current round, champion.

use crate::models::game::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    InProgress,
    Finished,
}

/// A single-elimination tournament. Invariants: at most one record may be
/// InProgress at a time, and `bracket` only ever grows (a reset deletes the
/// whole record instead of truncating it).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    pub status: TournamentStatus,
    pub current_round: Round,
    /// Match ids, appended round by round in creation order.
    pub bracket: Vec<String>,
    /// Team ids still alive in the bracket.
    pub teams: Vec<String>,
    /// Champion team id, set when status flips to Finished.
    pub winner: Option<String>,
    pub winner_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    pub fn new(id: String, teams: Vec<String>) -> Self {
        Self {
            id,
            status: TournamentStatus::InProgress,
            current_round: Round::QuarterFinal,
            bracket: Vec::new(),
            teams,
            winner: None,
            winner_name: None,
            created_at: Utc::now(),
        }
    }
}
