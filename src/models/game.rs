//! Match, Round, GoalEvent: one fixture in the knockout bracket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stage of the bracket a match belongs to. Ordered: QuarterFinal < SemiFinal < Final.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Round {
    QuarterFinal,
    SemiFinal,
    Final,
}

impl Round {
    /// The round that follows this one, or None after the final.
    pub fn next(self) -> Option<Round> {
        match self {
            Round::QuarterFinal => Some(Round::SemiFinal),
            Round::SemiFinal => Some(Round::Final),
            Round::Final => None,
        }
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Round::QuarterFinal => write!(f, "QuarterFinal"),
            Round::SemiFinal => write!(f, "SemiFinal"),
            Round::Final => write!(f, "Final"),
        }
    }
}

/// Lifecycle of a match. Once Simulated, the record is immutable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Simulated,
}

/// One goal. Minutes are always labelled 1..=90; extra-time goals reuse the
/// regulation clock.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GoalEvent {
    pub minute: u32,
    pub team_id: String,
    pub player_id: String,
}

/// Final score pair.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// A bracket fixture. `goal_events` are kept sorted by minute ascending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub tournament_id: String,
    pub round: Round,
    pub home_team: String,
    pub away_team: String,
    pub status: MatchStatus,
    pub score: Score,
    pub goal_events: Vec<GoalEvent>,
    /// Winning team id; None until simulated.
    pub winner: Option<String>,
    pub winner_name: Option<String>,
    pub went_extra: bool,
    pub shootout: bool,
    pub commentary: Vec<String>,
    pub played_at: Option<DateTime<Utc>>,
}

impl Match {
    pub fn new(
        id: String,
        tournament_id: String,
        round: Round,
        home_team: String,
        away_team: String,
    ) -> Self {
        Self {
            id,
            tournament_id,
            round,
            home_team,
            away_team,
            status: MatchStatus::Pending,
            score: Score::default(),
            goal_events: Vec::new(),
            winner: None,
            winner_name: None,
            went_extra: false,
            shootout: false,
            commentary: Vec::new(),
            played_at: None,
        }
    }
}
