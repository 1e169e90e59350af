//! Team record: squad, cached rating, win/loss counters, finals history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a final, from one finalist's perspective.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalResult {
    Winner,
    RunnerUp,
}

/// One finals appearance (written exactly once, when a tournament finishes).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FinalsEntry {
    pub tournament_id: String,
    pub date: DateTime<Utc>,
    /// Opponent's country name.
    pub opponent: String,
    /// Home-away score string, e.g. "2-1".
    pub score: String,
    pub result: FinalResult,
}

/// One tournament title (winner's side of a finals appearance).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TitleEntry {
    pub tournament_id: String,
    pub date: DateTime<Utc>,
    pub opponent: String,
    pub score: String,
}

/// A registered national team. `rating` is a cached value: it must always equal
/// `compute_team_rating` over the current squad and is refreshed after every
/// squad or proficiency mutation, never hand-set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    /// Unique within the system, drawn from the fixed country list.
    pub country: String,
    /// Unique within the system.
    pub team_name: String,
    pub manager_name: String,
    pub representative_email: String,
    /// Player ids; order carries no meaning.
    pub squad: Vec<String>,
    pub rating: f64,
    pub wins: u32,
    pub losses: u32,
    pub finals_history: Vec<FinalsEntry>,
    pub winners_history: Vec<TitleEntry>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(
        id: String,
        country: impl Into<String>,
        team_name: impl Into<String>,
        manager_name: impl Into<String>,
        representative_email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            country: country.into(),
            team_name: team_name.into(),
            manager_name: manager_name.into(),
            representative_email: representative_email.into(),
            squad: Vec::new(),
            rating: 0.0,
            wins: 0,
            losses: 0,
            finals_history: Vec::new(),
            winners_history: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Payload for creating (or replacing with) a team.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateTeam {
    pub country: String,
    pub team_name: String,
    pub manager_name: String,
    pub representative_email: String,
}

/// Aggregated stats view of a team (for API / display).
#[derive(Clone, Debug, Serialize)]
pub struct TeamStats {
    pub team_id: String,
    pub country: String,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub finals_count: usize,
    pub titles_count: usize,
    pub finals_history: Vec<FinalsEntry>,
    pub winners_history: Vec<TitleEntry>,
}

impl TeamStats {
    pub fn from_team(t: &Team) -> Self {
        Self {
            team_id: t.id.clone(),
            country: t.country.clone(),
            team_name: t.team_name.clone(),
            wins: t.wins,
            losses: t.losses,
            finals_count: t.finals_history.len(),
            titles_count: t.winners_history.len(),
            finals_history: t.finals_history.clone(),
            winners_history: t.winners_history.clone(),
        }
    }
}
