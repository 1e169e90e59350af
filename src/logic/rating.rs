//! Rating Model: scalar team strength from the squad.

use crate::models::{LeagueError, Player};
use crate::store::Store;

/// Arithmetic mean of each player's proficiency at their own natural position.
/// Players without a natural-position entry are excluded from the average;
/// an empty squad (or no contributing player) rates 0.0.
///
/// Intentionally ignores off-position proficiencies: a squad of 23 goalkeepers
/// is rated purely on GK values.
pub fn compute_team_rating(squad: &[Player]) -> f64 {
    let values: Vec<u32> = squad.iter().filter_map(|p| p.natural_rating()).collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<u32>() as f64 / values.len() as f64
}

/// Recompute and persist a team's cached rating from its current squad.
/// Must be called after every mutation that touches the squad or any
/// member's ratings or natural position.
pub fn refresh_team_rating<S: Store>(store: &mut S, team_id: &str) -> Result<f64, LeagueError> {
    let mut team = store
        .get_team(team_id)
        .ok_or_else(|| LeagueError::TeamNotFound(team_id.to_string()))?;
    let squad = store.find_players_by_team(team_id);
    team.rating = compute_team_rating(&squad);
    store.update_team(&team);
    Ok(team.rating)
}
