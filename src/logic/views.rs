//! Read-only views: bracket with expected-win odds, tournament status,
//! match details with resolved names, top-scorer leaderboard.

use crate::models::{LeagueError, Match, MatchStatus, Round, Score, Tournament, TournamentStatus};
use crate::store::Store;
use serde::Serialize;

/// A match enriched with team names, ratings, and a quick expected-win model
/// for display.
#[derive(Clone, Debug, Serialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub m: Match,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_rating: f64,
    pub away_rating: f64,
    pub expected_home_win: f64,
    pub expected_away_win: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct BracketView {
    pub tournament: Tournament,
    pub matches: Vec<MatchView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StatusView {
    pub status: TournamentStatus,
    pub current_round: Round,
    pub teams_remaining: usize,
    pub matches_played: usize,
    pub winner: Option<String>,
    pub winner_name: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScorerLine {
    pub minute: u32,
    pub player_name: String,
    pub team_name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchDetails {
    pub match_id: String,
    pub round: Round,
    pub home_team_name: String,
    pub away_team_name: String,
    pub score: Score,
    pub commentary: Vec<String>,
    pub scorers: Vec<ScorerLine>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TopScorer {
    pub player_id: String,
    pub player_name: String,
    pub team: Option<String>,
    pub goals: usize,
}

/// Display-only win probability: logistic on the rating difference. Separate
/// from the simulation model on purpose.
fn expected_home_win(home_rating: f64, away_rating: f64) -> f64 {
    let p = 1.0 / (1.0 + (-(home_rating - away_rating) / 8.0).exp());
    (p * 1000.0).round() / 10.0
}

fn match_view(store: &impl Store, m: Match) -> MatchView {
    let home = store.get_team(&m.home_team);
    let away = store.get_team(&m.away_team);
    let home_team_name = home.as_ref().map(|t| t.country.clone()).unwrap_or_else(|| m.home_team.clone());
    let away_team_name = away.as_ref().map(|t| t.country.clone()).unwrap_or_else(|| m.away_team.clone());
    let home_rating = home.map(|t| t.rating).unwrap_or(0.0);
    let away_rating = away.map(|t| t.rating).unwrap_or(0.0);
    let p_home = expected_home_win(home_rating, away_rating);
    MatchView {
        m,
        home_team_name,
        away_team_name,
        home_rating,
        away_rating,
        expected_home_win: p_home,
        expected_away_win: ((1000.0 - p_home * 10.0).round() / 10.0),
    }
}

/// The latest tournament's bracket in creation order, enriched per match.
pub fn bracket_view(store: &impl Store) -> Result<BracketView, LeagueError> {
    let tournament = store.latest_tournament().ok_or(LeagueError::NoTournament)?;
    let matches = tournament
        .bracket
        .iter()
        .filter_map(|mid| store.get_match(mid))
        .map(|m| match_view(store, m))
        .collect();
    Ok(BracketView { tournament, matches })
}

pub fn tournament_status(store: &impl Store) -> Result<StatusView, LeagueError> {
    let tournament = store.latest_tournament().ok_or(LeagueError::NoTournament)?;
    let matches_played = tournament
        .bracket
        .iter()
        .filter_map(|mid| store.get_match(mid))
        .filter(|m| m.status == MatchStatus::Simulated)
        .count();
    Ok(StatusView {
        status: tournament.status,
        current_round: tournament.current_round,
        teams_remaining: tournament.teams.len(),
        matches_played,
        winner: tournament.winner,
        winner_name: tournament.winner_name,
    })
}

/// One match by id with team names attached.
pub fn get_match_view(store: &impl Store, match_id: &str) -> Result<MatchView, LeagueError> {
    let m = store
        .get_match(match_id)
        .ok_or_else(|| LeagueError::MatchNotFound(match_id.to_string()))?;
    Ok(match_view(store, m))
}

/// Goal events and commentary with player and team names resolved.
pub fn match_details(store: &impl Store, match_id: &str) -> Result<MatchDetails, LeagueError> {
    let m = store
        .get_match(match_id)
        .ok_or_else(|| LeagueError::MatchNotFound(match_id.to_string()))?;
    let home_name = store
        .get_team(&m.home_team)
        .map(|t| t.country)
        .unwrap_or_else(|| m.home_team.clone());
    let away_name = store
        .get_team(&m.away_team)
        .map(|t| t.country)
        .unwrap_or_else(|| m.away_team.clone());
    let scorers = m
        .goal_events
        .iter()
        .map(|ev| ScorerLine {
            minute: ev.minute,
            player_name: store
                .get_player(&ev.player_id)
                .map(|p| p.name)
                .unwrap_or_else(|| ev.player_id.clone()),
            team_name: if ev.team_id == m.home_team {
                home_name.clone()
            } else {
                away_name.clone()
            },
        })
        .collect();
    Ok(MatchDetails {
        match_id: m.id,
        round: m.round,
        home_team_name: home_name,
        away_team_name: away_name,
        score: m.score,
        commentary: m.commentary,
        scorers,
    })
}

/// Players ranked by goals scored across all simulated matches.
pub fn top_scorers(store: &impl Store, limit: usize) -> Vec<TopScorer> {
    let mut tally: Vec<(String, usize)> = Vec::new();
    for m in store.find_matches() {
        for ev in &m.goal_events {
            match tally.iter_mut().find(|(pid, _)| pid == &ev.player_id) {
                Some((_, count)) => *count += 1,
                None => tally.push((ev.player_id.clone(), 1)),
            }
        }
    }
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
        .into_iter()
        .take(limit)
        .map(|(player_id, goals)| {
            let player = store.get_player(&player_id);
            let team = player
                .as_ref()
                .and_then(|p| p.team_id.as_ref())
                .and_then(|tid| store.get_team(tid))
                .map(|t| t.country);
            TopScorer {
                player_name: player.map(|p| p.name).unwrap_or_else(|| player_id.clone()),
                player_id,
                team,
                goals,
            }
        })
        .collect()
}
