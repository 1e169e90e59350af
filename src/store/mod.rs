//! Persistence collaborator: a narrow document-store contract plus the
//! in-memory implementation used by the web binary and by tests.
//!
//! The engine only ever talks to `Store`, so it can run against any backend
//! implementing these get/find/insert/update/delete operations. Records are
//! keyed by opaque prefixed ids (`team_…`, `pl_…`, `match_…`, `tournament_…`).

use crate::models::{Match, Player, Round, Team, Tournament, TournamentStatus};
use std::collections::HashMap;
use uuid::Uuid;

/// Collision-resistant opaque id with an entity-kind prefix, e.g. `team_3f0a…`.
pub fn make_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// Single-node document store over the four entity collections. Updates replace
/// the whole record by id; callers serialize read-check-write sequences by
/// holding exclusive access to the store (`&mut self`).
pub trait Store {
    fn get_team(&self, id: &str) -> Option<Team>;
    fn find_teams(&self) -> Vec<Team>;
    fn insert_team(&mut self, team: Team);
    /// Replace an existing team record; false if the id is unknown.
    fn update_team(&mut self, team: &Team) -> bool;
    fn delete_team(&mut self, id: &str) -> bool;

    fn get_player(&self, id: &str) -> Option<Player>;
    fn find_players(&self) -> Vec<Player>;
    fn find_players_by_team(&self, team_id: &str) -> Vec<Player>;
    fn insert_player(&mut self, player: Player);
    fn update_player(&mut self, player: &Player) -> bool;
    fn delete_player(&mut self, id: &str) -> bool;
    fn delete_players_by_team(&mut self, team_id: &str) -> usize;

    fn get_match(&self, id: &str) -> Option<Match>;
    fn find_matches(&self) -> Vec<Match>;
    /// Matches of one tournament round, in insertion (pairing) order.
    fn find_matches_by_round(&self, tournament_id: &str, round: Round) -> Vec<Match>;
    fn insert_match(&mut self, m: Match);
    fn update_match(&mut self, m: &Match) -> bool;
    fn delete_all_matches(&mut self);

    fn get_tournament(&self, id: &str) -> Option<Tournament>;
    /// The single in-progress tournament, if any.
    fn active_tournament(&self) -> Option<Tournament>;
    /// The latest tournament regardless of status (for bracket/status views).
    fn latest_tournament(&self) -> Option<Tournament>;
    fn insert_tournament(&mut self, t: Tournament);
    fn update_tournament(&mut self, t: &Tournament) -> bool;
    fn delete_all_tournaments(&mut self);
}

/// In-memory store. Insertion order is preserved per collection so that
/// "earliest registered" and "pairing order" queries are deterministic.
#[derive(Default)]
pub struct MemStore {
    teams: HashMap<String, Team>,
    team_order: Vec<String>,
    players: HashMap<String, Player>,
    player_order: Vec<String>,
    matches: HashMap<String, Match>,
    match_order: Vec<String>,
    tournaments: HashMap<String, Tournament>,
    tournament_order: Vec<String>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemStore {
    fn get_team(&self, id: &str) -> Option<Team> {
        self.teams.get(id).cloned()
    }

    fn find_teams(&self) -> Vec<Team> {
        self.team_order
            .iter()
            .filter_map(|id| self.teams.get(id).cloned())
            .collect()
    }

    fn insert_team(&mut self, team: Team) {
        self.team_order.push(team.id.clone());
        self.teams.insert(team.id.clone(), team);
    }

    fn update_team(&mut self, team: &Team) -> bool {
        match self.teams.get_mut(&team.id) {
            Some(slot) => {
                *slot = team.clone();
                true
            }
            None => false,
        }
    }

    fn delete_team(&mut self, id: &str) -> bool {
        self.team_order.retain(|t| t != id);
        self.teams.remove(id).is_some()
    }

    fn get_player(&self, id: &str) -> Option<Player> {
        self.players.get(id).cloned()
    }

    fn find_players(&self) -> Vec<Player> {
        self.player_order
            .iter()
            .filter_map(|id| self.players.get(id).cloned())
            .collect()
    }

    fn find_players_by_team(&self, team_id: &str) -> Vec<Player> {
        self.player_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .filter(|p| p.team_id.as_deref() == Some(team_id))
            .cloned()
            .collect()
    }

    fn insert_player(&mut self, player: Player) {
        self.player_order.push(player.id.clone());
        self.players.insert(player.id.clone(), player);
    }

    fn update_player(&mut self, player: &Player) -> bool {
        match self.players.get_mut(&player.id) {
            Some(slot) => {
                *slot = player.clone();
                true
            }
            None => false,
        }
    }

    fn delete_player(&mut self, id: &str) -> bool {
        self.player_order.retain(|p| p != id);
        self.players.remove(id).is_some()
    }

    fn delete_players_by_team(&mut self, team_id: &str) -> usize {
        let ids: Vec<String> = self
            .players
            .values()
            .filter(|p| p.team_id.as_deref() == Some(team_id))
            .map(|p| p.id.clone())
            .collect();
        for id in &ids {
            self.player_order.retain(|p| p != id);
            self.players.remove(id);
        }
        ids.len()
    }

    fn get_match(&self, id: &str) -> Option<Match> {
        self.matches.get(id).cloned()
    }

    fn find_matches(&self) -> Vec<Match> {
        self.match_order
            .iter()
            .filter_map(|id| self.matches.get(id).cloned())
            .collect()
    }

    fn find_matches_by_round(&self, tournament_id: &str, round: Round) -> Vec<Match> {
        self.match_order
            .iter()
            .filter_map(|id| self.matches.get(id))
            .filter(|m| m.tournament_id == tournament_id && m.round == round)
            .cloned()
            .collect()
    }

    fn insert_match(&mut self, m: Match) {
        self.match_order.push(m.id.clone());
        self.matches.insert(m.id.clone(), m);
    }

    fn update_match(&mut self, m: &Match) -> bool {
        match self.matches.get_mut(&m.id) {
            Some(slot) => {
                *slot = m.clone();
                true
            }
            None => false,
        }
    }

    fn delete_all_matches(&mut self) {
        self.matches.clear();
        self.match_order.clear();
    }

    fn get_tournament(&self, id: &str) -> Option<Tournament> {
        self.tournaments.get(id).cloned()
    }

    fn active_tournament(&self) -> Option<Tournament> {
        self.tournaments
            .values()
            .find(|t| t.status == TournamentStatus::InProgress)
            .cloned()
    }

    fn latest_tournament(&self) -> Option<Tournament> {
        self.tournament_order
            .last()
            .and_then(|id| self.tournaments.get(id).cloned())
    }

    fn insert_tournament(&mut self, t: Tournament) {
        self.tournament_order.push(t.id.clone());
        self.tournaments.insert(t.id.clone(), t);
    }

    fn update_tournament(&mut self, t: &Tournament) -> bool {
        match self.tournaments.get_mut(&t.id) {
            Some(slot) => {
                *slot = t.clone();
                true
            }
            None => false,
        }
    }

    fn delete_all_tournaments(&mut self) {
        self.tournaments.clear();
        self.tournament_order.clear();
    }
}
