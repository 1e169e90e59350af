//! Team and player registry: CRUD with uniqueness and lifecycle rules,
//! plus demo-team seeding.

use crate::logic::rating::refresh_team_rating;
use crate::logic::squad::autofill_squad;
use crate::models::{CreateTeam, LeagueError, Player, Team, TeamStats, UpdatePlayer};
use crate::store::{make_id, Store};
use rand::prelude::*;

/// Countries eligible for registration; `Team::country` must come from here
/// and is unique across teams.
pub const COUNTRIES: [&str; 54] = [
    "Algeria", "Angola", "Benin", "Botswana", "Burkina Faso", "Burundi", "Cabo Verde",
    "Cameroon", "Central African Republic", "Chad", "Comoros", "Congo", "DR Congo",
    "Côte d'Ivoire", "Djibouti", "Egypt", "Equatorial Guinea", "Eritrea", "Eswatini",
    "Ethiopia", "Gabon", "Gambia", "Ghana", "Guinea", "Guinea-Bissau", "Kenya", "Lesotho",
    "Liberia", "Libya", "Madagascar", "Malawi", "Mali", "Mauritania", "Mauritius", "Morocco",
    "Mozambique", "Namibia", "Niger", "Nigeria", "Rwanda", "São Tomé and Príncipe", "Senegal",
    "Seychelles", "Sierra Leone", "Somalia", "South Africa", "South Sudan", "Sudan", "Tanzania",
    "Togo", "Tunisia", "Uganda", "Zambia", "Zimbabwe",
];

/// Uniqueness checks shared by create, update, and replace. `exclude` skips a
/// team id so updates don't collide with themselves.
fn check_unique<S: Store>(
    store: &S,
    country: &str,
    team_name: &str,
    exclude: Option<&str>,
) -> Result<(), LeagueError> {
    if !COUNTRIES.contains(&country) {
        return Err(LeagueError::InvalidCountry(country.to_string()));
    }
    for t in store.find_teams() {
        if Some(t.id.as_str()) == exclude {
            continue;
        }
        if t.country == country {
            return Err(LeagueError::DuplicateCountry(country.to_string()));
        }
        if t.team_name == team_name {
            return Err(LeagueError::DuplicateTeamName(team_name.to_string()));
        }
    }
    Ok(())
}

fn reject_if_started<S: Store>(store: &S) -> Result<(), LeagueError> {
    if store.active_tournament().is_some() {
        return Err(LeagueError::TournamentStarted);
    }
    Ok(())
}

/// Register a new team with an empty squad.
pub fn create_team<S: Store>(store: &mut S, payload: &CreateTeam) -> Result<Team, LeagueError> {
    let country = payload.country.trim();
    let team_name = payload.team_name.trim();
    check_unique(store, country, team_name, None)?;
    let team = Team::new(
        make_id("team"),
        country,
        team_name,
        payload.manager_name.trim(),
        payload.representative_email.trim(),
    );
    store.insert_team(team.clone());
    Ok(team)
}

/// Update a team's identifying fields; country and name must stay unique.
pub fn update_team<S: Store>(
    store: &mut S,
    team_id: &str,
    payload: &CreateTeam,
) -> Result<Team, LeagueError> {
    let mut team = store
        .get_team(team_id)
        .ok_or_else(|| LeagueError::TeamNotFound(team_id.to_string()))?;
    let country = payload.country.trim();
    let team_name = payload.team_name.trim();
    check_unique(store, country, team_name, Some(team_id))?;
    team.country = country.to_string();
    team.team_name = team_name.to_string();
    team.manager_name = payload.manager_name.trim().to_string();
    team.representative_email = payload.representative_email.trim().to_string();
    store.update_team(&team);
    Ok(team)
}

/// Delete a team and all its players. Not allowed once a tournament is in
/// progress.
pub fn delete_team<S: Store>(store: &mut S, team_id: &str) -> Result<(), LeagueError> {
    reject_if_started(store)?;
    if store.get_team(team_id).is_none() {
        return Err(LeagueError::TeamNotFound(team_id.to_string()));
    }
    store.delete_players_by_team(team_id);
    store.delete_team(team_id);
    Ok(())
}

/// Swap one registered team for a new one in a single operation. All
/// validation runs before the first write, so a rejected replacement leaves
/// the old team untouched.
pub fn replace_team<S: Store>(
    store: &mut S,
    remove_team_id: &str,
    payload: &CreateTeam,
) -> Result<Team, LeagueError> {
    reject_if_started(store)?;
    if store.get_team(remove_team_id).is_none() {
        return Err(LeagueError::TeamNotFound(remove_team_id.to_string()));
    }
    check_unique(
        store,
        payload.country.trim(),
        payload.team_name.trim(),
        Some(remove_team_id),
    )?;
    store.delete_players_by_team(remove_team_id);
    store.delete_team(remove_team_id);
    create_team(store, payload)
}

pub fn team_stats<S: Store>(store: &S, team_id: &str) -> Result<TeamStats, LeagueError> {
    store
        .get_team(team_id)
        .map(|t| TeamStats::from_team(&t))
        .ok_or_else(|| LeagueError::TeamNotFound(team_id.to_string()))
}

/// Countries not yet claimed by a registered team.
pub fn available_countries<S: Store>(store: &S) -> Vec<&'static str> {
    let taken: Vec<String> = store.find_teams().into_iter().map(|t| t.country).collect();
    COUNTRIES
        .iter()
        .copied()
        .filter(|c| !taken.iter().any(|t| t == c))
        .collect()
}

/// Apply a partial player update. Ratings are clamped to 0..=100; any change
/// to ratings or natural position refreshes the owning team's cached rating.
pub fn update_player<S: Store>(
    store: &mut S,
    player_id: &str,
    payload: &UpdatePlayer,
) -> Result<Player, LeagueError> {
    let mut player = store
        .get_player(player_id)
        .ok_or_else(|| LeagueError::PlayerNotFound(player_id.to_string()))?;

    if let Some(name) = &payload.name {
        player.name = name.trim().to_string();
    }
    if let Some(pos) = payload.natural_position {
        player.natural_position = pos;
    }
    if let Some(ratings) = &payload.ratings {
        player.ratings = ratings.iter().map(|(&pos, &v)| (pos, v.min(100))).collect();
    }
    if let Some(captain) = payload.is_captain {
        player.is_captain = captain;
    }
    store.update_player(&player);

    if payload.ratings.is_some() || payload.natural_position.is_some() {
        if let Some(team_id) = player.team_id.clone() {
            refresh_team_rating(store, &team_id)?;
        }
    }
    Ok(player)
}

/// Delete a player, detach them from their team's squad, and refresh that
/// team's rating.
pub fn delete_player<S: Store>(store: &mut S, player_id: &str) -> Result<(), LeagueError> {
    let player = store
        .get_player(player_id)
        .ok_or_else(|| LeagueError::PlayerNotFound(player_id.to_string()))?;
    store.delete_player(player_id);
    if let Some(team_id) = player.team_id {
        if let Some(mut team) = store.get_team(&team_id) {
            team.squad.retain(|pid| pid != player_id);
            store.update_team(&team);
            refresh_team_rating(store, &team_id)?;
        }
    }
    Ok(())
}

const DEMO_TEAMS: [(&str, &str); 7] = [
    ("Ghana", "Black Stars"),
    ("Senegal", "Lions of Teranga"),
    ("Egypt", "Pharaohs"),
    ("Morocco", "Atlas Lions"),
    ("Algeria", "Desert Foxes"),
    ("Nigeria", "Super Eagles"),
    ("Cameroon", "Indomitable Lions"),
];

/// Wipe all teams and players, then create 7 demo teams with autofilled
/// squads. Blocked while a tournament is in progress.
pub fn seed_demo_teams<S: Store>(store: &mut S) -> Result<Vec<String>, LeagueError> {
    reject_if_started(store)?;
    for team in store.find_teams() {
        store.delete_players_by_team(&team.id);
        store.delete_team(&team.id);
    }
    let mut created = Vec::with_capacity(DEMO_TEAMS.len());
    for (country, team_name) in DEMO_TEAMS {
        let team = create_team(
            store,
            &CreateTeam {
                country: country.to_string(),
                team_name: team_name.to_string(),
                manager_name: format!("Manager {country}"),
                representative_email: format!("rep_{}@example.com", country.to_lowercase()),
            },
        )?;
        autofill_squad(store, &team.id)?;
        created.push(team.id);
    }
    Ok(created)
}

/// Add one demo team for a random still-available country, squad included.
pub fn add_demo_team<S: Store>(store: &mut S) -> Result<Team, LeagueError> {
    let available = available_countries(store);
    let country = available
        .choose(&mut thread_rng())
        .copied()
        .ok_or(LeagueError::NoCountriesLeft)?;
    let team = create_team(
        store,
        &CreateTeam {
            country: country.to_string(),
            team_name: format!("{country} Demo XI"),
            manager_name: format!("Manager {country}"),
            representative_email: format!(
                "{}@example.com",
                country.to_lowercase().replace(' ', "_")
            ),
        },
    )?;
    autofill_squad(store, &team.id)?;
    // Re-read: autofill updated squad and rating.
    store
        .get_team(&team.id)
        .ok_or_else(|| LeagueError::TeamNotFound(team.id.clone()))
}
