//! Registry: team/player CRUD rules, autofill invariants, seeding.

use football_league_web::logic::{
    autofill_squad, available_countries, compute_team_rating, create_team, delete_player,
    delete_team, replace_team, seed_demo_teams, start_tournament, team_stats, update_player,
    update_team, SeedPolicy, SQUAD_SIZE,
};
use football_league_web::models::{CreateTeam, LeagueError, Position, Ratings, UpdatePlayer};
use football_league_web::store::{MemStore, Store};

fn payload(country: &str, name: &str) -> CreateTeam {
    CreateTeam {
        country: country.to_string(),
        team_name: name.to_string(),
        manager_name: format!("Manager {country}"),
        representative_email: format!("rep@{}.example.com", country.to_lowercase()),
    }
}

#[test]
fn country_and_name_must_be_unique() {
    let mut store = MemStore::new();
    create_team(&mut store, &payload("Ghana", "Black Stars")).unwrap();

    assert_eq!(
        create_team(&mut store, &payload("Ghana", "Other Stars")).unwrap_err(),
        LeagueError::DuplicateCountry("Ghana".to_string())
    );
    assert_eq!(
        create_team(&mut store, &payload("Senegal", "Black Stars")).unwrap_err(),
        LeagueError::DuplicateTeamName("Black Stars".to_string())
    );
    // The conflicting attempts wrote nothing.
    assert_eq!(store.find_teams().len(), 1);
}

#[test]
fn country_must_be_in_the_fixed_list() {
    let mut store = MemStore::new();
    assert_eq!(
        create_team(&mut store, &payload("Atlantis", "Mermen")).unwrap_err(),
        LeagueError::InvalidCountry("Atlantis".to_string())
    );
}

#[test]
fn update_ignores_collision_with_self() {
    let mut store = MemStore::new();
    let team = create_team(&mut store, &payload("Ghana", "Black Stars")).unwrap();
    // Re-submitting the same country/name is not a conflict.
    let updated = update_team(&mut store, &team.id, &payload("Ghana", "Black Stars")).unwrap();
    assert_eq!(updated.country, "Ghana");

    create_team(&mut store, &payload("Senegal", "Lions")).unwrap();
    assert_eq!(
        update_team(&mut store, &team.id, &payload("Senegal", "Black Stars")).unwrap_err(),
        LeagueError::DuplicateCountry("Senegal".to_string())
    );
}

#[test]
fn autofill_builds_a_valid_squad() {
    let mut store = MemStore::new();
    let team = create_team(&mut store, &payload("Egypt", "Pharaohs")).unwrap();
    let (count, rating) = autofill_squad(&mut store, &team.id).unwrap();
    assert_eq!(count, SQUAD_SIZE);

    let squad = store.find_players_by_team(&team.id);
    assert_eq!(squad.len(), SQUAD_SIZE);
    let keepers = squad
        .iter()
        .filter(|p| p.natural_position == Position::GK)
        .count();
    assert_eq!(keepers, 2);
    let captains = squad.iter().filter(|p| p.is_captain).count();
    assert_eq!(captains, 1);
    for p in &squad {
        let natural = p.natural_rating().unwrap();
        assert!((50..=100).contains(&natural));
        for (&pos, &v) in &p.ratings {
            if pos != p.natural_position {
                assert!(v <= 50);
            }
        }
    }
    // Cached rating matches the model over the generated squad.
    assert_eq!(rating, compute_team_rating(&squad));
    assert!((50.0..=100.0).contains(&rating));
    assert_eq!(store.get_team(&team.id).unwrap().rating, rating);
}

#[test]
fn reautofill_replaces_the_squad() {
    let mut store = MemStore::new();
    let team = create_team(&mut store, &payload("Egypt", "Pharaohs")).unwrap();
    autofill_squad(&mut store, &team.id).unwrap();
    autofill_squad(&mut store, &team.id).unwrap();
    // No orphaned players from the first fill.
    assert_eq!(store.find_players().len(), SQUAD_SIZE);
    assert_eq!(store.get_team(&team.id).unwrap().squad.len(), SQUAD_SIZE);
}

#[test]
fn player_update_clamps_and_refreshes_rating() {
    let mut store = MemStore::new();
    let team = create_team(&mut store, &payload("Kenya", "Harambee Stars")).unwrap();
    autofill_squad(&mut store, &team.id).unwrap();
    let player = store.find_players_by_team(&team.id)[0].clone();

    let mut ratings = Ratings::new();
    for pos in Position::ALL {
        ratings.insert(pos, 250); // over the cap
    }
    let updated = update_player(
        &mut store,
        &player.id,
        &UpdatePlayer {
            ratings: Some(ratings),
            ..UpdatePlayer::default()
        },
    )
    .unwrap();
    assert!(updated.ratings.values().all(|&v| v == 100));

    let team_after = store.get_team(&team.id).unwrap();
    let squad = store.find_players_by_team(&team.id);
    assert_eq!(team_after.rating, compute_team_rating(&squad));
}

#[test]
fn deleting_a_player_detaches_and_rerates() {
    let mut store = MemStore::new();
    let team = create_team(&mut store, &payload("Mali", "Eagles")).unwrap();
    autofill_squad(&mut store, &team.id).unwrap();
    let victim = store.find_players_by_team(&team.id)[0].clone();

    delete_player(&mut store, &victim.id).unwrap();
    let team_after = store.get_team(&team.id).unwrap();
    assert_eq!(team_after.squad.len(), SQUAD_SIZE - 1);
    assert!(!team_after.squad.contains(&victim.id));
    let squad = store.find_players_by_team(&team.id);
    assert_eq!(team_after.rating, compute_team_rating(&squad));
}

#[test]
fn team_removal_is_blocked_mid_tournament() {
    let mut store = MemStore::new();
    let countries = [
        "Ghana", "Senegal", "Egypt", "Morocco", "Algeria", "Nigeria", "Cameroon", "Kenya",
    ];
    let mut first_id = String::new();
    for c in countries {
        let team = create_team(&mut store, &payload(c, &format!("{c} XI"))).unwrap();
        autofill_squad(&mut store, &team.id).unwrap();
        if first_id.is_empty() {
            first_id = team.id;
        }
    }
    start_tournament(&mut store, SeedPolicy::EarliestRegistered).unwrap();

    assert_eq!(
        delete_team(&mut store, &first_id).unwrap_err(),
        LeagueError::TournamentStarted
    );
    assert_eq!(
        replace_team(&mut store, &first_id, &payload("Zambia", "Chipolopolo")).unwrap_err(),
        LeagueError::TournamentStarted
    );
    assert!(store.get_team(&first_id).is_some());
}

#[test]
fn failed_replace_leaves_the_old_team_intact() {
    let mut store = MemStore::new();
    let team = create_team(&mut store, &payload("Togo", "Sparrowhawks")).unwrap();
    create_team(&mut store, &payload("Benin", "Squirrels")).unwrap();

    // New team collides with an existing country: rejected before any write.
    assert_eq!(
        replace_team(&mut store, &team.id, &payload("Benin", "New Squirrels")).unwrap_err(),
        LeagueError::DuplicateCountry("Benin".to_string())
    );
    assert!(store.get_team(&team.id).is_some());
    assert_eq!(store.find_teams().len(), 2);
}

#[test]
fn replace_swaps_team_and_players() {
    let mut store = MemStore::new();
    let old = create_team(&mut store, &payload("Togo", "Sparrowhawks")).unwrap();
    autofill_squad(&mut store, &old.id).unwrap();

    let new = replace_team(&mut store, &old.id, &payload("Benin", "Squirrels")).unwrap();
    assert!(store.get_team(&old.id).is_none());
    assert!(store.find_players_by_team(&old.id).is_empty());
    assert_eq!(store.get_team(&new.id).unwrap().country, "Benin");
}

#[test]
fn seeding_creates_seven_full_teams() {
    let mut store = MemStore::new();
    let created = seed_demo_teams(&mut store).unwrap();
    assert_eq!(created.len(), 7);
    for id in &created {
        let team = store.get_team(id).unwrap();
        assert_eq!(team.squad.len(), SQUAD_SIZE);
        assert!(team.rating > 0.0);
    }
    // Re-seeding wipes and recreates rather than accumulating.
    seed_demo_teams(&mut store).unwrap();
    assert_eq!(store.find_teams().len(), 7);
    assert_eq!(store.find_players().len(), 7 * SQUAD_SIZE);
}

#[test]
fn available_countries_shrink_as_teams_register() {
    let mut store = MemStore::new();
    let before = available_countries(&store).len();
    create_team(&mut store, &payload("Ghana", "Black Stars")).unwrap();
    let after = available_countries(&store);
    assert_eq!(after.len(), before - 1);
    assert!(!after.contains(&"Ghana"));
}

#[test]
fn stats_view_reflects_history() {
    let mut store = MemStore::new();
    let team = create_team(&mut store, &payload("Ghana", "Black Stars")).unwrap();
    let stats = team_stats(&store, &team.id).unwrap();
    assert_eq!(stats.wins, 0);
    assert_eq!(stats.titles_count, 0);
    assert!(matches!(
        team_stats(&store, "team_missing"),
        Err(LeagueError::TeamNotFound(_))
    ));
}
