//! Rating Model: natural-position averaging and cached-rating refresh.

use football_league_web::logic::{compute_team_rating, refresh_team_rating};
use football_league_web::models::{Player, Position, Ratings, Team};
use football_league_web::store::{make_id, MemStore, Store};

fn player_rated(natural: Position, ratings: &[(Position, u32)]) -> Player {
    let map: Ratings = ratings.iter().copied().collect();
    Player::new(make_id("pl"), "Test Player", natural, map, false)
}

#[test]
fn empty_roster_rates_zero() {
    assert_eq!(compute_team_rating(&[]), 0.0);
}

#[test]
fn mean_of_natural_position_values() {
    let squad = vec![
        player_rated(Position::GK, &[(Position::GK, 80), (Position::AT, 10)]),
        player_rated(Position::AT, &[(Position::AT, 60), (Position::GK, 95)]),
    ];
    // 80 and 60 contribute; the off-position 10 and 95 are ignored.
    assert_eq!(compute_team_rating(&squad), 70.0);
}

#[test]
fn players_without_natural_entry_are_excluded() {
    let squad = vec![
        player_rated(Position::MD, &[(Position::AT, 99)]), // no MD entry
        player_rated(Position::DF, &[(Position::DF, 50)]),
    ];
    assert_eq!(compute_team_rating(&squad), 50.0);
}

#[test]
fn no_contributing_player_rates_zero() {
    let squad = vec![player_rated(Position::MD, &[(Position::AT, 99)])];
    assert_eq!(compute_team_rating(&squad), 0.0);
}

#[test]
fn rating_is_pure() {
    let squad = vec![
        player_rated(Position::DF, &[(Position::DF, 73)]),
        player_rated(Position::AT, &[(Position::AT, 41)]),
    ];
    assert_eq!(compute_team_rating(&squad), compute_team_rating(&squad));
}

#[test]
fn refresh_updates_cached_team_rating() {
    let mut store = MemStore::new();
    let team = Team::new(make_id("team"), "Ghana", "Black Stars", "M", "rep@example.com");
    let team_id = team.id.clone();
    store.insert_team(team);

    let mut p = player_rated(Position::AT, &[(Position::AT, 88)]);
    p.team_id = Some(team_id.clone());
    store.insert_player(p);

    let rating = refresh_team_rating(&mut store, &team_id).unwrap();
    assert_eq!(rating, 88.0);
    assert_eq!(store.get_team(&team_id).unwrap().rating, 88.0);
}
