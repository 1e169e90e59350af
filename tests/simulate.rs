//! Match Simulator: lambda clamps, tiebreak flags, scorer attribution,
//! conservation and ordering of goal events.

use football_league_web::logic::{
    assign_scorers, goal_lambdas, shootout_home_prob, simulate_match, TeamSnapshot,
};
use football_league_web::models::{LeagueError, Player, Position, Ratings};
use football_league_web::store::make_id;

fn squad_of(n: usize, attack: u32) -> Vec<Player> {
    (0..n)
        .map(|i| {
            let ratings: Ratings = Position::ALL.iter().map(|&p| (p, attack)).collect();
            Player::new(make_id("pl"), format!("P{i}"), Position::AT, ratings, i == 0)
        })
        .collect()
}

fn snapshot(rating: f64, squad: Vec<Player>) -> TeamSnapshot {
    TeamSnapshot {
        id: make_id("team"),
        name: "Side".to_string(),
        rating,
        squad,
    }
}

#[test]
fn lambdas_clamp_to_bounds() {
    // Equal strength: base rate on both sides.
    assert_eq!(goal_lambdas(50.0, 50.0), (1.2, 1.2));
    // Extreme gap: clamped to [0.1, 4.0].
    assert_eq!(goal_lambdas(100.0, 0.0), (4.0, 0.1));
    assert_eq!(goal_lambdas(0.0, 100.0), (0.1, 4.0));
}

#[test]
fn shootout_probability_clamps() {
    assert_eq!(shootout_home_prob(50.0, 50.0), 0.5);
    assert_eq!(shootout_home_prob(100.0, 0.0), 0.95);
    assert_eq!(shootout_home_prob(0.0, 100.0), 0.05);
    // The divisor is 200, not the lambda's 20.
    assert_eq!(shootout_home_prob(60.0, 40.0), 0.6);
}

#[test]
fn empty_roster_is_rejected() {
    let home = snapshot(70.0, Vec::new());
    let away = snapshot(60.0, squad_of(5, 50));
    assert_eq!(
        simulate_match(&home, &away).unwrap_err(),
        LeagueError::RostersMissing
    );
    assert_eq!(
        simulate_match(&away, &home).unwrap_err(),
        LeagueError::RostersMissing
    );
}

#[test]
fn events_conserve_score_and_order() {
    let home = snapshot(80.0, squad_of(5, 70));
    let away = snapshot(45.0, squad_of(5, 40));
    for _ in 0..50 {
        let out = simulate_match(&home, &away).unwrap();

        let home_events = out.events.iter().filter(|e| e.team_id == home.id).count();
        let away_events = out.events.iter().filter(|e| e.team_id == away.id).count();
        assert_eq!(home_events as u32, out.home_goals);
        assert_eq!(away_events as u32, out.away_goals);

        for pair in out.events.windows(2) {
            assert!(pair[0].minute <= pair[1].minute);
        }
        for e in &out.events {
            assert!((1..=90).contains(&e.minute));
        }
    }
}

#[test]
fn winner_is_consistent_with_goals() {
    let home = snapshot(60.0, squad_of(4, 50));
    let away = snapshot(55.0, squad_of(4, 50));
    for _ in 0..50 {
        let out = simulate_match(&home, &away).unwrap();
        assert!(out.winner == home.id || out.winner == away.id);
        if out.shootout {
            // A shootout only happens after a tied extra time and adds no goal.
            assert!(out.went_extra);
            assert_eq!(out.home_goals, out.away_goals);
        } else if out.home_goals > out.away_goals {
            assert_eq!(out.winner, home.id);
        } else {
            assert!(out.away_goals > out.home_goals);
            assert_eq!(out.winner, away.id);
        }
    }
}

#[test]
fn scorers_cover_all_goals_with_replacement() {
    let squad = squad_of(3, 60);
    let mut rng = rand::thread_rng();
    let events = assign_scorers(&mut rng, "team_x", &squad, 7);
    assert_eq!(events.len(), 7);
    let ids: Vec<&String> = squad.iter().map(|p| &p.id).collect();
    for e in &events {
        assert!(ids.contains(&&e.player_id));
        assert_eq!(e.team_id, "team_x");
    }
    for pair in events.windows(2) {
        assert!(pair[0].minute <= pair[1].minute);
    }
}

#[test]
fn unattributed_goals_are_a_defined_noop() {
    let mut rng = rand::thread_rng();
    assert!(assign_scorers(&mut rng, "team_x", &[], 3).is_empty());
    assert!(assign_scorers(&mut rng, "team_x", &squad_of(3, 60), 0).is_empty());
}

#[test]
fn zero_rated_players_stay_eligible() {
    // Weight floor 0.1 keeps a squad of all-zero attackers valid.
    let squad = squad_of(4, 0);
    let mut rng = rand::thread_rng();
    let events = assign_scorers(&mut rng, "team_x", &squad, 5);
    assert_eq!(events.len(), 5);
}
