//! League business logic: rating model, match simulation, bracket state
//! machine, squad generation, registry, read views.

mod bracket;
mod rating;
mod registry;
mod simulate;
mod squad;
mod views;

pub use bracket::{
    advance_round, auto_simulate, rebuild_bracket, reset_tournament, simulate_match_by_id,
    start_tournament, SeedPolicy, BRACKET_TEAMS,
};
pub use rating::{compute_team_rating, refresh_team_rating};
pub use registry::{
    add_demo_team, available_countries, create_team, delete_player, delete_team, replace_team,
    seed_demo_teams, team_stats, update_player, update_team, COUNTRIES,
};
pub use simulate::{
    assign_scorers, goal_lambdas, shootout_home_prob, simulate_match, MatchOutcome, TeamSnapshot,
};
pub use squad::{autofill_squad, generate_player, SQUAD_SIZE};
pub use views::{
    bracket_view, get_match_view, match_details, top_scorers, tournament_status, BracketView,
    MatchDetails, MatchView, ScorerLine, StatusView, TopScorer,
};
