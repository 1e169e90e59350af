//! Football knockout league backend: library with models, the tournament
//! engine, and its collaborators.

pub mod commentary;
pub mod logic;
pub mod models;
pub mod notify;
pub mod store;

pub use commentary::{Commentator, FallbackCommentator, MatchSummary};
pub use logic::{
    advance_round, auto_simulate, autofill_squad, compute_team_rating, simulate_match,
    simulate_match_by_id, start_tournament, SeedPolicy, TeamSnapshot,
};
pub use models::{
    GoalEvent, LeagueError, Match, MatchStatus, Player, Position, Round, Team, Tournament,
    TournamentStatus,
};
pub use notify::{LogNotifier, Notifier};
pub use store::{make_id, MemStore, Store};
