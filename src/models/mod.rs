//! Data structures for the league: players, teams, matches, tournament state.

mod error;
mod game;
mod player;
mod team;
mod tournament;

pub use error::LeagueError;
pub use game::{GoalEvent, Match, MatchStatus, Round, Score};
pub use player::{Player, Position, Ratings, UpdatePlayer};
pub use team::{CreateTeam, FinalResult, FinalsEntry, Team, TeamStats, TitleEntry};
pub use tournament::{Tournament, TournamentStatus};
