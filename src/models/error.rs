//! Errors that can occur during league operations.

/// Failure taxonomy for all core-mutating operations. Idempotent re-invocations
/// (re-simulating a played match, re-advancing a completed round) are not errors
/// and return current state instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Referenced team id does not resolve.
    TeamNotFound(String),
    /// Referenced player id does not resolve.
    PlayerNotFound(String),
    /// Referenced match id does not resolve.
    MatchNotFound(String),
    /// No tournament exists (or none in progress) for the requested operation.
    NoTournament,
    /// Starting a tournament needs at least 8 registered teams.
    NotEnoughTeams { required: usize, registered: usize },
    /// A tournament is already in progress.
    TournamentInProgress,
    /// Team removal/replacement is blocked once a tournament has started.
    TournamentStarted,
    /// One or both teams of a match have no squad to simulate with.
    RostersMissing,
    /// Country is not in the predefined list.
    InvalidCountry(String),
    /// A team for this country already exists.
    DuplicateCountry(String),
    /// A team with this name already exists.
    DuplicateTeamName(String),
    /// No unclaimed countries remain for a demo team.
    NoCountriesLeft,
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::TeamNotFound(id) => write!(f, "Team not found: {id}"),
            LeagueError::PlayerNotFound(id) => write!(f, "Player not found: {id}"),
            LeagueError::MatchNotFound(id) => write!(f, "Match not found: {id}"),
            LeagueError::NoTournament => write!(f, "No tournament in progress"),
            LeagueError::NotEnoughTeams { required, registered } => {
                write!(f, "At least {required} teams required to start (have {registered})")
            }
            LeagueError::TournamentInProgress => write!(f, "A tournament is already in progress"),
            LeagueError::TournamentStarted => {
                write!(f, "Not allowed after the tournament has started")
            }
            LeagueError::RostersMissing => write!(f, "Teams or their squads are missing"),
            LeagueError::InvalidCountry(c) => {
                write!(f, "Invalid country: {c}. Must be one of the predefined countries")
            }
            LeagueError::DuplicateCountry(c) => {
                write!(f, "A team for {c} already exists")
            }
            LeagueError::DuplicateTeamName(n) => {
                write!(f, "A team named '{n}' already exists")
            }
            LeagueError::NoCountriesLeft => write!(f, "No available countries left"),
        }
    }
}

impl std::error::Error for LeagueError {}

impl LeagueError {
    /// True for errors that mean "the referenced record does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LeagueError::TeamNotFound(_)
                | LeagueError::PlayerNotFound(_)
                | LeagueError::MatchNotFound(_)
                | LeagueError::NoTournament
        )
    }
}
