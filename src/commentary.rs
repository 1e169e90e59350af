//! Commentary collaborator: turns a structured match summary into narrative
//! lines. The real generator is external and may be slow or unavailable, so
//! the engine always has a deterministic fallback; a match record is never
//! left without commentary and a collaborator failure never blocks the result.

use serde::Serialize;

/// One goal with names already resolved (the collaborator knows nothing about ids).
#[derive(Clone, Debug, Serialize)]
pub struct GoalLine {
    pub minute: u32,
    pub player: String,
    pub team: String,
}

/// Structured summary handed to the collaborator after the authoritative
/// outcome is fixed.
#[derive(Clone, Debug, Serialize)]
pub struct MatchSummary {
    pub home: String,
    pub away: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub goals: Vec<GoalLine>,
    pub went_extra: bool,
    pub shootout: bool,
    pub winner: String,
}

#[derive(Clone, Debug)]
pub struct CommentaryError(pub String);

impl std::fmt::Display for CommentaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "commentary unavailable: {}", self.0)
    }
}

impl std::error::Error for CommentaryError {}

/// External text-generation contract. Implementations may block or stream;
/// callers treat any `Err` (or empty output) as "use the fallback".
pub trait Commentator {
    fn narrate(&self, summary: &MatchSummary) -> Result<Vec<String>, CommentaryError>;
}

/// Minimal deterministic narrative: kickoff, one line per goal, tiebreak
/// notes, final whistle with the winner.
pub fn fallback_lines(summary: &MatchSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Kickoff between {} and {}!",
        summary.home, summary.away
    )];
    for g in &summary.goals {
        lines.push(format!("{}' - {} ({})", g.minute, g.player, g.team));
    }
    if summary.went_extra {
        lines.push("Match went into extra time.".to_string());
    }
    if summary.shootout {
        lines.push("Decided on penalties.".to_string());
    }
    lines.push(format!(
        "Final whistle. {} {} - {} {}. Winner: {}",
        summary.home, summary.home_goals, summary.away_goals, summary.away, summary.winner
    ));
    lines
}

/// Default collaborator: no external service, just the deterministic fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackCommentator;

impl Commentator for FallbackCommentator {
    fn narrate(&self, summary: &MatchSummary) -> Result<Vec<String>, CommentaryError> {
        Ok(fallback_lines(summary))
    }
}
