//! Match Simulator: Poisson goal generation, extra-time and shootout
//! tiebreaks, and weighted scorer attribution.

use crate::models::{GoalEvent, LeagueError, Player, Position};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_distr::Poisson;

/// Base expected goals per side before the rating differential is applied.
const BASE_GOALS: f64 = 1.2;
/// Extra time is a short phase: lambdas shrink to 35% of regulation.
const EXTRA_TIME_FACTOR: f64 = 0.35;

/// Everything the simulator needs to know about one side.
#[derive(Clone, Debug)]
pub struct TeamSnapshot {
    pub id: String,
    /// Country name, used for winner naming.
    pub name: String,
    pub rating: f64,
    pub squad: Vec<Player>,
}

/// Authoritative outcome of one simulated match.
#[derive(Clone, Debug)]
pub struct MatchOutcome {
    pub home_goals: u32,
    pub away_goals: u32,
    /// Both sides' goals merged, sorted ascending by minute.
    pub events: Vec<GoalEvent>,
    /// Winning team id. Always set: knockout matches cannot draw.
    pub winner: String,
    pub went_extra: bool,
    pub shootout: bool,
}

/// Expected-goal rates for (home, away): `base ± (r_home − r_away)/20`,
/// clamped to [0.1, 4.0] to keep extreme rating gaps from producing
/// degenerate or runaway scorelines.
pub fn goal_lambdas(rating_home: f64, rating_away: f64) -> (f64, f64) {
    let adv = (rating_home - rating_away) / 20.0;
    (
        (BASE_GOALS + adv).clamp(0.1, 4.0),
        (BASE_GOALS - adv).clamp(0.1, 4.0),
    )
}

/// Shootout win probability for the home side: biased towards the stronger
/// team but never deterministic. The /200 normalization is intentionally
/// flatter than the /20 used for lambdas: penalties are close to a coin flip.
pub fn shootout_home_prob(rating_home: f64, rating_away: f64) -> f64 {
    (0.5 + (rating_home - rating_away) / 200.0).clamp(0.05, 0.95)
}

fn poisson_draw<R: Rng>(rng: &mut R, lambda: f64) -> u32 {
    // lambda is clamped positive upstream; Poisson::new only fails on
    // non-positive or non-finite input.
    let dist = Poisson::new(lambda.max(0.01)).expect("positive finite lambda");
    dist.sample(rng) as u32
}

/// Pick scorers for `goals` goals, with replacement. A player's weight is
/// `AT + 0.3·MD`, boosted x1.08 for the captain and floored at 0.1 so every
/// squad member stays eligible. Minutes are uniform in 1..=90, events sorted
/// by minute. An empty squad yields no events even when goals > 0: the goals
/// stand unattributed.
pub fn assign_scorers<R: Rng>(
    rng: &mut R,
    team_id: &str,
    squad: &[Player],
    goals: u32,
) -> Vec<GoalEvent> {
    if goals == 0 || squad.is_empty() {
        return Vec::new();
    }
    let weights: Vec<f64> = squad
        .iter()
        .map(|p| {
            let mut w = p.rating_at(Position::AT) as f64 + 0.3 * p.rating_at(Position::MD) as f64;
            if p.is_captain {
                w *= 1.08;
            }
            w.max(0.1)
        })
        .collect();
    // Weights are floored at 0.1, so the distribution is always valid.
    let dist = WeightedIndex::new(&weights).expect("positive weights");
    let mut events: Vec<GoalEvent> = (0..goals)
        .map(|_| GoalEvent {
            minute: rng.gen_range(1..=90),
            team_id: team_id.to_string(),
            player_id: squad[dist.sample(rng)].id.clone(),
        })
        .collect();
    events.sort_by_key(|e| e.minute);
    events
}

/// Simulate one knockout match between two snapshots.
///
/// Regulation goals are independent Poisson draws per side; a tie forces an
/// extra-time draw at reduced lambdas, and a tie after that is settled by a
/// rating-biased shootout (which decides the winner without adding a goal).
/// Rejected up front when either squad is empty: fabricating a result for a
/// roster-less team is an invalid-input condition, not a simulation.
pub fn simulate_match(home: &TeamSnapshot, away: &TeamSnapshot) -> Result<MatchOutcome, LeagueError> {
    if home.squad.is_empty() || away.squad.is_empty() {
        return Err(LeagueError::RostersMissing);
    }

    let mut rng = thread_rng();
    let (lam_home, lam_away) = goal_lambdas(home.rating, away.rating);
    let mut home_goals = poisson_draw(&mut rng, lam_home);
    let mut away_goals = poisson_draw(&mut rng, lam_away);

    let mut went_extra = false;
    let mut shootout = false;
    let winner = if home_goals == away_goals {
        went_extra = true;
        home_goals += poisson_draw(&mut rng, lam_home * EXTRA_TIME_FACTOR);
        away_goals += poisson_draw(&mut rng, lam_away * EXTRA_TIME_FACTOR);
        if home_goals == away_goals {
            shootout = true;
            let p_home = shootout_home_prob(home.rating, away.rating);
            if rng.gen::<f64>() < p_home {
                home.id.clone()
            } else {
                away.id.clone()
            }
        } else if home_goals > away_goals {
            home.id.clone()
        } else {
            away.id.clone()
        }
    } else if home_goals > away_goals {
        home.id.clone()
    } else {
        away.id.clone()
    };

    let mut events = assign_scorers(&mut rng, &home.id, &home.squad, home_goals);
    events.extend(assign_scorers(&mut rng, &away.id, &away.squad, away_goals));
    events.sort_by_key(|e| e.minute);

    Ok(MatchOutcome {
        home_goals,
        away_goals,
        events,
        winner,
        went_extra,
        shootout,
    })
}
