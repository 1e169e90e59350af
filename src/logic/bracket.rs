//! Bracket state machine and tournament orchestration.
//!
//! Lifecycle: no tournament -> InProgress(QuarterFinal..Final) -> Finished.
//! `advance_round` is the only place a round transition happens, and it only
//! fires once every match of the current round is simulated. Callers serialize
//! the read-check-write sequence by holding `&mut S`, so two matches finishing
//! back to back cannot both observe "round complete" and duplicate the next
//! round.

use crate::commentary::{Commentator, GoalLine, MatchSummary, fallback_lines};
use crate::logic::simulate::{simulate_match, TeamSnapshot};
use crate::models::{
    FinalResult, FinalsEntry, LeagueError, Match, MatchStatus, Round, Team, TitleEntry,
    Tournament, TournamentStatus,
};
use crate::notify::Notifier;
use crate::store::{make_id, Store};
use chrono::Utc;
use rand::prelude::*;

pub const BRACKET_TEAMS: usize = 8;

/// How Start picks its 8 entrants from the registered pool.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeedPolicy {
    /// First 8 teams by registration time (normal start).
    EarliestRegistered,
    /// Top 8 by current rating (bracket rebuild).
    TopByRating,
}

/// Start a tournament: requires at least 8 registered teams and no tournament
/// currently in progress. Picks 8 per the policy, pairs them randomly, and
/// creates the 4 quarter-final matches.
pub fn start_tournament<S: Store>(
    store: &mut S,
    policy: SeedPolicy,
) -> Result<Tournament, LeagueError> {
    if store.active_tournament().is_some() {
        return Err(LeagueError::TournamentInProgress);
    }
    build_bracket(store, policy)
}

/// Wipe the current tournament and matches, then build a fresh bracket from
/// the top 8 teams by rating.
pub fn rebuild_bracket<S: Store>(store: &mut S) -> Result<Tournament, LeagueError> {
    let registered = store.find_teams().len();
    if registered < BRACKET_TEAMS {
        return Err(LeagueError::NotEnoughTeams {
            required: BRACKET_TEAMS,
            registered,
        });
    }
    store.delete_all_matches();
    store.delete_all_tournaments();
    build_bracket(store, SeedPolicy::TopByRating)
}

/// Clear all matches and the tournament record unconditionally. Teams and
/// players are untouched.
pub fn reset_tournament<S: Store>(store: &mut S) {
    store.delete_all_matches();
    store.delete_all_tournaments();
}

fn build_bracket<S: Store>(store: &mut S, policy: SeedPolicy) -> Result<Tournament, LeagueError> {
    let mut teams = store.find_teams();
    if teams.len() < BRACKET_TEAMS {
        return Err(LeagueError::NotEnoughTeams {
            required: BRACKET_TEAMS,
            registered: teams.len(),
        });
    }
    match policy {
        SeedPolicy::EarliestRegistered => teams.sort_by_key(|t| t.created_at),
        SeedPolicy::TopByRating => {
            teams.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal))
        }
    }
    teams.truncate(BRACKET_TEAMS);
    teams.shuffle(&mut thread_rng());

    let mut tournament = Tournament::new(
        make_id("tournament"),
        teams.iter().map(|t| t.id.clone()).collect(),
    );
    for pair in teams.chunks_exact(2) {
        let m = Match::new(
            make_id("match"),
            tournament.id.clone(),
            Round::QuarterFinal,
            pair[0].id.clone(),
            pair[1].id.clone(),
        );
        tournament.bracket.push(m.id.clone());
        store.insert_match(m);
    }
    store.insert_tournament(tournament.clone());
    log::info!(
        "tournament {} started: {} quarter-finals",
        tournament.id,
        tournament.bracket.len()
    );
    Ok(tournament)
}

/// Evaluate the current round and progress the tournament if it is complete.
///
/// No-op while any match of the round is still pending, when the next round
/// was already created (idempotent against re-triggering), or when the
/// tournament is already finished. After the final it flips the tournament to
/// Finished, records the champion, and writes both finalists' history entries
/// exactly once.
pub fn advance_round<S: Store>(store: &mut S, tournament_id: &str) -> Result<(), LeagueError> {
    let mut tournament = match store.get_tournament(tournament_id) {
        Some(t) => t,
        None => return Ok(()),
    };
    if tournament.status == TournamentStatus::Finished {
        return Ok(());
    }

    let current = store.find_matches_by_round(tournament_id, tournament.current_round);
    if current.is_empty() || current.iter().any(|m| m.status != MatchStatus::Simulated) {
        return Ok(());
    }
    // Winners in the pairing order the matches were created.
    let winners: Vec<String> = current.iter().filter_map(|m| m.winner.clone()).collect();

    match tournament.current_round.next() {
        Some(next_round) => {
            if !store.find_matches_by_round(tournament_id, next_round).is_empty() {
                log::debug!("{next_round} already exists for {tournament_id}, skipping creation");
                return Ok(());
            }
            for pair in winners.chunks_exact(2) {
                let m = Match::new(
                    make_id("match"),
                    tournament_id.to_string(),
                    next_round,
                    pair[0].clone(),
                    pair[1].clone(),
                );
                tournament.bracket.push(m.id.clone());
                store.insert_match(m);
            }
            tournament.current_round = next_round;
            tournament.teams = winners;
            store.update_tournament(&tournament);
            log::info!("tournament {tournament_id} advanced to {next_round}");
        }
        None => {
            let final_match = &current[0];
            finish_tournament(store, &mut tournament, final_match)?;
        }
    }
    Ok(())
}

/// Terminal transition: record the champion and append both finalists'
/// permanent history. Runs exactly once per tournament because the status
/// check in `advance_round` gates re-entry.
fn finish_tournament<S: Store>(
    store: &mut S,
    tournament: &mut Tournament,
    final_match: &Match,
) -> Result<(), LeagueError> {
    let winner_id = final_match
        .winner
        .clone()
        .ok_or_else(|| LeagueError::MatchNotFound(final_match.id.clone()))?;
    let loser_id = if winner_id == final_match.home_team {
        final_match.away_team.clone()
    } else {
        final_match.home_team.clone()
    };
    let score = format!("{}-{}", final_match.score.home, final_match.score.away);
    let date = Utc::now();

    let winner_team = store.get_team(&winner_id);
    let loser_team = store.get_team(&loser_id);
    let winner_country = winner_team.as_ref().map(|t| t.country.clone()).unwrap_or_default();
    let loser_country = loser_team.as_ref().map(|t| t.country.clone()).unwrap_or_default();

    if let Some(mut team) = winner_team {
        team.finals_history.push(FinalsEntry {
            tournament_id: tournament.id.clone(),
            date,
            opponent: loser_country.clone(),
            score: score.clone(),
            result: FinalResult::Winner,
        });
        team.winners_history.push(TitleEntry {
            tournament_id: tournament.id.clone(),
            date,
            opponent: loser_country,
            score: score.clone(),
        });
        store.update_team(&team);
    }
    if let Some(mut team) = loser_team {
        team.finals_history.push(FinalsEntry {
            tournament_id: tournament.id.clone(),
            date,
            opponent: winner_country.clone(),
            score,
            result: FinalResult::RunnerUp,
        });
        store.update_team(&team);
    }

    tournament.teams = vec![winner_id.clone()];
    tournament.winner = Some(winner_id);
    tournament.winner_name = Some(winner_country.clone());
    tournament.status = TournamentStatus::Finished;
    store.update_tournament(tournament);
    log::info!("tournament {} finished, champion {winner_country}", tournament.id);
    Ok(())
}

fn snapshot(team: &Team, store: &impl Store) -> TeamSnapshot {
    TeamSnapshot {
        id: team.id.clone(),
        name: team.country.clone(),
        rating: team.rating,
        squad: team
            .squad
            .iter()
            .filter_map(|pid| store.get_player(pid))
            .collect(),
    }
}

/// Simulate one match by id, persist the outcome, update both teams' win/loss
/// counters, attach commentary, and advance the bracket.
///
/// Re-invoking on an already-simulated match is an idempotent no-op returning
/// the stored record unchanged. The commentary and notification collaborators
/// run after the authoritative result is fixed; their failure degrades to the
/// fallback narrative or a logged warning, never to a simulation failure.
pub fn simulate_match_by_id<S: Store>(
    store: &mut S,
    commentator: &dyn Commentator,
    notifier: &dyn Notifier,
    match_id: &str,
) -> Result<Match, LeagueError> {
    let mut m = store
        .get_match(match_id)
        .ok_or_else(|| LeagueError::MatchNotFound(match_id.to_string()))?;
    if m.status == MatchStatus::Simulated {
        return Ok(m);
    }

    let (home_team, away_team) = match (store.get_team(&m.home_team), store.get_team(&m.away_team)) {
        (Some(h), Some(a)) => (h, a),
        _ => return Err(LeagueError::RostersMissing),
    };
    let home = snapshot(&home_team, store);
    let away = snapshot(&away_team, store);

    let outcome = simulate_match(&home, &away)?;

    // Win/loss counters move exactly once per match, at simulation time.
    let (mut winner_team, mut loser_team) = if outcome.winner == home_team.id {
        (home_team.clone(), away_team.clone())
    } else {
        (away_team.clone(), home_team.clone())
    };
    winner_team.wins += 1;
    loser_team.losses += 1;
    store.update_team(&winner_team);
    store.update_team(&loser_team);

    let summary = build_summary(store, &home, &away, &outcome, &winner_team.country);
    let commentary = match commentator.narrate(&summary) {
        Ok(lines) if !lines.is_empty() => lines,
        Ok(_) => fallback_lines(&summary),
        Err(e) => {
            log::warn!("commentary collaborator failed for {match_id}: {e}");
            fallback_lines(&summary)
        }
    };

    // All dependent fields are set before the single write that flips status,
    // so a concurrent reader never sees a half-simulated record.
    m.score.home = outcome.home_goals;
    m.score.away = outcome.away_goals;
    m.goal_events = outcome.events;
    m.winner = Some(outcome.winner);
    m.winner_name = Some(winner_team.country.clone());
    m.went_extra = outcome.went_extra;
    m.shootout = outcome.shootout;
    m.commentary = commentary;
    m.played_at = Some(Utc::now());
    m.status = MatchStatus::Simulated;
    store.update_match(&m);

    advance_round(store, &m.tournament_id)?;

    let recipients = [
        home_team.representative_email.clone(),
        away_team.representative_email.clone(),
    ];
    if let Err(e) = notifier.match_finished(&recipients, &summary) {
        log::warn!("notification failed for {match_id}: {e}");
    }

    Ok(m)
}

fn build_summary(
    store: &impl Store,
    home: &TeamSnapshot,
    away: &TeamSnapshot,
    outcome: &crate::logic::simulate::MatchOutcome,
    winner_name: &str,
) -> MatchSummary {
    let goals = outcome
        .events
        .iter()
        .map(|ev| GoalLine {
            minute: ev.minute,
            player: store
                .get_player(&ev.player_id)
                .map(|p| p.name)
                .unwrap_or_else(|| ev.player_id.clone()),
            team: if ev.team_id == home.id {
                home.name.clone()
            } else {
                away.name.clone()
            },
        })
        .collect();
    MatchSummary {
        home: home.name.clone(),
        away: away.name.clone(),
        home_goals: outcome.home_goals,
        away_goals: outcome.away_goals,
        goals,
        went_extra: outcome.went_extra,
        shootout: outcome.shootout,
        winner: winner_name.to_string(),
    }
}

/// Drive the active tournament to completion: simulate every pending match of
/// the current round, advance, and repeat until Finished. Invoked again after
/// completion it returns the terminal state without side effects.
pub fn auto_simulate<S: Store>(
    store: &mut S,
    commentator: &dyn Commentator,
    notifier: &dyn Notifier,
) -> Result<Tournament, LeagueError> {
    let mut tournament = match store.active_tournament() {
        Some(t) => t,
        None => {
            // Finished tournaments make re-runs a no-op rather than an error.
            return store
                .latest_tournament()
                .filter(|t| t.status == TournamentStatus::Finished)
                .ok_or(LeagueError::NoTournament);
        }
    };

    loop {
        let pending: Vec<Match> = store
            .find_matches_by_round(&tournament.id, tournament.current_round)
            .into_iter()
            .filter(|m| m.status == MatchStatus::Pending)
            .collect();

        if pending.is_empty() {
            advance_round(store, &tournament.id)?;
        } else {
            for m in &pending {
                simulate_match_by_id(store, commentator, notifier, &m.id)?;
            }
        }

        let updated = store
            .get_tournament(&tournament.id)
            .ok_or(LeagueError::NoTournament)?;
        if updated.status == TournamentStatus::Finished {
            return Ok(updated);
        }
        if pending.is_empty() && updated.current_round == tournament.current_round {
            // Round complete but no transition happened: nothing left to do.
            return Ok(updated);
        }
        tournament = updated;
    }
}
