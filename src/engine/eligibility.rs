use crate::model::matches::Match;
use crate::model::tournament::{Tournament, TournamentSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A match open for prediction, carrying a summary of its tournament.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EligibleMatch {
    #[serde(flatten)]
    pub fixture: Match,
    pub tournament: TournamentSummary,
}

/// Tournaments whose matches `user_id` may predict, keyed by id.
pub fn visible_tournaments(
    user_id: Uuid,
    participating: &HashSet<Uuid>,
    tournaments: &[Tournament],
) -> HashMap<Uuid, TournamentSummary> {
    tournaments
        .iter()
        .filter(|t| t.is_visible_to(user_id, participating.contains(&t.id)))
        .map(|t| (t.id, t.summary()))
        .collect()
}

/// Keeps the matches of visible tournaments that are still open at `now`,
/// earliest start first (unscheduled last), capped at `limit`.
pub fn filter_eligible(
    matches: Vec<Match>,
    visible: &HashMap<Uuid, TournamentSummary>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<EligibleMatch> {
    let mut eligible: Vec<EligibleMatch> = matches
        .into_iter()
        .filter(|m| m.is_open_at(now))
        .filter_map(|m| {
            visible.get(&m.tournament_id).map(|tournament| EligibleMatch {
                tournament: tournament.clone(),
                fixture: m,
            })
        })
        .collect();

    // stable: equal start times keep store order
    eligible.sort_by(|a, b| by_start_time(&a.fixture, &b.fixture));
    eligible.truncate(limit);
    eligible
}

/// Drops matches the user already has a prediction for.
///
/// Runs after the eligibility query because the store cannot express the
/// anti-join against the user's predictions in the same query. The cap in
/// [`filter_eligible`] is therefore applied first and the result may hold
/// fewer matches than the cap.
pub fn remove_already_predicted(
    matches: Vec<EligibleMatch>,
    predicted_match_ids: &HashSet<Uuid>,
) -> Vec<EligibleMatch> {
    matches
        .into_iter()
        .filter(|m| !predicted_match_ids.contains(&m.fixture.id))
        .collect()
}

fn by_start_time(a: &Match, b: &Match) -> Ordering {
    match (a.start_time, b.start_time) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
