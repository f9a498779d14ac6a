use crate::model::matches::MatchResult;
use crate::model::prediction::ResolvedPrediction;
use crate::model::tournament::{TournamentStatus, TournamentSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use uuid::Uuid;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    /// Covers both "scored zero" and "not scored yet".
    NoWin,
}

impl Outcome {
    pub fn from_points(points_earned: Option<i32>) -> Self {
        match points_earned {
            Some(points) if points > 0 => Outcome::Win,
            _ => Outcome::NoWin,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPick {
    pub predicted_winner: String,
    pub predicted_score: Option<String>,
    pub points_earned: Option<i32>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub match_id: Uuid,
    pub tournament: TournamentSummary,
    pub team_a: String,
    pub team_b: String,
    pub result: MatchResult,
    pub prediction: UserPick,
    pub played_at: Option<DateTime<Utc>>,
    pub outcome: Outcome,
}

/// Builds the most-recent-first feed of the user's resolved predictions.
///
/// Rows whose match has no result or whose tournament is still a draft are
/// skipped. Matches without a played time sort after dated ones.
pub fn recent_activity(rows: Vec<ResolvedPrediction>, limit: usize) -> Vec<ActivityItem> {
    let mut items: Vec<ActivityItem> = rows
        .into_iter()
        .filter(|row| row.tournament.status != TournamentStatus::Draft)
        .filter_map(|row| {
            let played_at = row.fixture.played_at();
            let result = row.fixture.result?;
            Some(ActivityItem {
                match_id: row.fixture.id,
                tournament: row.tournament,
                team_a: row.fixture.team_a,
                team_b: row.fixture.team_b,
                result,
                outcome: Outcome::from_points(row.prediction.points_earned),
                prediction: UserPick {
                    predicted_winner: row.prediction.predicted_winner,
                    predicted_score: row.prediction.predicted_score,
                    points_earned: row.prediction.points_earned,
                },
                played_at,
            })
        })
        .collect();

    items.sort_by(|a, b| most_recent_first(a.played_at, b.played_at));
    items.truncate(limit);
    items
}

fn most_recent_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
