use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

/// Team name used for a bracket slot whose occupant is not decided yet.
pub const PLACEHOLDER_TEAM: &str = "TBD";
/// Team name used for the empty side of a bye.
pub const BYE_TEAM: &str = "BYE";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub winner: String,
    pub score: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub round: i32,
    pub team_a: String,
    pub team_b: String,
    pub start_time: Option<DateTime<Utc>>,
    pub lock_timestamp: Option<DateTime<Utc>>,
    pub result: Option<MatchResult>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub is_bye: bool,
}

impl Match {
    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    pub fn has_real_teams(&self) -> bool {
        !self.is_bye && is_real_team(&self.team_a) && is_real_team(&self.team_b)
    }

    /// Whether the match still accepts predictions at `now`: unresolved, not
    /// locked, not started and played between two real teams.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_resolved()
            && self.lock_timestamp.map_or(true, |lock| lock > now)
            && self.start_time.map_or(true, |start| start > now)
            && self.has_real_teams()
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team_a == team || self.team_b == team
    }

    /// Time the result was posted; matches without one sort last in the
    /// activity feed.
    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }
}

pub fn is_real_team(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && name != PLACEHOLDER_TEAM && name != BYE_TEAM
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::model::schema::matches)]
pub struct MatchRecord {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub round: i32,
    pub team_a: String,
    pub team_b: String,
    pub start_time: Option<DateTime<Utc>>,
    pub lock_timestamp: Option<DateTime<Utc>>,
    pub result_winner: Option<String>,
    pub result_score: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub is_bye: bool,
}

impl From<MatchRecord> for Match {
    fn from(record: MatchRecord) -> Self {
        let result = record.result_winner.map(|winner| MatchResult {
            winner,
            score: record.result_score,
        });
        Match {
            id: record.id,
            tournament_id: record.tournament_id,
            round: record.round,
            team_a: record.team_a,
            team_b: record.team_b,
            start_time: record.start_time,
            lock_timestamp: record.lock_timestamp,
            result,
            resolved_at: record.resolved_at,
            is_bye: record.is_bye,
        }
    }
}
