use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Draft,
    Active,
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Draft => "draft",
            TournamentStatus::Active => "active",
            TournamentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TournamentStatus::Draft),
            "active" => Ok(TournamentStatus::Active),
            "completed" => Ok(TournamentStatus::Completed),
            other => Err(format!("unknown tournament status '{other}'")),
        }
    }
}

/// One entry of a tournament's team roster, kept in roster order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TeamSlot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRules {
    pub points_correct_winner: i32,
    pub points_exact_score: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        ScoringRules {
            points_correct_winner: 1,
            points_exact_score: 3,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub status: TournamentStatus,
    pub admin_id: Uuid,
    pub invite_code: String,
    pub teams: Vec<TeamSlot>,
    pub scoring: ScoringRules,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            id: self.id,
            name: self.name.to_owned(),
            status: self.status,
        }
    }

    /// Participants see any non-draft tournament they joined, admins see their
    /// own once it leaves draft. Drafts are hidden from everyone.
    pub fn is_visible_to(&self, user_id: Uuid, is_participant: bool) -> bool {
        if self.status == TournamentStatus::Draft {
            return false;
        }
        is_participant || self.admin_id == user_id
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub id: Uuid,
    pub name: String,
    pub status: TournamentStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentSchema {
    pub name: String,
    #[serde(default)]
    pub teams: Vec<TeamSlot>,
    #[serde(default)]
    pub scoring: ScoringRules,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::model::schema::tournaments)]
pub struct TournamentRecord {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub admin_id: Uuid,
    pub invite_code: String,
    pub teams: serde_json::Value,
    pub points_correct_winner: i32,
    pub points_exact_score: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<TournamentRecord> for Tournament {
    type Error = String;

    fn try_from(record: TournamentRecord) -> Result<Self, Self::Error> {
        let status = record.status.parse::<TournamentStatus>()?;
        let teams: Vec<TeamSlot> = serde_json::from_value(record.teams)
            .map_err(|e| format!("malformed roster for tournament {}: {e}", record.id))?;
        Ok(Tournament {
            id: record.id,
            name: record.name,
            status,
            admin_id: record.admin_id,
            invite_code: record.invite_code,
            teams,
            scoring: ScoringRules {
                points_correct_winner: record.points_correct_winner,
                points_exact_score: record.points_exact_score,
            },
            created_at: record.created_at,
        })
    }
}

impl TryFrom<&Tournament> for TournamentRecord {
    type Error = String;

    fn try_from(tournament: &Tournament) -> Result<Self, Self::Error> {
        let teams = serde_json::to_value(&tournament.teams)
            .map_err(|e| format!("could not encode roster for tournament {}: {e}", tournament.id))?;
        Ok(TournamentRecord {
            id: tournament.id,
            name: tournament.name.to_owned(),
            status: tournament.status.as_str().to_string(),
            admin_id: tournament.admin_id,
            invite_code: tournament.invite_code.to_owned(),
            teams,
            points_correct_winner: tournament.scoring.points_correct_winner,
            points_exact_score: tournament.scoring.points_exact_score,
            created_at: tournament.created_at,
        })
    }
}
