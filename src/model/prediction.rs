use crate::model::matches::Match;
use crate::model::tournament::TournamentSummary;
use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::model::schema::predictions)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: Uuid,
    pub match_id: Uuid,
    pub user_id: Uuid,
    pub predicted_winner: String,
    pub predicted_score: Option<String>,
    pub points_earned: Option<i32>,
    pub created_at: DateTime<Utc>,
}

lazy_static! {
    static ref SCORE_RE: Regex = Regex::new(r"^\d{1,3}-\d{1,3}$").unwrap();
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPredictionSchema {
    pub match_id: Uuid,
    #[validate(length(min = 1, message = "A predicted winner is required"))]
    pub predicted_winner: String,
    #[validate(regex(
        path = "SCORE_RE",
        message = "Score must look like 2-1 (home goals, dash, away goals)"
    ))]
    pub predicted_score: Option<String>,
}

impl NewPredictionSchema {
    pub fn into_prediction(self, user_id: Uuid) -> Prediction {
        Prediction {
            id: Uuid::new_v4(),
            match_id: self.match_id,
            user_id,
            predicted_winner: self.predicted_winner.trim().to_string(),
            predicted_score: self.predicted_score,
            points_earned: None,
            created_at: Utc::now(),
        }
    }
}

/// A user's prediction joined with its resolved match and the match's tournament.
#[derive(Debug, Clone)]
pub struct ResolvedPrediction {
    pub prediction: Prediction,
    pub fixture: Match,
    pub tournament: TournamentSummary,
}
