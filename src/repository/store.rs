use crate::model::matches::Match;
use crate::model::participant::Participant;
use crate::model::prediction::{Prediction, ResolvedPrediction};
use crate::model::tournament::{Tournament, TournamentStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store query failed: {0}")]
    QueryFailure(String),
    #[error("record already exists: {0}")]
    UniqueViolation(String),
}

/// Row filters for [`RecordStore::open_matches`]. Mirrors the client-side
/// eligibility rules so the store can do the bulk of the narrowing.
#[derive(Debug, Clone)]
pub struct OpenMatchQuery<'a> {
    pub tournament_ids: &'a [Uuid],
    pub now: DateTime<Utc>,
    pub excluded_teams: &'a [&'a str],
    pub limit: usize,
}

/// Set-oriented access to tournaments, matches, participants and predictions.
///
/// Lookups that find nothing return `None` or an empty collection. Inserts
/// that collide with the (tournament, user) or (match, user) uniqueness rule
/// return [`StoreError::UniqueViolation`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn participant_tournament_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>>;

    async fn administered_tournament_ids(
        &self,
        admin_id: Uuid,
        excluding: TournamentStatus,
    ) -> Result<Vec<Uuid>>;

    async fn tournaments_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tournament>>;

    /// Unresolved, unlocked, unstarted, non-bye matches of the given
    /// tournaments, earliest start first with unscheduled matches last.
    async fn open_matches(&self, query: OpenMatchQuery<'_>) -> Result<Vec<Match>>;

    async fn predicted_match_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>>;

    /// The user's predictions on matches that have a result, most recently
    /// resolved first.
    async fn resolved_predictions(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ResolvedPrediction>>;

    async fn count_administered_tournaments(&self, admin_id: Uuid) -> Result<i64>;

    async fn count_participations(&self, user_id: Uuid) -> Result<i64>;

    async fn count_predictions(&self, user_id: Uuid) -> Result<i64>;

    /// `None` when the user has no participant row with a point total.
    async fn sum_participant_points(&self, user_id: Uuid) -> Result<Option<i64>>;

    async fn find_tournament(&self, id: Uuid) -> Result<Option<Tournament>>;

    async fn find_tournament_by_invite_code(&self, code: &str) -> Result<Option<Tournament>>;

    async fn find_match(&self, id: Uuid) -> Result<Option<Match>>;

    async fn insert_tournament(&self, tournament: &Tournament) -> Result<()>;

    async fn insert_participant(&self, participant: &Participant) -> Result<()>;

    async fn delete_participant(&self, tournament_id: Uuid, user_id: Uuid) -> Result<bool>;

    async fn insert_prediction(&self, prediction: &Prediction) -> Result<()>;

    async fn delete_prediction(&self, match_id: Uuid, user_id: Uuid) -> Result<bool>;
}
