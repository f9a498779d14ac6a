use crate::config::config::Config;
use crate::engine::activity::{self, ActivityItem};
use crate::engine::eligibility::{
    filter_eligible, remove_already_predicted, visible_tournaments, EligibleMatch,
};
use crate::engine::grouping::{group_by_tournament, TournamentGroup};
use crate::engine::stats::DashboardStats;
use crate::engine::MAX_ACTIVITY_LIMIT;
use crate::model::matches::{Match, BYE_TEAM, PLACEHOLDER_TEAM};
use crate::model::participant::Participant;
use crate::model::prediction::{NewPredictionSchema, Prediction};
use crate::model::tournament::{CreateTournamentSchema, Tournament, TournamentStatus};
use crate::repository::store::{OpenMatchQuery, RecordStore, StoreError};
use crate::util::invite_code::generate_invite_code;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("{0}")]
    StoreQueryFailure(String),
    #[error("You have already joined this tournament")]
    AlreadyJoined,
    #[error("You have already predicted this match")]
    AlreadyPredicted,
    #[error("This match is no longer open for predictions")]
    MatchNotOpen,
    #[error("This tournament is not open for joining")]
    TournamentUnavailable,
    #[error("Invalid prediction: {0}")]
    InvalidPrediction(String),
    #[error("Invalid tournament: {0}")]
    InvalidTournament(String),
}

impl From<StoreError> for TrackerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::QueryFailure(message) | StoreError::UniqueViolation(message) => {
                TrackerError::StoreQueryFailure(message)
            }
        }
    }
}

const EXCLUDED_TEAMS: [&str; 2] = [PLACEHOLDER_TEAM, BYE_TEAM];

/// Reads and writes a user's tournament predictions through a [`RecordStore`].
///
/// Every call takes the acting user explicitly. Reads are independent store
/// round-trips followed by the pure functions in [`crate::engine`]; there is
/// no caching, retrying or partial result.
pub struct TrackerService {
    store: Arc<dyn RecordStore>,
    eligible_match_limit: usize,
    activity_limit: usize,
}

impl TrackerService {
    pub fn new(store: Arc<dyn RecordStore>, config: &Config) -> Self {
        Self::with_limits(store, config.eligible_match_limit, config.activity_limit)
    }

    pub fn with_limits(
        store: Arc<dyn RecordStore>,
        eligible_match_limit: usize,
        activity_limit: usize,
    ) -> Self {
        TrackerService {
            store,
            eligible_match_limit,
            activity_limit,
        }
    }

    pub fn activity_limit(&self) -> usize {
        self.activity_limit
    }

    /// Matches the user can still predict and has not predicted yet.
    pub async fn find_eligible_matches(&self, user_id: Uuid) -> Result<Vec<EligibleMatch>> {
        self.find_eligible_matches_at(user_id, Utc::now()).await
    }

    pub async fn find_eligible_matches_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<EligibleMatch>> {
        let eligible = self.open_matches_at(user_id, now).await?;
        if eligible.is_empty() {
            return Ok(eligible);
        }

        // fetched separately: the store can't anti-join this into the query above
        let predicted: HashSet<Uuid> = self
            .store
            .predicted_match_ids(user_id)
            .await?
            .into_iter()
            .collect();
        Ok(remove_already_predicted(eligible, &predicted))
    }

    pub async fn eligible_matches_by_tournament(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TournamentGroup>> {
        let eligible = self.find_eligible_matches(user_id).await?;
        Ok(group_by_tournament(eligible))
    }

    /// Eligibility without the already-predicted check, evaluated at `now`.
    async fn open_matches_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<EligibleMatch>> {
        let participating = self.store.participant_tournament_ids(user_id).await?;
        let administered = self
            .store
            .administered_tournament_ids(user_id, TournamentStatus::Draft)
            .await?;

        let mut candidate_ids: Vec<Uuid> =
            participating.iter().copied().chain(administered).collect();
        candidate_ids.sort_unstable();
        candidate_ids.dedup();
        if candidate_ids.is_empty() {
            debug!("User {user_id} has no tournaments, nothing to predict");
            return Ok(Vec::new());
        }

        let tournaments = self.store.tournaments_by_ids(&candidate_ids).await?;
        let participating: HashSet<Uuid> = participating.into_iter().collect();
        let visible = visible_tournaments(user_id, &participating, &tournaments);
        if visible.is_empty() {
            return Ok(Vec::new());
        }

        let visible_ids: Vec<Uuid> = visible.keys().copied().collect();
        let rows = self
            .store
            .open_matches(OpenMatchQuery {
                tournament_ids: &visible_ids,
                now,
                excluded_teams: &EXCLUDED_TEAMS,
                limit: self.eligible_match_limit,
            })
            .await?;
        Ok(filter_eligible(rows, &visible, now, self.eligible_match_limit))
    }

    /// Most recent resolved picks, at most [`MAX_ACTIVITY_LIMIT`] whatever the caller asks for.
    pub async fn recent_activity(&self, user_id: Uuid, limit: usize) -> Result<Vec<ActivityItem>> {
        let limit = limit.min(MAX_ACTIVITY_LIMIT);
        let rows = self.store.resolved_predictions(user_id, limit).await?;
        Ok(activity::recent_activity(rows, limit))
    }

    /// Four independent aggregates; the first failing query fails the call.
    pub async fn dashboard_stats(&self, user_id: Uuid) -> Result<DashboardStats> {
        let organized = self.store.count_administered_tournaments(user_id).await?;
        let joined = self.store.count_participations(user_id).await?;
        let predicted = self.store.count_predictions(user_id).await?;
        let points = self.store.sum_participant_points(user_id).await?;
        Ok(DashboardStats::new(organized, joined, predicted, points))
    }

    pub async fn create_tournament(
        &self,
        admin_id: Uuid,
        schema: CreateTournamentSchema,
    ) -> Result<Tournament> {
        let name = schema.name.trim();
        if name.is_empty() {
            return Err(TrackerError::InvalidTournament(
                "Tournament name cannot be empty".to_string(),
            ));
        }

        let tournament = Tournament {
            id: Uuid::new_v4(),
            name: name.to_string(),
            status: TournamentStatus::Draft,
            admin_id,
            invite_code: generate_invite_code(),
            teams: schema.teams,
            scoring: schema.scoring,
            created_at: Utc::now(),
        };
        self.store.insert_tournament(&tournament).await?;
        info!("User {admin_id} created tournament {}", tournament.id);
        Ok(tournament)
    }

    pub async fn find_tournament_by_invite_code(&self, code: &str) -> Result<Option<Tournament>> {
        Ok(self.store.find_tournament_by_invite_code(code.trim()).await?)
    }

    pub async fn join_tournament(&self, user_id: Uuid, tournament_id: Uuid) -> Result<Participant> {
        match self.store.find_tournament(tournament_id).await? {
            Some(t) if t.status != TournamentStatus::Draft => {}
            _ => return Err(TrackerError::TournamentUnavailable),
        }

        let participant = Participant::new(tournament_id, user_id);
        match self.store.insert_participant(&participant).await {
            Ok(()) => {
                info!("User {user_id} joined tournament {tournament_id}");
                Ok(participant)
            }
            Err(StoreError::UniqueViolation(_)) => Err(TrackerError::AlreadyJoined),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn leave_tournament(&self, user_id: Uuid, tournament_id: Uuid) -> Result<bool> {
        Ok(self.store.delete_participant(tournament_id, user_id).await?)
    }

    pub async fn submit_prediction(
        &self,
        user_id: Uuid,
        schema: NewPredictionSchema,
    ) -> Result<Prediction> {
        self.submit_prediction_at(user_id, schema, Utc::now()).await
    }

    pub async fn submit_prediction_at(
        &self,
        user_id: Uuid,
        schema: NewPredictionSchema,
        now: DateTime<Utc>,
    ) -> Result<Prediction> {
        schema
            .validate()
            .map_err(|e| TrackerError::InvalidPrediction(e.to_string()))?;

        let fixture = self
            .store
            .find_match(schema.match_id)
            .await?
            .ok_or(TrackerError::MatchNotOpen)?;
        self.ensure_open(user_id, &fixture, now).await?;
        if !fixture.involves(schema.predicted_winner.trim()) {
            return Err(TrackerError::InvalidPrediction(format!(
                "winner must be {} or {}",
                fixture.team_a, fixture.team_b
            )));
        }

        let prediction = schema.into_prediction(user_id);
        match self.store.insert_prediction(&prediction).await {
            Ok(()) => Ok(prediction),
            Err(StoreError::UniqueViolation(_)) => Err(TrackerError::AlreadyPredicted),
            Err(err) => Err(err.into()),
        }
    }

    /// Removes the user's prediction while the match is still open. Returns
    /// `false` when there was nothing to remove.
    pub async fn withdraw_prediction(&self, user_id: Uuid, match_id: Uuid) -> Result<bool> {
        self.withdraw_prediction_at(user_id, match_id, Utc::now()).await
    }

    pub async fn withdraw_prediction_at(
        &self,
        user_id: Uuid,
        match_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let fixture = match self.store.find_match(match_id).await? {
            Some(fixture) => fixture,
            None => return Ok(false),
        };
        if !fixture.is_open_at(now) {
            return Err(TrackerError::MatchNotOpen);
        }
        Ok(self.store.delete_prediction(match_id, user_id).await?)
    }

    /// Same rules as eligibility: open at `now` and in a tournament the user
    /// can see.
    async fn ensure_open(&self, user_id: Uuid, fixture: &Match, now: DateTime<Utc>) -> Result<()> {
        if !fixture.is_open_at(now) {
            return Err(TrackerError::MatchNotOpen);
        }
        let tournament = self
            .store
            .find_tournament(fixture.tournament_id)
            .await?
            .ok_or(TrackerError::MatchNotOpen)?;
        let is_participant = self
            .store
            .participant_tournament_ids(user_id)
            .await?
            .contains(&fixture.tournament_id);
        if !tournament.is_visible_to(user_id, is_participant) {
            return Err(TrackerError::MatchNotOpen);
        }
        Ok(())
    }
}
