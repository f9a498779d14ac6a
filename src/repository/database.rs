use crate::config::config::Config;
use crate::model::matches::{Match, MatchRecord};
use crate::model::participant::Participant;
use crate::model::prediction::{Prediction, ResolvedPrediction};
use crate::model::schema::{matches, participants, predictions, tournaments};
use crate::model::tournament::{Tournament, TournamentRecord, TournamentStatus};
use crate::repository::store::{OpenMatchQuery, RecordStore, Result, StoreError};
use async_trait::async_trait;
use deadpool::managed::Object;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection, RunQueryDsl,
};
use log::{error, warn};
use uuid::Uuid;

pub type DBPool = Pool<AsyncPgConnection>;

pub struct Database {
    pool: DBPool,
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::UniqueViolation(info.message().to_string())
            }
            other => StoreError::QueryFailure(other.to_string()),
        }
    }
}

fn failed(query: &'static str) -> impl Fn(DieselError) -> StoreError {
    move |err| {
        let err = StoreError::from(err);
        match &err {
            StoreError::UniqueViolation(_) => {
                warn!("The {query} query hit a uniqueness constraint. The error: {err}")
            }
            StoreError::QueryFailure(_) => {
                error!("An error occurred in the {query} query. The error: {err}")
            }
        }
        err
    }
}

fn decode(record: TournamentRecord) -> Result<Tournament> {
    Tournament::try_from(record).map_err(|e| {
        error!("Could not decode tournament row. The error: {e}");
        StoreError::QueryFailure(e)
    })
}

impl Database {
    pub fn new(config: &Config) -> Self {
        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url.as_str());
        let pool = Pool::builder(manager)
            .max_size(config.database_pool_size)
            .build()
            .expect("Failed to create pool.");
        Database { pool }
    }

    async fn get_db_conn(
        &self,
    ) -> Result<Object<AsyncDieselConnectionManager<AsyncPgConnection>>> {
        self.pool.get().await.map_err(|e| {
            error!("Couldn't acquire a db connection. The error: {e}");
            StoreError::QueryFailure(e.to_string())
        })
    }
}

#[async_trait]
impl RecordStore for Database {
    async fn participant_tournament_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let mut conn = self.get_db_conn().await?;
        participants::table
            .filter(participants::user_id.eq(user_id))
            .select(participants::tournament_id)
            .load::<Uuid>(&mut conn)
            .await
            .map_err(failed("participant_tournament_ids"))
    }

    async fn administered_tournament_ids(
        &self,
        admin_id: Uuid,
        excluding: TournamentStatus,
    ) -> Result<Vec<Uuid>> {
        let mut conn = self.get_db_conn().await?;
        tournaments::table
            .filter(tournaments::admin_id.eq(admin_id))
            .filter(tournaments::status.ne(excluding.as_str()))
            .select(tournaments::id)
            .load::<Uuid>(&mut conn)
            .await
            .map_err(failed("administered_tournament_ids"))
    }

    async fn tournaments_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tournament>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.get_db_conn().await?;
        let records = tournaments::table
            .filter(tournaments::id.eq_any(ids.to_vec()))
            .select(TournamentRecord::as_select())
            .load::<TournamentRecord>(&mut conn)
            .await
            .map_err(failed("tournaments_by_ids"))?;
        records.into_iter().map(decode).collect()
    }

    async fn open_matches(&self, query: OpenMatchQuery<'_>) -> Result<Vec<Match>> {
        if query.tournament_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.get_db_conn().await?;
        let records = matches::table
            .filter(matches::tournament_id.eq_any(query.tournament_ids.to_vec()))
            .filter(matches::result_winner.is_null())
            .filter(
                matches::lock_timestamp
                    .is_null()
                    .or(matches::lock_timestamp.gt(query.now)),
            )
            .filter(
                matches::start_time
                    .is_null()
                    .or(matches::start_time.gt(query.now)),
            )
            .filter(matches::team_a.ne_all(query.excluded_teams.to_vec()))
            .filter(matches::team_b.ne_all(query.excluded_teams.to_vec()))
            .filter(matches::is_bye.eq(false))
            .order(matches::start_time.asc().nulls_last())
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .select(MatchRecord::as_select())
            .load::<MatchRecord>(&mut conn)
            .await
            .map_err(failed("open_matches"))?;
        Ok(records.into_iter().map(Match::from).collect())
    }

    async fn predicted_match_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let mut conn = self.get_db_conn().await?;
        predictions::table
            .filter(predictions::user_id.eq(user_id))
            .select(predictions::match_id)
            .load::<Uuid>(&mut conn)
            .await
            .map_err(failed("predicted_match_ids"))
    }

    async fn resolved_predictions(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ResolvedPrediction>> {
        let mut conn = self.get_db_conn().await?;
        let rows = predictions::table
            .inner_join(matches::table.inner_join(tournaments::table))
            .filter(predictions::user_id.eq(user_id))
            .filter(matches::result_winner.is_not_null())
            .filter(tournaments::status.ne(TournamentStatus::Draft.as_str()))
            .order((
                matches::resolved_at.desc().nulls_last(),
                matches::start_time.desc().nulls_last(),
            ))
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .select((
                Prediction::as_select(),
                MatchRecord::as_select(),
                TournamentRecord::as_select(),
            ))
            .load::<(Prediction, MatchRecord, TournamentRecord)>(&mut conn)
            .await
            .map_err(failed("resolved_predictions"))?;

        rows.into_iter()
            .map(|(prediction, fixture, tournament)| {
                Ok(ResolvedPrediction {
                    prediction,
                    fixture: Match::from(fixture),
                    tournament: decode(tournament)?.summary(),
                })
            })
            .collect()
    }

    async fn count_administered_tournaments(&self, admin_id: Uuid) -> Result<i64> {
        let mut conn = self.get_db_conn().await?;
        tournaments::table
            .filter(tournaments::admin_id.eq(admin_id))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(failed("count_administered_tournaments"))
    }

    async fn count_participations(&self, user_id: Uuid) -> Result<i64> {
        let mut conn = self.get_db_conn().await?;
        participants::table
            .filter(participants::user_id.eq(user_id))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(failed("count_participations"))
    }

    async fn count_predictions(&self, user_id: Uuid) -> Result<i64> {
        let mut conn = self.get_db_conn().await?;
        predictions::table
            .filter(predictions::user_id.eq(user_id))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(failed("count_predictions"))
    }

    async fn sum_participant_points(&self, user_id: Uuid) -> Result<Option<i64>> {
        let mut conn = self.get_db_conn().await?;
        participants::table
            .filter(participants::user_id.eq(user_id))
            .select(diesel::dsl::sum(participants::total_points))
            .first::<Option<i64>>(&mut conn)
            .await
            .map_err(failed("sum_participant_points"))
    }

    async fn find_tournament(&self, id: Uuid) -> Result<Option<Tournament>> {
        let mut conn = self.get_db_conn().await?;
        let record = tournaments::table
            .find(id)
            .select(TournamentRecord::as_select())
            .first::<TournamentRecord>(&mut conn)
            .await
            .optional()
            .map_err(failed("find_tournament"))?;
        record.map(decode).transpose()
    }

    async fn find_tournament_by_invite_code(&self, code: &str) -> Result<Option<Tournament>> {
        let mut conn = self.get_db_conn().await?;
        let record = tournaments::table
            .filter(tournaments::invite_code.eq(code))
            .select(TournamentRecord::as_select())
            .first::<TournamentRecord>(&mut conn)
            .await
            .optional()
            .map_err(failed("find_tournament_by_invite_code"))?;
        record.map(decode).transpose()
    }

    async fn find_match(&self, id: Uuid) -> Result<Option<Match>> {
        let mut conn = self.get_db_conn().await?;
        let record = matches::table
            .find(id)
            .select(MatchRecord::as_select())
            .first::<MatchRecord>(&mut conn)
            .await
            .optional()
            .map_err(failed("find_match"))?;
        Ok(record.map(Match::from))
    }

    async fn insert_tournament(&self, tournament: &Tournament) -> Result<()> {
        let record = TournamentRecord::try_from(tournament).map_err(|e| {
            error!("Could not encode tournament row. The error: {e}");
            StoreError::QueryFailure(e)
        })?;
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(tournaments::table)
            .values(record)
            .execute(&mut conn)
            .await
            .map_err(failed("insert_tournament"))?;
        Ok(())
    }

    async fn insert_participant(&self, participant: &Participant) -> Result<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(participants::table)
            .values(participant)
            .execute(&mut conn)
            .await
            .map_err(failed("insert_participant"))?;
        Ok(())
    }

    async fn delete_participant(&self, tournament_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut conn = self.get_db_conn().await?;
        let deleted = diesel::delete(
            participants::table
                .filter(participants::tournament_id.eq(tournament_id))
                .filter(participants::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(failed("delete_participant"))?;
        Ok(deleted > 0)
    }

    async fn insert_prediction(&self, prediction: &Prediction) -> Result<()> {
        let mut conn = self.get_db_conn().await?;
        diesel::insert_into(predictions::table)
            .values(prediction)
            .execute(&mut conn)
            .await
            .map_err(failed("insert_prediction"))?;
        Ok(())
    }

    async fn delete_prediction(&self, match_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut conn = self.get_db_conn().await?;
        let deleted = diesel::delete(
            predictions::table
                .filter(predictions::match_id.eq(match_id))
                .filter(predictions::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(failed("delete_prediction"))?;
        Ok(deleted > 0)
    }
}
