use crate::model::matches::Match;
use crate::model::participant::Participant;
use crate::model::prediction::{Prediction, ResolvedPrediction};
use crate::model::tournament::{Tournament, TournamentStatus};
use crate::repository::store::{OpenMatchQuery, RecordStore, Result, StoreError};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    tournaments: Vec<Tournament>,
    matches: Vec<Match>,
    participants: Vec<Participant>,
    predictions: Vec<Prediction>,
}

/// In-process [`RecordStore`] with the same filtering, ordering and
/// uniqueness rules as the PostgreSQL store.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: Mutex<HashSet<&'static str>>,
    activity_limits: Mutex<Vec<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tournament(&self, tournament: Tournament) {
        self.tables.lock().unwrap().tournaments.push(tournament);
    }

    pub fn add_match(&self, fixture: Match) {
        self.tables.lock().unwrap().matches.push(fixture);
    }

    pub fn add_participant(&self, participant: Participant) {
        self.tables.lock().unwrap().participants.push(participant);
    }

    pub fn add_prediction(&self, prediction: Prediction) {
        self.tables.lock().unwrap().predictions.push(prediction);
    }

    /// Makes every later call of the named store operation fail.
    pub fn fail_on(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    /// Limits passed to `resolved_predictions`, oldest first.
    pub fn requested_activity_limits(&self) -> Vec<usize> {
        self.activity_limits.lock().unwrap().clone()
    }

    fn check(&self, operation: &'static str) -> Result<()> {
        if self.failing.lock().unwrap().contains(operation) {
            return Err(StoreError::QueryFailure(format!(
                "{operation}: connection reset by peer"
            )));
        }
        Ok(())
    }
}

/// `SUM` semantics: `None` when no non-null total exists.
fn sum_points<I>(totals: I) -> Option<i64>
where
    I: IntoIterator<Item = Option<i32>>,
{
    totals
        .into_iter()
        .flatten()
        .map(i64::from)
        .fold(None, |acc, p| Some(acc.unwrap_or(0) + p))
}

fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn participant_tournament_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        self.check("participant_tournament_ids")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .participants
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.tournament_id)
            .collect())
    }

    async fn administered_tournament_ids(
        &self,
        admin_id: Uuid,
        excluding: TournamentStatus,
    ) -> Result<Vec<Uuid>> {
        self.check("administered_tournament_ids")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .tournaments
            .iter()
            .filter(|t| t.admin_id == admin_id && t.status != excluding)
            .map(|t| t.id)
            .collect())
    }

    async fn tournaments_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tournament>> {
        self.check("tournaments_by_ids")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .tournaments
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn open_matches(&self, query: OpenMatchQuery<'_>) -> Result<Vec<Match>> {
        self.check("open_matches")?;
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Match> = tables
            .matches
            .iter()
            .filter(|m| query.tournament_ids.contains(&m.tournament_id))
            .filter(|m| m.result.is_none())
            .filter(|m| m.lock_timestamp.map_or(true, |lock| lock > query.now))
            .filter(|m| m.start_time.map_or(true, |start| start > query.now))
            .filter(|m| {
                !query
                    .excluded_teams
                    .iter()
                    .any(|team| *team == m.team_a || *team == m.team_b)
            })
            .filter(|m| !m.is_bye)
            .cloned()
            .collect();
        rows.sort_by(|a, b| nulls_last(a.start_time, b.start_time, false));
        rows.truncate(query.limit);
        Ok(rows)
    }

    async fn predicted_match_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        self.check("predicted_match_ids")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .predictions
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.match_id)
            .collect())
    }

    async fn resolved_predictions(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ResolvedPrediction>> {
        self.check("resolved_predictions")?;
        self.activity_limits.lock().unwrap().push(limit);
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<ResolvedPrediction> = tables
            .predictions
            .iter()
            .filter(|p| p.user_id == user_id)
            .filter_map(|p| {
                let fixture = tables.matches.iter().find(|m| m.id == p.match_id)?;
                let tournament = tables
                    .tournaments
                    .iter()
                    .find(|t| t.id == fixture.tournament_id)?;
                Some(ResolvedPrediction {
                    prediction: p.clone(),
                    fixture: fixture.clone(),
                    tournament: tournament.summary(),
                })
            })
            .filter(|row| row.fixture.is_resolved())
            .filter(|row| row.tournament.status != TournamentStatus::Draft)
            .collect();
        rows.sort_by(|a, b| {
            nulls_last(a.fixture.resolved_at, b.fixture.resolved_at, true)
                .then_with(|| nulls_last(a.fixture.start_time, b.fixture.start_time, true))
        });
        rows.truncate(limit);
        Ok(rows)
    }

    async fn count_administered_tournaments(&self, admin_id: Uuid) -> Result<i64> {
        self.check("count_administered_tournaments")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .tournaments
            .iter()
            .filter(|t| t.admin_id == admin_id)
            .count() as i64)
    }

    async fn count_participations(&self, user_id: Uuid) -> Result<i64> {
        self.check("count_participations")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .participants
            .iter()
            .filter(|p| p.user_id == user_id)
            .count() as i64)
    }

    async fn count_predictions(&self, user_id: Uuid) -> Result<i64> {
        self.check("count_predictions")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .predictions
            .iter()
            .filter(|p| p.user_id == user_id)
            .count() as i64)
    }

    async fn sum_participant_points(&self, user_id: Uuid) -> Result<Option<i64>> {
        self.check("sum_participant_points")?;
        let tables = self.tables.lock().unwrap();
        Ok(sum_points(
            tables
                .participants
                .iter()
                .filter(|p| p.user_id == user_id)
                .map(|p| p.total_points),
        ))
    }

    async fn find_tournament(&self, id: Uuid) -> Result<Option<Tournament>> {
        self.check("find_tournament")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.tournaments.iter().find(|t| t.id == id).cloned())
    }

    async fn find_tournament_by_invite_code(&self, code: &str) -> Result<Option<Tournament>> {
        self.check("find_tournament_by_invite_code")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .tournaments
            .iter()
            .find(|t| t.invite_code == code)
            .cloned())
    }

    async fn find_match(&self, id: Uuid) -> Result<Option<Match>> {
        self.check("find_match")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.matches.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_tournament(&self, tournament: &Tournament) -> Result<()> {
        self.check("insert_tournament")?;
        let mut tables = self.tables.lock().unwrap();
        if tables
            .tournaments
            .iter()
            .any(|t| t.invite_code == tournament.invite_code)
        {
            return Err(StoreError::UniqueViolation(
                "tournaments_invite_code_idx".to_string(),
            ));
        }
        tables.tournaments.push(tournament.clone());
        Ok(())
    }

    async fn insert_participant(&self, participant: &Participant) -> Result<()> {
        self.check("insert_participant")?;
        let mut tables = self.tables.lock().unwrap();
        if tables.participants.iter().any(|p| {
            p.tournament_id == participant.tournament_id && p.user_id == participant.user_id
        }) {
            return Err(StoreError::UniqueViolation(
                "participants_tournament_user_idx".to_string(),
            ));
        }
        tables.participants.push(participant.clone());
        Ok(())
    }

    async fn delete_participant(&self, tournament_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.check("delete_participant")?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.participants.len();
        tables
            .participants
            .retain(|p| !(p.tournament_id == tournament_id && p.user_id == user_id));
        Ok(tables.participants.len() < before)
    }

    async fn insert_prediction(&self, prediction: &Prediction) -> Result<()> {
        self.check("insert_prediction")?;
        let mut tables = self.tables.lock().unwrap();
        if tables
            .predictions
            .iter()
            .any(|p| p.match_id == prediction.match_id && p.user_id == prediction.user_id)
        {
            return Err(StoreError::UniqueViolation(
                "predictions_match_user_idx".to_string(),
            ));
        }
        tables.predictions.push(prediction.clone());
        Ok(())
    }

    async fn delete_prediction(&self, match_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.check("delete_prediction")?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.predictions.len();
        tables
            .predictions
            .retain(|p| !(p.match_id == match_id && p.user_id == user_id));
        Ok(tables.predictions.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_totals_are_skipped_in_the_sum() {
        assert_eq!(sum_points(vec![Some(3), None, Some(4)]), Some(7));
        assert_eq!(sum_points(vec![None, None]), None);
        assert_eq!(sum_points(Vec::new()), None);
    }
}
