use crate::model::response::{
    ActivityData, DataResponse, EligibleMatchesData, GenericResponse, StatsData,
};
use crate::service::tracker::TrackerError;
use crate::AppState;
use actix_web::{web::Data, HttpResponse, Responder};
use log::error;
use uuid::Uuid;

/// Maps an engine error onto the JSON failure envelope.
pub fn error_response(context: &str, err: TrackerError) -> HttpResponse {
    let body = GenericResponse::failed(err.to_string());
    match err {
        TrackerError::AlreadyJoined | TrackerError::AlreadyPredicted => {
            HttpResponse::Conflict().json(body)
        }
        TrackerError::MatchNotOpen | TrackerError::TournamentUnavailable => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        TrackerError::InvalidPrediction(_) | TrackerError::InvalidTournament(_) => {
            HttpResponse::BadRequest().json(body)
        }
        TrackerError::StoreQueryFailure(ref message) => {
            error!(
                "An error occurred in the {} function. The error: {}",
                context, message
            );
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub async fn eligible_matches_service(data: Data<AppState>, user_id: Uuid) -> impl Responder {
    match data.tracker.eligible_matches_by_tournament(user_id).await {
        Ok(tournaments) => {
            HttpResponse::Ok().json(DataResponse::success(EligibleMatchesData { tournaments }))
        }
        Err(err) => error_response("eligible_matches_service", err),
    }
}

pub async fn recent_activity_service(
    data: Data<AppState>,
    user_id: Uuid,
    limit: Option<usize>,
) -> impl Responder {
    let limit = limit.unwrap_or_else(|| data.tracker.activity_limit());
    match data.tracker.recent_activity(user_id, limit).await {
        Ok(activity) => HttpResponse::Ok().json(DataResponse::success(ActivityData { activity })),
        Err(err) => error_response("recent_activity_service", err),
    }
}

pub async fn dashboard_stats_service(data: Data<AppState>, user_id: Uuid) -> impl Responder {
    match data.tracker.dashboard_stats(user_id).await {
        Ok(stats) => HttpResponse::Ok().json(DataResponse::success(StatsData { stats })),
        Err(err) => error_response("dashboard_stats_service", err),
    }
}
