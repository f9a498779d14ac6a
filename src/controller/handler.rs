use crate::model::prediction::NewPredictionSchema;
use crate::model::tournament::CreateTournamentSchema;
use crate::service::dashboard::{
    dashboard_stats_service, eligible_matches_service, recent_activity_service,
};
use crate::service::membership::{
    create_tournament_service, find_by_invite_code_service, join_tournament_service,
    leave_tournament_service, submit_prediction_service, withdraw_prediction_service,
};
use crate::AppState;
use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, post, web, Responder};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

#[get("/users/{user_id}/eligible-matches")]
async fn eligible_matches_handler(data: Data<AppState>, path: Path<Uuid>) -> impl Responder {
    eligible_matches_service(data, path.into_inner()).await
}

#[get("/users/{user_id}/activity")]
async fn recent_activity_handler(
    data: Data<AppState>,
    path: Path<Uuid>,
    query: Query<ActivityQuery>,
) -> impl Responder {
    recent_activity_service(data, path.into_inner(), query.limit).await
}

#[get("/users/{user_id}/stats")]
async fn dashboard_stats_handler(data: Data<AppState>, path: Path<Uuid>) -> impl Responder {
    dashboard_stats_service(data, path.into_inner()).await
}

#[post("/users/{user_id}/tournaments")]
async fn create_tournament_handler(
    data: Data<AppState>,
    path: Path<Uuid>,
    body: Json<CreateTournamentSchema>,
) -> impl Responder {
    create_tournament_service(data, path.into_inner(), body.into_inner()).await
}

#[get("/tournaments/invite/{code}")]
async fn invite_code_handler(data: Data<AppState>, path: Path<String>) -> impl Responder {
    find_by_invite_code_service(data, path.into_inner()).await
}

#[post("/users/{user_id}/tournaments/{tournament_id}/join")]
async fn join_tournament_handler(
    data: Data<AppState>,
    path: Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (user_id, tournament_id) = path.into_inner();
    join_tournament_service(data, user_id, tournament_id).await
}

#[delete("/users/{user_id}/tournaments/{tournament_id}/join")]
async fn leave_tournament_handler(
    data: Data<AppState>,
    path: Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (user_id, tournament_id) = path.into_inner();
    leave_tournament_service(data, user_id, tournament_id).await
}

#[post("/users/{user_id}/predictions")]
async fn submit_prediction_handler(
    data: Data<AppState>,
    path: Path<Uuid>,
    body: Json<NewPredictionSchema>,
) -> impl Responder {
    submit_prediction_service(data, path.into_inner(), body.into_inner()).await
}

#[delete("/users/{user_id}/predictions/{match_id}")]
async fn withdraw_prediction_handler(
    data: Data<AppState>,
    path: Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (user_id, match_id) = path.into_inner();
    withdraw_prediction_service(data, user_id, match_id).await
}

pub fn config(conf: &mut web::ServiceConfig) {
    let scope = web::scope("/api/v1")
        .service(eligible_matches_handler)
        .service(recent_activity_handler)
        .service(dashboard_stats_handler)
        .service(create_tournament_handler)
        .service(invite_code_handler)
        .service(join_tournament_handler)
        .service(leave_tournament_handler)
        .service(submit_prediction_handler)
        .service(withdraw_prediction_handler);

    conf.service(scope);
}
