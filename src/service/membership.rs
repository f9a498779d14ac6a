use crate::model::prediction::NewPredictionSchema;
use crate::model::response::{DataResponse, GenericResponse};
use crate::model::tournament::CreateTournamentSchema;
use crate::service::dashboard::error_response;
use crate::AppState;
use actix_web::{web::Data, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;

pub async fn create_tournament_service(
    data: Data<AppState>,
    admin_id: Uuid,
    body: CreateTournamentSchema,
) -> impl Responder {
    match data.tracker.create_tournament(admin_id, body).await {
        Ok(tournament) => HttpResponse::Created().json(DataResponse::success(tournament)),
        Err(err) => error_response("create_tournament_service", err),
    }
}

pub async fn find_by_invite_code_service(data: Data<AppState>, code: String) -> impl Responder {
    match data.tracker.find_tournament_by_invite_code(&code).await {
        Ok(Some(tournament)) => HttpResponse::Ok().json(DataResponse::success(tournament)),
        Ok(None) => HttpResponse::NotFound().json(GenericResponse::failed(
            "No tournament found for that invite code",
        )),
        Err(err) => error_response("find_by_invite_code_service", err),
    }
}

pub async fn join_tournament_service(
    data: Data<AppState>,
    user_id: Uuid,
    tournament_id: Uuid,
) -> impl Responder {
    match data.tracker.join_tournament(user_id, tournament_id).await {
        Ok(participant) => HttpResponse::Created().json(DataResponse::success(participant)),
        Err(err) => error_response("join_tournament_service", err),
    }
}

pub async fn leave_tournament_service(
    data: Data<AppState>,
    user_id: Uuid,
    tournament_id: Uuid,
) -> impl Responder {
    match data.tracker.leave_tournament(user_id, tournament_id).await {
        Ok(removed) => HttpResponse::Ok().json(json!({
            "status": "success",
            "removed": removed
        })),
        Err(err) => error_response("leave_tournament_service", err),
    }
}

pub async fn submit_prediction_service(
    data: Data<AppState>,
    user_id: Uuid,
    body: NewPredictionSchema,
) -> impl Responder {
    match data.tracker.submit_prediction(user_id, body).await {
        Ok(prediction) => HttpResponse::Created().json(DataResponse::success(prediction)),
        Err(err) => error_response("submit_prediction_service", err),
    }
}

pub async fn withdraw_prediction_service(
    data: Data<AppState>,
    user_id: Uuid,
    match_id: Uuid,
) -> impl Responder {
    match data.tracker.withdraw_prediction(user_id, match_id).await {
        Ok(removed) => HttpResponse::Ok().json(json!({
            "status": "success",
            "removed": removed
        })),
        Err(err) => error_response("withdraw_prediction_service", err),
    }
}
