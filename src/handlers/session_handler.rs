use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{SelectAnswerRequest, StartTestRequest},
        response::DeleteSessionResponse,
    },
};

#[post("/api/sessions")]
async fn create_session(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let snapshot = state.session_service.create_session().await?;
    Ok(HttpResponse::Created().json(snapshot))
}

#[get("/api/sessions/{id}")]
async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let snapshot = state.session_service.snapshot(&id).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[post("/api/sessions/{id}/start")]
async fn start_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<StartTestRequest>,
) -> Result<HttpResponse, AppError> {
    let configuration = request.into_inner().into_configuration()?;
    let snapshot = state.session_service.start(&id, configuration).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[put("/api/sessions/{id}/answers")]
async fn select_answer(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SelectAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let snapshot = state
        .session_service
        .select_answer(&id, &request.question_id, &request.option)
        .await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[post("/api/sessions/{id}/submit")]
async fn submit_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let result = state.session_service.submit(&id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/sessions/{id}/reset")]
async fn reset_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let snapshot = state.session_service.reset(&id).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[get("/api/sessions/{id}/result")]
async fn get_result(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let result = state.session_service.result(&id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[delete("/api/sessions/{id}")]
async fn delete_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.session_service.delete_session(&id).await?;
    Ok(HttpResponse::Ok().json(DeleteSessionResponse {
        message: format!("Session {} deleted", id),
    }))
}
