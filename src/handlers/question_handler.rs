use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{CombinedQuestionsRequest, QuestionQueryParams},
};

#[get("/api/subjects")]
async fn list_subjects(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.question_service.subjects())
}

#[get("/api/questions/{subject}")]
async fn list_questions(
    state: web::Data<AppState>,
    subject: web::Path<String>,
    query: web::Query<QuestionQueryParams>,
) -> Result<HttpResponse, AppError> {
    let page = state
        .question_service
        .list_questions(&subject, &query)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/api/questions/combined")]
async fn combined_questions(
    state: web::Data<AppState>,
    request: web::Json<CombinedQuestionsRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .question_service
        .combined_questions(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
