use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::careers::{ApplicationRequest, JobList, JobRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Job, JobApplication},
    response::ApiResponse,
    services::careers_service,
    state::AppState,
};

pub fn jobs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/all", get(list_all_jobs))
        .route("/{id}", put(update_job).delete(delete_job))
}

pub fn applications_router() -> Router<AppState> {
    Router::new().route("/", post(submit_application))
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    responses(
        (status = 200, description = "Open positions", body = ApiResponse<JobList>)
    ),
    tag = "Careers"
)]
pub async fn list_jobs(State(state): State<AppState>) -> AppResult<Json<ApiResponse<JobList>>> {
    let resp = careers_service::list_open_jobs(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/jobs/all",
    responses(
        (status = 200, description = "Every job posting (admin only)", body = ApiResponse<JobList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Careers"
)]
pub async fn list_all_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<JobList>>> {
    let resp = careers_service::list_all_jobs(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = JobRequest,
    responses(
        (status = 201, description = "Create job", body = ApiResponse<Job>),
        (status = 400, description = "Missing title"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Careers"
)]
pub async fn create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<JobRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Job>>)> {
    let resp = careers_service::create_job(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    request_body = JobRequest,
    responses(
        (status = 200, description = "Updated job", body = ApiResponse<Job>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Careers"
)]
pub async fn update_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<JobRequest>,
) -> AppResult<Json<ApiResponse<Job>>> {
    let resp = careers_service::update_job(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(
        ("id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Deleted job"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Careers"
)]
pub async fn delete_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = careers_service::delete_job(&state, &user, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplicationRequest,
    responses(
        (status = 201, description = "Application received", body = ApiResponse<JobApplication>),
        (status = 400, description = "Name, email and phone are required")
    ),
    tag = "Careers"
)]
pub async fn submit_application(
    State(state): State<AppState>,
    Json(payload): Json<ApplicationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<JobApplication>>)> {
    let resp = careers_service::submit_application(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
