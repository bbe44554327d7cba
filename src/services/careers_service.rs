use chrono::Utc;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::careers::{ApplicationList, ApplicationRequest, JobList, JobRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Job, JobApplication},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_open_jobs(state: &AppState) -> AppResult<ApiResponse<JobList>> {
    let items = state
        .store
        .list::<Job>()
        .await?
        .into_iter()
        .filter(|job| job.is_active)
        .collect();
    Ok(ApiResponse::success("Jobs", JobList { items }, None))
}

pub async fn list_all_jobs(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<JobList>> {
    ensure_admin(user)?;
    let items = state.store.list::<Job>().await?;
    Ok(ApiResponse::success("Jobs", JobList { items }, None))
}

fn job_from_request(id: String, payload: JobRequest) -> AppResult<Job> {
    let title = payload.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    Ok(Job {
        id,
        title,
        location: payload.location,
        job_type: payload.job_type,
        salary: payload.salary,
        description: payload.description,
        requirements: payload.requirements,
        benefits: payload.benefits,
        is_active: payload.is_active.unwrap_or(true),
    })
}

pub async fn create_job(
    state: &AppState,
    user: &AuthUser,
    payload: JobRequest,
) -> AppResult<ApiResponse<Job>> {
    ensure_admin(user)?;
    let job = job_from_request(Uuid::new_v4().to_string(), payload)?;
    let job = state.store.insert(job).await?;
    log_audit(
        user,
        "job_create",
        "jobs",
        Some(serde_json::json!({ "job_id": job.id })),
    );
    Ok(ApiResponse::success("Job created", job, Some(Meta::empty())))
}

pub async fn update_job(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: JobRequest,
) -> AppResult<ApiResponse<Job>> {
    ensure_admin(user)?;
    let existing = state.store.fetch::<Job>(id).await?;
    let job = job_from_request(existing.id, payload)?;
    let job = state.store.update(job).await?;
    log_audit(
        user,
        "job_update",
        "jobs",
        Some(serde_json::json!({ "job_id": job.id })),
    );
    Ok(ApiResponse::success("Updated", job, Some(Meta::empty())))
}

pub async fn delete_job(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    state.store.delete::<Job>(id).await?;
    log_audit(
        user,
        "job_delete",
        "jobs",
        Some(serde_json::json!({ "job_id": id })),
    );
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn submit_application(
    state: &AppState,
    payload: ApplicationRequest,
) -> AppResult<ApiResponse<JobApplication>> {
    let name = payload.name.trim().to_string();
    let email = payload.email.trim().to_string();
    let phone = payload.phone.trim().to_string();
    if name.is_empty() || email.is_empty() || phone.is_empty() {
        return Err(AppError::BadRequest(
            "Name, email and phone are required".to_string(),
        ));
    }

    let application = JobApplication {
        id: Uuid::new_v4().to_string(),
        name,
        email,
        phone,
        position: payload.position,
        experience: payload.experience,
        note: payload.note,
        cv_file_name: payload.cv_file_name.filter(|f| !f.trim().is_empty()),
        submitted_at: Utc::now(),
    };
    let application = state.store.insert(application).await?;
    tracing::info!(application_id = %application.id, position = %application.position, "job application received");

    Ok(ApiResponse::success(
        "Application submitted",
        application,
        Some(Meta::empty()),
    ))
}

pub async fn list_applications(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ApplicationList>> {
    ensure_admin(user)?;
    let applications = state.store.list::<JobApplication>().await?;
    let (items, meta) = pagination.paginate(applications);
    Ok(ApiResponse::success(
        "Applications",
        ApplicationList { items },
        Some(meta),
    ))
}
