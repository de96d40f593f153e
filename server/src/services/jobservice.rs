mod errors;
mod views;

use self::errors::ApiError;
use self::views::{CreateJobBody, CreateJobResponse, JobView};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use joblib::{stats, JobId, JobRegistry, JobStatus};
use tracing::error;

/// Shared by every handler; the registry handle is cheap to clone.
#[derive(Clone)]
pub struct JobService {
    registry: JobRegistry,
}

pub fn router(registry: JobRegistry) -> Router {
    Router::new()
        .route("/jobs", post(create_job).get(list_jobs))
        .route("/jobs/{job_id}", get(get_job))
        .route("/stats", get(get_stats))
        .with_state(JobService { registry })
}

async fn create_job(
    State(service): State<JobService>,
    payload: Result<Json<CreateJobBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateJobResponse>), ApiError> {
    submit(&service, payload)
        .await
        .inspect_err(|err| error!("POST /jobs error: {}", err))
}

async fn submit(
    service: &JobService,
    payload: Result<Json<CreateJobBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateJobResponse>), ApiError> {
    let Json(body) = payload?;
    let (name, args) = body.into_submission()?;
    let job_id = service.registry.create_job(name, args).await?;
    // the launch may already have concluded by the time we look
    let status = service
        .registry
        .job(job_id)
        .await?
        .map_or(JobStatus::Running, |job| job.status);
    Ok((StatusCode::CREATED, Json(CreateJobResponse { job_id, status })))
}

async fn list_jobs(State(service): State<JobService>) -> Result<Json<Vec<JobView>>, ApiError> {
    let jobs = service
        .registry
        .jobs()
        .await
        .inspect_err(|err| error!("GET /jobs error: {}", err))?;
    Ok(Json(jobs.into_iter().map(JobView::from).collect()))
}

async fn get_job(
    State(service): State<JobService>,
    Path(job_id): Path<String>,
) -> Result<Json<JobView>, ApiError> {
    let not_found = || ApiError::NotFound(job_id.clone());
    let id: JobId = job_id.parse().map_err(|_| not_found())?;
    let job = service
        .registry
        .job(id)
        .await
        .inspect_err(|err| error!("GET /jobs/{} error: {}", job_id, err))?
        .ok_or_else(not_found)?;
    Ok(Json(job.into()))
}

async fn get_stats(State(service): State<JobService>) -> Result<Json<stats::StatsReport>, ApiError> {
    let jobs = service
        .registry
        .jobs()
        .await
        .inspect_err(|err| error!("GET /stats error: {}", err))?;
    Ok(Json(stats::analyze(&jobs)))
}
