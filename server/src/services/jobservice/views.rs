use joblib::{JobId, JobRecord, JobStatus};
use serde::{Deserialize, Serialize};

use super::errors::ApiError;

/// Body of `POST /jobs`. Fields are optional so missing ones are reported as a bad request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobBody {
    pub job_name: Option<String>,
    pub arguments: Option<Vec<String>>,
}

impl CreateJobBody {
    pub fn into_submission(self) -> Result<(String, Vec<String>), ApiError> {
        match (self.job_name, self.arguments) {
            (Some(name), Some(args)) if !name.is_empty() => Ok((name, args)),
            _ => Err(ApiError::MalformedSubmission),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobResponse {
    pub job_id: JobId,
    pub status: JobStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub job_id: JobId,
    pub job_name: String,
    pub args: Vec<String>,
    pub script_path: String,
    pub status: JobStatus,
    pub retries: u32,
    pub exit_code: Option<i32>,
    /// Milliseconds, once the job has concluded.
    pub duration: Option<i64>,
}

impl From<JobRecord> for JobView {
    fn from(record: JobRecord) -> Self {
        let duration = record.duration_ms();
        JobView {
            job_id: record.id,
            job_name: record.name,
            args: record.args,
            script_path: record.script_path.to_string_lossy().into_owned(),
            status: record.status,
            retries: record.retry_count,
            exit_code: record.exit_code,
            duration,
        }
    }
}
