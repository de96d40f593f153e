use crate::record::JobRecord;
use crate::types::{Args, JobId, JobName};
use std::path::PathBuf;
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum RegistryMessage {
    /// `script` has already been checked and resolved to an absolute path.
    CreateJob {
        name: JobName,
        args: Args,
        script: PathBuf,
        response: oneshot::Sender<JobId>,
    },
    ListJobs {
        response: oneshot::Sender<Vec<JobRecord>>,
    },
    GetJob {
        job_id: JobId,
        response: oneshot::Sender<Option<JobRecord>>,
    },
}
