mod actor;
mod messages;

use self::{
    actor::JobRegistry,
    messages::RegistryMessage::{self, CreateJob, GetJob, ListJobs},
};
use crate::errors::{JobError, Result};
use crate::launcher::Launcher;
use crate::record::JobRecord;
use crate::types::{Args, JobId, JobName};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

/// A `JobRegistry` which allocates job ids, launches jobs, applies the retry policy and
/// answers queries about every record it has created.
///
/// This struct is actually an actor handle, the real work is done in the actor spawned by
/// `JobRegistryHandle::spawn`. The actor processes one message or launch outcome at a time,
/// so id allocation is race free and a failed original is flagged `Retried` in the same step
/// that stores its retry. Handles can be cloned freely across tasks without an `Arc<Mutex>`.
///
/// The actor never touches the filesystem: a submission's script is checked by the handle
/// before the request is sent, and a retry's script is checked inside its launch.
#[derive(Clone)]
pub struct JobRegistryHandle {
    sender: mpsc::Sender<RegistryMessage>,
    launcher: Arc<dyn Launcher>,
    script_path: Arc<PathBuf>,
}

impl JobRegistryHandle {
    /// Spawn a new registry running every job with the script at `script_path`.
    ///
    /// Specify the capacity for the registry's message queue. This limits the build-up of inbound messages.
    pub fn spawn(
        launcher: Arc<dyn Launcher>,
        script_path: impl Into<PathBuf>,
        message_capacity: usize,
    ) -> Self {
        let script_path = script_path.into();
        info!("Using script path: {}", script_path.display());
        let (sender, receiver) = mpsc::channel(message_capacity);
        JobRegistry::spawn(receiver, Arc::clone(&launcher), script_path.clone());
        Self {
            sender,
            launcher,
            script_path: Arc::new(script_path),
        }
    }

    /// Create a job and start its first launch. Returns as soon as the process is started.
    ///
    /// Fails without creating a record if the name is empty or the script is inaccessible.
    pub async fn create_job(&self, name: JobName, args: Args) -> Result<JobId> {
        if name.is_empty() {
            return Err(JobError::Validation(
                "jobName must be a non-empty string".into(),
            ));
        }
        let script = self
            .launcher
            .resolve(&self.script_path)
            .await
            .inspect_err(|err| error!("Job {} could not be started: {}", name, err))?;
        self.request(|response| CreateJob {
            name,
            args,
            script,
            response,
        })
        .await
    }

    /// Snapshots of every record in creation order.
    pub async fn jobs(&self) -> Result<Vec<JobRecord>> {
        self.request(|response| ListJobs { response }).await
    }

    pub async fn job(&self, job_id: JobId) -> Result<Option<JobRecord>> {
        self.request(|response| GetJob { job_id, response }).await
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> RegistryMessage,
    ) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(message(tx))
            .await
            .map_err(|_| JobError::RegistryClosed)?;
        rx.await.map_err(|_| JobError::RegistryClosed)
    }
}
