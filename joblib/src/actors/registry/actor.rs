use super::messages::RegistryMessage;
use crate::events::{JobStatus, LaunchOutcome};
use crate::launcher::{Launch, Launcher};
use crate::record::JobRecord;
use crate::retry::{transition, Transition};
use crate::types::{Args, JobId, JobName};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::{collections::BTreeMap, path::PathBuf, sync::Arc};
use tokio::{select, sync::mpsc};
use tracing::{error, info, warn};

pub struct JobRegistry {
    inbox: mpsc::Receiver<RegistryMessage>,
    launcher: Arc<dyn Launcher>,
    script_path: PathBuf,
    next_id: u64,
    // ids are issued in increasing order, so key order is creation order
    jobs: BTreeMap<JobId, JobRecord>,
    launches: FuturesUnordered<BoxFuture<'static, (JobId, LaunchOutcome)>>,
}

impl JobRegistry {
    pub fn spawn(
        inbox: mpsc::Receiver<RegistryMessage>,
        launcher: Arc<dyn Launcher>,
        script_path: PathBuf,
    ) {
        let actor = Self {
            inbox,
            launcher,
            script_path,
            next_id: 0,
            jobs: BTreeMap::new(),
            launches: FuturesUnordered::new(),
        };
        tokio::spawn(async move { actor.run().await });
    }

    async fn run(mut self) {
        use self::RegistryMessage::*;
        loop {
            select! {
                maybe_msg = self.inbox.recv() => {
                    let Some(msg) = maybe_msg else {
                        // every handle dropped; nobody can observe the registry anymore
                        return;
                    };
                    match msg {
                        CreateJob { name, args, script, response } => {
                            let _ = response.send(self.create_job(name, args, script));
                        }
                        ListJobs { response } => {
                            let _ = response.send(self.jobs.values().cloned().collect());
                        }
                        GetJob { job_id, response } => {
                            let _ = response.send(self.jobs.get(&job_id).cloned());
                        }
                    }
                }
                Some((job_id, outcome)) = self.launches.next(), if !self.launches.is_empty() => {
                    self.launch_concluded(job_id, outcome);
                }
            }
        }
    }

    fn create_job(&mut self, name: JobName, args: Args, script: PathBuf) -> JobId {
        let record = self.new_record(name, args, 0);
        let launch = self.launcher.launch(&script, &record.name, &record.args);
        let job_id = record.id;
        self.track(record, launch);
        job_id
    }

    fn allocate_id(&mut self) -> JobId {
        let job_id = JobId::new(self.next_id);
        self.next_id += 1;
        job_id
    }

    fn new_record(&mut self, name: JobName, args: Args, retry_count: u32) -> JobRecord {
        let job_id = self.allocate_id();
        let record = JobRecord::new(job_id, name, args, self.script_path.clone(), retry_count);
        info!(
            "Starting job {} ({}) with script {} and args: {}",
            record.id,
            record.name,
            record.script_path.display(),
            record.args.join(", ")
        );
        record
    }

    fn track(&mut self, record: JobRecord, launch: Launch) {
        let job_id = record.id;
        self.jobs.insert(job_id, record);
        self.launches
            .push(launch.map(move |outcome| (job_id, outcome)).boxed());
    }

    fn launch_concluded(&mut self, job_id: JobId, outcome: LaunchOutcome) {
        let Some(record) = self.jobs.get(&job_id) else {
            warn!("Received launch outcome for unknown job {}", job_id);
            return;
        };
        if let LaunchOutcome::SpawnFailed { message } = &outcome {
            error!("Job {} failed to spawn: {}", job_id, message);
        }
        let retry_count = record.retry_count;

        match transition(&outcome, retry_count) {
            Transition::Completed => {
                self.conclude(job_id, &outcome, JobStatus::Completed);
                info!("Job {} completed successfully", job_id);
            }
            Transition::Crashed => {
                self.conclude(job_id, &outcome, JobStatus::Crashed);
                error!(
                    "Job {} crashed with exit code {} after {} retries",
                    job_id,
                    outcome.exit_code(),
                    retry_count
                );
            }
            Transition::Retry => {
                warn!(
                    "Job {} crashed with exit code {}, retrying...",
                    job_id,
                    outcome.exit_code()
                );
                let (name, args) = (record.name.clone(), record.args.clone());
                // store the retry before flagging the original so readers never see one without the other
                self.dispatch_retry(name, args, retry_count + 1);
                self.conclude(job_id, &outcome, JobStatus::Retried);
            }
        }
    }

    /// Store a retry record and start it. The script is checked again off the actor;
    /// if it has become inaccessible the retry concludes as a spawn failure.
    fn dispatch_retry(&mut self, name: JobName, args: Args, retry_count: u32) {
        let record = self.new_record(name, args, retry_count);
        let launcher = Arc::clone(&self.launcher);
        let (script_path, name, args) = (
            record.script_path.clone(),
            record.name.clone(),
            record.args.clone(),
        );
        let launch = async move {
            match launcher.resolve(&script_path).await {
                Ok(script) => launcher.launch(&script, &name, &args).await,
                Err(err) => LaunchOutcome::SpawnFailed {
                    message: err.to_string(),
                },
            }
        }
        .boxed();
        self.track(record, launch);
    }

    fn conclude(&mut self, job_id: JobId, outcome: &LaunchOutcome, status: JobStatus) {
        if let Some(record) = self.jobs.get_mut(&job_id) {
            record.conclude(outcome, status);
        }
    }
}
