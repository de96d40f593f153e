use crate::events::{JobStatus, LaunchOutcome};
use crate::types::{Args, JobId, JobName};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// One execution attempt of a named job, original or retry.
///
/// Records are owned by the registry; callers only ever see clones.
#[derive(Clone, Debug)]
pub struct JobRecord {
    pub id: JobId,
    pub name: JobName,
    pub args: Args,
    pub script_path: PathBuf,
    pub status: JobStatus,
    pub retry_count: u32,
    pub exit_code: Option<i32>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl JobRecord {
    pub(crate) fn new(
        id: JobId,
        name: JobName,
        args: Args,
        script_path: PathBuf,
        retry_count: u32,
    ) -> Self {
        Self {
            id,
            name,
            args,
            script_path,
            status: JobStatus::Running,
            retry_count,
            exit_code: None,
            start_time: Utc::now(),
            end_time: None,
        }
    }

    /// Milliseconds between start and end, once the launch has concluded.
    /// Never negative, even if the wall clock stepped back in between.
    pub fn duration_ms(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds().max(0))
    }

    /// Record the launch result. Status, exit code and end time change together.
    pub(crate) fn conclude(&mut self, outcome: &LaunchOutcome, status: JobStatus) {
        debug_assert!(status.is_terminal());
        if self.status.is_terminal() {
            return;
        }
        self.status = status;
        self.exit_code = Some(outcome.exit_code());
        self.end_time = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> JobRecord {
        JobRecord::new(
            JobId::new(0),
            "build".into(),
            vec!["--fast".into()],
            "job.sh".into(),
            0,
        )
    }

    #[test]
    fn starts_running_without_result() {
        let record = record();
        assert_eq!(record.status, JobStatus::Running);
        assert_eq!(record.exit_code, None);
        assert_eq!(record.duration_ms(), None);
    }

    #[test]
    fn conclude_sets_result_fields_together() {
        let mut record = record();
        record.conclude(&LaunchOutcome::Exited { code: 0 }, JobStatus::Completed);
        assert_eq!(record.status, JobStatus::Completed);
        assert_eq!(record.exit_code, Some(0));
        assert!(record.duration_ms().unwrap() >= 0);
    }

    #[test]
    fn terminal_status_never_changes() {
        let mut record = record();
        record.conclude(&LaunchOutcome::Exited { code: 4 }, JobStatus::Crashed);
        let end = record.end_time;
        record.conclude(&LaunchOutcome::Exited { code: 0 }, JobStatus::Completed);
        record.conclude(&LaunchOutcome::Killed { signal: 9 }, JobStatus::Retried);
        assert_eq!(record.status, JobStatus::Crashed);
        assert_eq!(record.exit_code, Some(4));
        assert_eq!(record.end_time, end);
    }

    #[test]
    fn clock_stepping_back_gives_zero_duration() {
        let mut record = record();
        record.conclude(&LaunchOutcome::Exited { code: 0 }, JobStatus::Completed);
        record.end_time = Some(record.start_time - chrono::Duration::seconds(5));
        assert_eq!(record.duration_ms(), Some(0));
    }
}
