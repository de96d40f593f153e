mod actors;
pub mod errors;
pub mod events;
pub mod launcher;
pub mod record;
pub mod retry;
pub mod stats;
pub mod types;

// re-export the registry handle as if it is the job registry itself.
pub use actors::registry::JobRegistryHandle as JobRegistry;
pub use errors::{JobError, Result};
pub use events::{JobStatus, LaunchOutcome};
pub use launcher::{Launcher, ProcessLauncher};
pub use record::JobRecord;
pub use types::JobId;

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::launcher::tests::write_script;
    use std::{sync::Arc, time::Duration};
    use tempfile::TempDir;

    async fn settle(registry: &JobRegistry, expected: usize) -> Vec<JobRecord> {
        tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                let jobs = registry.jobs().await.unwrap();
                if jobs.len() == expected && jobs.iter().all(|job| job.status.is_terminal()) {
                    return jobs;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("jobs did not settle")
    }

    #[tokio::test]
    async fn completed_and_crashed_lineages() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "job.sh", "case \"$1\" in test-*) exit 0;; *) exit 1;; esac");
        let registry = JobRegistry::spawn(Arc::new(ProcessLauncher::new()), &script, 8);

        let a = registry
            .create_job("test-alpha".into(), vec!["x".into(), "y".into()])
            .await
            .unwrap();
        let b = registry.create_job("b".into(), vec![]).await.unwrap();

        let jobs = settle(&registry, 3).await;
        assert_eq!(jobs[0].id, a);
        assert_eq!(jobs[0].status, JobStatus::Completed);
        assert_eq!(jobs[1].id, b);
        assert_eq!(jobs[1].status, JobStatus::Retried);
        assert_eq!(jobs[1].exit_code, Some(1));
        assert_eq!(jobs[2].name, "b");
        assert_eq!(jobs[2].retry_count, 1);
        assert_eq!(jobs[2].status, JobStatus::Crashed);

        let report = stats::analyze(&jobs);
        assert_eq!(report.total_jobs, 3);
        assert_eq!(report.overall_success_rate, 0.33);
        let prefix = report
            .patterns
            .iter()
            .find(|p| p.pattern == "Job name starts with test-")
            .unwrap();
        assert_eq!((prefix.match_count, prefix.success_rate), (1, 1.0));
    }

    #[tokio::test]
    async fn retry_recovers_a_flaky_job() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("attempted");
        let script = write_script(
            &dir,
            "flaky.sh",
            &format!(
                "if [ -e {0} ]; then exit 0; fi\ntouch {0}\nexit 5",
                marker.display()
            ),
        );
        let registry = JobRegistry::spawn(Arc::new(ProcessLauncher::new()), &script, 8);
        registry.create_job("flaky".into(), vec![]).await.unwrap();

        let jobs = settle(&registry, 2).await;
        assert_eq!(jobs[0].status, JobStatus::Retried);
        assert_eq!(jobs[0].exit_code, Some(5));
        assert_eq!(jobs[1].status, JobStatus::Completed);
        assert_eq!(jobs[1].exit_code, Some(0));
    }

    #[tokio::test]
    async fn missing_script_is_rejected_at_submission() {
        let dir = TempDir::new().unwrap();
        let registry = JobRegistry::spawn(
            Arc::new(ProcessLauncher::new()),
            dir.path().join("absent.sh"),
            8,
        );
        let err = registry.create_job("x".into(), vec![]).await.unwrap_err();
        assert!(matches!(err, JobError::ScriptInaccessible { .. }));
        assert!(err.to_string().contains("is not accessible"));
        assert!(registry.jobs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_job_does_not_wait_for_the_process() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "slow.sh", "sleep 2");
        let registry = JobRegistry::spawn(Arc::new(ProcessLauncher::new()), &script, 8);

        let job_id = tokio::time::timeout(
            Duration::from_secs(1),
            registry.create_job("slow".into(), vec![]),
        )
        .await
        .expect("create_job blocked on the process")
        .unwrap();
        let record = registry.job(job_id).await.unwrap().unwrap();
        assert_eq!(record.status, JobStatus::Running);
        assert_eq!(record.duration_ms(), None);
    }
}
