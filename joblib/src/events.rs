use serde::Serialize;

/// Exit code recorded when a process never started.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Completed,
    Crashed,
    /// Terminal for this record; a sibling retry record was created.
    Retried,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

/// How a single launch concluded. Exactly one is produced per launch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LaunchOutcome {
    Exited { code: i32 },
    Killed { signal: i32 },
    SpawnFailed { message: String },
}

impl LaunchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LaunchOutcome::Exited { code: 0 })
    }

    /// The exit code stored on the record. Signals follow the shell's `128 + n` convention.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchOutcome::Exited { code } => *code,
            LaunchOutcome::Killed { signal } => 128 + signal,
            LaunchOutcome::SpawnFailed { .. } => SPAWN_FAILURE_EXIT_CODE,
        }
    }
}
