use crate::errors::{JobError, Result};
use crate::events::LaunchOutcome;
use futures::future::{self, BoxFuture, FutureExt};
use std::{
    io,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};
use tokio::{fs, process};

/// A launch in flight. Resolves exactly once, when the process exits or fails to start.
pub type Launch = BoxFuture<'static, LaunchOutcome>;

/// Starts the external process backing a job.
///
/// Launching is split in two. `resolve` checks the script before anything is started and
/// is the only step that can reject a submission. `launch` spawns the process and reports
/// every later failure through the returned [`Launch`].
pub trait Launcher: Send + Sync {
    /// Check that the script can be read and turn it into an absolute path.
    fn resolve(&self, script_path: &Path) -> BoxFuture<'static, Result<PathBuf>>;

    fn launch(&self, script: &Path, name: &str, args: &[String]) -> Launch;
}

/// Launches the script as a child process with inherited stdio.
///
/// The script is executed directly unless an interpreter is configured, in which case
/// the interpreter is started with the script path as its first argument.
#[derive(Clone, Debug, Default)]
pub struct ProcessLauncher {
    interpreter: Option<PathBuf>,
}

impl ProcessLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interpreter(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: Some(interpreter.into()),
        }
    }
}

impl Launcher for ProcessLauncher {
    fn resolve(&self, script_path: &Path) -> BoxFuture<'static, Result<PathBuf>> {
        let path = script_path.to_path_buf();
        async move {
            let inaccessible = |source: io::Error| JobError::ScriptInaccessible {
                path: path.clone(),
                source,
            };
            fs::File::open(&path).await.map_err(inaccessible)?;
            fs::canonicalize(&path).await.map_err(inaccessible)
        }
        .boxed()
    }

    fn launch(&self, script: &Path, name: &str, args: &[String]) -> Launch {
        let mut command = match &self.interpreter {
            Some(interpreter) => {
                let mut command = process::Command::new(interpreter);
                command.arg(script);
                command
            }
            None => process::Command::new(script),
        };
        command
            .arg(name)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        match command.spawn() {
            Ok(mut child) => async move {
                match child.wait().await {
                    Ok(status) => exit_outcome(status),
                    Err(err) => LaunchOutcome::SpawnFailed {
                        message: format!("failed to wait on child: {}", err),
                    },
                }
            }
            .boxed(),
            Err(err) => future::ready(LaunchOutcome::SpawnFailed {
                message: err.to_string(),
            })
            .boxed(),
        }
    }
}

fn exit_outcome(status: ExitStatus) -> LaunchOutcome {
    if let Some(code) = status.code() {
        return LaunchOutcome::Exited { code };
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return LaunchOutcome::Killed { signal };
        }
    }
    LaunchOutcome::SpawnFailed {
        message: format!("process ended without an exit code ({})", status),
    }
}
