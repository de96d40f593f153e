use clap::Parser;
use std::path::PathBuf;

/// HTTP service that launches jobs and reports how they went.
#[derive(Debug, Parser)]
pub struct ServerConfig {
    /// Script executed for every job, with the job name and arguments as positional parameters.
    #[clap(long, env = "JOB_SCRIPT_PATH", default_value = "job.sh")]
    pub script_path: PathBuf,

    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// The address to bind.
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Run the script through this interpreter (e.g. `sh`) instead of executing it directly.
    #[clap(long, env = "JOB_INTERPRETER")]
    pub interpreter: Option<PathBuf>,

    /// Capacity of the job registry's message queue.
    #[clap(long, env = "REGISTRY_CAPACITY", default_value_t = 64, value_parser = parse_capacity)]
    pub registry_capacity: usize,
}

fn parse_capacity(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("capacity must be at least 1".to_string()),
        Ok(capacity) => Ok(capacity),
        Err(err) => Err(err.to_string()),
    }
}
