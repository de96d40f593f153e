use clap::{Parser, Subcommand};

/// Talk to a job server over HTTP
#[derive(Debug, Parser)]
pub struct ArgParser {
    /// Base URL of the server
    #[clap(
        short = 's',
        long = "server",
        env = "JOBS_SERVER",
        default_value = "http://localhost:3000"
    )]
    pub server: String,
    /// The sub-command to use
    #[clap(subcommand)]
    pub sub_command: SubCommand,
}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum SubCommand {
    /// submit a new job
    Submit {
        /// name of the job, passed to the script as its first argument
        name: String,

        /// arguments passed to the script after the job name
        #[clap(allow_hyphen_values = true, trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// list every job the server knows about
    List,
    /// show a single job
    Get {
        /// job id, e.g. job-0
        job_id: String,
    },
    /// show success-rate statistics
    Stats,
}
