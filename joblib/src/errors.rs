use std::{io, path::PathBuf, result};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobError {
    /// The submission was malformed; no record was created.
    #[error("{0}")]
    Validation(String),
    /// The configured script could not be opened before launch; no record was created.
    #[error("Script {} is not accessible: {source}", .path.display())]
    ScriptInaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("job registry has shut down")]
    RegistryClosed,
}

impl JobError {
    pub fn is_validation(&self) -> bool {
        matches!(self, JobError::Validation(_))
    }
}

pub type Result<T> = result::Result<T, JobError>;
