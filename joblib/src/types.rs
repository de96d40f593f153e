use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

pub type JobName = String;
pub type Args = Vec<String>;

const JOB_ID_PREFIX: &str = "job-";

/// Identity of a single job record.
///
/// Ids are issued by the registry from a strictly increasing counter, so ordering ids
/// is the same as ordering records by creation. Rendered as `job-<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(u64);

impl JobId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", JOB_ID_PREFIX, self.0)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseJobIdError;

impl fmt::Display for ParseJobIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job ids look like `{}<number>`", JOB_ID_PREFIX)
    }
}

impl std::error::Error for ParseJobIdError {}

impl FromStr for JobId {
    type Err = ParseJobIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(JOB_ID_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(JobId)
            .ok_or(ParseJobIdError)
    }
}

impl Serialize for JobId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse() {
        let id = JobId::new(42);
        assert_eq!(id.to_string(), "job-42");
        assert_eq!("job-42".parse::<JobId>(), Ok(id));
    }

    #[test]
    fn rejects_foreign_ids() {
        assert!("42".parse::<JobId>().is_err());
        assert!("job-".parse::<JobId>().is_err());
        assert!("job--1".parse::<JobId>().is_err());
        assert!("task-3".parse::<JobId>().is_err());
    }

    #[test]
    fn ordered_by_issue() {
        assert!(JobId::new(9) < JobId::new(10));
    }
}
