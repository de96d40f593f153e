use crate::events::LaunchOutcome;

/// Retry attempts allowed per original submission.
pub const MAX_RETRIES: u32 = 1;

/// What the registry does with a record once its launch concludes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Completed,
    /// Mark the record retried and dispatch a sibling with `retry_count + 1`.
    Retry,
    Crashed,
}

/// Decide the next state of a record from its launch outcome and retry count.
///
/// Spawn failures and signals count as failures exactly like a non-zero exit.
pub fn transition(outcome: &LaunchOutcome, retry_count: u32) -> Transition {
    if outcome.is_success() {
        Transition::Completed
    } else if retry_count < MAX_RETRIES {
        Transition::Retry
    } else {
        Transition::Crashed
    }
}
