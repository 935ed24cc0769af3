pub mod config;
pub mod replay;
pub mod status;
pub mod watch;

use crate::domain::ports::source::SourceError;

/// True when the cycle failed only because a replay source ran out of ticks.
pub(crate) fn is_exhausted(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<SourceError>(),
        Some(SourceError::Exhausted(_))
    )
}
