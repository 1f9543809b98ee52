//! Training Application Layer - Use Cases

pub mod close_session;
pub mod get_session;
pub mod record_set;
pub mod start_session;

pub use close_session::{
    AbandonSessionInput, AbandonSessionUseCase, FinishSessionInput, FinishSessionUseCase,
};
pub use get_session::{GetActiveSessionUseCase, GetSessionInput, GetSessionUseCase, SessionDetails};
pub use record_set::{RecordSetInput, RecordSetUseCase};
pub use start_session::{StartSessionInput, StartSessionUseCase};

use kernel::id::Id;

use crate::error::{TrainingError, TrainingResult};

/// Parse a path or body identifier
pub(crate) fn parse_id<T>(raw: &str, field: &str) -> TrainingResult<Id<T>> {
    Id::parse_str(raw.trim()).map_err(|_| {
        TrainingError::MalformedParameters(format!("{field} must be a valid UUID"))
    })
}
