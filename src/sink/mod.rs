//! Submission sinks: local file store and remote collection

mod local;
mod record;
mod remote;
mod traits;

pub use local::{LocalStore, STORAGE_KEY};
pub use record::SubmissionRecord;
pub use remote::{RemoteSink, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use traits::{SinkError, SubmissionSink};

#[cfg(test)]
pub use traits::MockSubmissionSink;
