pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::{AssignmentFilter, AssignmentRecord, AssignmentType, NewSubmission, StoreError};
pub use infra::metrics::HttpMetrics;
pub use storage::AssignmentStore;
